//! Fetch port: the boundary between the crawler and the network
//!
//! The crawler only ever talks to the [`Fetcher`] trait; the reqwest-backed
//! [`HttpFetcher`] is the production implementation. A fetch is a single
//! attempt returning body text or a typed failure; retry policy belongs to
//! the caller.

use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;
use url::Url;

/// Typed fetch failures
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("Request timeout")]
    Timeout,

    #[error("Connection failed")]
    Connect,

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("Empty response body")]
    EmptyBody,

    #[error("Fetch error: {0}")]
    Other(String),
}

impl FetchError {
    /// Returns true if another attempt could plausibly succeed
    ///
    /// Client errors (4xx) are final; timeouts, connection failures, and
    /// server errors are worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Timeout | FetchError::Connect => true,
            FetchError::Status(code) => *code >= 500,
            FetchError::EmptyBody => false,
            FetchError::Other(_) => true,
        }
    }
}

/// A successfully fetched resource, owned transiently until classification
#[derive(Debug, Clone)]
pub struct FetchedResource {
    /// The URL the body was fetched from
    pub url: Url,

    /// Body text (non-empty by construction)
    pub body: String,
}

/// The fetch port the crawler depends on
///
/// Implementations must be shareable across worker tasks.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches a URL once, returning the body text or a typed failure
    async fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}

/// Browser-like user agents, one picked per client
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1",
];

/// Production fetcher backed by reqwest
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds an HTTP fetcher with the given per-request timeout
    ///
    /// The client follows redirects (limit 10), decompresses gzip/brotli, and
    /// presents a browser-like user agent.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.subsec_nanos() as usize)
            .unwrap_or(0);
        let user_agent = USER_AGENTS[nanos % USER_AGENTS.len()];

        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .redirect(reqwest::redirect::Policy::limited(10))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(classify_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(classify_reqwest_error)?;
        if body.trim().is_empty() {
            return Err(FetchError::EmptyBody);
        }

        Ok(body)
    }
}

fn classify_reqwest_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_connect() {
        FetchError::Connect
    } else {
        FetchError::Other(e.to_string())
    }
}
