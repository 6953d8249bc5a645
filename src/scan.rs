//! Top-level scan orchestration
//!
//! `run_scan` is the error boundary: validation, crawl, parallel
//! classification, aggregation, and enrichment all happen behind it, and
//! every failure, including a panic in a worker, comes back as a
//! structured [`ScanOutcome`], never a crash.

use crate::classify::classify;
use crate::config::{validate_config, ScanConfig};
use crate::crawler::Crawler;
use crate::enrich::{lookup_country, CountryResolver};
use crate::fetch::Fetcher;
use crate::report::{Aggregator, ScanOutcome, ScanReport};
use crate::signatures::SignatureCatalog;
use crate::url::validate_scan_url;
use crate::ScanError;
use std::sync::Arc;
use tokio::task::JoinSet;

/// One scan request
#[derive(Debug, Clone)]
pub struct ScanRequest {
    /// Target URL (scheme optional; https assumed)
    pub url: String,

    /// Traversal depth override
    pub depth: Option<u32>,

    /// Wall-clock budget override, in seconds
    pub timeout_secs: Option<u64>,
}

impl ScanRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            depth: None,
            timeout_secs: None,
        }
    }
}

/// Runs a scan and returns a structured outcome
///
/// # Arguments
///
/// * `request` - The scan target and per-request overrides
/// * `fetcher` - The fetch port implementation
/// * `resolver` - Reverse-geo collaborator for country enrichment
/// * `config` - Base configuration; request overrides are applied on top
pub async fn run_scan(
    request: ScanRequest,
    fetcher: Arc<dyn Fetcher>,
    resolver: Arc<dyn CountryResolver>,
    config: &ScanConfig,
) -> ScanOutcome {
    let config = config.clone();
    let handle = tokio::spawn(async move { scan_inner(request, fetcher, resolver, config).await });

    match handle.await {
        Ok(Ok(report)) => ScanOutcome::ok(report),
        Ok(Err(e)) => {
            tracing::warn!("scan failed: {}", e);
            ScanOutcome::failure(e.to_string())
        }
        // A panicked worker still yields a structured error
        Err(join_error) => {
            tracing::error!("scan task panicked: {}", join_error);
            ScanOutcome::failure(ScanError::Internal(join_error.to_string()).to_string())
        }
    }
}

async fn scan_inner(
    request: ScanRequest,
    fetcher: Arc<dyn Fetcher>,
    resolver: Arc<dyn CountryResolver>,
    mut config: ScanConfig,
) -> crate::Result<ScanReport> {
    let root = validate_scan_url(&request.url).map_err(|e| {
        tracing::debug!("rejected scan target {:?}: {}", request.url, e);
        ScanError::InvalidInput
    })?;

    if let Some(depth) = request.depth {
        config.max_depth = depth;
    }
    if let Some(timeout) = request.timeout_secs {
        config.time_budget_secs = Some(timeout);
    }
    validate_config(&config)?;

    let catalog = SignatureCatalog::builtin();
    tracing::info!(
        "scanning {} (depth {}, node cap {})",
        root,
        config.max_depth,
        config.node_cap
    );

    // The clock starts before the crawl; elapsed time covers the whole scan
    let mut aggregator = Aggregator::new();

    let crawler = Crawler::new(Arc::clone(&fetcher), catalog, Arc::new(config.clone()));
    let resources = crawler.crawl(root.clone()).await;

    if resources.is_empty() {
        let host = root.host_str().unwrap_or_default();
        return Err(if config.requires_manual_verification(host) {
            ScanError::ManualVerificationRequired
        } else {
            ScanError::NoContentRetrieved
        });
    }

    // Classification is pure; run it across resources in parallel
    let mut join_set = JoinSet::new();
    for resource in resources {
        join_set.spawn(async move { classify(SignatureCatalog::builtin(), &resource.body) });
    }
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok(detections) => aggregator.absorb(detections),
            Err(e) => tracing::warn!("classification task failed: {}", e),
        }
    }

    let country = lookup_country(&root, resolver.as_ref()).await;

    tracing::info!(
        "scan of {} found {} gateway entries, {} captcha vendors",
        root,
        aggregator.merged().gateways.len(),
        aggregator.merged().captcha.len()
    );

    Ok(aggregator.finish(&root, country))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::NoopCountryResolver;
    use crate::fetch::FetchError;
    use async_trait::async_trait;
    use url::Url;

    struct NeverFetcher;

    #[async_trait]
    impl Fetcher for NeverFetcher {
        async fn fetch(&self, _url: &Url) -> Result<String, FetchError> {
            Err(FetchError::Connect)
        }
    }

    fn deps() -> (Arc<dyn Fetcher>, Arc<dyn CountryResolver>) {
        (Arc::new(NeverFetcher), Arc::new(NoopCountryResolver))
    }

    fn fast_config() -> ScanConfig {
        ScanConfig {
            retry_delay_ms: 1,
            ..ScanConfig::default()
        }
    }

    #[tokio::test]
    async fn test_invalid_url_rejected() {
        let (fetcher, resolver) = deps();
        let outcome = run_scan(ScanRequest::new("12345"), fetcher, resolver, &fast_config()).await;
        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("Invalid URL"));
    }

    #[tokio::test]
    async fn test_unreachable_site_is_no_content() {
        let (fetcher, resolver) = deps();
        let outcome = run_scan(
            ScanRequest::new("https://example.com"),
            fetcher,
            resolver,
            &fast_config(),
        )
        .await;
        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("no valid content"));
    }

    #[tokio::test]
    async fn test_manual_verification_domain_is_distinct_error() {
        let (fetcher, resolver) = deps();
        let outcome = run_scan(
            ScanRequest::new("https://discord.com"),
            fetcher,
            resolver,
            &fast_config(),
        )
        .await;
        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("manual verification"));
    }

    #[tokio::test]
    async fn test_depth_override_validated() {
        let (fetcher, resolver) = deps();
        let request = ScanRequest {
            url: "https://example.com".to_string(),
            depth: Some(99),
            timeout_secs: None,
        };
        let outcome = run_scan(request, fetcher, resolver, &fast_config()).await;
        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("max-depth"));
    }
}
