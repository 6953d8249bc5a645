//! Gatescout: a payment-stack fingerprinting crawler
//!
//! This crate implements a bounded-depth crawl-and-classify engine: it fetches
//! a target site and its linked resources, matches the fetched content against
//! a signature catalog (payment gateways, CAPTCHA vendors, e-commerce
//! platforms, card brands, 3-D Secure flows, CDN markers), and folds the
//! per-resource detections into a single scan report.

pub mod classify;
pub mod config;
pub mod crawler;
pub mod enrich;
pub mod fetch;
pub mod report;
pub mod scan;
pub mod signatures;
pub mod url;

use thiserror::Error;

/// Scan-level error taxonomy
///
/// Per-resource fetch failures are absorbed inside the crawler and never
/// surface here; only conditions that fail the whole scan do.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Invalid URL! Please provide a valid website URL.")]
    InvalidInput,

    #[error("Failed to scan the website or no valid content retrieved.")]
    NoContentRetrieved,

    #[error("This site requires manual verification. Please check manually.")]
    ManualVerificationRequired,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Unexpected error: {0}")]
    Internal(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,

    #[error("Malformed URL: {0}")]
    Malformed(String),
}

/// Result type alias for scan operations
pub type Result<T> = std::result::Result<T, ScanError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use classify::{classify, Confidence, Detections, GatewayHit};
pub use config::ScanConfig;
pub use report::{ScanOutcome, ScanReport};
pub use scan::{run_scan, ScanRequest};
pub use signatures::{Category, SignatureCatalog};
