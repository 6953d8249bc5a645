//! Configuration for Gatescout scans
//!
//! All knobs have defaults so a scan can run with no config file at all; a
//! TOML file can override any of them. The loaded configuration is validated
//! once and then shared read-only for the lifetime of the scan.

use crate::{ConfigError, ConfigResult};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Scan behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Maximum traversal depth from the root (0 = fetch root only)
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Hard ceiling on URLs visited per scan
    #[serde(rename = "node-cap")]
    pub node_cap: usize,

    /// Width of the per-wave fetch worker pool
    #[serde(rename = "worker-width")]
    pub worker_width: usize,

    /// Per-request fetch timeout in seconds
    #[serde(rename = "fetch-timeout-secs")]
    pub fetch_timeout_secs: u64,

    /// Fetch attempts per URL before the resource is skipped
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Base delay between retry attempts in milliseconds (linear backoff)
    #[serde(rename = "retry-delay-ms")]
    pub retry_delay_ms: u64,

    /// Optional wall-clock budget for the whole scan, in seconds
    #[serde(rename = "time-budget-secs")]
    pub time_budget_secs: Option<u64>,

    /// Hosts that are known to gate content behind manual verification
    #[serde(rename = "manual-verification-domains")]
    pub manual_verification_domains: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            node_cap: 50,
            worker_width: 8,
            fetch_timeout_secs: 15,
            max_retries: 3,
            retry_delay_ms: 1000,
            time_budget_secs: None,
            manual_verification_domains: vec!["discord.com".to_string()],
        }
    }
}

impl ScanConfig {
    /// Per-request fetch timeout as a `Duration`
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Base retry delay as a `Duration`
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Overall time budget as a `Duration`, if configured
    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget_secs.map(Duration::from_secs)
    }

    /// Returns true if the host matches the manual-verification list
    pub fn requires_manual_verification(&self, host: &str) -> bool {
        let host = host.to_lowercase();
        self.manual_verification_domains
            .iter()
            .any(|d| host == *d || host.ends_with(&format!(".{}", d)))
    }
}

/// Loads configuration from a TOML file and validates it
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(ScanConfig)` - Loaded and validated configuration
/// * `Err(ConfigError)` - File, parse, or validation failure
pub fn load_config(path: &Path) -> ConfigResult<ScanConfig> {
    let contents = std::fs::read_to_string(path)?;
    let config: ScanConfig = toml::from_str(&contents)?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates configuration limits
///
/// Bounds exist so a bad config cannot turn a scan into an unbounded crawl:
/// depth and worker width are capped, and the node cap must be at least 1.
pub fn validate_config(config: &ScanConfig) -> ConfigResult<()> {
    if config.max_depth > 10 {
        return Err(ConfigError::Validation(format!(
            "max-depth {} exceeds limit of 10",
            config.max_depth
        )));
    }

    if config.node_cap == 0 {
        return Err(ConfigError::Validation(
            "node-cap must be at least 1".to_string(),
        ));
    }

    if config.worker_width == 0 || config.worker_width > 64 {
        return Err(ConfigError::Validation(format!(
            "worker-width {} outside 1..=64",
            config.worker_width
        )));
    }

    if config.max_retries == 0 {
        return Err(ConfigError::Validation(
            "max-retries must be at least 1".to_string(),
        ));
    }

    if config.fetch_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "fetch-timeout-secs must be at least 1".to_string(),
        ));
    }

    Ok(())
}
