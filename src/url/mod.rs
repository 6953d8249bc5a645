//! URL handling for Gatescout
//!
//! This module provides scan-input validation, URL normalization for the
//! visited set, and the crawl scope policy (registrable-domain matching plus
//! the payment-processor allow-list).

mod domain;

use crate::UrlError;
use url::Url;

pub use domain::{has_asset_extension, in_scope, registrable_domain};

/// Validates a user-supplied scan target and parses it into a URL
///
/// # Validation Steps
///
/// 1. Prepend `https://` when no scheme is present
/// 2. Parse; reject malformed input
/// 3. Reject non-HTTP(S) schemes
/// 4. Require a host with at least one alphabetic character and a
///    registrable domain (an all-digit or single-label host is rejected)
///
/// # Arguments
///
/// * `raw` - The URL string as supplied by the caller
///
/// # Returns
///
/// * `Ok(Url)` - Parsed, scannable URL
/// * `Err(UrlError)` - Input failed validation
///
/// # Examples
///
/// ```
/// use gatescout::url::validate_scan_url;
///
/// let url = validate_scan_url("example.com").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/");
///
/// assert!(validate_scan_url("12345").is_err());
/// ```
pub fn validate_scan_url(raw: &str) -> Result<Url, UrlError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Malformed("empty input".to_string()));
    }

    // A bare number is never a scannable site (the URL parser would read
    // it as an IPv4 address)
    if trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(UrlError::Malformed(format!("not a domain: {}", trimmed)));
    }

    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let url = Url::parse(&with_scheme).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    let host = url.host_str().ok_or(UrlError::MissingDomain)?;

    // IP-literal hosts are scannable as-is
    if host.parse::<std::net::IpAddr>().is_ok() {
        return Ok(url);
    }

    if !host.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(UrlError::Malformed(format!("host has no letters: {}", host)));
    }

    // A registrable domain needs at least two labels
    if !host.contains('.') {
        return Err(UrlError::MissingDomain);
    }

    Ok(url)
}

/// Normalizes a URL into its visited-set key
///
/// Strips the fragment (the host is already lowercased by the parser) so two
/// references to the same resource dedup to one fetch.
pub fn normalize_url(url: &Url) -> String {
    let mut normalized = url.clone();
    normalized.set_fragment(None);
    normalized.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_adds_scheme() {
        let url = validate_scan_url("shop.example.com/checkout").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("shop.example.com"));
    }

    #[test]
    fn test_validate_keeps_http() {
        let url = validate_scan_url("http://example.com").unwrap();
        assert_eq!(url.scheme(), "http");
    }

    #[test]
    fn test_validate_rejects_empty() {
        assert!(validate_scan_url("").is_err());
        assert!(validate_scan_url("   ").is_err());
    }

    #[test]
    fn test_validate_rejects_all_digits() {
        assert!(validate_scan_url("12345").is_err());
    }

    #[test]
    fn test_validate_accepts_ip_literal() {
        let url = validate_scan_url("http://127.0.0.1:8080/shop").unwrap();
        assert_eq!(url.host_str(), Some("127.0.0.1"));
    }

    #[test]
    fn test_validate_rejects_single_label() {
        assert!(validate_scan_url("localhost").is_err());
    }

    #[test]
    fn test_validate_rejects_bad_scheme() {
        assert!(validate_scan_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_normalize_strips_fragment() {
        let url = Url::parse("https://example.com/page#section").unwrap();
        assert_eq!(normalize_url(&url), "https://example.com/page");
    }

    #[test]
    fn test_normalize_lowercases_host() {
        let url = Url::parse("https://EXAMPLE.COM/Page").unwrap();
        assert_eq!(normalize_url(&url), "https://example.com/Page");
    }
}
