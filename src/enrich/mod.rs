//! Country enrichment for the scan report
//!
//! ccTLD lookup first, then IP resolution with a reverse-geo collaborator as
//! fallback. Every failure path degrades to `"Unknown"`; enrichment can never
//! fail a scan.

use async_trait::async_trait;
use std::net::IpAddr;
use std::time::Duration;
use url::Url;

/// ccTLD → country table
const TLD_COUNTRY_MAP: &[(&str, &str)] = &[
    ("in", "India"),
    ("ru", "Russia"),
    ("br", "Brazil"),
    ("cn", "China"),
    ("jp", "Japan"),
    ("fr", "France"),
    ("de", "Germany"),
    ("es", "Spain"),
    ("it", "Italy"),
    ("uk", "United Kingdom"),
    ("us", "United States"),
    ("ca", "Canada"),
    ("au", "Australia"),
    ("nl", "Netherlands"),
    ("tr", "Turkey"),
    ("ir", "Iran"),
    ("kr", "South Korea"),
    ("za", "South Africa"),
    ("mx", "Mexico"),
    ("pl", "Poland"),
    ("id", "Indonesia"),
    ("ae", "United Arab Emirates"),
    ("eg", "Egypt"),
    ("ng", "Nigeria"),
    ("th", "Thailand"),
    ("vn", "Vietnam"),
];

/// External reverse-geo collaborator
#[async_trait]
pub trait CountryResolver: Send + Sync {
    /// Returns the country name for an IP, or None on any failure
    async fn country_for_ip(&self, ip: IpAddr) -> Option<String>;
}

/// Resolver backed by the ipapi.co HTTP service
pub struct HttpCountryResolver {
    client: reqwest::Client,
}

impl HttpCountryResolver {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl CountryResolver for HttpCountryResolver {
    async fn country_for_ip(&self, ip: IpAddr) -> Option<String> {
        let url = format!("https://ipapi.co/{}/country_name/", ip);
        let response = self.client.get(&url).send().await.ok()?;
        if !response.status().is_success() {
            return None;
        }
        let name = response.text().await.ok()?;
        let name = name.trim();
        if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        }
    }
}

/// Resolver that never answers; lookups fall through to `"Unknown"`
pub struct NoopCountryResolver;

#[async_trait]
impl CountryResolver for NoopCountryResolver {
    async fn country_for_ip(&self, _ip: IpAddr) -> Option<String> {
        None
    }
}

/// Looks up the country for a scan target
///
/// Tries the ccTLD table, then resolves the host and asks the collaborator.
/// Returns `"Unknown"` when neither route answers.
pub async fn lookup_country(url: &Url, resolver: &dyn CountryResolver) -> String {
    let Some(host) = url.host_str() else {
        return "Unknown".to_string();
    };

    if let Some(country) = country_from_tld(host) {
        return country;
    }

    if let Some(ip) = resolve_ip(host).await {
        if let Some(country) = resolver.country_for_ip(ip).await {
            return country;
        }
    }

    "Unknown".to_string()
}

/// ccTLD table lookup on the host's last label
fn country_from_tld(host: &str) -> Option<String> {
    let tld = host.rsplit('.').next()?.to_lowercase();
    TLD_COUNTRY_MAP
        .iter()
        .find(|(suffix, _)| *suffix == tld)
        .map(|(_, country)| country.to_string())
}

/// Resolves a host to its first IP address
async fn resolve_ip(host: &str) -> Option<IpAddr> {
    // Literal IPs skip DNS
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Some(ip);
    }

    tokio::net::lookup_host((host, 443))
        .await
        .ok()?
        .next()
        .map(|addr| addr.ip())
}
