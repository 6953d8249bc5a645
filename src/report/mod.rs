//! Report assembly: merging per-resource detections into one scan report
//!
//! The aggregator is a pure set-union fold over classifier outputs plus the
//! wall-clock measurement. Field names on [`ScanReport`] are part of the
//! external contract and must not change.

use crate::classify::Detections;
use serde::Serialize;
use std::time::Instant;
use url::Url;

/// The per-scan report returned to the caller
///
/// Serialized field names are the contract; `three_d_secure` maps to
/// `"3d_secure"` and `graphql` is the string `"True"`/`"False"`.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub url: String,
    pub time_taken_seconds: f64,
    /// Sorted; confirmed and low-credibility entries are visibly distinct
    pub payment_gateways: Vec<String>,
    pub captcha: Vec<String>,
    pub cloudflare: bool,
    pub graphql: String,
    pub platforms: Vec<String>,
    pub country: String,
    #[serde(rename = "3d_secure")]
    pub three_d_secure: bool,
    pub cards: Vec<String>,
}

/// Top-level scan envelope
#[derive(Debug, Clone, Serialize)]
pub struct ScanOutcome {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ScanReport>,
}

impl ScanOutcome {
    pub fn ok(report: ScanReport) -> Self {
        Self {
            success: true,
            error: None,
            result: Some(report),
        }
    }

    pub fn failure(message: String) -> Self {
        Self {
            success: false,
            error: Some(message),
            result: None,
        }
    }
}

/// Folds per-resource detections into one report
///
/// Merging is idempotent set union: absorbing the same detection set twice
/// changes nothing, and per-category entries never decrease.
pub struct Aggregator {
    merged: Detections,
    started: Instant,
}

impl Aggregator {
    /// Starts the scan clock
    pub fn new() -> Self {
        Self {
            merged: Detections::new(),
            started: Instant::now(),
        }
    }

    /// Absorbs one resource's detections
    pub fn absorb(&mut self, detections: Detections) {
        self.merged.merge(detections);
    }

    /// Read access to the merged state (used by tests and logging)
    pub fn merged(&self) -> &Detections {
        &self.merged
    }

    /// Assembles the final report
    pub fn finish(self, root: &Url, country: String) -> ScanReport {
        let elapsed = self.started.elapsed().as_secs_f64();
        let time_taken_seconds = (elapsed * 100.0).round() / 100.0;

        let mut payment_gateways: Vec<String> = self
            .merged
            .gateways
            .iter()
            .map(|hit| hit.display_string())
            .collect();
        payment_gateways.sort();

        ScanReport {
            url: root.to_string(),
            time_taken_seconds,
            payment_gateways,
            captcha: self.merged.captcha.iter().cloned().collect(),
            cloudflare: self.merged.cloudflare,
            graphql: if self.merged.graphql {
                "True".to_string()
            } else {
                "False".to_string()
            },
            platforms: self.merged.platforms.iter().cloned().collect(),
            country,
            three_d_secure: !self.merged.three_ds.is_empty(),
            cards: self.merged.cards.iter().cloned().collect(),
        }
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}
