//! Signature matching: turning fetched bytes into detections
//!
//! [`classify`] is a pure function of the catalog and the body; it holds no
//! shared state and is safe to run on many resources in parallel. Per-resource
//! [`Detections`] merge by set union, so aggregation is idempotent,
//! commutative, and order-independent.

use crate::signatures::SignatureCatalog;
use std::collections::BTreeSet;

/// Regex patterns never see more than this much input, against pathological
/// backtracking on adversarial HTML.
const REGEX_INPUT_CAP: usize = 256 * 1024;

/// Confidence tier of a gateway detection
///
/// A first-class field, never a string convention: callers can filter and
/// sort on it reliably.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Confidence {
    /// At least two distinct signature hits for the same gateway
    Confirmed,
    /// Exactly one signature hit
    LowCredibility,
}

/// One detected payment gateway with its confidence tier
///
/// Confirmed and low-credibility entries are separate namespaces; the same
/// gateway may appear once per tier in a merged detection set and the two
/// are never silently merged.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GatewayHit {
    pub name: String,
    pub confidence: Confidence,
}

impl GatewayHit {
    pub fn confirmed(name: &str) -> Self {
        Self {
            name: name.to_string(),
            confidence: Confidence::Confirmed,
        }
    }

    pub fn low_credibility(name: &str) -> Self {
        Self {
            name: name.to_string(),
            confidence: Confidence::LowCredibility,
        }
    }

    /// Report-facing display string; the tier suffix exists only here
    pub fn display_string(&self) -> String {
        match self.confidence {
            Confidence::Confirmed => self.name.clone(),
            Confidence::LowCredibility => format!("{} ⚠ Low Credibility", self.name),
        }
    }
}

/// Per-resource detection set
///
/// Entries only accumulate; nothing is ever removed within a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Detections {
    /// Detected gateways with confidence tiers
    pub gateways: BTreeSet<GatewayHit>,

    /// Gateway names whose confirmed signature co-occurred with a 3DS pattern
    pub three_ds: BTreeSet<String>,

    /// Detected CAPTCHA vendors
    pub captcha: BTreeSet<String>,

    /// Detected e-commerce platforms
    pub platforms: BTreeSet<String>,

    /// Detected card brands
    pub cards: BTreeSet<String>,

    /// Cloudflare marker present
    pub cloudflare: bool,

    /// GraphQL token present
    pub graphql: bool,
}

impl Detections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set-union merge; idempotent and commutative
    pub fn merge(&mut self, other: Detections) {
        self.gateways.extend(other.gateways);
        self.three_ds.extend(other.three_ds);
        self.captcha.extend(other.captcha);
        self.platforms.extend(other.platforms);
        self.cards.extend(other.cards);
        self.cloudflare |= other.cloudflare;
        self.graphql |= other.graphql;
    }

    pub fn is_empty(&self) -> bool {
        self.gateways.is_empty()
            && self.three_ds.is_empty()
            && self.captcha.is_empty()
            && self.platforms.is_empty()
            && self.cards.is_empty()
            && !self.cloudflare
            && !self.graphql
    }
}

/// Classifies one resource body against the signature catalog
///
/// All matching is case-insensitive. Gateway evidence is counted as distinct
/// maximal pattern hits: when one matched pattern contains another (e.g.
/// `js.stripe.com/v3` and `js.stripe.com`), they count as a single piece of
/// evidence rather than two.
pub fn classify(catalog: &SignatureCatalog, body: &str) -> Detections {
    let mut detections = Detections::new();
    if body.trim().is_empty() {
        return detections;
    }

    let lower = body.to_lowercase();
    let regex_input = truncate_at_boundary(&lower, REGEX_INPUT_CAP);

    // Gateways with confidence tiers, plus per-gateway 3DS correlation
    let has_three_ds = catalog.three_d_secure().iter().any(|p| lower.contains(p));
    for rule in catalog.gateways() {
        let matched: Vec<&str> = rule
            .patterns
            .iter()
            .copied()
            .filter(|p| lower.contains(p))
            .collect();
        if matched.is_empty() {
            continue;
        }

        let evidence = matched
            .iter()
            .filter(|p| !matched.iter().any(|q| q != *p && q.contains(**p)))
            .count();

        if evidence >= 2 {
            detections.gateways.insert(GatewayHit::confirmed(rule.display));
            if has_three_ds {
                detections.three_ds.insert(rule.display.to_string());
            }
        } else {
            detections
                .gateways
                .insert(GatewayHit::low_credibility(rule.display));
        }
    }

    // CAPTCHA vendors: any pattern in a group is a hit, no tiering
    for rule in catalog.captcha() {
        if rule.patterns.iter().any(|re| re.is_match(regex_input)) {
            detections.captcha.insert(rule.display.to_string());
        }
    }

    // Platforms and card brands: simple existence checks
    for rule in catalog.platforms() {
        if lower.contains(rule.keyword) {
            detections.platforms.insert(rule.display.to_string());
        }
    }
    for card in catalog.cards() {
        if lower.contains(card) {
            detections.cards.insert(capitalize(card));
        }
    }

    // Resource-local booleans, OR-reduced by the aggregator
    detections.cloudflare = catalog.cloudflare().iter().any(|id| lower.contains(id));
    detections.graphql = lower.contains("graphql");

    detections
}

/// Truncates to at most `cap` bytes without splitting a character
fn truncate_at_boundary(s: &str, cap: usize) -> &str {
    if s.len() <= cap {
        return s;
    }
    let mut end = cap;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
