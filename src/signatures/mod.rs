//! Signature catalog for content classification
//!
//! This module provides the immutable rule tables the matcher evaluates
//! against fetched content. The catalog is built once at first use and shared
//! read-only across all concurrent work; nothing here is mutated at runtime.

mod catalog;

use regex::{Regex, RegexBuilder};
use std::sync::OnceLock;

/// Signature categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Payment gateway / processor
    Gateway,
    /// CAPTCHA or anti-bot vendor
    Captcha,
    /// E-commerce platform
    Platform,
    /// Card brand
    Card,
    /// 3-D Secure flow marker
    ThreeDSecure,
    /// CDN / WAF marker
    Cdn,
    /// API style marker
    Api,
}

/// A payment-gateway rule: one key with its pattern group
///
/// Patterns are literal substrings matched case-insensitively. The number of
/// distinct patterns that hit determines the confidence tier.
#[derive(Debug)]
pub struct GatewayRule {
    /// Stable rule key (e.g. "stripe")
    pub key: &'static str,

    /// Human-readable display name (e.g. "Stripe")
    pub display: &'static str,

    /// Literal substring patterns for this gateway
    pub patterns: &'static [&'static str],
}

/// A CAPTCHA vendor rule with compiled regex patterns
#[derive(Debug)]
pub struct CaptchaRule {
    /// Vendor display name (e.g. "reCaptcha")
    pub display: &'static str,

    /// Compiled case-insensitive patterns
    pub patterns: Vec<Regex>,
}

/// An e-commerce platform rule
#[derive(Debug)]
pub struct PlatformRule {
    /// Substring to look for
    pub keyword: &'static str,

    /// Display name reported on a hit
    pub display: &'static str,
}

/// The immutable signature catalog
///
/// Holds every rule table used by the matcher, the crawler's domain
/// allow-list, and the link scorer's keyword list.
#[derive(Debug)]
pub struct SignatureCatalog {
    gateways: Vec<GatewayRule>,
    captcha: Vec<CaptchaRule>,
    platforms: Vec<PlatformRule>,
    cards: &'static [&'static str],
    three_d_secure: &'static [&'static str],
    cloudflare: &'static [&'static str],
    payment_domains: &'static [&'static str],
    intent_keywords: &'static [&'static str],
    asset_extensions: &'static [&'static str],
}

static CATALOG: OnceLock<SignatureCatalog> = OnceLock::new();

impl SignatureCatalog {
    /// Returns the built-in catalog, constructing it on first use
    ///
    /// Pattern compilation happens exactly once per process; the returned
    /// reference is shared freely across worker tasks.
    pub fn builtin() -> &'static SignatureCatalog {
        CATALOG.get_or_init(Self::build)
    }

    fn build() -> Self {
        let gateways = catalog::GATEWAY_RULES
            .iter()
            .map(|(key, display, patterns)| GatewayRule {
                key,
                display,
                patterns,
            })
            .collect();

        let captcha = catalog::CAPTCHA_RULES
            .iter()
            .map(|(display, patterns)| CaptchaRule {
                display,
                patterns: patterns
                    .iter()
                    .filter_map(|p| {
                        RegexBuilder::new(p).case_insensitive(true).build().ok()
                    })
                    .collect(),
            })
            .collect();

        let platforms = catalog::PLATFORM_RULES
            .iter()
            .map(|(keyword, display)| PlatformRule { keyword, display })
            .collect();

        Self {
            gateways,
            captcha,
            platforms,
            cards: catalog::CARD_KEYWORDS,
            three_d_secure: catalog::THREE_D_SECURE_PATTERNS,
            cloudflare: catalog::CLOUDFLARE_IDENTIFIERS,
            payment_domains: catalog::PAYMENT_DOMAINS,
            intent_keywords: catalog::INTENT_KEYWORDS,
            asset_extensions: catalog::ASSET_EXTENSIONS,
        }
    }

    /// Payment-gateway rules
    pub fn gateways(&self) -> &[GatewayRule] {
        &self.gateways
    }

    /// CAPTCHA vendor rules
    pub fn captcha(&self) -> &[CaptchaRule] {
        &self.captcha
    }

    /// E-commerce platform rules
    pub fn platforms(&self) -> &[PlatformRule] {
        &self.platforms
    }

    /// Card brand keywords
    pub fn cards(&self) -> &'static [&'static str] {
        self.cards
    }

    /// 3-D Secure correlation patterns
    pub fn three_d_secure(&self) -> &'static [&'static str] {
        self.three_d_secure
    }

    /// Cloudflare identifier set
    pub fn cloudflare(&self) -> &'static [&'static str] {
        self.cloudflare
    }

    /// Off-site payment-processor hosts the crawler may follow
    pub fn payment_domains(&self) -> &'static [&'static str] {
        self.payment_domains
    }

    /// Payment-intent keywords for link scoring
    pub fn intent_keywords(&self) -> &'static [&'static str] {
        self.intent_keywords
    }

    /// Non-HTML extensions that are classified but never expanded
    pub fn asset_extensions(&self) -> &'static [&'static str] {
        self.asset_extensions
    }

    /// Number of rules in a category
    pub fn rule_count(&self, category: Category) -> usize {
        match category {
            Category::Gateway => self.gateways.len(),
            Category::Captcha => self.captcha.len(),
            Category::Platform => self.platforms.len(),
            Category::Card => self.cards.len(),
            Category::ThreeDSecure => self.three_d_secure.len(),
            Category::Cdn => self.cloudflare.len(),
            Category::Api => 1, // the graphql token check
        }
    }
}
