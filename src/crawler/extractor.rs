//! Link extraction and payment-intent scoring
//!
//! Given a fetched page, this module produces two things:
//! - asset resources (scripts, stylesheets, iframes) that are fetched for
//!   classification but never expanded, and
//! - ranked navigation candidates, biased toward checkout/payment pages so
//!   the limited fetch budget is spent where gateway code actually runs.

use crate::signatures::SignatureCatalog;
use crate::url::{has_asset_extension, in_scope};
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Maximum number of navigation candidates returned per page
///
/// Bounds the branching factor independent of page size.
pub const MAX_CANDIDATES: usize = 12;

/// Score awarded when the URL text itself matches an intent keyword
const URL_MATCH_SCORE: u32 = 4;

/// A candidate follow-up URL with its intent score
#[derive(Debug, Clone)]
pub struct LinkCandidate {
    pub url: Url,
    pub score: u32,
}

/// Everything extracted from one page
#[derive(Debug, Default)]
pub struct ExtractedLinks {
    /// Asset resources: classified, never expanded
    pub resources: Vec<Url>,

    /// Ranked navigation candidates, at most [`MAX_CANDIDATES`]
    pub candidates: Vec<LinkCandidate>,
}

/// Extracts and scores links from a page body
///
/// # Candidate Rules
///
/// Anchors and form actions are resolved against `page_url`, then filtered:
/// same-page fragments, non-HTTP(S) schemes, hosts outside the root's
/// registrable domain (unless on the payment-processor allow-list), and
/// asset extensions are all discarded. Survivors start at score 1 and gain
/// +4 for an intent keyword in the URL, +1 for one in a CSS class, +1 for
/// one in the visible anchor text. Ties keep first-seen order (stable sort)
/// and the list is truncated to the top 12.
///
/// # Arguments
///
/// * `page_url` - URL the body was fetched from (base for relative refs)
/// * `body` - The page HTML
/// * `root_domain` - Registrable domain of the scan root
/// * `catalog` - Signature catalog (intent keywords, allow-list, extensions)
pub fn extract_links(
    page_url: &Url,
    body: &str,
    root_domain: &str,
    catalog: &SignatureCatalog,
) -> ExtractedLinks {
    let document = Html::parse_document(body);

    let resources = extract_resources(&document, page_url);
    let candidates = extract_candidates(&document, page_url, root_domain, catalog);

    ExtractedLinks {
        resources,
        candidates,
    }
}

/// Collects script/stylesheet/iframe sources
///
/// These are fetched for classification regardless of host (gateway SDKs
/// usually load from the processor's CDN) but they never grow the frontier.
fn extract_resources(document: &Html, page_url: &Url) -> Vec<Url> {
    let mut seen = HashSet::new();
    let mut resources = Vec::new();

    let selectors = [
        ("script[src]", "src"),
        ("link[rel='stylesheet'][href]", "href"),
        ("iframe[src]", "src"),
    ];

    for (selector_str, attr) in selectors {
        let selector = match Selector::parse(selector_str) {
            Ok(s) => s,
            Err(_) => continue,
        };

        for element in document.select(&selector) {
            let Some(value) = element.value().attr(attr) else {
                continue;
            };
            let Some(url) = resolve_href(value, page_url) else {
                continue;
            };
            if seen.insert(url.to_string()) {
                resources.push(url);
            }
        }
    }

    resources
}

/// Collects and scores navigation candidates
fn extract_candidates(
    document: &Html,
    page_url: &Url,
    root_domain: &str,
    catalog: &SignatureCatalog,
) -> Vec<LinkCandidate> {
    let keywords = catalog.intent_keywords();
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    let selectors = [
        ("a[href]", "href"),
        ("form[action]", "action"),
        ("[data-href]", "data-href"),
        ("button[data-url]", "data-url"),
    ];

    for (selector_str, attr) in selectors {
        let selector = match Selector::parse(selector_str) {
            Ok(s) => s,
            Err(_) => continue,
        };

        for element in document.select(&selector) {
            let Some(value) = element.value().attr(attr) else {
                continue;
            };

            // Same-page fragments never lead anywhere new
            if value.trim().starts_with('#') {
                continue;
            }

            let Some(url) = resolve_href(value, page_url) else {
                continue;
            };

            if !in_scope(&url, root_domain, catalog.payment_domains()) {
                continue;
            }

            if has_asset_extension(&url, catalog.asset_extensions()) {
                continue;
            }

            // First-seen wins; later duplicates don't rescore
            if !seen.insert(url.to_string()) {
                continue;
            }

            let classes = element.value().attr("class").unwrap_or("");
            let text: String = element.text().collect();
            let score = score_candidate(&url, classes, &text, keywords);

            candidates.push(LinkCandidate { url, score });
        }
    }

    // Stable sort keeps first-seen order among equal scores
    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    candidates.truncate(MAX_CANDIDATES);
    candidates
}

/// Additive intent score for one candidate, starting at 1
fn score_candidate(url: &Url, classes: &str, text: &str, keywords: &[&str]) -> u32 {
    let url_lower = url.as_str().to_lowercase();
    let classes_lower = classes.to_lowercase();
    let text_lower = text.to_lowercase();

    let mut score = 1;
    if keywords.iter().any(|k| url_lower.contains(k)) {
        score += URL_MATCH_SCORE;
    }
    if keywords.iter().any(|k| classes_lower.contains(k)) {
        score += 1;
    }
    if keywords.iter().any(|k| text_lower.contains(k)) {
        score += 1;
    }
    score
}

/// Resolves an href against the page URL, keeping only HTTP(S) results
fn resolve_href(href: &str, page_url: &Url) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let url = page_url.join(href).ok()?;
    match url.scheme() {
        "http" | "https" => Some(url),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_url() -> Url {
        Url::parse("https://example.com/shop").unwrap()
    }

    fn extract(body: &str) -> ExtractedLinks {
        extract_links(
            &page_url(),
            body,
            "example.com",
            SignatureCatalog::builtin(),
        )
    }

    #[test]
    fn test_resolves_relative_links() {
        let links = extract(r#"<a href="/about">About</a>"#);
        assert_eq!(links.candidates.len(), 1);
        assert_eq!(links.candidates[0].url.as_str(), "https://example.com/about");
    }

    #[test]
    fn test_checkout_link_outscores_plain_link() {
        let links = extract(
            r#"<a href="/about">About us</a>
               <a href="/checkout">Proceed</a>"#,
        );
        assert_eq!(links.candidates[0].url.path(), "/checkout");
        assert!(links.candidates[0].score > links.candidates[1].score);
    }

    #[test]
    fn test_scoring_components_add_up() {
        // URL keyword (+4), class keyword (+1), anchor text keyword (+1)
        let links = extract(r#"<a href="/cart" class="btn-checkout">Pay now</a>"#);
        assert_eq!(links.candidates[0].score, 1 + 4 + 1 + 1);
    }

    #[test]
    fn test_skips_fragments_and_schemes() {
        let links = extract(
            r##"<a href="#top">Top</a>
                <a href="javascript:void(0)">JS</a>
                <a href="mailto:x@example.com">Mail</a>
                <a href="tel:+15551234">Call</a>"##,
        );
        assert!(links.candidates.is_empty());
    }

    #[test]
    fn test_skips_out_of_scope_hosts() {
        let links = extract(r#"<a href="https://unrelated.org/page">Elsewhere</a>"#);
        assert!(links.candidates.is_empty());
    }

    #[test]
    fn test_follows_subdomain_and_payment_hosts() {
        let links = extract(
            r#"<a href="https://pay.example.com/checkout">Pay</a>
               <a href="https://checkout.stripe.com/c/session">Stripe</a>"#,
        );
        assert_eq!(links.candidates.len(), 2);
    }

    #[test]
    fn test_asset_extensions_not_candidates() {
        let links = extract(r#"<a href="/bundle.js">Script</a>"#);
        assert!(links.candidates.is_empty());
    }

    #[test]
    fn test_resources_collected() {
        let links = extract(
            r#"<script src="https://js.stripe.com/v3/"></script>
               <link rel="stylesheet" href="/style.css">
               <iframe src="https://checkout.example.com/frame"></iframe>"#,
        );
        assert_eq!(links.resources.len(), 3);
    }

    #[test]
    fn test_resources_deduplicated() {
        let links = extract(
            r#"<script src="/app.js"></script>
               <script src="/app.js"></script>"#,
        );
        assert_eq!(links.resources.len(), 1);
    }

    #[test]
    fn test_duplicate_candidates_first_seen_wins() {
        let links = extract(
            r#"<a href="/pricing">Pricing</a>
               <a href="/pricing">Pricing again</a>"#,
        );
        assert_eq!(links.candidates.len(), 1);
    }

    #[test]
    fn test_truncated_to_cap() {
        let mut body = String::new();
        for i in 0..30 {
            body.push_str(&format!(r#"<a href="/page{}">Page {}</a>"#, i, i));
        }
        let links = extract(&body);
        assert_eq!(links.candidates.len(), MAX_CANDIDATES);
    }

    #[test]
    fn test_form_action_extracted() {
        let links = extract(r#"<form action="/checkout/submit"><input></form>"#);
        assert_eq!(links.candidates.len(), 1);
        assert!(links.candidates[0].score > 1);
    }
}
