//! Crawl-and-fetch machinery
//!
//! The crawler decides what to fetch and in what order: the frontier state
//! lives in `frontier`, link extraction and payment-intent scoring in
//! `extractor`, and the wave-based traversal loop in `coordinator`.

mod coordinator;
mod extractor;
mod frontier;

pub use coordinator::Crawler;
pub use extractor::{extract_links, ExtractedLinks, LinkCandidate, MAX_CANDIDATES};
pub use frontier::{content_digest, ContentHashSet, CrawlBudget, VisitedSet};
