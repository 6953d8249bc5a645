//! Shared crawl state: visited URLs, content digests, and the crawl budget
//!
//! The visited and content-hash sets are the only mutable state shared across
//! fetch workers. Membership is test-and-insert under one lock so two workers
//! can never both claim the same URL or body.

use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Set of normalized URLs already scheduled this scan
///
/// Only grows; a URL is fetched at most once per scan.
#[derive(Debug, Default)]
pub struct VisitedSet {
    inner: Mutex<HashSet<String>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically claims a URL; returns true if it was not already present
    pub fn insert(&self, key: &str) -> bool {
        self.inner.lock().unwrap().insert(key.to_string())
    }

    /// Number of URLs claimed so far
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Set of content digests already recorded this scan
///
/// Prevents reclassifying byte-identical bodies reached via different URLs
/// (e.g. a shared CDN script).
#[derive(Debug, Default)]
pub struct ContentHashSet {
    inner: Mutex<HashSet<String>>,
}

impl ContentHashSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically claims a body by digest; returns true if unseen
    pub fn insert_body(&self, body: &str) -> bool {
        let digest = content_digest(body);
        self.inner.lock().unwrap().insert(digest)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }
}

/// SHA-256 digest of a body, hex-encoded
pub fn content_digest(body: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body.as_bytes());
    hex::encode(hasher.finalize())
}

/// Hard limits for one crawl: node cap and optional wall-clock deadline
///
/// Checked at every expansion point, not only at entry, so a slow fetch deep
/// in the tree cannot silently blow the budget.
#[derive(Debug, Clone, Copy)]
pub struct CrawlBudget {
    node_cap: usize,
    deadline: Option<Instant>,
}

impl CrawlBudget {
    pub fn new(node_cap: usize, time_budget: Option<Duration>) -> Self {
        Self {
            node_cap,
            deadline: time_budget.map(|d| Instant::now() + d),
        }
    }

    /// Returns true once the wall-clock deadline has passed
    pub fn out_of_time(&self) -> bool {
        match self.deadline {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }

    /// Returns true once the visited set has reached the node cap
    pub fn node_cap_reached(&self, visited: usize) -> bool {
        visited >= self.node_cap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visited_set_claims_once() {
        let visited = VisitedSet::new();
        assert!(visited.insert("https://example.com/"));
        assert!(!visited.insert("https://example.com/"));
        assert_eq!(visited.len(), 1);
    }

    #[test]
    fn test_visited_set_concurrent_claims() {
        use std::sync::Arc;

        let visited = Arc::new(VisitedSet::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let visited = Arc::clone(&visited);
            handles.push(std::thread::spawn(move || {
                visited.insert("https://example.com/") as usize
            }));
        }

        let wins: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(wins, 1, "exactly one thread may claim a URL");
    }

    #[test]
    fn test_content_hash_dedup() {
        let hashes = ContentHashSet::new();
        assert!(hashes.insert_body("<html>same</html>"));
        assert!(!hashes.insert_body("<html>same</html>"));
        assert!(hashes.insert_body("<html>different</html>"));
        assert_eq!(hashes.len(), 2);
    }

    #[test]
    fn test_content_digest_stable() {
        assert_eq!(content_digest("abc"), content_digest("abc"));
        assert_ne!(content_digest("abc"), content_digest("abd"));
    }

    #[test]
    fn test_budget_node_cap() {
        let budget = CrawlBudget::new(3, None);
        assert!(!budget.node_cap_reached(2));
        assert!(budget.node_cap_reached(3));
        assert!(budget.node_cap_reached(4));
    }

    #[test]
    fn test_budget_no_deadline_never_expires() {
        let budget = CrawlBudget::new(50, None);
        assert!(!budget.out_of_time());
    }

    #[test]
    fn test_budget_deadline_expires() {
        let budget = CrawlBudget::new(50, Some(Duration::from_millis(0)));
        std::thread::sleep(Duration::from_millis(5));
        assert!(budget.out_of_time());
    }
}
