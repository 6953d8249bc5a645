//! Crawl coordination: wave-based traversal under hard limits
//!
//! The crawler walks the site in depth waves. Each wave fans out through a
//! bounded worker pool, every fetched page grows the next wave one depth
//! level lower, and four limits gate every expansion: the visited set, the
//! node cap, the depth counter, and the optional wall-clock deadline.
//! In-flight fetches are never cancelled mid-call; the scan can overrun the
//! deadline by at most one fetch timeout.

use crate::config::ScanConfig;
use crate::crawler::extractor::extract_links;
use crate::crawler::frontier::{ContentHashSet, CrawlBudget, VisitedSet};
use crate::fetch::{FetchedResource, Fetcher};
use crate::signatures::SignatureCatalog;
use crate::url::{normalize_url, registrable_domain};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// One unit of crawl work
#[derive(Debug, Clone)]
struct CrawlTask {
    url: Url,
    /// Remaining expansion depth; 0 means fetch but do not expand
    depth: u32,
    /// Asset resources are fetched with `expand` false
    expand: bool,
}

/// The frontier crawler
///
/// Owns traversal policy (depth limit, visited set, domain scope, dedup by
/// content hash, node cap, time budget) and drives concurrent fetches
/// through the fetch port.
pub struct Crawler {
    fetcher: Arc<dyn Fetcher>,
    catalog: &'static SignatureCatalog,
    config: Arc<ScanConfig>,
}

impl Crawler {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        catalog: &'static SignatureCatalog,
        config: Arc<ScanConfig>,
    ) -> Self {
        Self {
            fetcher,
            catalog,
            config,
        }
    }

    /// Crawls from the root and returns every distinct resource fetched
    ///
    /// Per-resource fetch failures are absorbed (retried, then skipped); an
    /// unreachable root therefore yields an empty vector, which the caller
    /// maps to a scan-level failure.
    pub async fn crawl(&self, root: Url) -> Vec<FetchedResource> {
        let root_domain = registrable_domain(root.host_str().unwrap_or_default());
        let visited = Arc::new(VisitedSet::new());
        let hashes = ContentHashSet::new();
        let budget = CrawlBudget::new(self.config.node_cap, self.config.time_budget());
        let semaphore = Arc::new(Semaphore::new(self.config.worker_width));

        let mut results: Vec<FetchedResource> = Vec::new();
        let mut wave = vec![CrawlTask {
            url: root,
            depth: self.config.max_depth,
            expand: true,
        }];
        let mut wave_number = 0u32;

        while !wave.is_empty() {
            if budget.out_of_time() {
                tracing::warn!("time budget exhausted at wave {}", wave_number);
                break;
            }

            let mut join_set: JoinSet<Option<(CrawlTask, String)>> = JoinSet::new();

            for task in wave.drain(..) {
                if budget.out_of_time() {
                    break;
                }
                if budget.node_cap_reached(visited.len()) {
                    tracing::debug!("node cap reached, dropping remaining frontier");
                    break;
                }
                if !visited.insert(&normalize_url(&task.url)) {
                    continue;
                }

                let fetcher = Arc::clone(&self.fetcher);
                let semaphore = Arc::clone(&semaphore);
                let max_retries = self.config.max_retries;
                let retry_delay = self.config.retry_delay();

                join_set.spawn(async move {
                    let _permit = semaphore.acquire_owned().await.ok()?;
                    // The deadline can pass while queued behind the permit;
                    // an expired task must not start its fetch
                    if budget.out_of_time() {
                        return None;
                    }
                    let body =
                        fetch_with_retries(fetcher.as_ref(), &task.url, max_retries, retry_delay)
                            .await?;
                    Some((task, body))
                });
            }

            let mut next_wave = Vec::new();
            while let Some(joined) = join_set.join_next().await {
                let Ok(Some((task, body))) = joined else {
                    continue;
                };

                if !hashes.insert_body(&body) {
                    tracing::debug!("duplicate content at {}, already classified", task.url);
                    continue;
                }

                if task.expand && task.depth > 0 {
                    let extracted = extract_links(&task.url, &body, &root_domain, self.catalog);
                    tracing::debug!(
                        "{}: {} resources, {} candidates",
                        task.url,
                        extracted.resources.len(),
                        extracted.candidates.len()
                    );

                    for resource in extracted.resources {
                        next_wave.push(CrawlTask {
                            url: resource,
                            depth: task.depth - 1,
                            expand: false,
                        });
                    }
                    for candidate in extracted.candidates {
                        next_wave.push(CrawlTask {
                            url: candidate.url,
                            depth: task.depth - 1,
                            expand: true,
                        });
                    }
                }

                results.push(FetchedResource {
                    url: task.url,
                    body,
                });
            }

            wave = next_wave;
            wave_number += 1;
        }

        tracing::info!(
            "crawl finished: {} distinct resources from {} visited URLs",
            results.len(),
            visited.len()
        );
        results
    }
}

/// Fetches one URL with bounded retries and linear backoff
///
/// Returns None after a persistent failure; the crawl continues with
/// whatever succeeded.
async fn fetch_with_retries(
    fetcher: &dyn Fetcher,
    url: &Url,
    max_retries: u32,
    retry_delay: Duration,
) -> Option<String> {
    for attempt in 1..=max_retries {
        match fetcher.fetch(url).await {
            Ok(body) => return Some(body),
            Err(e) => {
                tracing::debug!(
                    "fetch attempt {}/{} failed for {}: {}",
                    attempt,
                    max_retries,
                    url,
                    e
                );
                if !e.is_retryable() || attempt == max_retries {
                    break;
                }
                tokio::time::sleep(retry_delay * attempt).await;
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// In-memory fetcher mapping exact URLs to bodies
    struct MapFetcher {
        pages: HashMap<String, String>,
    }

    impl MapFetcher {
        fn new(pages: &[(&str, &str)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(u, b)| (u.to_string(), b.to_string()))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl Fetcher for MapFetcher {
        async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
            self.pages
                .get(url.as_str())
                .cloned()
                .ok_or(FetchError::Status(404))
        }
    }

    /// Fetcher that always fails with a retryable error, counting attempts
    struct FlakyFetcher {
        attempts: AtomicU32,
    }

    #[async_trait]
    impl Fetcher for FlakyFetcher {
        async fn fetch(&self, _url: &Url) -> Result<String, FetchError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(FetchError::Timeout)
        }
    }

    /// Fetcher that serves a link farm, taking `delay` per request
    struct SlowFetcher {
        delay: Duration,
    }

    #[async_trait]
    impl Fetcher for SlowFetcher {
        async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
            tokio::time::sleep(self.delay).await;
            if url.path() == "/" {
                Ok((0..12)
                    .map(|i| format!(r#"<a href="/page{}">P{}</a>"#, i, i))
                    .collect())
            } else {
                Ok(format!("<html>{}</html>", url.path()))
            }
        }
    }

    fn test_config() -> ScanConfig {
        ScanConfig {
            retry_delay_ms: 1,
            ..ScanConfig::default()
        }
    }

    fn crawler_with(fetcher: Arc<dyn Fetcher>, config: ScanConfig) -> Crawler {
        Crawler::new(fetcher, SignatureCatalog::builtin(), Arc::new(config))
    }

    fn root() -> Url {
        Url::parse("https://example.com/").unwrap()
    }

    #[tokio::test]
    async fn test_depth_zero_fetches_only_root() {
        let fetcher = Arc::new(MapFetcher::new(&[
            (
                "https://example.com/",
                r#"<html><a href="/checkout">Checkout</a></html>"#,
            ),
            ("https://example.com/checkout", "<html>checkout</html>"),
        ]));
        let config = ScanConfig {
            max_depth: 0,
            ..test_config()
        };

        let results = crawler_with(fetcher, config).crawl(root()).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].url.as_str(), "https://example.com/");
    }

    #[tokio::test]
    async fn test_depth_one_follows_links() {
        let fetcher = Arc::new(MapFetcher::new(&[
            (
                "https://example.com/",
                r#"<html><a href="/checkout">Checkout</a><a href="/about">About</a></html>"#,
            ),
            ("https://example.com/checkout", "<html>checkout page</html>"),
            ("https://example.com/about", "<html>about page</html>"),
        ]));
        let config = ScanConfig {
            max_depth: 1,
            ..test_config()
        };

        let results = crawler_with(fetcher, config).crawl(root()).await;
        assert_eq!(results.len(), 3);
    }

    #[tokio::test]
    async fn test_identical_bodies_recorded_once() {
        // Two distinct URLs serving byte-identical bodies contribute one entry
        let fetcher = Arc::new(MapFetcher::new(&[
            (
                "https://example.com/",
                r#"<html><a href="/a">A</a><a href="/b">B</a></html>"#,
            ),
            ("https://example.com/a", "<html>same body</html>"),
            ("https://example.com/b", "<html>same body</html>"),
        ]));
        let config = ScanConfig {
            max_depth: 1,
            ..test_config()
        };

        let results = crawler_with(fetcher, config).crawl(root()).await;
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn test_node_cap_bounds_visits() {
        let mut pages = vec![(
            "https://example.com/".to_string(),
            (0..10)
                .map(|i| format!(r#"<a href="/page{}">P{}</a>"#, i, i))
                .collect::<String>(),
        )];
        for i in 0..10 {
            pages.push((
                format!("https://example.com/page{}", i),
                format!("<html>page {}</html>", i),
            ));
        }
        let page_refs: Vec<(&str, &str)> = pages
            .iter()
            .map(|(u, b)| (u.as_str(), b.as_str()))
            .collect();

        let fetcher = Arc::new(MapFetcher::new(&page_refs));
        let config = ScanConfig {
            max_depth: 1,
            node_cap: 3,
            ..test_config()
        };

        let results = crawler_with(fetcher, config).crawl(root()).await;
        assert!(results.len() <= 3, "got {} results", results.len());
    }

    #[tokio::test]
    async fn test_unreachable_root_yields_empty() {
        let fetcher = Arc::new(MapFetcher::new(&[]));
        let results = crawler_with(fetcher, test_config()).crawl(root()).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_persistent_failure_retried_then_absorbed() {
        let fetcher = Arc::new(FlakyFetcher {
            attempts: AtomicU32::new(0),
        });
        let config = ScanConfig {
            max_retries: 3,
            ..test_config()
        };

        let results = Crawler::new(
            Arc::clone(&fetcher) as Arc<dyn Fetcher>,
            SignatureCatalog::builtin(),
            Arc::new(config),
        )
        .crawl(root())
        .await;

        assert!(results.is_empty());
        assert_eq!(fetcher.attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_time_budget_overrun_bounded_by_one_fetch() {
        // A full wave queued behind a width-1 pool must stop at the
        // deadline, not drain: overrun is at most one in-flight fetch
        let delay = Duration::from_millis(400);
        let fetcher = Arc::new(SlowFetcher { delay });
        let config = ScanConfig {
            max_depth: 1,
            worker_width: 1,
            time_budget_secs: Some(1),
            ..test_config()
        };

        let started = std::time::Instant::now();
        let results = crawler_with(fetcher, config).crawl(root()).await;
        let elapsed = started.elapsed();

        assert!(
            elapsed < Duration::from_secs(1) + delay + delay,
            "crawl ran {:?}, budget 1s plus one fetch {:?}",
            elapsed,
            delay
        );
        assert!(!results.is_empty());
        assert!(
            results.len() < 12,
            "deadline should cut the wave short, got {} results",
            results.len()
        );
    }

    #[tokio::test]
    async fn test_out_of_scope_links_not_fetched() {
        let fetcher = Arc::new(MapFetcher::new(&[
            (
                "https://example.com/",
                r#"<html><a href="https://unrelated.org/page">Out</a></html>"#,
            ),
            ("https://unrelated.org/page", "<html>should not appear</html>"),
        ]));
        let config = ScanConfig {
            max_depth: 2,
            ..test_config()
        };

        let results = crawler_with(fetcher, config).crawl(root()).await;
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_script_resources_fetched_but_not_expanded() {
        let fetcher = Arc::new(MapFetcher::new(&[
            (
                "https://example.com/",
                r#"<html><script src="/bundle.js"></script></html>"#,
            ),
            (
                "https://example.com/bundle.js",
                // Looks like HTML with a link; must not be expanded
                r#"<a href="/hidden">hidden</a> var stripe = Stripe('pk');"#,
            ),
            ("https://example.com/hidden", "<html>hidden page</html>"),
        ]));
        let config = ScanConfig {
            max_depth: 3,
            ..test_config()
        };

        let results = crawler_with(fetcher, config).crawl(root()).await;
        assert_eq!(results.len(), 2);
        assert!(!results
            .iter()
            .any(|r| r.url.as_str() == "https://example.com/hidden"));
    }
}
