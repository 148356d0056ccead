//! Link discovery traversal
//!
//! Depth-first expansion of same-domain links starting from a seed URL. The
//! walk keeps an explicit stack of per-page link cursors instead of
//! recursing, so arbitrarily deep sites cannot exhaust the call stack, while
//! visiting pages in exactly the order a recursive walk would:
//!
//! 1. the seed is marked visited before it is fetched;
//! 2. links of a page are examined in document order;
//! 3. a new same-domain link is marked visited and fully expanded before the
//!    next sibling link is examined.

use crate::crawler::fetcher::{FetchResult, PageFetcher};
use crate::crawler::parser::extract_links;
use crate::state::VisitedSet;
use crate::url::belongs_to_domain;
use url::Url;

/// Counters describing one discovery run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscoveryStats {
    /// Pages a fetch was attempted for
    pub pages_fetched: usize,

    /// Pages whose fetch or parse failed
    pub fetch_failures: usize,

    /// URLs added to the visited set, the seed included
    pub urls_added: usize,
}

/// Remaining links of a page that is being expanded
struct LinkCursor {
    links: std::vec::IntoIter<String>,
}

impl LinkCursor {
    fn new(links: Vec<String>) -> Self {
        Self {
            links: links.into_iter(),
        }
    }

    fn next_link(&mut self) -> Option<String> {
        self.links.next()
    }
}

/// Discovers every same-domain page reachable from `seed_url`
///
/// Newly found URLs are added to `visited` in place. If the seed is already
/// in `visited` (for instance restored from the cache) nothing is fetched.
/// Fetch and parse failures are logged and only end their own branch; the
/// function always completes.
///
/// # Arguments
///
/// * `fetcher` - Source of page bodies
/// * `domain` - Substring a link must contain to be followed
/// * `seed_url` - Absolute URL to start from
/// * `visited` - The visited set, shared across the whole walk
pub async fn discover<F: PageFetcher>(
    fetcher: &F,
    domain: &str,
    seed_url: &str,
    visited: &mut VisitedSet,
) -> DiscoveryStats {
    let mut stats = DiscoveryStats::default();

    if visited.contains(seed_url) {
        tracing::info!("Seed {} already discovered, skipping link discovery", seed_url);
        return stats;
    }

    // Recorded even if it turns out to be unreachable
    visited.insert(seed_url);
    stats.urls_added += 1;

    let mut stack = Vec::new();
    if let Some(cursor) = expand(fetcher, seed_url, &mut stats).await {
        stack.push(cursor);
    }

    while let Some(cursor) = stack.last_mut() {
        let Some(link) = cursor.next_link() else {
            stack.pop();
            continue;
        };

        if !belongs_to_domain(domain, &link) || visited.contains(&link) {
            continue;
        }

        tracing::info!("Found URL: {}", link);
        visited.insert(link.as_str());
        stats.urls_added += 1;

        if let Some(cursor) = expand(fetcher, &link, &mut stats).await {
            stack.push(cursor);
        }
    }

    tracing::info!(
        "Discovery finished: {} new URLs, {} pages fetched, {} failures",
        stats.urls_added,
        stats.pages_fetched,
        stats.fetch_failures
    );

    stats
}

/// Fetches one page and returns a cursor over its links
///
/// Returns `None` when the branch ends here because the page could not be
/// fetched or its URL cannot serve as a base for relative links.
async fn expand<F: PageFetcher>(
    fetcher: &F,
    url: &str,
    stats: &mut DiscoveryStats,
) -> Option<LinkCursor> {
    let base_url = match Url::parse(url) {
        Ok(base_url) => base_url,
        Err(e) => {
            stats.fetch_failures += 1;
            tracing::error!("Failed to fetch URLs from {}: invalid URL: {}", url, e);
            return None;
        }
    };

    stats.pages_fetched += 1;
    match fetcher.fetch(url).await {
        FetchResult::Success {
            final_url, body, ..
        } => {
            if final_url != url {
                tracing::debug!("{} redirected to {}", url, final_url);
            }
            let links = extract_links(&body, &base_url);
            tracing::debug!("{} links on {}", links.len(), url);
            Some(LinkCursor::new(links))
        }
        failure => {
            stats.fetch_failures += 1;
            tracing::error!("Failed to fetch URLs from {}: {}", url, failure);
            None
        }
    }
}
