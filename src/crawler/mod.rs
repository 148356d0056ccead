//! Crawler module for link discovery
//!
//! This module contains the discovery side of a run, including:
//! - HTTP fetching with outcome classification
//! - HTML parsing and link extraction
//! - The depth-first, domain-restricted traversal

mod fetcher;
mod parser;
mod traversal;

pub use fetcher::{build_http_client, fetch_url, FetchResult, HttpFetcher, PageFetcher};
pub use parser::extract_links;
pub use traversal::{discover, DiscoveryStats};

use crate::config::CrawlerConfig;
use crate::state::VisitedSet;
use crate::SnapError;

/// Runs link discovery over HTTP
///
/// This is the main entry point for the discovery phase. It will:
/// 1. Build the HTTP client from the crawler configuration
/// 2. Walk every same-domain page reachable from `seed_url`
/// 3. Record each new URL in `visited`
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `domain` - Substring a link must contain to be followed
/// * `seed_url` - Absolute URL to start from
/// * `visited` - The visited set restored from the cache
///
/// # Returns
///
/// * `Ok(DiscoveryStats)` - Discovery ran to completion
/// * `Err(SnapError)` - The HTTP client could not be built
pub async fn crawl(
    config: &CrawlerConfig,
    domain: &str,
    seed_url: &str,
    visited: &mut VisitedSet,
) -> Result<DiscoveryStats, SnapError> {
    let fetcher = HttpFetcher::new(config)?;
    Ok(discover(&fetcher, domain, seed_url, visited).await)
}
