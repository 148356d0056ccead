//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `VisitedSet`: the de-duplication ledger of every URL discovered so far,
//!   restored from the cache at startup and consumed by the capture pass

mod visited;

// Re-export main types
pub use visited::VisitedSet;
