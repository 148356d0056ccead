//! Storage module for persisting the visited URL cache
//!
//! This module handles the cache that lets a later run skip rediscovery:
//! - Versioned SQLite snapshot of the visited set
//! - Tolerant loading (missing, corrupt or foreign files mean "no cache")
//! - Atomic replacement of the previous snapshot on save

mod schema;
mod sqlite;
mod traits;

pub use schema::FORMAT_VERSION;
pub use sqlite::SqliteVisitedStore;
pub use traits::{StorageError, StorageResult, VisitedStore};

use std::path::Path;

/// Opens the visited URL cache stored at `path`
///
/// # Arguments
///
/// * `path` - Path to the cache file; it need not exist yet
///
/// # Returns
///
/// A store whose `load` yields an empty set until something has been saved
pub fn open_store(path: &Path) -> SqliteVisitedStore {
    SqliteVisitedStore::new(path)
}
