//! Storage traits and error types
//!
//! This module defines the trait interface for visited-set persistence and
//! associated error types.

use crate::state::VisitedSet;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cache format version {found} is not supported (expected {expected})")]
    VersionMismatch { found: u32, expected: u32 },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for visited-set persistence backends
///
/// `load` is infallible by contract: anything that prevents reading a prior
/// snapshot means there is no prior snapshot. `save` replaces the whole
/// snapshot and its failure must be treated as fatal by the caller, since the
/// discovery work would otherwise be lost.
pub trait VisitedStore {
    /// Restores the last saved set, or an empty set
    fn load(&self) -> VisitedSet;

    /// Persists the full set, overwriting any prior snapshot
    fn save(&mut self, visited: &VisitedSet) -> StorageResult<()>;
}
