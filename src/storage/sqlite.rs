//! SQLite storage implementation
//!
//! This module provides a SQLite-backed implementation of the VisitedStore
//! trait. Each save writes a complete snapshot to a sibling temporary file and
//! renames it over the cache, so a crash mid-save leaves the previous
//! snapshot intact.

use crate::state::VisitedSet;
use crate::storage::schema::{initialize_schema, read_format_version, write_meta, FORMAT_VERSION};
use crate::storage::traits::{StorageError, StorageResult, VisitedStore};
use chrono::Utc;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use std::fs;
use std::path::{Path, PathBuf};

/// SQLite visited-set cache stored in a single file
pub struct SqliteVisitedStore {
    path: PathBuf,
}

impl SqliteVisitedStore {
    /// Creates a store for the cache file at `path`
    ///
    /// Nothing is touched on disk until [`VisitedStore::save`] is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the cache file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the snapshot, failing on anything unexpected
    fn read_snapshot(&self) -> StorageResult<(VisitedSet, Option<String>)> {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        match read_format_version(&conn)? {
            Some(FORMAT_VERSION) => {}
            found => {
                return Err(StorageError::VersionMismatch {
                    found: found.unwrap_or(0),
                    expected: FORMAT_VERSION,
                })
            }
        }

        let saved_at: Option<String> = conn
            .query_row("SELECT value FROM meta WHERE key = 'saved_at'", [], |row| {
                row.get(0)
            })
            .optional()?;

        let mut stmt = conn.prepare("SELECT url FROM visited_urls")?;
        let visited = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<VisitedSet, _>>()?;

        Ok((visited, saved_at))
    }

    /// Writes a complete snapshot to `tmp`
    fn write_snapshot(tmp: &Path, visited: &VisitedSet) -> StorageResult<()> {
        let mut conn = Connection::open(tmp)?;
        conn.execute_batch("PRAGMA synchronous = FULL;")?;
        initialize_schema(&conn)?;

        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare("INSERT OR IGNORE INTO visited_urls (url) VALUES (?1)")?;
            for url in visited {
                stmt.execute(params![url])?;
            }
        }
        write_meta(&tx, "format_version", &FORMAT_VERSION.to_string())?;
        write_meta(&tx, "saved_at", &Utc::now().to_rfc3339())?;
        write_meta(&tx, "url_count", &visited.len().to_string())?;
        tx.commit()?;

        conn.close().map_err(|(_, e)| StorageError::Sqlite(e))?;
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl VisitedStore for SqliteVisitedStore {
    fn load(&self) -> VisitedSet {
        if !self.path.exists() {
            tracing::info!("No URL cache at {}, starting empty", self.path.display());
            return VisitedSet::new();
        }

        match self.read_snapshot() {
            Ok((visited, saved_at)) => {
                tracing::info!(
                    "Loaded {} URLs from cache (saved at {})",
                    visited.len(),
                    saved_at.as_deref().unwrap_or("unknown")
                );
                visited
            }
            Err(e) => {
                tracing::warn!(
                    "Ignoring unreadable URL cache {}: {}",
                    self.path.display(),
                    e
                );
                VisitedSet::new()
            }
        }
    }

    fn save(&mut self, visited: &VisitedSet) -> StorageResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.temp_path();
        if tmp.exists() {
            fs::remove_file(&tmp)?;
        }

        if let Err(e) = Self::write_snapshot(&tmp, visited) {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
        fs::rename(&tmp, &self.path)?;

        tracing::info!("Saved {} URLs to cache", visited.len());
        Ok(())
    }
}
