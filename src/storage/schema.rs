//! Cache schema definitions
//!
//! This module contains the SQL schema of the visited URL cache file.

use rusqlite::{params, Connection, OptionalExtension};

/// Format version written into every cache file
///
/// Files carrying another version are not read back.
pub const FORMAT_VERSION: u32 = 1;

/// SQL schema for the cache
pub const SCHEMA_SQL: &str = r#"
-- Snapshot metadata (format_version, saved_at, url_count)
CREATE TABLE IF NOT EXISTS meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

-- Every URL discovered so far
CREATE TABLE IF NOT EXISTS visited_urls (
    url TEXT PRIMARY KEY
) WITHOUT ROWID;
"#;

/// Initializes the cache schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Reads the format version recorded in the cache, if any
pub fn read_format_version(conn: &Connection) -> Result<Option<u32>, rusqlite::Error> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM meta WHERE key = 'format_version'",
            [],
            |row| row.get(0),
        )
        .optional()?;

    // An unparsable version is reported as version 0, which never matches
    Ok(value.map(|v| v.parse().unwrap_or(0)))
}

/// Writes a metadata entry, replacing any previous value
pub fn write_meta(conn: &Connection, key: &str, value: &str) -> Result<(), rusqlite::Error> {
    conn.execute(
        "INSERT OR REPLACE INTO meta (key, value) VALUES (?1, ?2)",
        params![key, value],
    )?;
    Ok(())
}
