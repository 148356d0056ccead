//! Sitesnap: a single-domain site crawler and full-page screenshot archiver
//!
//! This crate discovers every reachable page of one domain starting from a
//! seed URL, remembers what it has seen in a persistent cache, and captures a
//! full-page screenshot of each discovered page through a headless browser.

pub mod capture;
pub mod config;
pub mod crawler;
pub mod state;
pub mod storage;
pub mod url;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Sitesnap operations
///
/// Only conditions that end a run surface as `SnapError`. Per-page fetch
/// failures and per-URL capture failures are logged where they happen.
#[derive(Debug, Error)]
pub enum SnapError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Failed to launch headless browser: {0}")]
    BrowserLaunch(String),

    #[error("Failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Sitesnap operations
pub type Result<T> = std::result::Result<T, SnapError>;

// Re-export commonly used types
pub use capture::{capture, BrowserDriver, CaptureError, CaptureReport, ChromeDriver};
pub use config::Config;
pub use crawler::{discover, DiscoveryStats, HttpFetcher, PageFetcher};
pub use state::VisitedSet;
pub use storage::{SqliteVisitedStore, VisitedStore};
pub use url::{belongs_to_domain, sanitize_name, screenshot_file_name};
