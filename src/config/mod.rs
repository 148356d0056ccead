//! Configuration module for Sitesnap
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Without a file, [`Config::default`] reproduces the
//! stock behavior: `screenshots/` output, 1920px wide captures, 600px minimum
//! height and a one second pause between captures.
//!
//! # Example
//!
//! ```no_run
//! use sitesnap::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sitesnap.toml")).unwrap();
//! println!("Screenshots go to: {}", config.capture.output_dir);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CaptureConfig, Config, CrawlerConfig, OutputConfig};

// Re-export parser functions
pub use parser::{load_config, load_or_default};
pub use validation::validate;
