//! Screenshot capture pipeline
//!
//! Walks the visited set once and saves one full-page PNG per URL under
//! `<output-dir>/<sanitized domain>/`. The viewport is stretched to the
//! page's scroll height so a single shot covers the whole document.

use crate::capture::browser::{BrowserDriver, CaptureError};
use crate::config::CaptureConfig;
use crate::state::VisitedSet;
use crate::url::{domain_dir_name, screenshot_file_name};
use crate::SnapError;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Expression that yields the full document height
pub const SCROLL_HEIGHT_SCRIPT: &str = "document.body.scrollHeight";

/// A screenshot written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenshotArtifact {
    pub url: String,
    pub path: PathBuf,
    /// Size of the PNG in bytes
    pub bytes: usize,
}

/// A URL whose capture failed
#[derive(Debug)]
pub struct CaptureFailure {
    pub url: String,
    pub error: CaptureError,
}

/// Outcome of a capture pass
#[derive(Debug, Default)]
pub struct CaptureReport {
    /// Directory the screenshots were written to
    pub domain_dir: PathBuf,
    pub artifacts: Vec<ScreenshotArtifact>,
    pub failures: Vec<CaptureFailure>,
}

impl CaptureReport {
    /// Number of URLs a capture was attempted for
    pub fn attempted(&self) -> usize {
        self.artifacts.len() + self.failures.len()
    }
}

/// Creates the screenshot root and the per-domain directory inside it
///
/// # Returns
///
/// * `Ok(PathBuf)` - The per-domain directory
/// * `Err(SnapError::OutputDir)` - A directory could not be created
pub fn prepare_output_dir(output_dir: &Path, domain: &str) -> Result<PathBuf, SnapError> {
    fs::create_dir_all(output_dir).map_err(|source| SnapError::OutputDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let domain_dir = output_dir.join(domain_dir_name(domain));
    if !domain_dir.is_dir() {
        fs::create_dir_all(&domain_dir).map_err(|source| SnapError::OutputDir {
            path: domain_dir.clone(),
            source,
        })?;
        tracing::info!("Created directory for domain: {}", domain);
    }

    Ok(domain_dir)
}

/// Viewport height for a page: its scroll height, but never below `min_height`
pub fn viewport_height(scroll_height: u32, min_height: u32) -> u32 {
    scroll_height.max(min_height)
}

/// Reads a scroll height out of a script result
fn parse_height(value: &Value) -> Option<u32> {
    let height = value.as_f64()?;
    if !height.is_finite() || height < 0.0 {
        return None;
    }
    Some(height.ceil().min(f64::from(u32::MAX)) as u32)
}

/// Captures every URL of the visited set
///
/// Each URL is attempted exactly once. A failure is logged, recorded in the
/// report and the pass continues with the next URL; nothing is retried and
/// partially written files are left in place.
///
/// # Arguments
///
/// * `driver` - The browser to drive
/// * `domain` - Crawled domain, names the output subdirectory
/// * `visited` - URLs to capture
/// * `config` - Capture configuration
///
/// # Returns
///
/// * `Ok(CaptureReport)` - The pass ran over every URL
/// * `Err(SnapError)` - The output directories could not be created
pub fn capture<D: BrowserDriver + ?Sized>(
    driver: &mut D,
    domain: &str,
    visited: &VisitedSet,
    config: &CaptureConfig,
) -> Result<CaptureReport, SnapError> {
    let domain_dir = prepare_output_dir(Path::new(&config.output_dir), domain)?;
    let throttle = Duration::from_millis(config.throttle_ms);

    let mut report = CaptureReport {
        domain_dir: domain_dir.clone(),
        ..CaptureReport::default()
    };

    for url in visited {
        match capture_page(driver, url, &domain_dir, config) {
            Ok(artifact) => {
                tracing::info!(
                    "Saved full-page screenshot for {} as {}",
                    url,
                    artifact.path.display()
                );
                report.artifacts.push(artifact);

                if !throttle.is_zero() {
                    std::thread::sleep(throttle);
                }
            }
            Err(error) => {
                tracing::error!("Failed to capture screenshot for {}: {}", url, error);
                report.failures.push(CaptureFailure {
                    url: url.to_string(),
                    error,
                });
            }
        }
    }

    tracing::info!(
        "Capture finished: {} saved, {} failed",
        report.artifacts.len(),
        report.failures.len()
    );

    Ok(report)
}

/// Navigates, sizes the viewport to the page and writes the screenshot
fn capture_page<D: BrowserDriver + ?Sized>(
    driver: &mut D,
    url: &str,
    domain_dir: &Path,
    config: &CaptureConfig,
) -> Result<ScreenshotArtifact, CaptureError> {
    driver.navigate(url)?;

    let value = driver.evaluate(SCROLL_HEIGHT_SCRIPT)?;
    let scroll_height = parse_height(&value)
        .ok_or_else(|| CaptureError::Script(format!("scroll height is not a number: {}", value)))?;

    let height = viewport_height(scroll_height, config.min_height);
    tracing::debug!("{}: scroll height {}, viewport height {}", url, scroll_height, height);
    driver.resize_viewport(config.viewport_width, height)?;

    let png = driver.screenshot()?;
    let path = domain_dir.join(screenshot_file_name(url));
    fs::write(&path, &png).map_err(|source| CaptureError::Write {
        path: path.clone(),
        source,
    })?;

    Ok(ScreenshotArtifact {
        url: url.to_string(),
        path,
        bytes: png.len(),
    })
}
