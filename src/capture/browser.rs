//! Browser automation seam and its headless Chrome implementation
//!
//! The capture pipeline only needs four primitives from a browser: load a
//! page, run a script in it, resize the viewport and grab a PNG. They are
//! expressed by [`BrowserDriver`] so the pipeline can be exercised without a
//! real browser.

use crate::config::CaptureConfig;
use crate::SnapError;
use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use headless_chrome::types::Bounds;
use headless_chrome::{Browser, LaunchOptions, Tab};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while capturing a single page
///
/// None of these end a capture pass; the pipeline logs them and moves on.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("Page script failed: {0}")]
    Script(String),

    #[error("Viewport resize to {width}x{height} failed: {message}")]
    Resize {
        width: u32,
        height: u32,
        message: String,
    },

    #[error("Screenshot failed: {0}")]
    Screenshot(String),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Minimal browser automation interface used by the capture pipeline
pub trait BrowserDriver {
    /// Loads `url` and waits for navigation to finish
    fn navigate(&mut self, url: &str) -> Result<(), CaptureError>;

    /// Evaluates a JavaScript expression in the current page
    fn evaluate(&mut self, script: &str) -> Result<Value, CaptureError>;

    /// Resizes the viewport in device-independent pixels
    fn resize_viewport(&mut self, width: u32, height: u32) -> Result<(), CaptureError>;

    /// Captures the current viewport as PNG bytes
    fn screenshot(&mut self) -> Result<Vec<u8>, CaptureError>;
}

/// Headless Chrome driven over the DevTools protocol
///
/// The browser process lives as long as this value; dropping it shuts
/// Chrome down, whichever way the capture pass ends.
pub struct ChromeDriver {
    tab: Arc<Tab>,
    _browser: Browser,
}

impl ChromeDriver {
    /// Launches a headless Chrome with a single tab
    ///
    /// # Arguments
    ///
    /// * `config` - Capture configuration; its width and minimum height size
    ///   the initial window
    ///
    /// # Returns
    ///
    /// * `Ok(ChromeDriver)` - Browser is up and a tab is open
    /// * `Err(SnapError::BrowserLaunch)` - Chrome could not be started
    pub fn launch(config: &CaptureConfig) -> Result<Self, SnapError> {
        let options = LaunchOptions::default_builder()
            .headless(true)
            .window_size(Some((config.viewport_width, config.min_height)))
            .build()
            .map_err(|e| SnapError::BrowserLaunch(e.to_string()))?;

        let browser = Browser::new(options).map_err(|e| SnapError::BrowserLaunch(e.to_string()))?;
        let tab = browser
            .new_tab()
            .map_err(|e| SnapError::BrowserLaunch(e.to_string()))?;

        tracing::info!("Headless browser started");
        Ok(Self {
            tab,
            _browser: browser,
        })
    }
}

impl BrowserDriver for ChromeDriver {
    fn navigate(&mut self, url: &str) -> Result<(), CaptureError> {
        self.tab
            .navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .map(|_| ())
            .map_err(|e| CaptureError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })
    }

    fn evaluate(&mut self, script: &str) -> Result<Value, CaptureError> {
        let result = self
            .tab
            .evaluate(script, false)
            .map_err(|e| CaptureError::Script(e.to_string()))?;
        Ok(result.value.unwrap_or(Value::Null))
    }

    fn resize_viewport(&mut self, width: u32, height: u32) -> Result<(), CaptureError> {
        self.tab
            .set_bounds(Bounds::Normal {
                left: Some(0),
                top: Some(0),
                width: Some(f64::from(width)),
                height: Some(f64::from(height)),
            })
            .map(|_| ())
            .map_err(|e| CaptureError::Resize {
                width,
                height,
                message: e.to_string(),
            })
    }

    fn screenshot(&mut self) -> Result<Vec<u8>, CaptureError> {
        self.tab
            .capture_screenshot(CaptureScreenshotFormatOption::Png, None, None, true)
            .map_err(|e| CaptureError::Screenshot(e.to_string()))
    }
}

impl Drop for ChromeDriver {
    fn drop(&mut self) {
        tracing::info!("Shutting down headless browser");
    }
}
