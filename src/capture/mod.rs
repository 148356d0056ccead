//! Capture module for full-page screenshots
//!
//! This module contains the capture side of a run:
//! - The browser automation seam and the headless Chrome driver
//! - The pipeline that screenshots every visited URL

mod browser;
mod pipeline;

pub use browser::{BrowserDriver, CaptureError, ChromeDriver};
pub use pipeline::{
    capture, prepare_output_dir, viewport_height, CaptureFailure, CaptureReport,
    ScreenshotArtifact, SCROLL_HEIGHT_SCRIPT,
};
