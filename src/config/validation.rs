use crate::config::types::{CaptureConfig, Config, CrawlerConfig, OutputConfig};
use crate::ConfigError;
use url::Url;

/// Largest viewport dimension Chrome will accept for a window
const MAX_VIEWPORT_DIMENSION: u32 = 16384;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_capture_config(&config.capture)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates discovery request configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    if let Some(referer) = config.referer.as_deref().filter(|r| !r.is_empty()) {
        Url::parse(referer)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid referer '{}': {}", referer, e)))?;
    }

    Ok(())
}

/// Validates screenshot capture configuration
fn validate_capture_config(config: &CaptureConfig) -> Result<(), ConfigError> {
    if config.output_dir.is_empty() {
        return Err(ConfigError::Validation(
            "output_dir cannot be empty".to_string(),
        ));
    }

    validate_dimension("viewport_width", config.viewport_width)?;
    validate_dimension("min_height", config.min_height)?;

    Ok(())
}

fn validate_dimension(name: &str, value: u32) -> Result<(), ConfigError> {
    if value < 1 || value > MAX_VIEWPORT_DIMENSION {
        return Err(ConfigError::Validation(format!(
            "{} must be between 1 and {}, got {}",
            name, MAX_VIEWPORT_DIMENSION, value
        )));
    }
    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.cache_path.is_empty() {
        return Err(ConfigError::Validation(
            "cache_path cannot be empty".to_string(),
        ));
    }

    if config.log_path.is_empty() {
        return Err(ConfigError::Validation(
            "log_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
