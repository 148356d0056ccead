//! URL handling module for Sitesnap
//!
//! This module provides the same-domain link filter and the naming rules that
//! turn domains and URLs into filesystem paths.

mod domain;
mod sanitize;

// Re-export main functions
pub use domain::belongs_to_domain;
pub use sanitize::{domain_dir_name, sanitize_name, screenshot_file_name, MAX_NAME_LEN};
