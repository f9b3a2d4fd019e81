//! Configuration module for Gallery Catalog
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use gallery_catalog::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("catalog.toml")).unwrap();
//! println!("Models endpoint: {}", config.api.models_url().unwrap());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{AnalyticsConfig, ApiConfig, Config, PresentationConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
