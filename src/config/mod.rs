//! Configuration module for Pulse
//!
//! This module handles loading, parsing, and validating TOML configuration files,
//! plus the deployment-time environment overrides for the API and media URLs.
//!
//! # Example
//!
//! ```no_run
//! use pulse_browser::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Some(Path::new("pulse.toml"))).unwrap();
//! println!("Talking to: {}", config.api.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ApiConfig, BrowseConfig, Config, FallbackPolicy, MediaConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{
    apply_env_overrides, compute_config_hash, load_config, load_config_with_hash,
    API_BASE_URL_ENV, MEDIA_BASE_URL_ENV,
};
pub use validation::validate;
