//! Pulse: an influencer content browser
//!
//! This crate implements a browsing client for a social-media influencer catalog:
//! searching influencers, paging through their posts, inspecting a single post and
//! asking the backend to crawl fresh content for an influencer with none cached.
//!
//! The interesting part lives in [`state`]: a reducer-style navigator that turns
//! user intents into view-state changes plus the side effects a [`session`] runs
//! against a [`api::ContentRepository`].

pub mod adapters;
pub mod api;
pub mod config;
pub mod fallback;
pub mod model;
pub mod render;
pub mod session;
pub mod state;

use thiserror::Error;

/// Main error type for Pulse operations
#[derive(Debug, Error)]
pub enum PulseError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
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

/// Errors returned by the content repository
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("API returned status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Request timed out after {millis}ms")]
    Timeout { millis: u64 },

    #[error("Crawl rejected: {0}")]
    Rejected(String),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] ::url::ParseError),
}

/// Result type alias for Pulse operations
pub type Result<T> = std::result::Result<T, PulseError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for repository operations
pub type ApiResult<T> = std::result::Result<T, ApiError>;

// Re-export commonly used types
pub use api::{ContentRepository, HttpRepository};
pub use config::Config;
pub use model::{Media, MediaKind, Post, User};
pub use session::Session;
pub use state::{Command, Intent, Navigator, View, ViewState};
