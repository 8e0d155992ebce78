//! Scrape-Relay: a validated client for a remote scraping backend
//!
//! This crate implements the client-side pipeline for a scraping service:
//! it validates raw form input into a typed request, optionally probes the
//! backend's liveness, issues the scrape call, decodes the response, and
//! folds every failure mode into a single discriminated outcome value.

pub mod backend;
pub mod config;
pub mod outcome;
pub mod request;

use thiserror::Error;

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

/// Errors produced by input validation, before any network activity
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("URL must not be empty")]
    EmptyUrl,

    #[error("invalid URL '{input}': {message}")]
    InvalidUrl { input: String, message: String },

    #[error("URL scheme '{scheme}' is not supported, use http or https")]
    UnsupportedScheme { scheme: String },

    #[error("depth '{input}' is not a number")]
    DepthNotANumber { input: String },

    #[error("depth {value} is out of range, must be between 1 and 3")]
    DepthOutOfRange { value: i64 },
}

impl ValidationError {
    /// The form field this error should be attached to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::EmptyUrl
            | ValidationError::InvalidUrl { .. }
            | ValidationError::UnsupportedScheme { .. } => "url",
            ValidationError::DepthNotANumber { .. }
            | ValidationError::DepthOutOfRange { .. } => "depth",
        }
    }
}

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for input validation
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

// Re-export commonly used types
pub use backend::{build_http_client, check_health, run_scrape, HealthReport};
pub use config::{BackendConfig, Config};
pub use outcome::{FailureKind, Link, ScrapeOutcome, ScrapeResult};
pub use request::{validate, DepthPolicy, ScrapeRequest};
