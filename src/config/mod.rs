//! Configuration module for Scrape-Relay
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, plus the environment override for the backend base URL.
//!
//! # Example
//!
//! ```no_run
//! use scrape_relay::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Backend base URL: {}", config.backend.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{BackendConfig, Config, ValidationConfig, DEFAULT_BASE_URL};

// Re-export parser functions
pub use parser::{
    backend_url_from_env, compute_config_hash, load_config, load_config_with_hash,
    BACKEND_URL_ENV,
};
