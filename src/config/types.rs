use crate::request::DepthPolicy;
use serde::Deserialize;

/// Base URL used when no config file, environment variable, or CLI flag
/// supplies one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Main configuration structure for Scrape-Relay
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Backend connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the scraping backend
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// Whether to probe GET /health before each scrape call
    #[serde(rename = "probe-liveness", default = "default_probe_liveness")]
    pub probe_liveness: bool,

    /// Total per-request timeout in seconds
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Connection timeout in seconds
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

/// Input validation configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValidationConfig {
    /// How a non-numeric depth value is treated: reject it (`strict`) or
    /// coerce it to the default depth (`fallback`)
    #[serde(rename = "depth-policy", default)]
    pub depth_policy: DepthPolicy,
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            base_url: default_base_url(),
            probe_liveness: default_probe_liveness(),
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_probe_liveness() -> bool {
    true
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}
