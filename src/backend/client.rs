//! HTTP client construction for backend calls

use crate::config::BackendConfig;
use reqwest::Client;
use std::time::Duration;

/// Builds the HTTP client used for all backend calls
///
/// The client is built once by the caller and injected into the
/// orchestrator, so tests can point it at a mock server.
///
/// # Arguments
///
/// * `config` - Backend connection configuration (timeouts)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &BackendConfig) -> Result<Client, reqwest::Error> {
    // Format: package/version
    let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Joins the backend base URL with an endpoint path.
///
/// Tolerates a trailing slash on the base URL and a leading slash on the
/// path, so configuration typos don't produce `//health`.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
