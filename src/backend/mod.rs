//! Backend orchestration: liveness probe, scrape call, response decode
//!
//! This module owns all network traffic to the scraping backend. Its
//! defining discipline is that nothing here throws across the boundary:
//! the orchestrator returns a [`crate::outcome::ScrapeOutcome`] value and
//! the probe returns a [`HealthReport`] value on every path.

mod client;
mod orchestrator;
mod probe;

pub use client::build_http_client;
pub use orchestrator::run_scrape;
pub use probe::{check_health, HealthReport};

use crate::config::BackendConfig;
use crate::outcome::ScrapeOutcome;
use crate::request::ScrapeRequest;

/// Convenience entry point: builds a client and runs one scrape call
///
/// Callers issuing multiple requests should build a client once with
/// [`build_http_client`] and call [`run_scrape`] directly so connections
/// are reused.
pub async fn scrape(
    backend: &BackendConfig,
    request: &ScrapeRequest,
) -> Result<ScrapeOutcome, reqwest::Error> {
    let client = build_http_client(backend)?;
    Ok(run_scrape(&client, backend, request).await)
}
