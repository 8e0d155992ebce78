//! Liveness probe against the backend's /health endpoint
//!
//! The target backend may be a cold-started or sleeping hosted service; the
//! probe distinguishes that condition from a failure of the scrape call
//! itself.

use crate::backend::client::endpoint;
use reqwest::Client;
use std::time::{Duration, Instant};

/// Result of a timed liveness check
///
/// The health payload's shape is opaque to this crate; it is captured as
/// raw JSON and passed through unexamined.
#[derive(Debug, Clone)]
pub struct HealthReport {
    /// Whether the probe received a success status
    pub healthy: bool,

    /// Health payload as returned by the backend, when it was JSON
    pub payload: Option<serde_json::Value>,

    /// Description of what went wrong, when unhealthy
    pub error: Option<String>,

    /// Wall-clock duration of the check
    pub elapsed: Duration,
}

/// Issues `GET {base_url}/health` and reports the result
///
/// Never returns an error: transport failures and non-success statuses are
/// folded into the report. A success status with a non-JSON body still
/// counts as healthy, just without a payload.
pub async fn check_health(client: &Client, base_url: &str) -> HealthReport {
    let started = Instant::now();
    let url = endpoint(base_url, "health");

    match client.get(&url).send().await {
        Ok(response) => {
            let status = response.status();
            // Consume the body even when we don't use it, so the
            // connection is returned to the pool.
            let body = response.text().await.unwrap_or_default();
            let elapsed = started.elapsed();

            if !status.is_success() {
                tracing::debug!(status = status.as_u16(), "Health probe returned non-success status");
                return HealthReport {
                    healthy: false,
                    payload: None,
                    error: Some(format!("backend returned HTTP {}", status.as_u16())),
                    elapsed,
                };
            }

            let payload = serde_json::from_str(&body).ok();
            HealthReport {
                healthy: true,
                payload,
                error: None,
                elapsed,
            }
        }
        Err(e) => {
            tracing::debug!(error = %e, "Health probe failed");
            HealthReport {
                healthy: false,
                payload: None,
                error: Some(e.to_string()),
                elapsed: started.elapsed(),
            }
        }
    }
}
