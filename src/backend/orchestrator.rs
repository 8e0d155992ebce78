//! The scrape pipeline
//!
//! Given a validated request, an injected HTTP client, and the backend
//! configuration, runs the liveness probe (policy-gated), the scrape call,
//! and the response decode. Every failure mode becomes a
//! [`ScrapeOutcome::Failure`]; nothing escapes this module as an error.

use crate::backend::client::endpoint;
use crate::backend::probe::check_health;
use crate::config::BackendConfig;
use crate::outcome::{FailureKind, ScrapeOutcome, ScrapeResult};
use crate::request::ScrapeRequest;
use reqwest::{Client, StatusCode};

/// Message attached to failures caused by a dead liveness probe
const BACKEND_SLEEPING: &str =
    "backend is not responding; it may be sleeping and need to be woken";

/// Runs the full scrape pipeline for a validated request
///
/// # Request Flow
///
/// 1. If `backend.probe_liveness` is set, probe `GET {base_url}/health`.
///    Any failure short-circuits to `BackendUnavailable` and the scrape
///    call is never issued.
/// 2. Issue `GET {base_url}/scrape?url=...&depth=...`. Transport failures
///    map to `NetworkError`.
/// 3. On a non-2xx status, extract a message from the error body
///    best-effort and map to `BackendRequestFailed`.
/// 4. Parse the body into [`ScrapeResult`]; a parse failure maps to
///    `InvalidResponseBody`.
///
/// The three network-bearing steps are strictly sequential, there is no
/// retry, and the response body is fully read on every path so the
/// underlying connection is always released.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `backend` - Resolved backend configuration (base URL, probe policy)
/// * `request` - The validated request to submit
///
/// # Returns
///
/// A [`ScrapeOutcome`], exactly one variant per call, echoing the
/// request's url and depth in both variants
pub async fn run_scrape(
    client: &Client,
    backend: &BackendConfig,
    request: &ScrapeRequest,
) -> ScrapeOutcome {
    if backend.probe_liveness {
        let report = check_health(client, &backend.base_url).await;
        if !report.healthy {
            tracing::warn!(url = %request.url, "Liveness probe failed, skipping scrape call");
            return ScrapeOutcome::failure(
                request,
                FailureKind::BackendUnavailable,
                BACKEND_SLEEPING,
            );
        }
        tracing::debug!(
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Liveness probe succeeded"
        );
    }

    tracing::info!(url = %request.url, depth = request.depth, "Submitting scrape request");

    let depth = request.depth.to_string();
    let response = match client
        .get(endpoint(&backend.base_url, "scrape"))
        .query(&[("url", request.url.as_str()), ("depth", depth.as_str())])
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(url = %request.url, error = %e, "Scrape call failed at transport level");
            return ScrapeOutcome::failure(
                request,
                FailureKind::NetworkError,
                classify_transport_error(&e),
            );
        }
    };

    let status = response.status();

    // Read the body before branching on the status so the connection is
    // released on every path.
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            return ScrapeOutcome::failure(
                request,
                FailureKind::NetworkError,
                format!("failed to read response body: {}", e),
            )
        }
    };

    if !status.is_success() {
        let message = extract_error_message(status, &body);
        tracing::warn!(url = %request.url, status = status.as_u16(), %message, "Backend rejected scrape request");
        return ScrapeOutcome::failure(request, FailureKind::BackendRequestFailed, message);
    }

    match serde_json::from_str::<ScrapeResult>(&body) {
        Ok(result) => {
            tracing::info!(
                url = %request.url,
                links = result.links.len(),
                "Scrape completed"
            );
            ScrapeOutcome::success(request, result)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Response body did not match the expected result shape");
            ScrapeOutcome::failure(
                request,
                FailureKind::InvalidResponseBody,
                "could not parse response",
            )
        }
    }
}

/// Classifies a transport-level error into a short message
fn classify_transport_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_connect() {
        "could not connect to backend".to_string()
    } else {
        error.to_string()
    }
}

/// Best-effort extraction of an error message from a failed response body
///
/// The backend's error envelope is `{"error": type, "message": text}`, but
/// nothing here depends on receiving it: a string `message` field wins,
/// then a string `error` field, then the HTTP status line. A body that is
/// not JSON at all never causes a secondary failure.
fn extract_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for field in ["message", "error"] {
            if let Some(text) = value.get(field).and_then(|v| v.as_str()) {
                if !text.is_empty() {
                    return text.to_string();
                }
            }
        }
    }

    format!(
        "HTTP {}: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("unknown status")
    )
}
