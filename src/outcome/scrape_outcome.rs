/// Discriminated outcome of one orchestrated scrape call
///
/// This module defines the single value type the orchestrator hands back to
/// its caller: exactly one variant per call, never an exception.
use crate::outcome::ScrapeResult;
use crate::request::ScrapeRequest;
use std::fmt;

/// Categorized reasons a scrape submission can fail after validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The liveness probe failed or returned a non-success status
    BackendUnavailable,

    /// Transport-level failure during the scrape call (DNS, connect, timeout)
    NetworkError,

    /// The scrape call returned a non-2xx HTTP status
    BackendRequestFailed,

    /// The scrape call succeeded but the body was not a parseable result
    InvalidResponseBody,
}

impl FailureKind {
    /// Stable label for logs and machine-readable output
    pub fn label(&self) -> &'static str {
        match self {
            Self::BackendUnavailable => "backend_unavailable",
            Self::NetworkError => "network_error",
            Self::BackendRequestFailed => "backend_request_failed",
            Self::InvalidResponseBody => "invalid_response_body",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Terminal value of an orchestration call
///
/// Both variants echo the validated request's `url` and `depth` so a caller
/// can re-render the submission form with its original values regardless of
/// how the call ended.
#[derive(Debug, Clone, PartialEq)]
pub enum ScrapeOutcome {
    /// The backend returned a decodable scrape result
    Success {
        url: String,
        depth: u8,
        result: ScrapeResult,
    },

    /// Some step of the pipeline failed; `kind` says which
    Failure {
        url: String,
        depth: u8,
        kind: FailureKind,
        message: String,
    },
}

impl ScrapeOutcome {
    /// Builds the success variant for a request
    pub fn success(request: &ScrapeRequest, result: ScrapeResult) -> Self {
        Self::Success {
            url: request.url.clone(),
            depth: request.depth,
            result,
        }
    }

    /// Builds the failure variant for a request
    pub fn failure(
        request: &ScrapeRequest,
        kind: FailureKind,
        message: impl Into<String>,
    ) -> Self {
        Self::Failure {
            url: request.url.clone(),
            depth: request.depth,
            kind,
            message: message.into(),
        }
    }

    /// Returns true for the success variant
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The submitted URL, echoed in both variants
    pub fn url(&self) -> &str {
        match self {
            Self::Success { url, .. } | Self::Failure { url, .. } => url,
        }
    }

    /// The validated depth, echoed in both variants
    pub fn depth(&self) -> u8 {
        match self {
            Self::Success { depth, .. } | Self::Failure { depth, .. } => *depth,
        }
    }

    /// The failure category, if this is a failure
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { kind, .. } => Some(*kind),
        }
    }
}
