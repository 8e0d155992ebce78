use crate::{ValidationError, ValidationResult};
use serde::Deserialize;
use url::Url;

/// Depth used when the depth field is absent or empty
pub const DEFAULT_DEPTH: u8 = 1;

/// Smallest accepted crawl depth
pub const MIN_DEPTH: u8 = 1;

/// Largest accepted crawl depth
pub const MAX_DEPTH: u8 = 3;

/// How a non-numeric depth value is treated during validation.
///
/// `Strict` rejects it with a depth-field error; `Fallback` coerces it to
/// [`DEFAULT_DEPTH`]. Absent or empty depth input resolves to the default
/// under both policies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepthPolicy {
    #[default]
    Strict,
    Fallback,
}

/// A validated scrape request.
///
/// Constructed once per submission by [`validate`] and immutable afterwards.
/// `url` keeps the text the user submitted (trimmed), not a re-serialized
/// form, so callers can echo it back exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeRequest {
    pub url: String,
    pub depth: u8,
}

/// Parses and normalizes raw form input into a typed request.
///
/// Pure function, no side effects. A failure here means no network request
/// is ever issued for the submission.
///
/// # Arguments
///
/// * `raw_url` - The URL as submitted, must be a non-empty absolute
///   http/https URL
/// * `raw_depth` - The depth as submitted; `None` or an empty string
///   resolves to [`DEFAULT_DEPTH`]
/// * `policy` - How non-numeric depth input is treated
pub fn validate(
    raw_url: &str,
    raw_depth: Option<&str>,
    policy: DepthPolicy,
) -> ValidationResult<ScrapeRequest> {
    let url = validate_url(raw_url)?;
    let depth = resolve_depth(raw_depth, policy)?;
    Ok(ScrapeRequest { url, depth })
}

fn validate_url(raw: &str) -> ValidationResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }

    let parsed = Url::parse(trimmed).map_err(|e| ValidationError::InvalidUrl {
        input: trimmed.to_string(),
        message: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ValidationError::UnsupportedScheme {
                scheme: other.to_string(),
            })
        }
    }

    Ok(trimmed.to_string())
}

fn resolve_depth(raw: Option<&str>, policy: DepthPolicy) -> ValidationResult<u8> {
    let raw = match raw {
        None => return Ok(DEFAULT_DEPTH),
        Some(s) => s.trim(),
    };

    if raw.is_empty() {
        return Ok(DEFAULT_DEPTH);
    }

    let value: i64 = match raw.parse() {
        Ok(v) => v,
        Err(_) => match policy {
            DepthPolicy::Strict => {
                return Err(ValidationError::DepthNotANumber {
                    input: raw.to_string(),
                })
            }
            DepthPolicy::Fallback => return Ok(DEFAULT_DEPTH),
        },
    };

    if value < MIN_DEPTH as i64 || value > MAX_DEPTH as i64 {
        return Err(ValidationError::DepthOutOfRange { value });
    }

    Ok(value as u8)
}
