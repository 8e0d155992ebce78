//! Input validation for scrape submissions
//!
//! Turns the raw `{ url, depth }` pair from a form into a typed,
//! range-checked [`ScrapeRequest`], or a field-tagged validation error.
//! Validation failures short-circuit before any network activity.

mod validate;

pub use validate::{validate, DepthPolicy, ScrapeRequest, DEFAULT_DEPTH, MAX_DEPTH, MIN_DEPTH};
