//! Data model for scrape calls: the backend payload and the discriminated
//! outcome handed back to callers.

mod result;
mod scrape_outcome;

pub use result::{Link, ScrapeResult};
pub use scrape_outcome::{FailureKind, ScrapeOutcome};
