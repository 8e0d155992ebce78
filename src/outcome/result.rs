use serde::{Deserialize, Serialize};

/// A hyperlink discovered by the backend during scraping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Link text or anchor; the backend omits the field when empty
    #[serde(default)]
    pub text: String,

    /// Absolute URL
    pub href: String,
}

/// Structured payload returned by the backend for a successful scrape
///
/// This crate only deserializes the payload and hands it to the caller
/// unmodified; in particular `fetched_at` stays the string the backend sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeResult {
    /// Page title
    pub title: String,

    /// Main content converted to Markdown
    pub markdown: String,

    /// Discovered links, in backend order
    pub links: Vec<Link>,

    /// Raw HTML of the page, when the backend includes it
    #[serde(rename = "rawHtml", default, skip_serializing_if = "Option::is_none")]
    pub raw_html: Option<String>,

    /// Warnings emitted by the backend (robots.txt notices, fallbacks)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,

    /// ISO-8601 timestamp of when the backend fetched the page
    #[serde(rename = "fetchedAt")]
    pub fetched_at: String,
}
