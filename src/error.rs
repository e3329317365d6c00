//! Error taxonomy for the aggregation engine.
//!
//! Only [`ScrapeError::Session`] is ever surfaced to callers of
//! [`crate::deep_search`]. Every other variant is local to one item or one
//! site: it is logged, the item or site is skipped, and the run continues.

use thiserror::Error;

/// Errors produced while fetching, rendering, or extracting a page.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Network or navigation failure for a given URL.
    #[error("failed to load {url}: {reason}")]
    PageLoad { url: String, reason: String },

    /// The server answered, but not with a success status.
    #[error("{url} answered with HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// Expected element(s) were absent from the page.
    #[error("no element matched `{selector}`")]
    SelectorMiss { selector: String },

    /// The page loaded but contained no usable text.
    #[error("no usable text found at {url}")]
    ExtractionEmpty { url: String },

    /// A browser-automation session could not be started or driven.
    #[error("browser session error: {0}")]
    Session(String),

    /// Configuration file could not be read or parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ScrapeError {
    pub fn page_load(url: &str, reason: impl ToString) -> Self {
        ScrapeError::PageLoad {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// `true` for failures that only cost the current item or site.
    pub fn is_local(&self) -> bool {
        !matches!(self, ScrapeError::Session(_) | ScrapeError::Config(_))
    }
}
