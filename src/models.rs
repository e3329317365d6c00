//! Data models for scraped evidence and site configuration.
//!
//! This module defines the core data structures used throughout the crate:
//! - [`ResultItem`]: one unit of scraped evidence returned to the caller
//! - [`SiteConfig`]: how to scrape one external site's listing or search page
//! - [`CatalogKind`]: which catalog a site belongs to (news or technical)
//! - [`QueryClass`]: the two independent classification signals for a query

use crate::utils::title_case;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Suffix appended to the source label of items from the technical catalog.
pub const TECHNICAL_SUFFIX: &str = "(Technical)";

/// One scraped unit of evidence.
///
/// `title` and `link` are never empty for an item that reaches the aggregated
/// result set. `time` is a free-form recency label used only for relative
/// ranking. `content` may hold an error placeholder when extraction failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    pub title: String,
    pub link: String,
    pub source: String,
    pub time: String,
    pub content: String,
}

impl ResultItem {
    /// Whether this item was stamped as coming from a technical source.
    pub fn is_technical(&self) -> bool {
        self.source.contains(TECHNICAL_SUFFIX)
    }

    /// Deduplication key: the case-insensitive title.
    pub fn dedup_key(&self) -> String {
        self.title.trim().to_lowercase()
    }

    /// `true` when both required fields are present.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.link.trim().is_empty()
    }
}

/// The catalog a [`SiteConfig`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    News,
    Technical,
}

impl CatalogKind {
    /// Maximum number of result items taken from one listing page.
    pub fn items_per_site(self) -> usize {
        match self {
            CatalogKind::News => 5,
            CatalogKind::Technical => 3,
        }
    }

    /// Prefix of the synthesised recency label for direct-scraped items.
    pub fn recency_prefix(self) -> &'static str {
        match self {
            CatalogKind::News => "Recent",
            CatalogKind::Technical => "Technical Resource",
        }
    }
}

/// Declares how to scrape one external site.
///
/// `url` is either a fixed listing page or a search template containing a
/// `{query}` placeholder. Selector lists are ordered alternatives: the first
/// one that yields a usable value wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub key: String,
    pub url: String,
    pub result_item_selector: String,
    pub title_selector: Vec<String>,
    pub link_selector: Vec<String>,
    pub snippet_selector: Vec<String>,
    pub base_url: String,
}

impl SiteConfig {
    /// Human-readable name derived from the key: underscores become spaces and
    /// the result is title-cased (`"times_of_india"` → `"Times Of India"`).
    pub fn display_name(&self) -> String {
        title_case(&self.key.replace('_', " "))
    }

    /// Source label stamped on items scraped from this site.
    pub fn source_label(&self, kind: CatalogKind) -> String {
        match kind {
            CatalogKind::News => self.display_name(),
            CatalogKind::Technical => format!("{} {}", self.display_name(), TECHNICAL_SUFFIX),
        }
    }

    /// The concrete URL to load for `query`.
    pub fn page_url(&self, query: &str) -> String {
        fill_query(&self.url, query)
    }
}

/// Substitute the URL-encoded `query` into every `{query}` placeholder.
pub fn fill_query(template: &str, query: &str) -> String {
    template.replace("{query}", &urlencoding::encode(query.trim()))
}

/// Accumulator for one run's results.
///
/// Rejects incomplete items and items whose title case-insensitively equals
/// one already held. Two distinct stories sharing a headline are merged; the
/// same story under two headlines is kept twice.
#[derive(Debug, Default)]
pub struct ResultSet {
    items: Vec<ResultItem>,
    seen: HashSet<String>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `item` unless it is incomplete or a duplicate. Returns whether
    /// it was kept.
    pub fn push(&mut self, item: ResultItem) -> bool {
        if !item.is_complete() || !self.seen.insert(item.dedup_key()) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Append every item of `items`, returning how many were kept.
    pub fn extend(&mut self, items: impl IntoIterator<Item = ResultItem>) -> usize {
        let mut kept = 0;
        for item in items {
            if self.push(item) {
                kept += 1;
            }
        }
        kept
    }

    pub fn contains_title(&self, title: &str) -> bool {
        self.seen.contains(&title.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<ResultItem> {
        self.items
    }
}

/// Independent classification signals for one query. Both may be set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryClass {
    pub is_technical: bool,
    pub is_general_news: bool,
}
