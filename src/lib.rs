//! # Deep Search
//!
//! A multi-source web aggregation engine. Given a free-form query it
//! scrapes curated news and technical sites, falls back to a web search
//! engine when those under-deliver, and returns at most 20 deduplicated,
//! ranked items with extracted article text, ready to ground a chat answer.
//!
//! ## Features
//!
//! - Keyword and pattern based query classification (technical / general news)
//! - Direct scraping of a catalog of news sites and technical sites
//! - Site-restricted and open web-search fallback
//! - Three-tier article extraction (static HTTP, rendered page, paragraph fallback)
//! - Ranking by source preference, then by recency keywords
//!
//! ## Usage
//!
//! ```no_run
//! # async fn run() -> Result<(), deep_search::ScrapeError> {
//! let config = deep_search::DeepSearchConfig::default();
//! let items = deep_search::deep_search("latest news today", &config).await?;
//! for item in &items {
//!     println!("{} ({})", item.title, item.source);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! One run of [`DeepSearch::aggregate`] owns one browser session:
//! 1. **Classify**: decide which catalogs apply
//! 2. **Direct scrape**: technical catalog first, then the news catalog
//! 3. **Search fallback**: site-restricted, then open search
//! 4. **Rank**: order and cut to 20

pub mod aggregate;
pub mod classifier;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod models;
pub mod prompt;
pub mod rank;
pub mod registry;
pub mod scrapers;
pub mod utils;

pub use aggregate::{deep_search, DeepSearch, MAX_RESULTS};
pub use config::DeepSearchConfig;
pub use error::ScrapeError;
pub use fetch::{BrowserSession, HttpFetch, HttpFetcher, WebDriverSession};
pub use models::{CatalogKind, QueryClass, ResultItem, SiteConfig};
pub use registry::{Catalogs, SearchEngineConfig};
