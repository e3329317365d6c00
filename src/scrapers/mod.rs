//! Site scrapers for the aggregation run.
//!
//! Two strategies feed the result set:
//!
//! 1. **Direct** ([`direct`]): visit a catalog site's listing or search page
//!    and read its result items with the site's own selectors.
//! 2. **Search** ([`search`]): query a web search engine, either restricted to
//!    one domain at a time or unrestricted, and read its result cards.
//!
//! # Common Patterns
//!
//! Both strategies:
//! - Render pages through the run's single browser session
//! - Parse the rendered DOM synchronously, then fetch article content item by item
//! - Treat every page-level or item-level failure as a skip, never an abort

pub mod direct;
pub mod search;

use url::Url;

/// Turn an `href` found on `page_url` into an absolute link.
///
/// Site-relative links (`/path`) are prefixed with `base_url`. Links that
/// cannot be followed (`#fragment`, `javascript:`, `mailto:`) yield `None`.
pub fn resolve_link(href: &str, base_url: &str, page_url: &str) -> Option<String> {
    let href = href.trim();
    let lower = href.to_ascii_lowercase();
    if href.is_empty()
        || href.starts_with('#')
        || lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
    {
        return None;
    }
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Some(href.to_string());
    }
    if href.starts_with("//") {
        return Some(format!("https:{href}"));
    }
    if href.starts_with('/') {
        return Some(format!("{}{}", base_url.trim_end_matches('/'), href));
    }
    Url::parse(page_url)
        .and_then(|base| base.join(href))
        .map(|u| u.to_string())
        .ok()
}
