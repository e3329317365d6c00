//! Direct scraping of catalog sites.
//!
//! Loads a site's listing (news) or search (technical) page, reads up to
//! [`CatalogKind::items_per_site`] result items with the site's selectors and
//! turns each into a [`ResultItem`].

use crate::error::ScrapeError;
use crate::extract::{extract_content, parse_selector, resolve_attr, resolve_text};
use crate::fetch::{BrowserSession, Fetcher, HttpFetch};
use crate::models::{CatalogKind, ResultItem, SiteConfig};
use crate::scrapers::resolve_link;
use crate::utils::recency_label;
use scraper::Html;
use tracing::{debug, info, instrument, warn};

/// Snippets longer than this (in characters) are used as content directly.
pub const SNIPPET_MIN_CHARS: usize = 150;

/// One result item read off a listing page, before content is fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub title: String,
    pub link: String,
    pub snippet: Option<String>,
}

/// Read up to `limit` entries from a rendered listing page.
///
/// Items without a title or a followable link are skipped. A page on which
/// the result-item selector matches nothing is a [`ScrapeError::SelectorMiss`].
pub fn parse_listing(
    html: &str,
    site: &SiteConfig,
    page_url: &str,
    limit: usize,
) -> Result<Vec<ListingEntry>, ScrapeError> {
    let miss = || ScrapeError::SelectorMiss {
        selector: site.result_item_selector.clone(),
    };
    let doc = Html::parse_document(html);
    let item_sel = parse_selector(&site.result_item_selector).ok_or_else(miss)?;
    let items: Vec<_> = doc.select(&item_sel).take(limit).collect();
    if items.is_empty() {
        return Err(miss());
    }

    let entries = items
        .into_iter()
        .filter_map(|item| {
            let Some(title) = resolve_text(item, &site.title_selector) else {
                debug!(site = %site.key, "Skipping item without title");
                return None;
            };
            let Some(link) = resolve_attr(item, &site.link_selector, "href")
                .and_then(|href| resolve_link(&href, &site.base_url, page_url))
            else {
                debug!(site = %site.key, %title, "Skipping item without link");
                return None;
            };
            let snippet = resolve_text(item, &site.snippet_selector);
            Some(ListingEntry { title, link, snippet })
        })
        .collect();
    Ok(entries)
}

/// Scrape one catalog site.
///
/// Never fails: a site that cannot be loaded or parsed contributes zero
/// items. Technical snippets longer than [`SNIPPET_MIN_CHARS`] stand in for
/// the article body; everything else goes through [`extract_content`].
///
/// # Arguments
///
/// * `fetcher` - The run's fetcher
/// * `site` - Catalog entry to visit
/// * `kind` - Catalog the site belongs to; sets the item cap and labels
/// * `query` - Raw user query, substituted into search-page templates
///
/// # Returns
///
/// Up to [`CatalogKind::items_per_site`] items, in page order.
#[instrument(level = "info", skip(fetcher, site, query), fields(site = %site.key))]
pub async fn scrape_site<B, H>(
    fetcher: &mut Fetcher<B, H>,
    site: &SiteConfig,
    kind: CatalogKind,
    query: &str,
) -> Vec<ResultItem>
where
    B: BrowserSession,
    H: HttpFetch,
{
    let url = site.page_url(query);
    let entries = match fetcher.render_page(&url).await {
        Ok(html) => parse_listing(&html, site, &url, kind.items_per_site()),
        Err(e) => Err(e),
    };
    let entries = match entries {
        Ok(entries) => entries,
        Err(e) => {
            warn!(%url, error = %e, "Site yielded no items");
            return Vec::new();
        }
    };

    let source = site.source_label(kind);
    let mut items = Vec::with_capacity(entries.len());
    for entry in entries {
        let content = match (kind, entry.snippet) {
            (CatalogKind::Technical, Some(snippet))
                if snippet.chars().count() > SNIPPET_MIN_CHARS =>
            {
                snippet
            }
            _ => extract_content(fetcher, &entry.link).await,
        };
        items.push(ResultItem {
            title: entry.title,
            link: entry.link,
            source: source.clone(),
            time: recency_label(kind.recency_prefix()),
            content,
        });
    }

    info!(count = items.len(), "Scraped site");
    items
}
