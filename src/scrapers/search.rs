//! Generic search-engine fallback.
//!
//! Used when direct scraping under-fills the result budget:
//! - [`site_restricted_search`] queries the engine once per domain from the
//!   list matching the query class (`"<query> site:<domain>"`)
//! - [`open_search`] issues broader queries, including the news aggregator
//!
//! Result-page markup varies between engine variants, so containers are found
//! by scanning a prioritised candidate list and every field has nested
//! fallbacks.

use crate::extract::{element_text, extract_content, parse_selector, resolve_attr, resolve_text};
use crate::fetch::{BrowserSession, Fetcher, HttpFetch};
use crate::models::{fill_query, QueryClass, ResultItem, ResultSet, TECHNICAL_SUFFIX};
use crate::registry::SearchEngineConfig;
use crate::scrapers::resolve_link;
use crate::utils::{recency_label, title_case};
use scraper::{ElementRef, Html};
use tracing::{debug, info, instrument, warn};

/// Domains visited by site-restricted search.
pub const SITE_SEARCH_LIMIT: usize = 5;
/// Result cards read per site-restricted query.
pub const SITE_SEARCH_ITEMS: usize = 5;
/// Result cards read per open query.
pub const OPEN_SEARCH_ITEMS: usize = 20;

const UNTITLED: &str = "Untitled Article";
const DEFAULT_SOURCE: &str = "News Source";

/// One result card read off a search-engine page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub link: String,
    pub source: Option<String>,
    pub time: Option<String>,
}

/// Selectors and limits for reading one kind of result page.
#[derive(Debug, Clone, Copy)]
pub struct ResultPageProfile<'a> {
    pub containers: &'a [String],
    pub title: &'a [String],
    pub link: &'a [String],
    pub source: &'a [String],
    pub time: &'a [String],
    pub base_url: &'a str,
    pub limit: usize,
}

impl<'a> ResultPageProfile<'a> {
    pub fn site_restricted(engine: &'a SearchEngineConfig) -> Self {
        Self {
            containers: &engine.site_containers,
            title: &engine.site_title_selector,
            link: &engine.site_link_selector,
            source: &[],
            time: &engine.time_selector,
            base_url: &engine.base_url,
            limit: SITE_SEARCH_ITEMS,
        }
    }

    pub fn open(engine: &'a SearchEngineConfig) -> Self {
        Self {
            containers: &engine.open_containers,
            title: &engine.open_title_selector,
            link: &engine.open_link_selector,
            source: &engine.source_selector,
            time: &engine.time_selector,
            base_url: &engine.base_url,
            limit: OPEN_SEARCH_ITEMS,
        }
    }
}

/// Read result cards from a rendered search page.
///
/// The first container selector that matches anything decides the card set.
/// Cards without a followable link are skipped; cards without a title fall
/// back to their first line of text, then to a fixed placeholder.
pub fn parse_results(html: &str, page_url: &str, profile: ResultPageProfile<'_>) -> Vec<SearchHit> {
    let doc = Html::parse_document(html);
    let cards: Vec<ElementRef<'_>> = profile
        .containers
        .iter()
        .filter_map(|c| parse_selector(c))
        .map(|sel| doc.select(&sel).take(profile.limit).collect::<Vec<_>>())
        .find(|cards| !cards.is_empty())
        .unwrap_or_default();
    debug!(cards = cards.len(), "Located result cards");

    cards
        .into_iter()
        .filter_map(|card| {
            let href = resolve_attr(card, profile.link, "href")
                .or_else(|| resolve_attr(card, &["a".to_string()], "href"))?;
            let link = resolve_link(&href, profile.base_url, page_url)?;
            let title = resolve_text(card, profile.title)
                .or_else(|| first_line(card))
                .unwrap_or_else(|| UNTITLED.to_string());
            Some(SearchHit {
                title,
                link,
                source: resolve_text(card, profile.source),
                time: resolve_text(card, profile.time),
            })
        })
        .collect()
}

fn first_line(card: ElementRef<'_>) -> Option<String> {
    card.text()
        .flat_map(str::lines)
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(str::to_string)
        .or_else(|| {
            let all = element_text(card);
            (!all.is_empty()).then_some(all)
        })
}

/// Display label for a searched domain: `"www."` and the `.com`/`.in`/`.org`
/// suffix of the host are dropped and the rest is title-cased.
pub fn site_label(domain: &str, technical: bool) -> String {
    let domain = domain.trim_start_matches("www.");
    let (host, path) = match domain.find('/') {
        Some(idx) => domain.split_at(idx),
        None => (domain, ""),
    };
    let host = [".com", ".in", ".org"]
        .iter()
        .find_map(|tld| host.strip_suffix(tld))
        .unwrap_or(host);
    let label = title_case(&format!("{host}{path}"));
    if technical {
        format!("{label} {TECHNICAL_SUFFIX}")
    } else {
        label
    }
}

/// Append the query's freshness hints used for engine searches.
///
/// The bare queries "today news" and "latest news" become
/// "latest news today <date>"; any query without "latest" or "recent" gets
/// " latest" appended.
pub fn freshen_query(query: &str, today: &str) -> String {
    let lower = query.trim().to_lowercase();
    let mut q = if lower == "today news" || lower == "latest news" {
        format!("latest news today {today}")
    } else {
        query.trim().to_string()
    };
    let lower = q.to_lowercase();
    if !lower.contains("latest") && !lower.contains("recent") {
        q.push_str(" latest");
    }
    q
}

/// Search the engine restricted to each of the first [`SITE_SEARCH_LIMIT`]
/// domains for the query class.
///
/// Items are labelled with the domain (see [`site_label`]). Titles already
/// held are skipped before their content is fetched.
///
/// # Arguments
///
/// * `fetcher` - The run's fetcher
/// * `engine` - Search-engine profile supplying templates, selectors and domains
/// * `query` - Freshened query (see [`freshen_query`])
/// * `class` - Picks technical or news domains and the `(Technical)` suffix
/// * `results` - Accumulator new items are appended to
/// * `max_results` - Stop once `results` holds this many items
#[instrument(level = "info", skip_all, fields(technical = class.is_technical))]
pub async fn site_restricted_search<B, H>(
    fetcher: &mut Fetcher<B, H>,
    engine: &SearchEngineConfig,
    query: &str,
    class: QueryClass,
    results: &mut ResultSet,
    max_results: usize,
) where
    B: BrowserSession,
    H: HttpFetch,
{
    let domains = if class.is_technical {
        &engine.technical_domains
    } else {
        &engine.news_domains
    };

    for domain in domains.iter().take(SITE_SEARCH_LIMIT) {
        if results.len() >= max_results {
            break;
        }
        let url = fill_query(&engine.site_search_url, &format!("{query} site:{domain}"));
        let html = match fetcher.render_search(&url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(%domain, error = %e, "Site-restricted search failed");
                continue;
            }
        };
        let hits = parse_results(&html, &url, ResultPageProfile::site_restricted(engine));
        info!(%domain, hits = hits.len(), "Site-restricted search");

        let label = site_label(domain, class.is_technical);
        collect_hits(fetcher, hits, |_| label.clone(), results, max_results).await;
    }
}

/// Issue the engine's open queries until `threshold` items are held.
///
/// # Arguments
///
/// * `fetcher` - The run's fetcher
/// * `engine` - Search-engine profile; every `open_search_urls` template is tried in order
/// * `query` - Freshened query
/// * `results` - Accumulator new items are appended to
/// * `threshold` - No further engine is queried once this many items are held
/// * `max_results` - Hard cap on `results` within a single engine's hits
#[instrument(level = "info", skip_all)]
pub async fn open_search<B, H>(
    fetcher: &mut Fetcher<B, H>,
    engine: &SearchEngineConfig,
    query: &str,
    results: &mut ResultSet,
    threshold: usize,
    max_results: usize,
) where
    B: BrowserSession,
    H: HttpFetch,
{
    for template in &engine.open_search_urls {
        let url = fill_query(template, query);
        let html = match fetcher.render_page(&url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(%url, error = %e, "Open search failed");
                continue;
            }
        };
        let hits = parse_results(&html, &url, ResultPageProfile::open(engine));
        info!(%url, hits = hits.len(), "Open search");
        if hits.is_empty() {
            continue;
        }

        collect_hits(
            fetcher,
            hits,
            |hit| hit.source.clone().unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
            results,
            max_results,
        )
        .await;

        if results.len() >= threshold {
            break;
        }
    }
}

/// Fetch content for each new hit and append it, stopping at `max_results`.
/// Duplicate titles are dropped before their content is fetched.
async fn collect_hits<B, H>(
    fetcher: &mut Fetcher<B, H>,
    hits: Vec<SearchHit>,
    source_of: impl Fn(&SearchHit) -> String,
    results: &mut ResultSet,
    max_results: usize,
) where
    B: BrowserSession,
    H: HttpFetch,
{
    for hit in hits {
        if results.len() >= max_results {
            break;
        }
        if results.contains_title(&hit.title) {
            debug!(title = %hit.title, "Skipping duplicate title");
            continue;
        }
        let content = extract_content(fetcher, &hit.link).await;
        let source = source_of(&hit);
        results.push(ResultItem {
            time: hit.time.unwrap_or_else(|| recency_label("Recent")),
            title: hit.title,
            link: hit.link,
            source,
            content,
        });
    }
}
