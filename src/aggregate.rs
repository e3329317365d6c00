//! Aggregation run: classify, scrape, fall back to search, rank.
//!
//! A run moves through fixed stages:
//!
//! 1. **Classify** the query ([`crate::classifier`])
//! 2. **Direct scrape** the technical catalog (at most 5 sites) and/or the news
//!    catalog (until 20 items), technical first
//! 3. **Search fallback** when fewer than 20 items are held: site-restricted
//!    search, then open search while fewer than 15 are held
//! 4. **Rank and truncate** to 20 ([`crate::rank`])
//!
//! The browser session is released exactly once when the run ends, whether
//! it finished normally or a stage panicked.

use crate::classifier::classify;
use crate::config::DeepSearchConfig;
use crate::error::ScrapeError;
use crate::fetch::{BrowserSession, Fetcher, HttpFetch, HttpFetcher, WebDriverSession};
use crate::models::{CatalogKind, QueryClass, ResultItem, ResultSet, SiteConfig};
use crate::rank::rank_and_truncate;
use crate::registry::Catalogs;
use crate::scrapers::direct::scrape_site;
use crate::scrapers::search::{freshen_query, open_search, site_restricted_search};
use crate::utils::search_date;
use futures::FutureExt;
use rand::seq::SliceRandom;
use std::panic::AssertUnwindSafe;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};

/// Upper bound on the returned result list.
pub const MAX_RESULTS: usize = 20;
/// Open search runs only while fewer items than this are held.
pub const OPEN_SEARCH_THRESHOLD: usize = 15;
/// Technical catalog sites tried per run.
pub const TECHNICAL_SOURCE_LIMIT: usize = 5;
/// Technical direct scraping stops once this many items are held.
pub const TECHNICAL_RESULT_TARGET: usize = 10;

/// One aggregation engine instance.
///
/// Owns its browser session. [`DeepSearch::aggregate`] consumes the instance,
/// so a session can serve exactly one run and concurrent runs need separate
/// instances.
pub struct DeepSearch<B, H> {
    fetcher: Fetcher<B, H>,
    catalogs: Catalogs,
    randomize: bool,
}

impl<B, H> DeepSearch<B, H>
where
    B: BrowserSession,
    H: HttpFetch,
{
    pub fn new(browser: B, http: H, config: &DeepSearchConfig) -> Self {
        Self {
            fetcher: Fetcher::new(browser, http, config),
            catalogs: Catalogs::default(),
            randomize: config.randomize_sources,
        }
    }

    /// Replace the built-in catalogs.
    pub fn with_catalogs(mut self, catalogs: Catalogs) -> Self {
        self.catalogs = catalogs;
        self
    }

    /// Run one aggregation for `query`.
    ///
    /// Never fails. Partial failures shrink the result; a total failure yields
    /// an empty list. The browser session is closed before this returns, also
    /// when a stage panicked.
    ///
    /// # Arguments
    ///
    /// * `query` - Raw user query
    ///
    /// # Returns
    ///
    /// At most [`MAX_RESULTS`] deduplicated items, best first.
    #[instrument(level = "info", skip(self))]
    pub async fn aggregate(self, query: &str) -> Vec<ResultItem> {
        let DeepSearch {
            mut fetcher,
            catalogs,
            randomize,
        } = self;
        let started = Instant::now();

        let outcome = AssertUnwindSafe(run(&mut fetcher, &catalogs, randomize, query))
            .catch_unwind()
            .await;

        if let Err(e) = fetcher.close().await {
            warn!(error = %e, "Failed to close browser session");
        }

        let elapsed = started.elapsed();
        match outcome {
            Ok(items) => {
                info!(count = items.len(), elapsed_ms = elapsed.as_millis() as u64, "Aggregation complete");
                items
            }
            Err(_) => {
                error!(elapsed_ms = elapsed.as_millis() as u64, "Aggregation aborted; returning no results");
                Vec::new()
            }
        }
    }
}

async fn run<B, H>(
    fetcher: &mut Fetcher<B, H>,
    catalogs: &Catalogs,
    randomize: bool,
    query: &str,
) -> Vec<ResultItem>
where
    B: BrowserSession,
    H: HttpFetch,
{
    let class = classify(query);
    info!(
        is_technical = class.is_technical,
        is_general_news = class.is_general_news,
        "Query classified"
    );

    let mut results = ResultSet::new();

    if class.is_technical {
        scrape_technical(fetcher, &catalogs.technical, randomize, query, &mut results).await;
    }
    if class.is_general_news {
        scrape_news(fetcher, &catalogs.news, randomize, query, &mut results).await;
    }

    if results.is_empty() {
        info!("Direct scraping produced nothing");
    }
    if results.len() < MAX_RESULTS {
        search_fallback(fetcher, catalogs, class, query, &mut results).await;
    }

    rank_and_truncate(results.into_vec(), class.is_technical, MAX_RESULTS)
}

#[instrument(level = "info", skip_all)]
async fn scrape_technical<B, H>(
    fetcher: &mut Fetcher<B, H>,
    sites: &[SiteConfig],
    randomize: bool,
    query: &str,
    results: &mut ResultSet,
) where
    B: BrowserSession,
    H: HttpFetch,
{
    for site in visit_order(sites, randomize).into_iter().take(TECHNICAL_SOURCE_LIMIT) {
        let items = scrape_site(fetcher, site, CatalogKind::Technical, query).await;
        let kept = results.extend(items);
        debug!(site = %site.key, kept, total = results.len(), "Technical site done");
        if results.len() >= TECHNICAL_RESULT_TARGET {
            break;
        }
    }
}

#[instrument(level = "info", skip_all)]
async fn scrape_news<B, H>(
    fetcher: &mut Fetcher<B, H>,
    sites: &[SiteConfig],
    randomize: bool,
    query: &str,
    results: &mut ResultSet,
) where
    B: BrowserSession,
    H: HttpFetch,
{
    for site in visit_order(sites, randomize) {
        let items = scrape_site(fetcher, site, CatalogKind::News, query).await;
        let kept = results.extend(items);
        debug!(site = %site.key, kept, total = results.len(), "News site done");
        if results.len() >= MAX_RESULTS {
            break;
        }
    }
}

async fn search_fallback<B, H>(
    fetcher: &mut Fetcher<B, H>,
    catalogs: &Catalogs,
    class: QueryClass,
    query: &str,
    results: &mut ResultSet,
) where
    B: BrowserSession,
    H: HttpFetch,
{
    let search_query = freshen_query(query, &search_date());
    info!(held = results.len(), %search_query, "Falling back to web search");

    site_restricted_search(
        fetcher,
        &catalogs.search,
        &search_query,
        class,
        results,
        MAX_RESULTS,
    )
    .await;

    if results.len() < OPEN_SEARCH_THRESHOLD {
        open_search(
            fetcher,
            &catalogs.search,
            &search_query,
            results,
            OPEN_SEARCH_THRESHOLD,
            MAX_RESULTS,
        )
        .await;
    }
}

/// Catalog order for one run, shuffled unless disabled.
fn visit_order(sites: &[SiteConfig], randomize: bool) -> Vec<&SiteConfig> {
    let mut order: Vec<&SiteConfig> = sites.iter().collect();
    if randomize {
        order.shuffle(&mut rand::rng());
    }
    order
}

/// Start a WebDriver session and run one aggregation for `query`.
///
/// The only error is failing to set up the HTTP client or the browser
/// session; everything after that degrades to fewer results.
pub async fn deep_search(
    query: &str,
    config: &DeepSearchConfig,
) -> Result<Vec<ResultItem>, ScrapeError> {
    let http = HttpFetcher::new(config)?;
    let browser = WebDriverSession::connect(config).await?;
    Ok(DeepSearch::new(browser, http, config).aggregate(query).await)
}
