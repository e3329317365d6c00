//! Page fetching: a fast static path and a rendered-browser path.
//!
//! - [`http`]: the [`HttpFetch`] trait and its `reqwest` implementation
//! - [`browser`]: the [`BrowserSession`] trait and its WebDriver implementation
//!
//! [`Fetcher`] owns one of each for the lifetime of an aggregation run. All
//! calls go through `&mut self`, so the browser session is only ever driven by
//! one caller at a time.

pub mod browser;
pub mod http;

pub use browser::{BrowserSession, WebDriverSession};
pub use http::{HttpFetch, HttpFetcher};

use crate::config::DeepSearchConfig;
use crate::error::ScrapeError;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, instrument};

/// Exclusive owner of the run's browser session and HTTP client.
pub struct Fetcher<B, H> {
    browser: B,
    http: H,
    page_load_timeout: Duration,
    page_settle: Duration,
    search_settle: Duration,
}

impl<B, H> Fetcher<B, H>
where
    B: BrowserSession,
    H: HttpFetch,
{
    pub fn new(browser: B, http: H, config: &DeepSearchConfig) -> Self {
        Self {
            browser,
            http,
            page_load_timeout: config.page_load_timeout(),
            page_settle: config.page_settle(),
            search_settle: config.search_settle(),
        }
    }

    /// Static GET through the lightweight client.
    pub async fn fetch_static(&self, url: &str) -> Result<String, ScrapeError> {
        self.http.fetch_html(url).await
    }

    /// Render a listing or article page and return its DOM.
    pub async fn render_page(&mut self, url: &str) -> Result<String, ScrapeError> {
        let settle = self.page_settle;
        self.render(url, settle).await
    }

    /// Render a search-engine result page and return its DOM.
    pub async fn render_search(&mut self, url: &str) -> Result<String, ScrapeError> {
        let settle = self.search_settle;
        self.render(url, settle).await
    }

    /// Navigate, wait `settle` for client-side rendering, then read the DOM.
    #[instrument(level = "debug", skip(self, settle), fields(settle_ms = settle.as_millis() as u64))]
    async fn render(&mut self, url: &str, settle: Duration) -> Result<String, ScrapeError> {
        timeout(self.page_load_timeout, self.browser.navigate(url))
            .await
            .map_err(|_| ScrapeError::page_load(url, "navigation timed out"))??;

        if !settle.is_zero() {
            sleep(settle).await;
        }

        let html = self.browser.page_source().await?;
        debug!(bytes = html.len(), "Rendered page");
        Ok(html)
    }

    /// Release the browser session. Consumes the fetcher.
    pub async fn close(self) -> Result<(), ScrapeError> {
        self.browser.close().await
    }
}
