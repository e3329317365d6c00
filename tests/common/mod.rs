//! In-memory browser and HTTP doubles shared by the integration tests.

#![allow(dead_code)]

use deep_search::models::SiteConfig;
use deep_search::registry::{Catalogs, SearchEngineConfig};
use deep_search::{BrowserSession, DeepSearchConfig, HttpFetch, ScrapeError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const EMPTY_PAGE: &str = "<html><body></body></html>";

/// Browser double serving canned DOMs by URL prefix (longest prefix wins).
/// Unknown URLs render as an empty page.
#[derive(Default)]
pub struct MockBrowser {
    pages: Vec<(String, String)>,
    failing: Vec<String>,
    panicking: Option<String>,
    current: Option<String>,
    closes: Arc<AtomicUsize>,
    visits: Arc<Mutex<Vec<String>>>,
}

impl MockBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, prefix: &str, html: impl Into<String>) -> Self {
        self.pages.push((prefix.to_string(), html.into()));
        self
    }

    /// Navigation to any URL under `prefix` fails.
    pub fn failing(mut self, prefix: &str) -> Self {
        self.failing.push(prefix.to_string());
        self
    }

    /// Navigation to any URL under `prefix` panics.
    pub fn panicking(mut self, prefix: &str) -> Self {
        self.panicking = Some(prefix.to_string());
        self
    }

    pub fn close_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.closes)
    }

    pub fn visit_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.visits)
    }
}

impl BrowserSession for MockBrowser {
    async fn navigate(&mut self, url: &str) -> Result<(), ScrapeError> {
        self.visits.lock().unwrap().push(url.to_string());
        if let Some(prefix) = &self.panicking {
            if url.starts_with(prefix.as_str()) {
                panic!("browser crashed on {url}");
            }
        }
        if self.failing.iter().any(|p| url.starts_with(p.as_str())) {
            return Err(ScrapeError::page_load(url, "connection reset"));
        }
        self.current = Some(url.to_string());
        Ok(())
    }

    async fn page_source(&mut self) -> Result<String, ScrapeError> {
        let Some(url) = &self.current else {
            return Err(ScrapeError::page_load("about:blank", "no page loaded"));
        };
        let html = self
            .pages
            .iter()
            .filter(|(prefix, _)| url.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, html)| html.clone())
            .unwrap_or_else(|| EMPTY_PAGE.to_string());
        Ok(html)
    }

    async fn close(self) -> Result<(), ScrapeError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// HTTP double serving exact URLs; anything else is a 404.
#[derive(Default)]
pub struct MockHttp {
    pages: HashMap<String, String>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), html.into());
        self
    }

    pub fn request_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.requests)
    }
}

impl HttpFetch for MockHttp {
    async fn fetch_html(&self, url: &str) -> Result<String, ScrapeError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| ScrapeError::HttpStatus {
                url: url.to_string(),
                status: 404,
            })
    }
}

/// Defaults with no settle delays and a fixed catalog order.
pub fn test_config() -> DeepSearchConfig {
    DeepSearchConfig {
        page_settle_ms: 0,
        search_settle_ms: 0,
        randomize_sources: false,
        ..DeepSearchConfig::default()
    }
}

/// A listing-page site at `https://<key>.test/latest`.
pub fn news_site(key: &str) -> SiteConfig {
    SiteConfig {
        key: key.to_string(),
        url: format!("https://{key}.test/latest"),
        result_item_selector: ".story".to_string(),
        title_selector: vec!["h2".to_string()],
        link_selector: vec!["a".to_string()],
        snippet_selector: vec![".summary".to_string()],
        base_url: format!("https://{key}.test"),
    }
}

/// A search-page site at `https://<key>.test/search?q=<query>`.
pub fn technical_site(key: &str) -> SiteConfig {
    SiteConfig {
        url: format!("https://{key}.test/search?q={{query}}"),
        ..news_site(key)
    }
}

/// Search engine rooted at `https://search.test`, with one open-search template.
pub fn test_engine() -> SearchEngineConfig {
    SearchEngineConfig {
        site_search_url: "https://search.test/site?q={query}".to_string(),
        open_search_urls: vec!["https://search.test/open?q={query}".to_string()],
        base_url: "https://search.test".to_string(),
        technical_domains: vec!["docs.test".to_string()],
        news_domains: vec!["alpha.test".to_string()],
        ..SearchEngineConfig::default()
    }
}

pub fn catalogs(news: Vec<SiteConfig>, technical: Vec<SiteConfig>) -> Catalogs {
    Catalogs {
        news,
        technical,
        search: test_engine(),
    }
}

/// Listing markup with one `.story` card per `(title, href, summary)`.
pub fn listing(stories: &[(&str, &str, Option<&str>)]) -> String {
    let cards: String = stories
        .iter()
        .map(|(title, href, summary)| {
            let summary = summary
                .map(|s| format!(r#"<p class="summary">{s}</p>"#))
                .unwrap_or_default();
            format!(r#"<div class="story"><h2>{title}</h2><a href="{href}">read</a>{summary}</div>"#)
        })
        .collect();
    format!("<html><body>{cards}</body></html>")
}

/// Article markup whose `<article>` holds `body` as one paragraph.
pub fn article(body: &str) -> String {
    format!("<html><body><nav>menu</nav><article><p>{body}</p></article></body></html>")
}
