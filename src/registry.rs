//! Static site catalogs and search-engine profiles.
//!
//! Every literal selector string used by the scrapers lives here, so the
//! control logic in [`crate::aggregate`] and [`crate::scrapers`] never embeds
//! markup assumptions of its own.
//!
//! # Catalogs
//!
//! | Catalog | Sites | Page kind |
//! |---------|-------|-----------|
//! | News | Times of India, Hindustan Times, The Hindu, NDTV, India Today | Listing page |
//! | Technical | GeeksforGeeks, Javatpoint, Tutorialspoint, W3Schools, Stack Overflow, GitHub, MDN, freeCodeCamp, DEV, Python docs | Search page |
//!
//! The tables are built once on first use and never mutated.

use crate::models::SiteConfig;
use once_cell::sync::Lazy;

fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn site(
    key: &str,
    url: &str,
    result_item_selector: &str,
    title_selector: &[&str],
    link_selector: &[&str],
    snippet_selector: &[&str],
    base_url: &str,
) -> SiteConfig {
    SiteConfig {
        key: key.to_string(),
        url: url.to_string(),
        result_item_selector: result_item_selector.to_string(),
        title_selector: list(title_selector),
        link_selector: list(link_selector),
        snippet_selector: list(snippet_selector),
        base_url: base_url.to_string(),
    }
}

/// Listing pages of the national news outlets scraped for general-news queries.
pub static NEWS_SITES: Lazy<Vec<SiteConfig>> = Lazy::new(|| {
    vec![
        site(
            "times_of_india",
            "https://timesofindia.indiatimes.com/india",
            ".w_tle, .list5 li, .w_img_title",
            &["h3", "a span", "figcaption"],
            &["a"],
            &[],
            "https://timesofindia.indiatimes.com",
        ),
        site(
            "hindustan_times",
            "https://www.hindustantimes.com/latest-news",
            ".hdg3, .media, .storyCard, .cartHolder",
            &["h3", ".hdg3-text", ".media-heading"],
            &["a"],
            &[],
            "https://www.hindustantimes.com",
        ),
        site(
            "the_hindu",
            "https://www.thehindu.com/latest-news/",
            ".element, .story-card, .story-card-33, .ES2-100x4-text1",
            &["h3", ".title", ".card-title"],
            &["a"],
            &[],
            "https://www.thehindu.com",
        ),
        site(
            "ndtv",
            "https://www.ndtv.com/india",
            ".news_item, .lisingNews, .new_storylisting_img, .src_itm-ptb",
            &["h2", ".newsHdng", ".item-title"],
            &["a"],
            &[],
            "https://www.ndtv.com",
        ),
        site(
            "india_today",
            "https://www.indiatoday.in/india",
            ".detail, .B1S3_story__card, .catagory-listing, .view-content",
            &[".title", "h3", ".section_title"],
            &["a"],
            &[],
            "https://www.indiatoday.in",
        ),
    ]
});

/// Search pages of technical-learning sites scraped for technical queries.
///
/// Each link list ends with a bare `a` so that a result with an unexpected
/// title markup still yields its first anchor.
pub static TECHNICAL_SITES: Lazy<Vec<SiteConfig>> = Lazy::new(|| {
    vec![
        site(
            "geeksforgeeks",
            "https://www.geeksforgeeks.org/search/?q={query}",
            ".article-card, .gfg_home_page_article_card, .g-card, .gs-webResult",
            &["a.gs-title", ".title", "h2", ".head"],
            &["a.gs-title", ".title a", "h2 a", "a.head", "a"],
            &[".gs-snippet", ".content", ".entry-content", ".text"],
            "https://www.geeksforgeeks.org",
        ),
        site(
            "javatpoint",
            "https://www.javatpoint.com/search.php?search={query}",
            "tr.mx-auto, .gsc-webResult, .gs-webResult",
            &["a.gsc-result-info-title", ".gs-title", ".link-title", "h3"],
            &["a.gsc-result-info-title", ".gs-title", "h3 a", "a"],
            &[".gs-snippet", ".gsc-table-result", ".overview"],
            "https://www.javatpoint.com",
        ),
        site(
            "tutorialspoint",
            "https://www.tutorialspoint.com/search.htm?search={query}",
            ".gsc-webResult, .result-box, .search_result",
            &[".gs-title", ".result-title", "h3 a"],
            &[".gs-title a", ".result-title a", "a"],
            &[".gs-snippet", ".result-text"],
            "https://www.tutorialspoint.com",
        ),
        site(
            "w3schools",
            "https://www.w3schools.com/search.php?q={query}",
            ".search_item, .gs-webResult, .ws-table-all tr",
            &[".search_item_title", ".gs-title", "td a"],
            &[".search_item_title a", ".gs-title a", "a"],
            &[".search_item_text", ".gs-snippet"],
            "https://www.w3schools.com",
        ),
        site(
            "stackoverflow",
            "https://stackoverflow.com/search?q={query}",
            ".s-post-summary, .question-summary, .search-result",
            &["h3 a", ".question-hyperlink", ".result-link a"],
            &["h3 a", ".question-hyperlink", ".result-link a", "a"],
            &[
                ".s-post-summary--content-excerpt",
                ".excerpt",
                ".result-excerpt",
            ],
            "https://stackoverflow.com",
        ),
        site(
            "github",
            "https://github.com/search?q={query}&type=repositories",
            ".repo-list-item, .hx_hit-repo, .Code-searchResults-result",
            &["a.v-align-middle", ".hx_hit-repo-path", "h3 a"],
            &["a.v-align-middle", ".hx_hit-repo-path", "h3 a", "a"],
            &["p.mb-1", ".hx_hit-repo-desc", ".description"],
            "https://github.com",
        ),
        site(
            "mdn",
            "https://developer.mozilla.org/en-US/search?q={query}",
            ".result, .search-result, .search-results-entry",
            &[".result-title", "h3 a", ".entry-title"],
            &[".result-title a", "h3 a", ".entry-title a", "a"],
            &[".result-excerpt", ".search-item-excerpt", ".entry-summary"],
            "https://developer.mozilla.org",
        ),
        site(
            "freecodecamp",
            "https://www.freecodecamp.org/news/?s={query}",
            "article, .article-card, .post-card",
            &["h2.title", ".post-card-title", ".post-title"],
            &["h2.title a", ".post-card-title a", "a"],
            &[".excerpt", ".post-card-excerpt", ".post-excerpt"],
            "https://www.freecodecamp.org",
        ),
        site(
            "dev_to",
            "https://dev.to/search?q={query}",
            ".crayons-story, .search-results-item, .single-article",
            &["h2 a", ".crayons-story__title a", ".title a"],
            &["h2 a", ".crayons-story__title a", "a"],
            &[".crayons-story__snippet", ".body", ".content"],
            "https://dev.to",
        ),
        site(
            "python_docs",
            "https://docs.python.org/3/search.html?q={query}&check_keywords=yes&area=default",
            "ul.search li, .search-result, .search-item",
            &["a", ".search-title", ".result-title"],
            &["a", ".search-title a"],
            &[".context", ".search-summary", ".result-context"],
            "https://docs.python.org/3",
        ),
    ]
});

/// Domains used for site-restricted search when the query is technical.
pub static TECHNICAL_DOMAINS: &[&str] = &[
    "geeksforgeeks.org",
    "javatpoint.com",
    "tutorialspoint.com",
    "w3schools.com",
    "stackoverflow.com",
    "github.com",
    "developer.mozilla.org",
    "freecodecamp.org",
    "dev.to",
    "docs.python.org",
];

/// Domains used for site-restricted search for every other query.
pub static NEWS_DOMAINS: &[&str] = &[
    "timesofindia.indiatimes.com",
    "hindustantimes.com",
    "thehindu.com",
    "ndtv.com",
    "indiatoday.in",
    "indianexpress.com",
    "news18.com",
    "economictimes.indiatimes.com",
    "bbc.com/news/world/asia/india",
    "livemint.com",
];

/// Lowercase fragments of source names that earn the "preferred outlet" tier.
pub static PREFERRED_OUTLETS: &[&str] = &[
    "geeksforgeeks",
    "javatpoint",
    "tutorialspoint",
    "w3schools",
    "stackoverflow",
    "github",
    "mdn",
    "mozilla",
    "freecodecamp",
    "python",
    "times of india",
    "hindustan",
    "hindu",
    "ndtv",
    "india today",
];

/// Markup profile of a web search engine's result pages.
///
/// Container lists are prioritised: the first selector that matches at least
/// one element on the page decides the result set.
#[derive(Debug, Clone)]
pub struct SearchEngineConfig {
    /// Template for site-restricted queries; `{query}` receives `"<q> site:<domain>"`.
    pub site_search_url: String,
    /// Templates for open (unrestricted) searches, tried in order.
    pub open_search_urls: Vec<String>,
    /// Base for resolving relative result links.
    pub base_url: String,
    pub site_containers: Vec<String>,
    pub open_containers: Vec<String>,
    pub site_title_selector: Vec<String>,
    pub open_title_selector: Vec<String>,
    pub site_link_selector: Vec<String>,
    pub open_link_selector: Vec<String>,
    pub source_selector: Vec<String>,
    pub time_selector: Vec<String>,
    pub technical_domains: Vec<String>,
    pub news_domains: Vec<String>,
}

impl Default for SearchEngineConfig {
    fn default() -> Self {
        SEARCH_ENGINE.clone()
    }
}

/// News search on Google plus the Google News aggregator.
pub static SEARCH_ENGINE: Lazy<SearchEngineConfig> = Lazy::new(|| {
    let site_containers = [
        ".dbsr", ".g", ".mnr-c", "article", ".ddle5", ".WlydOe", ".n6jlAc",
    ];
    let open_containers = [
        ".dbsr", ".g", ".mnr-c", "article", ".ddle5", ".WlydOe", ".n6jlAc", ".NiLAwe", ".DY5T1d",
        ".qLBgNd", ".IBr9hb",
    ];
    SearchEngineConfig {
        site_search_url: "https://www.google.com/search?q={query}&tbm=nws".to_string(),
        open_search_urls: list(&[
            "https://www.google.com/search?q={query}&tbm=nws",
            "https://news.google.com/search?q={query}&hl=en-US",
        ]),
        base_url: "https://www.google.com".to_string(),
        site_containers: list(&site_containers),
        open_containers: list(&open_containers),
        site_title_selector: list(&["div.nDgy9d", "h3", "h4", ".JheGif", ".DY5T1d", ".vF3A6c"]),
        open_title_selector: list(&[
            "div.nDgy9d", "h3", "h4", ".JheGif", ".DY5T1d", ".vF3A6c", ".DFN7ze", ".RD0gLb",
        ]),
        site_link_selector: list(&["a", ".WlydOe", ".DY5T1d", ".tHmfQe"]),
        open_link_selector: list(&["a", ".WlydOe", ".DY5T1d", ".tHmfQe", ".VDXfz", ".SFllF"]),
        source_selector: list(&[
            ".XTjFC.WF4CUc", ".UPmit", ".CEMjEf", ".TVtOme", "span", ".NUnG9d", ".wEwyrc",
            ".vr1PYe",
        ]),
        time_selector: list(&[".WG9SHc span", ".ZE0LJd", ".LfVVr", "time", ".OSrXXb"]),
        technical_domains: list(TECHNICAL_DOMAINS),
        news_domains: list(NEWS_DOMAINS),
    }
});

/// The full set of catalogs one aggregation run draws from.
#[derive(Debug, Clone)]
pub struct Catalogs {
    pub news: Vec<SiteConfig>,
    pub technical: Vec<SiteConfig>,
    pub search: SearchEngineConfig,
}

impl Default for Catalogs {
    fn default() -> Self {
        Self {
            news: NEWS_SITES.clone(),
            technical: TECHNICAL_SITES.clone(),
            search: SEARCH_ENGINE.clone(),
        }
    }
}
