mod common;

use common::{
    article, catalogs, listing, news_site, technical_site, test_config, MockBrowser, MockHttp,
};
use deep_search::models::TECHNICAL_SUFFIX;
use deep_search::rank::rank_key;
use deep_search::{DeepSearch, ResultItem, MAX_RESULTS};
use std::collections::HashSet;
use std::sync::atomic::Ordering;

const NEWS_KEYS: [&str; 5] = ["alpha", "beta", "gamma", "delta", "epsilon"];

fn display(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Every news site lists two stories, each with a readable article.
fn news_fixture() -> (MockBrowser, MockHttp) {
    let mut browser = MockBrowser::new();
    let mut http = MockHttp::new();
    for key in NEWS_KEYS {
        let name = display(key);
        let t1 = format!("{name} story one");
        let t2 = format!("{name} story two");
        browser = browser.page(
            &format!("https://{key}.test/latest"),
            listing(&[(t1.as_str(), "/s1", None), (t2.as_str(), "/s2", None)]),
        );
        http = http
            .page(&format!("https://{key}.test/s1"), article(&format!("{name} body one")))
            .page(&format!("https://{key}.test/s2"), article(&format!("{name} body two")));
    }
    (browser, http)
}

fn news_catalogs() -> deep_search::Catalogs {
    catalogs(NEWS_KEYS.iter().map(|k| news_site(k)).collect(), Vec::new())
}

fn assert_ranked(items: &[ResultItem], technical: bool) {
    let keys: Vec<(u8, u8)> = items.iter().map(|i| rank_key(i, technical)).collect();
    assert!(keys.windows(2).all(|w| w[0] <= w[1]), "not sorted: {keys:?}");
}

#[tokio::test]
async fn test_general_news_query_end_to_end() {
    let (browser, http) = news_fixture();
    let closes = browser.close_counter();
    let visits = browser.visit_log();

    let items = DeepSearch::new(browser, http, &test_config())
        .with_catalogs(news_catalogs())
        .aggregate("latest news today")
        .await;

    assert_eq!(items.len(), 10);
    assert!(items.len() <= MAX_RESULTS);
    assert!(items.iter().all(|i| !i.source.contains(TECHNICAL_SUFFIX)));
    assert!(items.iter().all(|i| !i.title.is_empty() && !i.link.is_empty()));

    let titles: HashSet<String> = items.iter().map(|i| i.title.to_lowercase()).collect();
    assert_eq!(titles.len(), items.len());
    assert_ranked(&items, false);

    let alpha = items
        .iter()
        .find(|i| i.title == "Alpha story one")
        .expect("alpha story present");
    assert_eq!(alpha.link, "https://alpha.test/s1");
    assert_eq!(alpha.source, "Alpha");
    assert_eq!(alpha.content, "Alpha body one");
    assert!(alpha.time.starts_with("Recent - "));

    // Ten items is under budget, so both search stages ran.
    let visits = visits.lock().unwrap();
    assert!(visits.iter().any(|u| u.starts_with("https://search.test/site?q=")));
    assert!(visits.iter().any(|u| u.starts_with("https://search.test/open?q=")));
    assert_eq!(closes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_duplicate_titles_across_sites_are_dropped() {
    let browser = MockBrowser::new()
        .page(
            "https://alpha.test/latest",
            listing(&[("Budget Passed In Parliament", "/budget", None)]),
        )
        .page(
            "https://beta.test/latest",
            listing(&[
                ("budget passed in parliament", "/budget-2", None),
                ("Monsoon arrives early", "/rain", None),
            ]),
        );
    let http = MockHttp::new()
        .page("https://alpha.test/budget", article("Alpha coverage"))
        .page("https://beta.test/budget-2", article("Beta coverage"))
        .page("https://beta.test/rain", article("Rain coverage"));
    let requests = http.request_log();

    let items = DeepSearch::new(browser, http, &test_config())
        .with_catalogs(catalogs(vec![news_site("alpha"), news_site("beta")], Vec::new()))
        .aggregate("breaking news")
        .await;

    let budget: Vec<&ResultItem> = items
        .iter()
        .filter(|i| i.title.to_lowercase() == "budget passed in parliament")
        .collect();
    assert_eq!(budget.len(), 1);
    assert_eq!(budget[0].source, "Alpha");
    assert_eq!(budget[0].content, "Alpha coverage");
    assert!(items.iter().any(|i| i.title == "Monsoon arrives early"));

    // The direct scraper fetches before merging; the duplicate's body is discarded.
    assert!(requests
        .lock()
        .unwrap()
        .contains(&"https://beta.test/budget-2".to_string()));
    assert!(items.iter().all(|i| i.content != "Beta coverage"));
}

#[tokio::test]
async fn test_failing_site_is_skipped() {
    let (browser, http) = news_fixture();
    let browser = browser.failing("https://gamma.test/");
    let closes = browser.close_counter();

    let items = DeepSearch::new(browser, http, &test_config())
        .with_catalogs(news_catalogs())
        .aggregate("top news")
        .await;

    assert_eq!(items.len(), 8);
    assert!(items.iter().all(|i| i.source != "Gamma"));
    assert_eq!(closes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_panic_mid_run_still_closes_session() {
    let (browser, http) = news_fixture();
    let browser = browser.panicking("https://beta.test/latest");
    let closes = browser.close_counter();

    let items = DeepSearch::new(browser, http, &test_config())
        .with_catalogs(news_catalogs())
        .aggregate("latest news today")
        .await;

    assert!(items.is_empty());
    assert_eq!(closes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unreachable_everything_yields_empty_list() {
    let browser = MockBrowser::new().failing("https://");
    let closes = browser.close_counter();

    let items = DeepSearch::new(browser, MockHttp::new(), &test_config())
        .with_catalogs(news_catalogs())
        .aggregate("india news")
        .await;

    assert!(items.is_empty());
    assert_eq!(closes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_technical_query_uses_snippets_and_ranks_technical_first() {
    let snippet = "Decorators wrap a function to extend its behaviour without modifying it. "
        .repeat(3);
    let browser = MockBrowser::new()
        .page(
            "https://docs.test/search",
            listing(&[
                ("Primer on Python decorators", "/d1", Some(snippet.as_str())),
                ("Decorator factories", "/d2", Some(snippet.as_str())),
                ("Short answer", "/d3", Some("Too short to stand in for content.")),
            ]),
        )
        .page(
            "https://search.test/open",
            r#"<html><body>
                <div class="g">
                    <a href="https://news.test/python-release"><h3>New Python release announced</h3></a>
                    <span class="UPmit">NDTV</span>
                    <time>5 min ago</time>
                </div>
            </body></html>"#,
        );
    let http = MockHttp::new()
        .page("https://docs.test/d3", article("Full decorator walkthrough"))
        .page("https://news.test/python-release", article("Release notes"));
    let requests = http.request_log();

    let items = DeepSearch::new(browser, http, &test_config())
        .with_catalogs(catalogs(Vec::new(), vec![technical_site("docs")]))
        .aggregate("python decorators tutorial")
        .await;

    assert_eq!(items.len(), 4);
    assert_ranked(&items, true);

    let primer = items
        .iter()
        .find(|i| i.title == "Primer on Python decorators")
        .expect("primer present");
    assert_eq!(primer.content, snippet.trim());
    assert_eq!(primer.source, format!("Docs {TECHNICAL_SUFFIX}"));
    assert!(primer.time.starts_with("Technical Resource - "));

    let short = items.iter().find(|i| i.title == "Short answer").expect("short present");
    assert_eq!(short.content, "Full decorator walkthrough");

    let requests = requests.lock().unwrap();
    assert!(!requests.iter().any(|u| u == "https://docs.test/d1" || u == "https://docs.test/d2"));

    let last = items.last().expect("non-empty");
    assert_eq!(last.title, "New Python release announced");
    assert_eq!(last.source, "NDTV");
    assert_eq!(last.time, "5 min ago");
    assert!(items[..3].iter().all(|i| i.is_technical()));
}

/// `count` stories on `https://<key>.test`, each with a readable article.
fn stocked_site(
    browser: MockBrowser,
    http: MockHttp,
    key: &str,
    listing_path: &str,
    count: usize,
    snippet: Option<&str>,
) -> (MockBrowser, MockHttp) {
    let titles: Vec<String> = (1..=count).map(|n| format!("{key} story {n}")).collect();
    let paths: Vec<String> = (1..=count).map(|n| format!("/s{n}")).collect();
    let stories: Vec<(&str, &str, Option<&str>)> = titles
        .iter()
        .zip(&paths)
        .map(|(t, p)| (t.as_str(), p.as_str(), snippet))
        .collect();
    let browser = browser.page(&format!("https://{key}.test/{listing_path}"), listing(&stories));
    let http = paths.iter().fold(http, |http, p| {
        http.page(&format!("https://{key}.test{p}"), article(&format!("{key} body {p}")))
    });
    (browser, http)
}

fn count_visits(visits: &[String], pattern: &str) -> usize {
    visits.iter().filter(|u| u.contains(pattern)).count()
}

#[tokio::test]
async fn test_news_scraping_stops_once_budget_is_full() {
    let keys = ["n1", "n2", "n3", "n4", "n5", "n6"];
    let (mut browser, mut http) = (MockBrowser::new(), MockHttp::new());
    for key in keys {
        (browser, http) = stocked_site(browser, http, key, "latest", 5, None);
    }
    let visits = browser.visit_log();

    let items = DeepSearch::new(browser, http, &test_config())
        .with_catalogs(catalogs(keys.iter().map(|k| news_site(k)).collect(), Vec::new()))
        .aggregate("latest news today")
        .await;

    assert_eq!(items.len(), MAX_RESULTS);
    let visits = visits.lock().unwrap();
    assert_eq!(count_visits(&visits, ".test/latest"), 4);
    assert_eq!(count_visits(&visits, "search.test"), 0);
}

#[tokio::test]
async fn test_technical_scraping_stops_at_result_target() {
    let keys = ["t1", "t2", "t3", "t4", "t5", "t6", "t7"];
    let snippet = "A long enough explanation of the topic to be used as content as is. ".repeat(3);
    let (mut browser, mut http) = (MockBrowser::new(), MockHttp::new());
    for key in keys {
        (browser, http) = stocked_site(browser, http, key, "search", 3, Some(snippet.as_str()));
    }
    let visits = browser.visit_log();

    let items = DeepSearch::new(browser, http, &test_config())
        .with_catalogs(catalogs(Vec::new(), keys.iter().map(|k| technical_site(k)).collect()))
        .aggregate("python decorators tutorial")
        .await;

    // 9 items after three sites, 12 after the fourth.
    assert_eq!(items.len(), 12);
    let visits = visits.lock().unwrap();
    assert_eq!(count_visits(&visits, ".test/search?q="), 4);
    assert!(visits.iter().any(|u| u.starts_with("https://t4.test/search")));
    assert!(!visits.iter().any(|u| u.starts_with("https://t5.test/")));
}

#[tokio::test]
async fn test_technical_scraping_tries_at_most_five_sources() {
    let keys = ["t1", "t2", "t3", "t4", "t5", "t6", "t7"];
    let browser = MockBrowser::new();
    let visits = browser.visit_log();

    let items = DeepSearch::new(browser, MockHttp::new(), &test_config())
        .with_catalogs(catalogs(Vec::new(), keys.iter().map(|k| technical_site(k)).collect()))
        .aggregate("python decorators tutorial")
        .await;

    assert!(items.is_empty());
    let visits = visits.lock().unwrap();
    assert_eq!(count_visits(&visits, ".test/search?q="), 5);
    assert!(!visits.iter().any(|u| u.starts_with("https://t6.test/")));
}

#[tokio::test]
async fn test_search_fallback_stops_at_budget() {
    let (mut browser, mut http) = (MockBrowser::new(), MockHttp::new());
    for (key, count) in [("n1", 5), ("n2", 5), ("n3", 5), ("n4", 3)] {
        (browser, http) = stocked_site(browser, http, key, "latest", count, None);
    }
    let cards: String = (1..=5)
        .map(|n| {
            format!(r#"<div class="g"><a href="https://wire.test/{n}"><h3>Wire story {n}</h3></a></div>"#)
        })
        .collect();
    let browser = browser.page("https://search.test/site", format!("<html><body>{cards}</body></html>"));
    let http = (1..=5).fold(http, |http, n| {
        http.page(&format!("https://wire.test/{n}"), article(&format!("Wire body {n}")))
    });
    let visits = browser.visit_log();
    let requests = http.request_log();

    let items = DeepSearch::new(browser, http, &test_config())
        .with_catalogs(catalogs(
            ["n1", "n2", "n3", "n4"].iter().map(|k| news_site(k)).collect(),
            Vec::new(),
        ))
        .aggregate("latest news today")
        .await;

    assert_eq!(items.len(), MAX_RESULTS);
    assert_eq!(items.iter().filter(|i| i.title.starts_with("Wire story")).count(), 2);

    let requests = requests.lock().unwrap();
    assert!(requests.contains(&"https://wire.test/2".to_string()));
    assert!(!requests.contains(&"https://wire.test/3".to_string()));
    assert_eq!(count_visits(&visits.lock().unwrap(), "search.test/open"), 0);
}

#[tokio::test]
async fn test_site_restricted_search_labels_and_skips_known_titles() {
    let browser = MockBrowser::new()
        .page(
            "https://alpha.test/latest",
            listing(&[("Budget passed", "/budget", None)]),
        )
        .page(
            "https://search.test/site",
            r#"<html><body>
                <div class="g"><a href="https://x.test/1"><h3>BUDGET PASSED</h3></a></div>
                <div class="g">
                    <a href="https://x.test/2"><h3>Fresh story</h3></a>
                    <span class="OSrXXb">2 hours ago</span>
                </div>
            </body></html>"#,
        );
    let http = MockHttp::new()
        .page("https://alpha.test/budget", article("Budget details"))
        .page("https://x.test/2", article("Fresh details"));
    let requests = http.request_log();
    let visits = browser.visit_log();

    let mut sources = catalogs(vec![news_site("alpha")], Vec::new());
    sources.search.news_domains = vec!["www.alpha.com".to_string()];

    let items = DeepSearch::new(browser, http, &test_config())
        .with_catalogs(sources)
        .aggregate("latest news today")
        .await;

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].title, "Fresh story");
    assert_eq!(items[0].source, "Alpha");
    assert_eq!(items[0].time, "2 hours ago");
    assert_eq!(items[0].content, "Fresh details");
    assert_eq!(items[1].title, "Budget passed");
    assert!(items[1].time.starts_with("Recent - "));

    assert!(!requests.lock().unwrap().iter().any(|u| u == "https://x.test/1"));
    assert!(!visits.lock().unwrap().iter().any(|u| u == "https://x.test/1"));
}

#[tokio::test]
async fn test_site_restricted_search_marks_technical_domains() {
    let browser = MockBrowser::new().page(
        "https://search.test/site",
        r#"<html><body>
            <div class="g">
                <a href="https://docs.python.org/3/glossary.html"><h3>Decorator glossary entry</h3></a>
                <span class="OSrXXb">5 min ago</span>
            </div>
        </body></html>"#,
    );
    let http = MockHttp::new().page(
        "https://docs.python.org/3/glossary.html",
        article("A function returning another function."),
    );

    let mut sources = catalogs(Vec::new(), Vec::new());
    sources.search.technical_domains = vec!["docs.python.org".to_string()];

    let items = DeepSearch::new(browser, http, &test_config())
        .with_catalogs(sources)
        .aggregate("python decorators tutorial")
        .await;

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].source, format!("Docs.Python {TECHNICAL_SUFFIX}"));
    assert!(items[0].is_technical());
    assert_eq!(items[0].time, "5 min ago");
}
