//! Content extraction from fetched or rendered HTML.
//!
//! Two layers live here:
//!
//! 1. **Selector resolution** ([`resolve`], [`resolve_text`], [`resolve_attr`]):
//!    try an ordered list of CSS selectors against an element and return the
//!    first usable value. Every scraper uses these instead of hand-written
//!    fallback chains.
//! 2. **Article extraction** ([`extract_content`]): a three-tier cascade that
//!    prefers a cheap static fetch and only pays for a rendered browser fetch
//!    when the static page has no recognisable article container.
//!
//! # Cascade
//!
//! | Tier | Page | Strategy |
//! |------|------|----------|
//! | 1 | static GET | first article container with paragraphs |
//! | 2 | rendered DOM | same container search |
//! | 3 | rendered DOM | first 10 body paragraphs, else 3000 chars of body text |

use crate::error::ScrapeError;
use crate::fetch::{BrowserSession, Fetcher, HttpFetch};
use crate::utils::{collapse_whitespace, truncate_chars, truncate_for_log};
use itertools::Itertools;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, error, instrument, warn};

/// Candidate article containers, most specific first.
pub const ARTICLE_CONTAINERS: &[&str] = &[
    "article",
    ".article-content",
    ".story-body",
    ".entry-content",
    "main",
    ".content",
];

/// Paragraphs kept by the last-resort body extraction.
pub const FALLBACK_PARAGRAPHS: usize = 10;

/// Characters kept when a page has no paragraphs at all.
pub const BODY_TEXT_LIMIT: usize = 3000;

const HIDDEN_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Parse a selector, treating malformed input as "matches nothing".
pub fn parse_selector(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(sel) => Some(sel),
        Err(e) => {
            debug!(%selector, error = ?e, "Ignoring unparsable selector");
            None
        }
    }
}

/// First descendant of `el` matching `selector`.
pub fn select_first<'a>(el: ElementRef<'a>, selector: &str) -> Option<ElementRef<'a>> {
    let sel = parse_selector(selector)?;
    el.select(&sel).next()
}

/// Try each candidate selector in order; for the first element each one
/// matches, apply `pick`. Returns the first `Some` produced.
pub fn resolve<'a, T>(
    el: ElementRef<'a>,
    candidates: &[String],
    pick: impl Fn(ElementRef<'a>) -> Option<T>,
) -> Option<T> {
    candidates
        .iter()
        .find_map(|c| select_first(el, c).and_then(&pick))
}

/// First non-empty text among `candidates`.
pub fn resolve_text(el: ElementRef<'_>, candidates: &[String]) -> Option<String> {
    resolve(el, candidates, |e| non_empty(element_text(e)))
}

/// First non-empty `attr` value among `candidates`.
pub fn resolve_attr(el: ElementRef<'_>, candidates: &[String], attr: &str) -> Option<String> {
    resolve(el, candidates, |e| {
        e.value()
            .attr(attr)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    })
}

/// Visible text of an element, whitespace-collapsed.
pub fn element_text(el: ElementRef<'_>) -> String {
    text_of(el, "")
}

/// Visible text with a separator between text nodes, so that adjacent block
/// elements don't run together.
pub fn block_text(el: ElementRef<'_>) -> String {
    text_of(el, " ")
}

fn text_of(el: ElementRef<'_>, sep: &str) -> String {
    let raw = el
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node
                .parent()
                .and_then(|p| p.value().as_element().map(|e| HIDDEN_TAGS.contains(&e.name())))
                .unwrap_or(false);
            (!hidden).then_some(&**text)
        })
        .join(sep);
    collapse_whitespace(&raw)
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

/// Tiers 1 and 2: the first article container that holds at least one
/// non-empty paragraph, with its paragraph texts joined by single spaces.
pub fn article_text(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let paragraphs = parse_selector("p")?;
    ARTICLE_CONTAINERS.iter().find_map(|c| {
        let sel = parse_selector(c)?;
        let container = doc.select(&sel).next()?;
        let text = container
            .select(&paragraphs)
            .map(element_text)
            .filter(|t| !t.is_empty())
            .join(" ");
        non_empty(text)
    })
}

/// Tier 3: up to [`FALLBACK_PARAGRAPHS`] body paragraphs, or failing that the
/// first [`BODY_TEXT_LIMIT`] characters of the body's visible text.
pub fn fallback_text(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let body = doc.select(&parse_selector("body")?).next()?;
    let paragraphs = parse_selector("p")?;

    let text = body
        .select(&paragraphs)
        .take(FALLBACK_PARAGRAPHS)
        .map(element_text)
        .filter(|t| !t.is_empty())
        .join(" ");
    if !text.is_empty() {
        return Some(text);
    }

    non_empty(truncate_chars(&block_text(body), BODY_TEXT_LIMIT))
}

/// Human-readable placeholder stored as content when extraction fails.
pub fn placeholder(error: &ScrapeError) -> String {
    format!("Could not extract content from this source. Error: {error}")
}

/// Extract the main text of `url`.
///
/// Tries a static GET first, then the rendered page, then the paragraph and
/// body fallbacks. Never fails.
///
/// # Arguments
///
/// * `fetcher` - The run's fetcher; the browser is only driven past tier 1
/// * `url` - Absolute article URL
///
/// # Returns
///
/// The article text, or a [`placeholder`] naming the error when every tier
/// came up empty.
#[instrument(level = "info", skip(fetcher))]
pub async fn extract_content<B, H>(fetcher: &mut Fetcher<B, H>, url: &str) -> String
where
    B: BrowserSession,
    H: HttpFetch,
{
    match try_extract(fetcher, url).await {
        Ok(text) => {
            debug!(preview = %truncate_for_log(&text, 120), "Extracted content");
            text
        }
        Err(e) if e.is_local() => {
            warn!(error = %e, "Content extraction failed");
            placeholder(&e)
        }
        Err(e) => {
            error!(error = %e, "Browser session failed during extraction");
            placeholder(&e)
        }
    }
}

async fn try_extract<B, H>(fetcher: &mut Fetcher<B, H>, url: &str) -> Result<String, ScrapeError>
where
    B: BrowserSession,
    H: HttpFetch,
{
    match fetcher.fetch_static(url).await {
        Ok(html) => {
            if let Some(text) = article_text(&html) {
                debug!(tier = 1, chars = text.len(), "Extracted from static page");
                return Ok(text);
            }
            debug!("Static page has no article container; rendering");
        }
        Err(e) => debug!(error = %e, "Static fetch failed; rendering"),
    }

    let html = fetcher.render_page(url).await?;
    if let Some(text) = article_text(&html) {
        debug!(tier = 2, chars = text.len(), "Extracted from rendered page");
        return Ok(text);
    }

    let text = fallback_text(&html).ok_or_else(|| ScrapeError::ExtractionEmpty {
        url: url.to_string(),
    })?;
    debug!(tier = 3, chars = text.len(), "Extracted body fallback");
    Ok(text)
}
