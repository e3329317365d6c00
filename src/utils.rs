//! Utility functions for string shaping and recency labels.
//!
//! This module provides helper functions used throughout the crate:
//! - Title-casing of site keys and domains for display
//! - Whitespace normalisation for scraped text
//! - Character-bounded truncation for content and logging
//! - Synthesised recency labels for sources that expose no timestamp

use chrono::Local;

/// Title-case a string the way publishers' names are displayed.
///
/// Every alphabetic character that follows a non-alphabetic character (or the
/// start of the string) is upper-cased; every other alphabetic character is
/// lower-cased.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(title_case("times of india"), "Times Of India");
/// assert_eq!(title_case("timesofindia.indiatimes"), "Timesofindia.Indiatimes");
/// ```
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Collapse every run of whitespace into a single space and trim the ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keep at most `max` characters of `s`.
///
/// Operates on characters, not bytes, so multi-byte text is never split
/// in the middle of a code point.
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to `max` characters with an ellipsis and
/// byte count indicator appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    let kept = truncate_chars(s, max);
    if kept.len() == s.len() {
        kept
    } else {
        format!("{}…(+{} bytes)", kept, s.len() - kept.len())
    }
}

/// Build a recency label such as `"Recent - October 15, 2026"`.
///
/// Sources that expose no publication time get a label stamped with today's
/// local date. Ranking only ever inspects keywords in this label.
pub fn recency_label(prefix: &str) -> String {
    format!("{} - {}", prefix, Local::now().format("%B %d, %Y"))
}

/// Today's date in the compact form used when freshening search queries.
pub fn search_date() -> String {
    Local::now().format("%B %d %Y").to_string()
}
