//! Ranking of the merged result set.
//!
//! Items are ordered by two ordinal scores, lower is better:
//!
//! | Score | 0 | 1 | 2 |
//! |-------|---|---|---|
//! | Source | technical source on a technical query | preferred outlet | anything else |
//!
//! Recency comes from keywords in the free-form time label, in this order:
//! `min` → 1, `hour` → 2, `today` → 3, `yesterday` → 4, `day` → 5,
//! `week` → 6, otherwise 7. Source score dominates; recency breaks ties.
//! The sort is stable, so fully tied items keep their accumulation order.

use crate::models::ResultItem;
use crate::registry::PREFERRED_OUTLETS;
use tracing::debug;

/// Keyword tiers for recency, checked in order.
const RECENCY_TIERS: &[(&str, u8)] = &[
    ("min", 1),
    ("hour", 2),
    ("today", 3),
    ("yesterday", 4),
    ("day", 5),
    ("week", 6),
];

const UNKNOWN_RECENCY: u8 = 7;

/// 0 for a technical source on a technical query, 1 for a preferred outlet,
/// 2 otherwise.
pub fn source_score(item: &ResultItem, query_is_technical: bool) -> u8 {
    if query_is_technical && item.is_technical() {
        return 0;
    }
    let source = item.source.to_lowercase();
    if PREFERRED_OUTLETS.iter().any(|p| source.contains(p)) {
        1
    } else {
        2
    }
}

/// Coarse recency tier (1–7) of a free-form time label.
pub fn recency_score(time: &str) -> u8 {
    let time = time.to_lowercase();
    RECENCY_TIERS
        .iter()
        .find(|(kw, _)| time.contains(kw))
        .map(|(_, tier)| *tier)
        .unwrap_or(UNKNOWN_RECENCY)
}

/// Combined sort key for one item.
pub fn rank_key(item: &ResultItem, query_is_technical: bool) -> (u8, u8) {
    (source_score(item, query_is_technical), recency_score(&item.time))
}

/// Order `items` by [`rank_key`] and keep the first `limit`.
pub fn rank_and_truncate(
    mut items: Vec<ResultItem>,
    query_is_technical: bool,
    limit: usize,
) -> Vec<ResultItem> {
    items.sort_by_cached_key(|item| rank_key(item, query_is_technical));
    let total = items.len();
    items.truncate(limit);
    debug!(total, kept = items.len(), "Ranked results");
    items
}
