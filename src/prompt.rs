//! Grounding prompts for a downstream text-completion service.
//!
//! [`grounded_prompt`] turns an aggregation result into numbered source
//! blocks and asks for a structured answer citing them as `[Source N]`.
//! [`plain_prompt`] is the variant used when there is nothing to ground on.

use crate::extract::BODY_TEXT_LIMIT;
use crate::models::ResultItem;
use crate::utils::truncate_chars;
use itertools::Itertools;

const GROUNDED_INSTRUCTIONS: &str = "Your response should be thorough, well-structured, and specifically reference information from the sources provided.

Structure your response as follows:

## Key Findings
- Provide 3-5 bullet points summarizing the most important information
- Highlight the key facts relevant to the query

## Detailed Analysis
1. First major point with supporting evidence
2. Second major point with supporting evidence
3. Third major point with supporting evidence

## Additional Insights
- Include any other relevant information
- Note any contradictions or nuances across sources

## Sources
- List the key sources that informed your response

When referencing information, cite the sources using the format [Source X] where X is the source number.";

const PLAIN_INSTRUCTIONS: &str = "Organize your answer with:
## Summary
- Key points

## Explanation
1. Step-by-step details
2. Supporting information

## Conclusion
- Final thoughts
- Recommendations if applicable";

/// Note attached to the plain prompt when aggregation came back empty.
pub const NO_SOURCES_NOTE: &str =
    "I tried to search for relevant information but couldn't find any specific sources.";

/// Render one numbered source block. Content is capped at
/// [`BODY_TEXT_LIMIT`] characters.
fn source_block(number: usize, item: &ResultItem) -> String {
    format!(
        "Source {number}:\nTitle: {}\nPublisher: {}\nDate: {}\nContent: {}...",
        item.title,
        item.source,
        item.time,
        truncate_chars(&item.content, BODY_TEXT_LIMIT)
    )
}

/// Build a prompt grounded in `items`, numbered from 1 in list order.
///
/// Falls back to [`plain_prompt`] with [`NO_SOURCES_NOTE`] when `items` is
/// empty.
pub fn grounded_prompt(query: &str, items: &[ResultItem]) -> String {
    if items.is_empty() {
        return plain_prompt(query, Some(NO_SOURCES_NOTE));
    }
    let sources = items
        .iter()
        .enumerate()
        .map(|(i, item)| source_block(i + 1, item))
        .join("\n\n");
    format!(
        "You are tasked with providing a comprehensive response about: '{query}'\n\n\
         Using the following sources:\n{sources}\n\n{GROUNDED_INSTRUCTIONS}"
    )
}

/// Build the structured-answer prompt without sources, optionally prefixed
/// by a note about why none are attached.
pub fn plain_prompt(query: &str, note: Option<&str>) -> String {
    let note = note
        .map(|n| format!("Note: {n}\n\n"))
        .unwrap_or_default();
    format!("Please provide a clear, structured response to: '{query}'\n\n{note}{PLAIN_INSTRUCTIONS}")
}
