//! Query classification.
//!
//! Two independent signals drive which catalogs a run visits:
//! - **technical**: the query mentions a programming term, or is phrased like
//!   a technical question ("how to implement …", "difference between … and …")
//! - **general news**: the query carries a news-intent phrase ("latest news", …)
//!
//! Matching is plain substring search on the lowercased query, so short terms
//! such as `api` or `git` also fire inside longer words.

use crate::models::QueryClass;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

const TECHNICAL_KEYWORDS: &[&str] = &[
    "programming", "code", "algorithm", "function", "variable",
    "python", "java", "javascript", "html", "css", "sql", "database",
    "api", "framework", "library", "syntax", "error", "debug",
    "compiler", "interpreter", "runtime", "exception", "stack",
    "frontend", "backend", "fullstack", "web development",
    "data structure", "recursion", "iteration", "loop", "condition",
    "class", "object", "method", "property", "inheritance",
    "polymorphism", "encapsulation", "abstraction", "interface",
    "docker", "kubernetes", "aws", "cloud", "devops", "ci/cd",
    "git", "github", "version control", "linux", "terminal",
    "command line", "bash", "shell", "script", "react", "angular",
    "vue", "node", "express", "flask", "django", "spring", "boot",
];

const GENERAL_NEWS_KEYWORDS: &[&str] = &[
    "today news",
    "latest news",
    "india news",
    "current news",
    "breaking news",
    "top news",
    "recent news",
    "headlines",
];

static TECHNICAL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"how to (implement|code|program|create|develop)",
        r"what is [a-z\s]+ (in|for) (programming|development|coding)",
        r"(fix|resolve|debug) [a-z\s]+ (error|bug|issue|exception)",
        r"(best|recommended) (practice|way) to [a-z\s]+ in",
        r"difference between [a-z\s]+ and [a-z\s]+",
        r"(example|tutorial) (of|for) [a-z\s]+",
        r"(implement|create) [a-z\s]+ (using|with) [a-z\s]+",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

/// `true` if the query looks like a programming / CS question.
pub fn is_technical(query: &str) -> bool {
    let q = query.to_lowercase();
    TECHNICAL_KEYWORDS.iter().any(|k| q.contains(k))
        || TECHNICAL_PATTERNS.iter().any(|re| re.is_match(&q))
}

/// `true` if the query asks for general current news.
pub fn is_general_news(query: &str) -> bool {
    let q = query.to_lowercase();
    GENERAL_NEWS_KEYWORDS.iter().any(|k| q.contains(k))
}

/// Compute both signals for `query`.
pub fn classify(query: &str) -> QueryClass {
    let class = QueryClass {
        is_technical: is_technical(query),
        is_general_news: is_general_news(query),
    };
    debug!(
        is_technical = class.is_technical,
        is_general_news = class.is_general_news,
        "Classified query"
    );
    class
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_keyword_is_technical() {
        for k in TECHNICAL_KEYWORDS {
            let q = format!("tell me about {} please", k.to_uppercase());
            assert!(is_technical(&q), "keyword {k} not detected");
        }
    }

    #[test]
    fn test_patterns_are_technical() {
        assert!(is_technical("difference between tcp and udp"));
        assert!(is_technical("How to develop a mobile app"));
        assert!(is_technical("tutorial for beginners"));
        assert!(is_technical("fix the printer paper issue"));
    }

    #[test]
    fn test_plain_queries_are_not_technical() {
        assert!(!is_technical("latest news today"));
        assert!(!is_technical("weather in mumbai"));
        assert!(!is_technical("cricket world cup results"));
    }

    #[test]
    fn test_news_intent() {
        assert!(is_general_news("Breaking News from Delhi"));
        assert!(is_general_news("what are today's headlines"));
        assert!(is_general_news("latest news today"));
        assert!(!is_general_news("python decorators"));
    }

    #[test]
    fn test_signals_are_independent() {
        let both = classify("latest news about python 3.13");
        assert!(both.is_technical && both.is_general_news);

        let neither = classify("best biryani recipe");
        assert_eq!(neither, QueryClass::default());
    }
}
