//! URL detection in free-form text.
//!
//! Finding no URL is a normal outcome, not an error: callers simply skip
//! scraping.

use std::sync::LazyLock;

use regex::Regex;

/// http(s) scheme, optional `www.`, a dotted host, then an optional
/// path/query/fragment from a restricted character set. Case-insensitive.
const URL_PATTERN: &str = r"(?i)https?://(www\.)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b([-a-zA-Z0-9()@:%_+.~#?&/=]*)";

static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(URL_PATTERN).expect("invalid URL regex"));

/// Strategy for spotting URLs inside user text.
pub trait UrlDetector: Send + Sync {
    /// Every URL in `text`, in order of appearance.
    fn find_all<'t>(&self, text: &'t str) -> Vec<&'t str>;

    /// The first URL in `text`, if any.
    fn find_first<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.find_all(text).into_iter().next()
    }
}

/// Regex-based detector.
#[derive(Debug, Default, Clone, Copy)]
pub struct PatternDetector;

impl UrlDetector for PatternDetector {
    fn find_all<'t>(&self, text: &'t str) -> Vec<&'t str> {
        URL_REGEX.find_iter(text).map(|m| m.as_str()).collect()
    }

    fn find_first<'t>(&self, text: &'t str) -> Option<&'t str> {
        URL_REGEX.find(text).map(|m| m.as_str())
    }
}

/// A user message split into the URL to scrape and the question around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitMessage {
    pub url: Option<String>,
    pub query: String,
}

/// Detect the first URL in `message` and remove that occurrence to isolate the query.
pub fn split_message(detector: &dyn UrlDetector, message: &str) -> SplitMessage {
    match detector.find_first(message) {
        Some(url) => SplitMessage { url: Some(url.to_string()), query: message.replacen(url, "", 1).trim().to_string() },
        None => SplitMessage { url: None, query: message.trim().to_string() },
    }
}
