//! Cache key derivation.
//!
//! Keys are the URL truncated to its first 100 characters behind a fixed
//! namespace. URLs sharing a 100-character prefix share a key.

/// Namespace for scrape entries in a shared store.
pub const CACHE_KEY_PREFIX: &str = "scrape:";

/// Number of URL characters kept in a key.
pub const MAX_KEY_URL_CHARS: usize = 100;

/// Derive the cache key for a URL.
pub fn cache_key(url: &str) -> String {
    let truncated: String = url.chars().take(MAX_KEY_URL_CHARS).collect();
    format!("{CACHE_KEY_PREFIX}{truncated}")
}
