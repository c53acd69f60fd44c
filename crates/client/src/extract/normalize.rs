//! Whitespace normalization for extracted text.

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("invalid whitespace regex"));

/// Collapse every run of whitespace (newlines included) into one space and trim.
///
/// Idempotent: `normalize_text(&normalize_text(s)) == normalize_text(s)`.
pub fn normalize_text(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// Keep at most the first `max_chars` characters of `text`.
pub fn truncate_chars(text: String, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text,
    }
}
