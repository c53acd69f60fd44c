//! The record produced by scraping one URL.
//!
//! `ScrapedContent` is both the value returned to callers and the payload
//! persisted in the cache. Its serialized field names are camelCase so the
//! stored JSON reads `metaDescription` and `cachedAt`.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Error message carried by every failed scrape.
pub const SCRAPE_FAILED: &str = "Failed to scrape URL";

/// Upper bound on `content`, in characters.
pub const MAX_CONTENT_CHARS: usize = 50_000;

/// Concatenated heading text per level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Headings {
    pub h1: String,
    pub h2: String,
}

/// Structured text extracted from a single web page.
///
/// A non-null `error` means nothing could be extracted and every text field is
/// empty. `cached_at` is only ever set when the record is written to the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedContent {
    pub url: String,
    pub title: String,
    pub headings: Headings,
    pub meta_description: String,
    pub content: String,
    /// Present as `null` on success. Required in stored payloads.
    #[serde(deserialize_with = "required_nullable")]
    #[schemars(with = "Option<String>")]
    pub error: Option<String>,
    /// Epoch milliseconds at cache-write time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_at: Option<i64>,
}

/// Plain `Option` fields default to `None` when missing; routing through
/// `deserialize_with` makes a missing `error` key a hard failure instead.
fn required_nullable<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
}

/// Invariant violated by a `ScrapedContent` value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentViolation {
    #[error("content has {0} characters, limit is {MAX_CONTENT_CHARS}")]
    ContentTooLong(usize),

    #[error("failed result carries non-empty text fields")]
    FailureWithText,
}

impl ScrapedContent {
    /// Build a successful result.
    pub fn new(
        url: impl Into<String>, title: String, headings: Headings, meta_description: String, content: String,
    ) -> Self {
        Self { url: url.into(), title, headings, meta_description, content, error: None, cached_at: None }
    }

    /// Build the failure-shaped result: empty text fields, fixed error message.
    pub fn failed(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: String::new(),
            headings: Headings::default(),
            meta_description: String::new(),
            content: String::new(),
            error: Some(SCRAPE_FAILED.to_string()),
            cached_at: None,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }

    /// Check the record invariants that the type system does not encode.
    pub fn validate(&self) -> Result<(), ContentViolation> {
        let chars = self.content.chars().count();
        if chars > MAX_CONTENT_CHARS {
            return Err(ContentViolation::ContentTooLong(chars));
        }

        if self.is_failure()
            && !(self.title.is_empty()
                && self.meta_description.is_empty()
                && self.content.is_empty()
                && self.headings.h1.is_empty()
                && self.headings.h2.is_empty())
        {
            return Err(ContentViolation::FailureWithText);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ScrapedContent {
        ScrapedContent::new(
            "https://example.com",
            "Example".into(),
            Headings { h1: "Hi".into(), h2: String::new() },
            "desc".into(),
            "Example desc Hi".into(),
        )
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["metaDescription"], "desc");
        assert_eq!(json["headings"]["h1"], "Hi");
        assert!(json["error"].is_null());
        assert!(json.get("cachedAt").is_none());
    }

    #[test]
    fn test_deserialize_with_cached_at() {
        let json = r#"{"url":"u","title":"t","headings":{"h1":"","h2":""},
            "metaDescription":"","content":"c","error":null,"cachedAt":1700000000000}"#;
        let parsed: ScrapedContent = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.cached_at, Some(1_700_000_000_000));
        assert_eq!(parsed.error, None);
    }

    #[test]
    fn test_deserialize_missing_error_fails() {
        let json = r#"{"url":"u","title":"t","headings":{"h1":"","h2":""},"metaDescription":"","content":"c"}"#;
        assert!(serde_json::from_str::<ScrapedContent>(json).is_err());
    }

    #[test]
    fn test_deserialize_missing_headings_fails() {
        let json = r#"{"url":"u","title":"t","metaDescription":"","content":"c","error":null}"#;
        assert!(serde_json::from_str::<ScrapedContent>(json).is_err());
    }

    #[test]
    fn test_deserialize_wrong_types_fail() {
        let numeric_title = r#"{"url":"u","title":1,"headings":{"h1":"","h2":""},
            "metaDescription":"","content":"c","error":null}"#;
        assert!(serde_json::from_str::<ScrapedContent>(numeric_title).is_err());

        let string_headings = r#"{"url":"u","title":"t","headings":"h",
            "metaDescription":"","content":"c","error":null}"#;
        assert!(serde_json::from_str::<ScrapedContent>(string_headings).is_err());

        let numeric_error = r#"{"url":"u","title":"t","headings":{"h1":"","h2":""},
            "metaDescription":"","content":"c","error":5}"#;
        assert!(serde_json::from_str::<ScrapedContent>(numeric_error).is_err());
    }

    #[test]
    fn test_failed_shape() {
        let failed = ScrapedContent::failed("https://bad.example");
        assert_eq!(failed.url, "https://bad.example");
        assert_eq!(failed.title, "");
        assert_eq!(failed.headings, Headings::default());
        assert_eq!(failed.content, "");
        assert_eq!(failed.error.as_deref(), Some("Failed to scrape URL"));
        assert!(failed.validate().is_ok());
    }

    #[test]
    fn test_validate_content_too_long() {
        let mut content = sample();
        content.content = "a".repeat(MAX_CONTENT_CHARS + 1);
        assert_eq!(content.validate(), Err(ContentViolation::ContentTooLong(MAX_CONTENT_CHARS + 1)));
    }

    #[test]
    fn test_validate_failure_with_text() {
        let mut content = ScrapedContent::failed("https://example.com");
        content.title = "leftover".into();
        assert_eq!(content.validate(), Err(ContentViolation::FailureWithText));
    }
}
