//! cache_get tool implementation.
//!
//! Reads the cached scrape for a URL without touching the network.

use pagesift_client::Scraper;
use pagesift_core::{Error, ScrapedContent};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::tools::json_result;

/// Parameters for the cache_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheGetParams {
    /// The URL whose cached scrape to return.
    pub url: String,
}

/// Output from the cache_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheGetOutput {
    /// The cached record.
    pub content: ScrapedContent,

    /// Whole minutes since the record was cached.
    pub age_minutes: Option<u64>,
}

/// Implementation of the cache_get tool.
pub async fn get_impl(scraper: &Scraper, params: CacheGetParams) -> Result<CallToolResult, McpError> {
    let hit = scraper
        .cache()
        .lookup(&params.url)
        .await
        .ok_or_else(|| Error::CacheMiss(params.url.clone()))?;

    let output = CacheGetOutput { age_minutes: hit.age.map(|age| age.as_secs() / 60), content: hit.content };
    json_result(&output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagesift_core::{AppConfig, CacheDb, Headings};

    async fn scraper() -> Scraper {
        let db = CacheDb::open_in_memory().await.unwrap();
        Scraper::with_db(&AppConfig::default(), db).unwrap()
    }

    #[tokio::test]
    async fn test_get_impl_missing() {
        let scraper = scraper().await;
        let params = CacheGetParams { url: "https://example.com/none".to_string() };

        let err = get_impl(&scraper, params).await.unwrap_err();
        assert_eq!(err.code.0, -32001);
    }

    #[tokio::test]
    async fn test_get_impl_found() {
        let scraper = scraper().await;
        let content = ScrapedContent::new(
            "https://example.com",
            "Test".into(),
            Headings { h1: "Test".into(), h2: String::new() },
            String::new(),
            "Test Test".into(),
        );
        scraper.cache().store(&content).await;

        let params = CacheGetParams { url: "https://example.com".to_string() };
        let result = get_impl(&scraper, params).await;
        assert!(result.is_ok());
    }
}
