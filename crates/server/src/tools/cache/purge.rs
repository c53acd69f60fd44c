//! cache_purge tool implementation.
//!
//! Evicts one URL's entry, sweeps expired rows, or both.

use pagesift_client::Scraper;
use pagesift_core::{CacheDb, Error};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::tools::json_result;

/// Parameters for the cache_purge tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CachePurgeParams {
    /// Evict the entry this URL maps to.
    pub url: Option<String>,

    /// Delete every expired row.
    #[serde(default)]
    pub expired: bool,
}

/// Output from the cache_purge tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CachePurgeOutput {
    /// Whether a URL eviction was requested and carried out.
    pub evicted: bool,

    /// Number of expired rows deleted.
    pub deleted: u64,
}

/// Implementation of the cache_purge tool.
pub async fn purge_impl(scraper: &Scraper, db: &CacheDb, params: CachePurgeParams) -> Result<CallToolResult, McpError> {
    if params.url.is_none() && !params.expired {
        return Err(Error::InvalidInput("At least one of url or expired must be specified".to_string()).into());
    }

    let mut output = CachePurgeOutput { evicted: false, deleted: 0 };

    if let Some(url) = params.url.as_deref() {
        scraper.cache().evict(url).await?;
        output.evicted = true;
    }

    if params.expired {
        output.deleted = db.purge_expired().await?;
    }

    tracing::info!(evicted = output.evicted, deleted = output.deleted, "cache purged");

    json_result(&output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagesift_core::cache::cache_key;
    use pagesift_core::{AppConfig, CacheStore, Headings, ScrapedContent};

    async fn setup() -> (CacheDb, Scraper) {
        let db = CacheDb::open_in_memory().await.unwrap();
        let scraper = Scraper::with_db(&AppConfig::default(), db.clone()).unwrap();
        (db, scraper)
    }

    #[tokio::test]
    async fn test_purge_impl_no_params() {
        let (db, scraper) = setup().await;
        let params = CachePurgeParams { url: None, expired: false };

        let result = purge_impl(&scraper, &db, params).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_purge_impl_url() {
        let (db, scraper) = setup().await;
        let content =
            ScrapedContent::new("https://example.com", "T".into(), Headings::default(), String::new(), "T".into());
        scraper.cache().store(&content).await;
        assert!(db.contains(&cache_key("https://example.com")).await.unwrap());

        let params = CachePurgeParams { url: Some("https://example.com".into()), expired: false };
        assert!(purge_impl(&scraper, &db, params).await.is_ok());

        assert!(!db.contains(&cache_key("https://example.com")).await.unwrap());
    }

    #[tokio::test]
    async fn test_purge_impl_expired() {
        let (db, scraper) = setup().await;
        db.set("scrape:stale", b"{}", 0).await.unwrap();
        db.set("scrape:fresh", b"{}", 3600).await.unwrap();

        let params = CachePurgeParams { url: None, expired: true };
        assert!(purge_impl(&scraper, &db, params).await.is_ok());

        assert!(!db.contains("scrape:stale").await.unwrap());
        assert!(db.contains("scrape:fresh").await.unwrap());
    }
}
