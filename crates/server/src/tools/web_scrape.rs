//! web_scrape tool implementation.
//!
//! Returns the structured content of one page, from cache when possible.

use pagesift_client::Scraper;
use pagesift_core::{Error, ScrapedContent};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;

/// Input parameters for web_scrape tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct WebScrapeParams {
    /// The URL to scrape.
    pub url: String,

    /// Skip the cache read and fetch the page again.
    #[serde(default)]
    pub force_refresh: bool,
}

/// Run the scrape pipeline for one URL.
///
/// A failed scrape is still a successful tool call: the returned record
/// carries the failure in its `error` field.
pub async fn scrape_impl(scraper: &Scraper, params: WebScrapeParams) -> Result<CallToolResult, McpError> {
    if params.url.trim().is_empty() {
        return Err(Error::InvalidInput("url cannot be empty".into()).into());
    }

    let content: ScrapedContent = if params.force_refresh {
        scraper.refresh(&params.url).await
    } else {
        scraper.scrape(&params.url).await
    };

    json_result(&content)
}
