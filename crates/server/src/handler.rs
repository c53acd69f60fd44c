//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use crate::tools::{
    cache::{CacheGetParams, CachePurgeParams, get_impl, purge_impl},
    chat_context::{ChatContextParams, chat_context_impl},
    web_scrape::{WebScrapeParams, scrape_impl},
};

use pagesift_client::Scraper;
use pagesift_core::CacheDb;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The main MCP server handler for pagesift.
#[derive(Clone)]
pub struct PagesiftServer {
    tool_router: ToolRouter<Self>,
    scraper: Scraper,
    db: CacheDb,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl PagesiftServer {
    /// Create a new server handler over a scraper and the database behind its cache.
    pub fn new(scraper: Scraper, db: CacheDb) -> Self {
        Self { tool_router: Self::tool_router(), scraper, db }
    }

    /// Scrape a page into structured content.
    ///
    /// Results are cached per URL for 7 days; `force_refresh` skips the cache read.
    #[tool(
        description = "Scrape a web page. Returns JSON with url, title, headings (h1, h2), metaDescription, normalized content and error. Cached for 7 days."
    )]
    async fn web_scrape(&self, params: Parameters<WebScrapeParams>) -> Result<CallToolResult, McpError> {
        scrape_impl(&self.scraper, params.0).await
    }

    /// Build prompt messages for a chat turn.
    #[tool(
        description = "Detect a URL in a user message, scrape it, and return the system/history/user messages to send to a language model."
    )]
    async fn chat_context(&self, params: Parameters<ChatContextParams>) -> Result<CallToolResult, McpError> {
        chat_context_impl(&self.scraper, params.0).await
    }

    /// Read a cached scrape.
    #[tool(description = "Return the cached scrape for a URL without fetching. Fails with CACHE_MISS when absent.")]
    async fn cache_get(&self, params: Parameters<CacheGetParams>) -> Result<CallToolResult, McpError> {
        get_impl(&self.scraper, params.0).await
    }

    /// Remove cache entries.
    #[tool(description = "Evict the cached scrape for a URL and/or delete all expired entries.")]
    async fn cache_purge(&self, params: Parameters<CachePurgeParams>) -> Result<CallToolResult, McpError> {
        purge_impl(&self.scraper, &self.db, params.0).await
    }
}

impl ServerHandler for PagesiftServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "pagesift".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagesift_core::AppConfig;

    #[tokio::test]
    async fn test_all_tools_listed() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let scraper = Scraper::with_db(&AppConfig::default(), db.clone()).unwrap();
        let server = PagesiftServer::new(scraper, db);

        let mut names: Vec<String> = server.tool_router.list_all().into_iter().map(|t| t.name.to_string()).collect();
        names.sort();
        assert_eq!(names, vec!["cache_get", "cache_purge", "chat_context", "web_scrape"]);
        assert_eq!(server.get_info().server_info.name, "pagesift");
    }
}
