//! chat_context tool implementation.
//!
//! Splits a user message into URL and question, scrapes the URL and returns
//! the message list a completion service would be sent.

use pagesift_client::{ChatMessage, PatternDetector, Scraper, assemble_messages, split_message};
use pagesift_core::{Error, ScrapedContent};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;

/// Input parameters for chat_context tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ChatContextParams {
    /// The raw user message, possibly containing a URL.
    pub message: String,

    /// Earlier turns of the conversation, oldest first.
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

/// Output from the chat_context tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ChatContextOutput {
    /// The first URL found in the message.
    pub url: Option<String>,

    /// The message with that URL removed.
    pub query: String,

    /// Scrape result for `url`; absent when the message has no URL.
    pub scraped: Option<ScrapedContent>,

    /// System prompt, history and the new user prompt.
    pub messages: Vec<ChatMessage>,
}

/// Build the prompt context for one user message.
pub async fn chat_context_impl(scraper: &Scraper, params: ChatContextParams) -> Result<CallToolResult, McpError> {
    if params.message.trim().is_empty() {
        return Err(Error::InvalidInput("message cannot be empty".into()).into());
    }

    let split = split_message(&PatternDetector, &params.message);

    let scraped = match split.url.as_deref() {
        Some(url) => Some(scraper.scrape(url).await),
        None => {
            tracing::debug!("no URL in message, skipping scrape");
            None
        }
    };

    let page_text = scraped.as_ref().map(|s| s.content.as_str()).unwrap_or_default();
    let messages = assemble_messages(params.history, &split.query, page_text);

    json_result(&ChatContextOutput { url: split.url, query: split.query, scraped, messages })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagesift_client::Role;
    use pagesift_core::{AppConfig, CacheDb, Headings};
    use rmcp::model::RawContent;

    async fn scraper() -> Scraper {
        let db = CacheDb::open_in_memory().await.unwrap();
        Scraper::with_db(&AppConfig::default(), db).unwrap()
    }

    fn output_of(result: &CallToolResult) -> ChatContextOutput {
        match &result.content[0].raw {
            RawContent::Text(text) => serde_json::from_str(&text.text).unwrap(),
            other => panic!("unexpected content: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_message_rejected() {
        let scraper = scraper().await;
        let params = ChatContextParams { message: " ".into(), history: vec![] };
        assert!(chat_context_impl(&scraper, params).await.is_err());
    }

    #[tokio::test]
    async fn test_message_without_url() {
        let scraper = scraper().await;
        let history = vec![ChatMessage::new(Role::User, "hi"), ChatMessage::new(Role::Assistant, "hello")];
        let params = ChatContextParams { message: "what now?".into(), history };

        let output = output_of(&chat_context_impl(&scraper, params).await.unwrap());

        assert!(output.url.is_none());
        assert!(output.scraped.is_none());
        assert_eq!(output.query, "what now?");
        assert_eq!(output.messages.len(), 4);
        assert_eq!(output.messages[0].role, Role::System);
        assert!(output.messages[3].content.contains("<content>\n\n</content>"));
    }

    #[tokio::test]
    async fn test_message_with_cached_url() {
        let scraper = scraper().await;
        let cached = ScrapedContent::new(
            "https://example.com/post",
            "Post".into(),
            Headings::default(),
            String::new(),
            "Post body text".into(),
        );
        scraper.cache().store(&cached).await;

        let params = ChatContextParams { message: "Summarize https://example.com/post".into(), history: vec![] };
        let output = output_of(&chat_context_impl(&scraper, params).await.unwrap());

        assert_eq!(output.url.as_deref(), Some("https://example.com/post"));
        assert_eq!(output.query, "Summarize");
        assert_eq!(output.scraped.unwrap().title, "Post");
        let last = output.messages.last().unwrap();
        assert_eq!(last.role, Role::User);
        assert!(last.content.starts_with("Answer my question: \"Summarize\""));
        assert!(last.content.contains("Post body text"));
    }
}
