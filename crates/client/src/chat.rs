//! Prompt assembly for a conversational front end.
//!
//! The language model itself is out of reach of this crate: these helpers
//! only build the role-tagged message list a completion service consumes.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Instructions prepended to every conversation.
pub const SYSTEM_PROMPT: &str = "You are a helpful AI assistant. Format your responses using markdown for better \
readability. Use bullet points, headers, and code blocks where appropriate. Keep your responses concise and \
well-structured. Base your responses only on the context text that you have been provided.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One role-tagged message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }
}

/// Wrap the user's question and the scraped page text into one prompt.
pub fn build_user_prompt(query: &str, content: &str) -> String {
    format!(
        "Answer my question: \"{query}\"\nBased on the following content:\n<content>\n{content}\n</content>"
    )
}

/// System prompt, then the prior conversation, then the new user prompt.
pub fn assemble_messages(history: Vec<ChatMessage>, query: &str, content: &str) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::new(Role::System, SYSTEM_PROMPT));
    messages.extend(history);
    messages.push(ChatMessage::new(Role::User, build_user_prompt(query, content)));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_prompt_layout() {
        let prompt = build_user_prompt("What is it?", "Example desc");
        assert_eq!(
            prompt,
            "Answer my question: \"What is it?\"\nBased on the following content:\n<content>\nExample desc\n</content>"
        );
    }

    #[test]
    fn test_user_prompt_with_empty_content() {
        let prompt = build_user_prompt("hi", "");
        assert!(prompt.contains("<content>\n\n</content>"));
    }

    #[test]
    fn test_assemble_order() {
        let history = vec![
            ChatMessage::new(Role::User, "earlier question"),
            ChatMessage::new(Role::Assistant, "earlier answer"),
        ];
        let messages = assemble_messages(history, "next?", "page text");

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].content, SYSTEM_PROMPT);
        assert_eq!(messages[1].content, "earlier question");
        assert_eq!(messages[2].role, Role::Assistant);
        assert_eq!(messages[3].role, Role::User);
        assert!(messages[3].content.contains("page text"));
    }

    #[test]
    fn test_role_wire_format() {
        let message = ChatMessage::new(Role::Assistant, "x");
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["role"], "assistant");

        let parsed: ChatMessage = serde_json::from_str(r#"{"role":"system","content":"s"}"#).unwrap();
        assert_eq!(parsed.role, Role::System);
        assert!(serde_json::from_str::<ChatMessage>(r#"{"role":"tool","content":"s"}"#).is_err());
    }
}
