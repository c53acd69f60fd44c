//! Client code for pagesift.
//!
//! This crate provides URL detection, the HTTP fetch, content extraction and
//! the scrape orchestrator shared by the server and CLI.

pub mod chat;
pub mod detect;
pub mod extract;
pub mod fetch;
pub mod scrape;

pub use chat::{ChatMessage, Role, assemble_messages, build_user_prompt};
pub use detect::{PatternDetector, SplitMessage, UrlDetector, split_message};
pub use extract::{Extractor, SelectorExtractor, normalize_text};
pub use fetch::{FetchClient, FetchConfig, FetchResponse, Fetcher};
pub use scrape::Scraper;
