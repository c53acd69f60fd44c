//! Core types and shared functionality for pagesift.
//!
//! This crate provides:
//! - The `ScrapedContent` record returned by every scrape
//! - Cache policy (key namespace, TTL, size ceiling) and the SQLite store
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod content;
pub mod error;

pub use cache::{CacheDb, CacheHit, CacheStore, CacheWrite, ScrapeCache};
pub use config::{AppConfig, ConfigError};
pub use content::{Headings, SCRAPE_FAILED, ScrapedContent};
pub use error::Error;
