//! Scrape cache: policy, store abstraction and SQLite backend.
//!
//! - [`ScrapeCache`] maps URLs to namespaced keys, enforces the size ceiling
//!   and TTL, and validates every payload it reads back.
//! - [`CacheStore`] is the key-value collaborator it talks to.
//! - [`CacheDb`] is the SQLite implementation with native expiry.

pub mod connection;
pub mod key;
pub mod migrations;
pub mod scrape;
pub mod store;

pub use crate::Error;

pub use connection::CacheDb;
pub use key::{CACHE_KEY_PREFIX, MAX_KEY_URL_CHARS, cache_key};
pub use scrape::{CACHE_TTL_SECONDS, CacheHit, CacheWrite, MAX_CACHE_BYTES, ScrapeCache};
pub use store::CacheStore;
