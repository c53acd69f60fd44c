//! Scrape cache adapter.
//!
//! Sits between the scrape pipeline and a [`CacheStore`]:
//!
//! ### Reads
//! - Missing key: miss.
//! - Bytes that do not deserialize into `ScrapedContent`, or that violate its
//!   invariants: the key is deleted and the read is a miss.
//!
//! ### Writes
//! - Invalid records and payloads over [`MAX_CACHE_BYTES`] are skipped.
//! - `cachedAt` is stamped on the stored copy; expiry is [`CACHE_TTL_SECONDS`].
//!
//! Store failures and timeouts are logged and treated as "no cache".

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use super::key::cache_key;
use super::store::CacheStore;
use crate::{Error, ScrapedContent};

/// Absolute expiry applied to every entry (7 days).
pub const CACHE_TTL_SECONDS: u64 = 7 * 24 * 60 * 60;

/// Ceiling on the serialized size of one entry.
pub const MAX_CACHE_BYTES: usize = 1_000_000;

const DEFAULT_OP_TIMEOUT: Duration = Duration::from_secs(5);

/// A valid entry read back from the cache.
#[derive(Debug, Clone)]
pub struct CacheHit {
    pub content: ScrapedContent,
    /// Time since `cachedAt`, when the entry carries one.
    pub age: Option<Duration>,
}

/// What happened to a write request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheWrite {
    Stored { bytes: usize },
    Invalid,
    TooLarge { bytes: usize },
    Unavailable,
}

/// URL-keyed cache of scrape results over an injected store.
#[derive(Clone)]
pub struct ScrapeCache {
    store: Arc<dyn CacheStore>,
    op_timeout: Duration,
}

impl ScrapeCache {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store, op_timeout: DEFAULT_OP_TIMEOUT }
    }

    /// Bound every store call by `op_timeout`.
    pub fn with_timeout(mut self, op_timeout: Duration) -> Self {
        self.op_timeout = op_timeout;
        self
    }

    /// Look up a valid entry for `url`.
    ///
    /// Never fails: store errors, timeouts and corrupt entries all read as a miss.
    pub async fn lookup(&self, url: &str) -> Option<CacheHit> {
        let key = cache_key(url);
        tracing::debug!(key = %key, "checking cache");

        let raw = match self.bounded(self.store.get(&key)).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::info!(url, "cache miss");
                return None;
            }
            Err(e) => {
                tracing::error!(url, error = %e, "cache read failed");
                return None;
            }
        };

        let content = match serde_json::from_slice::<ScrapedContent>(&raw) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(url, error = %e, "cached payload failed to deserialize, evicting");
                self.delete_key(&key).await;
                return None;
            }
        };

        if let Err(violation) = content.validate() {
            tracing::warn!(url, %violation, "cached payload is invalid, evicting");
            self.delete_key(&key).await;
            return None;
        }

        let age = content.cached_at.map(|at| {
            let elapsed_ms = Utc::now().timestamp_millis().saturating_sub(at).max(0);
            Duration::from_millis(elapsed_ms as u64)
        });

        tracing::info!(
            url,
            age_minutes = age.map(|a| a.as_secs() / 60),
            "cache hit"
        );

        Some(CacheHit { content, age })
    }

    /// Persist `content` under its URL's key.
    ///
    /// The caller's value is left untouched; only the stored copy gets `cachedAt`.
    pub async fn store(&self, content: &ScrapedContent) -> CacheWrite {
        if let Err(violation) = content.validate() {
            tracing::error!(url = %content.url, %violation, "refusing to cache invalid content");
            return CacheWrite::Invalid;
        }

        let mut stamped = content.clone();
        stamped.cached_at = Some(Utc::now().timestamp_millis());

        let serialized = match serde_json::to_vec(&stamped) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!(url = %content.url, error = %e, "failed to serialize content for cache");
                return CacheWrite::Invalid;
            }
        };

        let bytes = serialized.len();
        if bytes > MAX_CACHE_BYTES {
            tracing::warn!(url = %content.url, bytes, limit = MAX_CACHE_BYTES, "content over cache size limit");
            return CacheWrite::TooLarge { bytes };
        }

        let key = cache_key(&content.url);
        match self
            .bounded(self.store.set(&key, &serialized, CACHE_TTL_SECONDS))
            .await
        {
            Ok(()) => {
                tracing::info!(url = %content.url, bytes, ttl_seconds = CACHE_TTL_SECONDS, "cached content");
                CacheWrite::Stored { bytes }
            }
            Err(e) => {
                tracing::error!(url = %content.url, error = %e, "cache write failed");
                CacheWrite::Unavailable
            }
        }
    }

    /// Remove whatever entry `url` maps to.
    pub async fn evict(&self, url: &str) -> Result<(), Error> {
        self.bounded(self.store.delete(&cache_key(url))).await
    }

    async fn delete_key(&self, key: &str) {
        if let Err(e) = self.bounded(self.store.delete(key)).await {
            tracing::error!(key, error = %e, "failed to evict cache entry");
        }
    }

    async fn bounded<T>(&self, op: impl Future<Output = Result<T, Error>>) -> Result<T, Error> {
        tokio::time::timeout(self.op_timeout, op)
            .await
            .map_err(|_| Error::CacheTimeout(self.op_timeout.as_millis() as u64))?
    }
}
