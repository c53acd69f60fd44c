//! Key-value store abstraction and its SQLite implementation.
//!
//! The store owns expiry: a value written with a TTL is never returned after
//! `stored_at + ttl`, whether or not the row has been purged yet.

use super::connection::CacheDb;
use crate::Error;
use async_trait::async_trait;
use chrono::Utc;
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite::OptionalExtension;

/// Key-value collaborator used by [`super::ScrapeCache`].
///
/// Implementations report their own failures as `Err`; callers decide how
/// to degrade.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Fetch the raw value under `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Error>;

    /// Store `value` under `key`, replacing any previous value. Expiry is
    /// absolute: `ttl_seconds` from now.
    async fn set(&self, key: &str, value: &[u8], ttl_seconds: u64) -> Result<(), Error>;

    /// Remove `key`. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), Error>;
}

#[async_trait]
impl CacheStore for CacheDb {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Error> {
        let key = key.to_string();
        let now = Utc::now().timestamp_millis();
        self.conn
            .call(move |conn| -> Result<Option<Vec<u8>>, Error> {
                let value = conn
                    .query_row(
                        "SELECT value FROM kv_store WHERE key = ?1 AND expires_at > ?2",
                        params![key, now],
                        |row| row.get(0),
                    )
                    .optional()?;
                Ok(value)
            })
            .await
            .map_err(Error::from)
    }

    async fn set(&self, key: &str, value: &[u8], ttl_seconds: u64) -> Result<(), Error> {
        let key = key.to_string();
        let value = value.to_vec();
        let stored_at = Utc::now().timestamp_millis();
        let ttl_ms = i64::try_from(ttl_seconds.saturating_mul(1000)).unwrap_or(i64::MAX);
        let expires_at = stored_at.saturating_add(ttl_ms);

        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO kv_store (key, value, stored_at, expires_at)
                    VALUES (?1, ?2, ?3, ?4)
                    ON CONFLICT(key) DO UPDATE SET
                        value = excluded.value,
                        stored_at = excluded.stored_at,
                        expires_at = excluded.expires_at",
                    params![key, value, stored_at, expires_at],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    async fn delete(&self, key: &str) -> Result<(), Error> {
        let key = key.to_string();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }
}

impl CacheDb {
    /// Delete expired entries.
    ///
    /// Returns the number of deleted entries.
    pub async fn purge_expired(&self) -> Result<u64, Error> {
        let now = Utc::now().timestamp_millis();
        self.conn
            .call(move |conn| -> Result<u64, Error> {
                let count = conn.execute("DELETE FROM kv_store WHERE expires_at <= ?1", params![now])?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }

    /// Check whether `key` holds a live (unexpired) value.
    pub async fn contains(&self, key: &str) -> Result<bool, Error> {
        Ok(self.get(key).await?.is_some())
    }
}
