//! Database schema migrations.
//!
//! Applied versions are recorded in `_migrations`; each entry below runs once,
//! in order, inside the same transaction as its version row.

use super::Error;
use tokio_rusqlite::{Connection, params};

/// Ordered (version, SQL) pairs. Versions must strictly increase.
const MIGRATIONS: &[(i64, &str)] = &[(1, include_str!("../../migrations/001_kv_store.sql"))];

/// Run any pending migrations and return the schema version afterwards.
pub async fn run(conn: &Connection) -> Result<i64, Error> {
    conn.call(|conn| -> Result<i64, Error> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS _migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL
            )",
        )?;

        let mut current: i64 =
            conn.query_row("SELECT COALESCE(MAX(version), 0) FROM _migrations", [], |row| row.get(0))?;

        for &(version, sql) in MIGRATIONS {
            if version <= current {
                continue;
            }

            let tx = conn.transaction()?;
            tx.execute_batch(sql)
                .map_err(|e| Error::MigrationFailed(format!("version {version}: {e}")))?;
            tx.execute(
                "INSERT INTO _migrations (version, applied_at) VALUES (?1, ?2)",
                params![version, chrono::Utc::now().to_rfc3339()],
            )?;
            tx.commit()?;

            tracing::debug!(version, "applied cache migration");
            current = version;
        }

        Ok(current)
    })
    .await
    .map_err(Error::from)
}
