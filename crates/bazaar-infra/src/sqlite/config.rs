//! SQLite key/value settings.

use bazaar_core::repository::config::ConfigRepository;
use bazaar_types::error::RepositoryError;

use super::pool::DatabasePool;
use super::query_error;

/// SQLite-backed implementation of `ConfigRepository`.
pub struct SqliteConfigRepository {
    pool: DatabasePool,
}

impl SqliteConfigRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl ConfigRepository for SqliteConfigRepository {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM config WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        Ok(row.map(|(value,)| value))
    }

    async fn toggle_flag(&self, key: &str) -> Result<String, RepositoryError> {
        // One statement: read-modify-write cannot interleave with another toggle.
        let (value,): (String,) = sqlx::query_as(
            "INSERT INTO config (key, value) VALUES (?, 'true')
             ON CONFLICT(key) DO UPDATE SET value =
                 CASE WHEN config.value = 'true' THEN 'false' ELSE 'true' END
             RETURNING value",
        )
        .bind(key)
        .fetch_one(&self.pool.writer)
        .await
        .map_err(query_error)?;

        Ok(value)
    }
}
