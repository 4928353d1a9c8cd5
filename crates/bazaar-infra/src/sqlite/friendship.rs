//! SQLite friendship repository.
//!
//! Each friendship is stored as two directed rows so lookups only ever
//! filter on `bot_a`.

use bazaar_core::repository::friendship::FriendshipRepository;
use bazaar_types::error::RepositoryError;

use super::pool::DatabasePool;
use super::query_error;

/// SQLite-backed implementation of `FriendshipRepository`.
pub struct SqliteFriendshipRepository {
    pool: DatabasePool,
}

impl SqliteFriendshipRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl FriendshipRepository for SqliteFriendshipRepository {
    async fn befriend(&self, a: &str, b: &str) -> Result<(), RepositoryError> {
        let mut tx = self.pool.writer.begin().await.map_err(query_error)?;

        for (from, to) in [(a, b), (b, a)] {
            sqlx::query("INSERT OR IGNORE INTO friends (bot_a, bot_b) VALUES (?, ?)")
                .bind(from)
                .bind(to)
                .execute(&mut *tx)
                .await
                .map_err(query_error)?;
        }

        tx.commit().await.map_err(query_error)?;
        Ok(())
    }

    async fn friends_of(&self, bot: &str) -> Result<Vec<String>, RepositoryError> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT DISTINCT bot_b FROM friends WHERE bot_a = ? ORDER BY bot_b")
                .bind(bot)
                .fetch_all(&self.pool.reader)
                .await
                .map_err(query_error)?;

        Ok(rows.into_iter().map(|(name,)| name).collect())
    }
}
