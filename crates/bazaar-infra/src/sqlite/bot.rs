//! SQLite bot registration repository.

use bazaar_core::repository::bot::BotRepository;
use bazaar_types::bot::{BotRegistration, NewBotRegistration};
use bazaar_types::error::RepositoryError;
use chrono::Utc;
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime, query_error};

/// SQLite-backed implementation of `BotRepository`.
pub struct SqliteBotRepository {
    pool: DatabasePool,
}

impl SqliteBotRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct BotRow {
    id: i64,
    name: String,
    port: Option<String>,
    registered_at: String,
}

impl BotRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            port: row.try_get("port")?,
            registered_at: row.try_get("registered_at")?,
        })
    }

    fn into_registration(self) -> Result<BotRegistration, RepositoryError> {
        Ok(BotRegistration {
            id: self.id,
            name: self.name,
            port: self.port,
            registered_at: parse_datetime(&self.registered_at)?,
        })
    }
}

impl BotRepository for SqliteBotRepository {
    async fn register(&self, bot: &NewBotRegistration) -> Result<BotRegistration, RepositoryError> {
        let registered_at = Utc::now();
        let result = sqlx::query("INSERT INTO bots (name, port, registered_at) VALUES (?, ?, ?)")
            .bind(&bot.name)
            .bind(&bot.port)
            .bind(format_datetime(&registered_at))
            .execute(&self.pool.writer)
            .await;

        match result {
            Ok(done) => Ok(BotRegistration {
                id: done.last_insert_rowid(),
                name: bot.name.clone(),
                port: bot.port.clone(),
                registered_at,
            }),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => Err(
                RepositoryError::Conflict(format!("bot '{}' already exists", bot.name)),
            ),
            Err(e) => Err(query_error(e)),
        }
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<BotRegistration>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM bots WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        match row {
            Some(r) => {
                let bot_row = BotRow::from_row(&r).map_err(query_error)?;
                Ok(Some(bot_row.into_registration()?))
            }
            None => Ok(None),
        }
    }
}
