//! SQLite message repository implementation.
//!
//! Messages are append-only. Visibility is evaluated in SQL against the
//! reader's name plus its friends, so only admitted rows leave the store.

use bazaar_core::repository::message::MessageRepository;
use bazaar_types::error::RepositoryError;
use bazaar_types::message::{
    Message, MessageId, MessageKind, NewMessage, Recipient, VisibilityScope, BROADCAST,
};
use chrono::Utc;
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime, query_error};

/// SQLite-backed implementation of `MessageRepository`.
pub struct SqliteMessageRepository {
    pool: DatabasePool,
}

impl SqliteMessageRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct MessageRow {
    id: i64,
    sender: String,
    recipient: String,
    content: String,
    kind: String,
    timestamp: String,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            sender: row.try_get("sender")?,
            recipient: row.try_get("recipient")?,
            content: row.try_get("content")?,
            kind: row.try_get("type")?,
            timestamp: row.try_get("timestamp")?,
        })
    }

    fn into_message(self) -> Result<Message, RepositoryError> {
        let kind: MessageKind = self.kind.parse().map_err(RepositoryError::Query)?;
        Ok(Message {
            id: MessageId(self.id),
            sender: self.sender,
            recipient: Recipient::parse(&self.recipient),
            content: self.content,
            kind,
            timestamp: parse_datetime(&self.timestamp)?,
        })
    }
}

fn rows_to_messages(rows: &[sqlx::sqlite::SqliteRow]) -> Result<Vec<Message>, RepositoryError> {
    rows.iter()
        .map(|r| {
            MessageRow::from_row(r)
                .map_err(query_error)
                .and_then(MessageRow::into_message)
        })
        .collect()
}

impl MessageRepository for SqliteMessageRepository {
    async fn append(&self, message: &NewMessage) -> Result<Message, RepositoryError> {
        self.append_with_invite(message, None).await
    }

    async fn append_with_invite(
        &self,
        message: &NewMessage,
        invite: Option<(&str, &str)>,
    ) -> Result<Message, RepositoryError> {
        let timestamp = Utc::now();
        let mut tx = self.pool.writer.begin().await.map_err(query_error)?;

        if let Some((a, b)) = invite {
            for (from, to) in [(a, b), (b, a)] {
                sqlx::query("INSERT OR IGNORE INTO friends (bot_a, bot_b) VALUES (?, ?)")
                    .bind(from)
                    .bind(to)
                    .execute(&mut *tx)
                    .await
                    .map_err(query_error)?;
            }
        }

        let result = sqlx::query(
            "INSERT INTO messages (sender, recipient, content, type, timestamp)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&message.sender)
        .bind(message.recipient.as_str())
        .bind(&message.content)
        .bind(message.kind.to_string())
        .bind(format_datetime(&timestamp))
        .execute(&mut *tx)
        .await
        .map_err(query_error)?;

        tx.commit().await.map_err(query_error)?;

        Ok(Message {
            id: MessageId(result.last_insert_rowid()),
            sender: message.sender.clone(),
            recipient: message.recipient.clone(),
            content: message.content.clone(),
            kind: message.kind,
            timestamp,
        })
    }

    async fn visible_to(
        &self,
        scope: &VisibilityScope,
        limit: u32,
    ) -> Result<Vec<Message>, RepositoryError> {
        // Bound as one JSON array to stay clear of SQLite's variable limit.
        let involved: Vec<&str> = std::iter::once(scope.bot.as_str())
            .chain(scope.friends.iter().map(String::as_str))
            .collect();
        let involved = serde_json::to_string(&involved)
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let rows = sqlx::query(
            "WITH involved AS (SELECT value AS name FROM json_each(?))
             SELECT * FROM messages
             WHERE recipient = ?
                OR sender IN (SELECT name FROM involved)
                OR recipient IN (SELECT name FROM involved)
             ORDER BY id DESC LIMIT ?",
        )
        .bind(involved)
        .bind(BROADCAST)
        .bind(i64::from(limit))
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_error)?;

        rows_to_messages(&rows)
    }

    async fn by_kind(&self, kind: MessageKind) -> Result<Vec<Message>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM messages WHERE type = ? ORDER BY id DESC")
            .bind(kind.to_string())
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        rows_to_messages(&rows)
    }

    async fn recent(&self, limit: Option<u32>) -> Result<Vec<Message>, RepositoryError> {
        // SQLite treats a negative LIMIT as unbounded.
        let limit = limit.map_or(-1, i64::from);
        let rows = sqlx::query("SELECT * FROM messages ORDER BY id DESC LIMIT ?")
            .bind(limit)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        rows_to_messages(&rows)
    }

    async fn purge(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM messages")
            .execute(&self.pool.writer)
            .await
            .map_err(query_error)?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::friendship::SqliteFriendshipRepository;
    use crate::sqlite::test_pool;
    use bazaar_core::repository::friendship::FriendshipRepository;

    fn new_message(sender: &str, recipient: &str, content: &str) -> NewMessage {
        NewMessage {
            sender: sender.to_string(),
            recipient: Recipient::parse(recipient),
            content: content.to_string(),
            kind: MessageKind::General,
        }
    }

    fn contents(messages: &[Message]) -> Vec<&str> {
        messages.iter().map(|m| m.content.as_str()).collect()
    }

    #[tokio::test]
    async fn test_append_assigns_ids_and_round_trips() {
        let repo = SqliteMessageRepository::new(test_pool().await);
        let first = repo.append(&new_message("bot1", "", "hello")).await.unwrap();
        let second = repo.append(&new_message("bot1", "bot2", "psst")).await.unwrap();
        assert!(second.id > first.id);
        assert_eq!(first.recipient, Recipient::Broadcast);

        let stored = repo.recent(None).await.unwrap();
        assert_eq!(stored[0].id, second.id);
        assert_eq!(stored[0].recipient, Recipient::Bot("bot2".to_string()));
        assert_eq!(stored[1].content, "hello");
    }

    #[tokio::test]
    async fn test_visibility_without_friends() {
        let repo = SqliteMessageRepository::new(test_pool().await);
        repo.append(&new_message("bot1", "bot2", "m1")).await.unwrap();
        repo.append(&new_message("bot3", "", "m2")).await.unwrap();
        repo.append(&new_message("bot4", "bot5", "m3")).await.unwrap();

        let scope = VisibilityScope::new("bot2", Vec::new());
        let visible = repo.visible_to(&scope, 100).await.unwrap();
        assert_eq!(contents(&visible), vec!["m2", "m1"]);
    }

    #[tokio::test]
    async fn test_visibility_includes_friend_traffic() {
        let repo = SqliteMessageRepository::new(test_pool().await);
        repo.append(&new_message("bot4", "bot5", "m3")).await.unwrap();
        repo.append(&new_message("bot6", "bot7", "m4")).await.unwrap();

        let scope = VisibilityScope::new("bot2", vec!["bot5".to_string()]);
        let visible = repo.visible_to(&scope, 100).await.unwrap();
        assert_eq!(contents(&visible), vec!["m3"]);
    }

    #[tokio::test]
    async fn test_visibility_matches_scope_rule() {
        let repo = SqliteMessageRepository::new(test_pool().await);
        let pairs = [
            ("a", "b"),
            ("b", "c"),
            ("c", ""),
            ("d", "e"),
            ("e", "a"),
            ("f", "g"),
        ];
        for (i, (from, to)) in pairs.iter().enumerate() {
            repo.append(&new_message(from, to, &format!("m{i}")))
                .await
                .unwrap();
        }

        let scope = VisibilityScope::new("a", vec!["g".to_string()]);
        let all = repo.recent(None).await.unwrap();
        let expected: Vec<&Message> = all.iter().filter(|m| scope.admits(m)).collect();
        let visible = repo.visible_to(&scope, 100).await.unwrap();
        assert_eq!(visible.iter().collect::<Vec<_>>(), expected);
    }

    #[tokio::test]
    async fn test_visibility_respects_limit_newest_first() {
        let repo = SqliteMessageRepository::new(test_pool().await);
        for i in 0..5 {
            repo.append(&new_message("bot1", "", &format!("m{i}")))
                .await
                .unwrap();
        }

        let scope = VisibilityScope::new("bot9", Vec::new());
        let visible = repo.visible_to(&scope, 2).await.unwrap();
        assert_eq!(contents(&visible), vec!["m4", "m3"]);
    }

    #[tokio::test]
    async fn test_visibility_with_many_friends() {
        let repo = SqliteMessageRepository::new(test_pool().await);
        repo.append(&new_message("friend39999", "bot7", "m1")).await.unwrap();
        repo.append(&new_message("bot6", "bot7", "m2")).await.unwrap();

        let friends: Vec<String> = (0..40_000).map(|i| format!("friend{i}")).collect();
        let scope = VisibilityScope::new("bot2", friends);
        let visible = repo.visible_to(&scope, 100).await.unwrap();
        assert_eq!(contents(&visible), vec!["m1"]);
    }

    #[tokio::test]
    async fn test_append_with_invite_stores_friendship_and_message() {
        let pool = test_pool().await;
        let repo = SqliteMessageRepository::new(pool.clone());
        let friends = SqliteFriendshipRepository::new(pool);

        let stored = repo
            .append_with_invite(&new_message("bot1", "", "/invite bot2"), Some(("bot1", "bot2")))
            .await
            .unwrap();
        assert_eq!(repo.recent(None).await.unwrap()[0].id, stored.id);
        assert_eq!(friends.friends_of("bot1").await.unwrap(), vec!["bot2"]);
        assert_eq!(friends.friends_of("bot2").await.unwrap(), vec!["bot1"]);
    }

    #[tokio::test]
    async fn test_append_with_invite_rolls_back_friendship() {
        let pool = test_pool().await;
        sqlx::query(
            "CREATE TRIGGER reject_messages BEFORE INSERT ON messages
             BEGIN SELECT RAISE(ABORT, 'disk I/O error'); END",
        )
        .execute(&pool.writer)
        .await
        .unwrap();
        let repo = SqliteMessageRepository::new(pool.clone());
        let friends = SqliteFriendshipRepository::new(pool);

        let result = repo
            .append_with_invite(&new_message("bot1", "", "/invite bot2"), Some(("bot1", "bot2")))
            .await;
        assert!(matches!(result, Err(RepositoryError::Query(_))));
        assert!(friends.friends_of("bot1").await.unwrap().is_empty());
        assert!(friends.friends_of("bot2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_by_kind_ignores_visibility() {
        let repo = SqliteMessageRepository::new(test_pool().await);
        let mut feedback = new_message("bot1", "bot2", "private praise");
        feedback.kind = MessageKind::Feedback;
        repo.append(&feedback).await.unwrap();
        repo.append(&new_message("bot1", "", "chatter")).await.unwrap();

        let found = repo.by_kind(MessageKind::Feedback).await.unwrap();
        assert_eq!(contents(&found), vec!["private praise"]);
        assert_eq!(found[0].kind, MessageKind::Feedback);
    }

    #[tokio::test]
    async fn test_recent_limit_and_purge() {
        let repo = SqliteMessageRepository::new(test_pool().await);
        for i in 0..3 {
            repo.append(&new_message("bot1", "", &format!("m{i}")))
                .await
                .unwrap();
        }

        assert_eq!(contents(&repo.recent(Some(1)).await.unwrap()), vec!["m2"]);
        assert_eq!(repo.purge().await.unwrap(), 3);
        assert!(repo.recent(None).await.unwrap().is_empty());
    }
}
