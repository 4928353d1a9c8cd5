//! Messaging and visibility engine.
//!
//! Messages are appended and never edited. Reads are computed per request:
//! a bot sees broadcasts, its own traffic, and anything its friends sent or
//! received, newest first and capped at the configured page size. There is
//! no push; bots poll.

use bazaar_types::config::MessagesConfig;
use bazaar_types::error::BazaarError;
use bazaar_types::message::{
    Message, MessageKind, NewMessage, PostMessageRequest, Recipient, VisibilityScope,
    WhisperRequest,
};
use tracing::{debug, info};

use crate::repository::bot::BotRepository;
use crate::repository::friendship::FriendshipRepository;
use crate::repository::message::MessageRepository;
use crate::service::friendship::{FriendshipGraph, ensure_distinct};
use crate::service::registry::BotRegistry;
use crate::service::require;

pub struct MessagingEngine<M: MessageRepository, F: FriendshipRepository> {
    messages: M,
    graph: FriendshipGraph<F>,
    config: MessagesConfig,
}

impl<M: MessageRepository, F: FriendshipRepository> MessagingEngine<M, F> {
    pub fn new(messages: M, graph: FriendshipGraph<F>, config: MessagesConfig) -> Self {
        Self {
            messages,
            graph,
            config,
        }
    }

    /// Append a message. Recipient defaults to broadcast, type to general.
    pub async fn post(&self, request: PostMessageRequest) -> Result<Message, BazaarError> {
        let sender = require("sender", request.sender)?;
        let content = require("content", request.content)?;
        let recipient = Recipient::parse(request.recipient.as_deref().unwrap_or_default());
        let kind = match request.kind.as_deref().map(str::trim) {
            None | Some("") => MessageKind::General,
            Some(raw) => raw.parse().map_err(BazaarError::Validation)?,
        };

        let message = self
            .messages
            .append(&NewMessage {
                sender,
                recipient,
                content,
                kind,
            })
            .await?;

        info!(id = %message.id, sender = %message.sender, recipient = %message.recipient, kind = %message.kind, "messaged");
        Ok(message)
    }

    /// Messages visible to `bot`, newest first, at most `page_size`.
    pub async fn visible(&self, bot: Option<String>) -> Result<Vec<Message>, BazaarError> {
        let bot = require("bot", bot)?;
        let friends = self.graph.friends_of(&bot).await?;
        let scope = VisibilityScope::new(bot, friends);
        debug!(bot = %scope.bot, friends = scope.friends.len(), "computing visible messages");
        Ok(self.messages.visible_to(&scope, self.config.page_size).await?)
    }

    /// Every feedback message, newest first, regardless of visibility.
    pub async fn feedback(&self) -> Result<Vec<Message>, BazaarError> {
        Ok(self.messages.by_kind(MessageKind::Feedback).await?)
    }

    /// Administrative view of the newest messages, or all when `limit` is `None`.
    pub async fn recent(&self, limit: Option<u32>) -> Result<Vec<Message>, BazaarError> {
        Ok(self.messages.recent(limit).await?)
    }

    /// Delete every message. Maintenance only, never exposed over HTTP.
    pub async fn purge(&self) -> Result<u64, BazaarError> {
        let removed = self.messages.purge().await?;
        info!(removed, "messages purged");
        Ok(removed)
    }

    /// Store a whisper from a registered bot.
    ///
    /// When the query starts with the invite marker, the sender is also
    /// befriended with the invite target: the explicit recipient, or the first
    /// word after the marker for broadcasts. The friendship and the message
    /// are stored together; a failed write leaves neither behind.
    pub async fn whisper<B: BotRepository>(
        &self,
        registry: &BotRegistry<B>,
        request: WhisperRequest,
    ) -> Result<Message, BazaarError> {
        let query = require("query", request.query)?;
        let sender = require("sender", request.sender)?;
        registry.ensure_registered(&sender).await?;

        let recipient = Recipient::parse(request.recipient.as_deref().unwrap_or_default());
        let invitee = invite_target(&self.config.invite_marker, &query, &recipient)?;
        if let Some(friend) = &invitee {
            ensure_distinct(&sender, friend)?;
        }

        let new = NewMessage {
            sender,
            recipient,
            content: query,
            kind: MessageKind::General,
        };
        let invite = invitee.as_deref().map(|friend| (new.sender.as_str(), friend));
        let message = self.messages.append_with_invite(&new, invite).await?;

        info!(id = %message.id, sender = %message.sender, invite = ?invitee, "whisper saved");
        Ok(message)
    }
}

/// Resolve who a whisper invites, if it is an invite at all.
fn invite_target(
    marker: &str,
    query: &str,
    recipient: &Recipient,
) -> Result<Option<String>, BazaarError> {
    let Some(rest) = query.strip_prefix(marker) else {
        return Ok(None);
    };
    if let Recipient::Bot(name) = recipient {
        return Ok(Some(name.clone()));
    }
    rest.split_whitespace()
        .next()
        .map(|name| Some(name.to_string()))
        .ok_or_else(|| BazaarError::Validation("invite has no target bot".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::{MemoryBots, MemoryFriends, MemoryMessages};
    use bazaar_types::bot::RegisterBotRequest;

    struct Fixture {
        engine: MessagingEngine<MemoryMessages, MemoryFriends>,
        graph: FriendshipGraph<MemoryFriends>,
        registry: BotRegistry<MemoryBots>,
        messages: MemoryMessages,
    }

    fn fixture(page_size: u32) -> Fixture {
        let friends = MemoryFriends::default();
        let messages = MemoryMessages::sharing(friends.clone());
        let config = MessagesConfig {
            page_size,
            ..MessagesConfig::default()
        };
        Fixture {
            engine: MessagingEngine::new(
                messages.clone(),
                FriendshipGraph::new(friends.clone()),
                config,
            ),
            graph: FriendshipGraph::new(friends),
            registry: BotRegistry::new(MemoryBots::default()),
            messages,
        }
    }

    fn post(sender: &str, recipient: &str, content: &str, kind: &str) -> PostMessageRequest {
        PostMessageRequest {
            sender: Some(sender.to_string()),
            recipient: Some(recipient.to_string()),
            content: Some(content.to_string()),
            kind: Some(kind.to_string()),
        }
    }

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[tokio::test]
    async fn test_feedback_scenario() {
        let f = fixture(100);
        f.engine
            .post(post("bot1", "broadcast", "hi", "feedback"))
            .await
            .unwrap();

        let feedback = f.engine.feedback().await.unwrap();
        assert_eq!(feedback.len(), 1);
        assert_eq!(feedback[0].content, "hi");

        let missing_sender = PostMessageRequest {
            sender: None,
            ..post("bot1", "broadcast", "again", "feedback")
        };
        assert!(matches!(
            f.engine.post(missing_sender).await,
            Err(BazaarError::Validation(_))
        ));
        assert_eq!(f.engine.feedback().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_post_defaults() {
        let f = fixture(100);
        let message = f
            .engine
            .post(PostMessageRequest {
                sender: some("bot1"),
                content: some("hello"),
                ..PostMessageRequest::default()
            })
            .await
            .unwrap();
        assert!(message.recipient.is_broadcast());
        assert_eq!(message.kind, MessageKind::General);
    }

    #[tokio::test]
    async fn test_post_rejects_unknown_type() {
        let f = fixture(100);
        let result = f.engine.post(post("bot1", "bot2", "x", "shout")).await;
        assert!(matches!(result, Err(BazaarError::Validation(_))));
        assert!(f.messages.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_friend_traffic_is_visible() {
        let f = fixture(100);
        f.graph.invite(some("bot1"), some("bot2")).await.unwrap();
        f.engine.post(post("bot1", "bot3", "x", "general")).await.unwrap();
        f.engine.post(post("bot4", "bot5", "private", "general")).await.unwrap();

        let visible = f.engine.visible(some("bot2")).await.unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].content, "x");
    }

    #[tokio::test]
    async fn test_visible_includes_broadcast_and_own_traffic_newest_first() {
        let f = fixture(100);
        f.engine.post(post("bot9", "broadcast", "a", "general")).await.unwrap();
        f.engine.post(post("bot1", "bot9", "b", "general")).await.unwrap();
        f.engine.post(post("bot9", "bot1", "c", "general")).await.unwrap();

        let visible = f.engine.visible(some("bot1")).await.unwrap();
        let contents: Vec<&str> = visible.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["c", "b", "a"]);
    }

    #[tokio::test]
    async fn test_visible_truncates_to_page_size() {
        let f = fixture(3);
        for i in 0..5 {
            f.engine
                .post(post("bot1", "broadcast", &format!("m{i}"), "general"))
                .await
                .unwrap();
        }
        let visible = f.engine.visible(some("bot2")).await.unwrap();
        assert_eq!(visible.len(), 3);
        assert_eq!(visible[0].content, "m4");
    }

    #[tokio::test]
    async fn test_whisper_requires_registered_sender() {
        let f = fixture(100);
        let result = f
            .engine
            .whisper(
                &f.registry,
                WhisperRequest {
                    query: some("hello"),
                    sender: some("ghost"),
                    recipient: None,
                },
            )
            .await;
        assert!(matches!(result, Err(BazaarError::Unauthorized(_))));
        assert!(f.messages.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_whisper_invite_creates_friendship() {
        let f = fixture(100);
        f.registry
            .register(RegisterBotRequest {
                name: some("bot1"),
                port: None,
            })
            .await
            .unwrap();

        let message = f
            .engine
            .whisper(
                &f.registry,
                WhisperRequest {
                    query: some("/invite bot2 let's trade"),
                    sender: some("bot1"),
                    recipient: None,
                },
            )
            .await
            .unwrap();
        assert!(message.recipient.is_broadcast());
        assert_eq!(f.graph.friends(some("bot2")).await.unwrap(), vec!["bot1"]);
    }

    #[tokio::test]
    async fn test_whisper_invite_prefers_explicit_recipient() {
        let f = fixture(100);
        f.registry
            .register(RegisterBotRequest {
                name: some("bot1"),
                port: None,
            })
            .await
            .unwrap();

        f.engine
            .whisper(
                &f.registry,
                WhisperRequest {
                    query: some("/invite"),
                    sender: some("bot1"),
                    recipient: some("bot3"),
                },
            )
            .await
            .unwrap();
        assert_eq!(f.graph.friends(some("bot1")).await.unwrap(), vec!["bot3"]);
    }

    #[tokio::test]
    async fn test_whisper_invite_rolls_back_when_store_fails() {
        let friends = MemoryFriends::default();
        let messages = MemoryMessages {
            fail_writes: true,
            ..MemoryMessages::sharing(friends.clone())
        };
        let engine = MessagingEngine::new(
            messages,
            FriendshipGraph::new(friends.clone()),
            MessagesConfig::default(),
        );
        let registry = BotRegistry::new(MemoryBots::default());
        registry
            .register(RegisterBotRequest {
                name: some("bot1"),
                port: None,
            })
            .await
            .unwrap();

        let result = engine
            .whisper(
                &registry,
                WhisperRequest {
                    query: some("/invite bot2"),
                    sender: some("bot1"),
                    recipient: None,
                },
            )
            .await;
        assert!(result.is_err());
        assert!(friends.pairs.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_whisper_self_invite_stores_nothing() {
        let f = fixture(100);
        f.registry
            .register(RegisterBotRequest {
                name: some("bot1"),
                port: None,
            })
            .await
            .unwrap();

        let result = f
            .engine
            .whisper(
                &f.registry,
                WhisperRequest {
                    query: some("/invite bot1"),
                    sender: some("bot1"),
                    recipient: None,
                },
            )
            .await;
        assert!(matches!(result, Err(BazaarError::Validation(_))));
        assert!(f.messages.rows.lock().unwrap().is_empty());
        assert!(f.graph.friends(some("bot1")).await.unwrap().is_empty());
    }

    #[test]
    fn test_invite_target() {
        let broadcast = Recipient::Broadcast;
        assert_eq!(invite_target("/invite", "hello", &broadcast).unwrap(), None);
        assert_eq!(
            invite_target("/invite", "/invite bot2", &broadcast).unwrap(),
            Some("bot2".to_string())
        );
        assert!(invite_target("/invite", "/invite   ", &broadcast).is_err());
    }
}
