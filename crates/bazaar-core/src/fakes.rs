//! In-memory port implementations for unit tests.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use bazaar_types::bot::{BotRegistration, NewBotRegistration};
use bazaar_types::error::RepositoryError;
use bazaar_types::listing::{Listing, ListingId, NewListing};
use bazaar_types::message::{Message, MessageId, MessageKind, NewMessage, VisibilityScope};
use chrono::Utc;

use crate::repository::bot::BotRepository;
use crate::repository::config::ConfigRepository;
use crate::repository::friendship::FriendshipRepository;
use crate::repository::listing::ListingRepository;
use crate::repository::message::MessageRepository;

/// Unsold and a case-sensitive substring match, like the SQLite store.
pub fn available_match(listing: &Listing, needle: &str) -> bool {
    !listing.sold && listing.item.contains(needle)
}

#[derive(Clone, Default)]
pub struct MemoryListings {
    pub rows: Arc<Mutex<Vec<Listing>>>,
}

impl ListingRepository for MemoryListings {
    async fn create(&self, listing: &NewListing) -> Result<Listing, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let created = Listing {
            id: ListingId(rows.len() as i64 + 1),
            item: listing.item.clone(),
            price: listing.price,
            seller: listing.seller.clone(),
            buyer: None,
            sold: false,
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn available(&self, needle: &str) -> Result<Vec<Listing>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|l| available_match(l, needle))
            .cloned()
            .collect())
    }

    async fn settle(&self, needle: &str, buyer: &str) -> Result<Option<Listing>, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(listing) = rows.iter_mut().find(|l| available_match(l, needle)) else {
            return Ok(None);
        };
        listing.sold = true;
        listing.buyer = Some(buyer.to_string());
        Ok(Some(listing.clone()))
    }

    async fn inventory(&self, buyer: &str) -> Result<Vec<Listing>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|l| l.sold && l.buyer.as_deref() == Some(buyer))
            .cloned()
            .collect())
    }
}

#[derive(Clone, Default)]
pub struct MemoryBots {
    pub rows: Arc<Mutex<Vec<BotRegistration>>>,
}

impl BotRepository for MemoryBots {
    async fn register(&self, bot: &NewBotRegistration) -> Result<BotRegistration, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|b| b.name == bot.name) {
            return Err(RepositoryError::Conflict(format!(
                "bot '{}' already exists",
                bot.name
            )));
        }
        let created = BotRegistration {
            id: rows.len() as i64 + 1,
            name: bot.name.clone(),
            port: bot.port.clone(),
            registered_at: Utc::now(),
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<BotRegistration>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|b| b.name == name).cloned())
    }
}

#[derive(Clone, Default)]
pub struct MemoryFriends {
    pub pairs: Arc<Mutex<BTreeSet<(String, String)>>>,
}

impl FriendshipRepository for MemoryFriends {
    async fn befriend(&self, a: &str, b: &str) -> Result<(), RepositoryError> {
        let mut pairs = self.pairs.lock().unwrap();
        pairs.insert((a.to_string(), b.to_string()));
        pairs.insert((b.to_string(), a.to_string()));
        Ok(())
    }

    async fn friends_of(&self, bot: &str) -> Result<Vec<String>, RepositoryError> {
        let pairs = self.pairs.lock().unwrap();
        Ok(pairs
            .iter()
            .filter(|(a, _)| a == bot)
            .map(|(_, b)| b.clone())
            .collect())
    }
}

/// Message store that writes invite friendships into `friends`.
///
/// With `fail_writes` set every append errors and nothing is stored.
#[derive(Clone, Default)]
pub struct MemoryMessages {
    pub rows: Arc<Mutex<Vec<Message>>>,
    pub friends: MemoryFriends,
    pub fail_writes: bool,
}

impl MemoryMessages {
    pub fn sharing(friends: MemoryFriends) -> Self {
        Self {
            friends,
            ..Self::default()
        }
    }

    fn newest_first<'a>(rows: impl Iterator<Item = &'a Message>) -> Vec<Message> {
        let mut out: Vec<Message> = rows.cloned().collect();
        out.sort_by(|a, b| b.id.cmp(&a.id));
        out
    }
}

impl MessageRepository for MemoryMessages {
    async fn append(&self, message: &NewMessage) -> Result<Message, RepositoryError> {
        self.append_with_invite(message, None).await
    }

    async fn append_with_invite(
        &self,
        message: &NewMessage,
        invite: Option<(&str, &str)>,
    ) -> Result<Message, RepositoryError> {
        if self.fail_writes {
            return Err(RepositoryError::Query("disk I/O error".to_string()));
        }
        if let Some((a, b)) = invite {
            self.friends.befriend(a, b).await?;
        }
        let mut rows = self.rows.lock().unwrap();
        let next = rows.iter().map(|m| m.id.0).max().unwrap_or(0) + 1;
        let stored = Message {
            id: MessageId(next),
            sender: message.sender.clone(),
            recipient: message.recipient.clone(),
            content: message.content.clone(),
            kind: message.kind,
            timestamp: Utc::now(),
        };
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn visible_to(
        &self,
        scope: &VisibilityScope,
        limit: u32,
    ) -> Result<Vec<Message>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        let mut out = Self::newest_first(rows.iter().filter(|m| scope.admits(m)));
        out.truncate(limit as usize);
        Ok(out)
    }

    async fn by_kind(&self, kind: MessageKind) -> Result<Vec<Message>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        Ok(Self::newest_first(rows.iter().filter(|m| m.kind == kind)))
    }

    async fn recent(&self, limit: Option<u32>) -> Result<Vec<Message>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        let mut out = Self::newest_first(rows.iter());
        if let Some(limit) = limit {
            out.truncate(limit as usize);
        }
        Ok(out)
    }

    async fn purge(&self) -> Result<u64, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let removed = rows.len() as u64;
        rows.clear();
        Ok(removed)
    }
}

#[derive(Clone, Default)]
pub struct MemoryConfig {
    pub values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryConfig {
    pub fn seeded() -> Self {
        let config = Self::default();
        config
            .values
            .lock()
            .unwrap()
            .insert("silence".to_string(), "false".to_string());
        config
    }
}

impl ConfigRepository for MemoryConfig {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    async fn toggle_flag(&self, key: &str) -> Result<String, RepositoryError> {
        let mut values = self.values.lock().unwrap();
        let next = match values.get(key).map(String::as_str) {
            Some("true") => "false",
            _ => "true",
        };
        values.insert(key.to_string(), next.to_string());
        Ok(next.to_string())
    }
}

/// Repository that fails every call, for fail-closed tests.
#[derive(Clone, Default)]
pub struct BrokenStore;

impl ListingRepository for BrokenStore {
    async fn create(&self, _listing: &NewListing) -> Result<Listing, RepositoryError> {
        Err(RepositoryError::Connection)
    }

    async fn available(&self, _needle: &str) -> Result<Vec<Listing>, RepositoryError> {
        Err(RepositoryError::Connection)
    }

    async fn settle(&self, _needle: &str, _buyer: &str) -> Result<Option<Listing>, RepositoryError> {
        Err(RepositoryError::Connection)
    }

    async fn inventory(&self, _buyer: &str) -> Result<Vec<Listing>, RepositoryError> {
        Err(RepositoryError::Connection)
    }
}
