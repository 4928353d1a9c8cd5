//! Bot messaging domain types.
//!
//! Messages are immutable once stored. Who may read a message is decided per
//! request by [`VisibilityScope`]: broadcasts, the bot's own traffic, and the
//! traffic of its friends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Reserved recipient value meaning "everyone".
pub const BROADCAST: &str = "broadcast";

/// Monotonic identifier assigned by the store. Higher ids are newer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub i64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a message is addressed.
///
/// Serialized as a plain string: `"broadcast"` or the recipient bot's name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Recipient {
    Broadcast,
    Bot(String),
}

impl Recipient {
    /// Parse a raw recipient. Blank input means broadcast.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == BROADCAST {
            Recipient::Broadcast
        } else {
            Recipient::Bot(trimmed.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Recipient::Broadcast => BROADCAST,
            Recipient::Bot(name) => name,
        }
    }

    pub fn is_broadcast(&self) -> bool {
        matches!(self, Recipient::Broadcast)
    }
}

impl From<String> for Recipient {
    fn from(s: String) -> Self {
        Recipient::parse(&s)
    }
}

impl From<Recipient> for String {
    fn from(r: Recipient) -> Self {
        r.as_str().to_string()
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message category. Feedback is public on the dashboard view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    #[default]
    General,
    Feedback,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageKind::General => write!(f, "general"),
            MessageKind::Feedback => write!(f, "feedback"),
        }
    }
}

impl FromStr for MessageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "general" => Ok(MessageKind::General),
            "feedback" => Ok(MessageKind::Feedback),
            other => Err(format!("unknown message type: '{other}'")),
        }
    }
}

/// A stored message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub sender: String,
    pub recipient: Recipient,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub timestamp: DateTime<Utc>,
}

/// A validated message ready to be appended.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMessage {
    pub sender: String,
    pub recipient: Recipient,
    pub content: String,
    pub kind: MessageKind,
}

/// Raw request to post a message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostMessageRequest {
    pub sender: Option<String>,
    pub recipient: Option<String>,
    pub content: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Raw request for the whisper endpoint (registered senders only).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WhisperRequest {
    pub query: Option<String>,
    pub sender: Option<String>,
    pub recipient: Option<String>,
}

/// The set of messages a given bot may read.
///
/// A message is visible to `bot` when it is a broadcast, when `bot` sent or
/// received it, or when one of `bot`'s friends sent or received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityScope {
    pub bot: String,
    pub friends: BTreeSet<String>,
}

impl VisibilityScope {
    pub fn new(bot: impl Into<String>, friends: impl IntoIterator<Item = String>) -> Self {
        Self {
            bot: bot.into(),
            friends: friends.into_iter().collect(),
        }
    }

    fn involves(&self, name: &str) -> bool {
        name == self.bot || self.friends.contains(name)
    }

    pub fn admits(&self, message: &Message) -> bool {
        match &message.recipient {
            Recipient::Broadcast => true,
            Recipient::Bot(recipient) => self.involves(&message.sender) || self.involves(recipient),
        }
    }
}
