//! Bot registration types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bot known to the Bazaar. The name is the bot's identity everywhere else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotRegistration {
    pub id: i64,
    pub name: String,
    /// Port the bot claims to listen on, if any.
    pub port: Option<String>,
    pub registered_at: DateTime<Utc>,
}

/// A validated registration ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBotRegistration {
    pub name: String,
    pub port: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterBotRequest {
    pub name: Option<String>,
    pub port: Option<String>,
}
