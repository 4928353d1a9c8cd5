//! Friendship graph service.
//!
//! Friendship is symmetric and permissive: either side may be an unregistered
//! name. It only widens what each side can see in the message feed.

use bazaar_types::error::BazaarError;
use tracing::info;

use crate::repository::friendship::FriendshipRepository;
use crate::service::require;

pub struct FriendshipGraph<F: FriendshipRepository> {
    friends: F,
}

impl<F: FriendshipRepository> FriendshipGraph<F> {
    pub fn new(friends: F) -> Self {
        Self { friends }
    }

    /// Make `a` and `b` friends in both directions. Repeating it is a no-op.
    pub async fn invite(&self, a: Option<String>, b: Option<String>) -> Result<(), BazaarError> {
        let a = require("bot", a)?;
        let b = require("friend", b)?;
        ensure_distinct(&a, &b)?;
        self.friends.befriend(&a, &b).await?;
        info!(a = %a, b = %b, "friendship created");
        Ok(())
    }

    /// Friends of `bot`, sorted and deduplicated.
    pub async fn friends(&self, bot: Option<String>) -> Result<Vec<String>, BazaarError> {
        let bot = require("bot", bot)?;
        self.friends_of(&bot).await
    }

    pub(crate) async fn friends_of(&self, bot: &str) -> Result<Vec<String>, BazaarError> {
        let mut friends = self.friends.friends_of(bot).await?;
        friends.sort();
        friends.dedup();
        Ok(friends)
    }
}

/// A bot cannot befriend itself.
pub(crate) fn ensure_distinct(a: &str, b: &str) -> Result<(), BazaarError> {
    if a == b {
        return Err(BazaarError::Validation(format!(
            "'{a}' cannot befriend itself"
        )));
    }
    Ok(())
}
