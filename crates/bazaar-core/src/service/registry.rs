//! Bot registry service.

use bazaar_types::bot::{BotRegistration, NewBotRegistration, RegisterBotRequest};
use bazaar_types::error::{BazaarError, RepositoryError};
use tracing::info;

use crate::repository::bot::BotRepository;
use crate::service::require;

pub struct BotRegistry<B: BotRepository> {
    bots: B,
}

impl<B: BotRepository> BotRegistry<B> {
    pub fn new(bots: B) -> Self {
        Self { bots }
    }

    /// Register a bot under a unique name.
    ///
    /// A second registration with the same name fails with `Conflict`; the
    /// existing row is never overwritten.
    pub async fn register(&self, request: RegisterBotRequest) -> Result<BotRegistration, BazaarError> {
        let name = require("name", request.name)?;
        let port = request
            .port
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        let bot = self
            .bots
            .register(&NewBotRegistration {
                name: name.clone(),
                port,
            })
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => {
                    BazaarError::Conflict(format!("bot '{name}' is already registered"))
                }
                other => other.into(),
            })?;

        info!(id = bot.id, name = %bot.name, "bot registered");
        Ok(bot)
    }

    /// Fail with `Unauthorized` unless `name` is a registered bot.
    pub async fn ensure_registered(&self, name: &str) -> Result<BotRegistration, BazaarError> {
        self.bots
            .get_by_name(name)
            .await?
            .ok_or_else(|| BazaarError::Unauthorized(format!("'{name}' is not a registered bot")))
    }
}
