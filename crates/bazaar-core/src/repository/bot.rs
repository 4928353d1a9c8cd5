//! Bot registration repository trait definition.

use bazaar_types::bot::{BotRegistration, NewBotRegistration};
use bazaar_types::error::RepositoryError;

pub trait BotRepository: Send + Sync {
    /// Register a bot. Returns `Conflict` if the name is already taken.
    fn register(
        &self,
        bot: &NewBotRegistration,
    ) -> impl std::future::Future<Output = Result<BotRegistration, RepositoryError>> + Send;

    fn get_by_name(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<Option<BotRegistration>, RepositoryError>> + Send;
}
