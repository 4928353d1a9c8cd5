//! Application state wiring all services together.
//!
//! Services are generic over repository traits; AppState pins them to the
//! SQLite implementations and shares them across handlers and CLI commands.

use std::path::PathBuf;
use std::sync::Arc;

use bazaar_core::service::friendship::FriendshipGraph;
use bazaar_core::service::ledger::ListingLedger;
use bazaar_core::service::messaging::MessagingEngine;
use bazaar_core::service::registry::BotRegistry;
use bazaar_core::service::silence::SilenceGate;
use bazaar_infra::sqlite::bot::SqliteBotRepository;
use bazaar_infra::sqlite::config::SqliteConfigRepository;
use bazaar_infra::sqlite::friendship::SqliteFriendshipRepository;
use bazaar_infra::sqlite::listing::SqliteListingRepository;
use bazaar_infra::sqlite::message::SqliteMessageRepository;
use bazaar_infra::sqlite::pool::{database_url, DatabasePool};
use bazaar_types::config::BazaarConfig;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteLedger = ListingLedger<SqliteListingRepository>;
pub type ConcreteRegistry = BotRegistry<SqliteBotRepository>;
pub type ConcreteGraph = FriendshipGraph<SqliteFriendshipRepository>;
pub type ConcreteMessaging = MessagingEngine<SqliteMessageRepository, SqliteFriendshipRepository>;
pub type ConcreteSilence = SilenceGate<SqliteConfigRepository>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<ConcreteLedger>,
    pub registry: Arc<ConcreteRegistry>,
    pub graph: Arc<ConcreteGraph>,
    pub messaging: Arc<ConcreteMessaging>,
    pub silence: Arc<ConcreteSilence>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Open (or create) `{data_dir}/bazaar.db` and wire every service.
    pub async fn init(data_dir: PathBuf, config: BazaarConfig) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(&data_dir).await?;

        let db_pool = DatabasePool::new(&database_url(&data_dir)).await?;
        Ok(Self::from_pool(db_pool, config, data_dir))
    }

    /// Wire services over an already opened pool.
    pub fn from_pool(db_pool: DatabasePool, config: BazaarConfig, data_dir: PathBuf) -> Self {
        let ledger = ListingLedger::new(SqliteListingRepository::new(db_pool.clone()));
        let registry = BotRegistry::new(SqliteBotRepository::new(db_pool.clone()));
        let graph = FriendshipGraph::new(SqliteFriendshipRepository::new(db_pool.clone()));

        // The messaging engine reads friendships through its own graph handle.
        let messaging = MessagingEngine::new(
            SqliteMessageRepository::new(db_pool.clone()),
            FriendshipGraph::new(SqliteFriendshipRepository::new(db_pool.clone())),
            config.messages,
        );
        let silence = SilenceGate::new(SqliteConfigRepository::new(db_pool));

        Self {
            ledger: Arc::new(ledger),
            registry: Arc::new(registry),
            graph: Arc::new(graph),
            messaging: Arc::new(messaging),
            silence: Arc::new(silence),
            data_dir,
        }
    }
}
