//! Global silence gate.
//!
//! A single `"silence"` row in the config table. Bots consult it before every
//! action; the toggle is one atomic read-modify-write in the store.

use bazaar_types::error::BazaarError;
use tracing::{info, warn};

use crate::repository::config::ConfigRepository;

/// Config key holding the silence flag.
pub const SILENCE_KEY: &str = "silence";

pub struct SilenceGate<C: ConfigRepository> {
    config: C,
}

impl<C: ConfigRepository> SilenceGate<C> {
    pub fn new(config: C) -> Self {
        Self { config }
    }

    /// Flip the flag and return the new state.
    pub async fn toggle(&self) -> Result<bool, BazaarError> {
        let value = self.config.toggle_flag(SILENCE_KEY).await?;
        let silenced = value == "true";
        info!(silenced, "silence toggled");
        Ok(silenced)
    }

    /// Current state. An unseeded or unreadable value reads as not silenced.
    pub async fn is_silenced(&self) -> Result<bool, BazaarError> {
        match self.config.get(SILENCE_KEY).await?.as_deref() {
            Some("true") => Ok(true),
            Some("false") => Ok(false),
            Some(other) => {
                warn!(value = %other, "unexpected silence value, treating as false");
                Ok(false)
            }
            None => {
                warn!("silence flag not seeded, treating as false");
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::MemoryConfig;

    #[tokio::test]
    async fn test_toggle_round_trip() {
        let gate = SilenceGate::new(MemoryConfig::seeded());
        assert!(!gate.is_silenced().await.unwrap());

        assert!(gate.toggle().await.unwrap());
        assert!(gate.is_silenced().await.unwrap());

        assert!(!gate.toggle().await.unwrap());
        assert!(!gate.is_silenced().await.unwrap());
    }

    #[tokio::test]
    async fn test_unseeded_reads_false() {
        let gate = SilenceGate::new(MemoryConfig::default());
        assert!(!gate.is_silenced().await.unwrap());
        assert!(gate.toggle().await.unwrap());
    }
}
