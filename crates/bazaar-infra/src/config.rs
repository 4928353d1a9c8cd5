//! Configuration loading for the Bazaar.
//!
//! Reads `bazaar.toml` from the data directory (`~/.bazaar/` by default) and
//! deserializes it into [`BazaarConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::{Path, PathBuf};

use bazaar_types::config::{BazaarConfig, BotConfig};

/// Resolve the data directory.
///
/// Priority:
/// 1. `BAZAAR_DATA_DIR` environment variable
/// 2. `~/.bazaar`
/// 3. `.bazaar` in the current directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("BAZAAR_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".bazaar");
    }

    PathBuf::from(".bazaar")
}

/// Load configuration from `{data_dir}/bazaar.toml`.
///
/// A bot section that fails validation is replaced by the default bot
/// settings; the server and message sections are kept.
pub async fn load_config(data_dir: &Path) -> BazaarConfig {
    let config_path = data_dir.join("bazaar.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No bazaar.toml found at {}, using defaults", config_path.display());
            return BazaarConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return BazaarConfig::default();
        }
    };

    let mut config = match toml::from_str::<BazaarConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            return BazaarConfig::default();
        }
    };

    if let Err(reason) = config.bot.validate() {
        tracing::warn!("Invalid [bot] section in {}: {reason}, using defaults", config_path.display());
        config.bot = BotConfig::default();
    }

    config
}
