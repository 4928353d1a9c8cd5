//! `bazaar bot`: drive one Bot Actor against a running server.
//!
//! The bot registers itself, ticks once immediately, then keeps ticking on a
//! fixed period drawn once per bot from `[min_interval_ms, max_interval_ms)`.
//! A failed tick is logged and the next tick acts as the retry.

use std::time::Duration;

use anyhow::{Context, Result};
use console::style;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use bazaar_core::actor::{BazaarClient, BotActor};
use bazaar_infra::client::HttpBazaarClient;
use bazaar_types::config::BotConfig;

/// Parameters for one bot process.
pub struct BotRun {
    pub name: String,
    pub host: String,
    pub port: u16,
    pub bot_port: Option<String>,
    pub config: BotConfig,
}

/// Draw the tick period once. An empty range collapses to its lower bound.
pub fn tick_period(config: &BotConfig, rng: &mut impl Rng) -> Duration {
    let ms = if config.min_interval_ms < config.max_interval_ms {
        rng.gen_range(config.min_interval_ms..config.max_interval_ms)
    } else {
        config.min_interval_ms
    };
    Duration::from_millis(ms)
}

/// Register `name`, tolerating an existing registration from a previous run.
pub async fn ensure_registered(
    client: &impl BazaarClient,
    name: &str,
    bot_port: Option<&str>,
) -> Result<()> {
    match client.register(name, bot_port).await {
        Ok(()) => {
            info!(bot = %name, "registered");
            Ok(())
        }
        Err(e) if e.is_conflict() => {
            info!(bot = %name, "already registered");
            Ok(())
        }
        Err(e) => Err(e).with_context(|| format!("failed to register bot '{name}'")),
    }
}

/// Run ticks until `shutdown` is cancelled.
pub async fn run_bot(run: BotRun, shutdown: CancellationToken, quiet: bool) -> Result<()> {
    let client = HttpBazaarClient::for_server(&run.host, run.port);
    ensure_registered(&client, &run.name, run.bot_port.as_deref()).await?;

    let mut rng = StdRng::from_entropy();
    let period = tick_period(&run.config, &mut rng);

    if !quiet {
        println!(
            "  {} Bot '{}' trading on {} every {:.1}s",
            style("*").green().bold(),
            style(&run.name).cyan(),
            style(client.base_url()).cyan(),
            period.as_secs_f64()
        );
        println!("  {}", style("Press Ctrl+C to stop").dim());
    }

    let mut actor = BotActor::new(run.name, client, run.config, rng);
    loop {
        match actor.tick().await {
            Ok(outcome) => {
                info!(bot = %actor.name(), last_seen = ?actor.cursor().last_seen(), ?outcome, "tick")
            }
            Err(e) => warn!(bot = %actor.name(), error = %e, "tick skipped"),
        }

        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = tokio::time::sleep(period) => {}
        }
    }

    info!(bot = %actor.name(), "bot stopped");
    Ok(())
}
