//! Configuration types for the Bazaar server and its bots.
//!
//! `BazaarConfig` represents `bazaar.toml` in the data directory. Every field
//! has a default, so an empty or missing file yields a working setup.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BazaarConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub messages: MessagesConfig,
    #[serde(default)]
    pub bot: BotConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesConfig {
    /// Maximum number of messages returned by a visibility query.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Whisper queries starting with this marker create a friendship.
    #[serde(default = "default_invite_marker")]
    pub invite_marker: String,
}

fn default_page_size() -> u32 {
    100
}

fn default_invite_marker() -> String {
    "/invite".to_string()
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            invite_marker: default_invite_marker(),
        }
    }
}

/// Tuning for the autonomous bot actor.
///
/// The three `*_below` thresholds partition `[0, 1)` into buy, list, resell
/// and message turns, in that order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default = "default_buy_below")]
    pub buy_below: f64,
    #[serde(default = "default_list_below")]
    pub list_below: f64,
    #[serde(default = "default_resell_below")]
    pub resell_below: f64,
    /// Chance of posting a feedback wish when there are no new messages.
    #[serde(default = "default_wish_probability")]
    pub wish_probability: f64,
    /// Only buy listings strictly cheaper than this.
    #[serde(default = "default_buy_price_ceiling")]
    pub buy_price_ceiling: f64,
    #[serde(default = "default_resell_markup")]
    pub resell_markup: f64,
    #[serde(default = "default_min_price")]
    pub min_price: u32,
    #[serde(default = "default_max_price")]
    pub max_price: u32,
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
    #[serde(default = "default_max_interval_ms")]
    pub max_interval_ms: u64,
    #[serde(default = "default_items")]
    pub items: Vec<String>,
}

fn default_buy_below() -> f64 {
    0.4
}

fn default_list_below() -> f64 {
    0.65
}

fn default_resell_below() -> f64 {
    0.85
}

fn default_wish_probability() -> f64 {
    0.5
}

fn default_buy_price_ceiling() -> f64 {
    10.0
}

fn default_resell_markup() -> f64 {
    1.2
}

fn default_min_price() -> u32 {
    1
}

fn default_max_price() -> u32 {
    20
}

fn default_min_interval_ms() -> u64 {
    3_000
}

fn default_max_interval_ms() -> u64 {
    10_000
}

fn default_items() -> Vec<String> {
    ["book", "laptop", "phone", "bike"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            buy_below: default_buy_below(),
            list_below: default_list_below(),
            resell_below: default_resell_below(),
            wish_probability: default_wish_probability(),
            buy_price_ceiling: default_buy_price_ceiling(),
            resell_markup: default_resell_markup(),
            min_price: default_min_price(),
            max_price: default_max_price(),
            min_interval_ms: default_min_interval_ms(),
            max_interval_ms: default_max_interval_ms(),
            items: default_items(),
        }
    }
}

impl BotConfig {
    /// Check the invariants the actor relies on.
    pub fn validate(&self) -> Result<(), String> {
        let ordered = 0.0 <= self.buy_below
            && self.buy_below <= self.list_below
            && self.list_below <= self.resell_below
            && self.resell_below <= 1.0;
        if !ordered {
            return Err(format!(
                "decision thresholds must satisfy 0 <= buy ({}) <= list ({}) <= resell ({}) <= 1",
                self.buy_below, self.list_below, self.resell_below
            ));
        }
        if !(0.0..=1.0).contains(&self.wish_probability) {
            return Err(format!(
                "wish_probability {} is outside [0, 1]",
                self.wish_probability
            ));
        }
        if self.min_price > self.max_price {
            return Err(format!(
                "min_price {} exceeds max_price {}",
                self.min_price, self.max_price
            ));
        }
        if self.min_interval_ms == 0 || self.min_interval_ms > self.max_interval_ms {
            return Err(format!(
                "tick interval [{}, {}] ms is invalid",
                self.min_interval_ms, self.max_interval_ms
            ));
        }
        if self.items.is_empty() {
            return Err("item pool is empty".to_string());
        }
        Ok(())
    }
}
