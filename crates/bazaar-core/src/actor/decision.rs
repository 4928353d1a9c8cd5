//! Weighted choice among the four bot actions.

use bazaar_types::config::BotConfig;

/// One action per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Look for a random item and buy the cheapest acceptable offer.
    Buy,
    /// List a random item at a random price.
    List,
    /// Relist something from inventory at a markup.
    Resell,
    /// Read new messages, reply or post a wish.
    Message,
}

/// Partition of `[0, 1)`: `[0, buy)` buy, `[buy, list)` list,
/// `[list, resell)` resell, `[resell, 1)` message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionTable {
    buy_below: f64,
    list_below: f64,
    resell_below: f64,
}

impl DecisionTable {
    pub fn from_config(config: &BotConfig) -> Self {
        Self {
            buy_below: config.buy_below,
            list_below: config.list_below,
            resell_below: config.resell_below,
        }
    }

    pub fn choose(&self, roll: f64) -> Action {
        if roll < self.buy_below {
            Action::Buy
        } else if roll < self.list_below {
            Action::List
        } else if roll < self.resell_below {
            Action::Resell
        } else {
            Action::Message
        }
    }
}

impl Default for DecisionTable {
    fn default() -> Self {
        Self::from_config(&BotConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_partition() {
        let table = DecisionTable::default();
        assert_eq!(table.choose(0.0), Action::Buy);
        assert_eq!(table.choose(0.399), Action::Buy);
        assert_eq!(table.choose(0.4), Action::List);
        assert_eq!(table.choose(0.649), Action::List);
        assert_eq!(table.choose(0.65), Action::Resell);
        assert_eq!(table.choose(0.85), Action::Message);
        assert_eq!(table.choose(0.999), Action::Message);
    }

    #[test]
    fn test_degenerate_partition() {
        let config = BotConfig {
            buy_below: 0.0,
            list_below: 0.0,
            resell_below: 0.0,
            ..BotConfig::default()
        };
        let table = DecisionTable::from_config(&config);
        assert_eq!(table.choose(0.0), Action::Message);
    }
}
