//! One bot's tick loop body.

use bazaar_types::config::BotConfig;
use bazaar_types::error::ClientError;
use bazaar_types::message::{MessageKind, NewMessage, Recipient};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::info;

use super::client::BazaarClient;
use super::cursor::MessageCursor;
use super::decision::{Action, DecisionTable};

/// Feedback posted when a bot has nothing new to read.
pub const WISHES: &[&str] = &[
    "I want to be able to lend stuff on Silent Bazaar, like a bike for a week in June.",
    "I want a way to schedule recurring listings, like services every weekend.",
    "I want to group items into bundles for bulk sales, e.g., a set of tools at a discount.",
    "I want better search filters, like by price range or location.",
    "I want private messaging channels for negotiations.",
    "I want integration with external APIs for real prices.",
    "I want a rating system for sellers to build trust.",
    "I want notifications for when items match my watchlist.",
];

/// What a tick did.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// The silence gate was set; nothing was touched.
    Silenced,
    /// A settle for `item` went through. The server picks the lowest-id
    /// unsold match, which need not be the offer that prompted the buy.
    Bought { item: String },
    TooExpensive { item: String, price: f64 },
    NothingToBuy { item: String },
    Listed { item: String, price: f64 },
    Resold { item: String, price: f64 },
    NoInventory,
    Replied { to: String, item: String },
    /// The newest unseen message was our own.
    IgnoredOwn,
    /// The newest unseen message asked for nothing.
    Unanswered { from: String },
    Wished { wish: String },
    Idle,
}

pub struct BotActor<C: BazaarClient, R: Rng + Send> {
    name: String,
    client: C,
    config: BotConfig,
    decisions: DecisionTable,
    cursor: MessageCursor,
    rng: R,
}

impl<C: BazaarClient, R: Rng + Send> BotActor<C, R> {
    pub fn new(name: impl Into<String>, client: C, config: BotConfig, rng: R) -> Self {
        let decisions = DecisionTable::from_config(&config);
        Self {
            name: name.into(),
            client,
            config,
            decisions,
            cursor: MessageCursor::new(),
            rng,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cursor(&self) -> MessageCursor {
        self.cursor
    }

    #[cfg(test)]
    pub(crate) fn client(&self) -> &C {
        &self.client
    }

    /// Run one tick: consult the silence gate, then take one action.
    ///
    /// Any error means the tick was skipped; the next tick is the retry.
    pub async fn tick(&mut self) -> Result<TickOutcome, ClientError> {
        if self.client.is_silenced().await? {
            info!(bot = %self.name, "silenced, skipping action");
            return Ok(TickOutcome::Silenced);
        }

        let roll = self.rng.gen_range(0.0..1.0);
        match self.decisions.choose(roll) {
            Action::Buy => self.query_and_buy().await,
            Action::List => self.list_random_item().await,
            Action::Resell => self.resell_from_inventory().await,
            Action::Message => self.handle_messages().await,
        }
    }

    fn random_item(&mut self) -> String {
        self.config
            .items
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_else(|| "book".to_string())
    }

    /// Price-check the cheapest foreign offer, then settle by item name.
    async fn query_and_buy(&mut self) -> Result<TickOutcome, ClientError> {
        let target = self.random_item();
        info!(bot = %self.name, item = %target, "searching");

        let offers = self.client.available(&target).await?;
        let cheapest = offers
            .into_iter()
            .filter(|l| l.seller != self.name)
            .min_by(|a, b| a.price.total_cmp(&b.price));

        let Some(cheapest) = cheapest else {
            info!(bot = %self.name, item = %target, "nothing suitable available");
            return Ok(TickOutcome::NothingToBuy { item: target });
        };

        if cheapest.price >= self.config.buy_price_ceiling {
            info!(bot = %self.name, item = %cheapest.item, price = cheapest.price, "too expensive, skipping");
            return Ok(TickOutcome::TooExpensive {
                item: cheapest.item,
                price: cheapest.price,
            });
        }

        info!(bot = %self.name, item = %cheapest.item, offer_seller = %cheapest.seller, offer_price = cheapest.price, "buying");
        self.client.settle(&cheapest.item, &self.name).await?;
        Ok(TickOutcome::Bought {
            item: cheapest.item,
        })
    }

    async fn list_random_item(&mut self) -> Result<TickOutcome, ClientError> {
        let item = self.random_item();
        let price = f64::from(
            self.rng
                .gen_range(self.config.min_price..=self.config.max_price),
        );
        info!(bot = %self.name, item = %item, price, "listing");
        self.client.list(&item, price, &self.name).await?;
        Ok(TickOutcome::Listed { item, price })
    }

    async fn resell_from_inventory(&mut self) -> Result<TickOutcome, ClientError> {
        let inventory = self.client.inventory(&self.name).await?;
        let Some(owned) = inventory.choose(&mut self.rng) else {
            info!(bot = %self.name, "no inventory to resell");
            return Ok(TickOutcome::NoInventory);
        };

        let price = round_cents(owned.price * self.config.resell_markup);
        info!(bot = %self.name, item = %owned.item, original = owned.price, price, "reselling");
        self.client.list(&owned.item, price, &self.name).await?;
        Ok(TickOutcome::Resold {
            item: owned.item.clone(),
            price,
        })
    }

    async fn handle_messages(&mut self) -> Result<TickOutcome, ClientError> {
        let visible = self.client.messages(&self.name).await?;
        let fresh = self.cursor.take_new(visible);

        let Some(latest) = fresh.into_iter().next() else {
            return self.maybe_wish().await;
        };

        info!(bot = %self.name, from = %latest.sender, content = %latest.content, "received new message");
        if latest.sender == self.name {
            return Ok(TickOutcome::IgnoredOwn);
        }
        if !is_request(&latest.content) {
            return Ok(TickOutcome::Unanswered {
                from: latest.sender,
            });
        }

        let item = match extract_wish_item(&latest.content) {
            Some(item) => item,
            None => self.random_item(),
        };
        let reply = format!("Sure, I can lend a {item} for a week! Listing it now.");
        self.client
            .post(&NewMessage {
                sender: self.name.clone(),
                recipient: Recipient::Bot(latest.sender.clone()),
                content: reply,
                kind: MessageKind::General,
            })
            .await?;
        self.list_random_item().await?;

        Ok(TickOutcome::Replied {
            to: latest.sender,
            item,
        })
    }

    async fn maybe_wish(&mut self) -> Result<TickOutcome, ClientError> {
        if !self.rng.gen_bool(self.config.wish_probability) {
            return Ok(TickOutcome::Idle);
        }
        let wish = WISHES
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(WISHES[0])
            .to_string();
        info!(bot = %self.name, wish = %wish, "expressing wish");
        self.client
            .post(&NewMessage {
                sender: self.name.clone(),
                recipient: Recipient::Broadcast,
                content: wish.clone(),
                kind: MessageKind::Feedback,
            })
            .await?;
        Ok(TickOutcome::Wished { wish })
    }
}

fn round_cents(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}

/// Whether a message asks for something.
fn is_request(content: &str) -> bool {
    content.contains("want") || content.contains("Need")
}

/// The word after `lend a `, e.g. "bike" in "I want to lend a bike".
fn extract_wish_item(content: &str) -> Option<String> {
    let (_, rest) = content.split_once("lend a ")?;
    let word: String = rest
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    (!word.is_empty()).then_some(word)
}
