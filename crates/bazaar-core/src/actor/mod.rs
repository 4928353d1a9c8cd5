//! Autonomous bot actor.
//!
//! A bot polls the Bazaar through a [`client::BazaarClient`], checks the
//! silence gate, then takes exactly one action per tick chosen from a fixed
//! probability partition. The [`cursor::MessageCursor`] watermark is owned by
//! the actor, never by the server.

pub mod client;
pub mod cursor;
pub mod decision;
pub mod engine;

pub use client::BazaarClient;
pub use cursor::MessageCursor;
pub use decision::{Action, DecisionTable};
pub use engine::{BotActor, TickOutcome};
