//! Shared domain types for the Bazaar.
//!
//! Listings, bot registrations, friendships, messages, configuration and the
//! error types shared by every layer.
//!
//! No infrastructure dependencies: only serde, chrono and thiserror.

pub mod bot;
pub mod config;
pub mod error;
pub mod listing;
pub mod message;
