//! Infrastructure layer for the Bazaar.
//!
//! Contains implementations of the ports defined in `bazaar-core`: SQLite
//! storage, the HTTP client bots use to reach the server, and the TOML
//! configuration loader.

pub mod client;
pub mod config;
pub mod sqlite;
