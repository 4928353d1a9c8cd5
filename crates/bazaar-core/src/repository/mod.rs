//! Repository trait definitions (ports).
//!
//! These traits define the storage interface that the infrastructure layer
//! (bazaar-infra) implements. The store owns every row; services only reach
//! it through these traits.

pub mod bot;
pub mod config;
pub mod friendship;
pub mod listing;
pub mod message;
