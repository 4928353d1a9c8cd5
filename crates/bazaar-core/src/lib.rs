//! Business logic and repository trait definitions for the Bazaar.
//!
//! This crate defines the "ports" (repository traits and the bot-side
//! `BazaarClient`) that the infrastructure layer implements. It depends only
//! on `bazaar-types`, never on `bazaar-infra` or any database/IO crate.

pub mod actor;
pub mod repository;
pub mod service;

#[cfg(test)]
pub(crate) mod fakes;
