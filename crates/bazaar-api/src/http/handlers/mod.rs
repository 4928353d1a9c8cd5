//! HTTP request handlers.

pub mod health;
pub mod listing;
pub mod message;
pub mod silence;
pub mod social;
