//! HTTP layer for the Bazaar.
//!
//! Axum router over GET endpoints with query parameters. Successful
//! mutations answer with a short plain-text word; reads answer with JSON.
//! Failures use a JSON error envelope.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
