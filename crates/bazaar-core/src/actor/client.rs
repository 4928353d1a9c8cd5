//! The bot's view of the Bazaar (port).
//!
//! Implemented over HTTP in bazaar-infra. Every non-success response is a
//! `ClientError`; the actor never retries within a tick.

use bazaar_types::error::ClientError;
use bazaar_types::listing::Listing;
use bazaar_types::message::{Message, NewMessage};

pub trait BazaarClient: Send + Sync {
    fn is_silenced(&self) -> impl std::future::Future<Output = Result<bool, ClientError>> + Send;

    fn register(
        &self,
        name: &str,
        port: Option<&str>,
    ) -> impl std::future::Future<Output = Result<(), ClientError>> + Send;

    fn list(
        &self,
        item: &str,
        price: f64,
        seller: &str,
    ) -> impl std::future::Future<Output = Result<(), ClientError>> + Send;

    fn available(
        &self,
        item: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Listing>, ClientError>> + Send;

    /// Fails with a 404 status when nothing unsold matches.
    fn settle(
        &self,
        item: &str,
        buyer: &str,
    ) -> impl std::future::Future<Output = Result<(), ClientError>> + Send;

    fn inventory(
        &self,
        buyer: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Listing>, ClientError>> + Send;

    /// Messages visible to `bot`, newest first.
    fn messages(
        &self,
        bot: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, ClientError>> + Send;

    fn post(
        &self,
        message: &NewMessage,
    ) -> impl std::future::Future<Output = Result<(), ClientError>> + Send;
}
