//! Listing repository trait definition.

use bazaar_types::error::RepositoryError;
use bazaar_types::listing::{Listing, NewListing};

/// Repository trait for listing persistence.
///
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait ListingRepository: Send + Sync {
    /// Persist a new unsold listing. Returns it with its assigned id.
    fn create(
        &self,
        listing: &NewListing,
    ) -> impl std::future::Future<Output = Result<Listing, RepositoryError>> + Send;

    /// Unsold listings whose item contains `needle` (case-sensitive).
    fn available(
        &self,
        needle: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Listing>, RepositoryError>> + Send;

    /// Atomically claim the lowest-id unsold listing whose item contains
    /// `needle`, marking it sold to `buyer`.
    ///
    /// Returns `None` when nothing matches. Two concurrent calls never claim
    /// the same row.
    fn settle(
        &self,
        needle: &str,
        buyer: &str,
    ) -> impl std::future::Future<Output = Result<Option<Listing>, RepositoryError>> + Send;

    /// Listings bought by `buyer`.
    fn inventory(
        &self,
        buyer: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Listing>, RepositoryError>> + Send;
}
