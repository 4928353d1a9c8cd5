//! Friendship repository trait definition.

use bazaar_types::error::RepositoryError;

/// Symmetric friendship storage.
pub trait FriendshipRepository: Send + Sync {
    /// Store the pair in both directions. Idempotent.
    fn befriend(
        &self,
        a: &str,
        b: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Friends of `bot`, deduplicated and sorted.
    fn friends_of(
        &self,
        bot: &str,
    ) -> impl std::future::Future<Output = Result<Vec<String>, RepositoryError>> + Send;
}
