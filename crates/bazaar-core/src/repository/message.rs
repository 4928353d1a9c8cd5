//! Message repository trait definition.

use bazaar_types::error::RepositoryError;
use bazaar_types::message::{Message, MessageKind, NewMessage, VisibilityScope};

/// Append-only message storage with per-reader visibility queries.
///
/// All list queries return newest first (highest id first).
pub trait MessageRepository: Send + Sync {
    /// Append a message. Returns it with its assigned id and timestamp.
    fn append(
        &self,
        message: &NewMessage,
    ) -> impl std::future::Future<Output = Result<Message, RepositoryError>> + Send;

    /// Append a message and, when `invite` is set, befriend the pair in both
    /// directions. Either everything is stored or nothing is.
    fn append_with_invite(
        &self,
        message: &NewMessage,
        invite: Option<(&str, &str)>,
    ) -> impl std::future::Future<Output = Result<Message, RepositoryError>> + Send;

    /// The newest `limit` messages admitted by `scope`.
    fn visible_to(
        &self,
        scope: &VisibilityScope,
        limit: u32,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, RepositoryError>> + Send;

    /// Every message of the given kind, unfiltered by visibility.
    fn by_kind(
        &self,
        kind: MessageKind,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, RepositoryError>> + Send;

    /// The newest `limit` messages, or all of them when `limit` is `None`.
    fn recent(
        &self,
        limit: Option<u32>,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, RepositoryError>> + Send;

    /// Delete every message. Maintenance only; returns the number removed.
    fn purge(&self) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
