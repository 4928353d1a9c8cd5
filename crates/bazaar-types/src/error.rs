use thiserror::Error;

/// Errors surfaced by marketplace and messaging operations.
///
/// Each variant maps to one HTTP status class in the API layer.
#[derive(Debug, Error)]
pub enum BazaarError {
    /// Missing or malformed required input. No mutation happened.
    #[error("validation error: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    /// The caller is not a registered bot.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors from repository operations (used by trait definitions in bazaar-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

impl From<RepositoryError> for BazaarError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::Conflict(msg) => BazaarError::Conflict(msg),
            RepositoryError::NotFound => BazaarError::NotFound("entity not found".to_string()),
            other => BazaarError::Storage(other.to_string()),
        }
    }
}

/// Errors seen by a bot talking to the Bazaar over HTTP.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Whether the server answered 404 (e.g. nothing left to settle).
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Status { status: 404, .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, ClientError::Status { status: 409, .. })
    }
}
