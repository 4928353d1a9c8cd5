//! Liveness check.

/// GET /pong
pub async fn pong() -> &'static str {
    "pong"
}
