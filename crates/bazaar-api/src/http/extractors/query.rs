//! Query string extractors.
//!
//! `BazaarQuery` wraps axum's `Query` so a malformed query string yields the
//! same JSON error envelope as every other failure.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::http::error::AppError;

/// Like `Query<T>`, but rejects with `AppError::BadQuery`.
pub struct BazaarQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for BazaarQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadQuery(rejection.body_text()))?;
        Ok(BazaarQuery(value))
    }
}

/// `?item=`
#[derive(Debug, Deserialize, Default)]
pub struct ItemQuery {
    pub item: Option<String>,
}

/// `?item=&buyer=`
#[derive(Debug, Deserialize, Default)]
pub struct SettleQuery {
    pub item: Option<String>,
    pub buyer: Option<String>,
}

/// `?buyer=`
#[derive(Debug, Deserialize, Default)]
pub struct BuyerQuery {
    pub buyer: Option<String>,
}

/// `?bot=`
#[derive(Debug, Deserialize, Default)]
pub struct BotQuery {
    pub bot: Option<String>,
}

/// `?bot=&friend=`
#[derive(Debug, Deserialize, Default)]
pub struct InviteQuery {
    pub bot: Option<String>,
    pub friend: Option<String>,
}

/// Query parameters for the administrative recent-message view.
#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    /// Maximum messages to return (default 50).
    #[serde(default = "default_recent_limit")]
    pub limit: u32,
}

fn default_recent_limit() -> u32 {
    50
}
