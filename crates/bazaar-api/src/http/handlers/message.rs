//! Messaging handlers: post, visible feed, feedback and the admin view.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use bazaar_types::message::{Message, PostMessageRequest};

use crate::http::error::AppError;
use crate::http::extractors::query::{BazaarQuery, BotQuery, RecentQuery};
use crate::state::AppState;

/// Response body for the recent-message view.
#[derive(Debug, Serialize)]
pub struct RecentMessages {
    pub count: usize,
    pub messages: Vec<Message>,
}

/// GET /message?sender=&recipient=&content=&type=
pub async fn post_message(
    State(state): State<AppState>,
    BazaarQuery(request): BazaarQuery<PostMessageRequest>,
) -> Result<&'static str, AppError> {
    state.messaging.post(request).await?;
    Ok("messaged")
}

/// GET /get_messages?bot=
pub async fn visible_messages(
    State(state): State<AppState>,
    BazaarQuery(query): BazaarQuery<BotQuery>,
) -> Result<Json<Vec<Message>>, AppError> {
    Ok(Json(state.messaging.visible(query.bot).await?))
}

/// GET /feedback
pub async fn feedback(State(state): State<AppState>) -> Result<Json<Vec<Message>>, AppError> {
    Ok(Json(state.messaging.feedback().await?))
}

/// GET /recent_messages?limit=
pub async fn recent_messages(
    State(state): State<AppState>,
    BazaarQuery(query): BazaarQuery<RecentQuery>,
) -> Result<Json<RecentMessages>, AppError> {
    let messages = state.messaging.recent(Some(query.limit)).await?;
    Ok(Json(RecentMessages {
        count: messages.len(),
        messages,
    }))
}
