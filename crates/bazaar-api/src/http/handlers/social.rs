//! Bot registration, whisper and friendship handlers.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use bazaar_types::bot::RegisterBotRequest;
use bazaar_types::message::{MessageId, WhisperRequest};

use crate::http::error::AppError;
use crate::http::extractors::query::{BazaarQuery, BotQuery, InviteQuery};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Registered {
    pub success: bool,
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct Whispered {
    pub success: bool,
    pub id: MessageId,
}

/// GET /register?name=&port=
pub async fn register(
    State(state): State<AppState>,
    BazaarQuery(request): BazaarQuery<RegisterBotRequest>,
) -> Result<Json<Registered>, AppError> {
    let bot = state.registry.register(request).await?;
    Ok(Json(Registered {
        success: true,
        id: bot.id,
        name: bot.name,
    }))
}

/// GET /whisper?query=&sender=&recipient=
///
/// Only registered senders may whisper. A query starting with the invite
/// marker also befriends the sender with its target.
pub async fn whisper(
    State(state): State<AppState>,
    BazaarQuery(request): BazaarQuery<WhisperRequest>,
) -> Result<Json<Whispered>, AppError> {
    let message = state.messaging.whisper(&*state.registry, request).await?;
    Ok(Json(Whispered {
        success: true,
        id: message.id,
    }))
}

/// GET /invite?bot=&friend=
pub async fn invite(
    State(state): State<AppState>,
    BazaarQuery(query): BazaarQuery<InviteQuery>,
) -> Result<&'static str, AppError> {
    state.graph.invite(query.bot, query.friend).await?;
    Ok("friended")
}

/// GET /friends?bot=
pub async fn friends(
    State(state): State<AppState>,
    BazaarQuery(query): BazaarQuery<BotQuery>,
) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(state.graph.friends(query.bot).await?))
}
