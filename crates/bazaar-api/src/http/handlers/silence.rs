//! Silence gate handlers. The flag is rendered as `true` or `false`.

use axum::extract::State;

use crate::http::error::AppError;
use crate::state::AppState;

fn flag(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// GET /toggle_silence
pub async fn toggle_silence(State(state): State<AppState>) -> Result<&'static str, AppError> {
    Ok(flag(state.silence.toggle().await?))
}

/// GET /get_silence
pub async fn get_silence(State(state): State<AppState>) -> Result<&'static str, AppError> {
    Ok(flag(state.silence.is_silenced().await?))
}
