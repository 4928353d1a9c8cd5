//! Axum router configuration with middleware.
//!
//! Every endpoint is a GET taking query parameters, so bots can drive the
//! Bazaar with nothing more than a URL. Middleware: CORS, request tracing.

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/pong", get(handlers::health::pong))
        // Listing ledger
        .route("/list", get(handlers::listing::create_listing))
        .route("/available", get(handlers::listing::available))
        .route("/sold", get(handlers::listing::settle))
        .route("/inventory", get(handlers::listing::inventory))
        // Messaging
        .route("/message", get(handlers::message::post_message))
        .route("/get_messages", get(handlers::message::visible_messages))
        .route("/feedback", get(handlers::message::feedback))
        .route("/recent_messages", get(handlers::message::recent_messages))
        // Silence gate
        .route("/toggle_silence", get(handlers::silence::toggle_silence))
        .route("/get_silence", get(handlers::silence::get_silence))
        // Registration and friendships
        .route("/register", get(handlers::social::register))
        .route("/whisper", get(handlers::social::whisper))
        .route("/invite", get(handlers::social::invite))
        .route("/friends", get(handlers::social::friends))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
