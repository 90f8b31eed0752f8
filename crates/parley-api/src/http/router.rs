//! Axum router configuration with middleware.
//!
//! Middleware: CORS (permissive), request tracing. Unknown routes fall
//! through to a JSON 404.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Chat page
        .route("/", get(handlers::index::home))
        // Chat turns (blocking or SSE)
        .route("/api/chat", post(handlers::chat::chat))
        // Sessions
        .route("/api/sessions", get(handlers::session::list_sessions))
        .route(
            "/api/sessions/{id}",
            get(handlers::session::get_session).delete(handlers::session::delete_session),
        )
        .route("/api/clear", post(handlers::session::clear_all))
        // Model catalog
        .route("/api/models", get(handlers::model::list_models))
        // Health
        .route("/health", get(handlers::health::health_check))
        .fallback(handlers::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
