//! Health check handler.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::state::AppState;

/// GET /health - read-only introspection; never fails.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let health = state.relay.health().await;
    Json(json!({
        "status": health.status,
        "sessions": health.session_count,
        "openai_configured": health.credential_configured,
        "default_model": health.default_model,
    }))
}
