//! Model catalog handler.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::state::AppState;

/// GET /api/models - the fixed model catalog.
pub async fn list_models(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "models": state.relay.models() }))
}
