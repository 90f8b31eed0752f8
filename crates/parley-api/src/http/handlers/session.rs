//! Session listing and lifecycle handlers.
//!
//! Endpoints:
//! - GET    /api/sessions      - List summaries, most recently active first
//! - GET    /api/sessions/{id} - Full message history for one session
//! - DELETE /api/sessions/{id} - Delete a session
//! - POST   /api/clear         - Delete every session

use axum::Json;
use axum::extract::{Path, State};
use serde_json::{Value, json};

use crate::http::error::AppError;
use crate::state::AppState;

/// GET /api/sessions - list sessions with at least one message.
pub async fn list_sessions(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let sessions = state.relay.list_sessions().await?;
    Ok(Json(json!({ "sessions": sessions })))
}

/// GET /api/sessions/{id} - full message history.
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let session = state.relay.get_session(&session_id).await?;
    Ok(Json(json!({
        "session_id": session.id,
        "messages": session.messages,
    })))
}

/// DELETE /api/sessions/{id} - remove a session entirely.
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    state.relay.delete_session(&session_id).await?;
    Ok(Json(json!({
        "success": true,
        "message": format!("Session '{session_id}' deleted"),
    })))
}

/// POST /api/clear - remove every session unconditionally.
pub async fn clear_all(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    state.relay.clear_all().await?;
    Ok(Json(json!({
        "success": true,
        "message": "All sessions cleared",
    })))
}
