//! Chat turn endpoint, blocking or streamed as Server-Sent Events.
//!
//! POST /api/chat
//!
//! Non-streaming requests return the whole reply as JSON. With
//! `"stream": true` the response is a `text/event-stream` of unnamed events:
//! - `data: {"content": "..."}` -- one per fragment, flushed as produced
//! - `data: {"done": true}` -- terminal, after the reply was stored
//! - `data: {"error": "..."}` -- terminal, on mid-stream failure
//!
//! Precondition failures (empty question, missing credential) happen before
//! the stream is opened and surface as normal HTTP error responses.

use std::convert::Infallible;
use std::time::Duration;

use axum::Json;
use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use futures_util::StreamExt;
use serde::Deserialize;
use serde_json::json;

use parley_core::relay::RelayEvent;

use crate::http::error::AppError;
use crate::state::AppState;

/// Session used when a request names none.
const DEFAULT_SESSION_ID: &str = "default";

/// Request body for the chat endpoint.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The user message to relay upstream.
    pub question: String,
    /// Session to continue; a new one is created implicitly if unknown.
    #[serde(default = "default_session_id")]
    pub session_id: String,
    /// Stream the reply as SSE instead of returning it whole.
    #[serde(default)]
    pub stream: bool,
    /// Model override; falls back to the configured default.
    pub model: Option<String>,
}

fn default_session_id() -> String {
    DEFAULT_SESSION_ID.to_string()
}

/// POST /api/chat - run one chat turn.
pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Response, AppError> {
    let model = body
        .model
        .unwrap_or_else(|| state.relay.default_model().to_string());

    if body.stream {
        let relay_stream = state
            .relay
            .send_stream(&body.question, &body.session_id, &model)
            .await?;

        let sse_stream = relay_stream.map(|event| {
            Ok::<_, Infallible>(Event::default().data(sse_payload(event).to_string()))
        });

        Ok(Sse::new(sse_stream)
            .keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
            .into_response())
    } else {
        let reply = state
            .relay
            .send(&body.question, &body.session_id, &model)
            .await?;

        Ok(Json(json!({
            "success": true,
            "result": reply.text,
            "session_id": reply.session_id,
            "model": reply.model,
        }))
        .into_response())
    }
}

/// Wire shape of one SSE event.
fn sse_payload(event: RelayEvent) -> serde_json::Value {
    match event {
        RelayEvent::Content(text) => json!({ "content": text }),
        RelayEvent::Done => json!({ "done": true }),
        RelayEvent::Error(message) => json!({ "error": message }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sse_payload_shapes() {
        assert_eq!(
            sse_payload(RelayEvent::Content("hi".into())),
            json!({"content": "hi"})
        );
        assert_eq!(sse_payload(RelayEvent::Done), json!({"done": true}));
        assert_eq!(
            sse_payload(RelayEvent::Error("boom".into())),
            json!({"error": "boom"})
        );
    }

    #[test]
    fn test_chat_request_defaults() {
        let body: ChatRequest = serde_json::from_str(r#"{"question": "hi"}"#).unwrap();
        assert_eq!(body.session_id, DEFAULT_SESSION_ID);
        assert!(!body.stream);
        assert!(body.model.is_none());
    }
}
