//! LLM request/response types for Parley.
//!
//! These types model the data shapes for upstream completion calls:
//! requests, responses, streaming events, and error handling. They are
//! provider-agnostic; the concrete OpenAI-compatible mapping lives in
//! parley-infra.

use serde::{Deserialize, Serialize};

use crate::chat::MessageRole;

/// A single message in an upstream conversation prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: MessageRole,
    pub content: String,
}

/// Request to an LLM provider for a completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<PromptMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(default)]
    pub stream: bool,
}

/// Response from an LLM provider for a non-streaming completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    pub content: String,
    pub model: String,
}

/// Events emitted during a streaming completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// An incremental fragment of generated text.
    TextDelta { text: String },

    /// The stream has completed.
    Done,
}

/// Errors from LLM provider operations.
///
/// Providers classify their own failures into these variants; the relay
/// translates them to [`crate::error::RelayError`] in one place.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("quota exhausted: {0}")]
    QuotaExhausted(String),

    #[error("rate limited")]
    RateLimited,

    #[error("stream error: {0}")]
    Stream(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_event_serde() {
        let ev = StreamEvent::TextDelta {
            text: "hi".to_string(),
        };
        let json = serde_json::to_string(&ev).unwrap();
        assert!(json.contains("\"type\":\"text_delta\""));
        let parsed: StreamEvent = serde_json::from_str(&json).unwrap();
        assert!(matches!(parsed, StreamEvent::TextDelta { text } if text == "hi"));
    }

    #[test]
    fn test_completion_request_omits_empty_system() {
        let req = CompletionRequest {
            model: "model-x".to_string(),
            messages: vec![],
            system: None,
            stream: false,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("system"));
    }

    #[test]
    fn test_llm_error_display() {
        let err = LlmError::QuotaExhausted("billing hard limit reached".to_string());
        assert!(err.to_string().contains("billing hard limit"));
    }
}
