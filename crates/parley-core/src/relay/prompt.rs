//! Prompt assembly shared by the streaming and non-streaming paths.
//!
//! The prompt is a fixed system instruction followed by the most recent
//! [`HISTORY_WINDOW`] session messages in chronological order. The caller
//! appends the new user message to the session first, so it is always part
//! of the window. No token counting or summarization; if the window still
//! overflows the model's context, the upstream error propagates as-is.

use parley_types::chat::ChatMessage;
use parley_types::llm::{CompletionRequest, PromptMessage};

/// Fixed system instruction sent with every turn.
pub const SYSTEM_PROMPT: &str =
    "You are a helpful assistant. Answer the user's questions clearly and concisely.";

/// Number of trailing session messages carried into the prompt.
pub const HISTORY_WINDOW: usize = 20;

/// Build the upstream request from a session's history.
pub fn build_request(model: &str, history: &[ChatMessage], stream: bool) -> CompletionRequest {
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    let messages = history[start..]
        .iter()
        .map(|m| PromptMessage {
            role: m.role,
            content: m.content.clone(),
        })
        .collect();

    CompletionRequest {
        model: model.to_string(),
        messages,
        system: Some(SYSTEM_PROMPT.to_string()),
        stream,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_types::chat::MessageRole;

    fn history_of(n: usize) -> Vec<ChatMessage> {
        (0..n)
            .map(|i| ChatMessage::new(MessageRole::User, format!("message {i}")))
            .collect()
    }

    #[test]
    fn test_short_history_is_carried_whole() {
        let history = history_of(5);
        let request = build_request("model-x", &history, false);
        assert_eq!(request.messages.len(), 5);
        assert_eq!(request.system.as_deref(), Some(SYSTEM_PROMPT));
        assert_eq!(request.model, "model-x");
        assert!(!request.stream);
    }

    #[test]
    fn test_long_history_keeps_last_twenty_in_order() {
        let history = history_of(25);
        let request = build_request("model-x", &history, true);
        assert_eq!(request.messages.len(), HISTORY_WINDOW);
        assert_eq!(request.messages.first().unwrap().content, "message 5");
        assert_eq!(request.messages.last().unwrap().content, "message 24");
        assert!(request.stream);
    }

    #[test]
    fn test_exact_window_boundary() {
        let history = history_of(HISTORY_WINDOW);
        let request = build_request("model-x", &history, false);
        assert_eq!(request.messages.len(), HISTORY_WINDOW);
        assert_eq!(request.messages.first().unwrap().content, "message 0");
    }
}
