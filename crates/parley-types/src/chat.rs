//! Chat message, session summary, and model catalog types for Parley.
//!
//! A session is an ordered conversation history keyed by a caller-supplied
//! string id. Messages are immutable once appended; append order defines
//! the conversation context sent upstream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(MessageRole::System),
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single message within a session.
///
/// `created_at` serializes as numeric seconds since epoch on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: MessageRole,
    pub content: String,
    #[serde(rename = "timestamp", with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Build a message with a fresh time-sortable id and the current timestamp.
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// A named, ordered conversation history.
///
/// Created implicitly on first append, destroyed only by an explicit delete
/// or clear-all. There is no expiry; sessions live for the process lifetime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub messages: Vec<ChatMessage>,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            messages: Vec::new(),
        }
    }

    /// Timestamp of the most recent message, if any.
    pub fn last_activity(&self) -> Option<DateTime<Utc>> {
        self.messages.last().map(|m| m.created_at)
    }
}

/// Placeholder title for sessions with no user message yet.
pub const UNTITLED_SESSION: &str = "New conversation";

/// Maximum title length derived from the first user message.
pub const TITLE_MAX_CHARS: usize = 50;

/// One row in the session listing, sorted by `last_activity` descending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: String,
    /// First user message truncated to [`TITLE_MAX_CHARS`] characters,
    /// or [`UNTITLED_SESSION`] if no user message exists.
    pub title: String,
    pub message_count: usize,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub last_activity: DateTime<Utc>,
}

impl SessionSummary {
    /// Summarize a session. Returns `None` for sessions with no messages;
    /// those never appear in listings.
    pub fn of(session: &Session) -> Option<Self> {
        let last_activity = session.last_activity()?;

        let title = session
            .messages
            .iter()
            .find(|m| m.role == MessageRole::User)
            .map(|m| truncate_chars(&m.content, TITLE_MAX_CHARS))
            .unwrap_or_else(|| UNTITLED_SESSION.to_string());

        Some(Self {
            id: session.id.clone(),
            title,
            message_count: session.messages.len(),
            last_activity,
        })
    }
}

/// Truncate to at most `max` characters on a char boundary.
fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

/// An entry in the static model catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub display_name: String,
    pub description: String,
}

/// Result of a completed non-streaming turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub text: String,
    pub session_id: String,
    pub model: String,
}

/// Read-only relay introspection; never fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub session_count: usize,
    pub credential_configured: bool,
    pub default_model: String,
}
