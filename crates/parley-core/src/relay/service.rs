//! Relay service orchestrating the session-scoped chat protocol.
//!
//! A turn is: validate -> append the user message -> build the windowed
//! prompt -> call upstream -> append the assistant message. The streaming
//! path emits each upstream fragment as soon as it arrives and defers the
//! assistant append until the stream completes; a mid-stream failure emits
//! a terminal error event and appends nothing.

use std::sync::Arc;

use futures_util::{Stream, StreamExt};
use tracing::{debug, info, warn};

use parley_types::chat::{
    ChatMessage, ChatReply, HealthStatus, MessageRole, ModelInfo, Session, SessionSummary,
};
use parley_types::error::{RelayError, StoreError};
use parley_types::llm::StreamEvent;

use crate::llm::provider::LlmProvider;
use crate::relay::{catalog, prompt};
use crate::session::store::SessionStore;

/// Events produced by a streaming turn, in emission order: zero or more
/// `Content` fragments, then exactly one `Done` or `Error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayEvent {
    /// One incremental fragment of generated text.
    Content(String),
    /// The stream completed and the full reply was appended to the session.
    Done,
    /// The upstream call failed mid-stream; no assistant message was appended.
    Error(String),
}

/// Orchestrates chat turns over an injected store and provider.
///
/// Generic over [`SessionStore`] and [`LlmProvider`] so tests can substitute
/// doubles. The provider is `None` when no API key is configured; chat
/// operations then fail with [`RelayError::NoCredential`] while the
/// read-only operations keep working.
pub struct RelayService<S: SessionStore, P: LlmProvider> {
    store: Arc<S>,
    provider: Option<Arc<P>>,
    default_model: String,
}

impl<S: SessionStore, P: LlmProvider> RelayService<S, P> {
    pub fn new(store: Arc<S>, provider: Option<Arc<P>>, default_model: impl Into<String>) -> Self {
        Self {
            store,
            provider,
            default_model: default_model.into(),
        }
    }

    /// Model used when a request names none.
    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Validate a turn and append the user message, returning the request
    /// to send upstream. Shared preamble of both send paths; nothing is
    /// appended if validation fails.
    async fn begin_turn(
        &self,
        question: &str,
        session_id: &str,
        model: &str,
        stream: bool,
    ) -> Result<parley_types::llm::CompletionRequest, RelayError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(RelayError::EmptyQuestion);
        }
        if self.provider.is_none() {
            return Err(RelayError::NoCredential);
        }

        self.store
            .append_message(session_id, ChatMessage::new(MessageRole::User, question))
            .await?;

        // Re-read so the window sees the message we just appended.
        let session = self
            .store
            .get(session_id)
            .await?
            .ok_or(StoreError::NotFound)?;

        debug!(
            session_id,
            model,
            history = session.messages.len(),
            "assembling prompt"
        );

        Ok(prompt::build_request(model, &session.messages, stream))
    }

    /// Run one blocking turn: append the user message, call upstream, append
    /// the reply, return it.
    pub async fn send(
        &self,
        question: &str,
        session_id: &str,
        model: &str,
    ) -> Result<ChatReply, RelayError> {
        let request = self.begin_turn(question, session_id, model, false).await?;
        // begin_turn verified the provider exists.
        let provider = self.provider.as_ref().ok_or(RelayError::NoCredential)?;

        let response = provider
            .complete(&request)
            .await
            .map_err(RelayError::from_llm)?;

        self.store
            .append_message(
                session_id,
                ChatMessage::new(MessageRole::Assistant, response.content.clone()),
            )
            .await?;

        info!(session_id, model, chars = response.content.len(), "turn complete");

        Ok(ChatReply {
            text: response.content,
            session_id: session_id.to_string(),
            model: model.to_string(),
        })
    }

    /// Run one streaming turn.
    ///
    /// Validation and the user-message append happen before this returns, so
    /// precondition failures surface as an `Err` rather than an in-band
    /// event. The returned stream yields each fragment as produced, then
    /// appends the accumulated text as one assistant message and yields
    /// [`RelayEvent::Done`] -- or yields [`RelayEvent::Error`] without
    /// appending if the upstream fails partway.
    pub async fn send_stream(
        &self,
        question: &str,
        session_id: &str,
        model: &str,
    ) -> Result<impl Stream<Item = RelayEvent> + Send + 'static, RelayError> {
        let request = self.begin_turn(question, session_id, model, true).await?;
        let provider = self.provider.as_ref().ok_or(RelayError::NoCredential)?;

        let llm_stream = provider.stream(request);
        let store = Arc::clone(&self.store);
        let session_id = session_id.to_string();
        let model = model.to_string();

        Ok(async_stream::stream! {
            let mut full_response = String::new();
            let mut failure: Option<RelayError> = None;
            let mut llm_stream = std::pin::pin!(llm_stream);

            while let Some(event) = llm_stream.next().await {
                match event {
                    Ok(StreamEvent::TextDelta { text }) => {
                        full_response.push_str(&text);
                        yield RelayEvent::Content(text);
                    }
                    Ok(StreamEvent::Done) => break,
                    Err(e) => {
                        failure = Some(RelayError::from_llm(e));
                        break;
                    }
                }
            }

            match failure {
                Some(err) => {
                    warn!(session_id = %session_id, %err, "streaming turn failed");
                    yield RelayEvent::Error(err.to_string());
                }
                None => {
                    let reply = ChatMessage::new(MessageRole::Assistant, full_response);
                    let chars = reply.content.len();
                    match store.append_message(&session_id, reply).await {
                        Ok(()) => {
                            info!(session_id = %session_id, model = %model, chars, "streaming turn complete");
                            yield RelayEvent::Done;
                        }
                        Err(e) => {
                            yield RelayEvent::Error(RelayError::from(e).to_string());
                        }
                    }
                }
            }
        })
    }

    /// One summary per session with at least one message, most recently
    /// active first.
    pub async fn list_sessions(&self) -> Result<Vec<SessionSummary>, RelayError> {
        let sessions = self.store.list().await?;
        let mut summaries: Vec<SessionSummary> =
            sessions.iter().filter_map(SessionSummary::of).collect();
        summaries.sort_by(|a, b| b.last_activity.cmp(&a.last_activity));
        Ok(summaries)
    }

    /// Full message list for a session.
    pub async fn get_session(&self, session_id: &str) -> Result<Session, RelayError> {
        self.store
            .get(session_id)
            .await?
            .ok_or_else(|| RelayError::SessionNotFound(session_id.to_string()))
    }

    /// Remove a session entirely.
    pub async fn delete_session(&self, session_id: &str) -> Result<(), RelayError> {
        self.store.delete(session_id).await.map_err(|e| match e {
            StoreError::NotFound => RelayError::SessionNotFound(session_id.to_string()),
            other => other.into(),
        })
    }

    /// Remove every session unconditionally.
    pub async fn clear_all(&self) -> Result<(), RelayError> {
        self.store.clear().await?;
        info!("all sessions cleared");
        Ok(())
    }

    /// The fixed model catalog.
    pub fn models(&self) -> Vec<ModelInfo> {
        catalog::model_catalog()
    }

    /// Read-only introspection; never fails.
    pub async fn health(&self) -> HealthStatus {
        let session_count = self.store.count().await.unwrap_or(0);
        HealthStatus {
            status: "ok".to_string(),
            session_count,
            credential_configured: self.provider.is_some(),
            default_model: self.default_model.clone(),
        }
    }
}
