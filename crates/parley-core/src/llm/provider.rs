//! LlmProvider trait definition.
//!
//! This is the seam between the relay and the upstream completion API.
//! Uses RPITIT for `complete` and a boxed stream for `stream` (the stream
//! must be `'static` so it can outlive the request handler that starts it).

use std::pin::Pin;

use futures_util::Stream;

use parley_types::llm::{CompletionRequest, CompletionResponse, LlmError, StreamEvent};

/// Trait for upstream completion backends.
///
/// Implementations live in parley-infra (e.g., `OpenAiCompatProvider`);
/// tests use in-process doubles.
pub trait LlmProvider: Send + Sync + 'static {
    /// Human-readable provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;

    /// Send a streaming completion request. Returns a single-pass stream of
    /// events ending in [`StreamEvent::Done`] or an error item.
    fn stream(
        &self,
        request: CompletionRequest,
    ) -> Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>>;
}
