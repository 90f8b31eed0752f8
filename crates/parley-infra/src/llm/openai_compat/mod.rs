//! OpenAI-compatible LLM provider implementation.
//!
//! Uses [`async_openai`] for type-safe request/response handling and
//! built-in SSE streaming. Any endpoint speaking the OpenAI chat
//! completions protocol works via a configurable base URL.

pub mod config;
pub mod streaming;

use std::pin::Pin;

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestAssistantMessage, ChatCompletionRequestAssistantMessageContent,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
};
use futures_util::Stream;
use secrecy::ExposeSecret;

use parley_core::llm::provider::LlmProvider;
use parley_types::chat::MessageRole;
use parley_types::llm::{CompletionRequest, CompletionResponse, LlmError, StreamEvent};

use self::config::OpenAiCompatConfig;
use self::streaming::map_openai_stream;

/// Provider for any OpenAI-compatible chat completions API.
///
/// # API Key Security
///
/// Does NOT derive Debug to prevent accidental exposure of the API key
/// stored inside the `async_openai::Client`.
pub struct OpenAiCompatProvider {
    client: Client<OpenAIConfig>,
    provider_name: String,
    model: String,
}

impl OpenAiCompatProvider {
    /// Create a provider from a configuration.
    pub fn new(config: OpenAiCompatConfig) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.api_key.expose_secret())
            .with_api_base(&config.base_url);

        Self {
            client: Client::with_config(openai_config),
            provider_name: config.provider_name,
            model: config.model,
        }
    }

    /// Build a [`CreateChatCompletionRequest`] from a generic [`CompletionRequest`].
    fn build_request(
        &self,
        request: &CompletionRequest,
        stream: bool,
    ) -> Result<CreateChatCompletionRequest, LlmError> {
        let mut messages: Vec<ChatCompletionRequestMessage> = Vec::new();

        // System instruction goes first
        if let Some(ref system) = request.system {
            messages.push(ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessage {
                    content: ChatCompletionRequestSystemMessageContent::Text(system.clone()),
                    name: None,
                },
            ));
        }

        // Conversation window
        for msg in &request.messages {
            let oai_msg = match msg.role {
                MessageRole::System => ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessage {
                        content: ChatCompletionRequestSystemMessageContent::Text(
                            msg.content.clone(),
                        ),
                        name: None,
                    },
                ),
                MessageRole::User => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage {
                        content: ChatCompletionRequestUserMessageContent::Text(
                            msg.content.clone(),
                        ),
                        name: None,
                    },
                ),
                MessageRole::Assistant => {
                    #[allow(deprecated)]
                    ChatCompletionRequestMessage::Assistant(
                        ChatCompletionRequestAssistantMessage {
                            content: Some(ChatCompletionRequestAssistantMessageContent::Text(
                                msg.content.clone(),
                            )),
                            refusal: None,
                            name: None,
                            audio: None,
                            tool_calls: None,
                            function_call: None,
                        },
                    )
                }
            };
            messages.push(oai_msg);
        }

        // Use the model from the request if set, otherwise the config default
        let model = if request.model.is_empty() {
            self.model.clone()
        } else {
            request.model.clone()
        };

        let mut req = CreateChatCompletionRequest {
            model,
            messages,
            ..Default::default()
        };

        if stream {
            req.stream = Some(true);
        }

        Ok(req)
    }
}

impl LlmProvider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        &self.provider_name
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let oai_request = self.build_request(request, false)?;

        let response = self
            .client
            .chat()
            .create(oai_request)
            .await
            .map_err(map_openai_error)?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        Ok(CompletionResponse {
            id: response.id,
            content,
            model: response.model,
        })
    }

    fn stream(
        &self,
        request: CompletionRequest,
    ) -> Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>> {
        // Build the request up front; a failure becomes a one-item error stream.
        let oai_request = match self.build_request(&request, true) {
            Ok(req) => req,
            Err(e) => {
                return Box::pin(futures_util::stream::once(async move { Err(e) }));
            }
        };

        // Clone the client for the 'static stream closure
        let client = self.client.clone();

        Box::pin(async_stream::try_stream! {
            let oai_stream = client
                .chat()
                .create_stream(oai_request)
                .await
                .map_err(map_openai_error)?;

            let mut inner = map_openai_stream(oai_stream);

            use futures_util::StreamExt;
            while let Some(event) = inner.next().await {
                match event {
                    Ok(ev) => yield ev,
                    Err(e) => Err(e)?,
                }
            }
        })
    }
}

/// Map an `async_openai::error::OpenAIError` to an [`LlmError`].
///
/// Checks structured error codes first and only falls back to
/// [`classify_api_message`] keyword matching when no code is present.
fn map_openai_error(err: async_openai::error::OpenAIError) -> LlmError {
    use async_openai::error::OpenAIError;

    match &err {
        OpenAIError::ApiError(api_err) => {
            let code = api_err.code.as_deref().unwrap_or("");
            let error_type = api_err.r#type.as_deref().unwrap_or("");

            if code == "invalid_api_key"
                || code == "authentication_error"
                || error_type == "authentication_error"
            {
                LlmError::AuthenticationFailed(api_err.message.clone())
            } else if code == "insufficient_quota" || error_type == "insufficient_quota" {
                LlmError::QuotaExhausted(api_err.message.clone())
            } else if code == "rate_limit_exceeded" || error_type == "rate_limit_error" {
                LlmError::RateLimited
            } else {
                classify_api_message(&api_err.message)
            }
        }
        OpenAIError::Reqwest(reqwest_err) => {
            if let Some(status) = reqwest_err.status() {
                match status.as_u16() {
                    401 => LlmError::AuthenticationFailed(err.to_string()),
                    429 => LlmError::RateLimited,
                    _ => LlmError::Provider {
                        message: err.to_string(),
                    },
                }
            } else {
                LlmError::Provider {
                    message: err.to_string(),
                }
            }
        }
        OpenAIError::JSONDeserialize(_, content) => {
            LlmError::Deserialization(format!("failed to parse response: {content}"))
        }
        OpenAIError::StreamError(stream_err) => LlmError::Stream(stream_err.to_string()),
        OpenAIError::InvalidArgument(msg) => LlmError::InvalidRequest(msg.clone()),
        _ => LlmError::Provider {
            message: err.to_string(),
        },
    }
}

/// Classify an upstream error by its message text.
///
/// This is a best-effort heuristic for endpoints that return no structured
/// error code: credential wording maps to authentication, billing wording to
/// quota, everything else stays a generic provider error. Keyword matching
/// is approximate and intentionally isolated here.
fn classify_api_message(message: &str) -> LlmError {
    let lower = message.to_lowercase();

    if lower.contains("api key") || lower.contains("authentication") || lower.contains("unauthorized")
    {
        LlmError::AuthenticationFailed(message.to_string())
    } else if lower.contains("quota") || lower.contains("billing") {
        LlmError::QuotaExhausted(message.to_string())
    } else {
        LlmError::Provider {
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_openai::error::{ApiError, OpenAIError};
    use parley_types::llm::PromptMessage;

    fn provider() -> OpenAiCompatProvider {
        OpenAiCompatProvider::new(config::openai_defaults(
            "sk-test".to_string().into(),
            "gpt-4o-mini",
        ))
    }

    fn api_error(message: &str, r#type: Option<&str>, code: Option<&str>) -> OpenAIError {
        OpenAIError::ApiError(ApiError {
            message: message.to_string(),
            r#type: r#type.map(str::to_string),
            param: None,
            code: code.map(str::to_string),
        })
    }

    #[test]
    fn test_provider_name() {
        assert_eq!(provider().name(), "openai");
    }

    #[test]
    fn test_build_request_system_message_first() {
        let request = CompletionRequest {
            model: "model-x".to_string(),
            messages: vec![
                PromptMessage {
                    role: MessageRole::User,
                    content: "Hello".to_string(),
                },
                PromptMessage {
                    role: MessageRole::Assistant,
                    content: "Hi there!".to_string(),
                },
            ],
            system: Some("Be helpful".to_string()),
            stream: false,
        };

        let oai_req = provider().build_request(&request, false).unwrap();
        assert_eq!(oai_req.model, "model-x");
        // 1 system + 2 conversation = 3 messages
        assert_eq!(oai_req.messages.len(), 3);
        assert!(matches!(
            oai_req.messages[0],
            ChatCompletionRequestMessage::System(_)
        ));
        assert!(oai_req.stream.is_none());
    }

    #[test]
    fn test_build_request_streaming_flag() {
        let request = CompletionRequest {
            model: "model-x".to_string(),
            messages: vec![PromptMessage {
                role: MessageRole::User,
                content: "Hello".to_string(),
            }],
            system: None,
            stream: true,
        };

        let oai_req = provider().build_request(&request, true).unwrap();
        assert_eq!(oai_req.stream, Some(true));
        assert_eq!(oai_req.messages.len(), 1);
    }

    #[test]
    fn test_build_request_empty_model_uses_default() {
        let request = CompletionRequest {
            model: String::new(),
            messages: vec![],
            system: None,
            stream: false,
        };

        let oai_req = provider().build_request(&request, false).unwrap();
        assert_eq!(oai_req.model, "gpt-4o-mini");
    }

    #[test]
    fn test_map_error_structured_auth_code() {
        let err = map_openai_error(api_error(
            "Incorrect API key provided",
            Some("authentication_error"),
            None,
        ));
        assert!(matches!(err, LlmError::AuthenticationFailed(_)));
    }

    #[test]
    fn test_map_error_structured_quota_code() {
        let err = map_openai_error(api_error(
            "You exceeded your current quota",
            None,
            Some("insufficient_quota"),
        ));
        assert!(matches!(err, LlmError::QuotaExhausted(_)));
    }

    #[test]
    fn test_map_error_rate_limit() {
        let err = map_openai_error(api_error("Slow down", Some("rate_limit_error"), None));
        assert!(matches!(err, LlmError::RateLimited));
    }

    #[test]
    fn test_map_error_falls_back_to_keywords() {
        // No code or type: only the message text is available.
        let err = map_openai_error(api_error("Invalid API key supplied", None, None));
        assert!(matches!(err, LlmError::AuthenticationFailed(_)));

        let err = map_openai_error(api_error("billing hard limit reached", None, None));
        assert!(matches!(err, LlmError::QuotaExhausted(_)));

        let err = map_openai_error(api_error("model overloaded", None, None));
        assert!(matches!(err, LlmError::Provider { .. }));
    }

    #[test]
    fn test_map_error_invalid_argument() {
        let err = map_openai_error(OpenAIError::InvalidArgument("bad arg".to_string()));
        assert!(matches!(err, LlmError::InvalidRequest(_)));
    }

    #[test]
    fn test_classify_api_message_is_case_insensitive() {
        assert!(matches!(
            classify_api_message("UNAUTHORIZED request"),
            LlmError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            classify_api_message("Monthly QUOTA exhausted"),
            LlmError::QuotaExhausted(_)
        ));
    }
}
