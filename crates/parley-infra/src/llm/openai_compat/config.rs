//! Configuration for the OpenAI-compatible provider.

use secrecy::SecretString;

/// Configuration for an [`super::OpenAiCompatProvider`].
///
/// The API key is wrapped in [`SecretString`] so it never appears in Debug
/// output or logs.
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "openai").
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.openai.com/v1").
    pub base_url: String,
    /// API key for authentication.
    pub api_key: SecretString,
    /// Model identifier used when a request names none.
    pub model: String,
}

/// OpenAI default configuration.
///
/// Base URL: `https://api.openai.com/v1`.
pub fn openai_defaults(api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "openai".into(),
        base_url: "https://api.openai.com/v1".into(),
        api_key,
        model: model.into(),
    }
}

impl OpenAiCompatConfig {
    /// Override the base URL (e.g., to point at a local proxy).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_defaults() {
        let config = openai_defaults("sk-test".to_string().into(), "gpt-4o-mini");
        assert_eq!(config.provider_name, "openai");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.model, "gpt-4o-mini");
    }

    #[test]
    fn test_base_url_override() {
        let config = openai_defaults("sk-test".to_string().into(), "gpt-4o-mini")
            .with_base_url("http://localhost:8080/v1");
        assert_eq!(config.base_url, "http://localhost:8080/v1");
    }
}
