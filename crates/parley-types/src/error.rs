use thiserror::Error;

use crate::llm::LlmError;

/// Errors from relay operations, mapped to HTTP statuses by the API layer.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("question must not be empty")]
    EmptyQuestion,

    #[error("no upstream API key is configured")]
    NoCredential,

    #[error("upstream rejected the API key: {0}")]
    Auth(String),

    #[error("upstream quota exhausted: {0}")]
    Quota(String),

    #[error("upstream error: {0}")]
    Upstream(String),

    #[error("session '{0}' not found")]
    SessionNotFound(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl RelayError {
    /// Translate a provider failure into the relay taxonomy.
    ///
    /// Rate limiting and quota exhaustion collapse into [`RelayError::Quota`];
    /// the relay has no retry-later class of its own.
    pub fn from_llm(err: LlmError) -> Self {
        match err {
            LlmError::AuthenticationFailed(msg) => RelayError::Auth(msg),
            LlmError::QuotaExhausted(msg) => RelayError::Quota(msg),
            LlmError::RateLimited => RelayError::Quota("rate limited".to_string()),
            other => RelayError::Upstream(other.to_string()),
        }
    }
}

/// Errors from session store operations (used by the trait in parley-core).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session not found")]
    NotFound,

    #[error("storage error: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relay_error_display() {
        let err = RelayError::SessionNotFound("abc".to_string());
        assert_eq!(err.to_string(), "session 'abc' not found");
    }

    #[test]
    fn test_from_llm_auth() {
        let err = RelayError::from_llm(LlmError::AuthenticationFailed("bad key".into()));
        assert!(matches!(err, RelayError::Auth(_)));
    }

    #[test]
    fn test_from_llm_quota_and_rate_limit() {
        assert!(matches!(
            RelayError::from_llm(LlmError::QuotaExhausted("billing".into())),
            RelayError::Quota(_)
        ));
        assert!(matches!(
            RelayError::from_llm(LlmError::RateLimited),
            RelayError::Quota(_)
        ));
    }

    #[test]
    fn test_from_llm_other_is_upstream() {
        let err = RelayError::from_llm(LlmError::Stream("connection reset".into()));
        assert!(matches!(err, RelayError::Upstream(msg) if msg.contains("connection reset")));
    }

    #[test]
    fn test_store_error_into_relay_error() {
        let err: RelayError = StoreError::NotFound.into();
        assert!(matches!(err, RelayError::Store(StoreError::NotFound)));
    }
}
