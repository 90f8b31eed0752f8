//! Application error type mapping to HTTP status codes.
//!
//! Every failure surfaces as a status plus a `{"error": "..."}` JSON body.
//! Nothing is retried. Streaming-path failures never reach this type: once
//! the SSE response is committed they are reported as in-band error events.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use parley_types::error::RelayError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Relay operation failure.
    Relay(RelayError),
    /// Generic internal error.
    Internal(String),
}

impl From<RelayError> for AppError {
    fn from(e: RelayError) -> Self {
        AppError::Relay(e)
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Relay(RelayError::EmptyQuestion) => StatusCode::BAD_REQUEST,
            AppError::Relay(RelayError::Auth(_)) => StatusCode::UNAUTHORIZED,
            AppError::Relay(RelayError::Quota(_)) => StatusCode::TOO_MANY_REQUESTS,
            AppError::Relay(RelayError::SessionNotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Relay(
                RelayError::NoCredential | RelayError::Upstream(_) | RelayError::Store(_),
            ) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::Relay(e) => e.to_string(),
            AppError::Internal(msg) => msg,
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_400() {
        let err = AppError::Relay(RelayError::EmptyQuestion);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_auth_maps_to_401() {
        let err = AppError::Relay(RelayError::Auth("bad key".into()));
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_quota_maps_to_429() {
        let err = AppError::Relay(RelayError::Quota("billing".into()));
        assert_eq!(err.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let err = AppError::Relay(RelayError::SessionNotFound("s1".into()));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_everything_else_maps_to_500() {
        for err in [
            AppError::Relay(RelayError::NoCredential),
            AppError::Relay(RelayError::Upstream("boom".into())),
            AppError::Internal("panic".into()),
        ] {
            assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
