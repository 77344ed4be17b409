//! Unified error handling for mikrodeny.
//!
//! The ban engine itself is infallible; these errors belong to the HTTP layer
//! and the notification transport.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// API Errors (HTTP handlers)
// ============================================================================

/// Errors returned to HTTP callers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or unknown `userid` credential.
    #[error("not authorized")]
    Unauthorized,

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Get a static error code string for the response body and metrics.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::InvalidRequest(_) => "invalid_request",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.error_code(),
            message: self.to_string(),
        };
        (self.status(), axum::Json(body)).into_response()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidRequest(err.to_string())
    }
}

/// Result type for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

// ============================================================================
// Notification Errors (chat transport)
// ============================================================================

/// Chat delivery failures. Logged and counted, never returned to API callers.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[test]
    fn test_error_codes_and_status() {
        assert_eq!(ApiError::Unauthorized.error_code(), "unauthorized");
        assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::InvalidRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_unauthorized_response_body() {
        let response = ApiError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "unauthorized");
        assert_eq!(json["message"], "not authorized");
    }

    #[test]
    fn test_from_serde_error() {
        let serde_err = serde_json::from_str::<i32>("invalid").unwrap_err();
        let err = ApiError::from(serde_err);
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }

    #[test]
    fn test_notify_error_display() {
        let err = NotifyError::Status(reqwest::StatusCode::BAD_GATEWAY);
        assert_eq!(err.to_string(), "unexpected status 502 Bad Gateway");
    }
}
