//! Error types and response handling for the admin relay.
//!
//! Every failure answers with the same JSON shape:
//! `{ "message": ..., "type": ..., "request_id": ... }`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur while relaying a browser request.
#[derive(Debug, Error)]
pub enum RelayError {
    /// No session cookie, or the backend rejected the token.
    #[error("Unauthorized")]
    Unauthorized,

    /// Failed to reach the backend
    #[error("Connection to backend failed: {source}")]
    ConnectionError {
        #[source]
        source: reqwest::Error,
    },

    /// Backend did not answer within the budget
    #[error("Request timeout after {millis}ms")]
    RequestTimeout { millis: u64 },

    /// The browser sent something we cannot forward
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The backend answered with a body that is not JSON
    #[error("Invalid backend response: {0}")]
    InvalidUpstreamBody(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RelayError {
    /// Map error variant to appropriate HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::Unauthorized => StatusCode::UNAUTHORIZED,
            RelayError::ConnectionError { .. } => StatusCode::BAD_GATEWAY,
            RelayError::RequestTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            RelayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            RelayError::InvalidUpstreamBody(_) => StatusCode::BAD_GATEWAY,
            RelayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error type string for JSON responses
    pub fn error_type(&self) -> &'static str {
        match self {
            RelayError::Unauthorized => "unauthorized",
            RelayError::ConnectionError { .. } => "connection_error",
            RelayError::RequestTimeout { .. } => "request_timeout",
            RelayError::InvalidRequest(_) => "invalid_request",
            RelayError::InvalidUpstreamBody(_) => "invalid_upstream_body",
            RelayError::Internal(_) => "internal_error",
        }
    }

    /// Text shown to the browser. Backend details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            RelayError::Unauthorized => "Unauthorized".to_string(),
            RelayError::RequestTimeout { .. } => "The server took too long to respond.".to_string(),
            RelayError::InvalidRequest(message) => message.clone(),
            _ => "Server error".to_string(),
        }
    }
}

/// Builder for standardized error responses
pub struct ErrorResponse;

impl ErrorResponse {
    /// Create a JSON error response from a RelayError
    pub fn from_error(err: &RelayError, request_id: &str) -> Response {
        let body = serde_json::json!({
            "message": err.public_message(),
            "type": err.error_type(),
            "request_id": request_id,
        });
        (err.status_code(), Json(body)).into_response()
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4().to_string();
        if !matches!(self, RelayError::Unauthorized) {
            tracing::warn!(%request_id, error = %self, "relay request failed");
        }
        ErrorResponse::from_error(&self, &request_id)
    }
}
