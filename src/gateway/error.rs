//! Error taxonomy for backend calls.

use thiserror::Error;

/// Errors surfaced by the [`FetchGateway`](super::FetchGateway).
///
/// Nothing is retried; every variant reaches the calling view.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FetchError {
    /// HTTP 401. Views treat this as "redirect to login".
    #[error("Unauthorized")]
    Unauthorized,

    /// The call did not complete within its budget and was dropped.
    #[error("Request timeout after {millis}ms")]
    Timeout { millis: u64 },

    /// Any other non-2xx response.
    #[error("Server error {status}: {}", .message.as_deref().unwrap_or("no details"))]
    ServerError { status: u16, message: Option<String> },

    /// Transport failure (connection refused, reset, DNS...).
    #[error("Network error: {0}")]
    Network(String),

    /// The body did not have the expected shape.
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// The request could not be built (bad URL, bad form part).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl FetchError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, FetchError::Unauthorized)
    }

    /// HTTP status carried by the error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Unauthorized => Some(401),
            FetchError::ServerError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short text suitable for an inline message next to a retry control.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Unauthorized => "Your session has expired. Please log in again.".to_string(),
            FetchError::Timeout { .. } => "The server took too long to respond.".to_string(),
            FetchError::ServerError {
                message: Some(message),
                ..
            } => message.clone(),
            FetchError::ServerError { .. } => "Server error".to_string(),
            FetchError::Network(_) => "Network error".to_string(),
            FetchError::Decode(_) | FetchError::InvalidRequest(_) => {
                "Unexpected response from the server.".to_string()
            }
        }
    }
}
