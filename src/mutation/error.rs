use thiserror::Error;

use crate::gateway::FetchError;

/// Why a mutation was not applied. The list is untouched in every case.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MutationError {
    #[error("Unauthorized")]
    Unauthorized,

    /// Rejected before sending, or by the backend with a 4xx.
    #[error("{message}")]
    Validation { message: String },

    #[error("Request timeout after {millis}ms")]
    Timeout { millis: u64 },

    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a body that is not JSON.
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl MutationError {
    pub fn validation(message: impl Into<String>) -> Self {
        MutationError::Validation {
            message: message.into(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, MutationError::Unauthorized)
    }
}

impl From<FetchError> for MutationError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Unauthorized => MutationError::Unauthorized,
            FetchError::Timeout { millis } => MutationError::Timeout { millis },
            FetchError::ServerError { status, message } if (400..500).contains(&status) => {
                MutationError::Validation {
                    message: message.unwrap_or_else(|| "The request was rejected.".to_string()),
                }
            }
            FetchError::ServerError { status, message } => MutationError::Server {
                status,
                message: message.unwrap_or_else(|| "Server error".to_string()),
            },
            FetchError::Network(e) => MutationError::Network(e),
            FetchError::Decode(e) => MutationError::Decode(e),
            FetchError::InvalidRequest(e) => MutationError::Validation { message: e },
        }
    }
}
