//! Error types for the word service
//!
//! Request-path failures are typed so the HTTP layer can tell user mistakes
//! (400) apart from storage trouble (500). Startup and configuration code
//! keeps using anyhow.

use crate::types::Envelope;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, WordServiceError>;

/// Message returned to clients for any 500 response
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Errors raised while serving a word request
#[derive(Debug, thiserror::Error)]
pub enum WordServiceError {
    #[error("{message}")]
    InvalidInput { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal service error: {message}")]
    Internal { message: String },
}

impl WordServiceError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// HTTP status this error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            WordServiceError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            WordServiceError::Storage { .. } | WordServiceError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<sqlx::Error> for WordServiceError {
    fn from(err: sqlx::Error) -> Self {
        WordServiceError::Storage {
            message: err.to_string(),
        }
    }
}

impl IntoResponse for WordServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let envelope = match self {
            WordServiceError::InvalidInput { message } => Envelope::failure(message),
            other => {
                error!("Request failed: {}", other);
                Envelope::failure(INTERNAL_ERROR_MESSAGE)
            }
        };
        (status, Json(envelope)).into_response()
    }
}
