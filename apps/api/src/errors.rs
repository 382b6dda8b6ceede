use std::time::Duration;

use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::envelope;
use crate::llm_client::LlmError;

/// Request-level error type.
/// Implements `IntoResponse` so handlers can return `Result<Response, AppError>`;
/// every variant renders through the shared error envelope.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing required parameters")]
    MissingParameter { field: &'static str },

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("{0}")]
    Configuration(String),

    #[error("LLM request failed: {0}")]
    Upstream(#[from] LlmError),

    #[error("Unexpected LLM response: {0}")]
    UnexpectedResponseShape(String),

    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

impl AppError {
    pub fn missing_api_key() -> Self {
        AppError::Configuration("Missing API key".to_string())
    }

    /// Stable machine-readable identifier for the envelope's `code` field.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MissingParameter { .. } => "MISSING_PARAMETER",
            AppError::InvalidBody(_) => "INVALID_BODY",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Upstream(_) => "UPSTREAM_CALL_FAILURE",
            AppError::UnexpectedResponseShape(_) => "UNEXPECTED_RESPONSE_SHAPE",
            AppError::Timeout(_) => "TIMEOUT",
        }
    }

    /// Stringified error for the envelope's `details` field. This is raw internal
    /// text and is sent to the caller verbatim.
    pub fn details(&self) -> String {
        match self {
            AppError::MissingParameter { field } => format!("Missing required field '{field}'"),
            AppError::Upstream(e) => format!("{e:?}"),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Upstream(e) => tracing::error!("LLM error: {e}"),
            AppError::Configuration(msg) => tracing::error!("Configuration error: {msg}"),
            AppError::UnexpectedResponseShape(msg) => {
                tracing::error!("Unexpected LLM response: {msg}")
            }
            AppError::Timeout(d) => tracing::warn!("Request timed out after {}ms", d.as_millis()),
            AppError::MissingParameter { .. } | AppError::InvalidBody(_) => {
                tracing::warn!("Rejected request: {}", self.details())
            }
        }

        envelope::failure(&self)
    }
}
