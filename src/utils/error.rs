//! Error handling module
//!
//! Defines the proxy's error taxonomy and how each error maps onto the JSON contract

use crate::models::rewrite::{ErrorBody, ErrorKind};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// `text` missing, null or blank
    #[error("Text is required")]
    EmptyInput,

    /// Body is not a JSON object with a string `text`
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Body larger than the configured request size
    #[error("Request body too large: limit is {limit} bytes")]
    PayloadTooLarge { limit: usize },

    /// Server-side word ceiling exceeded
    #[error("Word limit exceeded: {words} words submitted, maximum is {limit}")]
    QuotaExceeded { words: usize, limit: usize },

    /// Provider credential absent from the environment
    #[error("Server configuration missing: provider API key is not set")]
    MissingCredential,

    /// Provider error, timeout or malformed response
    #[error("Upstream provider failure: {0}")]
    Upstream(#[from] UpstreamFailure),

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Failures of the outbound completion call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamFailure {
    /// No response within the configured bound
    #[error("provider request timed out after {seconds}s: {cause}")]
    Timeout { seconds: u64, cause: String },

    /// Connection, TLS or body read failure
    #[error("provider transport error: {0}")]
    Transport(String),

    /// Non-success status from the provider
    #[error("provider returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Response did not carry a usable completion
    #[error("malformed provider response: {0}")]
    Malformed(String),
}

impl AppError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::EmptyInput | AppError::InvalidBody(_) | AppError::QuotaExceeded { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::MissingCredential | AppError::Upstream(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get error class
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::EmptyInput => ErrorKind::EmptyInput,
            AppError::InvalidBody(_) => ErrorKind::InvalidBody,
            AppError::PayloadTooLarge { .. } => ErrorKind::PayloadTooLarge,
            AppError::QuotaExceeded { .. } => ErrorKind::QuotaExceeded,
            AppError::MissingCredential => ErrorKind::MissingCredential,
            AppError::Upstream(_) => ErrorKind::UpstreamFailure,
            AppError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Short message placed in the `error` field
    pub fn summary(&self) -> String {
        match self {
            AppError::EmptyInput => "Text is required".to_string(),
            AppError::InvalidBody(_) => "Invalid request body".to_string(),
            AppError::PayloadTooLarge { .. } => "Request body too large".to_string(),
            AppError::QuotaExceeded { .. } => "Word limit exceeded".to_string(),
            AppError::MissingCredential => self.to_string(),
            AppError::Upstream(_) => "Failed to humanize text".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }

    /// Underlying cause placed in the `detail` field
    pub fn detail(&self) -> Option<String> {
        match self {
            AppError::EmptyInput | AppError::MissingCredential => None,
            AppError::InvalidBody(msg) | AppError::Internal(msg) => Some(msg.clone()),
            AppError::PayloadTooLarge { limit } => Some(format!("request body exceeds {} bytes", limit)),
            AppError::QuotaExceeded { words, limit } => Some(format!(
                "{} words submitted, maximum is {}",
                words, limit
            )),
            AppError::Upstream(failure) => Some(failure.to_string()),
        }
    }

    /// Convert to the JSON error body
    pub fn to_error_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.summary(),
            kind: Some(self.kind()),
            detail: self.detail(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(kind = self.kind().as_str(), "Request failed: {} - Status code: {}", self, status);
        } else {
            tracing::warn!(kind = self.kind().as_str(), "Request rejected: {} - Status code: {}", self, status);
        }

        (status, Json(self.to_error_body())).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Render an error with its whole source chain
pub fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AppError::EmptyInput.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::MissingCredential.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            AppError::Upstream(UpstreamFailure::Transport("refused".to_string())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_missing_credential_distinct_from_upstream() {
        let config = AppError::MissingCredential.to_error_body();
        let outage = AppError::Upstream(UpstreamFailure::Status {
            status: 503,
            message: "overloaded".to_string(),
        })
        .to_error_body();

        assert_ne!(config.kind, outage.kind);
        assert_ne!(config.error, outage.error);
        assert!(config.error.contains("configuration missing"));
        assert_eq!(outage.detail.as_deref(), Some("provider returned 503: overloaded"));
    }

    #[test]
    fn test_error_chain_joins_sources() {
        #[derive(Error, Debug)]
        #[error("outer")]
        struct Outer(#[source] std::io::Error);

        let err = Outer(std::io::Error::new(std::io::ErrorKind::Other, "inner cause"));
        assert_eq!(error_chain(&err), "outer: inner cause");
    }
}
