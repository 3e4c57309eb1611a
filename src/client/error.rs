//! Client-side error types

use crate::models::rewrite::ErrorKind;
use thiserror::Error;

/// Errors surfaced to the editor user
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Draft is blank; never reaches the network
    #[error("Please enter some text to humanize")]
    EmptyInput,

    /// Draft is over the active tier's limit; never reaches the network
    #[error("Word limit exceeded! Maximum {limit} words allowed ({words} entered)")]
    QuotaExceeded { words: usize, limit: usize },

    /// A rewrite is already in flight
    #[error("A rewrite is already in progress")]
    SubmissionInFlight,

    /// The proxy could not be reached
    #[error("Network error: {0}")]
    NetworkFailure(String),

    /// The proxy answered with an error body
    #[error("{error}{}", .detail.as_ref().map(|d| format!(" ({})", d)).unwrap_or_default())]
    Server {
        status: u16,
        kind: Option<ErrorKind>,
        error: String,
        detail: Option<String>,
    },

    /// The proxy answered 2xx with something that is not a rewrite response
    #[error("Invalid server response: {0}")]
    InvalidResponse(String),

    /// Clipboard permission refused or clipboard unavailable
    #[error("Clipboard access denied: {0}")]
    ClipboardDenied(String),

    /// Theme preference could not be stored
    #[error("Theme preference error: {0}")]
    Theme(String),
}

impl ClientError {
    /// Local validation errors are prevented by disabling the submit control
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ClientError::EmptyInput | ClientError::QuotaExceeded { .. } | ClientError::SubmissionInFlight
        )
    }

    /// Server-reported misconfiguration, as opposed to a provider outage
    pub fn is_missing_credential(&self) -> bool {
        matches!(
            self,
            ClientError::Server {
                kind: Some(ErrorKind::MissingCredential),
                ..
            }
        )
    }

    /// Provider error, timeout or malformed provider response
    pub fn is_upstream_failure(&self) -> bool {
        matches!(
            self,
            ClientError::Server {
                kind: Some(ErrorKind::UpstreamFailure),
                ..
            }
        )
    }
}
