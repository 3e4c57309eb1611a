//! Rewrite proxy contract
//!
//! The JSON bodies exchanged between the client controller and the proxy endpoint

use serde::{Deserialize, Deserializer, Serialize};

/// Rewrite request body: `{"text": string}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteRequest {
    /// Text to rewrite; a missing or `null` field reads as empty
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text: String,
}

impl RewriteRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Successful rewrite: `{"output": string}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteResponse {
    #[serde(default)]
    pub output: String,
}

/// Machine-readable error class carried alongside the message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    EmptyInput,
    InvalidBody,
    PayloadTooLarge,
    QuotaExceeded,
    MissingCredential,
    UpstreamFailure,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::EmptyInput => "empty_input",
            ErrorKind::InvalidBody => "invalid_body",
            ErrorKind::PayloadTooLarge => "payload_too_large",
            ErrorKind::QuotaExceeded => "quota_exceeded",
            ErrorKind::MissingCredential => "missing_credential",
            ErrorKind::UpstreamFailure => "upstream_failure",
            ErrorKind::Internal => "internal",
        }
    }
}

/// Error body: `{"error": string, "kind"?: string, "detail"?: string}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human readable summary
    pub error: String,
    /// Error class
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
    /// Underlying cause, relayed verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_and_null_text_read_as_empty() {
        let missing: RewriteRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(missing.text, "");

        let null: RewriteRequest = serde_json::from_value(json!({"text": null})).unwrap();
        assert_eq!(null.text, "");
    }

    #[test]
    fn test_non_string_text_rejected() {
        assert!(serde_json::from_value::<RewriteRequest>(json!({"text": 42})).is_err());
    }

    #[test]
    fn test_error_body_skips_empty_fields() {
        let body = ErrorBody {
            error: "Text is required".to_string(),
            kind: None,
            detail: None,
        };
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({"error": "Text is required"}));
    }

    #[test]
    fn test_error_kind_wire_names_match_as_str() {
        for kind in [
            ErrorKind::EmptyInput,
            ErrorKind::InvalidBody,
            ErrorKind::PayloadTooLarge,
            ErrorKind::QuotaExceeded,
            ErrorKind::MissingCredential,
            ErrorKind::UpstreamFailure,
            ErrorKind::Internal,
        ] {
            assert_eq!(serde_json::to_value(kind).unwrap(), json!(kind.as_str()));
        }
    }
}
