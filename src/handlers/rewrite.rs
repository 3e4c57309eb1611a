//! Rewrite proxy handler
//!
//! Validates the `{text}` payload, checks the provider credential and relays
//! one completion call.

use crate::handlers::AppState;
use crate::models::rewrite::{RewriteRequest, RewriteResponse};
use crate::utils::error::{AppError, AppResult};
use crate::utils::logging::rewrite_log_summary;
use crate::utils::text::word_count;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Handle rewrite requests
///
/// POST /api/rewrite
pub async fn handle_rewrite(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<Json<RewriteResponse>> {
    let body = body.map_err(|rejection| body_error(rejection, state.settings.request.max_request_size))?;
    let request = parse_request(&body)?;
    let text = request.text;

    if text.trim().is_empty() {
        return Err(AppError::EmptyInput);
    }

    let words = word_count(&text);
    let limit = state.settings.quota.max_input_words;
    if limit > 0 && words > limit {
        return Err(AppError::QuotaExceeded { words, limit });
    }

    let api_key = state
        .settings
        .provider
        .api_key
        .as_deref()
        .ok_or(AppError::MissingCredential)?;

    if let Ok(summary) = serde_json::to_string(&rewrite_log_summary(&text)) {
        debug!("📥 Rewrite request: {}", summary);
    }

    let output = state.rewriter.rewrite(&text, api_key).await?;

    info!(
        input_words = words,
        output_words = word_count(&output),
        model = state.rewriter.model(),
        "Rewrite completed"
    );

    Ok(Json(RewriteResponse { output }))
}

/// Map a body read failure onto the JSON error contract
fn body_error(rejection: BytesRejection, limit: usize) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge { limit }
    } else {
        AppError::InvalidBody(rejection.body_text())
    }
}

/// Parse the body; an empty body is treated as a missing `text`
fn parse_request(body: &[u8]) -> AppResult<RewriteRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(RewriteRequest::default());
    }

    serde_json::from_slice(body).map_err(|e| AppError::InvalidBody(e.to_string()))
}
