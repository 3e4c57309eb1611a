//! Health check handlers
//!
//! Provides application health status check endpoints

use crate::handlers::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service name
    pub service: String,
    /// Version information
    pub version: String,
    /// Timestamp
    pub timestamp: String,
    /// Details (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HealthDetails>,
}

/// Check result
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthDetails {
    /// Provider credential status
    pub provider: String,
    /// Model used for rewrites
    pub model: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
}

fn credential_status(state: &AppState) -> &'static str {
    if state.settings.has_credential() {
        "configured"
    } else {
        "missing_credential"
    }
}

fn build_response(state: &AppState, status: &str, provider: &str) -> HealthResponse {
    HealthResponse {
        status: status.to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        details: Some(HealthDetails {
            provider: provider.to_string(),
            model: state.rewriter.model().to_string(),
            uptime_seconds: state.started_at.elapsed().as_secs(),
        }),
    }
}

/// Basic health check
///
/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    debug!("Executing health check");
    Json(build_response(&state, "healthy", credential_status(&state)))
}

/// Readiness check
///
/// GET /health/ready
/// Reports 503 while the provider credential is missing so misconfiguration
/// shows up before the first user request.
pub async fn readiness_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    debug!("Executing readiness check");

    if state.settings.has_credential() {
        Ok(Json(build_response(&state, "ready", "configured")))
    } else {
        Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(build_response(&state, "not_ready", "missing_credential")),
        ))
    }
}

/// Liveness check
///
/// GET /health/live
/// Does not check external dependencies
pub async fn liveness_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    debug!("Executing liveness check");
    Json(build_response(&state, "alive", "not_checked"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::services::{CompletionClient, Rewriter};
    use std::time::Instant;

    fn create_test_state(api_key: Option<&str>) -> Arc<AppState> {
        let mut settings = Settings::default();
        settings.provider.api_key = api_key.map(str::to_string);
        let client = CompletionClient::new(&settings.provider).unwrap();
        let rewriter = Rewriter::new(&settings, Arc::new(client));

        Arc::new(AppState {
            settings,
            rewriter,
            started_at: Instant::now(),
        })
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = health_check(State(create_test_state(None))).await.0;
        assert_eq!(response.status, "healthy");
        assert_eq!(response.service, "humanizer");
        assert_eq!(response.details.unwrap().provider, "missing_credential");
    }

    #[tokio::test]
    async fn test_readiness_requires_credential() {
        let (status, body) = readiness_check(State(create_test_state(None))).await.unwrap_err();
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.0.status, "not_ready");

        let ready = readiness_check(State(create_test_state(Some("sk-test")))).await.unwrap();
        assert_eq!(ready.0.status, "ready");
    }

    #[tokio::test]
    async fn test_liveness_check() {
        let response = liveness_check(State(create_test_state(None))).await.0;
        assert_eq!(response.status, "alive");
        assert!(response.details.is_some());
    }
}
