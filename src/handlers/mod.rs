//! HTTP handlers module
//!
//! Contains all HTTP endpoint handling logic

pub mod health;
pub mod rewrite;

use crate::config::Settings;
use crate::middleware::logging::request_logging_middleware;
use crate::services::{CompletionClient, CompletionProvider, Rewriter};
use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

/// Rewrite endpoint path
pub const REWRITE_PATH: &str = "/api/rewrite";

/// Path the original serverless deployment exposed
pub const LEGACY_REWRITE_PATH: &str = "/.netlify/functions/humanize";

/// Application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Settings,
    pub rewriter: Rewriter,
    pub started_at: Instant,
}

/// Create application router backed by the HTTP completion client
pub async fn create_router(settings: Settings) -> Result<Router> {
    let client = CompletionClient::new(&settings.provider)?;
    Ok(create_router_with_provider(settings, Arc::new(client)))
}

/// Create application router with an explicit completion provider
pub fn create_router_with_provider(settings: Settings, provider: Arc<dyn CompletionProvider>) -> Router {
    let rewriter = Rewriter::new(&settings, provider);
    let cors = cors_layer(&settings);
    let body_limit = settings.request.max_request_size;

    let app_state = Arc::new(AppState {
        settings,
        rewriter,
        started_at: Instant::now(),
    });

    // Create middleware stack
    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(cors)
        .layer(DefaultBodyLimit::max(body_limit));

    Router::new()
        .route(REWRITE_PATH, post(rewrite::handle_rewrite))
        .route(LEGACY_REWRITE_PATH, post(rewrite::handle_rewrite))
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .route("/health/ready", get(health::readiness_check))
        .with_state(app_state)
        .layer(middleware_stack)
}

/// CORS policy; `OPTIONS` requests on the rewrite routes are answered here with an empty 200
fn cors_layer(settings: &Settings) -> CorsLayer {
    let origins = &settings.security.allowed_origins;

    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid allowed origin: {}", o);
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
