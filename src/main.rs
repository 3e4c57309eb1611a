//! Humanizer proxy server
//!
//! Serves the rewrite endpoint that relays text to the completion provider

use anyhow::{Context, Result};
use humanizer::handlers::{LEGACY_REWRITE_PATH, REWRITE_PATH};
use humanizer::{create_router, init_logging, Settings};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before logging so RUST_LOG and LOG_FORMAT from it apply
    dotenv::dotenv().ok();

    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    init_logging(&log_level, &log_format)?;

    let settings = Settings::new().context("Failed to load server settings")?;
    info!("Server settings loaded (model: {})", settings.provider.model);

    let addr = settings.bind_address();
    let app = create_router(settings).await?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("🚀 {} started!", humanizer::version_info());
    info!("📝 Health check: http://{}/health", addr);
    info!("🔄 Rewrite endpoint: http://{}{} (legacy: {})", addr, REWRITE_PATH, LEGACY_REWRITE_PATH);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to start server: {}", e))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
