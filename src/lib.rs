//! Humanizer
//!
//! A quota-gated text rewrite service: a stateless HTTP proxy that relays
//! text to a chat-completion provider under a fixed system prompt, and the
//! client-side submission controller that decides when text may be sent.

pub mod client;
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

// Re-export common types
pub use config::Settings;
pub use handlers::{create_router, create_router_with_provider, AppState};
pub use services::{CompletionClient, CompletionProvider, Rewriter};
pub use utils::error::{AppError, AppResult, UpstreamFailure};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version information
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}

/// Install the global tracing subscriber.
///
/// `format` is `json` for structured production logs, anything else gives
/// human readable output.
pub fn init_logging(level: &str, format: &str) -> anyhow::Result<()> {
    use anyhow::Context;

    let filter = tracing_subscriber::EnvFilter::try_new(level)
        .with_context(|| format!("Invalid log filter: {}", level))?;

    let subscriber: Box<dyn tracing::Subscriber + Send + Sync> = if format == "json" {
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .finish(),
        )
    } else {
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .finish(),
        )
    };

    tracing::subscriber::set_global_default(subscriber).context("Failed to set tracing subscriber")
}
