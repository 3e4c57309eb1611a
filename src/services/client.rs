//! HTTP client service
//!
//! Encapsulates HTTP communication with the chat-completion provider

use crate::config::settings::ProviderConfig;
use crate::models::completion::*;
use crate::services::provider::CompletionProvider;
use crate::utils::error::{error_chain, UpstreamFailure};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, error};

/// Chat-completion API client
#[derive(Debug, Clone)]
pub struct CompletionClient {
    client: Client,
    base_url: String,
    timeout_secs: u64,
}

impl CompletionClient {
    /// Create a new client instance
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(concat!("humanizer/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout,
        })
    }

    /// Completions endpoint URL
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn map_send_error(&self, e: reqwest::Error) -> UpstreamFailure {
        if e.is_timeout() {
            UpstreamFailure::Timeout {
                seconds: self.timeout_secs,
                cause: error_chain(&e),
            }
        } else {
            UpstreamFailure::Transport(error_chain(&e))
        }
    }

    /// Handle HTTP response
    async fn handle_response(&self, response: Response) -> Result<ChatCompletionResponse, UpstreamFailure> {
        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_send_error(e))?;

        if status.is_success() {
            let parsed: ChatCompletionResponse = serde_json::from_str(&body)
                .map_err(|e| UpstreamFailure::Malformed(format!("{}: {}", e, body_preview(&body))))?;

            debug!("Provider request completed successfully");
            Ok(parsed)
        } else {
            // Prefer the provider's own error message when it sends one
            let message = match serde_json::from_str::<ProviderErrorResponse>(&body) {
                Ok(error_response) => error_response.error.message,
                Err(_) if body.trim().is_empty() => status
                    .canonical_reason()
                    .unwrap_or("no response body")
                    .to_string(),
                Err(_) => body,
            };

            error!("Provider request failed: {} - {}", status, message);
            Err(UpstreamFailure::Status {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl CompletionProvider for CompletionClient {
    fn name(&self) -> &str {
        "http"
    }

    async fn complete(
        &self,
        request: ChatCompletionRequest,
        api_key: &str,
    ) -> Result<ChatCompletionResponse, UpstreamFailure> {
        debug!("Sending chat completion request to {}", self.endpoint());

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        self.handle_response(response).await
    }
}

fn body_preview(body: &str) -> String {
    crate::utils::logging::truncate_content(body, 200)
}
