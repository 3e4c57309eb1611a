//! Calls from the editor to the rewrite proxy

use crate::client::error::ClientError;
use crate::models::rewrite::{ErrorBody, RewriteRequest, RewriteResponse};
use crate::utils::error::error_chain;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

/// Default client-side bound, above the proxy's own upstream timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[async_trait]
pub trait RewriteApi: Send + Sync {
    /// Send one rewrite request and return the rewritten text
    async fn rewrite(&self, request: &RewriteRequest) -> Result<String, ClientError>;
}

/// [`RewriteApi`] over HTTP
#[derive(Debug, Clone)]
pub struct HttpRewriteApi {
    client: Client,
    endpoint: String,
}

impl HttpRewriteApi {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_timeout(endpoint, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("humanize/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::NetworkFailure(error_chain(&e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RewriteApi for HttpRewriteApi {
    async fn rewrite(&self, request: &RewriteRequest) -> Result<String, ClientError> {
        debug!("Posting rewrite request to {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header("Accept", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::NetworkFailure(error_chain(&e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::NetworkFailure(error_chain(&e)))?;

        if status.is_success() {
            let parsed: RewriteResponse =
                serde_json::from_str(&body).map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
            return Ok(parsed.output);
        }

        let err = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(error_body) => ClientError::Server {
                status: status.as_u16(),
                kind: error_body.kind,
                error: error_body.error,
                detail: error_body.detail,
            },
            Err(_) => ClientError::Server {
                status: status.as_u16(),
                kind: None,
                error: "Server connection failed".to_string(),
                detail: Some(body).filter(|b| !b.trim().is_empty()),
            },
        };

        error!("Rewrite request failed with {}: {}", status, err);
        Err(err)
    }
}
