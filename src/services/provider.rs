//! Completion provider seam
//!
//! Anything that can answer a chat-completion request. The HTTP client is the
//! production implementation; tests plug in local providers.

use crate::models::completion::{ChatCompletionRequest, ChatCompletionResponse};
use crate::utils::error::UpstreamFailure;
use async_trait::async_trait;

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name used in logs
    fn name(&self) -> &str;

    /// Send one chat completion request
    async fn complete(
        &self,
        request: ChatCompletionRequest,
        api_key: &str,
    ) -> Result<ChatCompletionResponse, UpstreamFailure>;
}
