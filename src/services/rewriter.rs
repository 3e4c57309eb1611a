//! Rewrite service
//!
//! Wraps user text in the fixed system instruction, sends it to the provider
//! and pulls the rewritten text out of the first completion.

use crate::config::Settings;
use crate::models::completion::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::services::provider::CompletionProvider;
use crate::utils::error::UpstreamFailure;
use crate::utils::logging::completion_log_summary;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct Rewriter {
    provider: Arc<dyn CompletionProvider>,
    model: String,
    system_prompt: String,
    temperature: Option<f32>,
    top_p: Option<f32>,
}

impl std::fmt::Debug for Rewriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rewriter")
            .field("provider", &self.provider.name())
            .field("model", &self.model)
            .finish()
    }
}

impl Rewriter {
    pub fn new(settings: &Settings, provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            provider,
            model: settings.provider.model.clone(),
            system_prompt: settings.prompt.system_prompt.clone(),
            temperature: settings.provider.temperature,
            top_p: settings.provider.top_p,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// System instruction followed by the user's text as the only user message.
    /// The text is forwarded untouched.
    pub fn build_request(&self, text: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(self.system_prompt.as_str()),
                ChatMessage::user(text),
            ],
            temperature: self.temperature,
            top_p: self.top_p,
        }
    }

    /// Rewrite `text` with one provider call
    pub async fn rewrite(&self, text: &str, api_key: &str) -> Result<String, UpstreamFailure> {
        let request = self.build_request(text);

        if let Ok(summary) = serde_json::to_string(&completion_log_summary(&request)) {
            debug!("Outbound completion request via {}: {}", self.provider.name(), summary);
        }

        let response = self.provider.complete(request, api_key).await?;
        extract_output(response)
    }
}

/// Text content of the first completion choice
pub fn extract_output(response: ChatCompletionResponse) -> Result<String, UpstreamFailure> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| UpstreamFailure::Malformed("response contained no choices".to_string()))?;

    choice.message.content.ok_or_else(|| {
        UpstreamFailure::Malformed(format!(
            "first choice has no message content (finish_reason: {})",
            choice.finish_reason.as_deref().unwrap_or("none")
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::completion::ChatChoice;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records the request and answers with a canned result
    struct RecordingProvider {
        seen: Mutex<Vec<(ChatCompletionRequest, String)>>,
        reply: Result<ChatCompletionResponse, UpstreamFailure>,
    }

    #[async_trait]
    impl CompletionProvider for RecordingProvider {
        fn name(&self) -> &str {
            "recording"
        }

        async fn complete(
            &self,
            request: ChatCompletionRequest,
            api_key: &str,
        ) -> Result<ChatCompletionResponse, UpstreamFailure> {
            self.seen.lock().unwrap().push((request, api_key.to_string()));
            self.reply.clone()
        }
    }

    fn response_with(content: Option<&str>) -> ChatCompletionResponse {
        ChatCompletionResponse {
            id: None,
            model: None,
            choices: vec![ChatChoice {
                index: 0,
                message: ChatMessage {
                    role: "assistant".to_string(),
                    content: content.map(str::to_string),
                },
                finish_reason: Some("stop".to_string()),
            }],
            usage: None,
        }
    }

    #[test]
    fn test_build_request_uses_configured_prompt_and_model() {
        let mut settings = Settings::default();
        settings.provider.model = "custom/model".to_string();
        settings.provider.temperature = Some(0.7);
        settings.prompt.system_prompt = "Be human.".to_string();

        let provider = Arc::new(RecordingProvider {
            seen: Mutex::new(Vec::new()),
            reply: Ok(response_with(Some("x"))),
        });
        let rewriter = Rewriter::new(&settings, provider);
        let request = rewriter.build_request("  keep my spacing ");

        assert_eq!(request.model, "custom/model");
        assert_eq!(request.temperature, Some(0.7));
        assert_eq!(request.top_p, None);
        assert_eq!(request.messages, vec![ChatMessage::system("Be human."), ChatMessage::user("  keep my spacing ")]);
    }

    #[tokio::test]
    async fn test_rewrite_passes_key_and_returns_first_choice() {
        let provider = Arc::new(RecordingProvider {
            seen: Mutex::new(Vec::new()),
            reply: Ok(response_with(Some("rewritten"))),
        });
        let rewriter = Rewriter::new(&Settings::default(), provider.clone());

        let output = rewriter.rewrite("original", "sk-key").await.unwrap();

        assert_eq!(output, "rewritten");
        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].1, "sk-key");
    }

    #[test]
    fn test_extract_output_errors() {
        let empty = ChatCompletionResponse {
            id: None,
            model: None,
            choices: vec![],
            usage: None,
        };
        assert!(matches!(extract_output(empty), Err(UpstreamFailure::Malformed(_))));
        assert!(matches!(extract_output(response_with(None)), Err(UpstreamFailure::Malformed(_))));
        assert_eq!(extract_output(response_with(Some(""))).unwrap(), "");
    }
}
