//! Logging utilities
//!
//! Log-safe summaries of rewrite traffic; user text is never logged in full

use crate::models::completion::ChatCompletionRequest;
use crate::utils::text::{char_count, word_count};

/// Longest text preview written to logs
pub const PREVIEW_CHARS: usize = 80;

/// Truncate a string with a note about original length
pub fn truncate_content(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}... ({} chars truncated)", &s[..cut], char_count(&s[cut..])),
        None => s.to_string(),
    }
}

/// Summary of a rewrite submission
pub fn rewrite_log_summary(text: &str) -> serde_json::Value {
    serde_json::json!({
        "words": word_count(text),
        "chars": char_count(text),
        "preview": truncate_content(text, PREVIEW_CHARS),
    })
}

/// Summary of an outbound completion request
pub fn completion_log_summary(request: &ChatCompletionRequest) -> serde_json::Value {
    let messages: Vec<serde_json::Value> = request
        .messages
        .iter()
        .map(|msg| {
            let content = msg.content.as_deref().unwrap_or_default();
            serde_json::json!({
                "role": msg.role,
                "content": truncate_content(content, PREVIEW_CHARS),
            })
        })
        .collect();

    serde_json::json!({
        "model": request.model,
        "temperature": request.temperature,
        "top_p": request.top_p,
        "messages": messages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::completion::ChatMessage;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate_content("short", 10), "short");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let text = "ééééé";
        assert_eq!(truncate_content(text, 2), "éé... (3 chars truncated)");
    }

    #[test]
    fn test_completion_summary_truncates_messages() {
        let request = ChatCompletionRequest {
            model: "m".to_string(),
            messages: vec![ChatMessage::user("x".repeat(200))],
            temperature: None,
            top_p: None,
        };
        let summary = completion_log_summary(&request);
        let content = summary["messages"][0]["content"].as_str().unwrap();
        assert!(content.ends_with("(120 chars truncated)"));
    }
}
