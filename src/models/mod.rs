//! Data models module
//!
//! Defines the proxy contract and the chat-completion wire structures

pub mod completion;
pub mod rewrite;

pub use completion::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
pub use rewrite::{ErrorBody, ErrorKind, RewriteRequest, RewriteResponse};
