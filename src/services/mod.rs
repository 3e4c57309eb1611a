//! Services module
//!
//! The outbound completion client and the rewrite logic built on top of it

pub mod client;
pub mod provider;
pub mod rewriter;

pub use client::CompletionClient;
pub use provider::CompletionProvider;
pub use rewriter::Rewriter;
