//! Client submission controller
//!
//! Everything the editor front-end needs to gate, send and render a rewrite:
//! session-derived word quotas, the submission state machine, the HTTP call
//! to the proxy, clipboard access and the persisted theme.

pub mod api;
pub mod clipboard;
pub mod controller;
pub mod error;
pub mod identity;
pub mod session;
pub mod theme;

pub use api::{HttpRewriteApi, RewriteApi};
pub use clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
pub use controller::{ControllerState, ControllerView, CounterTone, Notice, NoticeLevel, RewriteResult, SubmissionController};
pub use error::ClientError;
pub use identity::{IdentityEvent, IdentityHub};
pub use session::{QuotaTier, Session};
pub use theme::{Theme, ThemeStore};
