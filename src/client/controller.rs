//! Submission controller
//!
//! Owns the draft, the output buffer and the current session, and decides
//! when a rewrite may be sent. The quota tier is always derived from the
//! session; counters are always derived from the draft.
//!
//! [`SubmissionController::submit`] borrows the controller mutably for the
//! whole round trip, so a second submission cannot start while one is in
//! flight. Hosts that drive the request themselves use
//! [`begin_submission`](SubmissionController::begin_submission) and
//! [`complete_submission`](SubmissionController::complete_submission); the
//! `Submitting` state then keeps the submit control disabled.

use crate::client::api::RewriteApi;
use crate::client::clipboard::Clipboard;
use crate::client::error::ClientError;
use crate::client::identity::IdentityEvent;
use crate::client::session::{QuotaTier, Session};
use crate::models::rewrite::RewriteRequest;
use crate::utils::text::{char_count, word_count};
use tracing::{debug, warn};

/// Output buffer contents while a request is in flight
pub const PROCESSING_PLACEHOLDER: &str = "AI is humanizing your text... Please wait.";

/// Output buffer contents when the proxy returns a blank rewrite
pub const NO_OUTPUT_MESSAGE: &str = "Error: No output received";

/// Appended to a refused paste
pub const MANUAL_PASTE_HINT: &str = "Paste manually with Ctrl+V";

/// Outcome of one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteResult {
    Output(String),
    Failed(ClientError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerState {
    /// Fresh or just-cleared editor
    Idle,
    /// Draft has no words
    Invalid,
    /// Draft is over the active tier's limit
    OverQuota,
    Ready,
    Submitting,
    Displaying(RewriteResult),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterTone {
    Neutral,
    Ok,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Transient message for the host to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Everything the host renders besides the two text buffers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerView {
    pub tier: QuotaTier,
    pub words: usize,
    pub chars: usize,
    pub limit: usize,
    pub output_words: usize,
    pub word_label: String,
    pub char_label: String,
    pub output_word_label: String,
    pub counter_tone: CounterTone,
    pub submit_enabled: bool,
    pub submit_title: String,
    pub busy: bool,
}

#[derive(Debug, Clone)]
pub struct SubmissionController {
    session: Option<Session>,
    draft: String,
    output: String,
    output_words: usize,
    state: ControllerState,
}

impl Default for SubmissionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionController {
    pub fn new() -> Self {
        Self {
            session: None,
            draft: String::new(),
            output: String::new(),
            output_words: 0,
            state: ControllerState::Idle,
        }
    }

    pub fn with_session(session: Option<Session>) -> Self {
        let mut controller = Self::new();
        controller.set_session(session);
        controller
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn tier(&self) -> QuotaTier {
        QuotaTier::for_session(self.session.as_ref())
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn word_count(&self) -> usize {
        word_count(&self.draft)
    }

    pub fn char_count(&self) -> usize {
        char_count(&self.draft)
    }

    /// The latest submission outcome while it is on screen
    pub fn result(&self) -> Option<&RewriteResult> {
        match &self.state {
            ControllerState::Displaying(result) => Some(result),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.state == ControllerState::Submitting
    }

    /// Enabled iff nothing is in flight and `1 <= words <= limit`
    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && self.tier().admits(self.word_count())
    }

    /// Replace the draft (one input event)
    pub fn input(&mut self, text: impl Into<String>) {
        self.draft = text.into();
        self.reconcile();
    }

    /// Switch session and re-check the current draft against the new tier
    pub fn set_session(&mut self, session: Option<Session>) {
        let before = self.tier();
        self.session = session;
        let after = self.tier();
        if before != after {
            debug!("Quota tier changed: {:?} -> {:?}", before, after);
        }
        self.reconcile();
    }

    /// Apply one identity provider event
    pub fn apply_identity_event(&mut self, event: IdentityEvent) -> Option<Notice> {
        match event {
            IdentityEvent::Init(session) => {
                self.set_session(session);
                None
            }
            IdentityEvent::Login(session) => {
                self.set_session(Some(session));
                Some(Notice::new(NoticeLevel::Success, "Login successful! Word limit increased."))
            }
            IdentityEvent::Logout => {
                self.set_session(None);
                Some(Notice::new(NoticeLevel::Info, "Logged out successfully."))
            }
            IdentityEvent::Error(message) => {
                warn!("Identity provider error: {}", message);
                Some(Notice::new(NoticeLevel::Error, "Login error occurred. Please try again."))
            }
        }
    }

    /// Validate the draft and enter `Submitting`
    pub fn begin_submission(&mut self) -> Result<RewriteRequest, ClientError> {
        if self.is_submitting() {
            return Err(ClientError::SubmissionInFlight);
        }

        let words = self.word_count();
        if words == 0 {
            return Err(ClientError::EmptyInput);
        }

        let limit = self.tier().word_limit();
        if words > limit {
            return Err(ClientError::QuotaExceeded { words, limit });
        }

        self.state = ControllerState::Submitting;
        self.output = PROCESSING_PLACEHOLDER.to_string();
        Ok(RewriteRequest::new(self.draft.trim()))
    }

    /// Record the outcome of the in-flight submission. The draft is never touched.
    pub fn complete_submission(&mut self, result: Result<String, ClientError>) -> Notice {
        if !self.is_submitting() {
            warn!("Submission result arrived while {:?}", self.state);
        }

        let (result, notice) = match result {
            Ok(output) => {
                self.output_words = word_count(&output);
                self.output = if output.trim().is_empty() {
                    NO_OUTPUT_MESSAGE.to_string()
                } else {
                    output.clone()
                };
                (
                    RewriteResult::Output(output),
                    Notice::new(NoticeLevel::Success, "Text humanized successfully!"),
                )
            }
            Err(err) => {
                self.output = format!("Error: {}. Please try again.", err);
                let notice = Notice::new(NoticeLevel::Error, format!("API Error: {}", err));
                (RewriteResult::Failed(err), notice)
            }
        };

        self.state = ControllerState::Displaying(result);
        notice
    }

    /// Send the draft through `api` and display the outcome.
    ///
    /// Local validation failures are returned as `Err` and nothing is sent;
    /// remote failures end up in the output buffer.
    pub async fn submit<A>(&mut self, api: &A) -> Result<Notice, ClientError>
    where
        A: RewriteApi + ?Sized,
    {
        let request = self.begin_submission()?;
        let result = api.rewrite(&request).await;
        Ok(self.complete_submission(result))
    }

    /// Reset draft, output and both counters together
    pub fn clear(&mut self) -> Notice {
        self.draft.clear();
        self.output.clear();
        self.output_words = 0;
        if !self.is_submitting() {
            self.state = ControllerState::Idle;
        }
        Notice::new(NoticeLevel::Info, "All cleared!")
    }

    /// Replace the draft with the clipboard contents
    pub fn paste_from(&mut self, clipboard: &mut dyn Clipboard) -> Result<Notice, ClientError> {
        let text = clipboard.read_text().map_err(|e| match e {
            ClientError::ClipboardDenied(cause) => {
                ClientError::ClipboardDenied(format!("{}. {}", cause, MANUAL_PASTE_HINT))
            }
            other => other,
        })?;
        self.input(text);
        Ok(Notice::new(NoticeLevel::Success, "Text pasted successfully!"))
    }

    /// Put the output buffer on the clipboard
    pub fn copy_to(&self, clipboard: &mut dyn Clipboard) -> Result<Notice, ClientError> {
        if self.output.trim().is_empty() {
            return Ok(Notice::new(NoticeLevel::Warning, "Nothing to copy!"));
        }
        clipboard.write_text(&self.output)?;
        Ok(Notice::new(NoticeLevel::Success, "Copied to clipboard!"))
    }

    pub fn view(&self) -> ControllerView {
        let tier = self.tier();
        let words = self.word_count();
        let limit = tier.word_limit();

        let word_label = match tier.badge() {
            Some(badge) => format!("Words: {}/{} ({})", words, limit, badge),
            None => format!("Words: {}/{}", words, limit),
        };

        let (counter_tone, submit_title) = if words == 0 {
            (CounterTone::Neutral, "Please enter some text".to_string())
        } else if words > limit {
            (
                CounterTone::Warning,
                format!("Word limit exceeded (max {} words)", limit),
            )
        } else {
            (CounterTone::Ok, String::new())
        };

        ControllerView {
            tier,
            words,
            chars: self.char_count(),
            limit,
            output_words: self.output_words,
            word_label,
            char_label: format!("Chars: {}", self.char_count()),
            output_word_label: format!("Words: {}", self.output_words),
            counter_tone,
            submit_enabled: self.can_submit(),
            submit_title,
            busy: self.is_submitting(),
        }
    }

    fn reconcile(&mut self) {
        if self.is_submitting() {
            return;
        }
        if self.state == ControllerState::Idle && self.draft.is_empty() {
            return;
        }

        let words = self.word_count();
        self.state = if words == 0 {
            ControllerState::Invalid
        } else if words > self.tier().word_limit() {
            ControllerState::OverQuota
        } else {
            ControllerState::Ready
        };
    }
}
