//! Identity provider integration
//!
//! The hosting environment publishes provider callbacks (init, login, logout,
//! error) as [`IdentityEvent`]s on an [`IdentityHub`]. Controllers subscribe
//! instead of registering callbacks, and [`IdentityHub::ready`] replaces
//! polling for the provider to appear.

use crate::client::session::Session;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tracing::{debug, warn};

const EVENT_CAPACITY: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityEvent {
    /// Provider finished initializing, with the restored session if any
    Init(Option<Session>),
    Login(Session),
    Logout,
    /// Provider-side failure; the session is left as it was
    Error(String),
}

impl IdentityEvent {
    /// The session this event moves to, `None` when it leaves the session alone
    pub fn session_change(&self) -> Option<Option<&Session>> {
        match self {
            IdentityEvent::Init(session) => Some(session.as_ref()),
            IdentityEvent::Login(session) => Some(Some(session)),
            IdentityEvent::Logout => Some(None),
            IdentityEvent::Error(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct IdentityHub {
    events: broadcast::Sender<IdentityEvent>,
    ready: Arc<watch::Sender<bool>>,
}

impl Default for IdentityHub {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityHub {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let (ready, _) = watch::channel(false);
        Self {
            events,
            ready: Arc::new(ready),
        }
    }

    pub fn subscribe(&self) -> IdentitySubscription {
        IdentitySubscription {
            rx: self.events.subscribe(),
        }
    }

    /// Publish an event; returns how many subscribers received it.
    /// An `Init` event also resolves readiness.
    pub fn publish(&self, event: IdentityEvent) -> usize {
        if matches!(event, IdentityEvent::Init(_)) {
            self.mark_ready();
        }
        debug!("Identity event: {:?}", event);
        self.events.send(event).unwrap_or(0)
    }

    /// Resolve readiness without an `Init` event
    pub fn mark_ready(&self) {
        self.ready.send_replace(true);
    }

    pub fn is_ready(&self) -> bool {
        *self.ready.borrow()
    }

    /// Resolves once the provider has signalled readiness
    pub async fn ready(&self) {
        let mut rx = self.ready.subscribe();
        // The sender is owned by `self`, so the channel cannot close while we wait
        let _ = rx.wait_for(|ready| *ready).await;
    }
}

/// Receiving side of an [`IdentityHub`]
#[derive(Debug)]
pub struct IdentitySubscription {
    rx: broadcast::Receiver<IdentityEvent>,
}

impl IdentitySubscription {
    /// Wait for the next event; `None` once every hub handle is dropped
    pub async fn next(&mut self) -> Option<IdentityEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("Identity subscriber lagged, {} events skipped", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Next already-published event, without waiting
    pub fn try_next(&mut self) -> Option<IdentityEvent> {
        loop {
            match self.rx.try_recv() {
                Ok(event) => return Some(event),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    warn!("Identity subscriber lagged, {} events skipped", skipped);
                }
                Err(_) => return None,
            }
        }
    }
}
