use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use crate::session::SessionId;

/// Category a flash message is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    ErrorMsg,
    Error,
}

impl FlashKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Success => "success_msg",
            Self::ErrorMsg => "error_msg",
            Self::Error => "error",
        }
    }
}

/// Messages pending for one session, grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlashMessages {
    pub success_msg: Vec<String>,
    pub error_msg: Vec<String>,
    pub error: Vec<String>,
}

impl FlashMessages {
    fn push(&mut self, kind: FlashKind, message: String) {
        match kind {
            FlashKind::Success => self.success_msg.push(message),
            FlashKind::ErrorMsg => self.error_msg.push(message),
            FlashKind::Error => self.error.push(message),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.success_msg.is_empty() && self.error_msg.is_empty() && self.error.is_empty()
    }
}

/// One-shot messages handed from a write request to the next render in the
/// same session.
///
/// Draining removes the session's entry, so only sessions with undelivered
/// messages occupy the map.
#[derive(Clone, Default)]
pub struct FlashStore {
    state: Arc<Mutex<HashMap<SessionId, FlashMessages>>>,
}

impl FlashStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set(&self, session: SessionId, kind: FlashKind, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(
            session = %session,
            kind = kind.label(),
            message = %message,
            "Queued flash message"
        );
        let mut guard = self.state.lock().await;
        guard.entry(session).or_default().push(kind, message);
    }

    /// Take every pending message for `session`, leaving none behind.
    pub async fn consume_all(&self, session: SessionId) -> FlashMessages {
        let mut guard = self.state.lock().await;
        guard.remove(&session).unwrap_or_default()
    }

    /// Number of sessions holding undelivered messages.
    pub async fn pending_sessions(&self) -> usize {
        self.state.lock().await.len()
    }
}
