//! Transient user notifications
//!
//! Cart and checkout operations publish short messages (toasts) here. The
//! receiving side is whatever presents them; a closed or absent receiver
//! drops messages silently.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

/// Sending half of the notification channel
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    tx: Option<mpsc::UnboundedSender<Notification>>,
}

impl Notifier {
    /// Create a notifier and the receiver its messages arrive on
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }

    /// Notifier that discards everything
    pub fn noop() -> Self {
        Self { tx: None }
    }

    pub fn send(&self, level: NotificationLevel, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(?level, %message, "Notification");
        if let Some(tx) = &self.tx {
            let _ = tx.send(Notification { level, message });
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.send(NotificationLevel::Success, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.send(NotificationLevel::Info, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.send(NotificationLevel::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.send(NotificationLevel::Error, message);
    }
}
