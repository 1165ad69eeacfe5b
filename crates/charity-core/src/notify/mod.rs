//! User-facing notifications (toasts).
//!
//! Services raise a `Notification` through an injected `Notifier`.
//! `TracingNotifier` logs them; `ToastQueue` buffers them for a UI to drain.

pub mod config;
pub mod messages;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

pub use config::{ToastConfig, ToastPosition};

#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    /// Display time; `None` means the configured default for the kind.
    pub duration: Option<Duration>,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            duration: None,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Warning, message)
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes each notification to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Error => error!(text = %notification.message, "toast"),
            NotificationKind::Warning => warn!(text = %notification.message, "toast"),
            NotificationKind::Success | NotificationKind::Info => {
                info!(kind = ?notification.kind, text = %notification.message, "toast")
            }
        }
    }
}

/// Toast buffer for a UI layer. Oldest toasts are dropped past `max_visible`.
#[derive(Clone)]
pub struct ToastQueue {
    config: ToastConfig,
    pending: Arc<Mutex<VecDeque<Notification>>>,
}

impl ToastQueue {
    pub fn new(config: ToastConfig) -> Self {
        Self {
            config,
            pending: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    pub fn config(&self) -> &ToastConfig {
        &self.config
    }

    /// Take every pending toast with its effective duration filled in.
    pub fn drain(&self) -> Vec<Notification> {
        let mut pending = match self.pending.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        pending
            .drain(..)
            .map(|mut n| {
                n.duration = Some(n.duration.unwrap_or_else(|| self.config.duration_for(n.kind)));
                n
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pending.lock().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(ToastConfig::default())
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, notification: Notification) {
        let mut pending = match self.pending.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        pending.push_back(notification);
        while pending.len() > self.config.max_visible.max(1) {
            pending.pop_front();
        }
    }
}
