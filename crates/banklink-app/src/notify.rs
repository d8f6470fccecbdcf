//! Toasts and inline form errors

use std::time::Duration;

use crate::forms::FormKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A toast that disappears after `duration`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub duration: Duration,
}

impl Notification {
    pub fn success(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
            duration,
        }
    }

    pub fn error(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
            duration,
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == NotificationKind::Success
    }
}

/// Where user-facing messages go
pub trait Notifier: Send + Sync {
    fn toast(&self, notification: Notification);

    /// Error shown next to a form instead of as a toast
    fn inline_error(&self, form: FormKind, message: &str);
}

/// Writes toasts to stdout/stderr; the duration has no meaning on a terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn toast(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => println!("{}", notification.message),
            NotificationKind::Error => eprintln!("Error: {}", notification.message),
        }
    }

    fn inline_error(&self, form: FormKind, message: &str) {
        eprintln!("{} failed: {}", form, message);
    }
}
