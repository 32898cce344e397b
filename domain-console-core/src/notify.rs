//! Operator notification sink.
//!
//! Services emit exactly one notification per user-visible operation
//! outcome. The sink is fire-and-forget: emitting never fails and never
//! blocks the emitting operation.

use std::sync::Mutex;

/// Severity of an operator-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

/// Receiver for operator-facing notifications.
///
/// Implementations must not block and must not panic; a lost notification
/// is preferable to a stalled mutation.
pub trait Notifier: Send + Sync {
    fn notify(&self, severity: Severity, message: &str);
}

/// Default sink that routes notifications to the log.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Success | Severity::Info => log::info!("{message}"),
            Severity::Error => log::warn!("{message}"),
        }
    }
}

/// Sink that records every notification in order, for tests.
#[derive(Default)]
pub struct RecordingNotifier {
    entries: Mutex<Vec<(Severity, String)>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all notifications emitted so far, oldest first.
    ///
    /// # Panics
    /// Panics if the interior mutex is poisoned.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn entries(&self) -> Vec<(Severity, String)> {
        self.entries.lock().unwrap().clone()
    }

    /// # Panics
    /// Panics if the interior mutex is poisoned.
    #[allow(clippy::unwrap_used)]
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push((severity, message.to_string()));
        }
    }
}
