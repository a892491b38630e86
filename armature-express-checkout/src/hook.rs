//! Diagnostic hook
//!
//! The gateway reports what it commits and why a call failed through a
//! [`LogHook`]. Hooks are fire-and-forget: they return nothing and must not
//! panic or block on I/O the caller cares about.
//!
//! The default [`TracingLogHook`] emits `tracing` events under the
//! `armature::express_checkout` target; where they end up and how they are
//! formatted is up to the subscriber the application installs.

use std::sync::Mutex;
use tracing::{error, info};

/// Receiver for gateway diagnostics
pub trait LogHook: Send + Sync {
    /// Informational message
    fn log(&self, message: &str);

    /// Error message
    fn error_log(&self, message: &str);
}

/// Forwards diagnostics to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogHook;

impl LogHook for TracingLogHook {
    fn log(&self, message: &str) {
        info!(target: "armature::express_checkout", "{}", message);
    }

    fn error_log(&self, message: &str) {
        error!(target: "armature::express_checkout", "{}", message);
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogHook;

impl LogHook for NoopLogHook {
    fn log(&self, _message: &str) {}

    fn error_log(&self, _message: &str) {}
}

/// Which hook method received an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Recorded through `log`
    Info,
    /// Recorded through `error_log`
    Error,
}

/// Recorded diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub severity: Severity,
    /// Message as received
    pub message: String,
}

/// Keeps diagnostics in memory
#[derive(Debug, Default)]
pub struct MemoryLogHook {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLogHook {
    /// Create an empty hook
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// Messages recorded through `error_log`
    pub fn errors(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|e| e.severity == Severity::Error)
            .map(|e| e.message)
            .collect()
    }

    /// Drop everything recorded so far
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }

    fn push(&self, severity: Severity, message: &str) {
        // a poisoned lock only loses the entry
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(LogEntry {
                severity,
                message: message.to_string(),
            });
        }
    }
}

impl LogHook for MemoryLogHook {
    fn log(&self, message: &str) {
        self.push(Severity::Info, message);
    }

    fn error_log(&self, message: &str) {
        self.push(Severity::Error, message);
    }
}
