//! Diagnostic reporting boundary.
//!
//! Every GPU operation that can fail silently is followed by a report
//! through a [`DiagnosticSink`]. Sinks are fire-and-forget: they must not
//! block, and they must not panic, because reports are emitted from the
//! middle of the frame loop where failure is not an option.

use std::sync::{Arc, Mutex};

/// Severity of a diagnostic report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagLevel {
    /// Capability strings, resolved locations, setup progress.
    Info,
    /// Compile/link failures and per-call GPU error codes.
    Error,
}

/// Receives formatted diagnostic strings from the render host.
///
/// This trait is **object-safe**; the render context holds a
/// `Box<dyn DiagnosticSink>`. Implementations are best-effort and must
/// never block or panic.
pub trait DiagnosticSink {
    /// Forwards one diagnostic line. The `tag` identifies the operation or
    /// subsystem the message came from (e.g. "fragment", "link", "gl").
    fn report(&self, level: DiagLevel, tag: &str, message: &str);
}

/// Default sink that forwards diagnostics to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, level: DiagLevel, tag: &str, message: &str) {
        match level {
            DiagLevel::Info => log::info!(target: "shaderloop", "[{tag}] {message}"),
            DiagLevel::Error => log::error!(target: "shaderloop", "[{tag}] {message}"),
        }
    }
}

/// One captured diagnostic entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagRecord {
    /// Severity the entry was reported at.
    pub level: DiagLevel,
    /// Subsystem tag.
    pub tag: String,
    /// Formatted message text.
    pub message: String,
}

/// Sink that records diagnostics in memory.
///
/// Cloning shares the underlying buffer, so a host (or test) can keep one
/// clone and hand another to the render context, then inspect what was
/// reported.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    entries: Arc<Mutex<Vec<DiagRecord>>>,
}

impl RecordingSink {
    /// Creates an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything recorded so far, in report order.
    pub fn entries(&self) -> Vec<DiagRecord> {
        self.entries.lock().map(|g| g.clone()).unwrap_or_default()
    }

    /// Returns only the entries at the given level.
    pub fn entries_at(&self, level: DiagLevel) -> Vec<DiagRecord> {
        self.entries()
            .into_iter()
            .filter(|e| e.level == level)
            .collect()
    }

    /// Discards everything recorded so far.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.entries.lock() {
            guard.clear();
        }
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, level: DiagLevel, tag: &str, message: &str) {
        // A poisoned lock means another holder panicked; reporting is
        // best-effort, so drop the entry rather than propagate.
        if let Ok(mut guard) = self.entries.lock() {
            guard.push(DiagRecord {
                level,
                tag: tag.to_owned(),
                message: message.to_owned(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_captures_entries_in_order() {
        let sink = RecordingSink::new();
        sink.report(DiagLevel::Info, "setup", "first");
        sink.report(DiagLevel::Error, "gl", "second");

        let entries = sink.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].tag, "setup");
        assert_eq!(entries[0].message, "first");
        assert_eq!(entries[1].level, DiagLevel::Error);
        assert_eq!(entries[1].message, "second");
    }

    #[test]
    fn entries_at_filters_by_level() {
        let sink = RecordingSink::new();
        sink.report(DiagLevel::Info, "a", "one");
        sink.report(DiagLevel::Error, "b", "two");
        sink.report(DiagLevel::Error, "c", "three");

        let errors = sink.entries_at(DiagLevel::Error);
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.level == DiagLevel::Error));
    }

    #[test]
    fn clones_share_the_buffer() {
        let sink = RecordingSink::new();
        let handle = sink.clone();
        sink.report(DiagLevel::Info, "x", "seen by both");
        assert_eq!(handle.entries().len(), 1);
    }

    #[test]
    fn clear_discards_entries() {
        let sink = RecordingSink::new();
        sink.report(DiagLevel::Info, "x", "gone");
        sink.clear();
        assert!(sink.entries().is_empty());
    }

    #[test]
    fn log_sink_report_does_not_panic() {
        let sink = LogSink;
        sink.report(DiagLevel::Info, "gl", "version: 3.0");
        sink.report(DiagLevel::Error, "link", "failed");
    }

    #[test]
    fn sink_trait_is_object_safe() {
        let boxed: Box<dyn DiagnosticSink> = Box::new(RecordingSink::new());
        boxed.report(DiagLevel::Info, "t", "via trait object");
    }
}
