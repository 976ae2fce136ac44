//! Diagnostic sinks.
//!
//! The pipeline never logs through ambient global state: every
//! [`crate::ShaderPipeline`] is handed a `&dyn DiagnosticSink`. Production
//! code passes [`LogSink`], which forwards to the `log` facade; tests pass
//! a [`RecordingSink`] and inspect what was emitted.

use std::cell::RefCell;

/// Diagnostic severity, mirroring the `log` levels we use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warn,
    Info,
    Debug,
}

impl Severity {
    fn level(self) -> log::Level {
        match self {
            Severity::Error => log::Level::Error,
            Severity::Warn => log::Level::Warn,
            Severity::Info => log::Level::Info,
            Severity::Debug => log::Level::Debug,
        }
    }
}

/// Accepts `(severity, tag, message)` records.
pub trait DiagnosticSink {
    fn emit(&self, severity: Severity, tag: &str, message: &str);
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for &T {
    fn emit(&self, severity: Severity, tag: &str, message: &str) {
        (**self).emit(severity, tag, message);
    }
}

/// Forwards diagnostics to the `log` crate, using the tag as the log target.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&self, severity: Severity, tag: &str, message: &str) {
        log::log!(target: tag, severity.level(), "{message}");
    }
}

/// One captured diagnostic record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub tag: String,
    pub message: String,
}

/// Keeps every emitted record in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: RefCell<Vec<Diagnostic>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot of all records emitted so far.
    pub fn records(&self) -> Vec<Diagnostic> {
        self.records.borrow().clone()
    }

    /// Records at exactly `severity`.
    pub fn with_severity(&self, severity: Severity) -> Vec<Diagnostic> {
        self.records
            .borrow()
            .iter()
            .filter(|d| d.severity == severity)
            .cloned()
            .collect()
    }

    /// Number of error-level records.
    pub fn error_count(&self) -> usize {
        self.with_severity(Severity::Error).len()
    }

    /// True if any record's message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.records
            .borrow()
            .iter()
            .any(|d| d.message.contains(needle))
    }
}

impl DiagnosticSink for RecordingSink {
    fn emit(&self, severity: Severity, tag: &str, message: &str) {
        self.records.borrow_mut().push(Diagnostic {
            severity,
            tag: tag.to_owned(),
            message: message.to_owned(),
        });
    }
}
