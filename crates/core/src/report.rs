//! Uniform diagnostic surfacing for compile, link and GL error-queue failures.

use crate::api::{error_name, GlApi, NO_ERROR};
use crate::diagnostics::{DiagnosticSink, Severity};
use crate::error::ShaderError;

/// Writes pipeline diagnostics to an explicit sink under a fixed tag.
pub struct Reporter<'a> {
    sink: &'a dyn DiagnosticSink,
    tag: String,
    max_drained_errors: usize,
}

impl<'a> Reporter<'a> {
    /// Creates a reporter; a drain cap of zero is raised to one.
    pub fn new(sink: &'a dyn DiagnosticSink, tag: impl Into<String>, max_drained_errors: usize) -> Self {
        Self {
            sink,
            tag: tag.into(),
            max_drained_errors: max_drained_errors.max(1),
        }
    }

    /// The tag every record is emitted under.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Drains the context's pending errors after `operation`.
    ///
    /// Every drained code is emitted as its own error record. At most
    /// `max_drained_errors` codes are taken per call.
    ///
    /// # Errors
    ///
    /// Returns `ShaderError::GlError` carrying the drained codes if the
    /// queue was not empty.
    pub fn check_error_queue<G: GlApi + ?Sized>(
        &self,
        gl: &G,
        operation: &str,
    ) -> Result<(), ShaderError> {
        let mut codes = Vec::new();
        while codes.len() < self.max_drained_errors {
            let code = gl.get_error();
            if code == NO_ERROR {
                break;
            }
            self.emit(
                Severity::Error,
                &format!("{operation}: glError {} (0x{code:X})", error_name(code)),
            );
            codes.push(code);
        }

        if codes.is_empty() {
            Ok(())
        } else {
            Err(ShaderError::GlError {
                operation: operation.to_owned(),
                codes,
            })
        }
    }

    /// Emits a compiler/linker log under `context`. Never fails.
    pub fn report_log(&self, context: &str, log: &str) {
        let log = log.trim_end();
        if log.is_empty() {
            self.emit(Severity::Error, context);
        } else {
            self.emit(Severity::Error, &format!("{context}:\n{log}"));
        }
    }

    /// Emits the display form of `err`.
    pub fn report(&self, err: &ShaderError) {
        self.emit(Severity::Error, &err.to_string());
    }

    /// Emits a warning record.
    pub fn warn(&self, message: &str) {
        self.emit(Severity::Warn, message);
    }

    /// Emits an informational record.
    pub fn info(&self, message: &str) {
        self.emit(Severity::Info, message);
    }

    /// Emits a debug record.
    pub fn debug(&self, message: &str) {
        self.emit(Severity::Debug, message);
    }

    fn emit(&self, severity: Severity, message: &str) {
        self.sink.emit(severity, &self.tag, message);
    }
}
