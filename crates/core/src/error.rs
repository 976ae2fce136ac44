//! Error types for shader compilation and program linking.

use crate::api::describe_error_codes;
use crate::stage::ShaderStage;
use thiserror::Error;

/// Errors produced by the compile/link pipeline.
///
/// Creation, compile and link failures are ordinary outcomes a caller can
/// react to. [`ShaderError::GlError`] means the context itself reported an
/// error after a call that should have succeeded; see
/// [`ShaderError::is_api_fault`].
#[derive(Debug, Clone, Error)]
pub enum ShaderError {
    /// The context refused to allocate a shader object.
    #[error(
        "could not create {stage} shader object (glCreateShader({:#X}) returned 0): {reason}",
        .stage.gl_enum()
    )]
    ShaderCreationError { stage: ShaderStage, reason: String },

    /// The context refused to allocate a program object.
    #[error("could not create program object (glCreateProgram returned 0): {0}")]
    ProgramCreationError(String),

    /// A shader stage failed to compile.
    #[error("shader compile error ({stage}):\n{log}")]
    CompileError {
        stage: ShaderStage,
        /// The driver's info log, possibly prefixed with numbered source.
        log: String,
    },

    /// A program failed to link.
    #[error("shader link error:\n{0}")]
    LinkError(String),

    /// The GL error queue was non-empty after `operation`.
    #[error("GL error after {operation}: {}", describe_error_codes(.codes))]
    GlError { operation: String, codes: Vec<u32> },
}

impl ShaderError {
    /// True when the context reported a contract violation rather than a
    /// compile or link outcome.
    pub fn is_api_fault(&self) -> bool {
        matches!(self, ShaderError::GlError { .. })
    }

    /// The compiler or linker info log, if this error carries one.
    pub fn log(&self) -> Option<&str> {
        match self {
            ShaderError::CompileError { log, .. } | ShaderError::LinkError(log) => Some(log),
            _ => None,
        }
    }
}
