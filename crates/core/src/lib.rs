#![deny(unsafe_code)]
//! Compile GLSL stages and link them into usable GL programs.
//!
//! [`ShaderPipeline`] drives a [`GlApi`] context through create, source,
//! compile, attach, link and status queries. Every GL object it acquires
//! is wrapped in an owning handle ([`ShaderObject`], [`LinkedProgram`]) so
//! failure paths release it. Failures come back as [`ShaderError`] after a
//! diagnostic has been written to the caller's [`DiagnosticSink`].
//!
//! Features:
//! - `glow`: implement [`GlApi`] for `glow::Context`.
//! - `fake`: expose [`fake::FakeGl`], an in-memory context for tests.

pub mod api;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod object;
pub mod passthrough;
pub mod pipeline;
pub mod program;
pub mod report;
pub mod shader;
pub mod stage;

#[cfg(any(test, feature = "fake"))]
pub mod fake;

#[cfg(feature = "glow")]
mod glow_backend;

pub use api::GlApi;
pub use config::PipelineConfig;
pub use diagnostics::{Diagnostic, DiagnosticSink, LogSink, RecordingSink, Severity};
pub use error::ShaderError;
pub use object::{LinkedProgram, ShaderObject};
pub use passthrough::{PASSTHROUGH_FRAGMENT_SHADER, PASSTHROUGH_VERTEX_SHADER};
pub use pipeline::ShaderPipeline;
pub use report::Reporter;
pub use shader::format_shader_error;
pub use stage::ShaderStage;
