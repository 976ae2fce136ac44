//! Shader stage compilation and compile-log formatting.
//!
//! [`ShaderPipeline::compile`] turns one stage's source text into an owned
//! [`ShaderObject`]. On any failure the object is released before
//! returning, and a diagnostic with the driver's info log has been emitted.

use crate::api::GlApi;
use crate::error::ShaderError;
use crate::object::ShaderObject;
use crate::pipeline::ShaderPipeline;
use crate::stage::ShaderStage;

/// Log returned when a stage is compiled from blank source.
pub const EMPTY_SOURCE_LOG: &str = "shader source is empty";

/// Formats a shader compilation error for human-readable debugging.
///
/// Prepends right-aligned line numbers to each line of `source`, then
/// appends the driver's error `log`. This makes it easy to correlate
/// error messages (which reference line numbers) with the actual GLSL.
///
/// Both `source` and `log` may be empty; the function handles all
/// combinations gracefully.
pub fn format_shader_error(source: &str, log: &str) -> String {
    let source_lines: Vec<&str> = source.lines().collect();
    let width = source_lines.len().max(1).to_string().len();

    let numbered: String = source_lines
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{:>width$}: {line}", i + 1, width = width))
        .collect::<Vec<_>>()
        .join("\n");

    match (numbered.is_empty(), log.is_empty()) {
        (true, true) => String::new(),
        (true, false) => log.to_string(),
        (false, true) => numbered,
        (false, false) => format!("{numbered}\n\n{log}"),
    }
}

impl<'a, G: GlApi + ?Sized> ShaderPipeline<'a, G> {
    /// Compiles `source` as a `stage` shader.
    ///
    /// Blank source fails before any GL object is created. Otherwise a new
    /// shader object is created, given the source and compiled; the compile
    /// status is polled and then the GL error queue is drained.
    ///
    /// # Errors
    ///
    /// - `ShaderError::CompileError` if the source is blank or the driver
    ///   rejects it. The log is annotated with numbered source when
    ///   `annotate_compile_errors` is set.
    /// - `ShaderError::ShaderCreationError` if no shader object could be
    ///   created.
    /// - `ShaderError::GlError` if the context reported an error during
    ///   compilation.
    pub fn compile(
        &self,
        stage: ShaderStage,
        source: &str,
    ) -> Result<ShaderObject<'a, G>, ShaderError> {
        if source.trim().is_empty() {
            self.reporter
                .report_log(&format!("could not compile {stage} shader"), EMPTY_SOURCE_LOG);
            return Err(ShaderError::CompileError {
                stage,
                log: EMPTY_SOURCE_LOG.to_owned(),
            });
        }

        let raw = self.gl.create_shader(stage).map_err(|reason| {
            let err = ShaderError::ShaderCreationError { stage, reason };
            self.reporter.report(&err);
            err
        })?;
        let shader = ShaderObject::adopt(self.gl, stage, raw);

        self.gl.shader_source(shader.raw(), source);
        self.gl.compile_shader(shader.raw());
        let compiled = self.gl.shader_compile_status(shader.raw());
        self.reporter.check_error_queue(self.gl, "glCompileShader")?;

        if !compiled {
            let info_log = self.gl.shader_info_log(shader.raw());
            self.reporter
                .report_log(&format!("could not compile {stage} shader"), &info_log);
            let log = if self.config.annotate_compile_errors {
                format_shader_error(source, &info_log)
            } else {
                info_log
            };
            return Err(ShaderError::CompileError { stage, log });
        }

        self.reporter
            .debug(&format!("compiled {stage} shader {:?}", shader.raw()));
        Ok(shader)
    }
}
