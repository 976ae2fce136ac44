//! The compile-link pipeline bound to one GL context.

use crate::api::GlApi;
use crate::config::PipelineConfig;
use crate::diagnostics::DiagnosticSink;
use crate::report::Reporter;

/// Compiles shaders and links programs against a borrowed GL context.
///
/// Holds no GL objects of its own; everything it creates is returned to
/// the caller wrapped in an owning [`crate::ShaderObject`] or
/// [`crate::LinkedProgram`], or released before the call returns.
///
/// Stage compilation lives in [`crate::shader`], program linking in
/// [`crate::program`].
pub struct ShaderPipeline<'a, G: GlApi + ?Sized> {
    pub(crate) gl: &'a G,
    pub(crate) reporter: Reporter<'a>,
    pub(crate) config: PipelineConfig,
}

impl<'a, G: GlApi + ?Sized> ShaderPipeline<'a, G> {
    /// Creates a pipeline with the default configuration.
    pub fn new(gl: &'a G, sink: &'a dyn DiagnosticSink) -> Self {
        Self::with_config(gl, sink, PipelineConfig::default())
    }

    /// Creates a pipeline whose reporter uses `config`'s tag and drain cap.
    pub fn with_config(gl: &'a G, sink: &'a dyn DiagnosticSink, config: PipelineConfig) -> Self {
        let reporter = Reporter::new(sink, config.tag.clone(), config.max_drained_errors);
        Self {
            gl,
            reporter,
            config,
        }
    }

    /// The context every call goes to.
    pub fn gl(&self) -> &'a G {
        self.gl
    }

    /// The configuration this pipeline was built with.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The reporter shared by compile and link.
    pub fn reporter(&self) -> &Reporter<'a> {
        &self.reporter
    }
}
