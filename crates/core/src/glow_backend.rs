//! [`GlApi`] for a live `glow::Context`.
//!
//! Only available with the `glow` feature. Every call forwards to the
//! matching `glow::HasContext` method; the caller must have made the
//! context current on this thread.

use crate::api::GlApi;
use crate::stage::ShaderStage;
use glow::HasContext;

impl GlApi for glow::Context {
    type Shader = glow::Shader;
    type Program = glow::Program;

    #[allow(unsafe_code)]
    fn create_shader(&self, stage: ShaderStage) -> Result<glow::Shader, String> {
        // SAFETY: `stage.gl_enum()` is a valid shader type constant.
        unsafe { HasContext::create_shader(self, stage.gl_enum()) }
    }

    #[allow(unsafe_code)]
    fn shader_source(&self, shader: glow::Shader, source: &str) {
        // SAFETY: glow wraps raw GL calls as unsafe. Invalid names only raise
        // GL errors, which the pipeline checks for.
        unsafe { HasContext::shader_source(self, shader, source) }
    }

    #[allow(unsafe_code)]
    fn compile_shader(&self, shader: glow::Shader) {
        // SAFETY: as above.
        unsafe { HasContext::compile_shader(self, shader) }
    }

    #[allow(unsafe_code)]
    fn shader_compile_status(&self, shader: glow::Shader) -> bool {
        // SAFETY: as above.
        unsafe { HasContext::get_shader_compile_status(self, shader) }
    }

    #[allow(unsafe_code)]
    fn shader_info_log(&self, shader: glow::Shader) -> String {
        // SAFETY: as above.
        unsafe { HasContext::get_shader_info_log(self, shader) }
    }

    #[allow(unsafe_code)]
    fn delete_shader(&self, shader: glow::Shader) {
        // SAFETY: callers own `shader`; it is not used again after deletion.
        unsafe { HasContext::delete_shader(self, shader) }
    }

    #[allow(unsafe_code)]
    fn create_program(&self) -> Result<glow::Program, String> {
        // SAFETY: no arguments; failure is reported through the Result.
        unsafe { HasContext::create_program(self) }
    }

    #[allow(unsafe_code)]
    fn attach_shader(&self, program: glow::Program, shader: glow::Shader) {
        // SAFETY: invalid names raise GL_INVALID_VALUE, checked by the caller.
        unsafe { HasContext::attach_shader(self, program, shader) }
    }

    #[allow(unsafe_code)]
    fn detach_shader(&self, program: glow::Program, shader: glow::Shader) {
        // SAFETY: as above.
        unsafe { HasContext::detach_shader(self, program, shader) }
    }

    #[allow(unsafe_code)]
    fn link_program(&self, program: glow::Program) {
        // SAFETY: as above.
        unsafe { HasContext::link_program(self, program) }
    }

    #[allow(unsafe_code)]
    fn program_link_status(&self, program: glow::Program) -> bool {
        // SAFETY: as above.
        unsafe { HasContext::get_program_link_status(self, program) }
    }

    #[allow(unsafe_code)]
    fn program_info_log(&self, program: glow::Program) -> String {
        // SAFETY: as above.
        unsafe { HasContext::get_program_info_log(self, program) }
    }

    #[allow(unsafe_code)]
    fn delete_program(&self, program: glow::Program) {
        // SAFETY: callers own `program`; it is not used again after deletion.
        unsafe { HasContext::delete_program(self, program) }
    }

    #[allow(unsafe_code)]
    fn get_error(&self) -> u32 {
        // SAFETY: glGetError has no preconditions beyond a current context.
        unsafe { HasContext::get_error(self) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RecordingSink;
    use crate::pipeline::ShaderPipeline;

    #[test]
    fn glow_context_satisfies_pipeline_bounds() {
        // Compile-time check: a glow::Context can drive the pipeline.
        fn _assert_api(gl: &glow::Context, sink: &RecordingSink) {
            let _pipeline: ShaderPipeline<'_, glow::Context> = ShaderPipeline::new(gl, sink);
        }
    }

    #[test]
    #[ignore = "requires GL context"]
    fn passthrough_program_links_on_glow() {
        // Would test: ShaderPipeline::new(&gl, &LogSink).load_program(...)
        // returns Ok on a current glow::Context.
    }
}
