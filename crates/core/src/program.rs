//! Program linking and the compile-and-link composite.

use crate::api::GlApi;
use crate::error::ShaderError;
use crate::object::{LinkedProgram, ShaderObject};
use crate::pipeline::ShaderPipeline;
use crate::stage::ShaderStage;

/// Log returned when linking fails and the driver gave no info log.
pub const EMPTY_LINK_LOG: &str = "program link failed";

impl<'a, G: GlApi + ?Sized> ShaderPipeline<'a, G> {
    /// Links a vertex and a fragment shader into a program.
    ///
    /// Attaches both shaders (checking the GL error queue after each),
    /// links, detaches them again and queries link status. The shader
    /// objects are consumed and deleted whatever the outcome; a linked
    /// program keeps what it needs.
    ///
    /// # Errors
    ///
    /// - `ShaderError::ProgramCreationError` if no program object could be
    ///   created.
    /// - `ShaderError::GlError` if attaching either shader raised a GL
    ///   error, e.g. because a name is invalid.
    /// - `ShaderError::LinkError` with a non-empty log if linking failed.
    pub fn link(
        &self,
        vertex: ShaderObject<'a, G>,
        fragment: ShaderObject<'a, G>,
    ) -> Result<LinkedProgram<'a, G>, ShaderError> {
        for (slot, shader) in [(ShaderStage::Vertex, &vertex), (ShaderStage::Fragment, &fragment)] {
            if shader.stage() != slot {
                self.reporter.warn(&format!(
                    "linking a {} shader in the {slot} slot",
                    shader.stage()
                ));
            }
        }

        let raw = self.gl.create_program().map_err(|reason| {
            let err = ShaderError::ProgramCreationError(reason);
            self.reporter.report(&err);
            err
        })?;
        let program = LinkedProgram::adopt(self.gl, raw);

        self.gl.attach_shader(raw, vertex.raw());
        self.reporter
            .check_error_queue(self.gl, "glAttachShader(vertex)")?;
        self.gl.attach_shader(raw, fragment.raw());
        self.reporter
            .check_error_queue(self.gl, "glAttachShader(fragment)")?;

        self.gl.link_program(raw);
        self.gl.detach_shader(raw, vertex.raw());
        self.gl.detach_shader(raw, fragment.raw());
        drop(vertex);
        drop(fragment);

        if !self.gl.program_link_status(raw) {
            let mut log = self.gl.program_info_log(raw);
            if log.trim().is_empty() {
                log = EMPTY_LINK_LOG.to_owned();
            }
            self.reporter.report_log("could not link program", &log);
            return Err(ShaderError::LinkError(log));
        }

        self.reporter.info(&format!("linked program {raw:?}"));
        Ok(program)
    }

    /// Compiles both stages and links them.
    ///
    /// Stops at the first failure. Anything already compiled is released,
    /// and a compile failure never reaches the link step.
    ///
    /// # Errors
    ///
    /// Any error from [`ShaderPipeline::compile`] or [`ShaderPipeline::link`].
    pub fn load_program(
        &self,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<LinkedProgram<'a, G>, ShaderError> {
        let vertex = self.compile(ShaderStage::Vertex, vertex_source)?;
        let fragment = self.compile(ShaderStage::Fragment, fragment_source)?;
        self.link(vertex, fragment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{INVALID_VALUE, NO_ERROR};
    use crate::diagnostics::{RecordingSink, Severity};
    use crate::fake::FakeGl;
    use crate::passthrough::{PASSTHROUGH_FRAGMENT_SHADER, PASSTHROUGH_VERTEX_SHADER};

    #[test]
    fn passthrough_pair_loads_into_a_program() {
        let gl = FakeGl::new();
        let sink = RecordingSink::new();
        let pipeline = ShaderPipeline::new(&gl, &sink);

        let program = pipeline
            .load_program(PASSTHROUGH_VERTEX_SHADER, PASSTHROUGH_FRAGMENT_SHADER)
            .unwrap();

        assert!(gl.is_program(program.raw()));
        assert_ne!(program.raw(), 0);
        assert_eq!(sink.error_count(), 0);
        assert_eq!(gl.get_error(), NO_ERROR);
    }

    #[test]
    fn successful_link_detaches_and_deletes_shaders() {
        let gl = FakeGl::new();
        let sink = RecordingSink::new();
        let pipeline = ShaderPipeline::new(&gl, &sink);

        let program = pipeline
            .load_program(PASSTHROUGH_VERTEX_SHADER, PASSTHROUGH_FRAGMENT_SHADER)
            .unwrap();

        assert!(gl.attached_shaders(program.raw()).is_empty());
        assert_eq!(gl.live_shaders(), 0);
        assert_eq!(gl.live_programs(), 1);
    }

    #[test]
    fn successful_link_is_recorded_as_info() {
        let gl = FakeGl::new();
        let sink = RecordingSink::new();
        let pipeline = ShaderPipeline::new(&gl, &sink);

        let program = pipeline
            .load_program(PASSTHROUGH_VERTEX_SHADER, PASSTHROUGH_FRAGMENT_SHADER)
            .unwrap();

        let info = sink.with_severity(Severity::Info);
        assert_eq!(info.len(), 1);
        assert_eq!(info[0].message, format!("linked program {:?}", program.raw()));
        assert_eq!(info[0].tag, "shaderlink");
    }

    #[test]
    fn dropping_program_releases_everything() {
        let gl = FakeGl::new();
        let sink = RecordingSink::new();
        let pipeline = ShaderPipeline::new(&gl, &sink);

        drop(
            pipeline
                .load_program(PASSTHROUGH_VERTEX_SHADER, PASSTHROUGH_FRAGMENT_SHADER)
                .unwrap(),
        );
        assert_eq!(gl.live_programs(), 0);
        assert_eq!(gl.live_shaders(), 0);
    }

    #[test]
    fn into_raw_hands_program_to_caller() {
        let gl = FakeGl::new();
        let sink = RecordingSink::new();
        let pipeline = ShaderPipeline::new(&gl, &sink);

        let raw = pipeline
            .load_program(PASSTHROUGH_VERTEX_SHADER, PASSTHROUGH_FRAGMENT_SHADER)
            .unwrap()
            .into_raw();
        assert!(gl.is_program(raw));
    }

    #[test]
    fn stage_mismatch_fails_with_non_empty_log() {
        let gl = FakeGl::new();
        let sink = RecordingSink::new();
        let pipeline = ShaderPipeline::new(&gl, &sink);

        let vertex = pipeline
            .compile(ShaderStage::Vertex, PASSTHROUGH_VERTEX_SHADER)
            .unwrap();
        let second_vertex = pipeline
            .compile(ShaderStage::Vertex, PASSTHROUGH_VERTEX_SHADER)
            .unwrap();

        let err = pipeline.link(vertex, second_vertex).unwrap_err();

        match &err {
            ShaderError::LinkError(log) => assert!(!log.is_empty()),
            other => panic!("expected LinkError, got {other:?}"),
        }
        assert_eq!(gl.live_programs(), 0, "failed program must be deleted");
        assert_eq!(gl.live_shaders(), 0, "shaders must not leak on link failure");
        assert_eq!(sink.with_severity(Severity::Warn).len(), 1);
        assert!(sink.contains("could not link program"));
    }

    #[test]
    fn unmatched_varying_fails_to_link() {
        let gl = FakeGl::new();
        let sink = RecordingSink::new();
        let pipeline = ShaderPipeline::new(&gl, &sink);

        let err = pipeline
            .load_program("void main() {}\n", PASSTHROUGH_FRAGMENT_SHADER)
            .unwrap_err();

        assert!(matches!(err, ShaderError::LinkError(ref log) if log.contains("v_uv")));
        assert_eq!(gl.live_shaders(), 0);
        assert_eq!(gl.live_programs(), 0);
    }

    #[test]
    fn invalid_shader_name_is_caught_by_queue_check_after_attach() {
        let gl = FakeGl::new();
        let sink = RecordingSink::new();
        let pipeline = ShaderPipeline::new(&gl, &sink);

        let vertex = ShaderObject::adopt(&gl, ShaderStage::Vertex, 0);
        let fragment = pipeline
            .compile(ShaderStage::Fragment, PASSTHROUGH_FRAGMENT_SHADER)
            .unwrap();

        let err = pipeline.link(vertex, fragment).unwrap_err();

        match &err {
            ShaderError::GlError { operation, codes } => {
                assert_eq!(operation, "glAttachShader(vertex)");
                assert_eq!(codes, &vec![INVALID_VALUE]);
            }
            other => panic!("expected GlError, got {other:?}"),
        }
        assert!(err.is_api_fault());
        assert_eq!(gl.programs_created(), 1, "creation is still attempted");
        assert_eq!(gl.live_programs(), 0);
        assert_eq!(gl.live_shaders(), 0);
    }

    #[test]
    fn invalid_fragment_name_is_caught_after_second_attach() {
        let gl = FakeGl::new();
        let sink = RecordingSink::new();
        let pipeline = ShaderPipeline::new(&gl, &sink);

        let vertex = pipeline
            .compile(ShaderStage::Vertex, PASSTHROUGH_VERTEX_SHADER)
            .unwrap();
        let fragment = ShaderObject::adopt(&gl, ShaderStage::Fragment, 0);

        let err = pipeline.link(vertex, fragment).unwrap_err();

        match &err {
            ShaderError::GlError { operation, codes } => {
                assert_eq!(operation, "glAttachShader(fragment)");
                assert_eq!(codes, &vec![INVALID_VALUE]);
            }
            other => panic!("expected GlError, got {other:?}"),
        }
        assert_eq!(gl.live_shaders(), 0, "attached vertex shader must be released");
        assert_eq!(gl.live_programs(), 0);
        assert_eq!(gl.pending_errors(), 0);
    }

    #[test]
    fn empty_driver_link_log_is_replaced() {
        let gl = FakeGl::new();
        gl.blank_link_logs(true);
        let sink = RecordingSink::new();
        let pipeline = ShaderPipeline::new(&gl, &sink);

        let err = pipeline
            .load_program("void main() {}\n", PASSTHROUGH_FRAGMENT_SHADER)
            .unwrap_err();

        match &err {
            ShaderError::LinkError(log) => assert_eq!(log, EMPTY_LINK_LOG),
            other => panic!("expected LinkError, got {other:?}"),
        }
        assert_eq!(err.log(), Some(EMPTY_LINK_LOG));
        assert!(sink.contains(EMPTY_LINK_LOG));
        assert_eq!(gl.live_programs(), 0);
        assert_eq!(gl.live_shaders(), 0);
    }

    #[test]
    fn program_creation_failure_releases_shaders() {
        let gl = FakeGl::new();
        gl.refuse_program_creation(true);
        let sink = RecordingSink::new();
        let pipeline = ShaderPipeline::new(&gl, &sink);

        let err = pipeline
            .load_program(PASSTHROUGH_VERTEX_SHADER, PASSTHROUGH_FRAGMENT_SHADER)
            .unwrap_err();

        assert!(matches!(err, ShaderError::ProgramCreationError(_)));
        assert!(sink.contains(
            "could not create program object (glCreateProgram returned 0): \
             Unable to create Program object"
        ));
        assert_eq!(gl.live_shaders(), 0);
    }

    #[test]
    fn vertex_failure_short_circuits_before_fragment_and_link() {
        let gl = FakeGl::new();
        let sink = RecordingSink::new();
        let pipeline = ShaderPipeline::new(&gl, &sink);

        let err = pipeline
            .load_program("void nope() {}", PASSTHROUGH_FRAGMENT_SHADER)
            .unwrap_err();

        assert!(matches!(
            err,
            ShaderError::CompileError {
                stage: ShaderStage::Vertex,
                ..
            }
        ));
        assert_eq!(gl.shaders_created(), 1);
        assert_eq!(gl.programs_created(), 0);
    }

    #[test]
    fn fragment_failure_releases_compiled_vertex_shader() {
        let gl = FakeGl::new();
        let sink = RecordingSink::new();
        let pipeline = ShaderPipeline::new(&gl, &sink);

        let err = pipeline
            .load_program(PASSTHROUGH_VERTEX_SHADER, "")
            .unwrap_err();

        assert!(matches!(
            err,
            ShaderError::CompileError {
                stage: ShaderStage::Fragment,
                ..
            }
        ));
        assert_eq!(gl.programs_created(), 0);
        assert_eq!(gl.live_shaders(), 0, "vertex shader must not be orphaned");
    }

    #[test]
    #[ignore = "requires GL context"]
    fn linked_program_draws_on_a_real_driver() {
        // Would test: use_program + draw_arrays with the passthrough program
        // leaves the GL error queue empty.
    }
}
