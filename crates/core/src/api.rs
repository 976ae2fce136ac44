//! The slice of the OpenGL API the pipeline drives.
//!
//! `GlApi` covers exactly the calls needed to compile shaders and link
//! programs: object creation, source upload, compile/link, status and
//! info-log queries, deletion, and the pending-error queue. A live
//! `glow::Context` implements it behind the `glow` feature; tests use
//! [`crate::fake::FakeGl`].

use crate::stage::ShaderStage;
use std::fmt;

/// `GL_NO_ERROR`: the queue is empty.
pub const NO_ERROR: u32 = 0;
/// `GL_INVALID_ENUM`: an enum argument is out of range.
pub const INVALID_ENUM: u32 = 0x0500;
/// `GL_INVALID_VALUE`: a numeric argument or object name is invalid.
pub const INVALID_VALUE: u32 = 0x0501;
/// `GL_INVALID_OPERATION`: the call is not allowed in the current state.
pub const INVALID_OPERATION: u32 = 0x0502;
/// `GL_STACK_OVERFLOW`.
pub const STACK_OVERFLOW: u32 = 0x0503;
/// `GL_STACK_UNDERFLOW`.
pub const STACK_UNDERFLOW: u32 = 0x0504;
/// `GL_OUT_OF_MEMORY`: the driver could not allocate.
pub const OUT_OF_MEMORY: u32 = 0x0505;
/// `GL_INVALID_FRAMEBUFFER_OPERATION`.
pub const INVALID_FRAMEBUFFER_OPERATION: u32 = 0x0506;
/// `GL_CONTEXT_LOST`: the context was reset.
pub const CONTEXT_LOST: u32 = 0x0507;

/// Shader and program object operations of a single GL context.
///
/// All calls are synchronous and must happen on the thread that owns the
/// context. Object creation reports failure as `Err` with whatever reason
/// the backend can give; every other call reports failure only through
/// [`GlApi::get_error`].
pub trait GlApi {
    /// Shader object name.
    type Shader: Copy + fmt::Debug;
    /// Program object name.
    type Program: Copy + fmt::Debug;

    /// Allocates a shader object for `stage` (`glCreateShader`).
    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;
    /// Replaces the shader's source (`glShaderSource`).
    fn shader_source(&self, shader: Self::Shader, source: &str);
    /// Compiles the current source (`glCompileShader`).
    fn compile_shader(&self, shader: Self::Shader);
    /// `GL_COMPILE_STATUS` of the last compile.
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    /// The shader's info log, empty if there is none.
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    /// Deletes or flags the shader for deletion (`glDeleteShader`).
    fn delete_shader(&self, shader: Self::Shader);

    /// Allocates a program object (`glCreateProgram`).
    fn create_program(&self) -> Result<Self::Program, String>;
    /// Attaches `shader` to `program` (`glAttachShader`).
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    /// Detaches `shader` from `program` (`glDetachShader`).
    fn detach_shader(&self, program: Self::Program, shader: Self::Shader);
    /// Links the attached shaders (`glLinkProgram`).
    fn link_program(&self, program: Self::Program);
    /// `GL_LINK_STATUS` of the last link.
    fn program_link_status(&self, program: Self::Program) -> bool;
    /// The program's info log, empty if there is none.
    fn program_info_log(&self, program: Self::Program) -> String;
    /// Deletes the program (`glDeleteProgram`).
    fn delete_program(&self, program: Self::Program);

    /// Pops the oldest pending error, or returns [`NO_ERROR`].
    fn get_error(&self) -> u32;
}

/// Symbolic name of a GL error code.
pub fn error_name(code: u32) -> &'static str {
    match code {
        NO_ERROR => "GL_NO_ERROR",
        INVALID_ENUM => "GL_INVALID_ENUM",
        INVALID_VALUE => "GL_INVALID_VALUE",
        INVALID_OPERATION => "GL_INVALID_OPERATION",
        STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        CONTEXT_LOST => "GL_CONTEXT_LOST",
        0x9242 => "CONTEXT_LOST_WEBGL",
        _ => "<unknown>",
    }
}

/// Formats a list of error codes as `NAME (0xCODE), ...`.
pub fn describe_error_codes(codes: &[u32]) -> String {
    codes
        .iter()
        .map(|&code| format!("{} (0x{code:X})", error_name(code)))
        .collect::<Vec<_>>()
        .join(", ")
}
