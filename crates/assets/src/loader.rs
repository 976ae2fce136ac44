//! Compiling and linking shaders named by asset.
//!
//! Read failures never surface as I/O errors here: they are reported and
//! the source is treated as absent, which the compiler rejects as blank.

use crate::source::{normalize_line_endings, AssetSource};
use shaderlink_core::{GlApi, LinkedProgram, ShaderError, ShaderObject, ShaderPipeline, ShaderStage};

/// Reads `name` for use as shader source.
///
/// Returns `None` after reporting the failure if the asset cannot be read.
/// CRLF line endings are normalized when the pipeline is configured to.
pub fn load_source<G: GlApi + ?Sized>(
    pipeline: &ShaderPipeline<'_, G>,
    assets: &dyn AssetSource,
    name: &str,
) -> Option<String> {
    match assets.read_text(name) {
        Ok(text) if pipeline.config().normalize_line_endings => Some(normalize_line_endings(&text)),
        Ok(text) => Some(text),
        Err(e) => {
            pipeline
                .reporter()
                .report_log(&format!("could not load shader asset '{name}'"), &e.to_string());
            None
        }
    }
}

/// Compiles the asset `name` as a `stage` shader.
///
/// # Errors
///
/// `ShaderError::CompileError` if the asset is missing or unreadable, or
/// any error from [`ShaderPipeline::compile`].
pub fn compile_asset<'a, G: GlApi + ?Sized>(
    pipeline: &ShaderPipeline<'a, G>,
    assets: &dyn AssetSource,
    stage: ShaderStage,
    name: &str,
) -> Result<ShaderObject<'a, G>, ShaderError> {
    let source = load_source(pipeline, assets, name).unwrap_or_default();
    pipeline.compile(stage, &source)
}

/// Reads both assets, then compiles and links them.
///
/// A missing asset fails its stage's compile, so link is never reached.
///
/// # Errors
///
/// Any error from [`ShaderPipeline::load_program`].
pub fn load_program_from_assets<'a, G: GlApi + ?Sized>(
    pipeline: &ShaderPipeline<'a, G>,
    assets: &dyn AssetSource,
    vertex_name: &str,
    fragment_name: &str,
) -> Result<LinkedProgram<'a, G>, ShaderError> {
    let vertex_source = load_source(pipeline, assets, vertex_name).unwrap_or_default();
    let fragment_source = load_source(pipeline, assets, fragment_name).unwrap_or_default();
    pipeline.load_program(&vertex_source, &fragment_source)
}
