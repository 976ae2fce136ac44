//! Pipeline configuration.
//!
//! `PipelineConfig` can be built in code or read from a JSON object. JSON
//! loading is lenient: each key is looked up with a typed helper, and a key
//! that is missing or has the wrong type keeps its default. Only malformed
//! JSON text is an error.

use serde::Serialize;
use serde_json::Value;

/// Default diagnostic tag (and `log` target).
pub const DEFAULT_TAG: &str = "shaderlink";

/// Default cap on codes drained from the GL error queue in one check.
pub const DEFAULT_MAX_DRAINED_ERRORS: usize = 16;

/// Tunables for a [`crate::ShaderPipeline`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineConfig {
    /// Tag attached to every diagnostic record.
    pub tag: String,
    /// Prefix compile logs returned in errors with line-numbered source.
    pub annotate_compile_errors: bool,
    /// Convert CRLF to LF in sources read from assets.
    pub normalize_line_endings: bool,
    /// Upper bound on error codes drained per check. A lost context can keep
    /// reporting errors, so the drain must stop somewhere. Never below 1.
    pub max_drained_errors: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tag: DEFAULT_TAG.to_owned(),
            annotate_compile_errors: true,
            normalize_line_endings: true,
            max_drained_errors: DEFAULT_MAX_DRAINED_ERRORS,
        }
    }
}

impl PipelineConfig {
    /// Reads a config from a JSON object, falling back to defaults per key.
    pub fn from_json(params: &Value) -> Self {
        let defaults = Self::default();
        Self {
            tag: param_string(params, "tag", &defaults.tag),
            annotate_compile_errors: param_bool(
                params,
                "annotate_compile_errors",
                defaults.annotate_compile_errors,
            ),
            normalize_line_endings: param_bool(
                params,
                "normalize_line_endings",
                defaults.normalize_line_endings,
            ),
            max_drained_errors: param_usize(
                params,
                "max_drained_errors",
                defaults.max_drained_errors,
            )
            .max(1),
        }
    }

    /// Parses JSON text and reads a config from it.
    ///
    /// # Errors
    ///
    /// Returns the parse error if `text` is not valid JSON.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        let params: Value = serde_json::from_str(text)?;
        Ok(Self::from_json(&params))
    }
}

/// Extracts a `usize` from `params[name]`, returning `default` if missing or wrong type.
fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

/// Extracts a `bool` from `params[name]`, returning `default` if missing or wrong type.
fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

/// Extracts a `String` from `params[name]`, returning `default` if missing or wrong type.
fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}
