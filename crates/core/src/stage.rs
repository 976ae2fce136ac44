//! Shader pipeline stages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// `GL_VERTEX_SHADER`
pub const VERTEX_SHADER: u32 = 0x8B31;
/// `GL_FRAGMENT_SHADER`
pub const FRAGMENT_SHADER: u32 = 0x8B30;

/// A programmable pipeline phase with its own compiled unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// Both stages, in link order.
    pub const ALL: [ShaderStage; 2] = [ShaderStage::Vertex, ShaderStage::Fragment];

    /// The GL enum passed to `glCreateShader` for this stage.
    pub fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => VERTEX_SHADER,
            ShaderStage::Fragment => FRAGMENT_SHADER,
        }
    }

    /// Maps a `glCreateShader` enum back to a stage, if it is one we handle.
    pub fn from_gl_enum(value: u32) -> Option<Self> {
        match value {
            VERTEX_SHADER => Some(ShaderStage::Vertex),
            FRAGMENT_SHADER => Some(ShaderStage::Fragment),
            _ => None,
        }
    }

    /// Lowercase human-readable name, used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gl_enum_round_trips_for_every_stage() {
        for stage in ShaderStage::ALL {
            assert_eq!(ShaderStage::from_gl_enum(stage.gl_enum()), Some(stage));
        }
    }

    #[test]
    fn from_gl_enum_rejects_other_shader_types() {
        // GL_COMPUTE_SHADER
        assert_eq!(ShaderStage::from_gl_enum(0x91B9), None);
        assert_eq!(ShaderStage::from_gl_enum(0), None);
    }

    #[test]
    fn display_matches_name() {
        assert_eq!(ShaderStage::Vertex.to_string(), "vertex");
        assert_eq!(ShaderStage::Fragment.to_string(), "fragment");
    }

    #[test]
    fn serializes_as_lowercase_string() {
        let json = serde_json::to_string(&ShaderStage::Fragment).unwrap();
        assert_eq!(json, "\"fragment\"");
        let stage: ShaderStage = serde_json::from_str("\"vertex\"").unwrap();
        assert_eq!(stage, ShaderStage::Vertex);
    }

    #[cfg(feature = "glow")]
    #[test]
    fn gl_enums_match_glow_constants() {
        assert_eq!(VERTEX_SHADER, glow::VERTEX_SHADER);
        assert_eq!(FRAGMENT_SHADER, glow::FRAGMENT_SHADER);
    }
}
