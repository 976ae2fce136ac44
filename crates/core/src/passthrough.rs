//! A ready-made vertex/fragment pair that always compiles and links.
//!
//! The vertex stage draws a fullscreen triangle from `gl_VertexID` alone, so
//! no vertex buffer is needed:
//!
//! ```text
//! gl.draw_arrays(TRIANGLES, 0, 3)
//! ```
//!
//! with an empty VAO bound. The fragment stage writes the interpolated UV
//! as a color, which makes a linked program easy to eyeball.

/// GLSL ES 3.0 fullscreen-triangle vertex shader. Outputs `v_uv`.
pub const PASSTHROUGH_VERTEX_SHADER: &str = r#"#version 300 es
out vec2 v_uv;
void main() {
    v_uv = vec2((gl_VertexID << 1) & 2, gl_VertexID & 2);
    gl_Position = vec4(v_uv * 2.0 - 1.0, 0.0, 1.0);
}
"#;

/// GLSL ES 3.0 fragment shader. Consumes `v_uv`, writes `frag_color`.
pub const PASSTHROUGH_FRAGMENT_SHADER: &str = r#"#version 300 es
precision mediump float;
in vec2 v_uv;
out vec4 frag_color;
void main() {
    frag_color = vec4(v_uv, 0.0, 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_stages_declare_glsl_es_3() {
        for source in [PASSTHROUGH_VERTEX_SHADER, PASSTHROUGH_FRAGMENT_SHADER] {
            assert!(
                source.starts_with("#version 300 es"),
                "expected GLSL ES 3.0 version directive in:\n{source}"
            );
        }
    }

    #[test]
    fn vertex_stage_uses_gl_vertex_id() {
        assert!(PASSTHROUGH_VERTEX_SHADER.contains("gl_VertexID"));
        assert!(PASSTHROUGH_VERTEX_SHADER.contains("gl_Position"));
    }

    #[test]
    fn varying_is_declared_on_both_sides() {
        assert!(
            PASSTHROUGH_VERTEX_SHADER.contains("out vec2 v_uv;"),
            "expected 'out vec2 v_uv' in:\n{PASSTHROUGH_VERTEX_SHADER}"
        );
        assert!(
            PASSTHROUGH_FRAGMENT_SHADER.contains("in vec2 v_uv;"),
            "expected 'in vec2 v_uv' in:\n{PASSTHROUGH_FRAGMENT_SHADER}"
        );
    }

    #[test]
    fn fragment_stage_sets_precision() {
        assert!(PASSTHROUGH_FRAGMENT_SHADER.contains("precision mediump float;"));
    }
}
