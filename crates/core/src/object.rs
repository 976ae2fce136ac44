//! Owned shader and program objects.
//!
//! Each wrapper deletes its GL object when dropped, so every early return in
//! the pipeline releases what it acquired. Call `into_raw` to hand the name
//! to code that manages its lifetime some other way.

use crate::api::GlApi;
use crate::stage::ShaderStage;
use std::fmt;
use std::mem::ManuallyDrop;

/// A compiled (or compiling) shader object, deleted on drop.
pub struct ShaderObject<'gl, G: GlApi + ?Sized> {
    gl: &'gl G,
    raw: G::Shader,
    stage: ShaderStage,
}

impl<'gl, G: GlApi + ?Sized> ShaderObject<'gl, G> {
    /// Takes ownership of an existing shader name.
    ///
    /// The name is deleted when the returned value is dropped. Nothing checks
    /// that `raw` is valid or really belongs to `stage`.
    pub fn adopt(gl: &'gl G, stage: ShaderStage, raw: G::Shader) -> Self {
        Self { gl, raw, stage }
    }

    /// The backend's shader name.
    pub fn raw(&self) -> G::Shader {
        self.raw
    }

    /// The stage this shader was created for.
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// Releases ownership without deleting the object.
    pub fn into_raw(self) -> G::Shader {
        let this = ManuallyDrop::new(self);
        this.raw
    }
}

impl<G: GlApi + ?Sized> Drop for ShaderObject<'_, G> {
    fn drop(&mut self) {
        self.gl.delete_shader(self.raw);
    }
}

impl<G: GlApi + ?Sized> fmt::Debug for ShaderObject<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderObject")
            .field("raw", &self.raw)
            .field("stage", &self.stage)
            .finish()
    }
}

/// A successfully linked program, deleted on drop.
pub struct LinkedProgram<'gl, G: GlApi + ?Sized> {
    gl: &'gl G,
    raw: G::Program,
}

impl<'gl, G: GlApi + ?Sized> LinkedProgram<'gl, G> {
    /// Takes ownership of an existing program name.
    pub fn adopt(gl: &'gl G, raw: G::Program) -> Self {
        Self { gl, raw }
    }

    /// The backend's program name.
    pub fn raw(&self) -> G::Program {
        self.raw
    }

    /// Releases ownership without deleting the program.
    pub fn into_raw(self) -> G::Program {
        let this = ManuallyDrop::new(self);
        this.raw
    }
}

impl<G: GlApi + ?Sized> Drop for LinkedProgram<'_, G> {
    fn drop(&mut self) {
        self.gl.delete_program(self.raw);
    }
}

impl<G: GlApi + ?Sized> fmt::Debug for LinkedProgram<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedProgram")
            .field("raw", &self.raw)
            .finish()
    }
}
