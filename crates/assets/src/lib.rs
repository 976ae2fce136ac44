#![deny(unsafe_code)]
//! Asset-backed shader loading.
//!
//! This crate sits on top of `shaderlink-core`: it turns asset names into
//! shader source through an [`AssetSource`] and feeds the result to a
//! [`shaderlink_core::ShaderPipeline`]. Missing or unreadable assets are
//! reported and then fail compilation like blank source would.

pub mod loader;
pub mod source;

pub use loader::{compile_asset, load_program_from_assets, load_source};
pub use source::{normalize_line_endings, AssetError, AssetSource, DirAssets, MemoryAssets};
