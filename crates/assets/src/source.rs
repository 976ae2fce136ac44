//! Named text assets.

use std::collections::HashMap;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Errors produced while reading a shader asset.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The name is absolute or escapes the asset root.
    #[error("invalid asset name: {0}")]
    InvalidName(String),

    #[error("asset not found: {0}")]
    NotFound(String),

    #[error("could not read asset '{name}': {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("asset '{0}' is not valid UTF-8")]
    InvalidUtf8(String),
}

/// Provides UTF-8 text by name.
pub trait AssetSource {
    /// Reads the whole asset as text.
    ///
    /// # Errors
    ///
    /// Returns an `AssetError` if the asset cannot be found or read.
    fn read_text(&self, name: &str) -> Result<String, AssetError>;
}

impl<T: AssetSource + ?Sized> AssetSource for &T {
    fn read_text(&self, name: &str) -> Result<String, AssetError> {
        (**self).read_text(name)
    }
}

/// Assets stored as files under a root directory.
#[derive(Debug, Clone)]
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves `name` under the root, refusing anything that could leave it.
    fn resolve(&self, name: &str) -> Result<PathBuf, AssetError> {
        let relative = Path::new(name);
        let is_plain = !name.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !is_plain {
            return Err(AssetError::InvalidName(name.to_owned()));
        }
        Ok(self.root.join(relative))
    }
}

impl AssetSource for DirAssets {
    fn read_text(&self, name: &str) -> Result<String, AssetError> {
        let path = self.resolve(name)?;
        let bytes = std::fs::read(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => AssetError::NotFound(name.to_owned()),
            _ => AssetError::Io {
                name: name.to_owned(),
                source: e,
            },
        })?;
        String::from_utf8(bytes).map_err(|_| AssetError::InvalidUtf8(name.to_owned()))
    }
}

/// Assets held in memory, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    entries: HashMap<String, String>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an asset.
    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(name.into(), text.into());
    }

    /// Builder-style [`MemoryAssets::insert`].
    pub fn with(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(name, text);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AssetSource for MemoryAssets {
    fn read_text(&self, name: &str) -> Result<String, AssetError> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(name.to_owned()))
    }
}

/// Replaces every CRLF pair with LF.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n")
}
