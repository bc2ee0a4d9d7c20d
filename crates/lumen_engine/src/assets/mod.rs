//! Asset loading
//!
//! Narrow loaders for the three kinds of files the renderer consumes at
//! construction time: face-indexed OBJ geometry, RGBA images and GLSL
//! sources. Every failure here is fatal to pipeline construction.

pub mod obj_loader;
pub mod image_loader;
pub mod shader_source;

pub use obj_loader::ObjLoader;
pub use image_loader::ImageData;
pub use shader_source::ShaderSource;

use std::path::PathBuf;
use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// File could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Offending file
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// A record in a text asset could not be parsed
    #[error("Parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// What was wrong with the record
        message: String,
    },

    /// The file parsed but its content is unusable
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// A decoder rejected the file
    #[error("Asset loading failed: {0}")]
    LoadFailed(String),
}

impl AssetError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
