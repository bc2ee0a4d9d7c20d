//! # Rendering System
//!
//! Two-pass forward renderer over a [`GraphicsDevice`] backend.
//!
//! ## Architecture
//!
//! - **Pipeline**: [`RenderPipeline`] owns the programs, materials and meshes
//!   and draws a [`crate::scene::Scene`] once per frame
//! - **Device**: [`GraphicsDevice`] is the only place GPU calls happen;
//!   [`opengl::GlDevice`] implements it for OpenGL 3.3 core
//! - **Resources**: [`ShaderProgram`] with cached uniform slots, [`Material`]
//!   textures and [`Mesh`] geometry, all released through the device
//! - **Window**: [`window::GlfwWindow`] provides the GL context, key state and
//!   cursor offsets for the host loop
//!
//! ## Frame
//!
//! ```text
//! begin_frame (clear) ─▶ standard pass (lit, textured) ─▶ emissive pass (light markers) ─▶ end_frame (flush)
//! ```

pub mod device;
pub mod material;
pub mod mesh;
pub mod opengl;
pub mod pipeline;
pub mod shader;
pub mod window;

#[cfg(test)]
pub(crate) mod mock_device;

pub use device::{GraphicsDevice, MeshHandle, ProgramHandle, TextureHandle, UniformSlot};
pub use material::Material;
pub use mesh::{Mesh, MeshData, Vertex};
pub use pipeline::{RenderPipeline, RenderStats};
pub use shader::{LightSlots, ShaderProgram, UniformKind};

use crate::assets::AssetError;
use crate::foundation::transform::TransformError;
use thiserror::Error;

/// Rendering errors
///
/// Everything except `Transform` and `BackendError` can only happen while a
/// pipeline is being constructed.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A texture, mesh or shader file could not be loaded
    #[error("Pipeline construction failed: {0}")]
    Construction(#[from] AssetError),

    /// A shader stage failed to compile or the program failed to link
    #[error("Shader program failed: {0}")]
    Shader(String),

    /// The camera produced no valid view basis
    #[error("Invalid camera transform: {0}")]
    Transform(#[from] TransformError),

    /// The graphics API rejected an operation
    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;
