//! # Lumen Engine
//!
//! A small real-time 3D scene renderer built on OpenGL 3.3 core.
//!
//! ## Features
//!
//! - **Scene**: spinning and camera-facing entities, point lights and a
//!   first-person camera riding a fixed altitude
//! - **Two-pass rendering**: lit textured geometry, then flat-tinted light
//!   markers, over a swappable [`render::GraphicsDevice`] backend
//! - **Assets**: face-indexed OBJ meshes, PNG/JPEG textures and GLSL sources
//! - **Configuration**: TOML or RON files with sensible defaults
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lumen_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApplicationConfig::load_or_default("lumen.toml")?;
//!     let mut window = GlfwWindow::new(&config.window)?;
//!     let device = window.create_device();
//!     let mut pipeline = RenderPipeline::new(device, &config.renderer, &config.assets)?;
//!     let scene = Scene::new(&config.scene);
//!
//!     while !window.should_close() {
//!         window.poll_events();
//!         pipeline.render(&scene)?;
//!         window.present();
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod config;
pub mod core;
pub mod foundation;
pub mod input;
pub mod render;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        core::config::{ApplicationConfig, AssetConfig, Config, RenderConfig, SceneConfig, WindowConfig},
        foundation::{
            math::{Mat4, Vec3},
            time::FrameTimer,
        },
        input::{InputAction, InputSource, PlayerController},
        render::{
            opengl::GlDevice,
            window::GlfwWindow,
            GraphicsDevice, RenderError, RenderPipeline,
        },
        scene::{Entity, EntityKind, Orientation, PointLight, Scene},
    };
}
