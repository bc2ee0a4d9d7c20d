//! # Unified Configuration System
//!
//! Every constant the renderer depends on (world axes, the light slot limit,
//! the camera rail altitude, projection parameters, asset paths) lives here and
//! is passed explicitly to the scene and the render pipeline.
//!
//! ## Configuration Categories
//!
//! - **Window Config**: Size, title and presentation mode
//! - **Render Config**: Projection, clear colour, light slots, shader sources
//! - **Asset Config**: Mesh and texture paths, billboard sizes
//! - **Scene Config**: World axes and per-tick animation rates
//! - **Player Config**: Movement speed and mouse sensitivity

use serde::{Serialize, Deserialize};
use std::path::PathBuf;

pub use crate::config::{Config, ConfigError};

/// Number of `Lights[i]` entries declared by the standard fragment shader
pub const SHADER_LIGHT_SLOTS: usize = 8;

/// # Shader Configuration
///
/// Paths to the GLSL sources of one render pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShaderConfig {
    /// Path to the vertex shader source
    pub vertex_shader_path: PathBuf,
    /// Path to the fragment shader source
    pub fragment_shader_path: PathBuf,
}

impl ShaderConfig {
    /// Create a new shader configuration
    pub fn new(vertex_path: impl Into<PathBuf>, fragment_path: impl Into<PathBuf>) -> Self {
        Self {
            vertex_shader_path: vertex_path.into(),
            fragment_shader_path: fragment_path.into(),
        }
    }
}

/// # Window Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Present through a back buffer instead of flushing a single buffer
    pub double_buffered: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Lumen Viewer".to_string(),
            width: 800,
            height: 600,
            double_buffered: false,
        }
    }
}

/// # Render Configuration
///
/// Projection parameters are fixed for the lifetime of the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Vertical field of view in degrees
    pub fov_y_degrees: f32,
    /// Distance to the near clipping plane
    pub near: f32,
    /// Distance to the far clipping plane
    pub far: f32,
    /// Clear colour (RGBA)
    pub clear_color: [f32; 4],
    /// Point lights uploaded to the standard pass; extra lights are dropped
    pub max_lights: usize,
    /// Textured, lit pass
    pub standard_shader: ShaderConfig,
    /// Flat-tinted billboard pass
    pub emissive_shader: ShaderConfig,
}

impl RenderConfig {
    /// Validate projection and light parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fov_y_degrees > 0.0 && self.fov_y_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!("fov_y_degrees out of range: {}", self.fov_y_degrees)));
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return Err(ConfigError::Invalid(format!("clip planes must satisfy 0 < near < far (near {}, far {})", self.near, self.far)));
        }
        if self.max_lights > SHADER_LIGHT_SLOTS {
            return Err(ConfigError::Invalid(format!(
                "max_lights {} exceeds the {} light slots declared by the shader",
                self.max_lights, SHADER_LIGHT_SLOTS
            )));
        }
        Ok(())
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            near: 0.1,
            far: 10.0,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            max_lights: SHADER_LIGHT_SLOTS,
            standard_shader: ShaderConfig::new("resources/shaders/standard.vert", "resources/shaders/standard.frag"),
            emissive_shader: ShaderConfig::new("resources/shaders/emissive.vert", "resources/shaders/emissive.frag"),
        }
    }
}

/// # Asset Configuration
///
/// Files backing the three visual entity kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Cube geometry (face-indexed OBJ)
    pub cube_mesh: PathBuf,
    /// Cube texture
    pub cube_texture: PathBuf,
    /// Medkit billboard texture
    pub medkit_texture: PathBuf,
    /// Light marker billboard texture
    pub light_texture: PathBuf,
    /// Medkit billboard width and height
    pub medkit_size: [f32; 2],
    /// Light marker billboard width and height
    pub light_size: [f32; 2],
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            cube_mesh: PathBuf::from("resources/models/cube.obj"),
            cube_texture: PathBuf::from("resources/textures/wood.png"),
            medkit_texture: PathBuf::from("resources/textures/medkit.png"),
            light_texture: PathBuf::from("resources/textures/light.png"),
            medkit_size: [0.6, 0.5],
            light_size: [0.2, 0.1],
        }
    }
}

/// # Player Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Starting position
    pub start_position: [f32; 3],
    /// World units moved per millisecond of frame time
    pub move_speed: f32,
    /// Degrees turned per pixel of cursor offset
    pub turn_sensitivity: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start_position: [-2.0, 0.0, 3.0],
            move_speed: 0.005,
            turn_sensitivity: 0.2,
        }
    }
}

/// # Scene Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// World up axis used to derive the camera basis
    pub world_up: [f32; 3],
    /// Height the camera is pinned to after every move
    pub rail_altitude: f32,
    /// Camera pitch is clamped to `[-pitch_limit, pitch_limit]` degrees
    pub pitch_limit: f32,
    /// Cube spin in degrees per reference tick
    pub cube_degrees_per_tick: f32,
    /// Camera configuration
    pub player: PlayerConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            world_up: [0.0, 0.0, 1.0],
            rail_altitude: 3.0,
            pitch_limit: 89.0,
            cube_degrees_per_tick: 0.25,
            player: PlayerConfig::default(),
        }
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration that encompasses all engine subsystems.
/// This is the main configuration structure applications should use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Window configuration
    pub window: WindowConfig,
    /// Rendering configuration
    pub renderer: RenderConfig,
    /// Asset paths
    pub assets: AssetConfig,
    /// Scene layout and animation
    pub scene: SceneConfig,
}

impl ApplicationConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.renderer.validate()?;
        if !(self.scene.pitch_limit > 0.0 && self.scene.pitch_limit < 90.0) {
            return Err(ConfigError::Invalid(format!(
                "pitch_limit must be inside (0, 90) to keep the camera basis valid, got {}",
                self.scene.pitch_limit
            )));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid("window size must be non-zero".to_string()));
        }
        Ok(())
    }
}

impl Config for ApplicationConfig {}
