//! # Core Engine Module
//!
//! Shared configuration consumed by the scene, the render pipeline and the viewer.

pub mod config;

// Re-export commonly used config types
pub use config::{
    ApplicationConfig,
    AssetConfig,
    PlayerConfig,
    RenderConfig,
    SceneConfig,
    ShaderConfig,
    WindowConfig,
    Config,
    ConfigError,
    SHADER_LIGHT_SLOTS,
};
