//! GLSL source loading

use crate::assets::AssetError;
use crate::core::ShaderConfig;
use std::fs;
use std::path::Path;

/// Vertex and fragment source text for one program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    /// Vertex stage source
    pub vertex: String,
    /// Fragment stage source
    pub fragment: String,
}

impl ShaderSource {
    /// Read both stages from disk
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(vertex_path: P, fragment_path: Q) -> Result<Self, AssetError> {
        Ok(Self {
            vertex: read_stage(vertex_path.as_ref())?,
            fragment: read_stage(fragment_path.as_ref())?,
        })
    }

    /// Read the stages named by a shader configuration
    pub fn from_config(config: &ShaderConfig) -> Result<Self, AssetError> {
        Self::load(&config.vertex_shader_path, &config.fragment_shader_path)
    }
}

fn read_stage(path: &Path) -> Result<String, AssetError> {
    let source = fs::read_to_string(path).map_err(|e| AssetError::io(path, e))?;
    if source.trim().is_empty() {
        return Err(AssetError::InvalidFormat(format!("Shader source is empty: {}", path.display())));
    }
    log::debug!("Read shader stage {:?} ({} bytes)", path, source.len());
    Ok(source)
}
