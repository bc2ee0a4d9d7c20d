//! Image loading utilities for texture data
//!
//! Decodes PNG and JPEG files into tightly packed RGBA8 rows, top row first.

use std::path::Path;
use image;
use crate::assets::AssetError;

/// Loaded image data ready for GPU upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Raw RGBA pixel data
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageData {
    /// Load an image from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path_ref = path.as_ref();

        log::debug!("Loading image from: {:?}", path_ref);

        let bytes = std::fs::read(path_ref).map_err(|e| AssetError::io(path_ref, e))?;
        let image = Self::from_bytes(&bytes).map_err(|e| {
            AssetError::LoadFailed(format!("{}: {}", path_ref.display(), e))
        })?;

        log::info!("Loaded image {}x{} from {:?}", image.width, image.height, path_ref);
        Ok(image)
    }

    /// Load image from memory (useful for embedded resources)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| AssetError::LoadFailed(format!("Failed to decode image: {}", e)))?;

        // Convert to RGBA8 format (standard for GPU upload)
        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        Ok(Self {
            data: rgba_img.into_raw(),
            width,
            height,
        })
    }

    /// Create a solid color image (useful for testing and defaults)
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = (width * height) as usize;

        Self {
            data: color.repeat(pixel_count),
            width,
            height,
        }
    }

    /// Get the size of the image data in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}
