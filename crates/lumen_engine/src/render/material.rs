//! Textured materials

use crate::assets::ImageData;
use crate::render::device::{GraphicsDevice, TextureHandle};
use crate::render::RenderResult;
use std::path::Path;

/// A single diffuse texture sampled through `imageTexture`
#[derive(Debug, PartialEq, Eq)]
pub struct Material {
    texture: TextureHandle,
}

impl Material {
    /// Decode an image file and upload it with mipmaps
    pub fn load<D: GraphicsDevice, P: AsRef<Path>>(device: &mut D, path: P) -> RenderResult<Self> {
        let image = ImageData::from_file(path.as_ref())?;
        log::debug!("Loaded texture {:?} ({}x{})", path.as_ref(), image.width, image.height);
        Self::from_image(device, &image)
    }

    /// Upload already decoded pixels
    pub fn from_image<D: GraphicsDevice>(device: &mut D, image: &ImageData) -> RenderResult<Self> {
        Ok(Self {
            texture: device.create_texture(image)?,
        })
    }

    /// Bind to texture unit 0
    pub fn bind<D: GraphicsDevice>(&self, device: &mut D) {
        device.bind_texture(self.texture);
    }

    /// Device handle
    pub fn texture(&self) -> TextureHandle {
        self.texture
    }

    /// Release the texture
    pub fn destroy<D: GraphicsDevice>(self, device: &mut D) {
        device.destroy_texture(self.texture);
    }
}
