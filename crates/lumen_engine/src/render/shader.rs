//! Shader programs and their cached uniform slots

use crate::assets::ShaderSource;
use crate::render::device::{GraphicsDevice, ProgramHandle, UniformSlot};
use crate::render::RenderResult;
use std::collections::HashMap;

/// Uniforms with one location per program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniformKind {
    /// Entity model transform
    Model,
    /// Camera view transform
    View,
    /// Perspective projection
    Projection,
    /// Eye position for specular terms
    CameraPosition,
    /// Flat colour of emissive billboards
    Tint,
    /// Sampler unit of the material texture
    ImageTexture,
}

impl UniformKind {
    /// Name of the uniform in GLSL source
    pub const fn name(self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::View => "view",
            Self::Projection => "projection",
            Self::CameraPosition => "cameraPosition",
            Self::Tint => "tint",
            Self::ImageTexture => "imageTexture",
        }
    }
}

/// Slots of one `Lights[i]` array element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LightSlots {
    /// `Lights[i].position`
    pub position: Option<UniformSlot>,
    /// `Lights[i].color`
    pub color: Option<UniformSlot>,
    /// `Lights[i].strength`
    pub strength: Option<UniformSlot>,
}

/// Linked program plus the uniform locations the pipeline uploads to
#[derive(Debug)]
pub struct ShaderProgram {
    label: &'static str,
    handle: ProgramHandle,
    slots: HashMap<UniformKind, Option<UniformSlot>>,
    light_slots: Vec<LightSlots>,
}

impl ShaderProgram {
    /// Compile and link on the device
    pub fn compile<D: GraphicsDevice>(device: &mut D, label: &'static str, source: &ShaderSource) -> RenderResult<Self> {
        let handle = device.create_program(source)?;
        log::debug!("Linked '{}' program {:?}", label, handle);

        Ok(Self {
            label,
            handle,
            slots: HashMap::new(),
            light_slots: Vec::new(),
        })
    }

    /// Resolve and remember the slots of single uniforms
    pub fn cache_uniforms<D: GraphicsDevice>(&mut self, device: &mut D, kinds: &[UniformKind]) {
        for &kind in kinds {
            let slot = self.resolve(device, kind.name());
            self.slots.insert(kind, slot);
        }
    }

    /// Resolve `Lights[0..count]` slots
    pub fn cache_light_slots<D: GraphicsDevice>(&mut self, device: &mut D, count: usize) {
        self.light_slots = (0..count)
            .map(|i| LightSlots {
                position: self.resolve(device, &format!("Lights[{}].position", i)),
                color: self.resolve(device, &format!("Lights[{}].color", i)),
                strength: self.resolve(device, &format!("Lights[{}].strength", i)),
            })
            .collect();
        log::debug!("Cached {} light slots on '{}'", count, self.label);
    }

    fn resolve<D: GraphicsDevice>(&self, device: &mut D, name: &str) -> Option<UniformSlot> {
        let slot = device.uniform_location(self.handle, name);
        if slot.is_none() {
            log::warn!("Uniform '{}' is not active on '{}' program", name, self.label);
        }
        slot
    }

    /// Cached slot; `None` when uncached or inactive in the program
    pub fn slot(&self, kind: UniformKind) -> Option<UniformSlot> {
        self.slots.get(&kind).copied().flatten()
    }

    /// Cached slots of light `index`
    pub fn light(&self, index: usize) -> Option<&LightSlots> {
        self.light_slots.get(index)
    }

    /// Number of light array elements with cached slots
    pub fn light_capacity(&self) -> usize {
        self.light_slots.len()
    }

    /// Make this program current
    pub fn bind<D: GraphicsDevice>(&self, device: &mut D) {
        device.use_program(self.handle);
    }

    /// Device handle
    pub fn handle(&self) -> ProgramHandle {
        self.handle
    }

    /// Release the program
    pub fn destroy<D: GraphicsDevice>(self, device: &mut D) {
        device.destroy_program(self.handle);
    }
}
