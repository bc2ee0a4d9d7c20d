//! Recording graphics device for unit tests (no GPU required)

use crate::assets::{ImageData, ShaderSource};
use crate::foundation::math::{Mat4, Vec3};
use crate::render::device::{GraphicsDevice, MeshHandle, ProgramHandle, TextureHandle, UniformSlot};
use crate::render::mesh::MeshData;
use crate::render::{RenderError, RenderResult};
use std::collections::{HashMap, HashSet};

/// One recorded device operation
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCall {
    Setup,
    CreateProgram(ProgramHandle),
    UseProgram(ProgramHandle),
    Lookup(ProgramHandle, String),
    SetI32(UniformSlot, i32),
    SetF32(UniformSlot, f32),
    SetVec3(UniformSlot, [f32; 3]),
    SetMat4(UniformSlot, [f32; 16]),
    DestroyProgram(ProgramHandle),
    CreateTexture(TextureHandle, u32, u32),
    BindTexture(TextureHandle),
    DestroyTexture(TextureHandle),
    CreateMesh(MeshHandle, usize),
    BindMesh(MeshHandle),
    DestroyMesh(MeshHandle),
    Draw(usize),
    BeginFrame,
    EndFrame,
}

impl DeviceCall {
    fn upload_slot(&self) -> Option<UniformSlot> {
        match self {
            Self::SetI32(slot, _) | Self::SetF32(slot, _) | Self::SetVec3(slot, _) | Self::SetMat4(slot, _) => Some(*slot),
            _ => None,
        }
    }
}

/// Device that mints handles and records every call in order
#[derive(Debug, Default)]
pub struct MockDevice {
    calls: Vec<DeviceCall>,
    next_id: u32,
    slots: HashMap<(ProgramHandle, String), UniformSlot>,
    slot_names: HashMap<UniformSlot, String>,
    inactive: HashSet<String>,
    link_budget: Option<usize>,
}

impl MockDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `name` as inactive on every program
    pub fn without_uniform(mut self, name: &str) -> Self {
        self.inactive.insert(name.to_string());
        self
    }

    /// Fail every program link
    pub fn rejecting_programs(self) -> Self {
        self.linking_at_most(0)
    }

    /// Link the first `count` programs, then fail
    pub fn linking_at_most(mut self, count: usize) -> Self {
        self.link_budget = Some(count);
        self
    }

    pub fn calls(&self) -> &[DeviceCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn lookup_count(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, DeviceCall::Lookup(..))).count()
    }

    /// Names that resolved to a slot
    pub fn resolved_names(&self) -> Vec<String> {
        self.slot_names.values().cloned().collect()
    }

    /// Uniform name behind a slot
    pub fn slot_name(&self, slot: UniformSlot) -> Option<&str> {
        self.slot_names.get(&slot).map(String::as_str)
    }

    /// Recorded uploads to any uniform named `name`
    pub fn uploads_to(&self, name: &str) -> Vec<&DeviceCall> {
        self.calls
            .iter()
            .filter(|call| {
                call.upload_slot()
                    .and_then(|slot| self.slot_name(slot))
                    .is_some_and(|n| n == name)
            })
            .collect()
    }

    /// Names of every uniform uploaded, in call order
    pub fn uploaded_names(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(DeviceCall::upload_slot)
            .filter_map(|slot| self.slot_name(slot))
            .collect()
    }

    /// Handles created but never destroyed
    pub fn live_handles(&self) -> Vec<u32> {
        let mut live = Vec::new();
        for call in &self.calls {
            match call {
                DeviceCall::CreateProgram(ProgramHandle(id))
                | DeviceCall::CreateTexture(TextureHandle(id), ..)
                | DeviceCall::CreateMesh(MeshHandle(id), _) => live.push(*id),
                DeviceCall::DestroyProgram(ProgramHandle(id))
                | DeviceCall::DestroyTexture(TextureHandle(id))
                | DeviceCall::DestroyMesh(MeshHandle(id)) => live.retain(|live_id| live_id != id),
                _ => {}
            }
        }
        live
    }

    pub fn draw_count(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, DeviceCall::Draw(_))).count()
    }

    fn mint(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

impl GraphicsDevice for MockDevice {
    fn setup(&mut self) {
        self.calls.push(DeviceCall::Setup);
    }

    fn aspect_ratio(&self) -> f32 {
        800.0 / 600.0
    }

    fn create_program(&mut self, source: &ShaderSource) -> RenderResult<ProgramHandle> {
        if self.link_budget == Some(0) || source.vertex.is_empty() {
            return Err(RenderError::Shader("mock link failure".to_string()));
        }
        if let Some(budget) = self.link_budget.as_mut() {
            *budget -= 1;
        }
        let handle = ProgramHandle(self.mint());
        self.calls.push(DeviceCall::CreateProgram(handle));
        Ok(handle)
    }

    fn use_program(&mut self, program: ProgramHandle) {
        self.calls.push(DeviceCall::UseProgram(program));
    }

    fn uniform_location(&mut self, program: ProgramHandle, name: &str) -> Option<UniformSlot> {
        self.calls.push(DeviceCall::Lookup(program, name.to_string()));
        if self.inactive.contains(name) {
            return None;
        }

        let key = (program, name.to_string());
        if let Some(slot) = self.slots.get(&key) {
            return Some(*slot);
        }
        let slot = UniformSlot(self.mint() as i32);
        self.slots.insert(key, slot);
        self.slot_names.insert(slot, name.to_string());
        Some(slot)
    }

    fn set_uniform_i32(&mut self, slot: UniformSlot, value: i32) {
        self.calls.push(DeviceCall::SetI32(slot, value));
    }

    fn set_uniform_f32(&mut self, slot: UniformSlot, value: f32) {
        self.calls.push(DeviceCall::SetF32(slot, value));
    }

    fn set_uniform_vec3(&mut self, slot: UniformSlot, value: &Vec3) {
        self.calls.push(DeviceCall::SetVec3(slot, [value.x, value.y, value.z]));
    }

    fn set_uniform_mat4(&mut self, slot: UniformSlot, value: &Mat4) {
        let mut columns = [0.0; 16];
        columns.copy_from_slice(value.as_slice());
        self.calls.push(DeviceCall::SetMat4(slot, columns));
    }

    fn destroy_program(&mut self, program: ProgramHandle) {
        self.calls.push(DeviceCall::DestroyProgram(program));
    }

    fn create_texture(&mut self, image: &ImageData) -> RenderResult<TextureHandle> {
        let handle = TextureHandle(self.mint());
        self.calls.push(DeviceCall::CreateTexture(handle, image.width, image.height));
        Ok(handle)
    }

    fn bind_texture(&mut self, texture: TextureHandle) {
        self.calls.push(DeviceCall::BindTexture(texture));
    }

    fn destroy_texture(&mut self, texture: TextureHandle) {
        self.calls.push(DeviceCall::DestroyTexture(texture));
    }

    fn create_mesh(&mut self, data: &MeshData) -> RenderResult<MeshHandle> {
        let handle = MeshHandle(self.mint());
        self.calls.push(DeviceCall::CreateMesh(handle, data.vertex_count()));
        Ok(handle)
    }

    fn bind_mesh(&mut self, mesh: MeshHandle) {
        self.calls.push(DeviceCall::BindMesh(mesh));
    }

    fn destroy_mesh(&mut self, mesh: MeshHandle) {
        self.calls.push(DeviceCall::DestroyMesh(mesh));
    }

    fn draw(&mut self, vertex_count: usize) {
        self.calls.push(DeviceCall::Draw(vertex_count));
    }

    fn begin_frame(&mut self, _clear_color: [f32; 4]) {
        self.calls.push(DeviceCall::BeginFrame);
    }

    fn end_frame(&mut self) {
        self.calls.push(DeviceCall::EndFrame);
    }
}
