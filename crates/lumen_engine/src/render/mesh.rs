//! Mesh geometry
//!
//! `MeshData` is the CPU-side vertex list in the interleaved layout shared by
//! both shader programs; `Mesh` is the uploaded copy owned by a device.

use crate::assets::{AssetError, ObjLoader};
use crate::render::device::{GraphicsDevice, MeshHandle};
use crate::render::RenderResult;
use std::path::Path;

/// Number of `f32` components per interleaved vertex
pub const FLOATS_PER_VERTEX: usize = 8;

/// Interleaved vertex: position, texture coordinate, normal
///
/// Attribute locations are 0, 1 and 2 in that order with a 32 byte stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex {
    /// Position in model space
    pub position: [f32; 3],
    /// Texture coordinate
    pub tex_coord: [f32; 2],
    /// Surface normal
    pub normal: [f32; 3],
}

// Only f32 arrays with no padding between them
unsafe impl bytemuck::Pod for Vertex {}
unsafe impl bytemuck::Zeroable for Vertex {}

impl Vertex {
    const fn new(position: [f32; 3], tex_coord: [f32; 2], normal: [f32; 3]) -> Self {
        Self { position, tex_coord, normal }
    }
}

/// Triangle list ready for upload
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshData {
    vertices: Vec<Vertex>,
}

impl MeshData {
    /// Wrap an already triangulated vertex list
    pub fn from_vertices(vertices: Vec<Vertex>) -> Self {
        Self { vertices }
    }

    /// Load face-indexed OBJ geometry
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        ObjLoader::load(path)
    }

    /// Billboard quad of the given width and height
    ///
    /// The quad lies in the local YZ plane centred on the origin with its
    /// normal along +X, so a billboard orientation pointing +X at the camera
    /// shows its textured face.
    pub fn rect(width: f32, height: f32) -> Self {
        let (hw, hh) = (width / 2.0, height / 2.0);
        let normal = [1.0, 0.0, 0.0];

        let top_left = Vertex::new([0.0, -hw, hh], [0.0, 0.0], normal);
        let bottom_left = Vertex::new([0.0, -hw, -hh], [0.0, 1.0], normal);
        let bottom_right = Vertex::new([0.0, hw, -hh], [1.0, 1.0], normal);
        let top_right = Vertex::new([0.0, hw, hh], [1.0, 0.0], normal);

        Self::from_vertices(vec![
            top_left, bottom_left, bottom_right,
            top_left, bottom_right, top_right,
        ])
    }

    /// Vertices in draw order
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Raw interleaved floats
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Number of vertices the draw call covers
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}

/// Geometry resident on a graphics device
#[derive(Debug, PartialEq, Eq)]
pub struct Mesh {
    handle: MeshHandle,
    vertex_count: usize,
}

impl Mesh {
    /// Upload geometry to the device
    pub fn upload<D: GraphicsDevice>(device: &mut D, data: &MeshData) -> RenderResult<Self> {
        let handle = device.create_mesh(data)?;
        Ok(Self {
            handle,
            vertex_count: data.vertex_count(),
        })
    }

    /// Make this mesh the source of subsequent draws
    pub fn bind<D: GraphicsDevice>(&self, device: &mut D) {
        device.bind_mesh(self.handle);
    }

    /// Issue one draw covering every vertex
    pub fn draw<D: GraphicsDevice>(&self, device: &mut D) {
        device.draw(self.vertex_count);
    }

    /// Device handle
    pub fn handle(&self) -> MeshHandle {
        self.handle
    }

    /// Vertex count uploaded
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Release the device buffers
    pub fn destroy<D: GraphicsDevice>(self, device: &mut D) {
        device.destroy_mesh(self.handle);
    }
}
