//! Backend abstraction for the render pipeline
//!
//! The pipeline talks to the GPU only through [`GraphicsDevice`]. Handles are
//! opaque ids minted by the device; the pipeline never sees API objects.

use crate::assets::{ImageData, ShaderSource};
use crate::foundation::math::{Mat4, Vec3};
use crate::render::mesh::MeshData;
use crate::render::RenderResult;

/// Handle to a linked shader program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub u32);

/// Handle to an RGBA texture with mipmaps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Handle to uploaded interleaved geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u32);

/// Resolved uniform location on a program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformSlot(pub i32);

/// Graphics backend used by [`crate::render::RenderPipeline`]
///
/// Uniform uploads go to the program most recently passed to
/// [`use_program`](GraphicsDevice::use_program). Texture and mesh binds stay
/// in effect until replaced.
pub trait GraphicsDevice {
    /// Enable depth testing and alpha blending
    fn setup(&mut self);

    /// Width over height of the drawable surface
    fn aspect_ratio(&self) -> f32;

    /// Compile and link a vertex + fragment program
    fn create_program(&mut self, source: &ShaderSource) -> RenderResult<ProgramHandle>;

    /// Make a program current
    fn use_program(&mut self, program: ProgramHandle);

    /// Look up a uniform by its exact name; `None` if the program has no such active uniform
    fn uniform_location(&mut self, program: ProgramHandle, name: &str) -> Option<UniformSlot>;

    /// Upload an integer uniform (sampler units)
    fn set_uniform_i32(&mut self, slot: UniformSlot, value: i32);

    /// Upload a float uniform
    fn set_uniform_f32(&mut self, slot: UniformSlot, value: f32);

    /// Upload a vec3 uniform
    fn set_uniform_vec3(&mut self, slot: UniformSlot, value: &Vec3);

    /// Upload a column-major mat4 uniform
    fn set_uniform_mat4(&mut self, slot: UniformSlot, value: &Mat4);

    /// Release a program
    fn destroy_program(&mut self, program: ProgramHandle);

    /// Create a texture from RGBA8 pixels and generate its mipmaps
    fn create_texture(&mut self, image: &ImageData) -> RenderResult<TextureHandle>;

    /// Bind a texture to unit 0
    fn bind_texture(&mut self, texture: TextureHandle);

    /// Release a texture
    fn destroy_texture(&mut self, texture: TextureHandle);

    /// Upload interleaved `[x, y, z, s, t, nx, ny, nz]` geometry
    fn create_mesh(&mut self, data: &MeshData) -> RenderResult<MeshHandle>;

    /// Bind geometry for drawing
    fn bind_mesh(&mut self, mesh: MeshHandle);

    /// Release geometry
    fn destroy_mesh(&mut self, mesh: MeshHandle);

    /// Draw `vertex_count` vertices of the bound mesh as triangles
    fn draw(&mut self, vertex_count: usize);

    /// Clear colour and depth
    fn begin_frame(&mut self, clear_color: [f32; 4]);

    /// Flush or present the finished frame
    fn end_frame(&mut self);
}

macro_rules! forward_device {
    ($($name:ident(&mut self $(, $arg:ident: $ty:ty)*) $(-> $ret:ty)?;)*) => {
        $(
            fn $name(&mut self $(, $arg: $ty)*) $(-> $ret)? {
                (**self).$name($($arg),*)
            }
        )*
    };
}

/// Lend a device to a pipeline while keeping ownership
impl<D: GraphicsDevice + ?Sized> GraphicsDevice for &mut D {
    fn aspect_ratio(&self) -> f32 {
        (**self).aspect_ratio()
    }

    forward_device! {
        setup(&mut self);
        create_program(&mut self, source: &ShaderSource) -> RenderResult<ProgramHandle>;
        use_program(&mut self, program: ProgramHandle);
        uniform_location(&mut self, program: ProgramHandle, name: &str) -> Option<UniformSlot>;
        set_uniform_i32(&mut self, slot: UniformSlot, value: i32);
        set_uniform_f32(&mut self, slot: UniformSlot, value: f32);
        set_uniform_vec3(&mut self, slot: UniformSlot, value: &Vec3);
        set_uniform_mat4(&mut self, slot: UniformSlot, value: &Mat4);
        destroy_program(&mut self, program: ProgramHandle);
        create_texture(&mut self, image: &ImageData) -> RenderResult<TextureHandle>;
        bind_texture(&mut self, texture: TextureHandle);
        destroy_texture(&mut self, texture: TextureHandle);
        create_mesh(&mut self, data: &MeshData) -> RenderResult<MeshHandle>;
        bind_mesh(&mut self, mesh: MeshHandle);
        destroy_mesh(&mut self, mesh: MeshHandle);
        draw(&mut self, vertex_count: usize);
        begin_frame(&mut self, clear_color: [f32; 4]);
        end_frame(&mut self);
    }
}
