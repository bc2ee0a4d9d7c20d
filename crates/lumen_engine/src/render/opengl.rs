//! OpenGL 3.3 core implementation of [`GraphicsDevice`]
//!
//! Handles are the raw GL object names. Every call assumes the context the
//! device was loaded from is current on this thread.

use std::collections::HashMap;
use std::ffi::{c_void, CStr, CString};

use crate::assets::{ImageData, ShaderSource};
use crate::foundation::math::{Mat4, Vec3};
use crate::render::device::{GraphicsDevice, MeshHandle, ProgramHandle, TextureHandle, UniformSlot};
use crate::render::mesh::{MeshData, Vertex};
use crate::render::{RenderError, RenderResult};

/// Bytes between consecutive vertices
const VERTEX_STRIDE: i32 = std::mem::size_of::<Vertex>() as i32;

/// OpenGL device bound to the current context
pub struct GlDevice {
    width: u32,
    height: u32,
    // VAO name -> VBO name
    buffers: HashMap<u32, u32>,
}

impl GlDevice {
    /// Load GL entry points through `loader` and size the viewport
    ///
    /// The context must already be current.
    pub fn new<F>(loader: F, width: u32, height: u32) -> Self
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        gl::load_with(loader);

        // SAFETY: entry points were just loaded for the current context
        unsafe {
            let version = gl::GetString(gl::VERSION);
            if !version.is_null() {
                log::info!(
                    "OpenGL context: {}",
                    CStr::from_ptr(version.cast()).to_string_lossy()
                );
            }
        }

        Self {
            width,
            height,
            buffers: HashMap::new(),
        }
    }

    fn compile_stage(kind: gl::types::GLenum, source: &str) -> RenderResult<u32> {
        let stage_name = if kind == gl::VERTEX_SHADER { "vertex" } else { "fragment" };
        let source = CString::new(source)
            .map_err(|_| RenderError::Shader(format!("{} source contains a NUL byte", stage_name)))?;

        // SAFETY: `source` outlives the ShaderSource call; the shader name is checked below
        unsafe {
            let shader = gl::CreateShader(kind);
            gl::ShaderSource(shader, 1, &source.as_ptr(), std::ptr::null());
            gl::CompileShader(shader);

            let mut status = 0;
            gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);
            if status == i32::from(gl::FALSE) {
                let log = info_log(shader, gl::GetShaderiv, gl::GetShaderInfoLog);
                gl::DeleteShader(shader);
                return Err(RenderError::Shader(format!("{} stage failed to compile: {}", stage_name, log)));
            }
            Ok(shader)
        }
    }
}

type GetIv = unsafe fn(u32, gl::types::GLenum, *mut i32);
type GetLog = unsafe fn(u32, i32, *mut i32, *mut gl::types::GLchar);

/// Read a shader or program info log
unsafe fn info_log(object: u32, get_iv: GetIv, get_log: GetLog) -> String {
    let mut length = 0;
    get_iv(object, gl::INFO_LOG_LENGTH, &mut length);
    let mut buffer = vec![0u8; usize::try_from(length).unwrap_or(0).max(1)];
    let mut written = 0;
    get_log(object, length, &mut written, buffer.as_mut_ptr().cast());
    buffer.truncate(usize::try_from(written).unwrap_or(0));
    String::from_utf8_lossy(&buffer).trim_end().to_string()
}

impl GraphicsDevice for GlDevice {
    fn setup(&mut self) {
        // SAFETY: plain state changes on the current context
        unsafe {
            gl::Viewport(0, 0, self.width as i32, self.height as i32);
            gl::Enable(gl::DEPTH_TEST);
            gl::Enable(gl::BLEND);
            gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);
        }
    }

    fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    fn create_program(&mut self, source: &ShaderSource) -> RenderResult<ProgramHandle> {
        let vertex = Self::compile_stage(gl::VERTEX_SHADER, &source.vertex)?;
        let fragment = match Self::compile_stage(gl::FRAGMENT_SHADER, &source.fragment) {
            Ok(fragment) => fragment,
            Err(e) => {
                // SAFETY: `vertex` is a valid shader name from compile_stage
                unsafe { gl::DeleteShader(vertex) };
                return Err(e);
            }
        };

        // SAFETY: both stage names are valid and released once linked
        unsafe {
            let program = gl::CreateProgram();
            gl::AttachShader(program, vertex);
            gl::AttachShader(program, fragment);
            gl::LinkProgram(program);
            gl::DeleteShader(vertex);
            gl::DeleteShader(fragment);

            let mut status = 0;
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);
            if status == i32::from(gl::FALSE) {
                let log = info_log(program, gl::GetProgramiv, gl::GetProgramInfoLog);
                gl::DeleteProgram(program);
                return Err(RenderError::Shader(format!("program failed to link: {}", log)));
            }
            Ok(ProgramHandle(program))
        }
    }

    fn use_program(&mut self, program: ProgramHandle) {
        unsafe { gl::UseProgram(program.0) };
    }

    fn uniform_location(&mut self, program: ProgramHandle, name: &str) -> Option<UniformSlot> {
        let name = CString::new(name).ok()?;
        // SAFETY: `name` is NUL-terminated and outlives the call
        let location = unsafe { gl::GetUniformLocation(program.0, name.as_ptr()) };
        (location >= 0).then_some(UniformSlot(location))
    }

    fn set_uniform_i32(&mut self, slot: UniformSlot, value: i32) {
        unsafe { gl::Uniform1i(slot.0, value) };
    }

    fn set_uniform_f32(&mut self, slot: UniformSlot, value: f32) {
        unsafe { gl::Uniform1f(slot.0, value) };
    }

    fn set_uniform_vec3(&mut self, slot: UniformSlot, value: &Vec3) {
        unsafe { gl::Uniform3fv(slot.0, 1, value.as_ptr()) };
    }

    fn set_uniform_mat4(&mut self, slot: UniformSlot, value: &Mat4) {
        // nalgebra storage is already column-major
        unsafe { gl::UniformMatrix4fv(slot.0, 1, gl::FALSE, value.as_ptr()) };
    }

    fn destroy_program(&mut self, program: ProgramHandle) {
        unsafe { gl::DeleteProgram(program.0) };
    }

    fn create_texture(&mut self, image: &ImageData) -> RenderResult<TextureHandle> {
        let expected = image.width as usize * image.height as usize * 4;
        if image.data.len() != expected {
            return Err(RenderError::BackendError(format!(
                "texture data is {} bytes, expected {} for {}x{} RGBA",
                image.data.len(),
                expected,
                image.width,
                image.height
            )));
        }
        let width = i32::try_from(image.width)
            .map_err(|_| RenderError::BackendError(format!("texture width {} too large", image.width)))?;
        let height = i32::try_from(image.height)
            .map_err(|_| RenderError::BackendError(format!("texture height {} too large", image.height)))?;

        let mut texture = 0;
        // SAFETY: pixel buffer length was checked against width * height * 4
        unsafe {
            gl::GenTextures(1, &mut texture);
            gl::BindTexture(gl::TEXTURE_2D, texture);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::REPEAT as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::REPEAT as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::NEAREST_MIPMAP_LINEAR as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR as i32);
            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                gl::RGBA as i32,
                width,
                height,
                0,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                image.data.as_ptr().cast(),
            );
            gl::GenerateMipmap(gl::TEXTURE_2D);
        }
        Ok(TextureHandle(texture))
    }

    fn bind_texture(&mut self, texture: TextureHandle) {
        unsafe {
            gl::ActiveTexture(gl::TEXTURE0);
            gl::BindTexture(gl::TEXTURE_2D, texture.0);
        }
    }

    fn destroy_texture(&mut self, texture: TextureHandle) {
        unsafe { gl::DeleteTextures(1, &texture.0) };
    }

    fn create_mesh(&mut self, data: &MeshData) -> RenderResult<MeshHandle> {
        let bytes: &[u8] = bytemuck::cast_slice(data.vertices());
        let size = isize::try_from(bytes.len())
            .map_err(|_| RenderError::BackendError(format!("mesh of {} bytes too large", bytes.len())))?;

        let (mut vao, mut vbo) = (0, 0);
        // SAFETY: `bytes` is copied by BufferData before returning
        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::BindVertexArray(vao);
            gl::GenBuffers(1, &mut vbo);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            gl::BufferData(gl::ARRAY_BUFFER, size, bytes.as_ptr().cast(), gl::STATIC_DRAW);

            // position, texture coordinate, normal
            for (index, components, offset) in [(0, 3, 0usize), (1, 2, 12), (2, 3, 20)] {
                gl::EnableVertexAttribArray(index);
                gl::VertexAttribPointer(index, components, gl::FLOAT, gl::FALSE, VERTEX_STRIDE, offset as *const c_void);
            }
        }

        self.buffers.insert(vao, vbo);
        Ok(MeshHandle(vao))
    }

    fn bind_mesh(&mut self, mesh: MeshHandle) {
        unsafe { gl::BindVertexArray(mesh.0) };
    }

    fn destroy_mesh(&mut self, mesh: MeshHandle) {
        unsafe {
            gl::DeleteVertexArrays(1, &mesh.0);
            if let Some(vbo) = self.buffers.remove(&mesh.0) {
                gl::DeleteBuffers(1, &vbo);
            }
        }
    }

    fn draw(&mut self, vertex_count: usize) {
        let count = i32::try_from(vertex_count).unwrap_or(i32::MAX);
        unsafe { gl::DrawArrays(gl::TRIANGLES, 0, count) };
    }

    fn begin_frame(&mut self, clear_color: [f32; 4]) {
        let [r, g, b, a] = clear_color;
        unsafe {
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        }
    }

    fn end_frame(&mut self) {
        unsafe { gl::Flush() };
    }
}
