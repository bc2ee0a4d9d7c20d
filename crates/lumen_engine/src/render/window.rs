//! Window management using GLFW
//!
//! Creates the OpenGL 3.3 core context the [`GlDevice`] draws into and serves
//! as the host's [`InputSource`].

use glfw::{Action, Context, Key};
use thiserror::Error;

use crate::core::config::WindowConfig;
use crate::input::{InputAction, InputSource};
use crate::render::opengl::GlDevice;

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// GLFW could not be initialised
    #[error("GLFW initialization failed: {0}")]
    InitializationFailed(String),

    /// The window or its GL context could not be created
    #[error("Window creation failed for {width}x{height}")]
    CreationFailed {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },
}

/// Result type for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// GLFW window owning the GL context
pub struct GlfwWindow {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    title: String,
    double_buffered: bool,
}

impl GlfwWindow {
    /// Open a window with a current OpenGL 3.3 core context and a hidden,
    /// centred cursor
    pub fn new(config: &WindowConfig) -> WindowResult<Self> {
        let mut glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|e| WindowError::InitializationFailed(format!("{:?}", e)))?;

        glfw.window_hint(glfw::WindowHint::ContextVersion(3, 3));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(glfw::OpenGlProfileHint::Core));
        glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
        glfw.window_hint(glfw::WindowHint::DoubleBuffer(config.double_buffered));
        glfw.window_hint(glfw::WindowHint::Resizable(false));

        let (mut window, events) = glfw
            .create_window(config.width, config.height, &config.title, glfw::WindowMode::Windowed)
            .ok_or(WindowError::CreationFailed {
                width: config.width,
                height: config.height,
            })?;

        window.make_current();
        window.set_key_polling(true);
        window.set_close_polling(true);
        window.set_cursor_mode(glfw::CursorMode::Hidden);

        let mut handle = Self {
            glfw,
            window,
            events,
            title: config.title.clone(),
            double_buffered: config.double_buffered,
        };
        handle.recentre_cursor();

        log::info!(
            "Window created: {}x{} '{}' ({})",
            config.width,
            config.height,
            config.title,
            if config.double_buffered { "double-buffered" } else { "single-buffered" }
        );
        Ok(handle)
    }

    /// Load GL entry points from this window's context
    pub fn create_device(&mut self) -> GlDevice {
        let (width, height) = self.window.get_framebuffer_size();
        let window = &mut self.window;
        GlDevice::new(
            |symbol| window.get_proc_address(symbol) as *const _,
            u32::try_from(width).unwrap_or(0),
            u32::try_from(height).unwrap_or(0),
        )
    }

    /// Close requested by the window manager or the quit key
    pub fn should_close(&self) -> bool {
        self.window.should_close() || self.is_pressed(InputAction::Quit)
    }

    /// Process pending window system events
    pub fn poll_events(&mut self) {
        self.glfw.poll_events();
        for (_, event) in glfw::flush_messages(&self.events) {
            log::trace!("Window event: {:?}", event);
        }
    }

    /// Swap buffers when double-buffered; single-buffered frames are
    /// already flushed by the device
    pub fn present(&mut self) {
        if self.double_buffered {
            self.window.swap_buffers();
        }
    }

    /// Show the frame rate after the configured title
    pub fn show_framerate(&mut self, fps: f32) {
        self.window.set_title(&format!("{} | FPS : {:.0}", self.title, fps));
    }

    fn centre(&self) -> (f64, f64) {
        let (width, height) = self.window.get_size();
        (f64::from(width) / 2.0, f64::from(height) / 2.0)
    }

    fn recentre_cursor(&mut self) {
        let (x, y) = self.centre();
        self.window.set_cursor_pos(x, y);
    }
}

impl InputSource for GlfwWindow {
    fn is_pressed(&self, action: InputAction) -> bool {
        let key = match action {
            InputAction::Forward => Key::W,
            InputAction::Back => Key::S,
            InputAction::StrafeLeft => Key::A,
            InputAction::StrafeRight => Key::D,
            InputAction::Quit => Key::Escape,
        };
        self.window.get_key(key) == Action::Press
    }

    fn take_cursor_offset(&mut self) -> (f32, f32) {
        let (x, y) = self.window.get_cursor_pos();
        let (cx, cy) = self.centre();
        self.recentre_cursor();
        ((cx - x) as f32, (cy - y) as f32)
    }
}
