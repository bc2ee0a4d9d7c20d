//! Lumen scene viewer
//!
//! Opens a window, builds the startup scene and runs the frame loop:
//! input, scene update, render, frame timing. Move with WASD, look with the
//! mouse, quit with Escape.

use lumen_engine::config::{Config, ConfigError};
use lumen_engine::core::ApplicationConfig;
use lumen_engine::foundation::logging;
use lumen_engine::foundation::time::FrameTimer;
use lumen_engine::input::PlayerController;
use lumen_engine::render::opengl::GlDevice;
use lumen_engine::render::window::{GlfwWindow, WindowError};
use lumen_engine::render::{RenderError, RenderPipeline};
use lumen_engine::scene::Scene;
use thiserror::Error;

const CONFIG_PATH: &str = "lumen.toml";

/// Failures that end the viewer
#[derive(Error, Debug)]
pub enum AppError {
    /// `lumen.toml` could not be read or failed validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// No window or GL context
    #[error("Window error: {0}")]
    Window(#[from] WindowError),

    /// Pipeline construction or a frame failed
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

/// Window, pipeline and scene driven by the frame loop
pub struct ViewerApp {
    // Declared before the window so GPU resources go before the context
    pipeline: RenderPipeline<GlDevice>,
    window: GlfwWindow,
    scene: Scene,
    controller: PlayerController,
    timer: FrameTimer,
}

impl ViewerApp {
    /// Open the window and build the pipeline and startup scene
    pub fn new(config: &ApplicationConfig) -> Result<Self, AppError> {
        log::info!("Creating viewer...");
        if let Ok(cwd) = std::env::current_dir() {
            log::debug!("Current working directory: {:?}", cwd);
        }

        let mut window = GlfwWindow::new(&config.window)?;
        let device = window.create_device();
        let pipeline = RenderPipeline::new(device, &config.renderer, &config.assets)?;

        let player = &config.scene.player;
        Ok(Self {
            pipeline,
            window,
            scene: Scene::new(&config.scene),
            controller: PlayerController::new(player.move_speed, player.turn_sensitivity),
            timer: FrameTimer::new(),
        })
    }

    /// Run until the window closes or Escape is pressed
    pub fn run(&mut self) -> Result<(), AppError> {
        log::info!("Starting frame loop");

        while !self.window.should_close() {
            self.controller
                .apply(&mut self.window, &mut self.scene, self.timer.frame_time_ms());
            self.window.poll_events();

            self.scene.update(self.timer.tick_scale());
            self.pipeline.render(&self.scene)?;
            self.window.present();

            if let Some(fps) = self.timer.update() {
                self.window.show_framerate(fps);
                log::debug!("{:.0} fps, {:?}", fps, self.pipeline.stats());
            }
        }

        log::info!("Frame loop finished after {} frames", self.timer.frame_count());
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    // Set up panic hook for better error reporting
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("PANIC occurred: {}", panic_info);
        if let Some(location) = panic_info.location() {
            eprintln!("Panic location: {}:{}:{}", location.file(), location.line(), location.column());
        }
    }));

    let result = ApplicationConfig::load_or_default(CONFIG_PATH)
        .and_then(|config| config.validate().map(|()| config))
        .map_err(AppError::from)
        .and_then(|config| ViewerApp::new(&config))
        .and_then(|mut app| app.run());

    if let Err(e) = &result {
        log::error!("Viewer failed: {}", e);
    }
    result.map_err(Into::into)
}
