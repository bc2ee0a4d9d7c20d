//! Time management utilities

use std::time::{Duration, Instant};

/// Frame duration, in milliseconds, at which one tick equals one unit of `dt`
///
/// Per-tick rates (such as the cube's spin) are tuned for 144 frames per second.
pub const REFERENCE_FRAME_MS: f32 = 1000.0 / 144.0;

/// Frame timer sampling the framerate over one-second windows
///
/// The frame time is only recomputed when a window closes, so it stays
/// constant for every frame inside a window and is never changed mid-frame.
/// Until the first window closes it holds [`REFERENCE_FRAME_MS`].
pub struct FrameTimer {
    window_start: Instant,
    frames_in_window: u32,
    frame_time_ms: f32,
    frame_count: u64,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTimer {
    /// Create a new timer
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a timer whose first sampling window opens at `start`
    pub fn starting_at(start: Instant) -> Self {
        Self {
            window_start: start,
            frames_in_window: 0,
            frame_time_ms: REFERENCE_FRAME_MS,
            frame_count: 0,
        }
    }

    /// Record a finished frame (should be called once per frame)
    ///
    /// Returns the new framerate when a sampling window closed on this frame.
    pub fn update(&mut self) -> Option<f32> {
        self.update_at(Instant::now())
    }

    /// Record a finished frame at an explicit instant
    pub fn update_at(&mut self, now: Instant) -> Option<f32> {
        self.frame_count += 1;
        self.frames_in_window += 1;

        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < Duration::from_secs(1) {
            return None;
        }

        let framerate = (self.frames_in_window as f32 / elapsed.as_secs_f32()).floor().max(1.0);
        self.frame_time_ms = 1000.0 / framerate;
        self.window_start = now;
        self.frames_in_window = 0;

        log::trace!("Framerate {:.0} fps, frame time {:.3} ms", framerate, self.frame_time_ms);
        Some(framerate)
    }

    /// Duration of one frame in milliseconds
    pub fn frame_time_ms(&self) -> f32 {
        self.frame_time_ms
    }

    /// Frame time expressed in reference ticks, fed to `Scene::update`
    pub fn tick_scale(&self) -> f32 {
        self.frame_time_ms / REFERENCE_FRAME_MS
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
