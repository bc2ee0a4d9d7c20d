//! Input mapping
//!
//! Turns key state and cursor offsets from an [`InputSource`] into camera
//! movement and rotation. The window implements the source; tests use a
//! scripted one.

use crate::foundation::math::Vec3;
use crate::scene::{Orientation, Scene};

/// Actions the viewer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Move along the view direction
    Forward,
    /// Move against the view direction
    Back,
    /// Move against the right vector
    StrafeLeft,
    /// Move along the right vector
    StrafeRight,
    /// Leave the main loop
    Quit,
}

/// Provider of key state and look input
pub trait InputSource {
    /// Whether the key bound to `action` is currently held
    fn is_pressed(&self, action: InputAction) -> bool;

    /// Cursor offset from the window centre as `(left, up)` in pixels, then
    /// move the cursor back to the centre
    fn take_cursor_offset(&mut self) -> (f32, f32);
}

/// Maps input to camera motion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerController {
    move_speed: f32,
    turn_sensitivity: f32,
}

impl PlayerController {
    /// Controller with speed in world units per millisecond and sensitivity
    /// in degrees per pixel
    pub fn new(move_speed: f32, turn_sensitivity: f32) -> Self {
        Self { move_speed, turn_sensitivity }
    }

    /// Local move delta for this frame: `x` forward, `y` right
    ///
    /// Opposite keys cancel. Diagonals are normalised so every direction
    /// covers the same distance. `None` when nothing moves.
    pub fn movement<S: InputSource + ?Sized>(&self, input: &S, frame_time_ms: f32) -> Option<Vec3> {
        let mut direction = Vec3::zeros();
        if input.is_pressed(InputAction::Forward) {
            direction += Vec3::x();
        }
        if input.is_pressed(InputAction::Back) {
            direction -= Vec3::x();
        }
        if input.is_pressed(InputAction::StrafeLeft) {
            direction -= Vec3::y();
        }
        if input.is_pressed(InputAction::StrafeRight) {
            direction += Vec3::y();
        }

        let direction = direction.try_normalize(1e-5)?;
        Some(direction * self.move_speed * frame_time_ms)
    }

    /// Orientation change from the cursor offset; yaw from horizontal,
    /// pitch from vertical, both linear in pixels
    pub fn look<S: InputSource + ?Sized>(&self, input: &mut S) -> Orientation {
        let (left, up) = input.take_cursor_offset();
        Orientation::new(0.0, self.turn_sensitivity * up, self.turn_sensitivity * left)
    }

    /// Apply this frame's movement and look input to the scene camera
    pub fn apply<S: InputSource + ?Sized>(&self, input: &mut S, scene: &mut Scene, frame_time_ms: f32) {
        if let Some(delta) = self.movement(input, frame_time_ms) {
            scene.move_player(delta);
        }
        scene.spin_player(self.look(input));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SceneConfig;
    use crate::foundation::time::{FrameTimer, REFERENCE_FRAME_MS};
    use approx::assert_relative_eq;
    use std::collections::HashSet;

    #[derive(Default)]
    struct ScriptedInput {
        held: HashSet<InputAction>,
        cursor: (f32, f32),
        recentred: usize,
    }

    impl ScriptedInput {
        fn holding(actions: &[InputAction]) -> Self {
            Self {
                held: actions.iter().copied().collect(),
                ..Self::default()
            }
        }
    }

    impl InputSource for ScriptedInput {
        fn is_pressed(&self, action: InputAction) -> bool {
            self.held.contains(&action)
        }

        fn take_cursor_offset(&mut self) -> (f32, f32) {
            self.recentred += 1;
            std::mem::take(&mut self.cursor)
        }
    }

    fn controller() -> PlayerController {
        PlayerController::new(0.005, 0.2)
    }

    #[test]
    fn test_no_keys_no_movement() {
        assert_eq!(controller().movement(&ScriptedInput::default(), 7.0), None);
    }

    #[test]
    fn test_forward_scales_with_frame_time() {
        let input = ScriptedInput::holding(&[InputAction::Forward]);
        let delta = controller().movement(&input, 1000.0 / 144.0).unwrap();
        assert_relative_eq!(delta, Vec3::new(0.005 * 1000.0 / 144.0, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_moves_before_first_framerate_sample() {
        let input = ScriptedInput::holding(&[InputAction::Forward]);
        let timer = FrameTimer::new();
        let delta = controller().movement(&input, timer.frame_time_ms()).unwrap();
        assert_relative_eq!(delta.x, 0.005 * REFERENCE_FRAME_MS, epsilon = 1e-6);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let input = ScriptedInput::holding(&[InputAction::Forward, InputAction::Back]);
        assert_eq!(controller().movement(&input, 10.0), None);
    }

    #[test]
    fn test_diagonal_is_normalised() {
        let input = ScriptedInput::holding(&[InputAction::Forward, InputAction::StrafeLeft]);
        let delta = controller().movement(&input, 10.0).unwrap();
        assert_relative_eq!(delta.norm(), 0.05, epsilon = 1e-6);
        assert!(delta.x > 0.0 && delta.y < 0.0);
    }

    #[test]
    fn test_look_is_linear_and_recentres() {
        let mut input = ScriptedInput {
            cursor: (10.0, -5.0),
            ..ScriptedInput::default()
        };
        let spin = controller().look(&mut input);
        assert_relative_eq!(spin.yaw, 2.0);
        assert_relative_eq!(spin.pitch, -1.0);
        assert_eq!(spin.roll, 0.0);
        assert_eq!(input.recentred, 1);

        // Offset was consumed by the recentre
        assert_eq!(controller().look(&mut input), Orientation::default());
    }

    #[test]
    fn test_apply_moves_and_turns_camera() {
        let mut scene = Scene::new(&SceneConfig::default());
        let mut input = ScriptedInput {
            held: [InputAction::Forward].into_iter().collect(),
            cursor: (5.0, 0.0),
            ..ScriptedInput::default()
        };

        controller().apply(&mut input, &mut scene, 100.0);
        let player = scene.player();
        assert_relative_eq!(player.position.x, -1.5, epsilon = 1e-5);
        assert_relative_eq!(player.position.z, 3.0, epsilon = 1e-5);
        assert_relative_eq!(player.orientation.yaw, 1.0);
    }
}
