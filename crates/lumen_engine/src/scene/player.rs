//! First-person camera
//!
//! The player owns the camera state. Yaw and pitch are the source of truth;
//! the forward/right/up basis is derived from them on every update and is
//! never edited directly.

use crate::core::config::SceneConfig;
use crate::foundation::math::{utils, Mat4, Vec3};
use crate::foundation::transform::{self, TransformError};
use crate::scene::entity::Orientation;

/// First-person camera riding at a fixed altitude
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Position in world units
    pub position: Vec3,
    /// Orientation in degrees (roll unused)
    pub orientation: Orientation,
    /// World units moved per millisecond of frame time
    pub move_speed: f32,
    /// Degrees turned per pixel of cursor offset
    pub turn_sensitivity: f32,
    forward: Vec3,
    right: Vec3,
    up: Vec3,
    world_up: Vec3,
    rail_altitude: f32,
    pitch_limit: f32,
}

impl Player {
    /// Create the camera described by the scene configuration
    pub fn new(config: &SceneConfig) -> Self {
        let world_up = Vec3::from(config.world_up)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vec3::z);

        let mut player = Self {
            position: Vec3::from(config.player.start_position),
            orientation: Orientation::default(),
            move_speed: config.player.move_speed,
            turn_sensitivity: config.player.turn_sensitivity,
            forward: Vec3::x(),
            right: Vec3::zeros(),
            up: world_up,
            world_up,
            rail_altitude: config.rail_altitude,
            pitch_limit: config.pitch_limit,
        };
        player.refresh_basis();
        player
    }

    /// Recompute the camera basis from the current orientation
    ///
    /// `dt` is accepted for symmetry with the other scene objects; the camera
    /// has no time-driven motion of its own.
    pub fn update(&mut self, _dt: f32) {
        self.refresh_basis();
    }

    fn refresh_basis(&mut self) {
        let yaw = utils::deg_to_rad(self.orientation.yaw);
        let pitch = utils::deg_to_rad(self.orientation.pitch);

        self.forward = Vec3::new(
            yaw.cos() * pitch.cos(),
            yaw.sin() * pitch.cos(),
            pitch.sin(),
        );
        self.right = self.forward.cross(&self.world_up).normalize();
        self.up = self.right.cross(&self.forward).normalize();

        debug_assert!(
            self.right.iter().chain(self.up.iter()).all(|c| c.is_finite()),
            "camera basis collapsed at pitch {}",
            self.orientation.pitch
        );
    }

    /// Move along the camera basis: `x` forward, `y` right, `z` up
    ///
    /// The camera is then pinned back onto its rail altitude.
    pub fn move_by(&mut self, local_delta: Vec3) {
        self.position += local_delta.x * self.forward
            + local_delta.y * self.right
            + local_delta.z * self.up;

        let height = self.position.dot(&self.world_up);
        self.position += self.world_up * (self.rail_altitude - height);
    }

    /// Add to the orientation, wrapping yaw and clamping pitch
    pub fn spin(&mut self, delta: Orientation) {
        let next = self.orientation + delta;
        self.orientation = Orientation::new(
            utils::wrap_degrees(next.roll),
            next.pitch.clamp(-self.pitch_limit, self.pitch_limit),
            utils::wrap_degrees(next.yaw),
        );
    }

    /// World-to-eye transform looking along `forward`
    pub fn view_transform(&self) -> Result<Mat4, TransformError> {
        transform::view_transform(self.position, self.position + self.forward, self.up)
    }

    /// Unit view direction
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Unit right vector
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Unit camera up vector
    pub fn up(&self) -> Vec3 {
        self.up
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec4;
    use approx::assert_relative_eq;

    fn player() -> Player {
        Player::new(&SceneConfig::default())
    }

    #[test]
    fn test_initial_basis_looks_down_x() {
        let player = player();
        assert_relative_eq!(player.forward(), Vec3::x(), epsilon = 1e-6);
        assert_relative_eq!(player.right(), Vec3::new(0.0, -1.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(player.up(), Vec3::z(), epsilon = 1e-6);
    }

    #[test]
    fn test_basis_orthonormal_across_range() {
        let mut player = player();
        let mut yaw = -720.0;
        while yaw <= 720.0 {
            let mut pitch = -89.0;
            while pitch <= 89.0 {
                player.orientation = Orientation::new(0.0, pitch, utils::wrap_degrees(yaw));
                player.update(1.0);

                let (f, r, u) = (player.forward(), player.right(), player.up());
                assert_relative_eq!(f.norm(), 1.0, epsilon = 1e-5);
                assert_relative_eq!(r.norm(), 1.0, epsilon = 1e-5);
                assert_relative_eq!(u.norm(), 1.0, epsilon = 1e-5);
                assert!(f.dot(&r).abs() < 1e-5);
                assert!(f.dot(&u).abs() < 1e-5);
                assert!(r.dot(&u).abs() < 1e-5);
                pitch += 8.9;
            }
            yaw += 37.0;
        }
    }

    #[test]
    fn test_spin_wraps_yaw_and_clamps_pitch() {
        let mut player = player();
        let deltas = [
            Orientation::new(0.0, 500.0, 1000.0),
            Orientation::new(0.0, -2000.0, -3725.5),
            Orientation::new(0.0, 45.0, -0.001),
            Orientation::new(0.0, 1e6, 1e6),
            Orientation::new(0.0, -1e6, -1e6),
        ];

        for delta in deltas {
            player.spin(delta);
            assert!((0.0..360.0).contains(&player.orientation.yaw), "yaw {}", player.orientation.yaw);
            assert!((-89.0..=89.0).contains(&player.orientation.pitch), "pitch {}", player.orientation.pitch);
        }
    }

    #[test]
    fn test_move_forward_pins_altitude() {
        let mut player = player();
        player.update(0.0);
        let start = player.position;

        player.move_by(Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(player.position.x, start.x + 1.0, epsilon = 1e-6);
        assert_relative_eq!(player.position.z, 3.0);
    }

    #[test]
    fn test_move_up_is_undone_by_rail() {
        let mut player = player();
        player.spin(Orientation::new(0.0, 60.0, 0.0));
        player.update(0.0);

        player.move_by(Vec3::new(2.0, 0.0, 1.0));
        assert_relative_eq!(player.position.z, 3.0, epsilon = 1e-6);
        assert!(player.position.x > -2.0);
    }

    #[test]
    fn test_strafe_right() {
        let mut player = player();
        player.move_by(Vec3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(player.position, Vec3::new(-2.0, -1.0, 3.0), epsilon = 1e-6);
    }

    #[test]
    fn test_view_maps_eye_to_origin() {
        let mut player = player();
        player.spin(Orientation::new(0.0, -30.0, 135.0));
        player.update(0.0);

        let view = player.view_transform().unwrap();
        let p = player.position;
        let eye = view * Vec4::new(p.x, p.y, p.z, 1.0);
        assert_relative_eq!(eye.xyz(), Vec3::zeros(), epsilon = 1e-5);
    }

    #[test]
    fn test_view_valid_at_pitch_limit() {
        let mut player = player();
        player.spin(Orientation::new(0.0, 89.0, 0.0));
        player.update(0.0);
        assert!(player.view_transform().is_ok());
    }
}
