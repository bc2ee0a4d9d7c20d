//! Model, view and projection transforms
//!
//! Pure functions shared by every entity and by the camera. Orientation
//! angles are Euler angles in degrees stored as `(roll, pitch, yaw)`; roll is
//! never applied to generic entities.

use thiserror::Error;

use crate::foundation::math::{constants, utils, Mat4, Mat4Ext, Vec3};
use crate::scene::Orientation;

/// Errors produced while building camera transforms
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    /// Forward and up are parallel (or forward has no length)
    #[error("degenerate camera basis: eye {eye:?}, target {target:?}, up {up:?}")]
    DegenerateBasis {
        /// Camera position
        eye: [f32; 3],
        /// Look-at target
        target: [f32; 3],
        /// Requested up vector
        up: [f32; 3],
    },
}

/// Build the model transform `T(position) · Rz(yaw) · Ry(pitch)`
///
/// Pitch is applied first, then yaw, and translation is the outermost step.
pub fn model_transform(position: Vec3, orientation: &Orientation) -> Mat4 {
    Mat4::new_translation(&position)
        * Mat4::rotation_z(orientation.yaw)
        * Mat4::rotation_y(orientation.pitch)
}

/// Build a right-handed look-at view transform
///
/// Fails with [`TransformError::DegenerateBasis`] when the view direction has
/// no length or is parallel to `up`.
pub fn view_transform(eye: Vec3, target: Vec3, up: Vec3) -> Result<Mat4, TransformError> {
    let forward = target - eye;
    let degenerate = !(eye.iter().chain(target.iter()).chain(up.iter()).all(|c| c.is_finite()))
        || forward.norm() < constants::BASIS_EPSILON
        || forward.normalize().cross(&up).norm() < constants::BASIS_EPSILON;

    if degenerate {
        return Err(TransformError::DegenerateBasis {
            eye: eye.into(),
            target: target.into(),
            up: up.into(),
        });
    }

    Ok(Mat4::look_at(eye, target, up))
}

/// Build the perspective projection used by both render passes
pub fn perspective_projection(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    Mat4::perspective(utils::deg_to_rad(fov_y_degrees), aspect, near, far)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec4;
    use approx::assert_relative_eq;

    #[test]
    fn test_model_transform_translation_is_outermost() {
        let orientation = Orientation::new(0.0, 30.0, 45.0);
        let position = Vec3::new(1.0, 2.0, 3.0);
        let model = model_transform(position, &orientation);

        // The local origin lands on the entity position regardless of rotation
        let origin = model * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(origin.xyz(), position, epsilon = 1e-6);
    }

    #[test]
    fn test_model_transform_applies_pitch_before_yaw() {
        let orientation = Orientation::new(0.0, 90.0, 90.0);
        let model = model_transform(Vec3::zeros(), &orientation);

        // Pitch lifts +X onto +Z, the following yaw leaves it there
        let local_x = model.transform_vector(&Vec3::x());
        assert_relative_eq!(local_x, Vec3::z(), epsilon = 1e-6);

        // +Y is untouched by pitch and then yawed onto +X
        let local_y = model.transform_vector(&Vec3::y());
        assert_relative_eq!(local_y, Vec3::x(), epsilon = 1e-6);
    }

    #[test]
    fn test_model_transform_ignores_roll() {
        let rolled = model_transform(Vec3::zeros(), &Orientation::new(45.0, 0.0, 0.0));
        assert_relative_eq!(rolled, Mat4::identity(), epsilon = 1e-6);
    }

    #[test]
    fn test_model_transform_is_pure() {
        let orientation = Orientation::new(0.0, 12.5, 271.0);
        let position = Vec3::new(-4.0, 0.5, 9.0);
        assert_eq!(
            model_transform(position, &orientation),
            model_transform(position, &orientation)
        );
    }

    #[test]
    fn test_view_transform_maps_eye_to_origin() {
        let eye = Vec3::new(-2.0, 0.0, 3.0);
        let forward = Vec3::new(0.6, 0.8, 0.0);
        let view = view_transform(eye, eye + forward, Vec3::z()).unwrap();

        let eye_in_view = view * Vec4::new(eye.x, eye.y, eye.z, 1.0);
        assert_relative_eq!(eye_in_view.xyz(), Vec3::zeros(), epsilon = 1e-5);

        // Looking down -Z in view space
        let ahead = view * Vec4::new(eye.x + forward.x, eye.y + forward.y, eye.z + forward.z, 1.0);
        assert_relative_eq!(ahead.xyz(), Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-5);
    }

    #[test]
    fn test_view_transform_rejects_parallel_up() {
        let eye = Vec3::zeros();
        let result = view_transform(eye, Vec3::new(0.0, 0.0, 5.0), Vec3::z());
        assert!(matches!(result, Err(TransformError::DegenerateBasis { .. })));
    }

    #[test]
    fn test_view_transform_rejects_zero_forward() {
        let eye = Vec3::new(1.0, 1.0, 1.0);
        assert!(view_transform(eye, eye, Vec3::z()).is_err());
    }

    #[test]
    fn test_view_transform_rejects_nan() {
        let eye = Vec3::new(f32::NAN, 0.0, 0.0);
        assert!(view_transform(eye, Vec3::x(), Vec3::z()).is_err());
    }

    #[test]
    fn test_perspective_projection_matches_gl_convention() {
        let projection = perspective_projection(45.0, 800.0 / 600.0, 0.1, 10.0);

        // Near plane maps to NDC depth -1, far plane to +1
        let near = projection * Vec4::new(0.0, 0.0, -0.1, 1.0);
        let far = projection * Vec4::new(0.0, 0.0, -10.0, 1.0);
        assert_relative_eq!(near.z / near.w, -1.0, epsilon = 1e-4);
        assert_relative_eq!(far.z / far.w, 1.0, epsilon = 1e-4);
    }
}
