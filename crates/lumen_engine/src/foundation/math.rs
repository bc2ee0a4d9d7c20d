//! Math utilities and types
//!
//! Provides fundamental math types for 3D graphics. World space is Z-up and
//! right-handed; clip space follows OpenGL conventions (depth in [-1, 1]).

pub use nalgebra::{Matrix4, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;

    /// Lengths below this are treated as zero when building bases
    pub const BASIS_EPSILON: f32 = 1e-6;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Wrap an angle in degrees into `[0, 360)`
    pub fn wrap_degrees(degrees: f32) -> f32 {
        let wrapped = degrees.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360 for tiny negative inputs
        if wrapped >= 360.0 { 0.0 } else { wrapped }
    }
}

/// Extension trait for Mat4 with additional convenience methods
///
/// Rotation angles are in degrees and turn clockwise about their axis when
/// looking down the axis toward the origin: a positive Z rotation carries +X
/// toward -Y, a positive Y rotation carries +X toward +Z.
pub trait Mat4Ext {
    /// Create a rotation matrix around the Y axis
    fn rotation_y(degrees: f32) -> Mat4;

    /// Create a rotation matrix around the Z axis
    fn rotation_z(degrees: f32) -> Mat4;

    /// Create an OpenGL perspective projection matrix (vertical FOV in radians)
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create a right-handed look-at view matrix
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn rotation_y(degrees: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), -utils::deg_to_rad(degrees))
    }

    fn rotation_z(degrees: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::z_axis(), -utils::deg_to_rad(degrees))
    }

    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::new_perspective(aspect, fov_y, near, far)
    }

    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        Mat4::look_at_rh(&Point3::from(eye), &Point3::from(target), &up)
    }
}
