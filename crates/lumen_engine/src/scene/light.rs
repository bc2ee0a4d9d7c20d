//! Point lights
//!
//! A point light is a camera-facing billboard (its visible marker) plus the
//! colour and strength uploaded to the standard pass.

use crate::foundation::math::{Mat4, Vec3};
use crate::scene::entity::Entity;

/// Point light with a billboard marker
#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    /// Marker billboard; its position is the light position
    pub billboard: Entity,
    /// Colour as unit-range RGB
    pub color: Vec3,
    /// Light strength, never negative
    pub strength: f32,
}

impl PointLight {
    /// Create a point light
    ///
    /// Colour components are clamped to `[0, 1]` and strength to `>= 0`.
    pub fn new(position: Vec3, color: Vec3, strength: f32) -> Self {
        Self {
            billboard: Entity::billboard(position),
            color: color.map(|c| c.clamp(0.0, 1.0)),
            strength: strength.max(0.0),
        }
    }

    /// Light position in world space
    pub fn position(&self) -> Vec3 {
        self.billboard.position
    }

    /// Turn the marker toward the camera
    pub fn update(&mut self, dt: f32, camera_position: Vec3) {
        self.billboard.update(dt, camera_position);
    }

    /// Model transform of the marker billboard
    pub fn model_transform(&self) -> Mat4 {
        self.billboard.model_transform()
    }
}
