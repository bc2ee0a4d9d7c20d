//! World entities and their per-tick behaviour
//!
//! Every entity is the same record: a position, an orientation and a
//! capability tag. [`update_entity`] dispatches the per-tick behaviour on the
//! tag, so static props, spinning props and camera-facing billboards share one
//! storage type.

use crate::foundation::math::{constants, utils, Mat4, Vec3};
use crate::foundation::transform;

/// Euler angles in degrees
///
/// Roll is carried for completeness but never applied to entity transforms.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Orientation {
    /// Rotation about the forward axis (unused)
    pub roll: f32,
    /// Rotation about world Y, applied before yaw
    pub pitch: f32,
    /// Rotation about world Z
    pub yaw: f32,
}

impl Orientation {
    /// Create an orientation from `(roll, pitch, yaw)` degrees
    pub const fn new(roll: f32, pitch: f32, yaw: f32) -> Self {
        Self { roll, pitch, yaw }
    }
}

impl std::ops::Add for Orientation {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.roll + rhs.roll, self.pitch + rhs.pitch, self.yaw + rhs.yaw)
    }
}

/// Per-tick behaviour of an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityBehavior {
    /// Never changes after construction
    Static,
    /// Spins about world Z
    Rotating {
        /// Yaw added per reference tick
        degrees_per_tick: f32,
    },
    /// Turns its local +X axis along the line of sight from the camera
    BillboardFacing,
}

/// A positioned, oriented object in the world
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Position in world units
    pub position: Vec3,
    /// Orientation in degrees
    pub orientation: Orientation,
    /// Per-tick behaviour
    pub behavior: EntityBehavior,
}

impl Entity {
    /// Create an entity that never moves
    pub fn fixed(position: Vec3, orientation: Orientation) -> Self {
        Self { position, orientation, behavior: EntityBehavior::Static }
    }

    /// Create an entity spinning about world Z
    pub fn rotating(position: Vec3, orientation: Orientation, degrees_per_tick: f32) -> Self {
        Self {
            position,
            orientation,
            behavior: EntityBehavior::Rotating { degrees_per_tick },
        }
    }

    /// Create a billboard that faces the camera every tick
    pub fn billboard(position: Vec3) -> Self {
        Self {
            position,
            orientation: Orientation::default(),
            behavior: EntityBehavior::BillboardFacing,
        }
    }

    /// Advance the entity by `dt` reference ticks
    pub fn update(&mut self, dt: f32, camera_position: Vec3) {
        update_entity(self, dt, camera_position);
    }

    /// Local-to-world transform for the current state
    pub fn model_transform(&self) -> Mat4 {
        transform::model_transform(self.position, &self.orientation)
    }
}

/// Apply the behaviour selected by the entity's tag
pub fn update_entity(entity: &mut Entity, dt: f32, camera_position: Vec3) {
    match entity.behavior {
        EntityBehavior::Static => {}
        EntityBehavior::Rotating { degrees_per_tick } => {
            entity.orientation.yaw = utils::wrap_degrees(entity.orientation.yaw + degrees_per_tick * dt);
        }
        EntityBehavior::BillboardFacing => {
            if let Some(facing) = facing_orientation(entity.position, camera_position) {
                entity.orientation.yaw = facing.yaw;
                entity.orientation.pitch = facing.pitch;
            }
        }
    }
}

/// Orientation turning a billboard at `position` toward `camera_position`
///
/// Returns `None` when the camera sits on the billboard and the direction is
/// undefined; callers keep the previous orientation in that case.
pub fn facing_orientation(position: Vec3, camera_position: Vec3) -> Option<Orientation> {
    let offset = position - camera_position;
    let horizontal = offset.x.hypot(offset.y);

    if horizontal < constants::BASIS_EPSILON && offset.z.abs() < constants::BASIS_EPSILON {
        return None;
    }

    Some(Orientation::new(
        0.0,
        utils::rad_to_deg(offset.z.atan2(horizontal)),
        utils::rad_to_deg((-offset.y).atan2(offset.x)),
    ))
}
