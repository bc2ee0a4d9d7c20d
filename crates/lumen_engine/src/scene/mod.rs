//! Scene state
//!
//! Entities, point lights and the first-person camera, advanced once per
//! frame by the host loop and read by the render pipeline.
//!
//! ```text
//! host loop ──move/spin──▶ Scene ──update(dt)──▶ entities, lights, camera
//!                                   │
//!                                   └──read──▶ RenderPipeline
//! ```

pub mod entity;
pub mod light;
pub mod player;
#[allow(clippy::module_inception)]
mod scene;

pub use entity::{update_entity, Entity, EntityBehavior, Orientation};
pub use light::PointLight;
pub use player::Player;
pub use scene::{EntityKind, Scene};
