//! The authoritative world state
//!
//! A [`Scene`] owns every entity (bucketed by [`EntityKind`]), the point
//! lights and the single camera. The host loop mutates it through
//! [`Scene::move_player`], [`Scene::spin_player`] and [`Scene::update`]; the
//! render pipeline only reads it.

use std::collections::BTreeMap;

use crate::core::config::SceneConfig;
use crate::foundation::math::Vec3;
use crate::scene::entity::{Entity, Orientation};
use crate::scene::light::PointLight;
use crate::scene::player::Player;

/// Entity type tag
///
/// Buckets are visited in declaration order; within a bucket, insertion order
/// is draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityKind {
    /// Textured, spinning cube
    Cube,
    /// Medkit billboard
    Medkit,
    /// Light marker billboard
    PointLight,
}

/// World entities, lights and the camera
#[derive(Debug, Clone)]
pub struct Scene {
    entities: BTreeMap<EntityKind, Vec<Entity>>,
    lights: Vec<PointLight>,
    player: Player,
}

impl Scene {
    /// Build the fixed startup layout
    ///
    /// One spinning cube, one medkit billboard, red/green/blue point lights
    /// above them and the camera at the configured start position.
    pub fn new(config: &SceneConfig) -> Self {
        let mut scene = Self::empty(config);

        scene.add_entity(
            EntityKind::Cube,
            Entity::rotating(Vec3::new(0.0, 0.0, 1.0), Orientation::default(), config.cube_degrees_per_tick),
        );
        scene.add_entity(EntityKind::Medkit, Entity::billboard(Vec3::new(0.0, 0.0, 2.5)));

        scene.add_light(PointLight::new(Vec3::new(0.0, 0.0, 4.0), Vec3::new(1.0, 0.0, 0.0), 3.0));
        scene.add_light(PointLight::new(Vec3::new(0.5, 0.0, 4.0), Vec3::new(0.0, 1.0, 0.0), 3.0));
        scene.add_light(PointLight::new(Vec3::new(-0.5, 0.0, 4.0), Vec3::new(0.0, 0.0, 1.0), 3.0));

        log::info!(
            "Scene created: {} entities, {} lights, camera at {:?}",
            scene.entity_count(),
            scene.lights.len(),
            scene.player.position
        );
        scene
    }

    /// A scene holding only the camera
    pub fn empty(config: &SceneConfig) -> Self {
        Self {
            entities: BTreeMap::new(),
            lights: Vec::new(),
            player: Player::new(config),
        }
    }

    /// Append an entity to the bucket of its kind
    pub fn add_entity(&mut self, kind: EntityKind, entity: Entity) {
        self.entities.entry(kind).or_default().push(entity);
    }

    /// Append a point light
    pub fn add_light(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    /// Advance the world by `dt` reference ticks
    ///
    /// Entities and lights see the camera position from before this tick;
    /// the camera is updated last.
    pub fn update(&mut self, dt: f32) {
        let camera_position = self.player.position;

        for entity in self.entities.values_mut().flatten() {
            entity.update(dt, camera_position);
        }
        for light in &mut self.lights {
            light.update(dt, camera_position);
        }
        self.player.update(dt);
    }

    /// Move the camera along its basis (`x` forward, `y` right, `z` up)
    pub fn move_player(&mut self, local_delta: Vec3) {
        self.player.move_by(local_delta);
    }

    /// Turn the camera by the given Euler deltas
    pub fn spin_player(&mut self, delta: Orientation) {
        self.player.spin(delta);
    }

    /// The camera
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Entity buckets in draw order
    pub fn entities(&self) -> &BTreeMap<EntityKind, Vec<Entity>> {
        &self.entities
    }

    /// Entities of one kind (empty when the bucket does not exist)
    pub fn entities_of(&self, kind: EntityKind) -> &[Entity] {
        self.entities.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Point lights in insertion order
    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    /// Total number of entities across all buckets
    pub fn entity_count(&self) -> usize {
        self.entities.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_initial_layout() {
        let scene = Scene::new(&SceneConfig::default());

        assert_eq!(scene.entities_of(EntityKind::Cube).len(), 1);
        assert_eq!(scene.entities_of(EntityKind::Medkit).len(), 1);
        assert!(scene.entities_of(EntityKind::PointLight).is_empty());
        assert_eq!(scene.lights().len(), 3);
        assert_eq!(scene.player().position, Vec3::new(-2.0, 0.0, 3.0));

        let colors: Vec<Vec3> = scene.lights().iter().map(|l| l.color).collect();
        assert_eq!(colors, vec![Vec3::x(), Vec3::y(), Vec3::z()]);
    }

    #[test]
    fn test_zero_tick_changes_nothing_observable() {
        let mut scene = Scene::new(&SceneConfig::default());
        let camera_before = scene.player().position;

        scene.update(0.0);

        assert_eq!(scene.entities_of(EntityKind::Cube)[0].orientation.yaw, 0.0);
        assert_eq!(scene.player().position, camera_before);
    }

    #[test]
    fn test_update_spins_cube_and_faces_billboards() {
        let mut scene = Scene::new(&SceneConfig::default());
        scene.update(4.0);

        assert_relative_eq!(scene.entities_of(EntityKind::Cube)[0].orientation.yaw, 1.0);

        // Medkit at (0,0,2.5) seen from (-2,0,3): straight ahead along +X, slightly below
        let medkit = &scene.entities_of(EntityKind::Medkit)[0];
        assert_relative_eq!(medkit.orientation.yaw, 0.0, epsilon = 1e-5);
        assert_relative_eq!(medkit.orientation.pitch, (-0.5f32).atan2(2.0).to_degrees(), epsilon = 1e-4);
    }

    #[test]
    fn test_billboards_use_previous_camera_position() {
        let mut scene = Scene::new(&SceneConfig::default());
        scene.update(1.0);
        let yaw_before = scene.entities_of(EntityKind::Medkit)[0].orientation.yaw;

        scene.move_player(Vec3::new(0.0, 1.0, 0.0));
        // The billboard tracks the moved camera only once update runs
        assert_eq!(scene.entities_of(EntityKind::Medkit)[0].orientation.yaw, yaw_before);

        scene.update(1.0);
        assert!(scene.entities_of(EntityKind::Medkit)[0].orientation.yaw != yaw_before);
    }

    #[test]
    fn test_move_player_forward() {
        let mut scene = Scene::new(&SceneConfig::default());
        scene.update(0.0);
        scene.move_player(Vec3::new(1.0, 0.0, 0.0));

        assert_relative_eq!(scene.player().position, Vec3::new(-1.0, 0.0, 3.0), epsilon = 1e-6);
    }

    #[test]
    fn test_spin_player_takes_effect_after_update() {
        let mut scene = Scene::new(&SceneConfig::default());
        scene.spin_player(Orientation::new(0.0, 0.0, 90.0));
        assert_relative_eq!(scene.player().forward(), Vec3::x(), epsilon = 1e-6);

        scene.update(0.0);
        assert_relative_eq!(scene.player().forward(), Vec3::y(), epsilon = 1e-6);
    }

    #[test]
    fn test_bucket_insertion_order_is_draw_order() {
        let mut scene = Scene::empty(&SceneConfig::default());
        scene.add_entity(EntityKind::Medkit, Entity::billboard(Vec3::new(1.0, 0.0, 0.0)));
        scene.add_entity(EntityKind::Cube, Entity::fixed(Vec3::new(2.0, 0.0, 0.0), Orientation::default()));
        scene.add_entity(EntityKind::Cube, Entity::fixed(Vec3::new(3.0, 0.0, 0.0), Orientation::default()));

        let order: Vec<(EntityKind, f32)> = scene
            .entities()
            .iter()
            .flat_map(|(kind, list)| list.iter().map(move |e| (*kind, e.position.x)))
            .collect();
        assert_eq!(
            order,
            vec![(EntityKind::Cube, 2.0), (EntityKind::Cube, 3.0), (EntityKind::Medkit, 1.0)]
        );
        assert_eq!(scene.entity_count(), 3);
    }
}
