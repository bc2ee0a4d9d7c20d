//! Two-pass render pipeline
//!
//! The standard pass draws every entity bucket that has a registered visual
//! with textures and point lighting. The emissive pass then draws one flat
//! tinted marker per light. Both passes share the view transform computed
//! once per frame from the camera.

use std::collections::BTreeMap;

use crate::assets::ShaderSource;
use crate::core::config::{AssetConfig, RenderConfig, SHADER_LIGHT_SLOTS};
use crate::foundation::math::{Mat4, Vec3};
use crate::foundation::transform;
use crate::render::device::{GraphicsDevice, UniformSlot};
use crate::render::material::Material;
use crate::render::mesh::{Mesh, MeshData};
use crate::render::shader::{ShaderProgram, UniformKind};
use crate::render::RenderResult;
use crate::scene::{EntityKind, Scene};
use std::path::Path;

/// Counters for the most recent frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    /// Draw calls across both passes
    pub draw_calls: usize,
    /// Lights bound to `Lights[i]` slots
    pub lights_uploaded: usize,
    /// Lights beyond the slot capacity
    pub lights_dropped: usize,
}

/// Material and mesh drawn for one entity kind
#[derive(Debug)]
struct Visual {
    material: Material,
    mesh: Mesh,
}

impl Visual {
    fn load<D: GraphicsDevice>(device: &mut D, texture: &Path, data: &MeshData) -> RenderResult<Self> {
        let material = Material::load(device, texture)?;
        match Mesh::upload(device, data) {
            Ok(mesh) => Ok(Self { material, mesh }),
            Err(err) => {
                material.destroy(device);
                Err(err)
            }
        }
    }
}

/// Owns the GPU resources and draws a scene each frame
pub struct RenderPipeline<D: GraphicsDevice> {
    device: D,
    standard: ShaderProgram,
    emissive: ShaderProgram,
    visuals: BTreeMap<EntityKind, Visual>,
    clear_color: [f32; 4],
    max_lights: usize,
    stats: RenderStats,
    truncation_reported: bool,
}

impl<D: GraphicsDevice> RenderPipeline<D> {
    /// Build programs, materials and meshes on `device`
    ///
    /// Any unreadable shader, texture or mesh file aborts construction.
    pub fn new(mut device: D, config: &RenderConfig, assets: &AssetConfig) -> RenderResult<Self> {
        log::info!("Creating render pipeline");
        device.setup();

        let standard_source = ShaderSource::from_config(&config.standard_shader)?;
        let emissive_source = ShaderSource::from_config(&config.emissive_shader)?;
        let standard = ShaderProgram::compile(&mut device, "standard", &standard_source)?;
        let emissive = match ShaderProgram::compile(&mut device, "emissive", &emissive_source) {
            Ok(program) => program,
            Err(err) => {
                standard.destroy(&mut device);
                return Err(err);
            }
        };

        let mut visuals = BTreeMap::new();
        if let Err(err) = load_visuals(&mut device, assets, &mut visuals) {
            log::debug!("Releasing partially built pipeline: {}", err);
            release_visuals(&mut device, visuals);
            standard.destroy(&mut device);
            emissive.destroy(&mut device);
            return Err(err);
        }

        let mut pipeline = Self {
            device,
            standard,
            emissive,
            visuals,
            clear_color: config.clear_color,
            max_lights: config.max_lights.min(SHADER_LIGHT_SLOTS),
            stats: RenderStats::default(),
            truncation_reported: false,
        };

        let projection = transform::perspective_projection(
            config.fov_y_degrees,
            pipeline.device.aspect_ratio(),
            config.near,
            config.far,
        );
        pipeline.set_onetime_uniforms(&projection);
        pipeline.cache_uniform_slots();

        log::info!(
            "Render pipeline ready: {} visuals, {} light slots",
            pipeline.visuals.len(),
            pipeline.max_lights
        );
        Ok(pipeline)
    }

    fn set_onetime_uniforms(&mut self, projection: &Mat4) {
        for program in [&self.standard, &self.emissive] {
            program.bind(&mut self.device);
            if let Some(slot) = self.device.uniform_location(program.handle(), UniformKind::ImageTexture.name()) {
                self.device.set_uniform_i32(slot, 0);
            }
            if let Some(slot) = self.device.uniform_location(program.handle(), UniformKind::Projection.name()) {
                self.device.set_uniform_mat4(slot, projection);
            }
        }
    }

    fn cache_uniform_slots(&mut self) {
        self.standard.bind(&mut self.device);
        self.standard.cache_uniforms(
            &mut self.device,
            &[UniformKind::CameraPosition, UniformKind::Model, UniformKind::View],
        );
        self.standard.cache_light_slots(&mut self.device, self.max_lights);

        self.emissive.bind(&mut self.device);
        self.emissive.cache_uniforms(
            &mut self.device,
            &[UniformKind::Model, UniformKind::View, UniformKind::Tint],
        );
    }

    /// Draw one frame: clear, standard pass, emissive pass, flush
    ///
    /// An invalid camera basis fails before anything is drawn.
    pub fn render(&mut self, scene: &Scene) -> RenderResult<()> {
        let view = scene.player().view_transform()?;
        let mut stats = RenderStats::default();

        self.device.begin_frame(self.clear_color);
        self.standard_pass(scene, &view, &mut stats);
        self.emissive_pass(scene, &view, &mut stats);
        self.device.end_frame();

        log::trace!(
            "Frame drawn: {} draw calls, {} lights",
            stats.draw_calls,
            stats.lights_uploaded
        );
        self.stats = stats;
        Ok(())
    }

    fn standard_pass(&mut self, scene: &Scene, view: &Mat4, stats: &mut RenderStats) {
        let device = &mut self.device;
        let program = &self.standard;
        program.bind(device);

        upload_mat4(device, program.slot(UniformKind::View), view);
        upload_vec3(device, program.slot(UniformKind::CameraPosition), &scene.player().position);

        let lights = scene.lights();
        let bound = lights.len().min(program.light_capacity());
        for (index, light) in lights.iter().take(bound).enumerate() {
            if let Some(slots) = program.light(index) {
                upload_vec3(device, slots.position, &light.position());
                upload_vec3(device, slots.color, &light.color);
                if let Some(slot) = slots.strength {
                    device.set_uniform_f32(slot, light.strength);
                }
            }
        }
        stats.lights_uploaded = bound;
        stats.lights_dropped = lights.len() - bound;

        if stats.lights_dropped > 0 && !self.truncation_reported {
            log::debug!(
                "Scene has {} lights; only the first {} are bound",
                lights.len(),
                bound
            );
            self.truncation_reported = true;
        }

        for (kind, entities) in scene.entities() {
            if entities.is_empty() {
                continue;
            }
            let Some(visual) = self.visuals.get(kind) else {
                log::trace!("No visual registered for {:?}, skipping {} entities", kind, entities.len());
                continue;
            };

            visual.material.bind(device);
            visual.mesh.bind(device);
            for entity in entities {
                upload_mat4(device, program.slot(UniformKind::Model), &entity.model_transform());
                visual.mesh.draw(device);
                stats.draw_calls += 1;
            }
        }
    }

    fn emissive_pass(&mut self, scene: &Scene, view: &Mat4, stats: &mut RenderStats) {
        let device = &mut self.device;
        let program = &self.emissive;
        program.bind(device);

        upload_mat4(device, program.slot(UniformKind::View), view);

        let Some(marker) = self.visuals.get(&EntityKind::PointLight) else {
            return;
        };
        marker.material.bind(device);
        marker.mesh.bind(device);

        for light in scene.lights() {
            upload_vec3(device, program.slot(UniformKind::Tint), &light.color);
            upload_mat4(device, program.slot(UniformKind::Model), &light.model_transform());
            marker.mesh.draw(device);
            stats.draw_calls += 1;
        }
    }

    /// Draw entities of `kind` with this material and mesh
    ///
    /// Replaces and releases any visual already registered for the kind.
    pub fn register_visual(&mut self, kind: EntityKind, material: Material, mesh: Mesh) {
        if let Some(old) = self.visuals.insert(kind, Visual { material, mesh }) {
            old.mesh.destroy(&mut self.device);
            old.material.destroy(&mut self.device);
        }
        log::debug!("Registered visual for {:?}", kind);
    }

    /// Stop drawing entities of `kind` and release its visual
    pub fn unregister_visual(&mut self, kind: EntityKind) -> bool {
        match self.visuals.remove(&kind) {
            Some(visual) => {
                visual.mesh.destroy(&mut self.device);
                visual.material.destroy(&mut self.device);
                true
            }
            None => false,
        }
    }

    /// Counters of the last frame rendered
    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    /// Device access for creating additional materials and meshes
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }
}

impl<D: GraphicsDevice> Drop for RenderPipeline<D> {
    fn drop(&mut self) {
        log::info!("Releasing render pipeline resources");
        release_visuals(&mut self.device, std::mem::take(&mut self.visuals));
        self.device.destroy_program(self.standard.handle());
        self.device.destroy_program(self.emissive.handle());
    }
}

/// Cube, medkit and light marker visuals, inserted as each one finishes loading
fn load_visuals<D: GraphicsDevice>(
    device: &mut D,
    assets: &AssetConfig,
    visuals: &mut BTreeMap<EntityKind, Visual>,
) -> RenderResult<()> {
    let cube = MeshData::from_obj(&assets.cube_mesh)?;
    visuals.insert(EntityKind::Cube, Visual::load(device, &assets.cube_texture, &cube)?);

    let medkit = MeshData::rect(assets.medkit_size[0], assets.medkit_size[1]);
    visuals.insert(EntityKind::Medkit, Visual::load(device, &assets.medkit_texture, &medkit)?);

    let marker = MeshData::rect(assets.light_size[0], assets.light_size[1]);
    visuals.insert(EntityKind::PointLight, Visual::load(device, &assets.light_texture, &marker)?);
    Ok(())
}

/// Meshes first, then textures
fn release_visuals<D: GraphicsDevice>(device: &mut D, visuals: BTreeMap<EntityKind, Visual>) {
    let (materials, meshes): (Vec<_>, Vec<_>) = visuals
        .into_values()
        .map(|visual| (visual.material, visual.mesh))
        .unzip();
    for mesh in meshes {
        mesh.destroy(device);
    }
    for material in materials {
        material.destroy(device);
    }
}

fn upload_mat4<D: GraphicsDevice>(device: &mut D, slot: Option<UniformSlot>, value: &Mat4) {
    if let Some(slot) = slot {
        device.set_uniform_mat4(slot, value);
    }
}

fn upload_vec3<D: GraphicsDevice>(device: &mut D, slot: Option<UniformSlot>, value: &Vec3) {
    if let Some(slot) = slot {
        device.set_uniform_vec3(slot, value);
    }
}
