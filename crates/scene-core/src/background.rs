//! One mounted animated background.
//!
//! `Background` owns every piece of per-instance state (pool, pointer,
//! scene machine, palette, variants) and advances them in dependency order
//! on each `tick`: pointer transform, scene state, simulation, color.

use crate::camera::Camera;
use crate::color::{Palette, PointerDirection, ThemeColors};
use crate::config::SceneConfig;
use crate::constants::{FRAME_DT, MAX_SUBSTEPS};
use crate::entity::{entity_pool, Entity, EntityPool, ShapeKind};
use crate::instance::{as_floats, InstanceRaw};
use crate::pointer::{PointerState, PointerTracker, Viewport};
use crate::pool::PoolHandle;
use crate::scene_state::{SceneEvents, SceneState};
use crate::sim::{FrameInput, GridRisers, OrbitingSpheres, Simulation, TrailingRings};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Longest frame accepted by `tick`; anything beyond is treated as a stall.
const MAX_FRAME_DT: f32 = 0.25;

pub struct Background {
    config: SceneConfig,
    camera: Camera,
    pointer: PointerTracker,
    scene: SceneState,
    palette: Palette,
    direction: PointerDirection,
    pool: EntityPool,
    rng: StdRng,
    variants: [Box<dyn Simulation>; ShapeKind::COUNT],
    mounted_kind: Option<ShapeKind>,
    time: f32,
    sim_time: f32,
    accumulator: f32,
    instances: Vec<InstanceRaw>,
    disposed: bool,
}

impl Background {
    pub fn new(config: SceneConfig, viewport: Viewport) -> Self {
        let mut camera = Camera::default();
        camera.set_viewport_size(viewport.width, viewport.height);
        let pool = entity_pool(config.max_entities());
        let variants: [Box<dyn Simulation>; ShapeKind::COUNT] = [
            Box::new(OrbitingSpheres::new(config.sphere_count)),
            Box::new(GridRisers::new(config.grid_side)),
            Box::new(TrailingRings::new(config.trail_len())),
        ];
        let mut background = Self {
            camera,
            pointer: PointerTracker::with_timing(viewport, config.fallback_distance, config.pointer_idle_timeout),
            scene: SceneState::new(&config),
            palette: Palette::from_theme(&config.theme),
            direction: PointerDirection::default(),
            pool,
            rng: StdRng::seed_from_u64(config.seed),
            variants,
            mounted_kind: None,
            time: 0.0,
            sim_time: 0.0,
            accumulator: 0.0,
            instances: Vec::with_capacity(config.max_entities()),
            disposed: false,
            config,
        };
        background.sync_variant();
        background
    }

    /// Mount the variant the scene machine selects if it is not mounted yet.
    fn sync_variant(&mut self) {
        let kind = self.scene.active_kind();
        if self.mounted_kind == Some(kind) {
            return;
        }
        if let Some(old) = self.mounted_kind.take() {
            self.variants[old.index()].unmount(&mut self.pool);
        }
        self.variants[kind.index()].mount(&mut self.pool, &mut self.rng);
        self.mounted_kind = Some(kind);
        self.accumulator = 0.0;
        log::debug!(
            "[scene] mounted {} ({} entities, pool {}/{})",
            kind.label(),
            self.variants[kind.index()].handles().len(),
            self.pool.in_use_len(),
            self.pool.capacity()
        );
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if self.disposed {
            return;
        }
        self.pointer.on_move(Vec2::new(x, y));
        if self.scene.interaction_enabled() && self.pointer.state().is_active {
            self.scene.note_pointer_activity();
        }
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        if self.disposed {
            return;
        }
        self.pointer.on_down(Vec2::new(x, y));
        self.scene.set_dragging(true);
    }

    pub fn pointer_up(&mut self) {
        self.pointer.on_up();
        self.scene.set_dragging(false);
    }

    pub fn pointer_leave(&mut self) {
        self.pointer.on_leave();
        self.scene.set_dragging(false);
    }

    /// Discrete user action: switch to the next scene. Returns whether the
    /// scene changed.
    pub fn advance_scene(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        let changed = self.scene.advance_scene();
        if changed {
            self.sync_variant();
        }
        changed
    }

    pub fn set_theme(&mut self, theme: &ThemeColors) {
        self.palette = Palette::from_theme(theme);
        self.config.theme = theme.clone();
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.camera.set_viewport_size(viewport.width, viewport.height);
        self.pointer.set_viewport(viewport);
    }

    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    pub fn set_interaction_enabled(&mut self, enabled: bool) {
        self.scene.set_interaction_enabled(enabled);
    }

    /// Advance everything by `dt` seconds and rebuild the instance list.
    pub fn tick(&mut self, dt: f32) {
        if self.disposed {
            return;
        }
        let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };
        self.time += dt;

        self.pointer.tick(dt, &self.camera);
        self.scene.tick(dt);
        self.sync_variant();
        let pointer = *self.pointer.state();
        self.direction.update(pointer.world);

        let Some(kind) = self.mounted_kind else {
            return;
        };
        let variant = &mut self.variants[kind.index()];

        if self.scene.is_transitioning() {
            self.accumulator = 0.0;
        } else {
            self.accumulator += dt;
            let mut steps = 0;
            while self.accumulator + 1e-6 >= FRAME_DT && steps < MAX_SUBSTEPS {
                self.sim_time += FRAME_DT;
                let input = FrameInput {
                    pointer: &pointer,
                    scene: &self.scene,
                    palette: &self.palette,
                    direction: &self.direction,
                    time: self.sim_time,
                    dt: FRAME_DT,
                };
                variant.step(&input, &mut self.pool, &mut self.rng);
                self.accumulator -= FRAME_DT;
                steps += 1;
            }
            if steps == MAX_SUBSTEPS {
                self.accumulator = self.accumulator.min(FRAME_DT);
            }
        }

        let input = FrameInput {
            pointer: &pointer,
            scene: &self.scene,
            palette: &self.palette,
            direction: &self.direction,
            time: self.time,
            dt,
        };
        variant.shade(&input, &mut self.pool);

        self.instances.clear();
        variant.write_instances(&self.pool, &mut self.instances);
    }

    /// Release every entity, cancel all timers and stop ticking.
    pub fn unmount(&mut self) {
        if self.disposed {
            return;
        }
        for variant in self.variants.iter_mut() {
            variant.unmount(&mut self.pool);
        }
        self.mounted_kind = None;
        self.scene.cancel_timers();
        self.direction.reset();
        self.instances.clear();
        self.disposed = true;
        log::info!("[scene] background unmounted");
    }

    pub fn drain_events(&mut self) -> SceneEvents {
        self.scene.drain_events()
    }

    pub fn instances(&self) -> &[InstanceRaw] {
        &self.instances
    }

    /// Instance data as a flat float slice for the renderer.
    pub fn instance_floats(&self) -> &[f32] {
        as_floats(&self.instances)
    }

    /// Live entities of the mounted variant in draw order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> + '_ {
        let handles: &[PoolHandle] = match self.mounted_kind {
            Some(kind) => self.variants[kind.index()].handles(),
            None => &[],
        };
        handles.iter().filter_map(|h| self.pool.get_ref(*h))
    }

    pub fn active_kind(&self) -> ShapeKind {
        self.scene.active_kind()
    }
    pub fn mounted_kind(&self) -> Option<ShapeKind> {
        self.mounted_kind
    }
    pub fn scene(&self) -> &SceneState {
        &self.scene
    }
    pub fn pointer(&self) -> &PointerState {
        self.pointer.state()
    }
    pub fn pool(&self) -> &EntityPool {
        &self.pool
    }
    pub fn palette(&self) -> &Palette {
        &self.palette
    }
    pub fn camera(&self) -> &Camera {
        &self.camera
    }
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }
    pub fn time(&self) -> f32 {
        self.time
    }
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}
