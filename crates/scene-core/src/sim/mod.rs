//! Per-variant entity simulations.
//!
//! Each variant owns the handles it checked out of the shared entity pool and
//! exposes the same mount / step / shade / unmount contract to `Background`.

pub mod grid;
pub mod rings;
pub mod spheres;

pub use grid::GridRisers;
pub use rings::TrailingRings;
pub use spheres::OrbitingSpheres;

use crate::color::{Palette, PointerDirection};
use crate::entity::{EntityPool, ShapeKind};
use crate::instance::InstanceRaw;
use crate::pointer::PointerState;
use crate::pool::PoolHandle;
use crate::scene_state::SceneState;
use rand::rngs::StdRng;

/// Read-only inputs for one simulation step.
pub struct FrameInput<'a> {
    pub pointer: &'a PointerState,
    pub scene: &'a SceneState,
    pub palette: &'a Palette,
    pub direction: &'a PointerDirection,
    /// Scene clock in seconds.
    pub time: f32,
    /// Length of this step in seconds.
    pub dt: f32,
}

impl FrameInput<'_> {
    /// Pointer forces apply only while the pointer is live and interaction
    /// is enabled.
    #[inline]
    pub fn pointer_engaged(&self) -> bool {
        self.pointer.is_active && self.scene.interaction_enabled() && self.pointer.world.is_finite()
    }

    #[inline]
    pub fn fun_mode(&self) -> bool {
        self.scene.easter_egg_active()
    }
}

pub trait Simulation {
    fn kind(&self) -> ShapeKind;

    /// Check out and place this variant's entities.
    fn mount(&mut self, pool: &mut EntityPool, rng: &mut StdRng);

    /// Return every entity this variant holds to the pool.
    fn unmount(&mut self, pool: &mut EntityPool);

    /// Advance physics by one fixed step.
    fn step(&mut self, input: &FrameInput<'_>, pool: &mut EntityPool, rng: &mut StdRng);

    /// Refresh material colors for the current frame.
    fn shade(&mut self, input: &FrameInput<'_>, pool: &mut EntityPool);

    /// Live entity handles in draw order.
    fn handles(&self) -> &[PoolHandle];

    fn is_mounted(&self) -> bool {
        !self.handles().is_empty()
    }

    fn write_instances(&self, pool: &EntityPool, out: &mut Vec<InstanceRaw>) {
        out.extend(
            self.handles()
                .iter()
                .filter_map(|h| pool.get_ref(*h))
                .map(InstanceRaw::from),
        );
    }
}

/// Release a list of handles back to `pool` and clear it.
pub(crate) fn release_handles(handles: &mut Vec<PoolHandle>, pool: &mut EntityPool) {
    for handle in handles.drain(..) {
        pool.release(handle);
    }
}
