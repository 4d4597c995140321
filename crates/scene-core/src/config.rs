use crate::color::ThemeColors;
use crate::constants::*;
use crate::entity::ShapeKind;

/// Tunables for one mounted background. `Default` is the desktop profile;
/// [`SceneConfig::compact`] is the reduced mobile profile.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub initial_kind: ShapeKind,
    pub sphere_count: usize,
    pub grid_side: usize,
    pub trail_capacity: usize,
    pub transition_duration: f32,
    pub easter_egg_threshold: u32,
    pub easter_egg_duration: f32,
    pub burst_window: f32,
    pub pointer_idle_timeout: f32,
    pub fallback_distance: f32,
    /// Advance to the next scene after this many idle seconds.
    pub auto_advance: Option<f32>,
    pub seed: u64,
    pub theme: ThemeColors,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            initial_kind: ShapeKind::Sphere,
            sphere_count: SPHERE_COUNT_DESKTOP,
            grid_side: GRID_SIDE_DESKTOP,
            trail_capacity: TRAIL_CAPACITY_DESKTOP,
            transition_duration: TRANSITION_DURATION_SEC,
            easter_egg_threshold: EASTER_EGG_THRESHOLD,
            easter_egg_duration: EASTER_EGG_DURATION_SEC,
            burst_window: BURST_WINDOW_SEC,
            pointer_idle_timeout: POINTER_IDLE_TIMEOUT_SEC,
            fallback_distance: FALLBACK_RAY_DISTANCE,
            auto_advance: None,
            seed: 0x5EED_CAFE,
            theme: ThemeColors::default(),
        }
    }
}

impl SceneConfig {
    pub fn compact() -> Self {
        Self {
            sphere_count: SPHERE_COUNT_COMPACT,
            grid_side: GRID_SIDE_COMPACT,
            trail_capacity: TRAIL_CAPACITY_COMPACT,
            ..Self::default()
        }
    }

    pub fn for_device(compact: bool) -> Self {
        if compact {
            Self::compact()
        } else {
            Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[inline]
    pub fn trail_len(&self) -> usize {
        self.trail_capacity.clamp(TRAIL_CAPACITY_MIN, TRAIL_CAPACITY_MAX)
    }

    #[inline]
    pub fn grid_cells(&self) -> usize {
        self.grid_side * self.grid_side
    }

    /// Entities the busiest variant needs live at once; the entity pool is
    /// pre-sized to this. A full trail briefly holds one extra ring while the
    /// oldest is evicted.
    pub fn max_entities(&self) -> usize {
        self.sphere_count.max(self.grid_cells()).max(self.trail_len() + 1)
    }
}
