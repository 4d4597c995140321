//! Screen-to-world pointer transform.
//!
//! Input handlers only write raw screen samples into the tracker; the frame
//! tick turns the latest sample into normalized coordinates, a camera ray, a
//! world position on the reference plane and a world velocity.

use crate::camera::{Camera, Ray};
use crate::constants::{
    FALLBACK_RAY_DISTANCE, POINTER_IDLE_TIMEOUT_SEC, POINTER_MOVED_WINDOW_SEC, VELOCITY_MIN_DT_SEC,
};
use glam::{Vec2, Vec3};

/// Client-space rectangle of the drawing surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width,
            height,
        }
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite()) || self.width <= 0.0 || self.height <= 0.0
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width * 0.5, self.top + self.height * 0.5)
    }
}

/// Map client coordinates to [-1, 1] on both axes with Y pointing up.
/// Returns `None` for a zero-size viewport or non-finite input.
pub fn normalize_screen(screen: Vec2, viewport: &Viewport) -> Option<Vec2> {
    if viewport.is_degenerate() || !screen.is_finite() {
        return None;
    }
    let x = ((screen.x - viewport.left) / viewport.width) * 2.0 - 1.0;
    let y = -(((screen.y - viewport.top) / viewport.height) * 2.0 - 1.0);
    Some(Vec2::new(x, y))
}

/// Inverse of [`normalize_screen`].
pub fn ndc_to_screen(ndc: Vec2, viewport: &Viewport) -> Vec2 {
    Vec2::new(
        viewport.left + (ndc.x + 1.0) * 0.5 * viewport.width,
        viewport.top + (1.0 - ndc.y) * 0.5 * viewport.height,
    )
}

/// Plane `normal · p + d = 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub d: f32,
}

impl Plane {
    /// Plane through the origin facing the camera.
    pub fn facing(camera: &Camera) -> Self {
        Self {
            normal: -camera.forward(),
            d: 0.0,
        }
    }

    /// Distance along `ray` to the plane, or `None` when the ray is parallel
    /// to it or points away from it.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() < 1e-6 {
            return None;
        }
        let t = -(self.normal.dot(ray.origin) + self.d) / denom;
        (t >= 0.0 && t.is_finite()).then_some(t)
    }
}

#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Cast `ndc` through the camera and intersect the plane, projecting to
/// `fallback_distance` along the ray when there is no hit.
pub fn world_on_plane(camera: &Camera, plane: &Plane, ndc: Vec2, fallback_distance: f32) -> (Ray, Vec3) {
    let ray = camera.ray_from_ndc(ndc);
    let world = match plane.intersect(&ray) {
        Some(t) => ray.at(t),
        None => ray.at(fallback_distance),
    };
    (ray, world)
}

/// Snapshot read by the simulations each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub screen: Vec2,
    pub normalized: Vec2,
    pub world: Vec3,
    pub world_velocity: Vec3,
    pub ray: Ray,
    pub is_active: bool,
    pub is_dragging: bool,
    pub recently_moved: bool,
    /// Seconds since the last accepted move; infinite before the first one.
    pub idle_secs: f32,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            screen: Vec2::ZERO,
            normalized: Vec2::ZERO,
            world: Vec3::ZERO,
            world_velocity: Vec3::ZERO,
            ray: Ray {
                origin: Vec3::ZERO,
                direction: Vec3::NEG_Z,
            },
            is_active: false,
            is_dragging: false,
            recently_moved: false,
            idle_secs: f32::INFINITY,
        }
    }
}

pub struct PointerTracker {
    state: PointerState,
    viewport: Viewport,
    fallback_distance: f32,
    idle_timeout: f32,
    plane: Option<Plane>,
    sample_world: Option<Vec3>,
    sample_elapsed: f32,
    since_move: f32,
    touched: bool,
}

impl PointerTracker {
    pub fn new(viewport: Viewport) -> Self {
        Self::with_timing(viewport, FALLBACK_RAY_DISTANCE, POINTER_IDLE_TIMEOUT_SEC)
    }

    pub fn with_timing(viewport: Viewport, fallback_distance: f32, idle_timeout: f32) -> Self {
        let mut tracker = Self {
            state: PointerState::default(),
            viewport,
            fallback_distance,
            idle_timeout,
            plane: None,
            sample_world: None,
            sample_elapsed: 0.0,
            since_move: f32::INFINITY,
            touched: false,
        };
        tracker.seed_center();
        tracker
    }

    /// Place the pointer at the viewport centre so nothing downstream reads
    /// an uninitialized position.
    pub fn seed_center(&mut self) {
        self.state.screen = self.viewport.center();
        self.state.normalized = Vec2::ZERO;
        self.state.is_active = false;
    }

    /// Override the reference plane. `None` restores the camera-facing plane.
    pub fn set_plane(&mut self, plane: Option<Plane>) {
        self.plane = plane;
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if self.touched {
            if let Some(ndc) = normalize_screen(self.state.screen, &self.viewport) {
                self.state.normalized = ndc;
            }
        } else {
            self.seed_center();
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn on_move(&mut self, screen: Vec2) {
        let Some(ndc) = normalize_screen(screen, &self.viewport) else {
            log::debug!("[pointer] ignoring sample {:?}", screen);
            return;
        };
        self.state.screen = screen;
        self.state.normalized = ndc;
        self.state.is_active = true;
        self.since_move = 0.0;
        self.touched = true;
    }

    pub fn on_down(&mut self, screen: Vec2) {
        self.on_move(screen);
        self.state.is_dragging = true;
    }

    pub fn on_up(&mut self) {
        self.state.is_dragging = false;
    }

    pub fn on_leave(&mut self) {
        self.state.is_dragging = false;
        self.state.is_active = false;
        self.since_move = f32::INFINITY;
    }

    /// Recompute the derived world-space fields for this frame.
    pub fn tick(&mut self, dt: f32, camera: &Camera) {
        let plane = self.plane.unwrap_or_else(|| Plane::facing(camera));
        let (ray, world) = world_on_plane(camera, &plane, self.state.normalized, self.fallback_distance);
        self.state.ray = ray;
        self.state.world = world;

        self.sample_elapsed += dt.max(0.0);
        match self.sample_world {
            None => {
                self.sample_world = Some(world);
                self.sample_elapsed = 0.0;
            }
            Some(prev) if self.sample_elapsed > VELOCITY_MIN_DT_SEC => {
                self.state.world_velocity = (world - prev) / self.sample_elapsed;
                self.sample_world = Some(world);
                self.sample_elapsed = 0.0;
            }
            Some(_) => {}
        }

        self.since_move += dt.max(0.0);
        self.state.is_active = self.since_move < self.idle_timeout;
        self.state.recently_moved = self.since_move < POINTER_MOVED_WINDOW_SEC;
        self.state.idle_secs = self.since_move;
    }

    #[inline]
    pub fn state(&self) -> &PointerState {
        &self.state
    }
}
