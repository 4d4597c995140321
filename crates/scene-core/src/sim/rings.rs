use super::{FrameInput, Simulation};
use crate::color::{derive_color, rainbow};
use crate::constants::*;
use crate::entity::{EntityPool, ShapeKind};
use crate::pool::PoolHandle;
use crate::trail::{TrailBuffer, TrailPoint};
use glam::Vec3;
use rand::rngs::StdRng;
use std::f32::consts::FRAC_PI_2;

/// Rings laid along the recent pointer path, or along a Lissajous curve
/// while the pointer rests.
pub struct TrailingRings {
    trail: TrailBuffer,
    handles: Vec<PoolHandle>,
    last_recorded: Option<Vec3>,
    mounted: bool,
}

/// Autonomous path point and its speed in world units per second.
pub fn idle_path(time: f32) -> (Vec3, f32) {
    let [ax, ay] = TRAIL_LISSAJOUS_AMPLITUDE;
    let [fx, fy] = TRAIL_LISSAJOUS_FREQUENCY;
    let position = Vec3::new(ax * (fx * time).sin(), ay * (fy * time + FRAC_PI_2).sin(), 0.0);
    let velocity = Vec3::new(ax * fx * (fx * time).cos(), ay * fy * (fy * time + FRAC_PI_2).cos(), 0.0);
    (position, velocity.length())
}

impl TrailingRings {
    pub fn new(capacity: usize) -> Self {
        Self {
            trail: TrailBuffer::new(capacity),
            handles: Vec::with_capacity(capacity),
            last_recorded: None,
            mounted: false,
        }
    }

    pub fn trail(&self) -> &TrailBuffer {
        &self.trail
    }

    fn record(&mut self, point: TrailPoint, pool: &mut EntityPool, rng: &mut StdRng) {
        let ring = pool.get();
        if let Some(e) = pool.get_mut(ring) {
            e.respawn(ShapeKind::Ring, rng);
            e.position = point.position;
        }
        self.last_recorded = Some(point.position);
        let evicted = self.trail.push(TrailPoint {
            ring: Some(ring),
            ..point
        });
        if let Some(ring) = evicted.and_then(|p| p.ring) {
            pool.release(ring);
        }
    }
}

/// 1 for the newest point, approaching 0 for the oldest.
#[inline]
fn freshness(index: usize, len: usize) -> f32 {
    (index + 1) as f32 / len.max(1) as f32
}

impl Simulation for TrailingRings {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Ring
    }

    fn mount(&mut self, pool: &mut EntityPool, _rng: &mut StdRng) {
        self.unmount(pool);
        self.mounted = true;
    }

    fn unmount(&mut self, pool: &mut EntityPool) {
        for point in self.trail.drain() {
            if let Some(ring) = point.ring {
                pool.release(ring);
            }
        }
        self.handles.clear();
        self.last_recorded = None;
        self.mounted = false;
    }

    fn step(&mut self, input: &FrameInput<'_>, pool: &mut EntityPool, rng: &mut StdRng) {
        if !self.mounted {
            return;
        }
        let fun = input.fun_mode();
        let pointer = input.pointer;
        let follow_pointer = input.pointer_engaged() && pointer.idle_secs < TRAIL_IDLE_AFTER_SEC;

        let (target, speed, energy) = if follow_pointer {
            let speed = pointer.world_velocity.length();
            (pointer.world, speed, (speed / TRAIL_EXCITEMENT_SPEED_NORM).min(1.0))
        } else {
            let (p, speed) = idle_path(input.time);
            (p, speed, 0.0)
        };

        let far_enough = self
            .last_recorded
            .map_or(true, |last| last.distance(target) > TRAIL_MIN_STEP);
        if far_enough && target.is_finite() {
            self.record(
                TrailPoint {
                    position: target,
                    size: (TRAIL_BASE_SIZE + speed * TRAIL_SPEED_SIZE).min(TRAIL_MAX_SIZE),
                    age: 0.0,
                    energy,
                    ring: None,
                },
                pool,
                rng,
            );
        }
        self.trail.age(input.dt);

        let len = self.trail.len();
        let size_boost = if fun { 1.5 } else { 1.0 };
        let spin = TRAIL_RING_SPIN * if fun { 3.0 } else { 1.0 };
        let handles = &mut self.handles;
        handles.clear();
        self.trail.for_each_mut(|i, point| {
            let Some(ring) = point.ring else {
                return;
            };
            let Some(e) = pool.get_mut(ring) else {
                return;
            };
            let fresh = freshness(i, len);
            e.position = point.position;
            e.scale = Vec3::splat(point.size * (0.3 + 0.7 * fresh) * size_boost);
            e.rotation.z += spin;
            e.rotation.x = point.age * 0.5;
            e.excitement = point.energy * fresh;
            handles.push(ring);
        });
    }

    fn shade(&mut self, input: &FrameInput<'_>, pool: &mut EntityPool) {
        let t = input.time;
        let fun = input.fun_mode();
        let len = self.handles.len();
        for (i, handle) in self.handles.iter().enumerate() {
            let Some(e) = pool.get_mut(*handle) else {
                continue;
            };
            if fun {
                e.color = rainbow(t, i);
                continue;
            }
            let fade = 0.4 + 0.6 * freshness(i, len);
            let mut color = derive_color(input.palette, t + i as f32 * 0.05, e.excitement, ShapeKind::Ring, false);
            color.main *= fade;
            color.emissive_intensity *= fade;
            e.color = color;
        }
    }

    fn handles(&self) -> &[PoolHandle] {
        &self.handles
    }

    fn is_mounted(&self) -> bool {
        self.mounted
    }
}
