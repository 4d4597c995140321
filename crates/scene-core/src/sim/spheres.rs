use super::{release_handles, FrameInput, Simulation};
use crate::color::{blend_direction, derive_color, rainbow};
use crate::constants::*;
use crate::entity::{EntityPool, ShapeKind};
use crate::pointer::ray_sphere;
use crate::pool::PoolHandle;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::Rng;
use std::f32::consts::TAU;

/// Free-floating spheres that drift on their own, gather around the pointer
/// and bounce inside a cube.
pub struct OrbitingSpheres {
    count: usize,
    handles: Vec<PoolHandle>,
    // Scratch buffers reused every step.
    interacting: Vec<usize>,
    positions: Vec<Vec3>,
    pair_forces: Vec<Vec3>,
}

impl OrbitingSpheres {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            handles: Vec::with_capacity(count),
            interacting: Vec::with_capacity(count),
            positions: Vec::with_capacity(count),
            pair_forces: Vec::with_capacity(count),
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Short-range repulsion between spheres currently held by the pointer.
    fn apply_pair_repulsion(&mut self, pool: &mut EntityPool) {
        if self.interacting.len() < 2 {
            return;
        }
        self.positions.clear();
        self.pair_forces.clear();
        for &i in &self.interacting {
            let p = pool.get_ref(self.handles[i]).map_or(Vec3::ZERO, |e| e.position);
            self.positions.push(p);
            self.pair_forces.push(Vec3::ZERO);
        }
        for a in 0..self.positions.len() {
            for b in (a + 1)..self.positions.len() {
                let delta = self.positions[a] - self.positions[b];
                let dist_sq = delta.length_squared();
                if dist_sq >= SPHERE_PAIR_SEPARATION_SQ {
                    continue;
                }
                let magnitude = SPHERE_PAIR_REPULSION / dist_sq.max(SPHERE_MIN_DISTANCE_SQ);
                let force = delta.try_normalize().unwrap_or(Vec3::ZERO) * magnitude;
                self.pair_forces[a] += force;
                self.pair_forces[b] -= force;
            }
        }
        for (slot, &i) in self.interacting.iter().enumerate() {
            if let Some(e) = pool.get_mut(self.handles[i]) {
                e.velocity += self.pair_forces[slot];
            }
        }
    }
}

fn spawn_point(rng: &mut StdRng) -> Vec3 {
    let dir = Vec3::new(
        rng.gen_range(-1.0..1.0),
        rng.gen_range(-1.0..1.0),
        rng.gen_range(-1.0..1.0),
    )
    .try_normalize()
    .unwrap_or(Vec3::X);
    dir * (SPHERE_SPAWN_RADIUS_MIN + rng.gen::<f32>() * SPHERE_SPAWN_RADIUS_SPAN)
}

/// Pulse in 0..1 that drives the easter-egg effects.
#[inline]
fn fun_influence(time: f32) -> f32 {
    (time * 4.0).sin() * 0.5 + 0.5
}

impl Simulation for OrbitingSpheres {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Sphere
    }

    fn mount(&mut self, pool: &mut EntityPool, rng: &mut StdRng) {
        self.unmount(pool);
        for _ in 0..self.count {
            let handle = pool.get();
            if let Some(e) = pool.get_mut(handle) {
                e.respawn(ShapeKind::Sphere, rng);
                e.position = spawn_point(rng);
                e.velocity = Vec3::new(
                    rng.gen_range(-0.002..0.002),
                    rng.gen_range(-0.002..0.002),
                    rng.gen_range(-0.002..0.002),
                );
                e.rotation = Vec3::new(rng.gen::<f32>() * TAU, rng.gen::<f32>() * TAU, rng.gen::<f32>() * TAU);
            }
            self.handles.push(handle);
        }
    }

    fn unmount(&mut self, pool: &mut EntityPool) {
        release_handles(&mut self.handles, pool);
        self.interacting.clear();
    }

    fn step(&mut self, input: &FrameInput<'_>, pool: &mut EntityPool, _rng: &mut StdRng) {
        let t = input.time;
        let fun = input.fun_mode();
        let fi = if fun { fun_influence(t) } else { 0.0 };
        let engaged = input.pointer_engaged();
        let cursor = input.pointer.world;
        let moved = input.pointer.recently_moved;
        let bias = if moved && input.pointer.world_velocity.length() > POINTER_MOVE_EPSILON {
            input.pointer.world_velocity.try_normalize()
        } else {
            None
        };
        let auto_influence = if moved { SPHERE_IDLE_DRIFT_ACTIVE } else { 1.0 };
        let rotation_multiplier = if fun {
            SPHERE_ROTATION_MULTIPLIER_FUN
        } else {
            SPHERE_ROTATION_MULTIPLIER
        };

        self.interacting.clear();
        for (i, handle) in self.handles.iter().enumerate() {
            let Some(e) = pool.get_mut(*handle) else {
                continue;
            };
            let auto = e.auto;

            if fun {
                if e.excitement > 0.5 || fi > 0.7 {
                    let radius = SPHERE_ORBIT_RADIUS + fi * 2.0;
                    let speed = (0.5 + e.excitement) * (1.0 + fi);
                    let offset = i as f32 * 0.628;
                    let orbit = Vec3::new(
                        (t * speed + offset).cos() * radius,
                        (t * speed + offset).sin() * radius,
                        (t * speed * 0.5 + offset * fi).cos() * radius,
                    );
                    e.velocity += (orbit - e.position) * SPHERE_ORBIT_FORCE * (1.0 + fi);
                    e.rotation.x += auto.rotation_speed.x * fi * 2.0;
                    e.rotation.y += auto.rotation_speed.y * fi * 2.0;
                }
                e.position += e.velocity;
            } else {
                let wobble = (t + auto.phase).sin() * 0.5 + 0.5;
                e.position += e.velocity + auto.direction * (auto.speed * wobble * auto_influence);
            }
            e.rotation += auto.rotation_speed * rotation_multiplier;

            let soft_limit = SPHERE_BOUNDARY - SPHERE_SOFT_MARGIN;
            for axis in 0..3 {
                let p = e.position[axis];
                if p.abs() <= soft_limit {
                    continue;
                }
                e.velocity[axis] -= (p.abs() - soft_limit) * SPHERE_SOFT_FORCE * p.signum();
                if p.abs() >= SPHERE_BOUNDARY {
                    e.velocity[axis] *= -SPHERE_BOUNCE_RESTITUTION;
                    e.position[axis] = SPHERE_BOUNDARY * p.signum() * 0.95;
                    e.auto.direction[axis] *= -1.0;
                }
            }

            if !engaged {
                e.calm(SPHERE_EXCITEMENT_DECAY);
                continue;
            }
            let dist = e.position.distance(cursor);
            if dist >= SPHERE_INTERACTION_RADIUS {
                e.calm(SPHERE_EXCITEMENT_DECAY);
                continue;
            }
            self.interacting.push(i);
            let strength = 1.0 - dist / SPHERE_INTERACTION_RADIUS;
            let toward = (cursor - e.position).try_normalize().unwrap_or(Vec3::ZERO);
            e.velocity += toward * (strength * SPHERE_ATTRACTION);
            if let Some(bias) = bias {
                e.velocity += bias * (SPHERE_MOVEMENT_BIAS * strength);
            }
            if dist < SPHERE_CURSOR_REPEL_RADIUS {
                // Sitting on the cursor has no direction; push along the drift.
                let away = (e.position - cursor).try_normalize().unwrap_or(auto.direction);
                e.velocity += away * ((1.0 - dist / SPHERE_CURSOR_REPEL_RADIUS) * SPHERE_CURSOR_REPULSION);
            }
            e.excite(SPHERE_EXCITEMENT_GAIN);
        }

        self.apply_pair_repulsion(pool);

        let count = self.handles.len().max(1) as f32;
        for (i, handle) in self.handles.iter().enumerate() {
            let Some(e) = pool.get_mut(*handle) else {
                continue;
            };
            if !e.velocity.is_finite() {
                e.velocity = Vec3::ZERO;
            }
            e.velocity = e.velocity.clamp_length_max(SPHERE_MAX_SPEED) * SPHERE_DAMPING;

            let mut scale = 1.0 + e.excitement * 0.2 + e.velocity.length() * 10.0 * 0.1;
            if fun {
                let frequency = 2.0 + fi * 4.0;
                let amplitude = 0.4 * (0.5 + fi);
                let phase = i as f32 / count * TAU;
                scale *= ((t * frequency + phase).sin() * amplitude + 1.0) * (1.0 + fi * 0.2);
            }
            e.scale = Vec3::splat(scale);
        }
    }

    fn shade(&mut self, input: &FrameInput<'_>, pool: &mut EntityPool) {
        let t = input.time;
        let fun = input.fun_mode();
        let engaged = input.pointer_engaged();
        let ray = input.pointer.ray;
        let blend = input.pointer.recently_moved;
        for (i, handle) in self.handles.iter().enumerate() {
            let Some(e) = pool.get_mut(*handle) else {
                continue;
            };
            e.hovered = engaged
                && ray_sphere(ray.origin, ray.direction, e.position, SPHERE_HIT_RADIUS * e.scale.x).is_some();
            e.color = if fun {
                rainbow(t, i)
            } else {
                let color = derive_color(input.palette, t + i as f32 * 0.05, e.excitement, ShapeKind::Sphere, e.hovered);
                if blend {
                    blend_direction(color, input.direction, e.excitement)
                } else {
                    color
                }
            };
        }
    }

    fn handles(&self) -> &[PoolHandle] {
        &self.handles
    }
}
