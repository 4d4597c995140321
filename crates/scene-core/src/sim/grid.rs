use super::{release_handles, FrameInput, Simulation};
use crate::color::{derive_color, rainbow};
use crate::constants::*;
use crate::entity::{EntityPool, ShapeKind};
use crate::pool::PoolHandle;
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::Rng;
use std::f32::consts::{PI, TAU};

#[derive(Clone, Copy, Debug)]
struct Cell {
    origin: Vec2,
    checker: bool,
    current_y: f32,
    phase: f32,
    speed: f32,
    amplitude: f32,
}

/// Expanding circular wave launched when the easter egg starts.
#[derive(Clone, Copy, Debug)]
struct Wave {
    origin: Vec2,
    clock: f32,
    remaining: f32,
}

/// Square grid of boxes that only animate their height.
pub struct GridRisers {
    side: usize,
    handles: Vec<PoolHandle>,
    cells: Vec<Cell>,
    prev_cursor: Vec2,
    last_cursor_move: Option<f32>,
    auto_ripple: Option<(i64, Vec2)>,
    wave: Option<Wave>,
    was_fun: bool,
}

impl GridRisers {
    pub fn new(side: usize) -> Self {
        Self {
            side,
            handles: Vec::with_capacity(side * side),
            cells: Vec::with_capacity(side * side),
            prev_cursor: Vec2::ZERO,
            last_cursor_move: None,
            auto_ripple: None,
            wave: None,
            was_fun: false,
        }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    /// Smoothed height offset of each cell, in mount order.
    pub fn heights(&self) -> impl Iterator<Item = f32> + '_ {
        self.cells.iter().map(|c| c.current_y)
    }

    pub fn wave_active(&self) -> bool {
        self.wave.is_some()
    }

    fn auto_ripple_center(&mut self, time: f32, rng: &mut StdRng) -> Vec2 {
        let period = (time / GRID_RIPPLE_INTERVAL_SEC).floor() as i64;
        match self.auto_ripple {
            Some((p, center)) if p == period => center,
            _ => {
                let reach = self.side as f32 * 0.4;
                let center = Vec2::new(rng.gen_range(-1.0..1.0) * reach, rng.gen_range(-1.0..1.0) * reach);
                self.auto_ripple = Some((period, center));
                center
            }
        }
    }

    fn advance_wave(&mut self, fun: bool, dt: f32, rng: &mut StdRng) {
        if fun && !self.was_fun {
            self.wave = Some(Wave {
                origin: Vec2::new(rng.gen_range(-3.0..3.0), rng.gen_range(-3.0..3.0)),
                clock: 0.0,
                remaining: GRID_WAVE_LIFETIME_SEC,
            });
        }
        self.was_fun = fun;
        if let Some(wave) = self.wave.as_mut() {
            wave.clock += GRID_WAVE_RATE * dt;
            wave.remaining -= dt;
            if wave.remaining <= 0.0 {
                self.wave = None;
            }
        }
    }
}

impl Simulation for GridRisers {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Box
    }

    fn mount(&mut self, pool: &mut EntityPool, rng: &mut StdRng) {
        self.unmount(pool);
        let offset = (self.side.saturating_sub(1)) as f32 * GRID_SPACING * 0.5;
        for x in 0..self.side {
            for z in 0..self.side {
                let origin = Vec2::new(x as f32 * GRID_SPACING - offset, z as f32 * GRID_SPACING - offset);
                let handle = pool.get();
                if let Some(e) = pool.get_mut(handle) {
                    e.respawn(ShapeKind::Box, rng);
                    e.position = Vec3::new(origin.x, GRID_BASE_Y, origin.y);
                    e.scale = Vec3::splat(GRID_CELL_SCALE);
                }
                self.handles.push(handle);
                self.cells.push(Cell {
                    origin,
                    checker: (x + z) % 2 == 0,
                    current_y: 0.0,
                    phase: rng.gen::<f32>() * TAU,
                    speed: 0.5 + rng.gen::<f32>() * 0.5,
                    amplitude: 0.1 + rng.gen::<f32>() * 0.3,
                });
            }
        }
    }

    fn unmount(&mut self, pool: &mut EntityPool) {
        release_handles(&mut self.handles, pool);
        self.cells.clear();
        self.wave = None;
        self.was_fun = false;
        self.last_cursor_move = None;
        self.auto_ripple = None;
    }

    fn step(&mut self, input: &FrameInput<'_>, pool: &mut EntityPool, rng: &mut StdRng) {
        let t = input.time;
        let fun = input.fun_mode();
        let engaged = input.pointer_engaged();
        let world = input.pointer.world;
        let cursor = Vec2::new(world.x, -world.y) * GRID_POINTER_SCALE;

        if engaged && cursor.distance(self.prev_cursor) > GRID_CURSOR_MOVE_MIN {
            self.prev_cursor = cursor;
            self.last_cursor_move = Some(t);
        }
        let cursor_moving = engaged && self.last_cursor_move.is_some_and(|last| t - last <= GRID_CURSOR_HOLD_SEC);

        let auto_due = t.rem_euclid(GRID_RIPPLE_INTERVAL_SEC) < GRID_RIPPLE_WINDOW_SEC && !input.scene.has_interaction();
        // The idle auto-ripple only moves heights; excitement needs input.
        let (ripple, ripple_excites) = if cursor_moving {
            (Some(cursor), true)
        } else if fun {
            (Some(self.auto_ripple_center(t, rng)), true)
        } else if auto_due {
            (Some(self.auto_ripple_center(t, rng)), false)
        } else {
            (None, false)
        };
        let ripple_reach = self.side as f32 * 0.5;

        self.advance_wave(fun, input.dt, rng);
        let wave = self.wave;

        let checker_wave = (t * 3.0).sin() * 0.5;
        let rotation_multiplier = if fun { 3.0 } else { 1.0 };

        for (index, (handle, cell)) in self.handles.iter().zip(self.cells.iter_mut()).enumerate() {
            let Some(e) = pool.get_mut(*handle) else {
                continue;
            };
            let mut height =
                (t * cell.speed + cell.phase + cell.origin.x + cell.origin.y).sin() * cell.amplitude;

            if engaged {
                let dist = cell.origin.distance(cursor);
                if dist < GRID_BUMP_RADIUS {
                    let strength = (1.0 - dist / GRID_BUMP_RADIUS).powf(GRID_BUMP_EXPONENT);
                    height += GRID_BUMP_HEIGHT * strength;
                    e.excite(GRID_ENERGY_GAIN);
                }
            }

            if let Some(center) = ripple {
                let dist = cell.origin.distance(center);
                if dist < ripple_reach {
                    let effect = (dist * GRID_RIPPLE_FREQUENCY - t * GRID_RIPPLE_SPEED).sin()
                        * GRID_RIPPLE_STRENGTH
                        * (1.0 - dist / ripple_reach).powf(1.2);
                    height += effect;
                    if ripple_excites && effect > 0.1 {
                        e.excitement = e.excitement.max(effect * 0.5);
                    }
                }
            }

            if let Some(wave) = wave {
                if wave.clock < GRID_WAVE_MAX_UNITS {
                    let edge = (cell.origin.distance(wave.origin) - wave.clock * GRID_WAVE_RADIUS_PER_UNIT).abs();
                    if edge < GRID_WAVE_WIDTH {
                        let intensity = 1.0 - edge / GRID_WAVE_WIDTH;
                        height += intensity * GRID_WAVE_HEIGHT * (1.0 - wave.clock / GRID_WAVE_MAX_UNITS);
                        e.excitement = e.excitement.max(intensity);
                    }
                }
            }

            if fun {
                height += if cell.checker {
                    checker_wave
                } else {
                    (t * 3.0 + PI).sin() * 0.5
                };
                e.excitement = e.excitement.max(0.3);
            } else {
                e.calm(GRID_ENERGY_DECAY);
            }

            cell.current_y += (height - cell.current_y) * GRID_SMOOTHING;
            e.position = Vec3::new(cell.origin.x, GRID_BASE_Y + cell.current_y, cell.origin.y);

            let base_spin = 0.001 * rotation_multiplier;
            e.rotation.y += base_spin + e.excitement * 0.03 * rotation_multiplier;
            e.rotation.x += base_spin + e.excitement * 0.02 * rotation_multiplier;

            let pulse = if fun {
                1.0 + e.excitement * 0.3 * (t * 4.0 + index as f32 * 0.2).sin()
            } else {
                1.0
            };
            e.scale = Vec3::splat(GRID_CELL_SCALE * pulse);
        }
    }

    fn shade(&mut self, input: &FrameInput<'_>, pool: &mut EntityPool) {
        let t = input.time;
        let fun = input.fun_mode();
        for (index, handle) in self.handles.iter().enumerate() {
            let Some(e) = pool.get_mut(*handle) else {
                continue;
            };
            e.color = if fun {
                rainbow(t, index)
            } else {
                derive_color(input.palette, t + index as f32 * 0.1, e.excitement, ShapeKind::Box, false)
            };
        }
    }

    fn handles(&self) -> &[PoolHandle] {
        &self.handles
    }
}
