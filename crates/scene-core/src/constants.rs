// Shared simulation tuning constants used by every front-end.
//
// Per-frame quantities (forces, damping, excitement steps) are expressed per
// 60 Hz frame; `Background::tick` sub-steps longer frames so they stay stable.

pub const FRAME_DT: f32 = 1.0 / 60.0; // nominal frame length the per-frame constants assume
pub const MAX_SUBSTEPS: u32 = 4; // cap on catch-up steps after a long stall

// Camera defaults
pub const CAMERA_EYE: [f32; 3] = [0.0, 0.0, 16.0];
pub const CAMERA_FOVY_DEG: f32 = 45.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Pointer transform
pub const VELOCITY_MIN_DT_SEC: f32 = 0.01; // skip velocity updates below this elapsed time
pub const FALLBACK_RAY_DISTANCE: f32 = 10.0; // projection distance when the plane is missed
pub const POINTER_IDLE_TIMEOUT_SEC: f32 = 2.0; // pointer counts as active this long after a move
pub const POINTER_MOVED_WINDOW_SEC: f32 = 0.5; // "recently moved" window for movement bias
pub const POINTER_MOVE_EPSILON: f32 = 0.001; // world velocity below this is not movement

// Scene state machine
pub const TRANSITION_DURATION_SEC: f32 = 0.8;
pub const BURST_WINDOW_SEC: f32 = 1.0; // successive interactions closer than this form a burst
pub const EASTER_EGG_THRESHOLD: u32 = 5;
pub const EASTER_EGG_DURATION_SEC: f32 = 5.0;

// Orbiting spheres
pub const SPHERE_COUNT_DESKTOP: usize = 50;
pub const SPHERE_COUNT_COMPACT: usize = 25;
pub const SPHERE_SPAWN_RADIUS_MIN: f32 = 4.0; // spawn shell inner radius
pub const SPHERE_SPAWN_RADIUS_SPAN: f32 = 3.0;
pub const SPHERE_INTERACTION_RADIUS: f32 = 5.0;
pub const SPHERE_ATTRACTION: f32 = 0.015;
pub const SPHERE_MOVEMENT_BIAS: f32 = 0.002;
pub const SPHERE_CURSOR_REPEL_RADIUS: f32 = 0.8;
pub const SPHERE_CURSOR_REPULSION: f32 = 0.01;
pub const SPHERE_PAIR_SEPARATION_SQ: f32 = 0.3; // pairwise repulsion only below this squared distance
pub const SPHERE_PAIR_REPULSION: f32 = 0.002;
pub const SPHERE_MIN_DISTANCE_SQ: f32 = 0.05; // clamp before dividing by squared distance
pub const SPHERE_MAX_SPEED: f32 = 0.04;
pub const SPHERE_DAMPING: f32 = 0.98;
pub const SPHERE_BOUNDARY: f32 = 8.0; // half-extent of the containing cube
pub const SPHERE_SOFT_MARGIN: f32 = 1.0; // soft push starts this far inside the boundary
pub const SPHERE_SOFT_FORCE: f32 = 0.01;
pub const SPHERE_BOUNCE_RESTITUTION: f32 = 0.8;
pub const SPHERE_EXCITEMENT_GAIN: f32 = 0.025;
pub const SPHERE_EXCITEMENT_DECAY: f32 = 0.008;
pub const SPHERE_IDLE_DRIFT_ACTIVE: f32 = 0.3; // auto-drift share while the pointer is moving
pub const SPHERE_ROTATION_MULTIPLIER: f32 = 1.2;
pub const SPHERE_ROTATION_MULTIPLIER_FUN: f32 = 2.5;
pub const SPHERE_HIT_RADIUS: f32 = 0.2; // unscaled mesh radius used for hover picking
pub const SPHERE_ORBIT_RADIUS: f32 = 4.0; // easter-egg swirl radius
pub const SPHERE_ORBIT_FORCE: f32 = 0.01;

// Grid risers
pub const GRID_SIDE_DESKTOP: usize = 8;
pub const GRID_SIDE_COMPACT: usize = 5;
pub const GRID_SPACING: f32 = 1.0;
pub const GRID_BASE_Y: f32 = -1.0; // grid plane sits slightly below the origin
pub const GRID_POINTER_SCALE: f32 = 0.5; // world pointer to grid-space scale
pub const GRID_BUMP_RADIUS: f32 = 2.2;
pub const GRID_BUMP_HEIGHT: f32 = 1.3;
pub const GRID_BUMP_EXPONENT: f32 = 1.5;
pub const GRID_SMOOTHING: f32 = 0.15; // exponential approach factor toward the target height
pub const GRID_RIPPLE_STRENGTH: f32 = 0.6;
pub const GRID_RIPPLE_FREQUENCY: f32 = 2.5;
pub const GRID_RIPPLE_SPEED: f32 = 6.0;
pub const GRID_RIPPLE_INTERVAL_SEC: f32 = 10.0; // idle auto-ripple period
pub const GRID_RIPPLE_WINDOW_SEC: f32 = 0.1; // auto-ripple is live for this slice of each period
pub const GRID_CURSOR_MOVE_MIN: f32 = 0.05;
pub const GRID_CURSOR_HOLD_SEC: f32 = 0.3;
pub const GRID_WAVE_LIFETIME_SEC: f32 = 4.0;
pub const GRID_WAVE_RATE: f32 = 3.0; // wave clock units per second
pub const GRID_WAVE_RADIUS_PER_UNIT: f32 = 1.2;
pub const GRID_WAVE_MAX_UNITS: f32 = 8.0; // front has fully faded at this clock value
pub const GRID_WAVE_WIDTH: f32 = 1.0;
pub const GRID_WAVE_HEIGHT: f32 = 2.0;
pub const GRID_ENERGY_GAIN: f32 = 0.1;
pub const GRID_ENERGY_DECAY: f32 = 0.03;
pub const GRID_CELL_SCALE: f32 = 0.5;

// Trailing rings
pub const TRAIL_CAPACITY_DESKTOP: usize = 16;
pub const TRAIL_CAPACITY_COMPACT: usize = 12;
pub const TRAIL_CAPACITY_MIN: usize = 12;
pub const TRAIL_CAPACITY_MAX: usize = 20;
pub const TRAIL_MIN_STEP: f32 = 0.15; // pointer must move this far before a new point is recorded
pub const TRAIL_BASE_SIZE: f32 = 0.35;
pub const TRAIL_SPEED_SIZE: f32 = 0.08; // extra ring size per world unit/sec of pointer speed
pub const TRAIL_MAX_SIZE: f32 = 1.6;
pub const TRAIL_IDLE_AFTER_SEC: f32 = 1.0; // autonomous path takes over after this much idle time
pub const TRAIL_LISSAJOUS_AMPLITUDE: [f32; 2] = [5.0, 3.0];
pub const TRAIL_LISSAJOUS_FREQUENCY: [f32; 2] = [0.7, 1.1];
pub const TRAIL_RING_SPIN: f32 = 0.02;
pub const TRAIL_EXCITEMENT_SPEED_NORM: f32 = 12.0; // pointer speed that saturates ring excitement

// Color derivation
pub const DEFAULT_PRIMARY_HEX: &str = "#5363EE";
pub const DEFAULT_SECONDARY_HEX: &str = "#C2F750";
pub const DEFAULT_ACCENT_HEX: &str = "#29B6F6";
pub const DEFAULT_HOVER_HEX: &str = "#D4FF69";
pub const EXCITED_SATURATION: f32 = 0.9;
pub const EXCITED_LIGHTNESS: f32 = 0.6;
pub const EMISSIVE_HUE_OFFSET: f32 = 0.1;
pub const EMISSIVE_MAX_INTENSITY: f32 = 0.8;
pub const DIRECTION_MIN_INTENSITY: f32 = 0.1;
pub const DIRECTION_DECAY: f32 = 0.02;

// Scene labels, indexed by shape kind
pub const SCENE_LABELS: [&str; 3] = ["Spheres", "Boxes", "Drawing"];
