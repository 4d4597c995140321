use crate::color::MaterialColor;
use crate::constants::SCENE_LABELS;
use crate::pool::ObjectPool;
use glam::Vec3;
use rand::Rng;

/// Visual kind of a simulated shape; also identifies the scene variant that
/// draws it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ShapeKind {
    #[default]
    Sphere,
    Box,
    Ring,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Sphere, ShapeKind::Box, ShapeKind::Ring];
    pub const COUNT: usize = Self::ALL.len();

    #[inline]
    pub fn index(self) -> usize {
        match self {
            ShapeKind::Sphere => 0,
            ShapeKind::Box => 1,
            ShapeKind::Ring => 2,
        }
    }

    #[inline]
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::COUNT]
    }

    #[inline]
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Label shown by the outer UI when this scene becomes active.
    #[inline]
    pub fn label(self) -> &'static str {
        SCENE_LABELS[self.index()]
    }
}

/// Per-instance idle personality, rolled once when the entity is checked out.
#[derive(Clone, Copy, Debug)]
pub struct AutoMovement {
    pub direction: Vec3,
    pub speed: f32,
    pub rotation_speed: Vec3,
    pub phase: f32,
}

impl Default for AutoMovement {
    fn default() -> Self {
        Self {
            direction: Vec3::X,
            speed: 0.0,
            rotation_speed: Vec3::ZERO,
            phase: 0.0,
        }
    }
}

impl AutoMovement {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let direction = Vec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        )
        .try_normalize()
        .unwrap_or(Vec3::Y);
        Self {
            direction,
            speed: 0.001 + rng.gen::<f32>() * 0.004,
            rotation_speed: Vec3::new(
                rng.gen::<f32>() * 0.005,
                rng.gen::<f32>() * 0.005,
                rng.gen::<f32>() * 0.005,
            ),
            phase: rng.gen::<f32>() * 1000.0,
        }
    }
}

/// One simulated shape. The renderer looks entities up by their position in
/// the frame's instance list; an entity never references its mesh.
#[derive(Clone, Debug)]
pub struct Entity {
    pub position: Vec3,
    pub velocity: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
    pub kind: ShapeKind,
    pub hovered: bool,
    pub excitement: f32,
    pub auto: AutoMovement,
    pub color: MaterialColor,
}

impl Default for Entity {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            kind: ShapeKind::Sphere,
            hovered: false,
            excitement: 0.0,
            auto: AutoMovement::default(),
            color: MaterialColor::default(),
        }
    }
}

impl Entity {
    /// Reset a recycled record for a new owner and roll a fresh personality.
    pub fn respawn<R: Rng + ?Sized>(&mut self, kind: ShapeKind, rng: &mut R) {
        *self = Entity {
            kind,
            auto: AutoMovement::random(rng),
            ..Entity::default()
        };
    }

    #[inline]
    pub fn excite(&mut self, amount: f32) {
        self.excitement = (self.excitement + amount).min(1.0);
    }

    #[inline]
    pub fn calm(&mut self, amount: f32) {
        self.excitement = (self.excitement - amount).max(0.0);
    }
}

pub type EntityPool = ObjectPool<Entity>;

pub fn entity_pool(capacity: usize) -> EntityPool {
    ObjectPool::with_capacity("entity", capacity, Entity::default)
}
