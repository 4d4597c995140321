use crate::pool::{ObjectPool, PoolHandle};
use glam::Vec3;
use std::collections::VecDeque;

/// One recorded trail position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrailPoint {
    pub position: Vec3,
    pub size: f32,
    pub age: f32,
    pub energy: f32,
    /// Ring entity drawn for this point, if the owner attached one.
    pub ring: Option<PoolHandle>,
}

/// Bounded history of trail points, oldest first. Points are pooled and
/// returned to the pool when evicted.
pub struct TrailBuffer {
    order: VecDeque<PoolHandle>,
    pool: ObjectPool<TrailPoint>,
    capacity: usize,
}

impl TrailBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            order: VecDeque::with_capacity(capacity + 1),
            pool: ObjectPool::with_capacity("trail", capacity + 1, TrailPoint::default),
            capacity,
        }
    }

    /// Append a point. When the buffer is over capacity the oldest point is
    /// evicted and returned so the caller can release anything it owns.
    pub fn push(&mut self, point: TrailPoint) -> Option<TrailPoint> {
        let handle = self.pool.get();
        if let Some(slot) = self.pool.get_mut(handle) {
            *slot = point;
        }
        self.order.push_back(handle);
        if self.order.len() > self.capacity {
            self.pop_oldest()
        } else {
            None
        }
    }

    fn pop_oldest(&mut self) -> Option<TrailPoint> {
        let handle = self.order.pop_front()?;
        let point = self.pool.get_ref(handle).copied();
        self.pool.release(handle);
        point
    }

    /// Iterate oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &TrailPoint> + '_ {
        self.order.iter().filter_map(|h| self.pool.get_ref(*h))
    }

    /// Visit points oldest to newest with their position in the buffer.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(usize, &mut TrailPoint)) {
        for (i, handle) in self.order.iter().enumerate() {
            if let Some(point) = self.pool.get_mut(*handle) {
                f(i, point);
            }
        }
    }

    pub fn age(&mut self, dt: f32) {
        self.for_each_mut(|_, point| point.age += dt);
    }

    /// Remove every point, returning them oldest first.
    pub fn drain(&mut self) -> Vec<TrailPoint> {
        let mut out = Vec::with_capacity(self.order.len());
        while let Some(point) = self.pop_oldest() {
            out.push(point);
        }
        out
    }

    pub fn newest(&self) -> Option<&TrailPoint> {
        self.order.back().and_then(|h| self.pool.get_ref(*h))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn pool(&self) -> &ObjectPool<TrailPoint> {
        &self.pool
    }
}
