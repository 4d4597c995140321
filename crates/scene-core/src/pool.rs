//! Fixed-capacity object pool handing out reusable records by index.
//!
//! Records live in a pre-sized arena; the pool tracks which slots are free
//! and which are checked out. Handles are plain indices, so simulations can
//! keep them in ordinary `Vec`s without borrowing the pool.

use fnv::FnvHashSet;

/// Index of a pooled record. Only meaningful for the pool that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PoolHandle(usize);

impl PoolHandle {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

pub struct ObjectPool<T> {
    name: &'static str,
    slots: Vec<T>,
    free: Vec<usize>,
    in_use: FnvHashSet<usize>,
    factory: Box<dyn FnMut() -> T>,
    initial_capacity: usize,
    reported_growth: bool,
}

impl<T> ObjectPool<T> {
    pub fn new(name: &'static str, factory: impl FnMut() -> T + 'static) -> Self {
        Self {
            name,
            slots: Vec::new(),
            free: Vec::new(),
            in_use: FnvHashSet::default(),
            factory: Box::new(factory),
            initial_capacity: 0,
            reported_growth: false,
        }
    }

    /// Create a pool and pre-populate `capacity` records so the first frames
    /// never allocate.
    pub fn with_capacity(
        name: &'static str,
        capacity: usize,
        factory: impl FnMut() -> T + 'static,
    ) -> Self {
        let mut pool = Self::new(name, factory);
        pool.expand(capacity);
        pool.initial_capacity = capacity;
        pool
    }

    /// Add `n` freshly constructed records to the free list.
    pub fn expand(&mut self, n: usize) {
        let start = self.slots.len();
        self.slots.reserve(n);
        for _ in 0..n {
            self.slots.push((self.factory)());
        }
        // Free list is a stack; fresh slots go underneath released ones and
        // pop in ascending order.
        self.free.splice(0..0, (start..start + n).rev());
    }

    /// Check out a record, constructing a new one when the free list is empty.
    pub fn get(&mut self) -> PoolHandle {
        let idx = match self.free.pop() {
            Some(idx) => idx,
            None => {
                if !self.reported_growth {
                    log::info!(
                        "[pool] '{}' exhausted at {} records; growing on demand",
                        self.name,
                        self.slots.len()
                    );
                    self.reported_growth = true;
                }
                let idx = self.slots.len();
                self.slots.push((self.factory)());
                idx
            }
        };
        self.in_use.insert(idx);
        PoolHandle(idx)
    }

    /// Return a record to the free list. Releasing a handle that is not
    /// checked out is a no-op and returns `false`.
    pub fn release(&mut self, handle: PoolHandle) -> bool {
        if self.in_use.remove(&handle.0) {
            self.free.push(handle.0);
            true
        } else {
            false
        }
    }

    /// Release every checked-out record.
    pub fn release_all(&mut self) {
        let mut drained: Vec<usize> = self.in_use.drain().collect();
        drained.sort_unstable_by(|a, b| b.cmp(a));
        self.free.extend(drained);
    }

    #[inline]
    pub fn is_in_use(&self, handle: PoolHandle) -> bool {
        self.in_use.contains(&handle.0)
    }

    /// Borrow a checked-out record.
    #[inline]
    pub fn get_ref(&self, handle: PoolHandle) -> Option<&T> {
        if self.is_in_use(handle) {
            self.slots.get(handle.0)
        } else {
            None
        }
    }

    /// Mutably borrow a checked-out record.
    #[inline]
    pub fn get_mut(&mut self, handle: PoolHandle) -> Option<&mut T> {
        if self.in_use.contains(&handle.0) {
            self.slots.get_mut(handle.0)
        } else {
            None
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Total records owned by the pool, free or checked out.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    pub fn in_use_len(&self) -> usize {
        self.in_use.len()
    }

    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    /// True when no slot is both free and checked out and every slot is
    /// accounted for exactly once.
    pub fn is_consistent(&self) -> bool {
        let disjoint = self.free.iter().all(|idx| !self.in_use.contains(idx));
        let mut seen = FnvHashSet::default();
        let unique_free = self.free.iter().all(|idx| seen.insert(*idx));
        disjoint && unique_free && self.free.len() + self.in_use.len() == self.slots.len()
    }
}
