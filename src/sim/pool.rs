//! Reusable entity pool
//!
//! Entities live in a slot table keyed by a stable [`EntityId`]. A slot is in
//! exactly one of two sets: free (reset, hidden) or active. Releasing runs the
//! pool's reset function, so a released entity is always back at rest.

use serde::{Deserialize, Serialize};

/// Stable handle to a pooled entity (index into the slot table)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Growable object pool with pre-warmed slots
#[derive(Debug, Clone)]
pub struct Pool<T> {
    slots: Vec<T>,
    in_use: Vec<bool>,
    /// Free slot indices (LIFO)
    free: Vec<EntityId>,
    /// Active slot indices in acquisition order
    active: Vec<EntityId>,
    create: fn() -> T,
    reset: fn(&mut T),
}

impl<T> Pool<T> {
    /// Create a pool with `prewarm` ready slots
    pub fn new(prewarm: usize, create: fn() -> T, reset: fn(&mut T)) -> Self {
        let mut pool = Self {
            slots: Vec::with_capacity(prewarm),
            in_use: Vec::with_capacity(prewarm),
            free: Vec::with_capacity(prewarm),
            active: Vec::with_capacity(prewarm),
            create,
            reset,
        };
        for _ in 0..prewarm {
            let id = pool.push_slot();
            pool.free.push(id);
        }
        // Hand out low ids first
        pool.free.reverse();
        pool
    }

    fn push_slot(&mut self) -> EntityId {
        let id = EntityId(self.slots.len() as u32);
        self.slots.push((self.create)());
        self.in_use.push(false);
        id
    }

    /// Take an entity from the free set, growing the pool if it is empty
    pub fn acquire(&mut self) -> EntityId {
        let id = match self.free.pop() {
            Some(id) => id,
            None => {
                let id = self.push_slot();
                log::debug!("pool grew to {} slots", self.slots.len());
                id
            }
        };
        self.in_use[id.0 as usize] = true;
        self.active.push(id);
        id
    }

    /// Return an entity to the free set. No-op (returns false) if it isn't active.
    pub fn release(&mut self, id: EntityId) -> bool {
        if !self.is_active(id) {
            return false;
        }
        self.in_use[id.0 as usize] = false;
        if let Some(pos) = self.active.iter().position(|&a| a == id) {
            self.active.remove(pos);
        }
        (self.reset)(&mut self.slots[id.0 as usize]);
        self.free.push(id);
        true
    }

    /// Release every active entity
    pub fn release_all(&mut self) {
        for id in std::mem::take(&mut self.active) {
            self.in_use[id.0 as usize] = false;
            (self.reset)(&mut self.slots[id.0 as usize]);
            self.free.push(id);
        }
    }

    #[inline]
    pub fn is_active(&self, id: EntityId) -> bool {
        self.in_use.get(id.0 as usize).copied().unwrap_or(false)
    }

    /// Active entity, or None if the id is free or out of range
    pub fn get(&self, id: EntityId) -> Option<&T> {
        if self.is_active(id) {
            self.slots.get(id.0 as usize)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        if self.is_active(id) {
            self.slots.get_mut(id.0 as usize)
        } else {
            None
        }
    }

    /// Any slot, active or not (for inspecting reset state)
    pub fn slot(&self, id: EntityId) -> Option<&T> {
        self.slots.get(id.0 as usize)
    }

    /// Active ids in acquisition order
    pub fn active_ids(&self) -> &[EntityId] {
        &self.active
    }

    pub fn iter_active(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.active.iter().map(|&id| (id, &self.slots[id.0 as usize]))
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Total slots ever created
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}
