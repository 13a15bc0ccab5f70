//! Entity storage with explicit lifetimes
//!
//! Projectiles live in a fixed-capacity slot pool; enemies and power-ups in
//! plain id-addressed lists. Destroying something that is already gone is a
//! no-op everywhere.

use serde::{Deserialize, Serialize};

use super::entity::{Identified, Projectile};

/// Fixed-capacity projectile slots
///
/// Slots are allocated lazily up to `capacity` and reused once their
/// projectile is destroyed. With every slot in flight, new shots are dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectilePool {
    capacity: usize,
    slots: Vec<Option<Projectile>>,
}

impl ProjectilePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            slots: Vec::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of projectiles in flight
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Place a projectile in a free slot. Returns false if the shot was dropped.
    pub fn spawn(&mut self, projectile: Projectile) -> bool {
        if let Some(slot) = self.slots.iter_mut().find(|s| s.is_none()) {
            *slot = Some(projectile);
            return true;
        }
        if self.slots.len() < self.capacity {
            self.slots.push(Some(projectile));
            return true;
        }
        log::trace!("Projectile pool full ({}), shot dropped", self.capacity);
        false
    }

    /// Free the slot holding `id`. Returns the projectile if it was active.
    pub fn destroy(&mut self, id: u32) -> Option<Projectile> {
        self.slots
            .iter_mut()
            .find(|s| s.as_ref().is_some_and(|p| p.id == id))
            .and_then(Option::take)
    }

    pub fn get(&self, id: u32) -> Option<&Projectile> {
        self.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.get(id).is_some()
    }

    /// Active projectiles in slot order
    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.slots.iter().flatten()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Projectile> {
        self.slots.iter_mut().flatten()
    }
}

/// Unbounded list of live entities, kept sorted by id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityList<T> {
    items: Vec<T>,
}

impl<T> Default for EntityList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Identified> EntityList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new entity. Ids are handed out in increasing order, so the
    /// list stays sorted.
    pub fn create(&mut self, item: T) {
        debug_assert!(self.items.last().is_none_or(|last| last.id() < item.id()));
        self.items.push(item);
    }

    /// Remove by id. Returns the entity if it was still alive.
    pub fn destroy(&mut self, id: u32) -> Option<T> {
        let idx = self.items.iter().position(|e| e.id() == id)?;
        Some(self.items.remove(idx))
    }

    pub fn get(&self, id: u32) -> Option<&T> {
        self.items.iter().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }
}
