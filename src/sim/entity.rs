//! Simulated entities and their per-session store
//!
//! Entities are a closed set of kinds sharing one base shape (position,
//! velocity, size, alive flag). The store owns every entity of a session;
//! iteration order is id order for determinism.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// The closed set of entity kinds across all three games
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Hostile,
    Projectile,
    Collectible,
    StaticObstacle,
}

/// Stable entity handle (monotonic, never reused within a session)
pub type EntityId = u32;

/// A simulated object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Center position (authoritative, float)
    pub pos: Vec2,
    /// Velocity in units per second
    pub vel: Vec2,
    /// Sprite size; bounds derive from pos + size each step
    pub size: Vec2,
    pub alive: bool,
}

impl Entity {
    /// Bounding rectangle, derived from position and size
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// Per-session entity storage.
///
/// Removal is two-phase: `remove` only marks the entity dead, `sweep` drops
/// the dead at the end of the frame pass. This keeps mid-iteration removal
/// safe and gives at-most-once-per-frame removal semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityStore {
    entities: Vec<Entity>,
    next_id: EntityId,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            next_id: 1,
        }
    }

    /// Spawn a new entity and return its id
    pub fn spawn(&mut self, kind: EntityKind, pos: Vec2, vel: Vec2, size: Vec2) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        self.entities.push(Entity {
            id,
            kind,
            pos,
            vel,
            size,
            alive: true,
        });
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id && e.alive)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id && e.alive)
    }

    /// Mark an entity for removal; the slot survives until `sweep`
    pub fn remove(&mut self, id: EntityId) {
        if let Some(e) = self.entities.iter_mut().find(|e| e.id == id) {
            e.alive = false;
        }
    }

    /// Drop everything marked dead (end of frame pass)
    pub fn sweep(&mut self) {
        self.entities.retain(|e| e.alive);
    }

    /// Remove every entity (session restart)
    pub fn clear(&mut self) {
        self.entities.clear();
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities
            .iter()
            .filter(|e| e.alive && e.kind == kind)
            .count()
    }

    /// Snapshot of live ids of one kind, for read-then-mutate passes
    pub fn ids_of(&self, kind: EntityKind) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|e| e.alive && e.kind == kind)
            .map(|e| e.id)
            .collect()
    }

    pub fn each_alive(&self, kind: EntityKind) -> impl Iterator<Item = &Entity> {
        self.entities
            .iter()
            .filter(move |e| e.alive && e.kind == kind)
    }

    pub fn iter_alive(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.alive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_assigns_monotonic_ids() {
        let mut store = EntityStore::new();
        let a = store.spawn(EntityKind::Hostile, Vec2::ZERO, Vec2::ZERO, Vec2::ONE);
        let b = store.spawn(EntityKind::Hostile, Vec2::ZERO, Vec2::ZERO, Vec2::ONE);
        assert!(b > a);
        assert_eq!(store.count(EntityKind::Hostile), 2);
    }

    #[test]
    fn test_remove_is_two_phase() {
        let mut store = EntityStore::new();
        let id = store.spawn(EntityKind::Projectile, Vec2::ZERO, Vec2::ZERO, Vec2::ONE);
        store.remove(id);
        // Dead immediately for lookups and counts
        assert!(store.get(id).is_none());
        assert_eq!(store.count(EntityKind::Projectile), 0);
        // Double-remove before sweep is harmless
        store.remove(id);
        store.sweep();
        assert_eq!(store.iter_alive().count(), 0);
    }

    #[test]
    fn test_snapshot_survives_removal_during_pass() {
        let mut store = EntityStore::new();
        for _ in 0..3 {
            store.spawn(EntityKind::Hostile, Vec2::ZERO, Vec2::ZERO, Vec2::ONE);
        }
        let ids = store.ids_of(EntityKind::Hostile);
        for id in &ids {
            store.remove(*id);
        }
        assert_eq!(ids.len(), 3);
        store.sweep();
        assert_eq!(store.count(EntityKind::Hostile), 0);
    }
}
