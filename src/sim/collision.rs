//! Pairwise collision resolution between dynamic entity lists
//!
//! Rectangle tests first; the pixel-mask stage runs only after a coarse
//! rectangle prefilter passes. Events are produced and consumed within the
//! same frame, never persisted.

use glam::Vec2;

use super::entity::{EntityId, EntityKind, EntityStore};
use super::rect::{Rect, SpriteMask};
use crate::consts::KNOCKBACK_DISTANCE;

/// What a detected overlap means to the game rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    DamagePlayer,
    DestroyHostile,
    CollectPickup,
    BlockMovement,
}

/// An ephemeral collision event for this frame's rules pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    pub a: EntityId,
    pub b: EntityId,
    pub kind: CollisionKind,
}

/// Projectile-vs-hostile pass: O(n·m) rectangle tests, first-match-wins.
///
/// On a match the hostile dies, the projectile dies too when
/// `destroy_projectile` is set, and scanning of that projectile's remaining
/// targets stops. A hostile consumed by one projectile cannot be hit by a
/// later projectile in the same frame.
pub fn projectiles_vs_hostiles(
    store: &mut EntityStore,
    destroy_projectile: bool,
) -> Vec<CollisionEvent> {
    let mut events = Vec::new();
    for proj_id in store.ids_of(EntityKind::Projectile) {
        let Some(proj_bounds) = store.get(proj_id).map(|p| p.bounds()) else {
            continue;
        };
        for hostile_id in store.ids_of(EntityKind::Hostile) {
            let Some(hostile) = store.get(hostile_id) else {
                continue;
            };
            if proj_bounds.intersects(&hostile.bounds()) {
                store.remove(hostile_id);
                if destroy_projectile {
                    store.remove(proj_id);
                }
                events.push(CollisionEvent {
                    a: proj_id,
                    b: hostile_id,
                    kind: CollisionKind::DestroyHostile,
                });
                break;
            }
        }
    }
    events
}

/// First hostile whose rectangle overlaps the player's.
///
/// Callers skip this pass entirely while the player is invincible.
pub fn first_hostile_touching(store: &EntityStore, player_bounds: &Rect) -> Option<EntityId> {
    store
        .each_alive(EntityKind::Hostile)
        .find(|h| h.bounds().intersects(player_bounds))
        .map(|h| h.id)
}

/// Knockback displacement away from a hostile, fixed magnitude
pub fn knockback(player_center: Vec2, hostile_center: Vec2) -> Vec2 {
    (player_center - hostile_center).normalize_or_zero() * KNOCKBACK_DISTANCE
}

/// Two-stage overlap: rectangle prefilter, then per-pixel masks.
///
/// Mask dimensions follow the sprite, so offsets are taken from the bounds'
/// top-left corners.
pub fn mask_overlap(a: &Rect, a_mask: &SpriteMask, b: &Rect, b_mask: &SpriteMask) -> bool {
    if !a.intersects(b) {
        return false;
    }
    let offset = (
        (b.left() - a.left()).round() as i32,
        (b.top() - a.top()).round() as i32,
    );
    a_mask.overlaps(b_mask, offset)
}

/// True if any hostile passes the rect-then-mask test against the player
/// (the instant-death contact rule of the asteroid game)
pub fn any_hostile_mask_hit(
    store: &EntityStore,
    player_bounds: &Rect,
    player_mask: &SpriteMask,
    hostile_mask: &SpriteMask,
) -> bool {
    store
        .each_alive(EntityKind::Hostile)
        .any(|h| mask_overlap(player_bounds, player_mask, &h.bounds(), hostile_mask))
}

/// Player-vs-collectible pass: rect prefilter, then masks; every collected
/// pickup dies and yields an event. Replacement spawning is the caller's rule.
pub fn collect_pickups(
    store: &mut EntityStore,
    player_id: EntityId,
    player_bounds: &Rect,
    player_mask: &SpriteMask,
    pickup_mask: &SpriteMask,
) -> Vec<CollisionEvent> {
    let mut events = Vec::new();
    for id in store.ids_of(EntityKind::Collectible) {
        let Some(pickup) = store.get(id) else { continue };
        if mask_overlap(player_bounds, player_mask, &pickup.bounds(), pickup_mask) {
            store.remove(id);
            events.push(CollisionEvent {
                a: player_id,
                b: id,
                kind: CollisionKind::CollectPickup,
            });
        }
    }
    events
}
