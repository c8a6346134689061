//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by entity id)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod physics;
pub mod rect;
pub mod spawn;
pub mod state;

pub use collision::{
    CollisionEvent, CollisionKind, any_hostile_mask_hit, collect_pickups, first_hostile_touching,
    knockback, mask_overlap, projectiles_vs_hostiles,
};
pub use entity::{Entity, EntityId, EntityKind, EntityStore};
pub use physics::{
    Axis, AxisOutcome, Obstacle, PlatformerParams, integrate_platformer, resolve_axis, try_jump,
};
pub use rect::{Rect, SpriteMask};
pub use spawn::{
    RecentLanes, SpawnRequest, SpawnTimer, collectible_position, edge_hostile, lane_vehicle,
    sky_hostile,
};
pub use state::{DamageModel, Facing, GameEvent, GamePhase, PlayerState};
