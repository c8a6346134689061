//! The three playable sessions
//!
//! Each game owns its entities, player, timers and seeded RNG, and advances
//! one frame per `tick` in the same pipeline order: input, physics, spawning,
//! dynamic collisions, state transitions. Rendering and audio stay outside;
//! ticks report [`crate::sim::GameEvent`]s for the host to map.

pub mod forest;
pub mod meteor;
pub mod traffic;

pub use forest::ForestGame;
pub use meteor::MeteorGame;
pub use traffic::TrafficGame;
