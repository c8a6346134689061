//! Arcade Core - shared simulation for a trio of small 2D arcade games
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, physics, collisions, state)
//! - `games`: The three playable sessions (forest, meteor, traffic)
//! - `input`: Device merging into one normalized input frame
//! - `clock`: Rate-capped frame pump
//! - `platform`: Renderer/audio/asset boundary traits
//! - `tuning`: Data-driven per-game balance

pub mod clock;
pub mod games;
pub mod input;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use clock::Clock;
pub use input::{GamepadState, InputAggregator, InputFrame, KeyboardState, MouseState};
pub use tuning::{ForestTuning, MeteorTuning, TrafficTuning};

/// Shared configuration constants
pub mod consts {
    /// Maximum dt handed to physics, to prevent spiral of death on slow frames
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Analog stick deadzone (magnitude below this is floored to zero)
    pub const STICK_DEADZONE: f32 = 0.2;

    /// Knockback displacement applied to the player on a hostile hit
    pub const KNOCKBACK_DISTANCE: f32 = 50.0;

    /// Score awarded per hostile destroyed by a projectile
    pub const KILL_SCORE: u64 = 10;

    /// Weaker second impulse for the double jump
    pub const DOUBLE_JUMP_FACTOR: f32 = 0.8;
}

/// Invincibility flash phase: visible on even phases of a 10 Hz square wave.
///
/// The renderer skips the player sprite on odd phases while invincible.
#[inline]
pub fn flash_visible(time_secs: f32) -> bool {
    (time_secs * 10.0).floor() as i64 % 2 == 0
}
