//! Game phase, player state and session events
//!
//! All state that drives the per-frame rules lives here; rendering concerns
//! (flash phase, draw order) are exposed as helpers only.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay (invincibility is a timed flag inside this phase)
    Playing,
    /// Session ended; only the restart action leaves this phase
    GameOver,
}

/// How hostile contact hurts the player; a per-game choice, never unified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageModel {
    /// Health decrement plus an invincibility window
    HealthPool,
    /// Any contact ends the session immediately
    Instadeath,
}

/// Horizontal facing, drives projectile direction and sprite flip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    #[inline]
    pub fn sign(&self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// The player singleton of a platformer session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    /// Center position (authoritative)
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity in units per second (positive is down)
    pub vertical_velocity: f32,
    pub facing: Facing,
    pub health: u32,
    /// Remaining invincibility window, seconds (0 when vulnerable)
    pub invincible_left: f32,
    pub grounded: bool,
    /// One airborne re-jump per ground contact
    pub double_jump_available: bool,
}

impl PlayerState {
    pub fn new(pos: Vec2, size: Vec2, health: u32) -> Self {
        Self {
            pos,
            size,
            vertical_velocity: 0.0,
            facing: Facing::Right,
            health,
            invincible_left: 0.0,
            grounded: true,
            double_jump_available: true,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    #[inline]
    pub fn invincible(&self) -> bool {
        self.invincible_left > 0.0
    }

    /// Count the invincibility window down; call once per frame
    pub fn tick_invincibility(&mut self, dt: f32) {
        self.invincible_left = (self.invincible_left - dt).max(0.0);
    }

    /// Apply a damage-causing hit: health down one, window opens.
    ///
    /// No-op while invincible; pickups bypass this path entirely.
    pub fn take_hit(&mut self, invincibility_window: f32) {
        if self.invincible() {
            return;
        }
        self.health = self.health.saturating_sub(1);
        self.invincible_left = invincibility_window;
    }

    /// Update facing from the horizontal input component
    pub fn update_facing(&mut self, move_x: f32) {
        if move_x > 0.0 {
            self.facing = Facing::Right;
        } else if move_x < 0.0 {
            self.facing = Facing::Left;
        }
    }
}

/// Things that happened during a tick, for the host to map to audio/UI.
///
/// Consumed the same frame; never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ProjectileFired,
    HostileDestroyed,
    PlayerHit,
    PickupCollected,
    SessionEnded { score: u64 },
}
