//! Physics integration: gravity, jumping, clamping, axis-separated resolution
//!
//! All constants are tuned in units per second and multiplied by raw dt at
//! every use site; there is no fixed-per-frame assumption anywhere.

use glam::Vec2;

use super::rect::Rect;
use super::state::PlayerState;
use crate::consts::DOUBLE_JUMP_FACTOR;

/// Playfield and movement constants for the platformer integration
#[derive(Debug, Clone, Copy)]
pub struct PlatformerParams {
    /// Downward acceleration, units/s²
    pub gravity: f32,
    /// Horizontal speed, units/s
    pub move_speed: f32,
    /// Ground height (player bottom rests here)
    pub ground_y: f32,
    /// Playfield bounds, clamped on all four sides
    pub field: Rect,
}

/// Jump state machine: Grounded -> Jumping -> DoubleJumping -> Grounded.
///
/// `jump_impulse` is negative (up). The second, airborne jump is weaker and
/// consumes the charge; with no charge left the input has no effect.
pub fn try_jump(player: &mut PlayerState, jump_impulse: f32) {
    if player.grounded {
        player.vertical_velocity = jump_impulse;
        player.grounded = false;
    } else if player.double_jump_available {
        player.vertical_velocity = jump_impulse * DOUBLE_JUMP_FACTOR;
        player.double_jump_available = false;
    }
}

/// One platformer integration step.
///
/// Order matters for correct ground detection: gravity, vertical displacement,
/// horizontal displacement, ground contact, then the boundary clamp.
pub fn integrate_platformer(player: &mut PlayerState, move_x: f32, dt: f32, p: &PlatformerParams) {
    player.vertical_velocity += p.gravity * dt;
    player.pos.y += player.vertical_velocity * dt;
    player.pos.x += move_x * p.move_speed * dt;

    if player.bounds().bottom() >= p.ground_y {
        player.pos.y = p.ground_y - player.size.y / 2.0;
        player.vertical_velocity = 0.0;
        player.grounded = true;
        player.double_jump_available = true;
    } else {
        player.grounded = false;
    }

    player.pos = player.bounds().clamped_center(&p.field);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// A static or dynamic blocker for axis-separated resolution
#[derive(Debug, Clone, Copy)]
pub struct Obstacle {
    pub bounds: Rect,
    /// Contact ends the session instead of blocking (vehicle rule)
    pub fatal: bool,
}

/// Outcome of resolving one axis of movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOutcome {
    Clear,
    /// Snapped out of at least one obstacle on the side of travel
    Blocked,
    /// Touched a fatal obstacle; caller transitions to GameOver
    Fatal,
}

/// Resolve one axis of already-applied movement against obstacles.
///
/// The caller moves the hitbox along a single axis first, then calls this;
/// only that axis's component is corrected (snap to the obstacle edge on the
/// side of travel). `travel` is the sign of this axis's movement.
pub fn resolve_axis(
    hitbox: &mut Rect,
    travel: f32,
    axis: Axis,
    obstacles: &[Obstacle],
) -> AxisOutcome {
    let mut outcome = AxisOutcome::Clear;
    for obstacle in obstacles {
        if !hitbox.intersects(&obstacle.bounds) {
            continue;
        }
        if obstacle.fatal {
            return AxisOutcome::Fatal;
        }
        match axis {
            Axis::X => {
                if travel > 0.0 {
                    hitbox.center.x = obstacle.bounds.left() - hitbox.size.x / 2.0;
                } else if travel < 0.0 {
                    hitbox.center.x = obstacle.bounds.right() + hitbox.size.x / 2.0;
                }
            }
            Axis::Y => {
                if travel > 0.0 {
                    hitbox.center.y = obstacle.bounds.top() - hitbox.size.y / 2.0;
                } else if travel < 0.0 {
                    hitbox.center.y = obstacle.bounds.bottom() + hitbox.size.y / 2.0;
                }
            }
        }
        outcome = AxisOutcome::Blocked;
    }
    outcome
}
