//! Input aggregation: keyboard, gamepad and mouse merged into one frame
//!
//! The games never see devices. The host samples raw device state each frame
//! and the aggregator merges it into a single normalized movement vector plus
//! rate-limited action edges. A missing device contributes a zero vector and
//! no edges; it is never an error.

use glam::Vec2;

use crate::consts::STICK_DEADZONE;

/// Held keys sampled by the host this frame
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyboardState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
    pub jump: bool,
    pub pause: bool,
    pub restart: bool,
    pub quit: bool,
}

/// Gamepad state sampled by the host this frame
#[derive(Debug, Clone, Copy, Default)]
pub struct GamepadState {
    /// Left analog stick, raw axes in [-1, 1] (positive y is down)
    pub stick: Vec2,
    /// Digital hat, each axis in {-1, 0, 1} (positive y is down)
    pub hat: (i8, i8),
    pub fire: bool,
    pub jump: bool,
    pub restart: bool,
}

/// Mouse state sampled by the host this frame
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseState {
    pub pos: Vec2,
    pub fire: bool,
}

/// One frame of merged input, consumed by a game tick
#[derive(Debug, Clone, Copy, Default)]
pub struct InputFrame {
    /// Normalized movement direction, or zero
    pub move_dir: Vec2,
    /// Rate-limited fire trigger
    pub fire: bool,
    /// Rate-limited jump trigger
    pub jump: bool,
    /// Rate-limited pause toggle
    pub pause: bool,
    pub restart: bool,
    pub quit: bool,
    /// Pointer position, for games that steer by mouse. Present only while
    /// no gamepad is connected; a connected pad owns steering even when idle.
    pub pointer: Option<Vec2>,
}

/// A rate-limit "edge": a held button fires once per cooldown window.
///
/// This is deliberately not a press/release transition; holding the button
/// retriggers every `cooldown` seconds.
#[derive(Debug, Clone, Copy)]
struct CooldownEdge {
    cooldown: f32,
    last_fire: f32,
}

impl CooldownEdge {
    fn new(cooldown: f32) -> Self {
        Self {
            cooldown,
            // Ready immediately on the first press
            last_fire: -cooldown,
        }
    }

    fn trigger(&mut self, held: bool, now: f32) -> bool {
        if !held || now - self.last_fire < self.cooldown {
            return false;
        }
        self.last_fire = now;
        true
    }

    fn reset(&mut self) {
        self.last_fire = -self.cooldown;
    }
}

/// Merges device snapshots into an [`InputFrame`].
///
/// Per-axis policy: keyboard wins when nonzero, otherwise the deadzone-floored
/// analog stick applies, and a nonzero digital hat overrides the stick.
#[derive(Debug, Clone)]
pub struct InputAggregator {
    deadzone: f32,
    fire_edge: CooldownEdge,
    jump_edge: CooldownEdge,
    pause_edge: CooldownEdge,
}

/// Pause retrigger window, shared by all games
const PAUSE_COOLDOWN: f32 = 0.3;

impl InputAggregator {
    pub fn new(fire_cooldown: f32, jump_cooldown: f32) -> Self {
        Self {
            deadzone: STICK_DEADZONE,
            fire_edge: CooldownEdge::new(fire_cooldown),
            jump_edge: CooldownEdge::new(jump_cooldown),
            pause_edge: CooldownEdge::new(PAUSE_COOLDOWN),
        }
    }

    /// Forget cooldown history. Hosts call this whenever a session restarts,
    /// so edge timing from the previous run does not leak into the next one.
    pub fn reset(&mut self) {
        self.fire_edge.reset();
        self.jump_edge.reset();
        self.pause_edge.reset();
    }

    /// Merge this frame's device snapshots. `now` is session time in seconds.
    pub fn poll(
        &mut self,
        now: f32,
        keyboard: &KeyboardState,
        gamepad: Option<&GamepadState>,
        mouse: Option<&MouseState>,
    ) -> InputFrame {
        let kb_axis = Vec2::new(
            keyboard.right as i32 as f32 - keyboard.left as i32 as f32,
            keyboard.down as i32 as f32 - keyboard.up as i32 as f32,
        );

        let mut dir = kb_axis;
        if let Some(pad) = gamepad {
            let stick = apply_deadzone(pad.stick, self.deadzone);
            if dir.x == 0.0 {
                dir.x = stick.x;
            }
            if dir.y == 0.0 {
                dir.y = stick.y;
            }
            // Digital hat overrides the stick per axis
            if pad.hat.0 != 0 {
                dir.x = pad.hat.0 as f32;
            }
            if pad.hat.1 != 0 {
                dir.y = pad.hat.1 as f32;
            }
        }

        let fire_held =
            keyboard.fire || gamepad.is_some_and(|p| p.fire) || mouse.is_some_and(|m| m.fire);
        let jump_held = keyboard.jump || gamepad.is_some_and(|p| p.jump);
        let restart = keyboard.restart || gamepad.is_some_and(|p| p.restart);

        InputFrame {
            move_dir: dir.normalize_or_zero(),
            fire: self.fire_edge.trigger(fire_held, now),
            jump: self.jump_edge.trigger(jump_held, now),
            pause: self.pause_edge.trigger(keyboard.pause, now),
            restart,
            quit: keyboard.quit,
            // A connected gamepad owns steering; the pointer only applies
            // when no pad is present
            pointer: if gamepad.is_some() {
                None
            } else {
                mouse.map(|m| m.pos)
            },
        }
    }
}

/// Floor any axis magnitude below the deadzone to zero
fn apply_deadzone(stick: Vec2, deadzone: f32) -> Vec2 {
    Vec2::new(
        if stick.x.abs() < deadzone { 0.0 } else { stick.x },
        if stick.y.abs() < deadzone { 0.0 } else { stick.y },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregator() -> InputAggregator {
        InputAggregator::new(0.3, 0.2)
    }

    #[test]
    fn test_absent_devices_yield_zero() {
        let mut agg = aggregator();
        let frame = agg.poll(0.0, &KeyboardState::default(), None, None);
        assert_eq!(frame.move_dir, Vec2::ZERO);
        assert!(!frame.fire);
        assert!(!frame.jump);
        assert!(frame.pointer.is_none());
    }

    #[test]
    fn test_deadzone_floors_small_drift() {
        let mut agg = aggregator();
        let pad = GamepadState {
            stick: Vec2::new(0.15, -0.1),
            ..Default::default()
        };
        let frame = agg.poll(0.0, &KeyboardState::default(), Some(&pad), None);
        assert_eq!(frame.move_dir, Vec2::ZERO);
    }

    #[test]
    fn test_keyboard_wins_gamepad_fills_zero_axes() {
        let mut agg = aggregator();
        let kb = KeyboardState {
            right: true,
            ..Default::default()
        };
        let pad = GamepadState {
            stick: Vec2::new(-1.0, 1.0),
            ..Default::default()
        };
        let frame = agg.poll(0.0, &kb, Some(&pad), None);
        // x from keyboard, y from the stick
        assert!(frame.move_dir.x > 0.0);
        assert!(frame.move_dir.y > 0.0);
    }

    #[test]
    fn test_hat_overrides_stick() {
        let mut agg = aggregator();
        let pad = GamepadState {
            stick: Vec2::new(1.0, 0.0),
            hat: (-1, 0),
            ..Default::default()
        };
        let frame = agg.poll(0.0, &KeyboardState::default(), Some(&pad), None);
        assert_eq!(frame.move_dir, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_diagonal_is_normalized() {
        let mut agg = aggregator();
        let kb = KeyboardState {
            right: true,
            down: true,
            ..Default::default()
        };
        let frame = agg.poll(0.0, &kb, None, None);
        assert!((frame.move_dir.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_fire_cooldown_rate_limits_held_button() {
        let mut agg = aggregator();
        let kb = KeyboardState {
            fire: true,
            ..Default::default()
        };
        let mut fires = 0;
        // Hold fire for one second at 60 Hz with a 0.3 s cooldown
        for frame_idx in 0..60 {
            let now = frame_idx as f32 / 60.0;
            if agg.poll(now, &kb, None, None).fire {
                fires += 1;
            }
        }
        // Roughly every 0.3 s starting at t = 0
        assert_eq!(fires, 4);
    }

    #[test]
    fn test_connected_gamepad_suppresses_pointer() {
        let mut agg = aggregator();
        // Pad plugged in but idle; the cursor must not steer
        let pad = GamepadState::default();
        let mouse = MouseState {
            pos: Vec2::new(100.0, 100.0),
            fire: false,
        };
        let frame = agg.poll(0.0, &KeyboardState::default(), Some(&pad), Some(&mouse));
        assert!(frame.pointer.is_none());
    }

    #[test]
    fn test_reset_rearms_edges_immediately() {
        let mut agg = aggregator();
        let kb = KeyboardState {
            fire: true,
            ..Default::default()
        };
        assert!(agg.poll(10.0, &kb, None, None).fire);
        assert!(!agg.poll(10.1, &kb, None, None).fire);
        // A session restart forgets the edge history
        agg.reset();
        assert!(agg.poll(10.1, &kb, None, None).fire);
    }

    #[test]
    fn test_mouse_fire_counts_as_held() {
        let mut agg = aggregator();
        let mouse = MouseState {
            pos: Vec2::new(10.0, 20.0),
            fire: true,
        };
        let frame = agg.poll(0.0, &KeyboardState::default(), None, Some(&mouse));
        assert!(frame.fire);
        assert_eq!(frame.pointer, Some(Vec2::new(10.0, 20.0)));
    }
}
