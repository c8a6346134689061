//! Platform boundary traits
//!
//! The simulation consumes these; implementations (a real renderer, a mixer,
//! an asset loader) live in the enclosing application. Headless stand-ins are
//! provided for tests and the demo runner.

use glam::Vec2;

use crate::sim::rect::SpriteMask;

/// Handle to a loaded image, opaque to the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteId(pub u32);

/// Handle to a loaded audio clip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClipId(pub u32);

/// A resolved sprite: what the simulation needs to place and collide it
#[derive(Debug, Clone)]
pub struct Sprite {
    pub id: SpriteId,
    pub size: Vec2,
    pub mask: SpriteMask,
}

impl Sprite {
    /// Visible placeholder for a missing asset: a solid default-size rect.
    /// The core keeps running; the provider's failure never aborts a frame.
    pub fn placeholder(id: SpriteId) -> Self {
        Self {
            id,
            size: Vec2::new(50.0, 50.0),
            mask: SpriteMask::solid(50, 50),
        }
    }
}

/// Blits images at positions; draw order is the caller's responsibility
pub trait Renderer {
    fn draw(&mut self, sprite: SpriteId, pos: Vec2);
}

/// Fire-and-forget audio; the simulation never observes a result
pub trait AudioPlayer {
    fn play_once(&mut self, clip: ClipId);
    fn play_looping(&mut self, clip: ClipId);
}

/// Resolves logical asset names. Missing assets yield placeholders.
pub trait AssetProvider {
    fn sprite(&self, name: &str) -> Sprite;
    fn clip(&self, name: &str) -> ClipId;
}

/// Painter's-algorithm sort key for top-down scenes: entities lower on
/// screen (larger center y) draw later, on top.
#[inline]
pub fn depth_key(pos: Vec2) -> f32 {
    pos.y
}

/// Renderer that records draw calls without output (headless runs, tests)
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub draws: usize,
    /// Every call in emission order, for asserting on draw sequences
    pub calls: Vec<(SpriteId, Vec2)>,
}

impl Renderer for NullRenderer {
    fn draw(&mut self, sprite: SpriteId, pos: Vec2) {
        self.draws += 1;
        self.calls.push((sprite, pos));
    }
}

/// Audio player that discards playback
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioPlayer for NullAudio {
    fn play_once(&mut self, _clip: ClipId) {}
    fn play_looping(&mut self, _clip: ClipId) {}
}

/// Provider that resolves every name to a placeholder
#[derive(Debug, Default)]
pub struct PlaceholderAssets;

impl AssetProvider for PlaceholderAssets {
    fn sprite(&self, _name: &str) -> Sprite {
        Sprite::placeholder(SpriteId(0))
    }

    fn clip(&self, _name: &str) -> ClipId {
        ClipId(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_is_solid() {
        let s = Sprite::placeholder(SpriteId(3));
        assert_eq!(s.size, Vec2::new(50.0, 50.0));
        assert!(s.mask.overlaps(&SpriteMask::solid(1, 1), (25, 25)));
    }

    #[test]
    fn test_depth_key_orders_lower_entities_later() {
        let mut entries = [Vec2::new(0.0, 30.0), Vec2::new(0.0, 10.0), Vec2::new(0.0, 20.0)];
        entries.sort_by(|a, b| depth_key(*a).total_cmp(&depth_key(*b)));
        assert_eq!(entries[0].y, 10.0);
        assert_eq!(entries[2].y, 30.0);
    }
}
