//! Axis-aligned rectangle geometry and pixel masks
//!
//! Every entity derives its bounding rectangle from a float center position
//! plus a size each step; the rectangle is never the source of truth, which
//! avoids float/int drift between position and bounds.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle, stored as center + size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Center position
    pub center: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.size.x / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.size.x / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.size.y / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.size.y / 2.0
    }

    /// Rectangle overlap test (edges touching does not count)
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Grow (or shrink, with negative amounts) around the center
    pub fn inflate(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.center, Vec2::new(self.size.x + dx, self.size.y + dy))
    }

    /// Clamp the center so the rectangle stays inside `bounds`, per axis.
    ///
    /// Returns the corrected center. Each axis is clamped independently; a
    /// rectangle larger than the bounds pins to the min edge.
    pub fn clamped_center(&self, bounds: &Rect) -> Vec2 {
        let mut c = self.center;
        if self.left() < bounds.left() {
            c.x = bounds.left() + self.size.x / 2.0;
        } else if self.right() > bounds.right() {
            c.x = bounds.right() - self.size.x / 2.0;
        }
        if self.top() < bounds.top() {
            c.y = bounds.top() + self.size.y / 2.0;
        } else if self.bottom() > bounds.bottom() {
            c.y = bounds.bottom() - self.size.y / 2.0;
        }
        c
    }
}

/// A per-pixel alpha mask for precise second-stage collision tests.
///
/// Bits are stored row-major; a set bit means an opaque pixel. A placeholder
/// sprite gets a fully solid mask, so a missing asset degrades to plain
/// rectangle collision instead of crashing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteMask {
    pub width: u32,
    pub height: u32,
    bits: Vec<bool>,
}

impl SpriteMask {
    /// Fully opaque mask (the placeholder for missing assets)
    pub fn solid(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![true; (width * height) as usize],
        }
    }

    /// Build a mask from per-pixel alpha values (row-major, opaque above threshold)
    pub fn from_alpha(width: u32, height: u32, alpha: &[u8], threshold: u8) -> Self {
        let mut bits = vec![false; (width * height) as usize];
        for (i, bit) in bits.iter_mut().enumerate() {
            *bit = alpha.get(i).copied().unwrap_or(0) > threshold;
        }
        Self { width, height, bits }
    }

    #[inline]
    fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.bits[(y as u32 * self.width + x as u32) as usize]
    }

    /// Test whether any opaque pixel of `other` (offset by `offset` pixels
    /// relative to this mask's top-left) overlaps an opaque pixel of `self`.
    ///
    /// Callers run a rectangle prefilter first; this is the expensive stage.
    pub fn overlaps(&self, other: &SpriteMask, offset: (i32, i32)) -> bool {
        let x0 = offset.0.max(0);
        let y0 = offset.1.max(0);
        let x1 = (offset.0 + other.width as i32).min(self.width as i32);
        let y1 = (offset.1 + other.height as i32).min(self.height as i32);

        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x, y) && other.get(x - offset.0, y - offset.1) {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges_derive_from_center() {
        let r = Rect::new(Vec2::new(100.0, 50.0), Vec2::new(20.0, 10.0));
        assert_eq!(r.left(), 90.0);
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.top(), 45.0);
        assert_eq!(r.bottom(), 55.0);
    }

    #[test]
    fn test_rect_intersects() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Rect::new(Vec2::new(8.0, 0.0), Vec2::new(10.0, 10.0));
        let c = Rect::new(Vec2::new(20.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        // Touching edges do not overlap
        let d = Rect::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(!a.intersects(&d));
    }

    #[test]
    fn test_clamped_center_left_edge() {
        let field = Rect::new(Vec2::new(400.0, 240.0), Vec2::new(800.0, 480.0));
        let r = Rect::new(Vec2::new(-50.0, 100.0), Vec2::new(40.0, 40.0));
        let c = r.clamped_center(&field);
        let corrected = Rect::new(c, r.size);
        assert_eq!(corrected.left(), 0.0);
        assert_eq!(c.y, 100.0);
    }

    #[test]
    fn test_inflate_negative_shrinks_hitbox() {
        let r = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(40.0, 60.0));
        let hb = r.inflate(0.0, -30.0);
        assert_eq!(hb.size.y, 30.0);
        assert_eq!(hb.center, r.center);
    }

    #[test]
    fn test_solid_masks_overlap_like_rects() {
        let a = SpriteMask::solid(10, 10);
        let b = SpriteMask::solid(10, 10);
        assert!(a.overlaps(&b, (5, 5)));
        assert!(!a.overlaps(&b, (10, 0)));
    }

    #[test]
    fn test_sparse_masks_need_pixel_overlap() {
        // Opaque only in the top-left quadrant
        let mut alpha = vec![0u8; 64];
        for y in 0..4 {
            for x in 0..4 {
                alpha[y * 8 + x] = 255;
            }
        }
        let a = SpriteMask::from_alpha(8, 8, &alpha, 0);
        let b = SpriteMask::from_alpha(8, 8, &alpha, 0);
        // Rect-level overlap but opaque regions miss each other
        assert!(!a.overlaps(&b, (4, 4)));
        assert!(a.overlaps(&b, (2, 2)));
    }
}
