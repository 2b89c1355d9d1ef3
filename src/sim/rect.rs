//! Axis-aligned box geometry
//!
//! Everything in this game is a box: the player, obstacles, platforms and
//! the egg. Coordinates follow the drawing surface convention - origin at
//! the top-left, y growing downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            w: size.x,
            h: size.y,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict overlap test; boxes that merely touch along an edge do not
    /// count as overlapping.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }

    /// Shrink by `margin` on every side. The margin is clamped so the
    /// result never inverts; a heavily inset box degenerates to a point at
    /// the center.
    pub fn inset(&self, margin: f32) -> Rect {
        let m = margin.min(self.w / 2.0).min(self.h / 2.0).max(0.0);
        Rect {
            x: self.x + m,
            y: self.y + m,
            w: self.w - 2.0 * m,
            h: self.h - 2.0 * m,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_is_symmetric() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(20.0, 20.0, 4.0, 4.0);
        assert!(a.overlaps(&b) && b.overlaps(&a));
        assert!(!a.overlaps(&c) && !c.overlaps(&a));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn inset_shrinks_each_side() {
        let r = Rect::new(10.0, 20.0, 40.0, 30.0).inset(10.0);
        assert_eq!(r, Rect::new(20.0, 30.0, 20.0, 10.0));
    }

    #[test]
    fn inset_never_inverts() {
        let r = Rect::new(0.0, 0.0, 8.0, 8.0).inset(10.0);
        assert!(r.w >= 0.0 && r.h >= 0.0);
        let zero = Rect::new(0.0, 0.0, 8.0, 8.0).inset(4.0);
        assert_eq!((zero.w, zero.h), (0.0, 0.0));
    }

    #[test]
    fn degenerate_boxes() {
        // a zero-size box never overlaps itself
        let point = Rect::new(5.0, 5.0, 0.0, 0.0);
        assert!(!point.overlaps(&point));
        // and never overlaps anything it only borders
        let big = Rect::new(0.0, 0.0, 5.0, 10.0);
        assert!(!point.overlaps(&big));
    }
}
