//! Axis-aligned integer rectangles in screen space
//!
//! Screen coordinates: origin top-left, y grows downward. A rectangle covers
//! `x..x + w` by `y..y + h` (right and bottom edges excluded).

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Screen-space rectangle (slot, zone, or item bounds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Top-left corner
    #[inline]
    pub fn origin(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    /// Move the rectangle so its top-left corner sits at `origin`
    #[inline]
    pub fn set_origin(&mut self, origin: IVec2) {
        self.x = origin.x;
        self.y = origin.y;
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Center point (rounded toward the origin)
    pub fn center(&self) -> IVec2 {
        IVec2::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Point containment; right and bottom edges are outside
    pub fn contains(&self, point: IVec2) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// True when the intersection has non-zero area.
    /// Rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_edges() {
        let r = Rect::new(10, 20, 50, 50);
        assert!(r.contains(IVec2::new(10, 20)));
        assert!(r.contains(IVec2::new(59, 69)));
        assert!(!r.contains(IVec2::new(60, 40)));
        assert!(!r.contains(IVec2::new(30, 70)));
        assert!(!r.contains(IVec2::new(9, 20)));
    }

    #[test]
    fn test_overlap_requires_area() {
        let a = Rect::new(0, 0, 50, 50);
        // Touching edge only
        assert!(!a.overlaps(&Rect::new(50, 0, 50, 50)));
        assert!(!a.overlaps(&Rect::new(0, 50, 50, 50)));
        // One pixel of overlap
        assert!(a.overlaps(&Rect::new(49, 49, 50, 50)));
        // Containment counts
        assert!(a.overlaps(&Rect::new(10, 10, 5, 5)));
        assert!(Rect::new(10, 10, 5, 5).overlaps(&a));
    }

    #[test]
    fn test_empty_rect_never_overlaps() {
        let a = Rect::new(0, 0, 50, 50);
        assert!(!a.overlaps(&Rect::new(10, 10, 0, 10)));
        assert!(!Rect::new(10, 10, 10, 0).overlaps(&a));
    }

    #[test]
    fn test_set_origin_keeps_size() {
        let mut r = Rect::new(0, 0, 50, 40);
        r.set_origin(IVec2::new(-5, 300));
        assert_eq!(r, Rect::new(-5, 300, 50, 40));
        assert_eq!(r.center(), IVec2::new(20, 320));
    }
}
