//! Axis-aligned rectangle math shared by the spatial index, the collision
//! detector and the resolver.
//!
//! All rectangles live in world space and are expressed as a top-left corner
//! plus a width and height. Overlap tests use strict inequalities, so two
//! rectangles that merely touch along an edge do **not** overlap. Zero-sized
//! rectangles are valid and simply never overlap anything on a degenerate
//! axis.

use glam::Vec2;

/// World-space axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
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

    /// Build a rectangle from two opposite corners in any order.
    pub fn from_corners(p0: Vec2, p1: Vec2) -> Self {
        let min = p0.min(p1);
        let max = p0.max(p1);
        Self {
            x: min.x,
            y: min.y,
            w: max.x - min.x,
            h: max.y - min.y,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn max(&self) -> Vec2 {
        Vec2::new(self.right(), self.bottom())
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Strict overlap test: touching edges do not count.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Closed containment: `other` lies entirely inside `self`, edges included.
    #[inline]
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.right() <= self.right()
            && other.y >= self.y
            && other.bottom() <= self.bottom()
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Minimum translation that moves `self` out of `other`.
    ///
    /// The result is non-zero on exactly one axis: the one with the smaller
    /// overlap. Ties go to the Y axis. The sign points away from `other`.
    /// Returns `None` when the rectangles do not overlap.
    pub fn penetration(&self, other: &Rect) -> Option<Vec2> {
        if !self.intersects(other) {
            return None;
        }

        // how far self would have to move left / right (up / down) to clear other
        let overlap_x1 = self.right() - other.x;
        let overlap_x2 = other.right() - self.x;
        let overlap_y1 = self.bottom() - other.y;
        let overlap_y2 = other.bottom() - self.y;

        let overlap_x = overlap_x1.min(overlap_x2);
        let overlap_y = overlap_y1.min(overlap_y2);

        let mtv = if overlap_x < overlap_y {
            if overlap_x1 < overlap_x2 {
                Vec2::new(-overlap_x, 0.0)
            } else {
                Vec2::new(overlap_x, 0.0)
            }
        } else if overlap_y1 < overlap_y2 {
            Vec2::new(0.0, -overlap_y)
        } else {
            Vec2::new(0.0, overlap_y)
        };
        Some(mtv)
    }
}
