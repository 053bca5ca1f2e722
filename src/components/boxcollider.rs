//! Axis-aligned box collider.
//!
//! A [`BoxCollider`] describes a rectangle centered on the entity's
//! [`MapPosition`](super::mapposition::MapPosition), scaled by its optional
//! [`Scale`](super::scale::Scale) and shifted by a scaled local offset.
//! [`BoxCollider::bounds`] is the single place where world-space bounds are
//! computed, so broad and narrow phase always agree within a frame.
//!
//! Filtering uses a layer/mask pair: `layer` is what this collider *is*,
//! `mask` is what it *reacts to*. Two colliders interact only when each
//! one's mask includes the other's layer.

use bevy_ecs::prelude::Component;
use glam::Vec2;

use crate::geometry::Rect;

/// Layer assigned by [`BoxCollider::new`].
pub const DEFAULT_LAYER: u32 = 0b0001;
/// Mask that accepts every layer.
pub const MASK_ALL: u32 = u32::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    /// Full width and height in local space.
    pub size: Vec2,
    /// Local offset from the entity position, scaled with the entity.
    pub offset: Vec2,
    /// Physics layer(s) this collider is on.
    pub layer: u32,
    /// Physics layer(s) this collider interacts with.
    pub mask: u32,
    /// Part of the static world geometry: never moved, never drives detection.
    pub is_static: bool,
    /// Reports overlaps but never causes a physical response.
    pub is_trigger: bool,
}

impl BoxCollider {
    /// Create a solid collider of the given size on [`DEFAULT_LAYER`] that
    /// collides with everything.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            offset: Vec2::ZERO,
            layer: DEFAULT_LAYER,
            mask: MASK_ALL,
            is_static: false,
            is_trigger: false,
        }
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_layer(mut self, layer: u32) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_mask(mut self, mask: u32) -> Self {
        self.mask = mask;
        self
    }

    /// Mark as a trigger volume.
    pub fn trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    /// Mark as static world geometry.
    pub fn fixed(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// World-space bounds for an entity at `position` with `scale`.
    ///
    /// `position - (size * scale) / 2 + offset * scale`. Negative scales
    /// mirror the box; the result is normalized to a positive width/height.
    pub fn bounds(&self, position: Vec2, scale: Vec2) -> Rect {
        let scaled_size = self.size * scale;
        let p0 = position - scaled_size * 0.5 + self.offset * scale;
        let p1 = p0 + scaled_size;
        Rect::from_corners(p0, p1)
    }

    /// Collision requires mutual permission in both directions.
    #[inline]
    pub fn can_collide_with(&self, other: &Self) -> bool {
        (self.mask & other.layer) != 0 && (other.mask & self.layer) != 0
    }

    /// Exact overlap test against another collider at a different position.
    pub fn overlaps(
        &self,
        position: Vec2,
        scale: Vec2,
        other: &Self,
        other_position: Vec2,
        other_scale: Vec2,
    ) -> bool {
        self.bounds(position, scale)
            .intersects(&other.bounds(other_position, other_scale))
    }

    /// Point containment in world space.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn contains_point(&self, position: Vec2, scale: Vec2, point: Vec2) -> bool {
        self.bounds(position, scale).contains_point(point)
    }
}
