//! Quadtree spatial index used by the broad phase.
//!
//! [`Quadtree`] is a generic region quadtree over axis-aligned rectangles.
//! Each node keeps a bucket of `(id, bounds)` entries and, once split, four
//! child quadrants. An entry is pushed down only into a child that fully
//! contains it; entries straddling a split line stay at the deepest ancestor
//! that contains them and are never duplicated.
//!
//! The tree carries no state across frames: the collision detector calls
//! [`Quadtree::clear`] and re-inserts every collider each tick. Incremental
//! updates or a sorted index would scale better for very large body counts.
//!
//! [`SpatialIndex`] wraps a `Quadtree<Entity>` as an ECS resource whose root
//! covers the configured world bounds.

use std::ops::{Deref, DerefMut};

use bevy_ecs::prelude::*;

use crate::geometry::Rect;

/// Default bucket capacity before a node splits.
pub const MAX_OBJECTS: usize = 10;
/// Default maximum depth (root is level 0).
pub const MAX_LEVELS: usize = 5;

/// Region quadtree storing copyable ids with their bounds.
#[derive(Debug, Clone)]
pub struct Quadtree<T> {
    level: usize,
    bounds: Rect,
    max_objects: usize,
    max_levels: usize,
    objects: Vec<(T, Rect)>,
    /// Quadrants: 0 top-right, 1 top-left, 2 bottom-left, 3 bottom-right.
    nodes: Option<Box<[Quadtree<T>; 4]>>,
}

impl<T: Copy> Quadtree<T> {
    /// Create a root node with the default limits.
    pub fn new(bounds: Rect) -> Self {
        Self::with_limits(bounds, MAX_OBJECTS, MAX_LEVELS)
    }

    /// Create a root node with custom split capacity and depth.
    pub fn with_limits(bounds: Rect, max_objects: usize, max_levels: usize) -> Self {
        Self::node(0, bounds, max_objects, max_levels)
    }

    fn node(level: usize, bounds: Rect, max_objects: usize, max_levels: usize) -> Self {
        Self {
            level,
            bounds,
            max_objects,
            max_levels,
            objects: Vec::new(),
            nodes: None,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn is_split(&self) -> bool {
        self.nodes.is_some()
    }

    /// Empty every bucket and release all children.
    pub fn clear(&mut self) {
        self.objects.clear();
        if let Some(mut nodes) = self.nodes.take() {
            for node in nodes.iter_mut() {
                node.clear();
            }
        }
    }

    /// Insert an entry, splitting this node if its bucket overflows.
    pub fn insert(&mut self, id: T, bounds: Rect) {
        if let Some(nodes) = self.nodes.as_mut()
            && let Some(index) = Self::child_index(nodes, &bounds)
        {
            nodes[index].insert(id, bounds);
            return;
        }

        self.objects.push((id, bounds));

        if self.objects.len() > self.max_objects && self.level < self.max_levels {
            if self.nodes.is_none() {
                self.split();
            }
            self.redistribute();
        }
    }

    /// Append to `out` every id whose bounds intersect `area`.
    ///
    /// May return entries that only share a node with `area`'s region, never
    /// misses one that truly intersects it. Entries outside the root bounds
    /// live in the root bucket and are still tested.
    pub fn query<E: Extend<T>>(&self, area: &Rect, out: &mut E) {
        let inside = area.intersects(&self.bounds);
        if !inside && self.level > 0 {
            return;
        }

        out.extend(
            self.objects
                .iter()
                .filter(|(_, bounds)| area.intersects(bounds))
                .map(|(id, _)| *id),
        );

        if inside && let Some(nodes) = self.nodes.as_ref() {
            for node in nodes.iter() {
                node.query(area, out);
            }
        }
    }

    /// Total number of stored entries in this node and all descendants.
    pub fn len(&self) -> usize {
        self.objects.len()
            + self
                .nodes
                .as_ref()
                .map(|nodes| nodes.iter().map(Quadtree::len).sum())
                .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of levels currently in use (1 for an unsplit root).
    pub fn depth(&self) -> usize {
        1 + self
            .nodes
            .as_ref()
            .map(|nodes| nodes.iter().map(Quadtree::depth).max().unwrap_or(0))
            .unwrap_or(0)
    }

    fn split(&mut self) {
        let half_w = self.bounds.w / 2.0;
        let half_h = self.bounds.h / 2.0;
        let x = self.bounds.x;
        let y = self.bounds.y;
        let level = self.level + 1;
        let (max_objects, max_levels) = (self.max_objects, self.max_levels);
        let child = |bounds| Self::node(level, bounds, max_objects, max_levels);

        self.nodes = Some(Box::new([
            child(Rect::new(x + half_w, y, half_w, half_h)),
            child(Rect::new(x, y, half_w, half_h)),
            child(Rect::new(x, y + half_h, half_w, half_h)),
            child(Rect::new(x + half_w, y + half_h, half_w, half_h)),
        ]));
    }

    /// Move every bucket entry that fits in a single child down into it.
    fn redistribute(&mut self) {
        let Some(nodes) = self.nodes.as_mut() else {
            return;
        };
        let mut i = 0;
        while i < self.objects.len() {
            let (id, bounds) = self.objects[i];
            if let Some(index) = Self::child_index(nodes, &bounds) {
                nodes[index].insert(id, bounds);
                self.objects.swap_remove(i);
            } else {
                i += 1;
            }
        }
    }

    /// Index of the single child that fully contains `bounds`, if any.
    fn child_index(nodes: &[Quadtree<T>; 4], bounds: &Rect) -> Option<usize> {
        nodes.iter().position(|node| node.bounds.contains(bounds))
    }
}

/// Broad-phase spatial index resource keyed by entity.
#[derive(Resource, Debug, Clone)]
pub struct SpatialIndex(pub Quadtree<Entity>);

impl SpatialIndex {
    pub fn new(world_bounds: Rect) -> Self {
        Self(Quadtree::new(world_bounds))
    }

    pub fn with_limits(world_bounds: Rect, max_objects: usize, max_levels: usize) -> Self {
        Self(Quadtree::with_limits(world_bounds, max_objects, max_levels))
    }
}

impl Deref for SpatialIndex {
    type Target = Quadtree<Entity>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for SpatialIndex {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> Rect {
        Rect::new(0.0, 0.0, 1000.0, 1000.0)
    }

    fn query_sorted(tree: &Quadtree<u32>, area: Rect) -> Vec<u32> {
        let mut found = Vec::new();
        tree.query(&area, &mut found);
        found.sort_unstable();
        found
    }

    #[test]
    fn test_empty_tree_query_is_empty() {
        let tree: Quadtree<u32> = Quadtree::new(world());
        assert!(query_sorted(&tree, world()).is_empty());
        assert!(tree.is_empty());
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn test_insert_below_capacity_does_not_split() {
        let mut tree = Quadtree::new(world());
        for i in 0..MAX_OBJECTS as u32 {
            tree.insert(i, Rect::new(i as f32 * 20.0, 10.0, 5.0, 5.0));
        }
        assert!(!tree.is_split());
        assert_eq!(tree.len(), MAX_OBJECTS);
    }

    #[test]
    fn test_overflow_splits_and_redistributes() {
        let mut tree = Quadtree::new(world());
        // all in the top-left quadrant
        for i in 0..=MAX_OBJECTS as u32 {
            tree.insert(i, Rect::new(i as f32 * 30.0, 10.0, 5.0, 5.0));
        }
        assert!(tree.is_split());
        assert_eq!(tree.objects.len(), 0);
        assert_eq!(tree.len(), MAX_OBJECTS + 1);
        let nodes = tree.nodes.as_ref().unwrap();
        assert_eq!(nodes[1].len(), MAX_OBJECTS + 1);
    }

    #[test]
    fn test_straddling_entry_stays_at_parent() {
        let mut tree = Quadtree::new(world());
        for i in 0..=MAX_OBJECTS as u32 {
            tree.insert(i, Rect::new(10.0 + i as f32, 10.0, 5.0, 5.0));
        }
        assert!(tree.is_split());
        // crosses the vertical midline at x = 500
        tree.insert(99, Rect::new(490.0, 100.0, 20.0, 20.0));
        assert_eq!(tree.objects.len(), 1);
        assert_eq!(tree.objects[0].0, 99);
        assert_eq!(tree.len(), MAX_OBJECTS + 2);
    }

    #[test]
    fn test_depth_limited_by_max_levels() {
        let mut tree = Quadtree::with_limits(Rect::new(0.0, 0.0, 1024.0, 1024.0), 1, 3);
        for i in 0..50u32 {
            tree.insert(i, Rect::new(1.0, 1.0, 0.5, 0.5));
        }
        // root + 3 levels of splits
        assert_eq!(tree.depth(), 4);
        assert_eq!(tree.len(), 50);
        assert_eq!(query_sorted(&tree, Rect::new(0.0, 0.0, 2.0, 2.0)).len(), 50);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut tree = Quadtree::new(world());
        for i in 0..40u32 {
            tree.insert(i, Rect::new((i * 20) as f32, (i * 20) as f32, 5.0, 5.0));
        }
        assert!(tree.is_split());
        tree.clear();
        assert!(tree.is_empty());
        assert!(!tree.is_split());
        tree.clear();
        assert!(tree.is_empty());
    }

    #[test]
    fn test_query_disjoint_area_returns_nothing() {
        let mut tree = Quadtree::new(world());
        tree.insert(1, Rect::new(10.0, 10.0, 5.0, 5.0));
        assert!(query_sorted(&tree, Rect::new(500.0, 500.0, 10.0, 10.0)).is_empty());
    }

    #[test]
    fn test_query_touching_edge_excluded() {
        let mut tree = Quadtree::new(world());
        tree.insert(1, Rect::new(10.0, 10.0, 5.0, 5.0));
        assert!(query_sorted(&tree, Rect::new(15.0, 10.0, 5.0, 5.0)).is_empty());
        assert_eq!(query_sorted(&tree, Rect::new(14.0, 10.0, 5.0, 5.0)), vec![1]);
    }

    #[test]
    fn test_out_of_world_entries_are_still_found() {
        let mut tree = Quadtree::new(world());
        for i in 0..30u32 {
            tree.insert(i, Rect::new((i * 30) as f32, (i * 30) as f32, 5.0, 5.0));
        }
        tree.insert(100, Rect::new(1500.0, 1500.0, 10.0, 10.0));
        tree.insert(101, Rect::new(-50.0, 200.0, 10.0, 10.0));
        assert_eq!(query_sorted(&tree, Rect::new(1495.0, 1495.0, 10.0, 10.0)), vec![100]);
        assert_eq!(query_sorted(&tree, Rect::new(-45.0, 205.0, 2.0, 2.0)), vec![101]);
    }

    #[test]
    fn test_query_matches_brute_force_on_random_scatter() {
        let mut rng = fastrand::Rng::with_seed(0xC0FFEE);
        let mut tree = Quadtree::new(world());
        let mut all = Vec::new();
        for id in 0..500u32 {
            let r = Rect::new(
                rng.f32() * 980.0,
                rng.f32() * 980.0,
                rng.f32() * 20.0,
                rng.f32() * 20.0,
            );
            tree.insert(id, r);
            all.push((id, r));
        }
        for _ in 0..100 {
            let area = Rect::new(rng.f32() * 900.0, rng.f32() * 900.0, 100.0, 60.0);
            let mut expected: Vec<u32> = all
                .iter()
                .filter(|(_, r)| area.intersects(r))
                .map(|(id, _)| *id)
                .collect();
            expected.sort_unstable();
            assert_eq!(query_sorted(&tree, area), expected);
        }
    }

    #[test]
    fn test_query_extends_smallvec() {
        let mut tree = Quadtree::new(world());
        tree.insert(7u32, Rect::new(0.0, 0.0, 10.0, 10.0));
        let mut found: smallvec::SmallVec<[u32; 4]> = smallvec::SmallVec::new();
        tree.query(&Rect::new(5.0, 5.0, 1.0, 1.0), &mut found);
        assert_eq!(found.as_slice(), &[7]);
    }
}
