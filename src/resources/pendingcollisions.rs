//! Per-tick collision event queue.
//!
//! The collision detector pushes one [`CollisionEvent`] per confirmed overlap
//! into [`PendingCollisions`]. Nothing is delivered while detection and
//! resolution are running; [`flush_collision_events`] drains the queue once
//! the pass is complete and triggers the events for observers.
//!
//! When both bodies of a pair are movable, each one may find the other as a
//! candidate in the same tick. With `dedupe_pairs` enabled (the default) the
//! second report of an unordered pair is dropped, so observers see each pair
//! at most once per tick, reported from the side iterated first.
//!
//! [`flush_collision_events`]: crate::systems::collision::flush_collision_events

use bevy_ecs::prelude::*;
use rustc_hash::FxHashSet;

use crate::events::collision::CollisionEvent;

#[derive(Resource, Debug, Clone)]
pub struct PendingCollisions {
    events: Vec<CollisionEvent>,
    seen: FxHashSet<(Entity, Entity)>,
    dedupe_pairs: bool,
}

impl Default for PendingCollisions {
    fn default() -> Self {
        Self::new(true)
    }
}

impl PendingCollisions {
    pub fn new(dedupe_pairs: bool) -> Self {
        Self {
            events: Vec::new(),
            seen: FxHashSet::default(),
            dedupe_pairs,
        }
    }

    pub fn dedupe_pairs(&self) -> bool {
        self.dedupe_pairs
    }

    /// Queue an event for `(a, b)`. Returns false if it was dropped as a
    /// duplicate of a pair already queued this tick.
    pub fn push(&mut self, a: Entity, b: Entity) -> bool {
        if self.dedupe_pairs {
            let key = if a <= b { (a, b) } else { (b, a) };
            if !self.seen.insert(key) {
                return false;
            }
        }
        self.events.push(CollisionEvent { a, b });
        true
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CollisionEvent> {
        self.events.iter()
    }

    /// Take every queued event in insertion order and reset the pair filter.
    pub fn drain(&mut self) -> std::vec::Drain<'_, CollisionEvent> {
        self.seen.clear();
        self.events.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities(n: usize) -> Vec<Entity> {
        let mut world = World::new();
        (0..n).map(|_| world.spawn_empty().id()).collect()
    }

    #[test]
    fn test_push_keeps_order() {
        let e = entities(3);
        let mut pending = PendingCollisions::default();
        assert!(pending.push(e[0], e[1]));
        assert!(pending.push(e[2], e[0]));
        let drained: Vec<_> = pending.drain().collect();
        assert_eq!(drained, vec![
            CollisionEvent { a: e[0], b: e[1] },
            CollisionEvent { a: e[2], b: e[0] },
        ]);
        assert!(pending.is_empty());
    }

    #[test]
    fn test_dedupe_drops_reversed_pair() {
        let e = entities(2);
        let mut pending = PendingCollisions::new(true);
        assert!(pending.push(e[0], e[1]));
        assert!(!pending.push(e[1], e[0]));
        assert!(!pending.push(e[0], e[1]));
        assert_eq!(pending.len(), 1);
    }

    #[test]
    fn test_without_dedupe_both_sides_reported() {
        let e = entities(2);
        let mut pending = PendingCollisions::new(false);
        assert!(pending.push(e[0], e[1]));
        assert!(pending.push(e[1], e[0]));
        assert_eq!(pending.len(), 2);
    }

    #[test]
    fn test_drain_resets_pair_filter() {
        let e = entities(2);
        let mut pending = PendingCollisions::new(true);
        pending.push(e[0], e[1]);
        pending.drain().for_each(drop);
        assert!(pending.push(e[1], e[0]));
    }
}
