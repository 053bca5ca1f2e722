//! Collision event type and a simple observer.
//!
//! The collision detector queues a [`CollisionEvent`] for every confirmed
//! overlap, solid or trigger. Once detection and resolution are done for the
//! tick, the queue is drained and each event is triggered for observers.
//! Subscribe with `world.add_observer(|trigger: On<CollisionEvent>| ...)` to
//! react in a decoupled manner (damage, sound, despawn, etc.).
//!
//! [`observe_log_collision`] is a reference observer that only logs.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

/// Event fired when two entities with compatible colliders overlap.
///
/// `a` is the movable body that was being tested, `b` the candidate it hit.
/// Events are delivered in iteration order of bodies, then candidates.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionEvent {
    pub a: Entity,
    pub b: Entity,
}

impl CollisionEvent {
    /// Whether `entity` participates in this collision.
    pub fn involves(&self, entity: Entity) -> bool {
        self.a == entity || self.b == entity
    }

    /// The participant that is not `entity`, if `entity` is one of them.
    pub fn other(&self, entity: Entity) -> Option<Entity> {
        if self.a == entity {
            Some(self.b)
        } else if self.b == entity {
            Some(self.a)
        } else {
            None
        }
    }
}

/// Global observer that logs every collision at debug level.
pub fn observe_log_collision(trigger: On<CollisionEvent>) {
    let event = trigger.event();
    debug!("Collision detected: {:?} and {:?}", event.a, event.b);
}
