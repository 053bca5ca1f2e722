//! Collision detection system.
//!
//! Runs once per tick, after [`movement`](crate::systems::movement::movement):
//!
//! 1. **Broad phase** – clear the [`SpatialIndex`] and insert the bounds of
//!    every entity with a [`BoxCollider`].
//! 2. **Narrow phase** – for every collider that also has a movable
//!    [`RigidBody`], query the index with its bounds and test each candidate:
//!    mutual layer/mask permission, then an exact AABB overlap.
//! 3. **Response** – each confirmed overlap queues a [`CollisionEvent`]. If
//!    neither side is a trigger, the pair is resolved right away: against an
//!    immovable candidate (no rigid body, `Static`, `Kinematic`, or a static
//!    collider) the mover is depenetrated; against a `Dynamic` candidate both
//!    bodies share the correction and exchange an impulse.
//!
//! [`flush_collision_events`] then delivers the queued events to observers.
//!
//! # Ordering
//!
//! Candidates are visited in quadtree traversal order. Corrections are
//! applied immediately and sequentially, so a body pushed by one contact is
//! tested against later candidates at its new position, and a later push may
//! re-introduce an overlap resolved earlier in the same tick. There is no
//! iteration to convergence.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, trace};
use smallvec::SmallVec;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::{BodyType, RigidBody};
use crate::components::scale::Scale;
use crate::resources::pendingcollisions::PendingCollisions;
use crate::resources::spatialindex::SpatialIndex;
use crate::systems::resolve::{ContactBody, resolve_dynamic, resolve_static};

/// How a candidate reacts when hit by a movable body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Response {
    /// Only the mover is pushed out.
    Immovable,
    /// Both bodies share the correction and exchange momentum.
    Dynamic,
}

fn response_of(collider: &BoxCollider, rigidbody: Option<&RigidBody>) -> Response {
    if collider.is_static {
        return Response::Immovable;
    }
    match rigidbody.map(|rb| rb.body_type) {
        None | Some(BodyType::Static) | Some(BodyType::Kinematic) => Response::Immovable,
        Some(BodyType::Dynamic) => Response::Dynamic,
    }
}

/// Whether this body iterates the narrow phase.
fn drives_detection(collider: &BoxCollider, rigidbody: Option<&RigidBody>) -> bool {
    !collider.is_static && rigidbody.is_some_and(RigidBody::is_movable)
}

#[inline]
fn scale_of(scale: Option<&Scale>) -> Vec2 {
    scale.map(|s| s.scale).unwrap_or(Vec2::ONE)
}

pub fn collision_detector(
    mut index: ResMut<SpatialIndex>,
    mut pending: ResMut<PendingCollisions>,
    mut bodies: Query<(
        Entity,
        &mut MapPosition,
        Option<&Scale>,
        &BoxCollider,
        Option<&mut RigidBody>,
    )>,
) {
    // === 1. BROAD PHASE ===
    index.clear();
    for (entity, position, scale, collider, _) in bodies.iter() {
        index.insert(entity, collider.bounds(position.pos, scale_of(scale)));
    }

    // === 2. NARROW PHASE ===
    let movers: Vec<Entity> = bodies
        .iter()
        .filter(|(_, _, _, collider, rigidbody)| drives_detection(collider, *rigidbody))
        .map(|(entity, ..)| entity)
        .collect();

    let mut candidates: SmallVec<[Entity; 16]> = SmallVec::new();
    let mut contacts = 0usize;

    for entity in movers.iter().copied() {
        let (collider, query_bounds) = match bodies.get(entity) {
            Ok((_, position, scale, collider, _)) => {
                (*collider, collider.bounds(position.pos, scale_of(scale)))
            }
            Err(_) => continue,
        };

        candidates.clear();
        index.query(&query_bounds, &mut candidates);

        for other in candidates.iter().copied() {
            if other == entity {
                continue;
            }

            let Ok((_, other_position, other_scale, other_collider, other_rb)) = bodies.get(other)
            else {
                continue;
            };
            if !collider.can_collide_with(other_collider) {
                continue;
            }
            let other_bounds = other_collider.bounds(other_position.pos, scale_of(other_scale));
            let other_is_trigger = other_collider.is_trigger;
            let response = response_of(other_collider, other_rb);

            // earlier contacts this tick may have moved us
            let Ok((_, position, scale, _, _)) = bodies.get(entity) else {
                break;
            };
            let bounds = collider.bounds(position.pos, scale_of(scale));
            if !bounds.intersects(&other_bounds) {
                continue;
            }

            pending.push(entity, other);
            contacts += 1;

            if collider.is_trigger || other_is_trigger {
                continue;
            }

            let applied = match response {
                Response::Immovable => match bodies.get_mut(entity) {
                    Ok((_, mut position, ..)) => {
                        resolve_static(&mut position.pos, &bounds, &other_bounds)
                    }
                    Err(_) => None,
                },
                Response::Dynamic => match bodies.get_many_mut([entity, other]) {
                    Ok(
                        [
                            (_, mut position_a, _, _, Some(mut rb_a)),
                            (_, mut position_b, _, _, Some(mut rb_b)),
                        ],
                    ) => resolve_dynamic(
                        ContactBody {
                            position: &mut position_a.pos,
                            body: &mut rb_a,
                            bounds,
                        },
                        ContactBody {
                            position: &mut position_b.pos,
                            body: &mut rb_b,
                            bounds: other_bounds,
                        },
                    ),
                    _ => None,
                },
            };

            if let Some(mtv) = applied {
                trace!(
                    "Resolved {:?} against {:?} ({:?}): mtv=({}, {})",
                    entity, other, response, mtv.x, mtv.y
                );
            }
        }
    }

    debug!(
        "Collision pass: {} colliders, {} movers, {} contacts, {} queued, quadtree depth {}",
        index.len(),
        movers.len(),
        contacts,
        pending.len(),
        index.depth()
    );
}

/// Deliver every queued [`CollisionEvent`] to its observers.
///
/// Must run after [`collision_detector`]; events are triggered through
/// [`Commands`], so observers run once the schedule applies deferred
/// commands, strictly after all detection and resolution for the tick.
///
/// [`CollisionEvent`]: crate::events::collision::CollisionEvent
pub fn flush_collision_events(mut pending: ResMut<PendingCollisions>, mut commands: Commands) {
    for event in pending.drain() {
        commands.trigger(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_of_candidate_kinds() {
        let solid = BoxCollider::new(1.0, 1.0);
        assert_eq!(response_of(&solid, None), Response::Immovable);
        assert_eq!(response_of(&solid, Some(&RigidBody::fixed())), Response::Immovable);
        assert_eq!(response_of(&solid, Some(&RigidBody::kinematic())), Response::Immovable);
        assert_eq!(response_of(&solid, Some(&RigidBody::new())), Response::Dynamic);
        assert_eq!(response_of(&solid.fixed(), Some(&RigidBody::new())), Response::Immovable);
    }

    #[test]
    fn test_drives_detection() {
        let solid = BoxCollider::new(1.0, 1.0);
        assert!(!drives_detection(&solid, None));
        assert!(!drives_detection(&solid, Some(&RigidBody::fixed())));
        assert!(drives_detection(&solid, Some(&RigidBody::new())));
        assert!(drives_detection(&solid, Some(&RigidBody::kinematic())));
        assert!(!drives_detection(&solid.fixed(), Some(&RigidBody::new())));
    }
}
