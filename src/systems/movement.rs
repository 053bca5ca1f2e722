//! Integrator.
//!
//! Advances rigid bodies by one step using the scaled delta from
//! [`WorldTime`]. Runs right before the collision pass so resolution corrects
//! the frame's intended motion.
//!
//! Per body kind:
//! - `Dynamic`: `velocity += force / mass * dt`, then `velocity *= damping`,
//!   then `position += velocity * dt`. Infinite (non-positive) mass ignores
//!   the force.
//! - `Kinematic`: `position += velocity * dt`, forces and damping ignored.
//! - `Static`: skipped entirely, nothing is written.
//!
//! The force accumulator of every non-static body is zeroed after the step.
use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::{BodyType, RigidBody};
use crate::resources::worldtime::WorldTime;

pub fn movement(mut query: Query<(&mut MapPosition, &mut RigidBody)>, time: Res<WorldTime>) {
    let dt = time.delta;
    for (mut position, mut rigidbody) in query.iter_mut() {
        match rigidbody.body_type {
            BodyType::Static => continue,
            BodyType::Dynamic => {
                let acceleration = rigidbody.force * rigidbody.inverse_mass();
                let damping = rigidbody.damping;
                rigidbody.velocity += acceleration * dt;
                rigidbody.velocity *= damping;
            }
            BodyType::Kinematic => {}
        }

        let delta = rigidbody.velocity * dt;
        position.pos += delta;
        rigidbody.clear_force();
    }
}
