//! Physics world setup and the per-tick schedule.
//!
//! # Tick order
//!
//! 1. [`update_world_time`] – scale and store the frame delta
//! 2. [`movement`] – integrate forces and velocities
//! 3. [`collision_detector`] – rebuild the quadtree, detect, resolve, queue events
//! 4. [`flush_collision_events`] – trigger queued events for observers
//!
//! Everything runs synchronously on the calling thread; the chain guarantees
//! observers only ever see a fully resolved frame.

use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::resources::pendingcollisions::PendingCollisions;
use crate::resources::physicsconfig::PhysicsConfig;
use crate::resources::spatialindex::SpatialIndex;
use crate::resources::worldtime::WorldTime;
use crate::systems::collision::{collision_detector, flush_collision_events};
use crate::systems::movement::movement;
use crate::systems::time::update_world_time;

/// Insert every resource the physics systems need.
pub fn setup_physics(world: &mut World, config: &PhysicsConfig) {
    let bounds = config.world_bounds();
    if bounds.w <= 0.0 || bounds.h <= 0.0 {
        warn!(
            "World bounds {}x{} are degenerate, every collider will share the quadtree root",
            bounds.w, bounds.h
        );
    }

    world.insert_resource(WorldTime::default().with_time_scale(config.time_scale));
    world.insert_resource(SpatialIndex::with_limits(
        bounds,
        config.max_objects,
        config.max_levels,
    ));
    world.insert_resource(PendingCollisions::new(config.dedupe_pairs));
    world.insert_resource(config.clone());

    info!(
        "Physics ready: world=({}, {}, {}x{}), quadtree={}/{}",
        bounds.x, bounds.y, bounds.w, bounds.h, config.max_objects, config.max_levels
    );
}

/// Build the ordered physics schedule for one tick.
pub fn physics_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems((movement, collision_detector, flush_collision_events).chain());
    schedule
}

/// Advance the world by one frame of `dt` unscaled seconds.
pub fn step(world: &mut World, schedule: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    schedule.run(world);
}
