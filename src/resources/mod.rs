//! ECS resources made available to systems.
//!
//! Overview
//! - `pendingcollisions` – per-tick queue of collision events awaiting delivery
//! - `physicsconfig` – world bounds, quadtree limits and simulation settings
//! - `spatialindex` – quadtree broad-phase index rebuilt every tick
//! - `worldtime` – simulation time and delta
pub mod pendingcollisions;
pub mod physicsconfig;
pub mod spatialindex;
pub mod worldtime;
