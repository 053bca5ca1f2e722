//! Physics systems.
//!
//! This module groups the ECS systems that advance the simulation each tick.
//!
//! Submodules overview
//! - [`collision`] – broad/narrow phase detection, response dispatch and event flush
//! - [`movement`] – integrate velocities from forces and positions from velocities
//! - [`resolve`] – depenetration and impulse math for confirmed contacts
//! - [`time`] – update simulation time and delta

pub mod collision;
pub mod movement;
pub mod resolve;
pub mod time;
