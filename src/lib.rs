//! Aberred physics library.
//!
//! Axis-aligned 2D collision detection and response on top of `bevy_ecs`.
//! This module exposes the components, resources, systems and events of the
//! physics pipeline for use by a game loop and by integration tests.

pub mod components;
pub mod events;
pub mod geometry;
pub mod resources;
pub mod simulation;
pub mod systems;
