//! ECS components for physics bodies.
//!
//! A body is any entity that combines a [`mapposition::MapPosition`] with a
//! [`boxcollider::BoxCollider`]. Adding a [`rigidbody::RigidBody`] makes it
//! movable; [`scale::Scale`] is optional and defaults to `(1, 1)`.
//!
//! Submodules overview:
//! - [`boxcollider`] – axis-aligned collider with layer/mask filtering and bounds
//! - [`mapposition`] – world-space position (pivot) for an entity
//! - [`rigidbody`] – velocity, force, body kind and material
//! - [`scale`] – 2D scale factor applied to colliders

pub mod boxcollider;
pub mod mapposition;
pub mod rigidbody;
pub mod scale;
