//! Rigid body component for movable bodies.
//!
//! The [`RigidBody`] component stores velocity, an accumulated force, a body
//! kind and the material properties used by the integrator and the collision
//! resolver. Entities that carry a collider but no rigid body are treated as
//! static, immovable geometry.
//!
//! Body kinds:
//! - [`BodyType::Static`] never moves; neither the integrator nor the resolver
//!   touches it.
//! - [`BodyType::Dynamic`] integrates forces, is damped, and exchanges
//!   momentum with other dynamic bodies.
//! - [`BodyType::Kinematic`] moves with its velocity but ignores forces and
//!   damping; other bodies treat it as immovable.
//!
//! A mass of zero or less is treated as infinite: forces and impulses do not
//! change its velocity.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Closed set of body kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyType {
    Static,
    #[default]
    Dynamic,
    Kinematic,
}

/// Movable body state and material.
///
/// # Example
/// ```
/// use aberredphysics::components::rigidbody::RigidBody;
/// use glam::Vec2;
///
/// let mut rb = RigidBody::dynamic(2.0).with_restitution(0.5).with_damping(0.98);
/// rb.apply_force(Vec2::new(0.0, 980.0));
/// assert_eq!(rb.inverse_mass(), 0.5);
/// ```
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct RigidBody {
    /// Current velocity in world units per second.
    pub velocity: Vec2,
    /// Force accumulated for the next integration step, then cleared.
    pub force: Vec2,
    pub body_type: BodyType,
    /// Mass in arbitrary units. `<= 0.0` means infinite.
    pub mass: f32,
    /// Bounciness in `[0, 1]`. A pair uses the smaller of the two values.
    pub restitution: f32,
    /// Multiplicative velocity factor applied every step (1.0 = no damping).
    pub damping: f32,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// Dynamic body with unit mass, no restitution and no damping.
    pub fn new() -> Self {
        Self {
            velocity: Vec2::ZERO,
            force: Vec2::ZERO,
            body_type: BodyType::Dynamic,
            mass: 1.0,
            restitution: 0.0,
            damping: 1.0,
        }
    }

    pub fn dynamic(mass: f32) -> Self {
        Self {
            mass,
            ..Self::new()
        }
    }

    pub fn kinematic() -> Self {
        Self {
            body_type: BodyType::Kinematic,
            mass: 0.0,
            ..Self::new()
        }
    }

    pub fn fixed() -> Self {
        Self {
            body_type: BodyType::Static,
            mass: 0.0,
            ..Self::new()
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Clamped to `[0, 1]`.
    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution.clamp(0.0, 1.0);
        self
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    /// `1 / mass`, or zero for infinite (non-positive) mass.
    #[inline]
    pub fn inverse_mass(&self) -> f32 {
        if self.mass > 0.0 { 1.0 / self.mass } else { 0.0 }
    }

    /// Whether this body is allowed to move at all.
    pub fn is_movable(&self) -> bool {
        match self.body_type {
            BodyType::Static => false,
            BodyType::Dynamic | BodyType::Kinematic => true,
        }
    }

    /// Accumulate a force for the next integration step.
    pub fn apply_force(&mut self, force: Vec2) {
        self.force += force;
    }

    /// Instant velocity change scaled by inverse mass. No-op on infinite mass.
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        self.velocity += impulse * self.inverse_mass();
    }

    pub fn clear_force(&mut self) {
        self.force = Vec2::ZERO;
    }
}
