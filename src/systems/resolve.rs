//! Collision response.
//!
//! Two resolution paths, both working on a pair already confirmed to overlap:
//!
//! - [`resolve_static`] pushes a movable body out of an immovable one along
//!   the axis of least penetration. Velocity is left alone, which lets
//!   characters slide along walls.
//! - [`resolve_dynamic`] splits the same correction between two movable
//!   bodies by inverse mass, then applies an impulse along the contact normal
//!   using the smaller restitution of the pair.
//!
//! Non-positive mass counts as infinite: such a body takes no share of the
//! positional correction and no impulse.

use glam::Vec2;

use crate::components::rigidbody::RigidBody;
use crate::geometry::Rect;

/// Mutable view of one participant in a two-body contact.
pub struct ContactBody<'a> {
    pub position: &'a mut Vec2,
    pub body: &'a mut RigidBody,
    /// Bounds at the moment the overlap was detected.
    pub bounds: Rect,
}

/// Depenetrate `position` (owner of `bounds`) from the immovable `other`.
///
/// Returns the applied translation, or `None` if the boxes do not overlap.
pub fn resolve_static(position: &mut Vec2, bounds: &Rect, other: &Rect) -> Option<Vec2> {
    let mtv = bounds.penetration(other)?;
    *position += mtv;
    Some(mtv)
}

/// Separate two movable bodies and exchange momentum between them.
///
/// The positional correction moves `a` by `mtv * invA / (invA + invB)` and
/// `b` by the opposite remainder, so the heavier body yields less ground.
/// If the bodies already separate along the normal no impulse is applied.
///
/// Returns the full separation vector (from `a`'s point of view), or `None`
/// when the boxes do not overlap or both bodies have infinite mass.
pub fn resolve_dynamic(a: ContactBody<'_>, b: ContactBody<'_>) -> Option<Vec2> {
    let mtv = a.bounds.penetration(&b.bounds)?;

    let inv_mass_a = a.body.inverse_mass();
    let inv_mass_b = b.body.inverse_mass();
    let inv_mass_sum = inv_mass_a + inv_mass_b;
    if inv_mass_sum <= 0.0 {
        return None;
    }

    *a.position += mtv * (inv_mass_a / inv_mass_sum);
    *b.position -= mtv * (inv_mass_b / inv_mass_sum);

    // contact normal points from a towards b
    let normal = -mtv.normalize_or_zero();
    if normal == Vec2::ZERO {
        return Some(mtv);
    }

    let relative_velocity = b.body.velocity - a.body.velocity;
    let vel_along_normal = relative_velocity.dot(normal);
    if vel_along_normal > 0.0 {
        return Some(mtv);
    }

    let restitution = a.body.restitution.min(b.body.restitution);
    let j = -(1.0 + restitution) * vel_along_normal / inv_mass_sum;
    let impulse = normal * j;
    a.body.velocity -= impulse * inv_mass_a;
    b.body.velocity += impulse * inv_mass_b;

    Some(mtv)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn centered(pos: Vec2, size: f32) -> Rect {
        Rect::new(pos.x - size / 2.0, pos.y - size / 2.0, size, size)
    }

    #[test]
    fn test_static_pushes_left_by_overlap() {
        let mut pos = Vec2::new(0.0, 0.0);
        let bounds = centered(pos, 10.0);
        let wall = Rect::new(3.0, -50.0, 10.0, 100.0);
        let applied = resolve_static(&mut pos, &bounds, &wall).unwrap();
        assert!(approx_eq(applied.x, -2.0));
        assert!(approx_eq(pos.x, -2.0));
        assert!(approx_eq(pos.y, 0.0));
    }

    #[test]
    fn test_static_no_overlap_is_noop() {
        let mut pos = Vec2::new(0.0, 0.0);
        let bounds = centered(pos, 10.0);
        let wall = Rect::new(5.0, -50.0, 10.0, 100.0);
        assert!(resolve_static(&mut pos, &bounds, &wall).is_none());
        assert_eq!(pos, Vec2::ZERO);
    }

    #[test]
    fn test_dynamic_split_by_mass() {
        let mut pa = Vec2::new(0.0, 0.0);
        let mut pb = Vec2::new(6.0, 0.0);
        let mut ra = RigidBody::dynamic(1.0);
        let mut rb = RigidBody::dynamic(3.0);
        let ba = centered(pa, 10.0);
        let bb = centered(pb, 10.0);
        resolve_dynamic(
            ContactBody { position: &mut pa, body: &mut ra, bounds: ba },
            ContactBody { position: &mut pb, body: &mut rb, bounds: bb },
        )
        .unwrap();
        assert!(approx_eq(pa.x, -3.0));
        assert!(approx_eq(pb.x, 7.0));
    }

    #[test]
    fn test_dynamic_infinite_mass_side_does_not_move() {
        let mut pa = Vec2::new(0.0, 0.0);
        let mut pb = Vec2::new(6.0, 0.0);
        let mut ra = RigidBody::dynamic(0.0).with_velocity(Vec2::new(5.0, 0.0));
        let mut rb = RigidBody::dynamic(2.0).with_velocity(Vec2::new(-5.0, 0.0));
        let ba = centered(pa, 10.0);
        let bb = centered(pb, 10.0);
        resolve_dynamic(
            ContactBody { position: &mut pa, body: &mut ra, bounds: ba },
            ContactBody { position: &mut pb, body: &mut rb, bounds: bb },
        )
        .unwrap();
        assert_eq!(pa, Vec2::ZERO);
        assert!(approx_eq(pb.x, 10.0));
        assert!(approx_eq(ra.velocity.x, 5.0));
        // inelastic bounce off an immovable body: relative velocity cancelled
        assert!(approx_eq(rb.velocity.x, 5.0));
    }

    #[test]
    fn test_dynamic_both_infinite_skips() {
        let mut pa = Vec2::new(0.0, 0.0);
        let mut pb = Vec2::new(6.0, 0.0);
        let mut ra = RigidBody::dynamic(0.0);
        let mut rb = RigidBody::kinematic();
        let ba = centered(pa, 10.0);
        let bb = centered(pb, 10.0);
        assert!(
            resolve_dynamic(
                ContactBody { position: &mut pa, body: &mut ra, bounds: ba },
                ContactBody { position: &mut pb, body: &mut rb, bounds: bb },
            )
            .is_none()
        );
        assert_eq!(pa, Vec2::ZERO);
        assert_eq!(pb, Vec2::new(6.0, 0.0));
    }

    #[test]
    fn test_elastic_equal_mass_head_on_reverses() {
        let mut pa = Vec2::new(0.0, 0.0);
        let mut pb = Vec2::new(9.0, 0.0);
        let mut ra = RigidBody::dynamic(1.0)
            .with_restitution(1.0)
            .with_velocity(Vec2::new(4.0, 0.0));
        let mut rb = RigidBody::dynamic(1.0)
            .with_restitution(1.0)
            .with_velocity(Vec2::new(-2.0, 0.0));
        let before = rb.velocity - ra.velocity;
        let ba = centered(pa, 10.0);
        let bb = centered(pb, 10.0);
        resolve_dynamic(
            ContactBody { position: &mut pa, body: &mut ra, bounds: ba },
            ContactBody { position: &mut pb, body: &mut rb, bounds: bb },
        )
        .unwrap();
        let after = rb.velocity - ra.velocity;
        assert!(approx_eq(after.x, -before.x));
        assert!(approx_eq(after.length(), before.length()));
        // equal masses swap velocities
        assert!(approx_eq(ra.velocity.x, -2.0));
        assert!(approx_eq(rb.velocity.x, 4.0));
    }

    #[test]
    fn test_restitution_uses_minimum() {
        let mut pa = Vec2::new(0.0, 0.0);
        let mut pb = Vec2::new(9.0, 0.0);
        let mut ra = RigidBody::dynamic(1.0)
            .with_restitution(1.0)
            .with_velocity(Vec2::new(1.0, 0.0));
        let mut rb = RigidBody::dynamic(1.0)
            .with_restitution(0.0)
            .with_velocity(Vec2::new(-1.0, 0.0));
        let ba = centered(pa, 10.0);
        let bb = centered(pb, 10.0);
        resolve_dynamic(
            ContactBody { position: &mut pa, body: &mut ra, bounds: ba },
            ContactBody { position: &mut pb, body: &mut rb, bounds: bb },
        )
        .unwrap();
        // perfectly inelastic: both end at rest along the normal
        assert!(approx_eq(ra.velocity.x, 0.0));
        assert!(approx_eq(rb.velocity.x, 0.0));
    }

    #[test]
    fn test_separating_bodies_get_no_impulse() {
        let mut pa = Vec2::new(0.0, 0.0);
        let mut pb = Vec2::new(9.0, 0.0);
        let mut ra = RigidBody::dynamic(1.0).with_velocity(Vec2::new(-1.0, 0.0));
        let mut rb = RigidBody::dynamic(1.0).with_velocity(Vec2::new(1.0, 0.0));
        let ba = centered(pa, 10.0);
        let bb = centered(pb, 10.0);
        resolve_dynamic(
            ContactBody { position: &mut pa, body: &mut ra, bounds: ba },
            ContactBody { position: &mut pb, body: &mut rb, bounds: bb },
        )
        .unwrap();
        assert!(approx_eq(ra.velocity.x, -1.0));
        assert!(approx_eq(rb.velocity.x, 1.0));
        // positional correction still happens
        assert!(approx_eq(pa.x, -0.5));
        assert!(approx_eq(pb.x, 9.5));
    }
}
