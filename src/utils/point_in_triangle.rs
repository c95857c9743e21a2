//! Function to check if a point is inside a triangle and related functions.

use crate::math::{Point, Real, Vector};

/// Relative tolerance of the coplanarity check of [`is_point_in_triangle`].
///
/// The points of a cut loop are interpolated, so they only lie approximately
/// on their plane.
const COPLANARITY_TOLERANCE: Real = 1.0e-3;

/// Relative tolerance under which [`corner_direction`] reports a straight corner.
///
/// Cut points interpolated along the diagonal of a face are collinear with their
/// neighbors up to rounding errors.
const FLATNESS_TOLERANCE: Real = 1.0e-4;

#[derive(Eq, PartialEq, Debug, Copy, Clone)]
/// The orientation or winding direction of a corner or polygon.
pub enum Orientation {
    /// Counter-clockwise
    Ccw,
    /// Clockwise
    Cw,
    /// Neither (a straight line)
    None,
}

/// Returns the direction of the turn `p1 -> p2 -> p3` when looking at it from
/// the tip of `normal`.
///
/// Turns whose sine is smaller than a small relative tolerance are reported as
/// [`Orientation::None`].
///
/// Counter-clockwise example:
/// o p1
///  .        o p3
///   .     .
///    .  .
///     o p2
///
/// Clockwise example:
///     o p2
///    .  .
///   .     .
///  .        o p3
/// o p1
pub fn corner_direction(
    p1: &Point<Real>,
    p2: &Point<Real>,
    p3: &Point<Real>,
    normal: &Vector<Real>,
) -> Orientation {
    let incoming = p2 - p1;
    let outgoing = p3 - p2;
    let turn = incoming.cross(&outgoing).dot(normal);
    let tolerance = FLATNESS_TOLERANCE * incoming.norm() * outgoing.norm() * normal.norm();

    if turn > tolerance {
        Orientation::Ccw
    } else if turn < -tolerance {
        Orientation::Cw
    } else {
        Orientation::None
    }
}

/// Returns `true` if point `p` lies strictly inside the triangle with corners `v1`, `v2` and `v3`.
///
/// The point must be (approximately) coplanar with the triangle. Returns `false` for
/// points off the triangle's plane, for points on the triangle's boundary, and for
/// degenerate triangles.
pub fn is_point_in_triangle(
    p: &Point<Real>,
    v1: &Point<Real>,
    v2: &Point<Real>,
    v3: &Point<Real>,
) -> bool {
    let e0 = v3 - v1;
    let e1 = v2 - v1;
    let ep = p - v1;

    let triple = e0.dot(&e1.cross(&(p - v3)));
    let scale = e0.norm() * e1.norm() * (p - v3).norm();
    if triple.abs() > COPLANARITY_TOLERANCE * scale {
        return false;
    }

    let dot00 = e0.dot(&e0);
    let dot01 = e0.dot(&e1);
    let dot0p = e0.dot(&ep);
    let dot11 = e1.dot(&e1);
    let dot1p = e1.dot(&ep);

    let denom = dot00 * dot11 - dot01 * dot01;
    if denom <= 0.0 || !denom.is_finite() {
        return false;
    }

    let inv_denom = 1.0 / denom;
    let u = (dot11 * dot0p - dot01 * dot1p) * inv_denom;
    let v = (dot00 * dot1p - dot01 * dot0p) * inv_denom;

    u > 0.0 && v > 0.0 && u + v < 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_direction_follows_normal() {
        let a = Point::new(0.0, 0.0, 0.0);
        let b = Point::new(1.0, 0.0, 0.0);
        let c = Point::new(1.0, 1.0, 0.0);

        assert_eq!(corner_direction(&a, &b, &c, &Vector::z()), Orientation::Ccw);
        assert_eq!(corner_direction(&a, &b, &c, &-Vector::z()), Orientation::Cw);
        assert_eq!(
            corner_direction(&a, &b, &Point::new(2.0, 0.0, 0.0), &Vector::z()),
            Orientation::None
        );
    }

    #[test]
    fn point_in_triangle() {
        let v1 = Point::new(0.0, 0.0, 0.0);
        let v2 = Point::new(2.0, 0.0, 0.0);
        let v3 = Point::new(0.0, 0.0, 2.0);

        assert!(is_point_in_triangle(&Point::new(0.5, 0.0, 0.5), &v1, &v2, &v3));
        // Off-plane.
        assert!(!is_point_in_triangle(&Point::new(0.5, 1.0, 0.5), &v1, &v2, &v3));
        // Outside.
        assert!(!is_point_in_triangle(&Point::new(1.5, 0.0, 1.5), &v1, &v2, &v3));
        // On a corner.
        assert!(!is_point_in_triangle(&v2, &v1, &v2, &v3));
        // Degenerate triangle.
        assert!(!is_point_in_triangle(&Point::new(1.0, 0.0, 0.0), &v1, &v2, &Point::new(3.0, 0.0, 0.0)));
    }
}
