//! Tangent frames for flat surfaces.

use crate::math::{forward, up, Real, UnitVector, Vector, DEFAULT_EPSILON};

/// Computes an arbitrary unit vector orthogonal to `normal`.
///
/// The tangent is `normal × up`, or `normal × forward` if `normal` is parallel
/// to the up direction. `normal` needs not be normalized but must not be zero.
pub fn orthogonal_tangent(normal: &Vector<Real>) -> UnitVector<Real> {
    UnitVector::try_new(normal.cross(&up()), DEFAULT_EPSILON)
        .or_else(|| UnitVector::try_new(normal.cross(&forward()), DEFAULT_EPSILON))
        .unwrap_or_else(|| UnitVector::new_unchecked(forward()))
}

/// The bitangent of the tangent frame `(tangent, normal)` with the given handedness.
pub fn bitangent(
    normal: &Vector<Real>,
    tangent: &Vector<Real>,
    handedness: Real,
) -> Vector<Real> {
    normal.cross(tangent) * handedness
}

#[cfg(test)]
mod tests {
    use super::orthogonal_tangent;
    use crate::math::{up, Vector};

    #[test]
    fn tangent_is_orthogonal_to_normal() {
        for normal in [
            Vector::new(1.0, 2.0, 3.0),
            up(),
            -up(),
            Vector::new(0.0, 0.0, -4.0),
        ] {
            let tangent = orthogonal_tangent(&normal);
            assert_relative_eq!(tangent.norm(), 1.0, epsilon = 1.0e-5);
            assert_relative_eq!(tangent.dot(&normal), 0.0, epsilon = 1.0e-5);
        }
    }
}
