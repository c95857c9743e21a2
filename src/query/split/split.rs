use crate::math::{up, Isometry, Point, Real, UnitVector, Vector, DEFAULT_EPSILON};

/// An oriented plane cutting a hull in two.
///
/// The half-space the normal points to, plane included, is the "normal side" of the plane.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CutPlane {
    /// A point on the plane.
    pub point: Point<Real>,
    /// The unit normal of the plane.
    pub normal: UnitVector<Real>,
}

impl CutPlane {
    /// Creates a plane through `point` with the given normal.
    ///
    /// The normal does not need to be normalized. If it is zero, the plane is oriented
    /// towards [`up`] instead.
    pub fn new(point: Point<Real>, normal: Vector<Real>) -> Self {
        let normal = UnitVector::try_new(normal, DEFAULT_EPSILON).unwrap_or_else(|| {
            log::debug!("Degenerate cut plane normal {:?}, using up instead.", normal);
            UnitVector::new_unchecked(up())
        });

        Self { point, normal }
    }

    /// The signed distance from `pt` to this plane, positive on the normal side.
    pub fn signed_distance(&self, pt: &Point<Real>) -> Real {
        (pt - self.point).dot(&*self.normal)
    }

    /// Does `pt` lie on the normal side of this plane, or on the plane itself?
    pub fn is_on_normal_side(&self, pt: &Point<Real>) -> bool {
        self.signed_distance(pt) >= 0.0
    }

    /// The same plane, oriented the other way.
    pub fn flipped(&self) -> Self {
        Self {
            point: self.point,
            normal: -self.normal,
        }
    }

    /// Expresses this world-space plane in the local frame of an object.
    ///
    /// The object is placed in the world by applying `scale` (component-wise, no component
    /// may be zero) then `isometry` to its local coordinates.
    pub fn to_local(&self, isometry: &Isometry<Real>, scale: &Vector<Real>) -> Self {
        let normal = isometry
            .inverse_transform_vector(&self.normal)
            .component_mul(scale);
        let point = isometry
            .inverse_transform_point(&self.point)
            .coords
            .component_div(scale);

        Self::new(point.into(), normal)
    }
}

/// Error indicating that a hull could not be split.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum SplitError {
    /// The hull is too small to enclose a volume.
    #[error("cannot split an empty hull with {points} points, {edges} edges and {triangles} triangles.")]
    EmptyHull {
        /// The number of points of the hull.
        points: usize,
        /// The number of edges of the hull.
        edges: usize,
        /// The number of triangles of the hull.
        triangles: usize,
    },
}
