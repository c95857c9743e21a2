use crate::math::{Point, Real};
use crate::shape::Hull;
use num::Zero;

/// Computes the signed volume and the center of mass of a closed triangle mesh.
///
/// The volume is positive if the triangles are wound counter-clockwise when seen from
/// outside the mesh. If the volume is zero, the center of mass is the reference point
/// the tetrahedra are built from.
pub fn signed_volume_and_center_of_mass(
    vertices: &[Point<Real>],
    indices: &[[u32; 3]],
) -> (Real, Point<Real>) {
    let reference = vertices.first().copied().unwrap_or_else(Point::origin);

    let mut res = Point::origin();
    let mut vol = 0.0;

    for t in indices {
        let p2 = vertices[t[0] as usize];
        let p3 = vertices[t[1] as usize];
        let p4 = vertices[t[2] as usize];

        let volume = tetrahedron_signed_volume(&reference, &p2, &p3, &p4);
        let center = (reference.coords + p2.coords + p3.coords + p4.coords) / 4.0;

        res += center * volume;
        vol += volume;
    }

    if vol.is_zero() {
        (vol, reference)
    } else {
        (vol, res / vol)
    }
}

fn tetrahedron_signed_volume(
    p1: &Point<Real>,
    p2: &Point<Real>,
    p3: &Point<Real>,
    p4: &Point<Real>,
) -> Real {
    let p1p2 = p2 - p1;
    let p1p3 = p3 - p1;
    let p1p4 = p4 - p1;

    p1p2.dot(&p1p3.cross(&p1p4)) / 6.0
}

impl Hull {
    /// The volume enclosed by this hull.
    ///
    /// Returns zero for empty hulls.
    pub fn volume(&self) -> Real {
        if self.is_empty() {
            return 0.0;
        }

        signed_volume_and_center_of_mass(self.positions(), &self.indices()).0
    }

    /// The center of mass of this hull, assuming a uniform density.
    ///
    /// Returns `None` for empty hulls.
    pub fn center_of_mass(&self) -> Option<Point<Real>> {
        if self.is_empty() {
            return None;
        }

        Some(signed_volume_and_center_of_mass(self.positions(), &self.indices()).1)
    }
}
