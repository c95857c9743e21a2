/*!
hullsplit
========

**hullsplit** splits closed triangulated surfaces with a plane, written with
the rust programming language.

A [`Hull`](shape::Hull) is built once from vertex attribute buffers and an index buffer.
Splitting it by an oriented plane yields two new hulls, one on each side of the plane,
re-triangulating every crossed triangle and optionally capping the exposed
cross-section with a flat polygonal fill.

```
# #[cfg(feature = "f32")] {
use hullsplit3d::math::{Point, Vector};
use hullsplit3d::shape::{Hull, MeshBuffers};

let cube = MeshBuffers::cuboid(&Vector::new(0.5, 0.5, 0.5));
let hull = Hull::new(cube).expect("valid mesh");
let (above, below) = hull
    .split(&Point::origin(), &Vector::y(), true)
    .expect("non-empty hull");

assert!(!above.is_empty() && !below.is_empty());
assert!((above.volume() - 0.5).abs() < 1.0e-4);
# }
```
*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)] // Maybe revisit this one later.
#![allow(clippy::module_inception)]
#![deny(unused_qualifications)]

#[cfg(all(feature = "f32", feature = "f64"))]
core::compile_error!("The `f32` and `f64` features are mutually exclusive.");

#[cfg(feature = "serde-serialize")]
#[macro_use]
extern crate serde;
#[macro_use]
extern crate approx;
extern crate num_traits as num;

pub extern crate nalgebra as na;

pub mod mass_properties;
pub mod query;
pub mod shape;
pub mod transformation;
pub mod utils;

mod real {
    /// The scalar type used throughout this crate.
    #[cfg(feature = "f64")]
    pub use f64 as Real;

    /// The scalar type used throughout this crate.
    #[cfg(feature = "f32")]
    pub use f32 as Real;
}

/// Compilation flags dependent aliases for mathematical types.
#[cfg(feature = "dim3")]
pub mod math {
    pub use super::real::*;
    pub use na::{Isometry3, Point2, Point3, UnitVector3, Vector3, Vector4};

    /// The default tolerance used for geometric operations.
    pub const DEFAULT_EPSILON: Real = Real::EPSILON;

    /// The dimension of the space.
    pub const DIM: usize = 3;

    /// The point type.
    pub use Point3 as Point;

    /// The vector type.
    pub use Vector3 as Vector;

    /// The unit vector type.
    pub use UnitVector3 as UnitVector;

    /// The transformation matrix type.
    pub use Isometry3 as Isometry;

    /// The texture-coordinate type.
    pub type TexCoord<N> = Point2<N>;

    /// A tangent vector with its bitangent handedness stored in `w`.
    pub type Tangent<N> = Vector4<N>;

    /// The canonical "up" direction, used when a plane normal is degenerate.
    pub fn up() -> Vector<Real> {
        Vector::y()
    }

    /// The canonical "forward" direction.
    pub fn forward() -> Vector<Real> {
        Vector::z()
    }
}
