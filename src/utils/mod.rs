//! Various unsorted geometrical and logical operators.

pub use self::ccw_face_normal::ccw_face_normal;
pub use self::hashable_partial_eq::HashablePartialEq;
pub use self::point_in_triangle::{corner_direction, is_point_in_triangle, Orientation};
pub use self::sorted_pair::SortedPair;
pub use self::tangent_basis::{bitangent, orthogonal_tangent};

mod ccw_face_normal;
mod hashable_partial_eq;
pub mod hashmap;
mod point_in_triangle;
mod sorted_pair;
mod tangent_basis;
