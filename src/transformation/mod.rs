//! Triangulation of the planar loops exposed by a cut, and mesh export.

pub use self::ear_clipping::{triangulate_edge_loops, LoopTriangulation};
pub use self::edge_loops::{extract_edge_loops, EdgeLoops};

mod ear_clipping;
mod edge_loops;

#[cfg(feature = "wavefront")]
pub mod wavefront;
