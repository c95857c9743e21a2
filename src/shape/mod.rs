//! The triangulated hulls and the buffers they are built from.

pub use self::hull::Hull;
pub use self::hull_topology::{HullEdge, HullPoint, HullTriangle};
pub use self::mesh_buffers::{HullBuilderError, MeshBuffers};

mod hull;
mod hull_topology;
mod mesh_buffers;
