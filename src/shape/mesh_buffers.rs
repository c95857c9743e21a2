use crate::math::{Point, Real, Tangent, TexCoord, Vector};
use crate::utils;

/// Indicated an inconsistency in the buffers a [`Hull`](crate::shape::Hull) is built from.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum HullBuilderError {
    /// A hull must contain at least one triangle.
    #[error("a hull must contain at least one triangle.")]
    EmptyIndices,
    /// The length of the index buffer is not a multiple of three.
    #[error("the index buffer length {0} is not a multiple of 3.")]
    IndicesNotTriangles(usize),
    /// A vertex attribute buffer does not have one element per vertex.
    #[error("the {attribute} buffer has {found} elements, expected {expected}.")]
    AttributeLengthMismatch {
        /// The name of the offending attribute.
        attribute: &'static str,
        /// The number of vertices, i.e., the number of positions.
        expected: usize,
        /// The number of elements of the offending attribute.
        found: usize,
    },
    /// A triangle references a vertex that does not exist.
    #[error("the triangle {triangle} references the vertex {index} but there are only {num_vertices} vertices.")]
    IndexOutOfBounds {
        /// The offending triangle.
        triangle: u32,
        /// The out-of-bounds vertex index.
        index: u32,
        /// The number of vertices.
        num_vertices: usize,
    },
}

/// The render-facing buffers of a triangle mesh.
///
/// This is what a [`Hull`](crate::shape::Hull) is imported from and exported to. All the
/// vertex attributes are parallel arrays indexed by vertex. `uvs` is optional: it is
/// either empty or has exactly one element per vertex.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct MeshBuffers {
    /// The vertex positions.
    pub positions: Vec<Point<Real>>,
    /// The vertex normals.
    pub normals: Vec<Vector<Real>>,
    /// The vertex tangents. The `w` component is the handedness of the bitangent.
    pub tangents: Vec<Tangent<Real>>,
    /// The vertex texture coordinates. May be empty.
    pub uvs: Vec<TexCoord<Real>>,
    /// The flat index buffer: each consecutive triple is one triangle, wound
    /// counter-clockwise when seen from outside.
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    /// Creates mesh buffers without texture coordinates.
    pub fn new(
        positions: Vec<Point<Real>>,
        normals: Vec<Vector<Real>>,
        tangents: Vec<Tangent<Real>>,
        indices: Vec<u32>,
    ) -> Self {
        Self {
            positions,
            normals,
            tangents,
            uvs: Vec::new(),
            indices,
        }
    }

    /// Attaches texture coordinates to these buffers.
    pub fn with_uvs(mut self, uvs: Vec<TexCoord<Real>>) -> Self {
        self.uvs = uvs;
        self
    }

    /// Builds flat-shaded buffers from an indexed triangle soup.
    ///
    /// Every triangle gets its own three vertices sharing the triangle's face normal, and a
    /// tangent along its first edge. Degenerate triangles get the `up` normal.
    ///
    /// # Panics
    /// Panics if a triangle references an index out of the bounds of `points`.
    pub fn from_flat_triangles(points: &[Point<Real>], triangles: &[[u32; 3]]) -> Self {
        let mut result = Self::default();

        for tri in triangles {
            let pts = tri.map(|i| &points[i as usize]);
            let normal = utils::ccw_face_normal(pts)
                .map(|n| n.into_inner())
                .unwrap_or_else(crate::math::up);
            let tangent = (pts[1] - pts[0])
                .try_normalize(crate::math::DEFAULT_EPSILON)
                .unwrap_or_else(|| utils::orthogonal_tangent(&normal).into_inner());

            for pt in pts {
                result.indices.push(result.positions.len() as u32);
                result.positions.push(*pt);
                result.normals.push(normal);
                result.tangents.push(tangent.push(1.0));
            }
        }

        result
    }

    /// Builds the flat-shaded buffers of a cuboid centered at the origin.
    ///
    /// Each face has its own four vertices, with texture coordinates spanning `[0, 1]²`.
    pub fn cuboid(half_extents: &Vector<Real>) -> Self {
        let mut result = Self::default();

        for axis in 0..3 {
            for sign in [1.0, -1.0] {
                let normal = Vector::ith(axis, sign);
                let tangent = Vector::ith((axis + 1) % 3, 1.0);
                let bitangent = normal.cross(&tangent);
                let center = normal.component_mul(half_extents);
                let du = tangent.component_mul(half_extents);
                let dv = bitangent.component_mul(half_extents);
                let base = result.positions.len() as u32;

                for (u, v) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                    result.positions.push(Point::from(center + du * u + dv * v));
                    result.normals.push(normal);
                    result.tangents.push(tangent.push(1.0));
                    result
                        .uvs
                        .push(TexCoord::new((u + 1.0) * 0.5, (v + 1.0) * 0.5));
                }

                result
                    .indices
                    .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
            }
        }

        result
    }

    /// The number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    /// The number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterates through the vertex index triples of every triangle.
    pub fn triangles(&self) -> impl ExactSizeIterator<Item = [u32; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|idx| [idx[0], idx[1], idx[2]])
    }

    /// Checks that these buffers describe a well-formed triangle mesh.
    pub fn validate(&self) -> Result<(), HullBuilderError> {
        if self.indices.is_empty() {
            return Err(HullBuilderError::EmptyIndices);
        }

        if self.indices.len() % 3 != 0 {
            return Err(HullBuilderError::IndicesNotTriangles(self.indices.len()));
        }

        let expected = self.positions.len();
        let lengths = [
            ("normal", self.normals.len()),
            ("tangent", self.tangents.len()),
        ];

        for (attribute, found) in lengths {
            if found != expected {
                return Err(HullBuilderError::AttributeLengthMismatch {
                    attribute,
                    expected,
                    found,
                });
            }
        }

        if !self.uvs.is_empty() && self.uvs.len() != expected {
            return Err(HullBuilderError::AttributeLengthMismatch {
                attribute: "uv",
                expected,
                found: self.uvs.len(),
            });
        }

        for (triangle, idx) in self.triangles().enumerate() {
            if let Some(index) = idx.into_iter().find(|i| *i as usize >= expected) {
                return Err(HullBuilderError::IndexOutOfBounds {
                    triangle: triangle as u32,
                    index,
                    num_vertices: expected,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuboid_buffers_are_outward_facing() {
        let buffers = MeshBuffers::cuboid(&Vector::new(1.0, 2.0, 3.0));
        assert_eq!(buffers.num_vertices(), 24);
        assert_eq!(buffers.num_triangles(), 12);
        assert_eq!(buffers.validate(), Ok(()));

        for tri in buffers.triangles() {
            let pts = tri.map(|i| &buffers.positions[i as usize]);
            let face_normal = utils::ccw_face_normal(pts).unwrap();
            let normal = buffers.normals[tri[0] as usize];
            assert_relative_eq!(face_normal.into_inner(), normal, epsilon = 1.0e-5);
            // The face lies on the side its normal points to.
            assert!(pts[0].coords.dot(&normal) > 0.0);
        }
    }

    #[test]
    fn validation_errors() {
        let mut buffers = MeshBuffers::cuboid(&Vector::repeat(0.5));
        let _ = buffers.indices.pop();
        assert_eq!(
            buffers.validate(),
            Err(HullBuilderError::IndicesNotTriangles(35))
        );

        let mut buffers = MeshBuffers::cuboid(&Vector::repeat(0.5));
        let _ = buffers.normals.pop();
        assert_eq!(
            buffers.validate(),
            Err(HullBuilderError::AttributeLengthMismatch {
                attribute: "normal",
                expected: 24,
                found: 23
            })
        );

        let mut buffers = MeshBuffers::cuboid(&Vector::repeat(0.5));
        buffers.indices[7] = 24;
        assert_eq!(
            buffers.validate(),
            Err(HullBuilderError::IndexOutOfBounds {
                triangle: 2,
                index: 24,
                num_vertices: 24
            })
        );

        assert_eq!(
            MeshBuffers::default().validate(),
            Err(HullBuilderError::EmptyIndices)
        );
    }

    #[test]
    #[should_panic]
    fn flat_triangles_out_of_bounds() {
        let points = [
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        ];
        let _ = MeshBuffers::from_flat_triangles(&points, &[[0, 1, 3]]);
    }
}
