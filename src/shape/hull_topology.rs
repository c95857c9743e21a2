use crate::math::{Point, Real, Vector};

/// A unique position of a hull, shared by every vertex located there.
///
/// Points carry the topology of a hull: two triangles are adjacent iff they
/// share an edge between the same two points, regardless of whether they
/// share vertices (which may differ by their normals or texture coordinates).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct HullPoint {
    /// The position of this point.
    pub position: Point<Real>,
}

impl HullPoint {
    /// Creates a new point.
    pub fn new(position: Point<Real>) -> Self {
        Self { position }
    }
}

/// A segment between two points of a hull.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct HullEdge {
    /// The ids of the start and end points of this edge.
    pub points: [u32; 2],
    /// The vector from the start point to the end point.
    pub line: Vector<Real>,
}

impl HullEdge {
    /// Creates an edge from `points[0]` to `points[1]`, located at `positions`.
    pub fn new(points: [u32; 2], positions: [&Point<Real>; 2]) -> Self {
        Self {
            points,
            line: positions[1] - positions[0],
        }
    }

    /// Does this edge connect the points `a` and `b`, in any order?
    pub fn connects(&self, a: u32, b: u32) -> bool {
        (self.points[0] == a && self.points[1] == b) || (self.points[0] == b && self.points[1] == a)
    }
}

/// A triangle of a hull.
///
/// The `i`-th edge goes from the `i`-th point to the `(i + 1) % 3`-th point
/// (the edge object itself may be stored in the reverse direction).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct HullTriangle {
    /// Ids of the vertices (attribute indices) of this triangle.
    pub vertices: [u32; 3],
    /// Ids of the points at the three corners of this triangle.
    pub points: [u32; 3],
    /// Ids of the three edges of this triangle.
    pub edges: [u32; 3],
}

impl HullTriangle {
    /// The same triangle with its corners rotated by `shift` positions.
    ///
    /// Corner `i` of the result is corner `(i + shift) % 3` of `self`, so the winding is
    /// preserved.
    pub fn rotated(&self, shift: usize) -> Self {
        let rot = |i: usize| (i + shift) % 3;
        Self {
            vertices: [0, 1, 2].map(|i| self.vertices[rot(i)]),
            points: [0, 1, 2].map(|i| self.points[rot(i)]),
            edges: [0, 1, 2].map(|i| self.edges[rot(i)]),
        }
    }

    /// The same triangle with the opposite winding.
    pub fn reversed(&self) -> Self {
        let [v0, v1, v2] = self.vertices;
        let [p0, p1, p2] = self.points;
        let [e0, e1, e2] = self.edges;
        Self {
            vertices: [v0, v2, v1],
            points: [p0, p2, p1],
            edges: [e2, e1, e0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_preserves_edge_point_pairing() {
        let tri = HullTriangle {
            vertices: [10, 11, 12],
            points: [0, 1, 2],
            edges: [5, 6, 7],
        };

        let rot = tri.rotated(2);
        assert_eq!(rot.vertices, [12, 10, 11]);
        assert_eq!(rot.points, [2, 0, 1]);
        // Edge 7 joined the points 2 and 0, it is still the first edge.
        assert_eq!(rot.edges, [7, 5, 6]);
        assert_eq!(tri.rotated(3), tri);
    }

    #[test]
    fn reversal_preserves_edge_point_pairing() {
        let tri = HullTriangle {
            vertices: [10, 11, 12],
            points: [0, 1, 2],
            edges: [5, 6, 7],
        };

        let rev = tri.reversed();
        assert_eq!(rev.points, [0, 2, 1]);
        // Edge 7 joined the points 2 and 0, it is now the first edge.
        assert_eq!(rev.edges, [7, 6, 5]);
        assert_eq!(rev.reversed(), tri);
    }

    #[test]
    fn edge_connects_in_both_directions() {
        let a = Point::new(0.0, 0.0, 0.0);
        let b = Point::new(1.0, 2.0, 3.0);
        let edge = HullEdge::new([4, 9], [&a, &b]);
        assert_eq!(edge.line, Vector::new(1.0, 2.0, 3.0));
        assert!(edge.connects(9, 4));
        assert!(edge.connects(4, 9));
        assert!(!edge.connects(4, 4));
    }
}
