use super::split_hull::{HullSplitter, NORMAL_SIDE, OPPOSITE_SIDE};
use crate::math::{Point, Real, TexCoord};
use crate::shape::HullTriangle;
use crate::transformation::{extract_edge_loops, triangulate_edge_loops};
use crate::utils;

impl HullSplitter<'_> {
    /// Closes both halves with a flat cap along the cross-section.
    ///
    /// The cross-section is triangulated once. The cap of the normal half faces away from the
    /// plane normal, the cap of the opposite half faces along it.
    pub(super) fn fill_cut(&mut self) {
        if self.cut_edges.is_empty() {
            return;
        }

        let loop_edges: Vec<[u32; 2]> = self.cut_edges.iter().map(|e| e.cut_points).collect();
        let sorted = extract_edge_loops(&loop_edges);
        if sorted.open_chains > 0 {
            log::debug!(
                "The cross-section has {} open chain(s), they will not be capped.",
                sorted.open_chains
            );
        }

        // Cut points have the same rank in both halves, so their positions are taken from
        // the normal half.
        let first_cut_point = self.first_cut_points[NORMAL_SIDE] as usize;
        let positions: Vec<Point<Real>> = self.halves[NORMAL_SIDE].points()[first_cut_point..]
            .iter()
            .map(|pt| pt.position)
            .collect();
        let order = sorted.flattened();
        let ordered_edges: Vec<[u32; 2]> = order.iter().map(|e| loop_edges[*e as usize]).collect();

        let normal = self.plane.normal.into_inner();
        let fill = triangulate_edge_loops(&positions, &ordered_edges, &normal);
        if fill.unfilled_loops > 0 {
            log::debug!(
                "{} loop(s) of the cross-section could not be capped.",
                fill.unfilled_loops
            );
        }

        let tangent = utils::orthogonal_tangent(&normal).into_inner();
        let has_uvs = self.source.has_uvs();

        for side in [NORMAL_SIDE, OPPOSITE_SIDE] {
            let (cap_normal, handedness) = if side == NORMAL_SIDE {
                (-normal, -1.0)
            } else {
                (normal, 1.0)
            };
            let bitangent = utils::bitangent(&cap_normal, &tangent, handedness);
            let first_cut_point = self.first_cut_points[side];
            let cut_edges = &self.cut_edges;
            let half = &mut self.halves[side];

            let new_edges: Vec<u32> = fill
                .edges
                .iter()
                .map(|[a, b]| half.push_edge(first_cut_point + a, first_cut_point + b))
                .collect();
            let edge_id = |eid: u32| match order.get(eid as usize) {
                Some(cut_edge) => cut_edges[*cut_edge as usize].edges[side],
                None => new_edges[eid as usize - order.len()],
            };

            let mut cap_vertices = vec![None; positions.len()];
            for (tri, tri_edges) in fill.triangles.iter().zip(fill.triangle_edges.iter()) {
                let vertices = tri.map(|p| {
                    *cap_vertices[p as usize].get_or_insert_with(|| {
                        let position = positions[p as usize];
                        let uv = has_uvs.then(|| {
                            TexCoord::new(position.coords.dot(&tangent), position.coords.dot(&bitangent))
                        });
                        half.push_vertex(
                            position,
                            cap_normal,
                            tangent.push(handedness),
                            uv,
                            first_cut_point + p,
                        )
                    })
                });

                let triangle = HullTriangle {
                    vertices,
                    points: tri.map(|p| first_cut_point + p),
                    edges: tri_edges.map(&edge_id),
                };

                if side == NORMAL_SIDE {
                    half.push_triangle(triangle.reversed());
                } else {
                    half.push_triangle(triangle);
                }
            }
        }

        log::trace!(
            "Capped the cross-section with {} triangles over {} cut edges.",
            fill.triangles.len(),
            self.cut_edges.len()
        );
    }
}
