use crate::math::{Point, Real, Tangent, TexCoord, Vector, DEFAULT_EPSILON};
use crate::query::split::{CutPlane, SplitError};
use crate::shape::{Hull, HullTriangle};

/// The two sides of a cut, indexing the halves of a split.
pub(super) const NORMAL_SIDE: usize = 0;
pub(super) const OPPOSITE_SIDE: usize = 1;

/// Where the plane crosses an edge of the hull being split.
#[derive(Copy, Clone, Debug)]
pub(super) struct EdgeHit {
    /// The position of the crossing along the edge, from its first point.
    pub scalar: Real,
    /// The rank of this crossing among all the crossings of the split.
    ///
    /// The point created at the crossing has the same rank among the points each half
    /// received during the split.
    pub cut_point: u32,
    /// The part of the crossed edge kept by each half.
    pub split_edges: [u32; 2],
}

#[derive(Copy, Clone, Debug)]
pub(super) enum EdgeFate {
    /// Both ends are on the same side: the edge is moved to that half, with this id.
    Moved(u32),
    /// The ends are on different sides.
    Crossed(EdgeHit),
}

/// An edge of the cross-section, created once in each half.
#[derive(Copy, Clone, Debug)]
pub(super) struct CutEdge {
    /// The id of the edge in each half.
    pub edges: [u32; 2],
    /// The ranks of its start and end cut points.
    pub cut_points: [u32; 2],
}

/// The scratch state of one split.
pub(super) struct HullSplitter<'a> {
    pub source: &'a Hull,
    pub plane: &'a CutPlane,
    pub halves: [Hull; 2],
    /// The side of each source point.
    pub point_sides: Vec<usize>,
    /// The id of each source point in the half it went to.
    pub point_map: Vec<u32>,
    /// The id of each source vertex in the half it went to.
    pub vertex_map: Vec<u32>,
    pub edge_fates: Vec<EdgeFate>,
    /// The number of points each half had before the first cut point was created.
    pub first_cut_points: [u32; 2],
    pub cut_edges: Vec<CutEdge>,
}

impl Hull {
    /// Splits this hull by the plane through `point` with the given `normal`.
    ///
    /// Returns the part on the side the normal points to (points on the plane included),
    /// and the part on the other side. If `fill_cut` is `true`, both parts are closed by a
    /// flat cap along the cross-section.
    ///
    /// A zero `normal` is replaced by the [up](crate::math::up) direction. Either part may be
    /// empty (see [`Hull::is_empty`]) if the plane does not cross this hull, in which case
    /// it must not be split further nor exported.
    pub fn split(
        self,
        point: &Point<Real>,
        normal: &Vector<Real>,
        fill_cut: bool,
    ) -> Result<(Hull, Hull), SplitError> {
        self.split_by_plane(&CutPlane::new(*point, *normal), fill_cut)
    }

    /// Splits this hull by a plane.
    ///
    /// See [`Hull::split`].
    pub fn split_by_plane(
        self,
        plane: &CutPlane,
        fill_cut: bool,
    ) -> Result<(Hull, Hull), SplitError> {
        if self.is_empty() {
            return Err(SplitError::EmptyHull {
                points: self.num_points(),
                edges: self.num_edges(),
                triangles: self.num_triangles(),
            });
        }

        let mut splitter = HullSplitter::new(&self, plane);
        splitter.classify_points();
        splitter.migrate_vertices();
        splitter.classify_edges();
        splitter.split_triangles();

        if fill_cut {
            splitter.fill_cut();
        }

        let [above, below] = splitter.halves;

        log::trace!(
            "Split a hull of {} triangles into {} and {} triangles.",
            self.num_triangles(),
            above.num_triangles(),
            below.num_triangles()
        );

        Ok((above, below))
    }
}

impl<'a> HullSplitter<'a> {
    fn new(source: &'a Hull, plane: &'a CutPlane) -> Self {
        Self {
            source,
            plane,
            halves: [
                Hull::with_capacity_for_split_of(source),
                Hull::with_capacity_for_split_of(source),
            ],
            point_sides: Vec::with_capacity(source.num_points()),
            point_map: Vec::with_capacity(source.num_points()),
            vertex_map: Vec::with_capacity(source.num_vertices()),
            edge_fates: Vec::with_capacity(source.num_edges()),
            first_cut_points: [0; 2],
            cut_edges: Vec::new(),
        }
    }

    fn classify_points(&mut self) {
        for pt in self.source.points() {
            let side = if self.plane.is_on_normal_side(&pt.position) {
                NORMAL_SIDE
            } else {
                OPPOSITE_SIDE
            };

            self.point_sides.push(side);
            self.point_map.push(self.halves[side].push_point(pt.position));
        }
    }

    fn migrate_vertices(&mut self) {
        for (vid, pid) in self.source.vertex_points().iter().enumerate() {
            let side = self.point_sides[*pid as usize];
            let point = self.point_map[*pid as usize];
            let new_vid = self.halves[side].push_vertex_from(self.source, vid as u32, point);
            self.vertex_map.push(new_vid);
        }
    }

    fn classify_edges(&mut self) {
        self.first_cut_points = self.halves.each_ref().map(|h| h.num_points() as u32);
        let mut num_crossings = 0;

        for edge in self.source.edges() {
            let [p0, p1] = edge.points.map(|p| p as usize);
            let sides = [self.point_sides[p0], self.point_sides[p1]];

            if sides[0] == sides[1] {
                let moved = self.halves[sides[0]].push_edge(self.point_map[p0], self.point_map[p1]);
                self.edge_fates.push(EdgeFate::Moved(moved));
                continue;
            }

            let start = self.source.points()[p0].position;
            let scalar = intersection_scalar(self.plane, &start, &edge.line);
            let position = start + edge.line * scalar;
            let mut split_edges = [0; 2];

            for (side, split_edge) in split_edges.iter_mut().enumerate() {
                let kept_end = if sides[0] == side { p0 } else { p1 };
                let kept_end = self.point_map[kept_end];
                let cut_point = self.halves[side].push_point(position);
                *split_edge = self.halves[side].push_edge(cut_point, kept_end);
            }

            self.edge_fates.push(EdgeFate::Crossed(EdgeHit {
                scalar,
                cut_point: num_crossings,
                split_edges,
            }));
            num_crossings += 1;
        }
    }

    /// The id, in the half `side`, of the point created at the crossing `hit`.
    pub(super) fn cut_point(&self, side: usize, hit: &EdgeHit) -> u32 {
        self.first_cut_points[side] + hit.cut_point
    }

    fn moved_edge(&self, eid: u32) -> Option<u32> {
        match self.edge_fates[eid as usize] {
            EdgeFate::Moved(id) => Some(id),
            EdgeFate::Crossed(_) => None,
        }
    }

    fn split_triangles(&mut self) {
        let source = self.source;

        for tri in source.triangles() {
            let sides = tri.points.map(|p| self.point_sides[p as usize]);

            if sides[0] == sides[1] && sides[1] == sides[2] {
                let [Some(e0), Some(e1), Some(e2)] = tri.edges.map(|e| self.moved_edge(e)) else {
                    log::debug!("Skipping a triangle with a crossed edge on one side of the plane.");
                    continue;
                };

                self.halves[sides[0]].push_triangle(HullTriangle {
                    vertices: tri.vertices.map(|v| self.vertex_map[v as usize]),
                    points: tri.points.map(|p| self.point_map[p as usize]),
                    edges: [e0, e1, e2],
                });
            } else {
                // The apex is the corner alone on its side.
                let apex = if sides[0] == sides[1] {
                    2
                } else if sides[1] == sides[2] {
                    0
                } else {
                    1
                };
                self.split_crossed_triangle(&tri.rotated((apex + 2) % 3));
            }
        }
    }

    /// Splits a triangle whose second corner is alone on its side of the plane.
    ///
    /// ```text
    ///            apex
    ///            /\
    ///           /  \
    ///   -------c0--c1------- plane
    ///         / ..   \
    ///        /    ..  \
    ///      v0 -------- v2
    /// ```
    fn split_crossed_triangle(&mut self, tri: &HullTriangle) {
        let (EdgeFate::Crossed(hit0), EdgeFate::Crossed(hit1)) = (
            self.edge_fates[tri.edges[0] as usize],
            self.edge_fates[tri.edges[1] as usize],
        ) else {
            log::debug!("Skipping a crossed triangle without two crossed edges.");
            return;
        };
        let Some(far_edge) = self.moved_edge(tri.edges[2]) else {
            log::debug!("Skipping a crossed triangle with three crossed edges.");
            return;
        };

        let [v0, apex, v2] = tri.vertices;
        let [p0, apex_point, p2] = tri.points.map(|p| p as usize);
        let apex_side = self.point_sides[apex_point];
        let far_side = 1 - apex_side;

        // Measure the crossings from the apex.
        let from_apex = |eid: u32, hit: &EdgeHit| {
            if self.source.edges()[eid as usize].points[0] == apex_point as u32 {
                hit.scalar
            } else {
                1.0 - hit.scalar
            }
        };
        let t0 = from_apex(tri.edges[0], &hit0);
        let t1 = from_apex(tri.edges[1], &hit1);
        let attributes0 = self.interpolated_attributes(apex, v0, t0);
        let attributes1 = self.interpolated_attributes(apex, v2, t1);

        let mut c0 = [0; 2];
        let mut c1 = [0; 2];
        let mut cut_edges = [0; 2];
        // The cut edges follow the winding of the triangles of the normal side.
        let (cut_start, cut_end) = if apex_side == NORMAL_SIDE {
            (hit1, hit0)
        } else {
            (hit0, hit1)
        };

        for side in [NORMAL_SIDE, OPPOSITE_SIDE] {
            let cp0 = self.cut_point(side, &hit0);
            let cp1 = self.cut_point(side, &hit1);
            let start = self.cut_point(side, &cut_start);
            let end = self.cut_point(side, &cut_end);
            let half = &mut self.halves[side];
            c0[side] = attributes0.push_to(half, cp0);
            c1[side] = attributes1.push_to(half, cp1);
            cut_edges[side] = half.push_edge(start, end);
        }

        self.cut_edges.push(CutEdge {
            edges: cut_edges,
            cut_points: [cut_start.cut_point, cut_end.cut_point],
        });

        let apex_cp0 = self.cut_point(apex_side, &hit0);
        let apex_cp1 = self.cut_point(apex_side, &hit1);
        self.halves[apex_side].push_triangle(HullTriangle {
            vertices: [c0[apex_side], self.vertex_map[apex as usize], c1[apex_side]],
            points: [apex_cp0, self.point_map[apex_point], apex_cp1],
            edges: [
                hit0.split_edges[apex_side],
                hit1.split_edges[apex_side],
                cut_edges[apex_side],
            ],
        });

        // The far side gets the quad (v0, c0, c1, v2), split along v0-c1.
        let far_cp0 = self.cut_point(far_side, &hit0);
        let far_cp1 = self.cut_point(far_side, &hit1);
        let far_v0 = self.vertex_map[v0 as usize];
        let far_v2 = self.vertex_map[v2 as usize];
        let far_p0 = self.point_map[p0];
        let far_p2 = self.point_map[p2];
        let half = &mut self.halves[far_side];
        let diagonal = half.push_edge(far_p0, far_cp1);

        half.push_triangle(HullTriangle {
            vertices: [far_v0, c0[far_side], c1[far_side]],
            points: [far_p0, far_cp0, far_cp1],
            edges: [hit0.split_edges[far_side], cut_edges[far_side], diagonal],
        });
        half.push_triangle(HullTriangle {
            vertices: [far_v0, c1[far_side], far_v2],
            points: [far_p0, far_cp1, far_p2],
            edges: [diagonal, hit1.split_edges[far_side], far_edge],
        });
    }

    /// The attributes of the vertex at `t` along the segment from the `apex` vertex to the
    /// `other` vertex.
    fn interpolated_attributes(&self, apex: u32, other: u32, t: Real) -> CutVertex {
        let (apex, other) = (apex as usize, other as usize);
        let source = self.source;
        let apex_normal = source.normals()[apex];
        let apex_tangent = source.tangents()[apex];

        let normal = apex_normal
            .lerp(&source.normals()[other], t)
            .try_normalize(DEFAULT_EPSILON)
            .unwrap_or(apex_normal);
        let tangent = apex_tangent
            .xyz()
            .lerp(&source.tangents()[other].xyz(), t)
            .try_normalize(DEFAULT_EPSILON)
            .unwrap_or_else(|| apex_tangent.xyz());
        let uv = source
            .uvs()
            .get(apex)
            .zip(source.uvs().get(other))
            .map(|(apex_uv, other_uv)| apex_uv.lerp(other_uv, t));

        CutVertex {
            normal,
            tangent: tangent.push(apex_tangent.w),
            uv,
        }
    }
}

/// The attributes of a vertex created where the plane crosses an edge.
struct CutVertex {
    normal: Vector<Real>,
    tangent: Tangent<Real>,
    uv: Option<TexCoord<Real>>,
}

impl CutVertex {
    fn push_to(&self, half: &mut Hull, point: u32) -> u32 {
        let position = half.points()[point as usize].position;
        half.push_vertex(position, self.normal, self.tangent, self.uv, point)
    }
}

/// The position of the intersection of the plane with the segment `[start, start + line]`,
/// as a fraction of `line`.
fn intersection_scalar(plane: &CutPlane, start: &Point<Real>, line: &Vector<Real>) -> Real {
    let scalar = (plane.point - start).dot(&*plane.normal) / line.dot(&*plane.normal);

    if scalar.is_finite() {
        scalar.clamp(0.0, 1.0)
    } else {
        log::debug!("Edge {:?} is parallel to the cut plane.", line);
        0.0
    }
}
