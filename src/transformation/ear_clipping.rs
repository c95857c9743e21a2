//! Ear-clipping triangulation of planar edge loops, with support for holes.
//!
//! Holes are fused into their enclosing loop by a pair of coincident bridge edges
//! before the ears around them are clipped.

use crate::math::{Point, Real, Vector};
use crate::transformation::edge_loops::extract_edge_loops;
use crate::utils::{corner_direction, is_point_in_triangle, Orientation};
use core::iter;
use ordered_float::OrderedFloat;

/// The result of [`triangulate_edge_loops`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoopTriangulation {
    /// The edges created by the triangulation, as `[start, end]` point indices.
    ///
    /// The `i`-th new edge has the index `num_input_edges + i` in
    /// [`LoopTriangulation::triangle_edges`].
    pub edges: Vec<[u32; 2]>,
    /// The output triangles, wound counter-clockwise around the plane normal.
    pub triangles: Vec<[u32; 3]>,
    /// For each triangle, the indices of its three edges, into the input edges followed by
    /// the new edges. The `i`-th edge joins the `i`-th and `(i + 1) % 3`-th triangle corners.
    pub triangle_edges: Vec<[u32; 3]>,
    /// The number of loops, holes and open chains that could not be filled.
    pub unfilled_loops: usize,
}

/// One loop being clipped.
///
/// The `i`-th vertex of the loop is the start point of its `i`-th edge.
struct EdgeLoop {
    edges: Vec<u32>,
    reflex: Vec<bool>,
    is_hole: bool,
}

enum EarOutcome {
    Rejected,
    Fused,
    Clipped,
}

struct EarClipper<'a> {
    points: &'a [Point<Real>],
    normal: Vector<Real>,
    edges: Vec<[u32; 2]>,
    bridges: Vec<[u32; 2]>,
    triangles: Vec<[u32; 3]>,
    triangle_edges: Vec<[u32; 3]>,
}

/// Triangulates closed planar loops of directed edges.
///
/// The loops are given by `edges`, as `[start, end]` indices into `points`, in any order.
/// Loops wound counter-clockwise around `normal` are filled. Loops wound clockwise are holes:
/// they are fused into the loop enclosing them and never filled on their own.
///
/// Loops for which no ear can be found, holes that do not lie inside any loop, and chains of
/// edges that do not close are left unfilled and counted in
/// [`LoopTriangulation::unfilled_loops`].
pub fn triangulate_edge_loops(
    points: &[Point<Real>],
    edges: &[[u32; 2]],
    normal: &Vector<Real>,
) -> LoopTriangulation {
    let sorted = extract_edge_loops(edges);
    let mut clipper = EarClipper {
        points,
        normal: *normal,
        edges: edges.to_vec(),
        bridges: Vec::new(),
        triangles: Vec::new(),
        triangle_edges: Vec::new(),
    };
    let mut unfilled_loops = sorted.open_chains;

    let mut loops: Vec<_> = sorted
        .loops
        .into_iter()
        .filter_map(|loop_edges| {
            if loop_edges.len() < 3 {
                log::debug!("Skipping a degenerate loop of {} edges.", loop_edges.len());
                None
            } else {
                Some(clipper.new_loop(loop_edges))
            }
        })
        .collect();

    while let Some(i) = loops.iter().position(|lp| !lp.is_hole) {
        let current = loops.remove(i);
        if !clipper.fill_loop(current, &mut loops) {
            unfilled_loops += 1;
        }
    }

    if !loops.is_empty() {
        log::debug!(
            "{} hole(s) did not lie inside any filled loop.",
            loops.len()
        );
        unfilled_loops += loops.len();
    }

    clipper.into_triangulation(edges.len(), unfilled_loops)
}

impl EarClipper<'_> {
    fn start(&self, edge: u32) -> u32 {
        self.edges[edge as usize][0]
    }

    fn end(&self, edge: u32) -> u32 {
        self.edges[edge as usize][1]
    }

    fn push_edge(&mut self, edge: [u32; 2]) -> u32 {
        self.edges.push(edge);
        self.edges.len() as u32 - 1
    }

    fn new_loop(&self, edges: Vec<u32>) -> EdgeLoop {
        let twice_area: Vector<Real> = edges
            .iter()
            .map(|e| {
                let [a, b] = self.edges[*e as usize];
                self.points[a as usize]
                    .coords
                    .cross(&self.points[b as usize].coords)
            })
            .sum();

        let reflex = (0..edges.len())
            .map(|i| self.corner(&edges, i) == Orientation::Cw)
            .collect();

        EdgeLoop {
            is_hole: twice_area.dot(&self.normal) <= 0.0,
            edges,
            reflex,
        }
    }

    /// The turn direction at the `i`-th vertex of the loop.
    fn corner(&self, loop_edges: &[u32], i: usize) -> Orientation {
        let len = loop_edges.len();
        let incoming = loop_edges[(i + len - 1) % len];
        let outgoing = loop_edges[i];

        corner_direction(
            &self.points[self.start(incoming) as usize],
            &self.points[self.start(outgoing) as usize],
            &self.points[self.end(outgoing) as usize],
            &self.normal,
        )
    }

    fn update_reflex(&self, lp: &mut EdgeLoop, i: usize) {
        lp.reflex[i] = self.corner(&lp.edges, i) == Orientation::Cw;
    }

    /// Clips every ear of `lp`. Returns `false` if the loop could not be entirely filled.
    fn fill_loop(&mut self, mut lp: EdgeLoop, others: &mut Vec<EdgeLoop>) -> bool {
        let mut i = 0;
        let mut unsuitable = 0;
        // Ears with a flat tip are only clipped when no other ear is left.
        let mut allow_flat = false;

        while lp.edges.len() >= 3 {
            if unsuitable >= lp.edges.len() {
                if allow_flat {
                    log::debug!(
                        "No ear found on a loop with {} remaining edges.",
                        lp.edges.len()
                    );
                    return false;
                }

                allow_flat = true;
                unsuitable = 0;
            }

            i %= lp.edges.len();

            match self.try_ear(&mut lp, i, others, allow_flat) {
                EarOutcome::Rejected => {
                    unsuitable += 1;
                    i += 1;
                }
                EarOutcome::Fused | EarOutcome::Clipped => {
                    unsuitable = 0;
                    allow_flat = false;
                }
            }
        }

        true
    }

    fn try_ear(
        &mut self,
        lp: &mut EdgeLoop,
        i: usize,
        others: &mut Vec<EdgeLoop>,
        allow_flat: bool,
    ) -> EarOutcome {
        match self.corner(&lp.edges, i) {
            Orientation::Cw => return EarOutcome::Rejected,
            Orientation::None if !allow_flat => return EarOutcome::Rejected,
            _ => {}
        }

        let points = self.points;
        let len = lp.edges.len();
        let prev = self.start(lp.edges[(i + len - 1) % len]);
        let tip = self.start(lp.edges[i]);
        let next = self.end(lp.edges[i]);
        let ear = [prev, tip, next].map(|pid| &points[pid as usize]);
        let is_inside_ear = |pid: u32| {
            pid != prev
                && pid != tip
                && pid != next
                && is_point_in_triangle(&points[pid as usize], ear[0], ear[1], ear[2])
        };

        // Ears containing a reflex vertex of their own loop are neither clipped nor used to
        // fuse a hole.
        let overlaps_reflex = lp
            .edges
            .iter()
            .zip(lp.reflex.iter())
            .any(|(edge, reflex)| *reflex && is_inside_ear(self.start(*edge)));

        if overlaps_reflex {
            return EarOutcome::Rejected;
        }

        // Vertices of other loops inside the ear must belong to holes, to be fused.
        let mut anchor = None;
        let mut best_key = (OrderedFloat(Real::MAX), OrderedFloat(Real::MAX));
        for (j, other) in others.iter().enumerate() {
            for (k, edge) in other.edges.iter().enumerate() {
                let pid = self.start(*edge);
                if !is_inside_ear(pid) {
                    continue;
                }

                if !other.is_hole {
                    return EarOutcome::Rejected;
                }

                let to_prev = ear[0] - ear[1];
                let to_pt = points[pid as usize] - ear[1];
                let key = (
                    OrderedFloat(to_prev.angle(&to_pt)),
                    OrderedFloat(to_pt.norm_squared()),
                );

                if key < best_key {
                    best_key = key;
                    anchor = Some((j, k));
                }
            }
        }

        if let Some((j, k)) = anchor {
            let hole = others.remove(j);
            self.fuse_hole(lp, i, hole, k);
            return EarOutcome::Fused;
        }

        self.clip_ear(lp, i);
        EarOutcome::Clipped
    }

    /// Splices `hole` into `lp` with a bridge from the `i`-th vertex of `lp` to the `k`-th
    /// vertex of `hole`.
    fn fuse_hole(&mut self, lp: &mut EdgeLoop, i: usize, hole: EdgeLoop, k: usize) {
        let tip = self.start(lp.edges[i]);
        let anchor = self.start(hole.edges[k]);
        let bridge_in = self.push_edge([tip, anchor]);
        let bridge_out = self.push_edge([anchor, tip]);
        self.bridges.push([bridge_in, bridge_out]);

        let hole_len = hole.edges.len();
        let spliced_edges = iter::once(bridge_in)
            .chain(hole.edges[k..].iter().copied())
            .chain(hole.edges[..k].iter().copied())
            .chain(iter::once(bridge_out));
        let spliced_reflex = iter::once(false)
            .chain(hole.reflex[k..].iter().copied())
            .chain(hole.reflex[..k].iter().copied())
            .chain(iter::once(false));

        let _ = lp.edges.splice(i..i, spliced_edges);
        let _ = lp.reflex.splice(i..i, spliced_reflex);

        let len = lp.edges.len();
        for j in [i, i + 1, i + hole_len + 1, i + hole_len + 2] {
            self.update_reflex(lp, j % len);
        }

        log::trace!(
            "Fused a hole of {} edges through the bridge {} -> {}.",
            hole_len,
            tip,
            anchor
        );
    }

    /// Clips the ear whose tip is the `i`-th vertex of `lp`.
    fn clip_ear(&mut self, lp: &mut EdgeLoop, i: usize) {
        let len = lp.edges.len();
        let prev_i = (i + len - 1) % len;
        let incoming = lp.edges[prev_i];
        let outgoing = lp.edges[i];
        let prev = self.start(incoming);
        let tip = self.start(outgoing);
        let next = self.end(outgoing);

        self.triangles.push([prev, tip, next]);

        if len == 3 {
            let closing = lp.edges[(i + 1) % len];
            self.triangle_edges.push([incoming, outgoing, closing]);
            lp.edges.clear();
            lp.reflex.clear();
            return;
        }

        let cross = self.push_edge([prev, next]);
        self.triangle_edges.push([incoming, outgoing, cross]);

        lp.edges[prev_i] = cross;
        let _ = lp.edges.remove(i);
        let _ = lp.reflex.remove(i);

        let prev_i = if prev_i > i { prev_i - 1 } else { prev_i };
        let next_i = i % lp.edges.len();
        self.update_reflex(lp, prev_i);
        self.update_reflex(lp, next_i);
    }

    /// Collapses every pair of bridge edges into a single edge and builds the output.
    fn into_triangulation(self, num_input_edges: usize, unfilled_loops: usize) -> LoopTriangulation {
        let num_edges = self.edges.len();
        let mut duplicate_of = vec![None; num_edges];
        for [kept, duplicate] in &self.bridges {
            duplicate_of[*duplicate as usize] = Some(*kept);
        }

        let mut remap: Vec<u32> = (0..num_edges as u32).collect();
        let mut new_edges = Vec::with_capacity(num_edges - num_input_edges);

        for eid in num_input_edges..num_edges {
            if duplicate_of[eid].is_none() {
                remap[eid] = (num_input_edges + new_edges.len()) as u32;
                new_edges.push(self.edges[eid]);
            }
        }

        // Bridges are always created before their duplicate, so `remap[kept]` is final here.
        for eid in num_input_edges..num_edges {
            if let Some(kept) = duplicate_of[eid] {
                remap[eid] = remap[kept as usize];
            }
        }

        let triangle_edges = self
            .triangle_edges
            .iter()
            .map(|tri| tri.map(|eid| remap[eid as usize]))
            .collect();

        LoopTriangulation {
            edges: new_edges,
            triangles: self.triangles,
            triangle_edges,
            unfilled_loops,
        }
    }
}
