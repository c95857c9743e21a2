use hullsplit3d::shape::Hull;

mod cap_fill;
mod hull_split;

/// The number of triangles bounded by each edge of `hull`.
fn edge_valences(hull: &Hull) -> Vec<usize> {
    let mut valences = vec![0; hull.num_edges()];
    for tri in hull.triangles() {
        for eid in tri.edges {
            valences[eid as usize] += 1;
        }
    }
    valences
}

fn assert_closed(hull: &Hull) {
    for (eid, valence) in edge_valences(hull).iter().enumerate() {
        assert_eq!(*valence, 2, "edge {eid} bounds {valence} triangle(s)");
    }
}
