use super::{assert_closed, edge_valences};
use hullsplit3d::math::{Point, Real, Vector};
use hullsplit3d::query::{split_hulls_by_planes, CutPlane};
use hullsplit3d::shape::{Hull, MeshBuffers};
use hullsplit3d::transformation::triangulate_edge_loops;
use na::{Rotation3, Vector3};

/// A square prism of half-width 2 with a square hole of half-width 1 along `z`.
fn square_ring() -> Hull {
    let corners = [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];
    let mut points = Vec::new();
    for scale in [2.0, 1.0] {
        for z in [-1.0, 1.0] {
            for [x, y] in corners {
                points.push(Point::new(x * scale, y * scale, z));
            }
        }
    }

    // Point `i` of the outer (0) or inner (1) square, on the bottom (0) or top (1) face.
    let pid = |ring: u32, i: u32, top: u32| ring * 8 + top * 4 + i % 4;
    let mut triangles = Vec::new();
    for i in 0..4 {
        let j = i + 1;
        triangles.extend_from_slice(&[
            [pid(0, i, 1), pid(0, j, 1), pid(1, j, 1)],
            [pid(0, i, 1), pid(1, j, 1), pid(1, i, 1)],
            [pid(0, i, 0), pid(1, j, 0), pid(0, j, 0)],
            [pid(0, i, 0), pid(1, i, 0), pid(1, j, 0)],
            [pid(0, i, 0), pid(0, j, 0), pid(0, j, 1)],
            [pid(0, i, 0), pid(0, j, 1), pid(0, i, 1)],
            [pid(1, i, 0), pid(1, j, 1), pid(1, j, 0)],
            [pid(1, i, 0), pid(1, i, 1), pid(1, j, 1)],
        ]);
    }

    Hull::new(MeshBuffers::from_flat_triangles(&points, &triangles)).unwrap()
}

#[test]
fn square_ring_is_closed() {
    let ring = square_ring();
    assert_eq!(ring.num_points(), 16);
    assert_eq!(ring.num_edges(), 48);
    assert_eq!(ring.num_triangles(), 32);
    assert_relative_eq!(ring.volume(), 24.0, epsilon = 1.0e-4);
    assert_closed(&ring);
}

#[test]
fn cap_goes_around_the_hole() {
    let (above, below) = square_ring()
        .split(&Point::new(0.05, 0.1, 0.2), &Vector::new(0.1, 0.2, 1.0), true)
        .unwrap();

    assert_relative_eq!(above.volume(), 9.3, epsilon = 1.0e-3);
    assert_relative_eq!(below.volume(), 14.7, epsilon = 1.0e-3);

    for half in [&above, &below] {
        // 16 crossed triangles on the walls, an 8-point outer loop and an 8-point hole.
        assert_eq!(half.num_triangles(), 48);
        assert_closed(half);
    }
}

#[test]
fn unfilled_cut_leaves_the_halves_open() {
    let (above, below) = square_ring()
        .split(&Point::new(0.0, 0.0, 0.25), &Vector::z(), false)
        .unwrap();

    assert_eq!(above.num_triangles(), 32);
    assert_eq!(below.num_triangles(), 32);
    assert!(edge_valences(&above).contains(&1));
    assert!(edge_valences(&below).contains(&1));
}

#[test]
fn quarters_of_a_ring() {
    let planes = [
        CutPlane::new(Point::new(0.1, 0.0, 0.0), Vector::x()),
        CutPlane::new(Point::new(0.0, 0.2, 0.0), Vector::y()),
    ];
    let pieces = split_hulls_by_planes(vec![square_ring()], &planes, true);
    assert_eq!(pieces.len(), 4);

    let mut volumes: Vec<Real> = pieces.iter().map(|piece| piece.volume()).collect();
    volumes.sort_by(|a, b| a.total_cmp(b));
    for (volume, expected) in volumes.iter().zip([5.4, 5.8, 6.2, 6.6]) {
        assert_relative_eq!(*volume, expected, epsilon = 1.0e-3);
    }

    for piece in &pieces {
        assert_closed(piece);
    }
}

#[test]
fn concave_loop_on_a_tilted_plane() {
    let rotation = Rotation3::from_axis_angle(&Vector3::x_axis(), 0.7);
    let outline = [
        [0.0, 0.0],
        [3.0, 0.0],
        [3.0, 3.0],
        [2.0, 3.0],
        [2.0, 1.0],
        [1.0, 1.0],
        [1.0, 3.0],
        [0.0, 3.0],
    ];
    let points: Vec<_> = outline
        .iter()
        .map(|[x, y]| rotation * Point::new(*x, *y, 0.0))
        .collect();
    let edges: Vec<[u32; 2]> = (0..8).map(|i| [i, (i + 1) % 8]).collect();
    let normal = rotation * Vector::z();

    let fill = triangulate_edge_loops(&points, &edges, &normal);
    assert_eq!(fill.unfilled_loops, 0);
    assert_eq!(fill.triangles.len(), 6);
    assert_eq!(fill.edges.len(), 5);

    let mut area = 0.0;
    for [a, b, c] in &fill.triangles {
        let [a, b, c] = [a, b, c].map(|i| points[*i as usize]);
        let signed = (b - a).cross(&(c - a)).dot(&normal) / 2.0;
        assert!(signed > -1.0e-5);
        area += signed;
    }
    assert_relative_eq!(area, 7.0, epsilon = 1.0e-4);
}
