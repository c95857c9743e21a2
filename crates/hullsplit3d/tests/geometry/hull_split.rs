use super::assert_closed;
use hullsplit3d::math::{Point, Real, Vector};
use hullsplit3d::query::{CutPlane, SplitError};
use hullsplit3d::shape::{Hull, MeshBuffers};

fn unit_cube() -> Hull {
    Hull::new(MeshBuffers::cuboid(&Vector::repeat(0.5))).unwrap()
}

fn tetrahedron() -> Hull {
    let points = [
        Point::new(0.0, 0.0, 0.0),
        Point::new(1.0, 0.0, 0.0),
        Point::new(0.0, 1.0, 0.0),
        Point::new(0.0, 0.0, 1.0),
    ];
    let indices = [[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]];
    Hull::new(MeshBuffers::from_flat_triangles(&points, &indices)).unwrap()
}

fn num_crossed_triangles(hull: &Hull, plane: &CutPlane) -> usize {
    hull.triangles()
        .iter()
        .filter(|tri| {
            let sides = tri
                .points
                .map(|pid| plane.is_on_normal_side(&hull.points()[pid as usize].position));
            sides[0] != sides[1] || sides[1] != sides[2]
        })
        .count()
}

#[test]
fn cube_halves_have_half_volume() {
    let (above, below) = unit_cube()
        .split(&Point::origin(), &Vector::y(), true)
        .unwrap();

    for half in [&above, &below] {
        assert!(!half.is_empty());
        assert_relative_eq!(half.volume(), 0.5, epsilon = 1.0e-5);
        // 6 halved faces, one whole face, and an 8-point cap.
        assert_eq!(half.num_triangles(), 20);
        assert_closed(half);
    }

    assert!(above.positions().iter().all(|pt| pt.y >= 0.0));
    assert!(below.positions().iter().all(|pt| pt.y <= 0.0));
}

#[test]
fn crossed_triangles_are_split_in_three() {
    let planes = [
        CutPlane::new(Point::new(0.0, 0.1, 0.0), Vector::y()),
        CutPlane::new(Point::new(0.1, 0.2, 0.05), Vector::new(1.0, 1.0, 1.0)),
        CutPlane::new(Point::new(0.0, 0.0, 0.2), Vector::new(0.3, -0.2, 1.0)),
    ];

    for plane in &planes {
        let cube = unit_cube();
        let crossed = num_crossed_triangles(&cube, plane);
        assert!(crossed > 0);

        let (a, b) = cube.clone().split_by_plane(plane, false).unwrap();
        assert_eq!(
            a.num_triangles() + b.num_triangles(),
            cube.num_triangles() + 2 * crossed
        );
    }
}

#[test]
fn cap_faces_away_from_each_half() {
    let (above, below) = unit_cube()
        .split(&Point::origin(), &Vector::y(), true)
        .unwrap();

    let cap_of = |half: &Hull, normal: Vector<Real>| -> Vec<usize> {
        (0..half.num_vertices())
            .filter(|vid| half.normals()[*vid] == normal)
            .collect()
    };

    let above_cap = cap_of(&above, -Vector::y());
    let below_cap = cap_of(&below, Vector::y());
    assert_eq!(above_cap.len(), 8);
    assert_eq!(below_cap.len(), 8);

    for vid in above_cap {
        assert_relative_eq!(above.positions()[vid].y, 0.0, epsilon = 1.0e-6);
        assert_eq!(above.tangents()[vid].w, -1.0);
    }
    for vid in below_cap {
        assert_relative_eq!(below.positions()[vid].y, 0.0, epsilon = 1.0e-6);
        assert_eq!(below.tangents()[vid].w, 1.0);
    }
}

#[test]
fn plane_missing_the_hull_keeps_it_whole() {
    let tetra = tetrahedron();

    let (a, b) = tetra
        .clone()
        .split(&Point::new(0.0, -1.0, 0.0), &Vector::y(), true)
        .unwrap();
    assert_eq!(a, tetra);
    assert!(b.is_empty());
    assert_eq!(b, Hull::default());

    let (a, b) = tetra
        .clone()
        .split(&Point::new(0.0, -1.0, 0.0), &-Vector::y(), true)
        .unwrap();
    assert!(a.is_empty());
    assert_eq!(b, tetra);
}

#[test]
fn splitting_a_half_again_changes_nothing() {
    let (above, below) = unit_cube()
        .split(&Point::origin(), &Vector::y(), true)
        .unwrap();

    let (again, rest) = above
        .clone()
        .split(&Point::origin(), &Vector::y(), true)
        .unwrap();
    assert!(rest.is_empty());
    assert_eq!(again.num_triangles(), above.num_triangles());
    assert_relative_eq!(again.volume(), above.volume(), epsilon = 1.0e-6);

    let (again, rest) = below
        .clone()
        .split(&Point::origin(), &-Vector::y(), true)
        .unwrap();
    assert!(rest.is_empty());
    assert_eq!(again.num_triangles(), below.num_triangles());
}

#[test]
fn zero_normal_splits_along_up() {
    let point = Point::new(0.0, 0.1, 0.0);
    let (a, b) = unit_cube().split(&point, &Vector::zeros(), true).unwrap();
    let (up_a, up_b) = unit_cube().split(&point, &Vector::y(), true).unwrap();

    assert_relative_eq!(a.volume(), 0.4, epsilon = 1.0e-4);
    assert_relative_eq!(b.volume(), 0.6, epsilon = 1.0e-4);
    assert_eq!(a, up_a);
    assert_eq!(b, up_b);
}

#[test]
fn random_cuts_keep_attributes_consistent() {
    let mut rng = oorandom::Rand32::new(42);

    for _ in 0..100 {
        let point = Point::from(Vector::from_fn(|_, _| rng.rand_float() * 0.8 - 0.4));
        let normal = Vector::from_fn(|_, _| rng.rand_float() * 2.0 - 1.0);
        let (a, b) = unit_cube().split(&point, &normal, true).unwrap();

        assert_relative_eq!(a.volume() + b.volume(), 1.0, epsilon = 1.0e-3);

        for half in [&a, &b] {
            assert_eq!(half.uvs().len(), half.num_vertices());
            assert_eq!(half.normals().len(), half.num_vertices());

            for n in half.normals() {
                assert!(n.iter().all(|x| x.is_finite()));
                assert_relative_eq!(n.norm(), 1.0, epsilon = 1.0e-4);
            }
            for t in half.tangents() {
                assert_relative_eq!(t.xyz().norm(), 1.0, epsilon = 1.0e-4);
                assert_eq!(t.w.abs(), 1.0);
            }
            for tri in half.triangles() {
                for (vid, pid) in tri.vertices.iter().zip(tri.points.iter()) {
                    assert_eq!(half.vertex_points()[*vid as usize], *pid);
                }
            }
        }
    }
}

#[test]
fn empty_hull_cannot_be_split() {
    let result = Hull::default().split(&Point::origin(), &Vector::y(), true);
    assert!(matches!(
        result,
        Err(SplitError::EmptyHull {
            points: 0,
            edges: 0,
            triangles: 0
        })
    ));
}
