use impact3d::bounding_volume::BoundingVolumeType;
use impact3d::math::{Isometry, Point, Real, Vector};
use impact3d::partitioning::{BvTree, BvTreeOptions, TraversalMode};
use impact3d::query::{
    intersecting_triangle_pairs, intersection_test_meshes, intersection_test_triangle_triangle,
    PositionedMesh,
};
use impact3d::shape::TriMesh;
use na::UnitQuaternion;

// A closed icosphere-like blob: an octahedron with jittered vertices.
fn blob(rng: &mut oorandom::Rand64, radius: Real) -> TriMesh {
    let mut jitter = || 1.0 + (rng.rand_float() - 0.5) * 0.3;
    let vertices = vec![
        Point::new(radius * jitter(), 0.0, 0.0),
        Point::new(-radius * jitter(), 0.0, 0.0),
        Point::new(0.0, radius * jitter(), 0.0),
        Point::new(0.0, -radius * jitter(), 0.0),
        Point::new(0.0, 0.0, radius * jitter()),
        Point::new(0.0, 0.0, -radius * jitter()),
    ];
    let indices = vec![
        [0, 2, 4],
        [2, 1, 4],
        [1, 3, 4],
        [3, 0, 4],
        [2, 0, 5],
        [1, 2, 5],
        [3, 1, 5],
        [0, 3, 5],
    ];
    TriMesh::new(vertices, indices).unwrap()
}

fn random_pose(rng: &mut oorandom::Rand64) -> Isometry<Real> {
    let mut coord = || (rng.rand_float() - 0.5) * 3.0;
    let translation = Vector::new(coord(), coord(), coord());
    let rotation = UnitQuaternion::from_euler_angles(coord(), coord(), coord());
    Isometry::from_parts(translation.into(), rotation)
}

fn brute_force(mesh1: &TriMesh, pos1: &Isometry<Real>, mesh2: &TriMesh, pos2: &Isometry<Real>) -> Vec<(u32, u32)> {
    let mut pairs = vec![];
    for i in 0..mesh1.num_triangles() as u32 {
        for j in 0..mesh2.num_triangles() as u32 {
            let tri1 = mesh1.triangle(i).transformed(pos1);
            let tri2 = mesh2.triangle(j).transformed(pos2);
            if intersection_test_triangle_triangle(&tri1, &tri2) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

#[test]
fn mesh_intersection_matches_brute_force_for_every_volume_kind() {
    let mut rng = oorandom::Rand64::new(7);
    let kinds = [
        BoundingVolumeType::Obb,
        BoundingVolumeType::Aabb,
        BoundingVolumeType::Sphere,
        BoundingVolumeType::SweptRect,
        BoundingVolumeType::SweptSegment,
    ];
    let mut num_hits = 0;

    for _ in 0..50 {
        let mesh1 = blob(&mut rng, 1.0);
        let mesh2 = blob(&mut rng, 0.8);
        let pos1 = random_pose(&mut rng);
        let pos2 = random_pose(&mut rng);
        let mut expected = brute_force(&mesh1, &pos1, &mesh2, &pos2);
        expected.sort_unstable();

        for kind in kinds {
            let options = BvTreeOptions {
                kind,
                max_leaf_triangles: 2,
                ..Default::default()
            };
            let tree1 = BvTree::build(&mesh1, &options);
            let tree2 = BvTree::build(&mesh2, &options);
            let m1 = PositionedMesh { mesh: &mesh1, tree: &tree1, pos: &pos1 };
            let m2 = PositionedMesh { mesh: &mesh2, tree: &tree2, pos: &pos2 };

            let mut found = intersecting_triangle_pairs(m1, m2, TraversalMode::AllContacts);
            found.sort_unstable();
            assert_eq!(found, expected, "{:?}", kind);

            // Swapping the meshes must give the same answer.
            assert_eq!(intersection_test_meshes(m1, m2), !expected.is_empty());
            assert_eq!(intersection_test_meshes(m2, m1), !expected.is_empty());
        }

        if !expected.is_empty() {
            num_hits += 1;
        }
    }

    // Make sure the poses actually exercise intersecting configurations.
    assert!(num_hits > 0);
}
