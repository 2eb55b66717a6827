use super::test_bodies::{deformable_state, ground, rigid_state, state_map, TestBodies};
use impact3d::math::{Isometry, Point, Real, Vector};
use impact3d::pipeline::{CollisionDetector, CollisionDetectorConfig};
use impact3d::shape::TriMesh;
use std::sync::Arc;

const DT: Real = 0.1;

fn shifted(vertices: &[Point<Real>], shift: Vector<Real>) -> Vec<Point<Real>> {
    vertices.iter().map(|pt| pt + shift).collect()
}

// A triangle standing upright in the plane y = 0, its lowest edge at height `z`.
fn standing_triangle(z: Real) -> TriMesh {
    TriMesh::new(
        vec![
            Point::new(0.0, 0.0, z),
            Point::new(0.2, 0.0, z),
            Point::new(0.1, 0.0, z + 0.3),
        ],
        vec![[0, 1, 2]],
    )
    .unwrap()
}

#[test]
fn deformable_triangle_falling_on_rigid_ground() {
    let mut bodies = TestBodies::default();
    let sheet = standing_triangle(0.1);
    let soft = bodies.add_deformable(&sheet);
    let floor = bodies.add_rigid(Isometry::identity());

    let mut detector = CollisionDetector::new(CollisionDetectorConfig::default());
    let _ = detector.add_geometry(Arc::new(sheet.clone()), soft, Isometry::identity());
    let _ = detector.add_geometry(Arc::new(ground(2.0, 0.0)), floor, Isometry::identity());

    let end = shifted(sheet.vertices(), Vector::new(0.0, 0.0, -0.2));
    let q0 = state_map(vec![
        (soft, deformable_state(sheet.vertices())),
        (floor, rigid_state(Vector::zeros())),
    ]);
    let q1 = state_map(vec![
        (soft, deformable_state(&end)),
        (floor, rigid_state(Vector::zeros())),
    ]);

    assert!(detector.is_contact(DT, &q0, &q1, &mut bodies).unwrap());

    let contacts = detector.contacts();
    assert!(!contacts.is_empty());
    for contact in contacts {
        assert_eq!(contact.body1, soft);
        assert_eq!(contact.body2, floor);
        assert!((contact.t - 0.5).abs() <= 2.0e-4, "t = {}", contact.t);
        assert_relative_eq!(contact.normal, Vector::z(), epsilon = 1.0e-9);
        assert!(contact.point.z.abs() <= 1.0e-3);
    }

    // Both vertices of the lowest edge touch the ground.
    for x in [0.0, 0.2] {
        assert!(contacts
            .iter()
            .any(|c| (c.point.x - x).abs() <= 1.0e-3 && c.point.y.abs() <= 1.0e-3));
    }
}

#[test]
fn deformable_triangles_colliding_with_each_other() {
    let mut bodies = TestBodies::default();
    let falling = standing_triangle(0.1);
    let resting = TriMesh::new(
        vec![
            Point::new(-1.0, -1.0, 0.0),
            Point::new(1.0, -1.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        ],
        vec![[0, 1, 2]],
    )
    .unwrap();
    let soft1 = bodies.add_deformable(&falling);
    let soft2 = bodies.add_deformable(&resting);

    let mut detector = CollisionDetector::new(CollisionDetectorConfig::default());
    let _ = detector.add_geometry(Arc::new(falling.clone()), soft1, Isometry::identity());
    let _ = detector.add_geometry(Arc::new(resting.clone()), soft2, Isometry::identity());

    let end = shifted(falling.vertices(), Vector::new(0.0, 0.0, -0.2));
    let q0 = state_map(vec![
        (soft1, deformable_state(falling.vertices())),
        (soft2, deformable_state(resting.vertices())),
    ]);
    let q1 = state_map(vec![
        (soft1, deformable_state(&end)),
        (soft2, deformable_state(resting.vertices())),
    ]);

    assert!(detector.is_contact(DT, &q0, &q1, &mut bodies).unwrap());

    let contacts = detector.contacts();
    assert_eq!(contacts.len(), 2);
    for contact in contacts {
        assert_eq!(contact.body1, soft1);
        assert!((contact.t - 0.5).abs() <= 2.0e-4, "t = {}", contact.t);
        assert_relative_eq!(contact.normal, Vector::z(), epsilon = 1.0e-9);
        assert!(contact.point.z.abs() <= 1.0e-6);
    }
}

#[test]
fn deformable_mesh_without_self_contact() {
    let mut bodies = TestBodies::default();
    // Two triangles folding around their shared edge without crossing each other.
    let sheet = TriMesh::new(
        vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.5, 1.0, 0.0),
            Point::new(0.5, -1.0, 0.0),
        ],
        vec![[0, 1, 2], [1, 0, 3]],
    )
    .unwrap();
    let soft = bodies.add_deformable(&sheet);

    let mut detector = CollisionDetector::new(CollisionDetectorConfig::default());
    let _ = detector.add_geometry(Arc::new(sheet.clone()), soft, Isometry::identity());

    let mut folded = sheet.vertices().to_vec();
    folded[2].z = 0.5;
    folded[3].z = 0.5;
    let q0 = state_map(vec![(soft, deformable_state(sheet.vertices()))]);
    let q1 = state_map(vec![(soft, deformable_state(&folded))]);

    assert!(!detector.is_contact(DT, &q0, &q1, &mut bodies).unwrap());
}
