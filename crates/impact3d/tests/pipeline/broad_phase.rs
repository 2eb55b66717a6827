use super::test_bodies::{cube, TestBodies};
use impact3d::math::Isometry;
use impact3d::pipeline::{CollisionDetector, CollisionDetectorConfig, GeometryHandle};
use std::sync::Arc;

#[test]
fn candidate_pairs_follow_the_exclusion_rules() {
    let mut bodies = TestBodies::default();
    let b0 = bodies.add_rigid(Isometry::identity());
    let b1 = bodies.add_rigid(Isometry::identity());
    let b2 = bodies.add_rigid(Isometry::identity());
    let b3 = bodies.add_rigid(Isometry::identity());

    let mesh = Arc::new(cube(0.5));
    let mut detector = CollisionDetector::new(CollisionDetectorConfig::default());
    let g: Vec<GeometryHandle> = [b0, b0, b1, b2, b3]
        .iter()
        .map(|b| detector.add_geometry(mesh.clone(), *b, Isometry::identity()))
        .collect();

    // Every pair of geometries on different bodies, each exactly once, in handle order.
    let all = detector.candidate_pairs(&bodies);
    assert_eq!(all.len(), 9);
    assert!(!all.contains(&(g[0], g[1])));
    assert!(all.windows(2).all(|w| w[0] < w[1]));
    assert!(all.iter().all(|(a, b)| a < b));

    detector.disable_geometry(g[4]);
    assert!(detector
        .candidate_pairs(&bodies)
        .iter()
        .all(|(a, b)| *a != g[4] && *b != g[4]));
    detector.enable_geometry(g[4]);

    detector.disable_pair(g[3], g[2]);
    assert!(detector.is_pair_disabled(g[2], g[3]));
    assert!(!detector.candidate_pairs(&bodies).contains(&(g[2], g[3])));
    detector.enable_pair(g[2], g[3]);
    assert!(detector.candidate_pairs(&bodies).contains(&(g[2], g[3])));

    // A pair is kept as long as one of its bodies is enabled.
    bodies.set_enabled(b1, false);
    assert!(detector.candidate_pairs(&bodies).contains(&(g[2], g[3])));
    bodies.set_enabled(b2, false);
    let pairs = detector.candidate_pairs(&bodies);
    assert!(!pairs.contains(&(g[2], g[3])));
    assert!(pairs.contains(&(g[2], g[4])));
}

#[test]
fn removing_a_geometry_forgets_its_disabled_pairs() {
    let mut bodies = TestBodies::default();
    let b0 = bodies.add_rigid(Isometry::identity());
    let b1 = bodies.add_rigid(Isometry::identity());
    let mesh = Arc::new(cube(0.5));

    let mut detector = CollisionDetector::new(CollisionDetectorConfig::default());
    let g0 = detector.add_geometry(mesh.clone(), b0, Isometry::identity());
    let g1 = detector.add_geometry(mesh.clone(), b1, Isometry::identity());
    detector.disable_pair(g0, g1);

    assert!(detector.remove_geometry(g1).is_some());
    assert!(!detector.is_pair_disabled(g0, g1));
    assert!(detector.remove_geometry(g1).is_none());
    assert!(detector.candidate_pairs(&bodies).is_empty());

    // Overlapping cubes collide as soon as both are registered.
    let g1 = detector.add_geometry(mesh, b1, Isometry::identity());
    assert!(detector.is_collision(&bodies).unwrap());
    assert!(detector.geometries_intersect(g0, g1));
}
