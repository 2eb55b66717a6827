use super::test_bodies::{cube, ground, rigid_state, state_map, TestBodies};
use impact3d::contact::{DistanceClass, EventType};
use impact3d::math::{Isometry, Point, Real, Vector};
use impact3d::pipeline::{
    BodyHandle, CollisionDetector, CollisionDetectorConfig, CollisionError, StateMap, SuperBody,
};
use std::sync::Arc;

const DT: Real = 0.1;

struct Scene {
    bodies: TestBodies,
    detector: CollisionDetector,
    falling: BodyHandle,
    floor: BodyHandle,
}

fn scene() -> Scene {
    let mut bodies = TestBodies::default();
    let falling = bodies.add_rigid(Isometry::translation(0.3, 0.1, 0.6));
    let floor = bodies.add_rigid(Isometry::identity());

    let mut detector = CollisionDetector::new(CollisionDetectorConfig::default());
    let _ = detector.add_geometry(Arc::new(cube(0.5)), falling, Isometry::identity());
    let _ = detector.add_geometry(Arc::new(ground(5.0, 0.0)), floor, Isometry::identity());

    Scene {
        bodies,
        detector,
        falling,
        floor,
    }
}

fn states(scene: &Scene, box_height: Real) -> StateMap {
    state_map(vec![
        (scene.falling, rigid_state(Vector::new(0.3, 0.1, box_height))),
        (scene.floor, rigid_state(Vector::zeros())),
    ])
}

#[test]
fn falling_box_hits_the_ground_with_its_four_bottom_corners() {
    let mut scene = scene();
    let q0 = states(&scene, 0.6);
    let q1 = states(&scene, 0.4);

    let found = scene
        .detector
        .is_contact(DT, &q0, &q1, &mut scene.bodies)
        .unwrap();
    assert!(found);

    let contacts = scene.detector.contacts();
    let corners = [(-0.2, -0.4), (0.8, -0.4), (0.8, 0.6), (-0.2, 0.6)]
        .map(|(x, y)| Point::new(x, y, 0.0));

    for contact in contacts {
        assert_eq!(contact.event_type, EventType::Contact);
        assert_eq!(contact.body1, scene.falling);
        assert_eq!(contact.body2, scene.floor);
        assert!((contact.t - 0.5).abs() <= 2.0e-4, "t = {}", contact.t);
        assert_relative_eq!(contact.normal, Vector::z(), epsilon = 1.0e-9);
        assert!(corners
            .iter()
            .any(|c| na::distance(c, &contact.point) <= 1.0e-3));
        assert_eq!(contact.distance_class(&scene.bodies), DistanceClass::Impacting);
    }

    for corner in &corners {
        assert!(contacts
            .iter()
            .any(|c| na::distance(corner, &c.point) <= 1.0e-3));
    }

    // Sorted by time.
    assert!(contacts.windows(2).all(|w| w[0].t <= w[1].t));
}

#[test]
fn box_stopping_above_the_ground_has_no_contact() {
    let mut scene = scene();
    let q0 = states(&scene, 0.6);
    let q1 = states(&scene, 0.55);

    let found = scene
        .detector
        .is_contact(DT, &q0, &q1, &mut scene.bodies)
        .unwrap();
    assert!(!found);
    assert!(scene.detector.contacts().is_empty());
}

#[test]
fn missing_end_state_is_an_error() {
    let mut scene = scene();
    let q0 = states(&scene, 0.6);
    let mut q1 = states(&scene, 0.4);
    let _ = q1.remove(&SuperBody::Single(scene.falling));

    let result = scene.detector.is_contact(DT, &q0, &q1, &mut scene.bodies);
    assert_eq!(
        result,
        Err(CollisionError::MissingState(SuperBody::Single(scene.falling)))
    );
}

#[test]
fn degenerate_time_steps_are_rejected() {
    let mut scene = scene();
    let q0 = states(&scene, 0.6);
    let q1 = states(&scene, 0.4);

    for dt in [0.0, -DT, Real::NAN, Real::INFINITY] {
        let result = scene.detector.is_contact(dt, &q0, &q1, &mut scene.bodies);
        assert_eq!(result, Err(CollisionError::InvalidTimeStep), "dt = {}", dt);
        assert!(scene.detector.contacts().is_empty());
    }

    // The detector is still usable afterwards.
    assert_eq!(
        scene.detector.is_contact(DT, &q0, &q1, &mut scene.bodies),
        Ok(true)
    );
}

#[test]
fn disabled_pair_is_never_checked() {
    let mut scene = scene();
    let handles: Vec<_> = scene.detector.geometries().map(|(h, _)| h).collect();
    scene.detector.disable_pair(handles[1], handles[0]);

    let q0 = states(&scene, 0.6);
    let q1 = states(&scene, 0.4);
    let found = scene
        .detector
        .is_contact(DT, &q0, &q1, &mut scene.bodies)
        .unwrap();
    assert!(!found);

    scene.detector.enable_pair(handles[0], handles[1]);
    let found = scene
        .detector
        .is_contact(DT, &q0, &q1, &mut scene.bodies)
        .unwrap();
    assert!(found);
}

#[test]
fn tangents_complete_the_contact_frame() {
    let mut scene = scene();
    let q0 = states(&scene, 0.6);
    let q1 = states(&scene, 0.4);
    let _ = scene
        .detector
        .is_contact(DT, &q0, &q1, &mut scene.bodies)
        .unwrap();
    scene.detector.determine_contact_tangents(&scene.bodies, &[]);

    for contact in scene.detector.contacts() {
        assert_relative_eq!(contact.tangent1.dot(&contact.normal), 0.0, epsilon = 1.0e-9);
        assert_relative_eq!(contact.tangent2.dot(&contact.normal), 0.0, epsilon = 1.0e-9);
        assert_relative_eq!(contact.tangent1.norm(), 1.0, epsilon = 1.0e-9);
        assert_relative_eq!(contact.tangent1.cross(&contact.tangent2), contact.normal, epsilon = 1.0e-9);
    }
}
