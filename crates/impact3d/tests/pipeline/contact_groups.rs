use super::test_bodies::{rigid_state, TestBodies};
use impact3d::contact::{
    determine_connected_contacts, remove_inactive_groups, ContactEvent, ContactParameterTable,
    ContactParameters, EventToleranceCache,
};
use impact3d::math::{Isometry, Point, Real, Vector};
use impact3d::pipeline::{ArticulationHandle, BodyHandle, BodySet, GeometryHandle, SuperBody};
use impact3d::shape::Triangle;

fn contact(body1: BodyHandle, body2: BodyHandle, x: Real) -> ContactEvent {
    let floor = Triangle::new(
        Point::new(0.0, 0.0, 0.0),
        Point::new(1.0, 0.0, 0.0),
        Point::new(0.0, 1.0, 0.0),
    );
    ContactEvent::new_contact(
        0.5,
        GeometryHandle(body1.0),
        GeometryHandle(body2.0),
        body1,
        body2,
        Point::new(x, 0.0, 0.0),
        &Vector::new(0.0, 0.0, -1.0),
        &floor,
    )
}

fn sorted(mut groups: Vec<Vec<usize>>) -> Vec<Vec<usize>> {
    for group in &mut groups {
        group.sort_unstable();
    }
    groups.sort();
    groups
}

#[test]
fn contacts_are_grouped_by_connected_bodies() {
    let mut bodies = TestBodies::default();
    let a = bodies.add_rigid(Isometry::identity());
    let b = bodies.add_rigid(Isometry::identity());
    let c = bodies.add_rigid(Isometry::identity());
    let d = bodies.add_rigid(Isometry::identity());
    let e = bodies.add_rigid(Isometry::identity());

    let contacts = vec![
        contact(a, b, 0.0),
        contact(c, d, 1.0),
        contact(b, a, 2.0),
        contact(e, d, 3.0),
    ];

    let groups = sorted(determine_connected_contacts(&contacts, &bodies));
    assert_eq!(groups, vec![vec![0, 2], vec![1, 3]]);
}

#[test]
fn articulation_links_join_groups() {
    let mut bodies = TestBodies::default();
    let ground = bodies.add_rigid(Isometry::identity());
    let other = bodies.add_rigid(Isometry::identity());
    let link1 = bodies.add_link(ArticulationHandle(0));
    let link2 = bodies.add_link(ArticulationHandle(0));
    bodies.set_enabled(ground, false);

    let contacts = vec![contact(link1, ground, 0.0), contact(link2, other, 1.0)];
    let groups = sorted(determine_connected_contacts(&contacts, &bodies));
    assert_eq!(groups, vec![vec![0, 1]]);
}

#[test]
fn contacts_between_disabled_bodies_belong_to_no_group() {
    let mut bodies = TestBodies::default();
    let a = bodies.add_rigid(Isometry::identity());
    let b = bodies.add_rigid(Isometry::identity());
    let c = bodies.add_rigid(Isometry::identity());
    bodies.set_enabled(a, false);
    bodies.set_enabled(b, false);

    let contacts = vec![contact(a, b, 0.0), contact(a, c, 1.0)];
    let groups = determine_connected_contacts(&contacts, &bodies);
    assert_eq!(groups, vec![vec![1]]);
}

#[test]
fn inactive_groups_are_removed() {
    let mut bodies = TestBodies::default();
    let a = bodies.add_rigid(Isometry::identity());
    let b = bodies.add_rigid(Isometry::identity());
    let c = bodies.add_rigid(Isometry::identity());
    let d = bodies.add_rigid(Isometry::identity());

    // `a` moves down onto `b` while `c` rests on `d`.
    bodies.set_generalized_velocity(
        SuperBody::Single(a),
        &rigid_state(Vector::new(0.0, 0.0, -1.0)),
    );

    let contacts = vec![contact(a, b, 0.0), contact(c, d, 1.0)];
    let mut groups = sorted(determine_connected_contacts(&contacts, &bodies));
    assert_eq!(groups.len(), 2);

    remove_inactive_groups(&mut groups, &contacts, &bodies);
    assert_eq!(groups, vec![vec![0]]);
}

#[test]
fn per_pair_parameters_and_tolerances() {
    let mut bodies = TestBodies::default();
    let a = bodies.add_rigid(Isometry::identity());
    let b = bodies.add_rigid(Isometry::identity());
    let c = bodies.add_rigid(Isometry::identity());
    bodies.set_generalized_velocity(
        SuperBody::Single(a),
        &rigid_state(Vector::new(0.0, 0.0, -3.0)),
    );

    let mut contacts = vec![contact(a, b, 0.0), contact(b, c, 1.0)];

    let mut table = ContactParameterTable::new(ContactParameters::default());
    let rubber = ContactParameters::new(0.9, 0.1, 0.5, 8).unwrap();
    assert!(table.insert(b, a, rubber).is_none());
    table.apply(&mut contacts);

    assert_eq!(contacts[0].mu_coulomb, 0.9);
    assert_eq!(contacts[0].friction_cone_edges, 8);
    assert_eq!(contacts[1].mu_coulomb, 0.0);

    let mut cache = EventToleranceCache::new();
    cache.update(&contacts, &bodies);
    cache.apply(&mut contacts, 1.0e-3);
    assert_relative_eq!(contacts[0].tol, 3.0, epsilon = 1.0e-9);
    assert_relative_eq!(contacts[1].tol, 1.0, epsilon = 1.0e-9);
}

#[test]
fn contacts_sharing_an_articulation_are_linked() {
    let mut bodies = TestBodies::default();
    let ground = bodies.add_rigid(Isometry::identity());
    let ball = bodies.add_rigid(Isometry::identity());
    let link1 = bodies.add_link(ArticulationHandle(3));
    let link2 = bodies.add_link(ArticulationHandle(3));
    bodies.set_enabled(ground, false);

    let on_link1 = contact(link1, ground, 0.0);
    let on_link2 = contact(link2, ground, 1.0);
    let on_ball = contact(ball, ground, 2.0);

    assert_eq!(
        on_link1.super_bodies(&bodies),
        [Some(SuperBody::Articulated(ArticulationHandle(3))), None]
    );
    assert!(on_link1.is_linked(&on_link2, &bodies));
    // The disabled ground does not link the contacts touching it.
    assert!(!on_link1.is_linked(&on_ball, &bodies));

    bodies.set_enabled(ground, true);
    assert!(on_link1.is_linked(&on_ball, &bodies));
}

#[test]
fn impacting_contact_kinematics() {
    let mut bodies = TestBodies::default();
    let a = bodies.add_rigid(Isometry::identity());
    let b = bodies.add_rigid(Isometry::identity());
    bodies.set_generalized_velocity(
        SuperBody::Single(a),
        &rigid_state(Vector::new(0.5, 0.0, -3.0)),
    );

    let event = contact(a, b, 0.0);
    assert_relative_eq!(event.contact_velocity(&bodies), -3.0, epsilon = 1.0e-12);
    assert!(event.is_impacting(&bodies));
    // Without accelerations, only the velocity term remains.
    assert_relative_eq!(event.contact_acceleration(&bodies), -3.0, epsilon = 1.0e-12);
    assert_relative_eq!(
        event.contact_tolerance(&bodies),
        Vector::new(0.5, 0.0, -3.0).norm(),
        epsilon = 1.0e-12
    );
}
