use impact3d::contact::{determine_convex_set, determine_minimal_set, ContactEvent};
use impact3d::math::{Point, Real, Vector};
use impact3d::pipeline::{BodyHandle, GeometryHandle};
use impact3d::shape::Triangle;

fn contacts_at(points: &[Point<Real>], mu: Real) -> Vec<ContactEvent> {
    let floor = Triangle::new(
        Point::new(0.0, 0.0, 0.0),
        Point::new(1.0, 0.0, 0.0),
        Point::new(0.0, 1.0, 0.0),
    );

    points
        .iter()
        .map(|pt| {
            let mut contact = ContactEvent::new_contact(
                0.5,
                GeometryHandle(0),
                GeometryHandle(1),
                BodyHandle(0),
                BodyHandle(1),
                *pt,
                &Vector::new(0.0, 0.0, -1.0),
                &floor,
            );
            contact.mu_coulomb = mu;
            contact
        })
        .collect()
}

fn kept_points(group: &[usize], contacts: &[ContactEvent]) -> Vec<Point<Real>> {
    let mut pts: Vec<_> = group.iter().map(|i| contacts[*i].point).collect();
    pts.sort_by(|a, b| {
        a.coords
            .iter()
            .zip(b.coords.iter())
            .map(|(x, y)| x.total_cmp(y))
            .find(|ord| ord.is_ne())
            .unwrap_or(core::cmp::Ordering::Equal)
    });
    pts
}

#[test]
fn collinear_contacts_reduce_to_segment_endpoints() {
    let points: Vec<_> = [2.0, 0.0, 4.0, 1.0, 3.0]
        .iter()
        .map(|x| Point::new(*x, 0.0, 0.0))
        .collect();
    let contacts = contacts_at(&points, 0.5);
    let mut group: Vec<_> = (0..contacts.len()).collect();

    determine_minimal_set(&mut group, &contacts);
    assert_eq!(
        kept_points(&group, &contacts),
        vec![Point::new(0.0, 0.0, 0.0), Point::new(4.0, 0.0, 0.0)]
    );
}

#[test]
fn hexagon_contacts_drop_the_interior_point() {
    let mut points: Vec<_> = (0..6)
        .map(|i| {
            let angle = i as Real * core::f64::consts::FRAC_PI_3 as Real;
            Point::new(angle.cos(), angle.sin(), 0.0)
        })
        .collect();
    points.insert(3, Point::origin());

    let contacts = contacts_at(&points, 0.3);
    let mut group: Vec<_> = (0..contacts.len()).collect();
    determine_minimal_set(&mut group, &contacts);

    assert_eq!(group.len(), 6);
    assert!(!group.contains(&3));
}

#[test]
fn box_corners_are_kept_in_3d() {
    let mut points: Vec<_> = (0..8)
        .map(|i| {
            Point::new(
                (i & 1) as Real,
                ((i >> 1) & 1) as Real,
                ((i >> 2) & 1) as Real,
            )
        })
        .collect();
    points.push(Point::new(0.5, 0.5, 0.5));
    points.push(Point::new(0.2, 0.7, 0.4));

    let contacts = contacts_at(&points, 0.0);
    let mut group: Vec<_> = (0..contacts.len()).collect();
    determine_minimal_set(&mut group, &contacts);

    assert_eq!(group.len(), 8);
    assert!(group.iter().all(|i| *i < 8));
}

#[test]
fn reduction_is_idempotent() {
    let mut rng = oorandom::Rand64::new(3);
    let points: Vec<_> = (0..30)
        .map(|_| Point::new(rng.rand_float() * 2.0, rng.rand_float() * 2.0, 0.0))
        .collect();
    let contacts = contacts_at(&points, 0.2);

    let mut group: Vec<_> = (0..contacts.len()).collect();
    determine_minimal_set(&mut group, &contacts);
    let once = group.clone();
    determine_minimal_set(&mut group, &contacts);

    assert!(once.len() >= 3 && once.len() < 30);
    assert_eq!(kept_points(&group, &contacts), kept_points(&once, &contacts));
}

#[test]
fn contacts_with_different_friction_are_left_untouched() {
    let points: Vec<_> = (0..5).map(|i| Point::new(i as Real, 0.0, 0.0)).collect();
    let mut contacts = contacts_at(&points, 0.5);
    contacts[2].mu_coulomb = 0.1;

    let mut part: Vec<_> = (0..contacts.len()).collect();
    determine_convex_set(&mut part, &contacts);
    assert_eq!(part, vec![0, 1, 2, 3, 4]);
}

#[test]
fn reduction_of_nearly_flat_contacts_is_idempotent() {
    let mut rng = oorandom::Rand64::new(17);

    for _ in 0..200 {
        let points: Vec<_> = (0..12)
            .map(|_| {
                Point::new(
                    rng.rand_float() * 2.0,
                    rng.rand_float() * 2.0,
                    (rng.rand_float() * 2.0 - 1.0) * 1.0e-6,
                )
            })
            .collect();
        let contacts = contacts_at(&points, 0.3);

        let mut group: Vec<_> = (0..contacts.len()).collect();
        determine_minimal_set(&mut group, &contacts);
        let once = group.clone();
        determine_minimal_set(&mut group, &contacts);

        assert!(once.len() >= 3);
        assert_eq!(kept_points(&group, &contacts), kept_points(&once, &contacts));
    }
}

#[test]
fn coplanar_contacts_off_the_tangent_plane_use_the_2d_hull() {
    // On the plane z = x / 2, which the 3D hull rejects as flat.
    let points = [
        Point::new(0.0, 0.0, 0.0),
        Point::new(2.0, 0.0, 1.0),
        Point::new(0.0, 2.0, 0.0),
        Point::new(2.0, 2.0, 1.0),
        Point::new(1.0, 1.0, 0.5),
        Point::new(0.5, 1.5, 0.25),
    ];
    let contacts = contacts_at(&points, 0.4);
    let mut group: Vec<_> = (0..contacts.len()).collect();
    determine_minimal_set(&mut group, &contacts);

    assert_eq!(
        kept_points(&group, &contacts),
        vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(0.0, 2.0, 0.0),
            Point::new(2.0, 0.0, 1.0),
            Point::new(2.0, 2.0, 1.0),
        ]
    );
}

#[test]
fn flat_contacts_are_projected_along_the_first_contact_normal() {
    // A wall containing the contact normal: seen along it, the points are collinear.
    let points = [
        Point::new(0.0, 0.0, 0.0),
        Point::new(0.0, 2.0, 0.0),
        Point::new(0.0, 0.0, 1.0),
        Point::new(0.0, 2.0, 1.0),
        Point::new(0.0, 1.0, 0.5),
        Point::new(0.0, 0.5, 0.2),
    ];
    let contacts = contacts_at(&points, 0.4);
    assert_relative_eq!(contacts[0].normal, Vector::z());

    let mut group: Vec<_> = (0..contacts.len()).collect();
    determine_minimal_set(&mut group, &contacts);

    assert_eq!(
        kept_points(&group, &contacts),
        vec![Point::new(0.0, 0.0, 0.0), Point::new(0.0, 2.0, 1.0)]
    );
}
