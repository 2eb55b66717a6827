use impact3d::math::{Point, Real, Vector};
use impact3d::query::{intersection_segment_thick_triangle, time_of_impact_point_moving_triangle};
use impact3d::shape::{Segment, Triangle};

fn rand_in(rng: &mut oorandom::Rand64, min: Real, max: Real) -> Real {
    min + rng.rand_float() * (max - min)
}

// A point moving toward a static triangle hits it when the segment it sweeps crosses the
// triangle plane.
#[test]
fn moving_point_matches_segment_crossing() {
    let mut rng = oorandom::Rand64::new(42);
    let tri = Triangle::new(
        Point::new(-1.0, -1.0, 0.3),
        Point::new(2.0, -0.5, -0.2),
        Point::new(0.0, 2.0, 0.1),
    );
    let normal = tri.normal().unwrap();
    let dt = 0.25;

    for _ in 0..200 {
        let target = tri.a + (tri.b - tri.a) * rand_in(&mut rng, 0.1, 0.4)
            + (tri.c - tri.a) * rand_in(&mut rng, 0.1, 0.4);
        let height = rand_in(&mut rng, 0.05, 1.0);
        let side = if rng.rand_float() < 0.5 { 1.0 } else { -1.0 };
        let lateral = Vector::new(rand_in(&mut rng, -0.1, 0.1), rand_in(&mut rng, -0.1, 0.1), 0.0);
        let p0 = target + *normal * (height * side) + lateral;
        let pdot = (target - p0) / (dt * rand_in(&mut rng, 0.2, 0.9));

        let toi = time_of_impact_point_moving_triangle(&p0, &pdot, &tri, &[Vector::zeros(); 3], dt)
            .expect("the point must hit the triangle");

        let swept = Segment::from_displacement(p0, &(pdot * dt));
        let hit = intersection_segment_thick_triangle(&swept, &tri, 0.0).unwrap();

        assert_relative_eq!(toi, hit.param * dt, epsilon = 1.0e-7);
        assert_relative_eq!(p0 + pdot * toi, hit.point, epsilon = 1.0e-6);
    }
}

#[test]
fn moving_point_receding_from_triangle_never_hits() {
    let tri = Triangle::new(
        Point::new(0.0, 0.0, 0.0),
        Point::new(1.0, 0.0, 0.0),
        Point::new(0.0, 1.0, 0.0),
    );
    let toi = time_of_impact_point_moving_triangle(
        &Point::new(0.2, 0.2, 0.1),
        &Vector::new(0.0, 0.0, 1.0),
        &tri,
        &[Vector::zeros(); 3],
        1.0,
    );
    assert_eq!(toi, None);
}
