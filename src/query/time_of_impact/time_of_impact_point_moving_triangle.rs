use crate::math::{Point, Real, Vector, NEAR_ZERO};
use crate::shape::Triangle;
use crate::utils;

/// Time of impact between a point and a triangle, both moving with constant velocities.
///
/// The point starts at `p0` with velocity `pdot`. The vertices of the triangle start at the
/// vertices of `tri0` with velocities `tri_vels`. Returns the smallest time in `[0, dt]` at which
/// the point lies on the triangle, or `None` if it never does during that interval.
///
/// The point is on the plane of the triangle when the determinant of `[A(t) - P(t), B(t) - P(t),
/// C(t) - P(t)]` vanishes, which is a cubic equation in `t`. Each root of that cubic is then
/// checked against the triangle at the same time.
pub fn time_of_impact_point_moving_triangle(
    p0: &Point<Real>,
    pdot: &Vector<Real>,
    tri0: &Triangle,
    tri_vels: &[Vector<Real>; 3],
    dt: Real,
) -> Option<Real> {
    let inside_tolerance = NEAR_ZERO.sqrt();

    // Vertices relative to the point, as `x0 + t * x1`.
    let u0 = tri0.a - p0;
    let v0 = tri0.b - p0;
    let w0 = tri0.c - p0;
    let u1 = tri_vels[0] - pdot;
    let v1 = tri_vels[1] - pdot;
    let w1 = tri_vels[2] - pdot;

    let det = |x: &Vector<Real>, y: &Vector<Real>, z: &Vector<Real>| x.dot(&y.cross(z));

    let a = det(&u1, &v1, &w1);
    let b = det(&u1, &v1, &w0) + det(&u1, &v0, &w1) + det(&u0, &v1, &w1);
    let c = det(&u1, &v0, &w0) + det(&u0, &v1, &w0) + det(&u0, &v0, &w1);
    let d = det(&u0, &v0, &w0);

    utils::solve_cubic(a, b, c, d)
        .into_iter()
        .filter(|r| r.is_finite() && *r >= 0.0 && *r <= dt)
        .filter(|r| {
            let tri = tri0.moved(tri_vels, *r);
            let pt = p0 + pdot * *r;
            let hit = tri.contains_point(&pt, inside_tolerance);
            log::trace!("point/moving triangle root {}: inside = {}", r, hit);
            hit
        })
        .min_by(|r1, r2| r1.total_cmp(r2))
}
