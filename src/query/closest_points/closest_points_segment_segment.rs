use crate::math::{Point, Real, DEFAULT_EPSILON};
use crate::shape::Segment;

/// Closest points between two segments expressed in the same frame.
///
/// Returns the parameters `(s, t)` of the closest points along `seg1` and `seg2` (both in
/// `[0, 1]`) together with the points themselves.
#[inline]
pub fn closest_points_segment_segment(
    seg1: &Segment,
    seg2: &Segment,
) -> ((Real, Real), (Point<Real>, Point<Real>)) {
    let (s, t) = closest_points_segment_segment_parameters(seg1, seg2);
    ((s, t), (seg1.point_at(s), seg2.point_at(t)))
}

/// The distance between two segments expressed in the same frame.
#[inline]
pub fn distance_segment_segment(seg1: &Segment, seg2: &Segment) -> Real {
    let (_, (p1, p2)) = closest_points_segment_segment(seg1, seg2);
    na::distance(&p1, &p2)
}

/// Parameters of the closest points between two segments.
pub fn closest_points_segment_segment_parameters(seg1: &Segment, seg2: &Segment) -> (Real, Real) {
    // Inspired by Real-time collision detection by Christer Ericson.
    let d1 = seg1.scaled_direction();
    let d2 = seg2.scaled_direction();
    let r = seg1.a - seg2.a;

    let a = d1.norm_squared();
    let e = d2.norm_squared();
    let f = d2.dot(&r);

    let eps = DEFAULT_EPSILON;

    if a <= eps && e <= eps {
        return (0.0, 0.0);
    }

    if a <= eps {
        return (0.0, (f / e).clamp(0.0, 1.0));
    }

    let c = d1.dot(&r);

    if e <= eps {
        return ((-c / a).clamp(0.0, 1.0), 0.0);
    }

    let b = d1.dot(&d2);
    let ae = a * e;
    let bb = b * b;
    let denom = ae - bb;

    // Use absolute and ulps error to test collinearity.
    let mut s = if denom > eps && !ulps_eq!(ae, bb) {
        ((b * f - c * e) / denom).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let mut t = (b * s + f) / e;

    if t < 0.0 {
        t = 0.0;
        s = (-c / a).clamp(0.0, 1.0);
    } else if t > 1.0 {
        t = 1.0;
        s = ((b - c) / a).clamp(0.0, 1.0);
    }

    (s, t)
}
