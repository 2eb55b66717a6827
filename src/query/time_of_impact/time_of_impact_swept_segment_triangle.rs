use crate::math::{Point, Real, Vector, NEAR_ZERO};
use crate::query::intersection_segment_thick_triangle;
use crate::shape::{Segment, Triangle};

use arrayvec::ArrayVec;

/// The first contact between a segment moving by a constant displacement and a triangle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SweptSegmentHit {
    /// The fraction of the displacement at which the contact happens, in `[0, 1]`.
    pub toi: Real,
    /// The contact point.
    pub point: Point<Real>,
    /// The moving segment at the time of impact.
    pub edge: Segment,
}

/// Time of impact between a segment translated by `displacement` and a static triangle.
///
/// The region swept by the segment is the parallelogram `edge.a + u * (edge.b - edge.a) + v *
/// displacement` with `(u, v)` in `[0, 1]²`. The first contact is the point of the triangle
/// intersecting that parallelogram with the smallest `v`.
///
/// If the displacement is zero, or parallel to the segment, the parallelogram is flat and each
/// endpoint trajectory is tested against the slab of half-width `thickness` around the triangle
/// instead.
pub fn time_of_impact_swept_segment_triangle(
    edge: &Segment,
    displacement: &Vector<Real>,
    triangle: &Triangle,
    thickness: Real,
) -> Option<SweptSegmentHit> {
    let dir = edge.scaled_direction();

    let normal = match (dir.try_normalize(NEAR_ZERO), displacement.try_normalize(NEAR_ZERO)) {
        (Some(dir_n), Some(disp_n)) if (dir_n.dot(&disp_n).abs() - 1.0).abs() >= NEAR_ZERO.sqrt() => {
            dir.cross(displacement).try_normalize(NEAR_ZERO)
        }
        _ => None,
    };

    let Some(normal) = normal else {
        return endpoint_sweeps(edge, displacement, triangle, thickness);
    };

    let pts = triangle.vertices();
    let heights = pts.map(|pt| (pt - edge.a).dot(&normal));
    let signs = heights.map(|h| {
        if h > NEAR_ZERO {
            1
        } else if h < -NEAR_ZERO {
            -1
        } else {
            0
        }
    });

    // The triangle must strictly cross the plane of the parallelogram.
    if !signs.contains(&1) || !signs.contains(&-1) {
        return None;
    }

    let mut crossing: ArrayVec<Point<Real>, 3> = ArrayVec::new();
    for i in 0..3 {
        let j = (i + 1) % 3;
        if signs[i] == 0 {
            crossing.push(pts[i]);
        } else if signs[i] * signs[j] < 0 {
            let s = heights[i] / (heights[i] - heights[j]);
            crossing.push(pts[i] + (pts[j] - pts[i]) * s);
        }
    }

    if crossing.len() != 2 {
        return None;
    }

    // Affine coordinates of the crossing endpoints in the parallelogram frame.
    let aa = dir.norm_squared();
    let ad = dir.dot(displacement);
    let dd = displacement.norm_squared();
    let det = aa * dd - ad * ad;
    let to_uv = |pt: &Point<Real>| {
        let r = pt - edge.a;
        let ar = dir.dot(&r);
        let dr = displacement.dot(&r);
        ((dd * ar - ad * dr) / det, (aa * dr - ad * ar) / det)
    };

    let (u0, v0) = to_uv(&crossing[0]);
    let (u1, v1) = to_uv(&crossing[1]);
    let (du, dv) = (u1 - u0, v1 - v0);

    // Liang-Barsky clipping against the unit square.
    let mut lmin: Real = 0.0;
    let mut lmax: Real = 1.0;

    for (p, q) in [(-du, u0), (du, 1.0 - u0), (-dv, v0), (dv, 1.0 - v0)] {
        if p.abs() <= Real::EPSILON {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                lmin = lmin.max(r);
            } else {
                lmax = lmax.min(r);
            }

            if lmin > lmax {
                return None;
            }
        }
    }

    // `v` is affine along the clipped crossing, so its minimum is at one of the endpoints.
    let lambda = if v0 + dv * lmin <= v0 + dv * lmax {
        lmin
    } else {
        lmax
    };
    let toi = (v0 + dv * lambda).clamp(0.0, 1.0);
    let point = crossing[0] + (crossing[1] - crossing[0]) * lambda;
    let shift = displacement * toi;

    Some(SweptSegmentHit {
        toi,
        point,
        edge: Segment::new(edge.a + shift, edge.b + shift),
    })
}

fn endpoint_sweeps(
    edge: &Segment,
    displacement: &Vector<Real>,
    triangle: &Triangle,
    thickness: Real,
) -> Option<SweptSegmentHit> {
    [edge.a, edge.b]
        .iter()
        .filter_map(|pt| {
            let path = Segment::from_displacement(*pt, displacement);
            intersection_segment_thick_triangle(&path, triangle, thickness)
        })
        .min_by(|h1, h2| h1.param.total_cmp(&h2.param))
        .map(|hit| {
            let shift = displacement * hit.param;
            SweptSegmentHit {
                toi: hit.param,
                point: hit.point,
                edge: Segment::new(edge.a + shift, edge.b + shift),
            }
        })
}
