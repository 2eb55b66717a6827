use crate::math::{Point, Point2, Real, Vector, NEAR_ZERO};
use crate::shape::Triangle;

/// Tests if two triangles intersect.
///
/// Each triangle is first tested against the plane of the other. If both straddle the other
/// plane, their intersections with the line common to both planes are compared. Coplanar
/// triangles are projected on the coordinate plane most aligned with their common plane and
/// tested in 2D.
///
/// Triangles touching at a single point or along an edge are considered intersecting. Degenerate
/// triangles never intersect anything.
pub fn intersection_test_triangle_triangle(tri1: &Triangle, tri2: &Triangle) -> bool {
    let (Some(n1), Some(n2)) = (tri1.normal(), tri2.normal()) else {
        return false;
    };
    let (n1, n2) = (n1.into_inner(), n2.into_inner());

    let dists1 = signed_distances(tri1, &tri2.a, &n2);
    if strictly_one_side(&dists1) {
        return false;
    }

    let dists2 = signed_distances(tri2, &tri1.a, &n1);
    if strictly_one_side(&dists2) {
        return false;
    }

    if dists1.iter().all(|d| d.abs() <= NEAR_ZERO) || dists2.iter().all(|d| d.abs() <= NEAR_ZERO)
    {
        return coplanar_intersection_test(tri1, tri2, &n1);
    }

    let dir = n1.cross(&n2);
    let Some(range1) = plane_crossing_range(tri1, &dists1, &dir) else {
        return false;
    };
    let Some(range2) = plane_crossing_range(tri2, &dists2, &dir) else {
        return false;
    };

    range1.0 <= range2.1 + NEAR_ZERO && range2.0 <= range1.1 + NEAR_ZERO
}

fn signed_distances(tri: &Triangle, origin: &Point<Real>, normal: &Vector<Real>) -> [Real; 3] {
    tri.vertices().map(|pt| (pt - origin).dot(normal))
}

fn strictly_one_side(dists: &[Real; 3]) -> bool {
    dists.iter().all(|d| *d > NEAR_ZERO) || dists.iter().all(|d| *d < -NEAR_ZERO)
}

// The interval covered, along `dir`, by the part of `tri` lying on the other triangle plane.
fn plane_crossing_range(
    tri: &Triangle,
    dists: &[Real; 3],
    dir: &Vector<Real>,
) -> Option<(Real, Real)> {
    let pts = tri.vertices();
    let mut range: Option<(Real, Real)> = None;
    let mut take = |pt: Point<Real>| {
        let s = pt.coords.dot(dir);
        range = Some(match range {
            Some((min, max)) => (min.min(s), max.max(s)),
            None => (s, s),
        });
    };

    for i in 0..3 {
        let j = (i + 1) % 3;
        let (di, dj) = (dists[i], dists[j]);

        if di.abs() <= NEAR_ZERO {
            take(pts[i]);
        } else if dj.abs() > NEAR_ZERO && di * dj < 0.0 {
            take(pts[i] + (pts[j] - pts[i]) * (di / (di - dj)));
        }
    }

    range
}

fn coplanar_intersection_test(tri1: &Triangle, tri2: &Triangle, normal: &Vector<Real>) -> bool {
    // Drop the coordinate most aligned with the normal.
    let drop = normal.iamax();
    let (i, j) = match drop {
        0 => (1, 2),
        1 => (2, 0),
        _ => (0, 1),
    };
    let proj = |pt: &Point<Real>| Point2::new(pt[i], pt[j]);

    let pts1 = tri1.vertices().map(|pt| proj(&pt));
    let pts2 = tri2.vertices().map(|pt| proj(&pt));

    for a in 0..3 {
        for b in 0..3 {
            if segments_intersect_2d(
                &pts1[a],
                &pts1[(a + 1) % 3],
                &pts2[b],
                &pts2[(b + 1) % 3],
            ) {
                return true;
            }
        }
    }

    point_in_triangle_2d(&pts1[0], &pts2) || point_in_triangle_2d(&pts2[0], &pts1)
}

fn orient2d(a: &Point2<Real>, b: &Point2<Real>, c: &Point2<Real>) -> Real {
    (b - a).perp(&(c - a))
}

fn sign(x: Real) -> i8 {
    if x > NEAR_ZERO {
        1
    } else if x < -NEAR_ZERO {
        -1
    } else {
        0
    }
}

fn on_segment_2d(a: &Point2<Real>, b: &Point2<Real>, p: &Point2<Real>) -> bool {
    p.x >= a.x.min(b.x) - NEAR_ZERO
        && p.x <= a.x.max(b.x) + NEAR_ZERO
        && p.y >= a.y.min(b.y) - NEAR_ZERO
        && p.y <= a.y.max(b.y) + NEAR_ZERO
}

fn segments_intersect_2d(
    a: &Point2<Real>,
    b: &Point2<Real>,
    c: &Point2<Real>,
    d: &Point2<Real>,
) -> bool {
    let o1 = sign(orient2d(a, b, c));
    let o2 = sign(orient2d(a, b, d));
    let o3 = sign(orient2d(c, d, a));
    let o4 = sign(orient2d(c, d, b));

    if o1 * o2 < 0 && o3 * o4 < 0 {
        return true;
    }

    (o1 == 0 && on_segment_2d(a, b, c))
        || (o2 == 0 && on_segment_2d(a, b, d))
        || (o3 == 0 && on_segment_2d(c, d, a))
        || (o4 == 0 && on_segment_2d(c, d, b))
}

fn point_in_triangle_2d(p: &Point2<Real>, tri: &[Point2<Real>; 3]) -> bool {
    let s = [
        sign(orient2d(&tri[0], &tri[1], p)),
        sign(orient2d(&tri[1], &tri[2], p)),
        sign(orient2d(&tri[2], &tri[0], p)),
    ];
    !(s.contains(&1) && s.contains(&-1))
}
