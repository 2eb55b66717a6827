//! Utilities for the convex hull routines.

use crate::math::{Point, Point2, Real, Vector};
use crate::utils::PlaneProjection;

/// Projects 3D points onto the plane orthogonal to `normal` passing through the origin.
///
/// The 2D coordinates are expressed in the orthonormal basis completing `normal`. Returns an
/// empty vector if `normal` is zero.
pub fn project_to_plane(points: &[Point<Real>], normal: &Vector<Real>) -> Vec<Point2<Real>> {
    let Some(normal) = normal.try_normalize(Real::EPSILON) else {
        return Vec::new();
    };
    let plane = PlaneProjection::new(Point::origin(), normal);
    points.iter().map(|pt| plane.to_2d(pt)).collect()
}

// A length scale of the point cloud, used to make the hull tolerances relative.
pub(super) fn scale<const D: usize>(points: &[na::Point<Real, D>]) -> Real {
    let mut scale: Real = 1.0;
    for pt in points {
        scale = scale.max(pt.coords.amax());
    }
    scale
}
