use super::utils::scale;
use super::ConvexHullError;
use crate::math::{Point2, Real, NEAR_ZERO};
use ordered_float::OrderedFloat;

/// Computes the convex hull of a set of 2D points.
///
/// Returns the indices of the hull vertices in counter-clockwise order, using Andrew's monotone
/// chain. Points lying on a hull edge are not part of the output and duplicate points appear at
/// most once.
///
/// Fails with [`ConvexHullError::IncompletePoints`] if the input does not contain at least 3
/// non-collinear points.
pub fn convex_hull2(points: &[Point2<Real>]) -> Result<Vec<usize>, ConvexHullError> {
    if points.len() < 3 {
        return Err(ConvexHullError::IncompletePoints);
    }

    let eps = NEAR_ZERO * scale(points);
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by_key(|i| (OrderedFloat(points[*i].x), OrderedFloat(points[*i].y)));

    let turns_left = |hull: &[usize], i: usize| {
        let [a, b] = [hull[hull.len() - 2], hull[hull.len() - 1]];
        (points[b] - points[a]).perp(&(points[i] - points[a])) > eps
    };

    let mut hull: Vec<usize> = Vec::with_capacity(points.len() + 1);

    // Lower chain.
    for &i in &order {
        while hull.len() >= 2 && !turns_left(&hull, i) {
            let _ = hull.pop();
        }
        hull.push(i);
    }

    // Upper chain.
    let lower_len = hull.len() + 1;
    for &i in order.iter().rev().skip(1) {
        while hull.len() >= lower_len && !turns_left(&hull, i) {
            let _ = hull.pop();
        }
        hull.push(i);
    }

    // The last point is the first one again.
    let _ = hull.pop();

    if hull.len() < 3 {
        return Err(ConvexHullError::IncompletePoints);
    }

    Ok(hull)
}
