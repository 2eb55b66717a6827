use crate::math::{Point, Real, Vector};

/// The centroid of `pts`, every point having the same weight.
///
/// Returns `None` when `pts` is empty.
///
/// ```
/// use impact3d::math::Point;
/// use impact3d::utils::center;
///
/// let pts = [Point::new(0.0, 0.0, 0.0), Point::new(3.0, 0.0, 0.0), Point::new(0.0, 3.0, 0.0)];
/// assert_eq!(center(&pts), Some(Point::new(1.0, 1.0, 0.0)));
/// assert_eq!(center(&[]), None);
/// ```
pub fn center(pts: &[Point<Real>]) -> Option<Point<Real>> {
    if pts.is_empty() {
        return None;
    }

    let sum = pts.iter().fold(Vector::zeros(), |acc, pt| acc + pt.coords);
    Some(Point::from(sum / pts.len() as Real))
}
