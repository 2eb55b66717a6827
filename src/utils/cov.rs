use crate::math::{Matrix, Point, Real, Vector};
use crate::num::FromPrimitive;

/// Computes the center and the covariance matrix of a set of points.
///
/// Returns `None` if `pts` is empty.
pub fn center_cov(pts: &[Point<Real>]) -> Option<(Point<Real>, Matrix<Real>)> {
    let center = crate::utils::center(pts)?;
    let mut cov: Matrix<Real> = na::zero();
    let normalizer: Real = 1.0 / Real::from_usize(pts.len())?;

    for p in pts.iter() {
        let cp = *p - center;
        // NOTE: this is more numerically stable than using cov.syger.
        cov += cp * (cp * normalizer).transpose();
    }

    Some((center, cov))
}

/// Computes a right-handed frame made of the principal axes of a point cloud.
///
/// The columns of the returned matrix are sorted by decreasing variance.
/// Returns the identity if `pts` is empty.
pub fn principal_axes(pts: &[Point<Real>]) -> Matrix<Real> {
    let Some((_, cov)) = center_cov(pts) else {
        return Matrix::identity();
    };

    let eigen = cov.symmetric_eigen();
    let mut order = [0, 1, 2];
    order.sort_by(|i, j| eigen.eigenvalues[*j].total_cmp(&eigen.eigenvalues[*i]));

    let mut axes = Matrix::from_columns(&[
        eigen.eigenvectors.column(order[0]).into_owned(),
        eigen.eigenvectors.column(order[1]).into_owned(),
        eigen.eigenvectors.column(order[2]).into_owned(),
    ]);

    if axes.determinant() < 0.0 {
        let flipped: Vector<Real> = -axes.column(2).into_owned();
        axes.set_column(2, &flipped);
    }

    axes
}
