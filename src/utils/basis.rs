use crate::math::{Point, Point2, Real, Vector};

/// Computes two unit vectors completing `n` into a right-handed orthonormal basis.
///
/// The vector `n` is assumed to be normalized.
// Robust and branchless implementation from Pixar:
// https://graphics.pixar.com/library/OrthonormalB/paper.pdf
pub fn orthonormal_basis(n: &Vector<Real>) -> [Vector<Real>; 2] {
    let sign = Real::copysign(1.0, n.z);
    let a = -1.0 / (sign + n.z);
    let b = n.x * n.y * a;

    [
        Vector::new(1.0 + sign * n.x * n.x * a, sign * b, -sign * n.x),
        Vector::new(b, sign + n.y * n.y * a, -n.y),
    ]
}

/// The orthogonal projection onto a plane, expressed in 2D coordinates of the plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlaneProjection {
    origin: Point<Real>,
    normal: Vector<Real>,
    axes: [Vector<Real>; 2],
}

impl PlaneProjection {
    /// The projection onto the plane through `origin` with the unit normal `normal`.
    pub fn new(origin: Point<Real>, normal: Vector<Real>) -> Self {
        Self {
            origin,
            normal,
            axes: orthonormal_basis(&normal),
        }
    }

    /// The signed distance from `pt` to the plane.
    pub fn signed_distance(&self, pt: &Point<Real>) -> Real {
        (pt - self.origin).dot(&self.normal)
    }

    /// The coordinates of the projection of `pt`, in the basis completing the normal.
    pub fn to_2d(&self, pt: &Point<Real>) -> Point2<Real> {
        let dpt = pt - self.origin;
        Point2::new(dpt.dot(&self.axes[0]), dpt.dot(&self.axes[1]))
    }
}
