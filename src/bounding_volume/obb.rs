//! Oriented Bounding Box.

use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Matrix, Point, Real, Vector, DEFAULT_EPSILON};
use crate::utils;

/// An Oriented Bounding Box (Obb).
///
/// The box is centered at `center`. Its local axes are the (orthonormal) columns of `axes` and
/// its half-lengths along each of these axes are given by `half_extents`.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct Obb {
    /// The center of the box.
    pub center: Point<Real>,
    /// The rotation matrix whose columns are the box axes.
    pub axes: Matrix<Real>,
    /// The half-lengths of the box along each of its axes.
    pub half_extents: Vector<Real>,
}

impl Obb {
    /// Creates a new oriented box.
    #[inline]
    pub fn new(center: Point<Real>, axes: Matrix<Real>, half_extents: Vector<Real>) -> Self {
        Self {
            center,
            axes,
            half_extents,
        }
    }

    /// Computes an oriented box enclosing the given set of points.
    ///
    /// The box axes are the principal axes of the point cloud. The returned box is not
    /// guaranteed to be the smallest enclosing box, though it is tight for most meshes.
    pub fn from_points(pts: &[Point<Real>]) -> Self {
        let axes = utils::principal_axes(pts);
        let mut mins = Vector::repeat(Real::MAX);
        let mut maxs = Vector::repeat(-Real::MAX);

        for pt in pts {
            let local = axes.tr_mul(&pt.coords);
            mins = mins.inf(&local);
            maxs = maxs.sup(&local);
        }

        if pts.is_empty() {
            return Self::new(Point::origin(), axes, Vector::zeros());
        }

        Self::new(
            Point::from(axes * ((maxs + mins) * 0.5)),
            axes,
            (maxs - mins) * 0.5,
        )
    }

    /// Transforms this box by `m`.
    #[inline]
    pub fn transform_by(&self, m: &Isometry<Real>) -> Self {
        let rot = m.rotation.to_rotation_matrix();
        Self::new(m * self.center, rot * self.axes, self.half_extents)
    }

    /// Enlarges this box by `amount` along each of its axes.
    #[inline]
    pub fn loosened(&self, amount: Real) -> Self {
        Self::new(
            self.center,
            self.axes,
            self.half_extents + Vector::repeat(amount),
        )
    }

    /// Expresses `pt` in the local frame of this box.
    #[inline]
    pub fn to_local(&self, pt: &Point<Real>) -> Vector<Real> {
        self.axes.tr_mul(&(pt - self.center))
    }

    /// The squared distance between this box and a point (zero if the point is inside).
    pub fn distance_squared_to_point(&self, pt: &Point<Real>) -> Real {
        let local = self.to_local(pt);
        let clamped = local.zip_map(&self.half_extents, |x, h| x.clamp(-h, h));
        (local - clamped).norm_squared()
    }

    /// The eight vertices of this box.
    pub fn vertices(&self) -> [Point<Real>; 8] {
        let mut res = [self.center; 8];

        for (i, vtx) in res.iter_mut().enumerate() {
            let signs = Vector::new(
                if i & 1 == 0 { -1.0 } else { 1.0 },
                if i & 2 == 0 { -1.0 } else { 1.0 },
                if i & 4 == 0 { -1.0 } else { 1.0 },
            );
            *vtx += self.axes * self.half_extents.component_mul(&signs);
        }

        res
    }

    /// The axis-aligned box enclosing this oriented box.
    pub fn aabb(&self) -> Aabb {
        let half = self.axes.abs() * self.half_extents;
        Aabb::from_half_extents(self.center, half)
    }

    /// Separating axis test between two oriented boxes expressed in the same frame.
    ///
    /// All 15 candidate axes are tested: the three axes of each box, and the nine cross products
    /// between them.
    pub fn intersects(&self, other: &Obb) -> bool {
        let a = &self.half_extents;
        let b = &other.half_extents;

        // Rotation and translation of `other` in `self`'s local frame.
        let r = self.axes.tr_mul(&other.axes);
        let t = self.to_local(&other.center);
        let abs_r = r.abs().add_scalar(DEFAULT_EPSILON);

        for i in 0..3 {
            let ra = a[i];
            let rb = b.dot(&abs_r.row(i).transpose());
            if t[i].abs() > ra + rb {
                return false;
            }
        }

        for j in 0..3 {
            let ra = a.dot(&abs_r.column(j));
            let rb = b[j];
            if t.dot(&r.column(j)).abs() > ra + rb {
                return false;
            }
        }

        for i in 0..3 {
            let i1 = (i + 1) % 3;
            let i2 = (i + 2) % 3;

            for j in 0..3 {
                let j1 = (j + 1) % 3;
                let j2 = (j + 2) % 3;

                let ra = a[i1] * abs_r[(i2, j)] + a[i2] * abs_r[(i1, j)];
                let rb = b[j1] * abs_r[(i, j2)] + b[j2] * abs_r[(i, j1)];
                let dist = (t[i2] * r[(i1, j)] - t[i1] * r[(i2, j)]).abs();

                if dist > ra + rb {
                    return false;
                }
            }
        }

        true
    }
}
