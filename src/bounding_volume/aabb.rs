//! Axis Aligned Bounding Box.

use crate::bounding_volume::{BoundingVolume, Obb};
use crate::math::{Isometry, Matrix, Point, Real, Vector};

/// An Axis-Aligned Bounding Box (Aabb).
///
/// An Aabb is defined by its minimum and maximum corners. Its edges are always parallel to the
/// coordinate axes of the frame it is expressed in, which makes its intersection tests very
/// cheap, at the cost of being loose around rotated geometry.
///
/// - **mins**: the point with the smallest coordinates on each axis.
/// - **maxs**: the point with the largest coordinates on each axis.
/// - **Invariant**: `mins.x ≤ maxs.x`, `mins.y ≤ maxs.y` and `mins.z ≤ maxs.z`, except for the
///   invalid Aabb returned by [`Aabb::new_invalid`].
///
/// Transforming an Aabb by a rotation does not give an Aabb anymore: see [`Aabb::transform_by`]
/// which returns an [`Obb`].
///
/// ```rust
/// # #[cfg(all(feature = "dim3", feature = "f64"))] {
/// use impact3d::bounding_volume::Aabb;
/// use impact3d::math::Point;
///
/// let points = vec![
///     Point::new(1.0, 2.0, 3.0),
///     Point::new(-1.0, 4.0, 2.0),
///     Point::new(0.0, 0.0, 5.0),
/// ];
/// let aabb = Aabb::from_points(points);
///
/// assert_eq!(aabb.mins, Point::new(-1.0, 0.0, 2.0));
/// assert_eq!(aabb.maxs, Point::new(1.0, 4.0, 5.0));
/// # }
/// ```
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct Aabb {
    /// The point with minimum coordinates.
    pub mins: Point<Real>,
    /// The point with maximum coordinates.
    pub maxs: Point<Real>,
}

impl Aabb {
    /// Creates a new Aabb.
    ///
    /// # Arguments:
    ///   * `mins` - position of the point with the smallest coordinates.
    ///   * `maxs` - position of the point with the highest coordinates. Each component of `mins`
    ///     must be smaller than the related components of `maxs`.
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// Creates an invalid Aabb with `mins` components set to `Real::max_values` and `maxs`components set to `-Real::max_values`.
    ///
    /// This is often used as the initial values of some Aabb merging algorithms.
    #[inline]
    pub fn new_invalid() -> Self {
        Self::new(
            Vector::repeat(Real::MAX).into(),
            Vector::repeat(-Real::MAX).into(),
        )
    }

    /// Creates a new Aabb from its center and its half-extents.
    #[inline]
    pub fn from_half_extents(center: Point<Real>, half_extents: Vector<Real>) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Computes the smallest Aabb enclosing the given points.
    ///
    /// Returns an invalid Aabb if the iterator is empty.
    pub fn from_points<I>(pts: I) -> Self
    where
        I: IntoIterator<Item = Point<Real>>,
    {
        let mut result = Aabb::new_invalid();

        for pt in pts {
            result.take_point(pt);
        }

        result
    }

    /// Enlarges this Aabb so it also contains the point `pt`.
    pub fn take_point(&mut self, pt: Point<Real>) {
        self.mins = self.mins.coords.inf(&pt.coords).into();
        self.maxs = self.maxs.coords.sup(&pt.coords).into();
    }

    /// The center of this Aabb.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// The half extents of this Aabb.
    #[inline]
    pub fn half_extents(&self) -> Vector<Real> {
        (self.maxs - self.mins) * 0.5
    }

    /// The extents of this Aabb.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.maxs - self.mins
    }

    /// The index of the largest axis of this Aabb.
    #[inline]
    pub fn longest_axis(&self) -> usize {
        self.extents().imax()
    }

    /// The squared distance between this Aabb and a point (zero if the point is inside).
    #[inline]
    pub fn distance_squared_to_local_point(&self, pt: &Point<Real>) -> Real {
        let mins_pt = self.mins - pt;
        let pt_maxs = pt - self.maxs;
        let shift = mins_pt.sup(&pt_maxs).sup(&na::zero());
        shift.norm_squared()
    }

    /// This Aabb seen as an oriented box with axes aligned with the coordinate axes.
    #[inline]
    pub fn to_obb(&self) -> Obb {
        Obb::new(self.center(), Matrix::identity(), self.half_extents())
    }

    /// Computes the oriented box obtained by transforming this Aabb by `m`.
    #[inline]
    pub fn transform_by(&self, m: &Isometry<Real>) -> Obb {
        self.to_obb().transform_by(m)
    }
}

impl BoundingVolume for Aabb {
    #[inline]
    fn center(&self) -> Point<Real> {
        self.center()
    }

    #[inline]
    fn intersects(&self, other: &Aabb) -> bool {
        na::partial_le(&self.mins, &other.maxs) && na::partial_ge(&self.maxs, &other.mins)
    }

    #[inline]
    fn contains(&self, other: &Aabb) -> bool {
        na::partial_le(&self.mins, &other.mins) && na::partial_ge(&self.maxs, &other.maxs)
    }

    #[inline]
    fn merged(&self, other: &Aabb) -> Aabb {
        Aabb::new(self.mins.inf(&other.mins), self.maxs.sup(&other.maxs))
    }

    #[inline]
    fn loosened(&self, amount: Real) -> Aabb {
        debug_assert!(amount >= 0.0, "negative loosening margin");
        let margin = Vector::repeat(amount);
        Aabb::new(self.mins - margin, self.maxs + margin)
    }
}
