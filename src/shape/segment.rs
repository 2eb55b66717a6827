use crate::math::{Isometry, Point, Real, Vector, DEFAULT_EPSILON};
use na::Unit;

/// A line segment, used for mesh edges and for the paths swept by moving vertices.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Segment {
    /// The start point, at parameter `0`.
    pub a: Point<Real>,
    /// The end point, at parameter `1`.
    pub b: Point<Real>,
}

impl Segment {
    /// Creates the segment from `a` to `b`.
    #[inline]
    pub fn new(a: Point<Real>, b: Point<Real>) -> Segment {
        Segment { a, b }
    }

    /// The path of a point starting at `origin` and moved by `displacement`.
    #[inline]
    pub fn from_displacement(origin: Point<Real>, displacement: &Vector<Real>) -> Segment {
        Segment::new(origin, origin + displacement)
    }

    /// The vector `b - a`.
    #[inline]
    pub fn scaled_direction(&self) -> Vector<Real> {
        self.b - self.a
    }

    /// The distance between the two endpoints.
    #[inline]
    pub fn length(&self) -> Real {
        na::distance(&self.a, &self.b)
    }

    /// The unit vector pointing from `a` to `b`, or `None` if the segment has zero length.
    pub fn direction(&self) -> Option<Unit<Vector<Real>>> {
        Unit::try_new(self.scaled_direction(), DEFAULT_EPSILON)
    }

    /// This segment with both endpoints moved by `m`.
    pub fn transformed(&self, m: &Isometry<Real>) -> Self {
        Segment::new(m * self.a, m * self.b)
    }

    /// The point at parameter `t`, i.e., `a + (b - a) * t`.
    #[inline]
    pub fn point_at(&self, t: Real) -> Point<Real> {
        self.a + self.scaled_direction() * t
    }

    /// The midpoint.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        na::center(&self.a, &self.b)
    }
}
