//! Rectangle swept by a sphere.

use crate::bounding_volume::{Aabb, Obb};
use crate::math::{Isometry, Matrix, Point, Real, Vector};
use crate::query::details::distance_segment_segment;
use crate::shape::Segment;
use crate::utils;

/// A rectangle swept by a sphere, also known as a rectangle swept sphere (RSS).
///
/// This is the set of points at a distance smaller than `radius` from the rectangle centered at
/// `center`, spanned by the orthonormal `axes` with half-lengths `half_lengths`.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct SweptRect {
    /// The center of the rectangle.
    pub center: Point<Real>,
    /// The two orthonormal axes spanning the rectangle.
    pub axes: [Vector<Real>; 2],
    /// The half-lengths of the rectangle along each of its axes.
    pub half_lengths: [Real; 2],
    /// The radius of the sphere sweeping the rectangle.
    pub radius: Real,
}

impl SweptRect {
    /// Creates a new swept rectangle.
    pub fn new(
        center: Point<Real>,
        axes: [Vector<Real>; 2],
        half_lengths: [Real; 2],
        radius: Real,
    ) -> Self {
        Self {
            center,
            axes,
            half_lengths,
            radius,
        }
    }

    /// Fits a swept rectangle to a set of points.
    ///
    /// The rectangle lies on the plane spanned by the two main principal axes of the points and
    /// the sweep radius covers the spread of the points along the third one.
    pub fn from_points(pts: &[Point<Real>]) -> Self {
        let frame = utils::principal_axes(pts);
        let mut mins = Vector::repeat(Real::MAX);
        let mut maxs = Vector::repeat(-Real::MAX);

        for pt in pts {
            let local = frame.tr_mul(&pt.coords);
            mins = mins.inf(&local);
            maxs = maxs.sup(&local);
        }

        let axes = [
            frame.column(0).into_owned(),
            frame.column(1).into_owned(),
        ];

        if pts.is_empty() {
            return Self::new(Point::origin(), axes, [0.0; 2], 0.0);
        }

        let half = (maxs - mins) * 0.5;
        Self::new(
            Point::from(frame * ((maxs + mins) * 0.5)),
            axes,
            [half.x, half.y],
            half.z,
        )
    }

    /// The unit normal of the rectangle plane.
    #[inline]
    pub fn normal(&self) -> Vector<Real> {
        self.axes[0].cross(&self.axes[1])
    }

    /// Transforms this swept rectangle by `m`.
    #[inline]
    pub fn transform_by(&self, m: &Isometry<Real>) -> Self {
        Self::new(
            m * self.center,
            [m * self.axes[0], m * self.axes[1]],
            self.half_lengths,
            self.radius,
        )
    }

    /// Enlarges the sweep radius by `amount`.
    #[inline]
    pub fn loosened(&self, amount: Real) -> Self {
        Self {
            radius: self.radius + amount,
            ..*self
        }
    }

    /// The four corners of the rectangle, in counter-clockwise order around its normal.
    pub fn corners(&self) -> [Point<Real>; 4] {
        let u = self.axes[0] * self.half_lengths[0];
        let v = self.axes[1] * self.half_lengths[1];
        [
            self.center - u - v,
            self.center + u - v,
            self.center + u + v,
            self.center - u + v,
        ]
    }

    /// The four edges of the rectangle.
    pub fn edges(&self) -> [Segment; 4] {
        let [a, b, c, d] = self.corners();
        [
            Segment::new(a, b),
            Segment::new(b, c),
            Segment::new(c, d),
            Segment::new(d, a),
        ]
    }

    /// The point of the rectangle (ignoring the sweep radius) closest to `pt`.
    pub fn project_point(&self, pt: &Point<Real>) -> Point<Real> {
        let dpt = pt - self.center;
        let u = dpt
            .dot(&self.axes[0])
            .clamp(-self.half_lengths[0], self.half_lengths[0]);
        let v = dpt
            .dot(&self.axes[1])
            .clamp(-self.half_lengths[1], self.half_lengths[1]);
        self.center + self.axes[0] * u + self.axes[1] * v
    }

    /// Distance between the rectangle (ignoring the sweep radius) and a point.
    #[inline]
    pub fn distance_to_point(&self, pt: &Point<Real>) -> Real {
        na::distance(&self.project_point(pt), pt)
    }

    /// Distance between the rectangle (ignoring the sweep radius) and a segment.
    pub fn distance_to_segment(&self, segment: &Segment) -> Real {
        if self.is_crossed_by(segment) {
            return 0.0;
        }

        let endpoints = self
            .distance_to_point(&segment.a)
            .min(self.distance_to_point(&segment.b));

        self.edges()
            .iter()
            .map(|edge| distance_segment_segment(edge, segment))
            .fold(endpoints, Real::min)
    }

    /// Distance between two rectangles, ignoring both sweep radii.
    pub fn distance_to_rect(&self, other: &SweptRect) -> Real {
        let d1 = self
            .edges()
            .iter()
            .map(|edge| other.distance_to_segment(edge))
            .fold(Real::MAX, Real::min);
        let d2 = other
            .edges()
            .iter()
            .map(|edge| self.distance_to_segment(edge))
            .fold(Real::MAX, Real::min);
        d1.min(d2)
    }

    // Does the segment cross the rectangle plane at a point inside of the rectangle?
    fn is_crossed_by(&self, segment: &Segment) -> bool {
        let n = self.normal();
        let ha = (segment.a - self.center).dot(&n);
        let hb = (segment.b - self.center).dot(&n);

        if ha * hb > 0.0 || ha == hb {
            return false;
        }

        let pt = segment.point_at(ha / (ha - hb));
        let dpt = pt - self.center;
        dpt.dot(&self.axes[0]).abs() <= self.half_lengths[0]
            && dpt.dot(&self.axes[1]).abs() <= self.half_lengths[1]
    }

    /// The oriented box enclosing this swept rectangle.
    pub fn to_obb(&self) -> Obb {
        let axes = Matrix::from_columns(&[self.axes[0], self.axes[1], self.normal()]);
        Obb::new(
            self.center,
            axes,
            Vector::new(
                self.half_lengths[0] + self.radius,
                self.half_lengths[1] + self.radius,
                self.radius,
            ),
        )
    }

    /// The Aabb enclosing this swept rectangle.
    #[inline]
    pub fn aabb(&self) -> Aabb {
        self.to_obb().aabb()
    }
}
