//! Segment swept by a sphere.

use crate::bounding_volume::{Aabb, Obb};
use crate::math::{Isometry, Matrix, Point, Real, Vector, DEFAULT_EPSILON};
use crate::shape::Segment;
use crate::utils;

/// A segment swept by a sphere, i.e., a capsule.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct SweptSegment {
    /// The segment at the core of the capsule.
    pub segment: Segment,
    /// The radius of the sphere sweeping the segment.
    pub radius: Real,
    /// A unit vector orthogonal to the segment, orienting the cross-section of the enclosing
    /// oriented box. It moves with the segment.
    pub up: Vector<Real>,
}

impl SweptSegment {
    /// Creates a new swept segment.
    #[inline]
    pub fn new(segment: Segment, radius: Real) -> Self {
        let up = match segment.direction() {
            Some(dir) => utils::orthonormal_basis(&dir)[0],
            None => Vector::y(),
        };
        Self {
            segment,
            radius,
            up,
        }
    }

    /// Fits a swept segment to a set of points.
    ///
    /// The segment lies on the main principal axis of the points and the radius is the largest
    /// distance between a point and that axis.
    pub fn from_points(pts: &[Point<Real>]) -> Self {
        let Some(center) = utils::center(pts) else {
            return Self::new(Segment::new(Point::origin(), Point::origin()), 0.0);
        };
        let axes = utils::principal_axes(pts);
        let axis: Vector<Real> = axes.column(0).into_owned();

        let mut tmin = Real::MAX;
        let mut tmax = -Real::MAX;
        let mut radius: Real = 0.0;

        for pt in pts {
            let dpt = pt - center;
            let t = dpt.dot(&axis);
            tmin = tmin.min(t);
            tmax = tmax.max(t);
            radius = radius.max((dpt - axis * t).norm());
        }

        Self {
            segment: Segment::new(center + axis * tmin, center + axis * tmax),
            radius,
            up: axes.column(1).into_owned(),
        }
    }

    /// Transforms this swept segment by `m`.
    #[inline]
    pub fn transform_by(&self, m: &Isometry<Real>) -> Self {
        Self {
            segment: self.segment.transformed(m),
            radius: self.radius,
            up: m * self.up,
        }
    }

    /// Enlarges the sweep radius by `amount`.
    #[inline]
    pub fn loosened(&self, amount: Real) -> Self {
        Self {
            radius: self.radius + amount,
            ..*self
        }
    }

    /// The center of the segment.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        self.segment.center()
    }

    /// Distance between the segment (ignoring the sweep radius) and a point.
    pub fn distance_to_point(&self, pt: &Point<Real>) -> Real {
        let dir = self.segment.scaled_direction();
        let len2 = dir.norm_squared();
        let t = if len2 > 0.0 {
            ((pt - self.segment.a).dot(&dir) / len2).clamp(0.0, 1.0)
        } else {
            0.0
        };
        na::distance(&self.segment.point_at(t), pt)
    }

    /// The oriented box enclosing this swept segment.
    ///
    /// Its cross-section is oriented by `up`, so the box is transformed along with the segment.
    pub fn to_obb(&self) -> Obb {
        let half_length = self.segment.length() * 0.5;
        let axes = match self.segment.direction() {
            Some(dir) => {
                let dir = dir.into_inner();
                let up = (self.up - dir * dir.dot(&self.up))
                    .try_normalize(DEFAULT_EPSILON)
                    .unwrap_or_else(|| utils::orthonormal_basis(&dir)[0]);
                Matrix::from_columns(&[dir, up, dir.cross(&up)])
            }
            None => Matrix::identity(),
        };

        Obb::new(
            self.center(),
            axes,
            Vector::new(half_length + self.radius, self.radius, self.radius),
        )
    }

    /// The Aabb enclosing this swept segment.
    #[inline]
    pub fn aabb(&self) -> Aabb {
        let mut aabb = Aabb::from_points([self.segment.a, self.segment.b]);
        aabb.mins -= Vector::repeat(self.radius);
        aabb.maxs += Vector::repeat(self.radius);
        aabb
    }
}
