//! Bounding sphere.

use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::math::{Isometry, Point, Real, Vector};

/// A Bounding Sphere.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct BoundingSphere {
    /// The center of the sphere.
    pub center: Point<Real>,
    /// The radius of the sphere.
    pub radius: Real,
}

impl BoundingSphere {
    /// Creates a sphere from its center and radius.
    pub fn new(center: Point<Real>, radius: Real) -> BoundingSphere {
        BoundingSphere { center, radius }
    }

    /// A sphere enclosing `pts`, centered on their Aabb.
    ///
    /// This is not the smallest enclosing sphere, but it is never more than `sqrt(3)` times
    /// larger. An empty set gives a zero sphere at the origin.
    pub fn from_points(pts: &[Point<Real>]) -> BoundingSphere {
        if pts.is_empty() {
            return BoundingSphere::new(Point::origin(), 0.0);
        }

        let center = Aabb::from_points(pts.iter().copied()).center();
        let radius = pts
            .iter()
            .map(|pt| na::distance_squared(pt, &center))
            .fold(0.0, Real::max);

        BoundingSphere::new(center, radius.sqrt())
    }

    /// The bounding sphere center.
    #[inline]
    pub fn center(&self) -> &Point<Real> {
        &self.center
    }

    /// The bounding sphere radius.
    #[inline]
    pub fn radius(&self) -> Real {
        self.radius
    }

    /// Transforms this bounding sphere by `m`.
    #[inline]
    pub fn transform_by(&self, m: &Isometry<Real>) -> BoundingSphere {
        BoundingSphere::new(m * self.center, self.radius)
    }

    /// The Aabb enclosing this sphere.
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_half_extents(self.center, Vector::repeat(self.radius))
    }
}

impl BoundingVolume for BoundingSphere {
    #[inline]
    fn center(&self) -> Point<Real> {
        self.center
    }

    #[inline]
    fn intersects(&self, other: &BoundingSphere) -> bool {
        let reach = self.radius + other.radius;
        na::distance_squared(&self.center, &other.center) <= reach * reach
    }

    #[inline]
    fn contains(&self, other: &BoundingSphere) -> bool {
        na::distance(&self.center, &other.center) + other.radius <= self.radius
    }

    fn merged(&self, other: &BoundingSphere) -> BoundingSphere {
        if self.contains(other) {
            return *self;
        }
        if other.contains(self) {
            return *other;
        }

        // Neither contains the other, so the centers are distinct.
        let dist = na::distance(&self.center, &other.center);
        let radius = (dist + self.radius + other.radius) * 0.5;
        let dir = (other.center - self.center) / dist;
        BoundingSphere::new(self.center + dir * (radius - self.radius), radius)
    }

    #[inline]
    fn loosened(&self, amount: Real) -> BoundingSphere {
        debug_assert!(amount >= 0.0, "negative loosening margin");
        BoundingSphere::new(self.center, self.radius + amount)
    }
}
