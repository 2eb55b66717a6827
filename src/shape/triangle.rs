//! Triangles of a mesh, and the classification of points lying on them.

use crate::math::{Isometry, Point, Real, Vector};
use crate::shape::Segment;

use na::Unit;

/// A triangle with vertices `a`, `b`, `c`, oriented counter-clockwise around its normal.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Triangle {
    /// First vertex.
    pub a: Point<Real>,
    /// Second vertex.
    pub b: Point<Real>,
    /// Third vertex.
    pub c: Point<Real>,
}

/// The feature of a triangle a point lies on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TriangleFeature {
    /// The point lies on a vertex (0 for `a`, 1 for `b`, 2 for `c`).
    Vertex(u32),
    /// The point lies on an edge, but not on one of its vertices.
    ///
    /// The 0-th edge is AB, the 1-st is BC and the 2-nd is CA.
    Edge(u32),
    /// The point lies strictly inside the triangle.
    Face,
}

impl From<[Point<Real>; 3]> for Triangle {
    fn from(arr: [Point<Real>; 3]) -> Self {
        Triangle::new(arr[0], arr[1], arr[2])
    }
}

impl Triangle {
    /// The triangle with vertices `a`, `b` and `c`.
    #[inline]
    pub fn new(a: Point<Real>, b: Point<Real>, c: Point<Real>) -> Triangle {
        Triangle { a, b, c }
    }

    /// The three vertices of this triangle.
    #[inline]
    pub fn vertices(&self) -> [Point<Real>; 3] {
        [self.a, self.b, self.c]
    }

    /// The normal of this triangle assuming it is oriented ccw.
    ///
    /// The normal points such that it is collinear to `AB × AC` (where `×` denotes the cross
    /// product). Returns `None` if the triangle is degenerate.
    #[inline]
    pub fn normal(&self) -> Option<Unit<Vector<Real>>> {
        Unit::try_new(self.scaled_normal(), crate::math::DEFAULT_EPSILON)
    }

    /// A vector normal of this triangle.
    ///
    /// The vector points such that it is collinear to `AB × AC` (where `×` denotes the cross
    /// product).
    #[inline]
    pub fn scaled_normal(&self) -> Vector<Real> {
        let ab = self.b - self.a;
        let ac = self.c - self.a;
        ab.cross(&ac)
    }

    /// The edges `AB`, `BC` and `CA`, in this order.
    #[inline]
    pub fn edges(&self) -> [Segment; 3] {
        [
            Segment::new(self.a, self.b),
            Segment::new(self.b, self.c),
            Segment::new(self.c, self.a),
        ]
    }

    /// This triangle with its vertices moved by `m`.
    #[inline]
    pub fn transformed(&self, m: &Isometry<Real>) -> Self {
        Triangle::new(m * self.a, m * self.b, m * self.c)
    }

    /// The triangle obtained after each vertex moved by `velocities[i] * t`.
    #[inline]
    pub fn moved(&self, velocities: &[Vector<Real>; 3], t: Real) -> Self {
        Triangle::new(
            self.a + velocities[0] * t,
            self.b + velocities[1] * t,
            self.c + velocities[2] * t,
        )
    }

    /// Half the norm of the scaled normal.
    #[inline]
    pub fn area(&self) -> Real {
        self.scaled_normal().norm() * 0.5
    }

    /// The centroid.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        Point::from((self.a.coords + self.b.coords + self.c.coords) / 3.0)
    }

    /// Whether the vertices are aligned or coincident, up to a small tolerance.
    pub fn is_affinely_dependent(&self) -> bool {
        const EPS: Real = crate::math::DEFAULT_EPSILON * 100.0;

        let p1p2 = self.b - self.a;
        let p1p3 = self.c - self.a;
        relative_eq!(p1p2.cross(&p1p3).norm_squared(), 0.0, epsilon = EPS * EPS)
    }

    /// Determines the feature of this triangle the point `p` lies on.
    ///
    /// The point is considered on the triangle if it is at most at a distance `tolerance` from its
    /// plane and from its edges. Returns `None` if the point is outside of the triangle or if the
    /// triangle is degenerate.
    pub fn feature_at_point(&self, p: &Point<Real>, tolerance: Real) -> Option<TriangleFeature> {
        let normal = self.normal()?;

        if (p - self.a).dot(&normal).abs() > tolerance {
            return None;
        }

        let mut on_edge = [false; 3];

        for (i, edge) in self.edges().iter().enumerate() {
            let inward = normal.cross(&edge.scaled_direction()).try_normalize(0.0)?;
            let dist = (p - edge.a).dot(&inward);

            if dist < -tolerance {
                return None;
            }

            on_edge[i] = dist <= tolerance;
        }

        Some(match on_edge {
            [true, true, _] => TriangleFeature::Vertex(1),
            [_, true, true] => TriangleFeature::Vertex(2),
            [true, _, true] => TriangleFeature::Vertex(0),
            [true, false, false] => TriangleFeature::Edge(0),
            [false, true, false] => TriangleFeature::Edge(1),
            [false, false, true] => TriangleFeature::Edge(2),
            [false, false, false] => TriangleFeature::Face,
        })
    }

    /// Tests if a point lies on this triangle, up to `tolerance`.
    #[inline]
    pub fn contains_point(&self, p: &Point<Real>, tolerance: Real) -> bool {
        self.feature_at_point(p, tolerance).is_some()
    }
}
