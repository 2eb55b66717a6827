//! A triangle thickened into a thin convex slab.

use crate::math::{Point, Real, Vector, DEFAULT_EPSILON};
use crate::shape::{Segment, Triangle};

use arrayvec::ArrayVec;

/// A triangle extruded by `thickness` on both sides of its plane and on the outside of its edges.
///
/// Thick triangles absorb the numerical errors of segment/triangle intersections: a segment
/// passing slightly outside of the triangle, or ending slightly before its plane, still intersects
/// the thick triangle.
#[derive(Clone, Debug, PartialEq)]
pub struct ThickTriangle {
    triangle: Triangle,
    // Half-spaces `normal · x <= offset` bounding the slab.
    planes: ArrayVec<(Vector<Real>, Real), 5>,
}

impl ThickTriangle {
    /// Builds the slab of half-width `thickness` around `triangle`.
    ///
    /// Returns `None` if the triangle is degenerate.
    pub fn new(triangle: Triangle, thickness: Real) -> Option<Self> {
        let normal = triangle.normal()?.into_inner();
        let mut planes = ArrayVec::new();

        planes.push((normal, normal.dot(&triangle.a.coords) + thickness));
        planes.push((-normal, -normal.dot(&triangle.a.coords) + thickness));

        for edge in triangle.edges() {
            let outward = edge
                .scaled_direction()
                .cross(&normal)
                .try_normalize(DEFAULT_EPSILON)?;
            planes.push((outward, outward.dot(&edge.a.coords) + thickness));
        }

        Some(Self { triangle, planes })
    }

    /// The triangle this slab was built from.
    pub fn triangle(&self) -> &Triangle {
        &self.triangle
    }

    /// Tests if `pt` lies inside of this slab.
    pub fn contains_point(&self, pt: &Point<Real>) -> bool {
        self.planes
            .iter()
            .all(|(normal, offset)| normal.dot(&pt.coords) <= *offset)
    }

    /// Clips `segment` against this slab.
    ///
    /// Returns the parameters `(t_near, t_far)`, both in `[0, 1]`, of the part of the segment
    /// inside of the slab, or `None` if the segment misses it.
    pub fn clip_segment_parameters(&self, segment: &Segment) -> Option<(Real, Real)> {
        let dir = segment.scaled_direction();
        let mut tmin: Real = 0.0;
        let mut tmax: Real = 1.0;

        for (normal, offset) in &self.planes {
            let denom = normal.dot(&dir);
            let num = *offset - normal.dot(&segment.a.coords);

            if denom.abs() <= DEFAULT_EPSILON {
                if num < 0.0 {
                    return None;
                }
            } else {
                let t = num / denom;

                if denom < 0.0 {
                    tmin = tmin.max(t);
                } else {
                    tmax = tmax.min(t);
                }

                if tmin > tmax {
                    return None;
                }
            }
        }

        Some((tmin, tmax))
    }

    /// Computes the first point of `segment` entering this slab.
    ///
    /// Returns the parameter of that point along the segment together with the point itself.
    pub fn intersect_segment(&self, segment: &Segment) -> Option<(Real, Point<Real>)> {
        let (tnear, _) = self.clip_segment_parameters(segment)?;
        Some((tnear, segment.point_at(tnear)))
    }
}
