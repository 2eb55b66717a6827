use crate::math::{Point, Real};
use crate::shape::{Segment, ThickTriangle, Triangle};

/// The first point where a segment enters a thick triangle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SegmentTriangleHit {
    /// The parameter of the hit along the segment, in `[0, 1]`.
    pub param: Real,
    /// The hit point.
    pub point: Point<Real>,
}

/// Computes the first point where `segment` enters the slab of half-width `thickness` around
/// `triangle`.
///
/// Returns `None` if the segment misses the slab or if the triangle is degenerate. If the segment
/// starts inside of the slab, the hit parameter is zero.
pub fn intersection_segment_thick_triangle(
    segment: &Segment,
    triangle: &Triangle,
    thickness: Real,
) -> Option<SegmentTriangleHit> {
    let slab = ThickTriangle::new(*triangle, thickness)?;
    let (param, point) = slab.intersect_segment(segment)?;
    Some(SegmentTriangleHit { param, point })
}
