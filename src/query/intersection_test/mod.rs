//! Exact intersection tests between mesh primitives.

pub use self::intersection_segment_thick_triangle::{
    intersection_segment_thick_triangle, SegmentTriangleHit,
};
pub use self::intersection_test_triangle_triangle::intersection_test_triangle_triangle;

mod intersection_segment_thick_triangle;
mod intersection_test_triangle_triangle;
