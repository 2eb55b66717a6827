//! Non-persistent geometric queries between mesh primitives.
//!
//! The functions of this module have the form `[operation]_[shape1]_[shape2]()` where
//! `[operation]` is `closest_points`, `intersection_test`, `intersection` or `time_of_impact`.

pub use self::intersection_test::{
    intersection_segment_thick_triangle, intersection_test_triangle_triangle, SegmentTriangleHit,
};
pub use self::mesh_intersection::{
    intersecting_triangle_pairs, intersection_test_meshes, self_intersecting_triangle_pairs,
    self_intersection_test, PositionedMesh,
};
pub use self::time_of_impact::{
    bisect_time_of_impact, time_of_impact_point_moving_triangle,
    time_of_impact_swept_segment_triangle, SweptSegmentHit, TimeOfImpact,
};

mod closest_points;
mod intersection_test;
mod mesh_intersection;
mod time_of_impact;

/// Queries dedicated to specific pairs of shapes.
pub mod details {
    pub use super::closest_points::*;
    pub use super::intersection_test::*;
    pub use super::time_of_impact::*;
}
