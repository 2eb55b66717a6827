//! Time of impact computation between moving mesh primitives.

pub use self::bisection::{bisect_time_of_impact, TimeOfImpact};
pub use self::time_of_impact_point_moving_triangle::time_of_impact_point_moving_triangle;
pub use self::time_of_impact_swept_segment_triangle::{
    time_of_impact_swept_segment_triangle, SweptSegmentHit,
};

mod bisection;
mod time_of_impact_point_moving_triangle;
mod time_of_impact_swept_segment_triangle;
