//! Collision detection between triangle meshes for event-driven simulators.
//!
//! Given the generalized state of every body at the start and at the end of a time step,
//! [`pipeline::CollisionDetector`] locates the earliest time of impact by bisection, then
//! builds the [`contact::ContactEvent`]s happening at that instant. Groups of simultaneous
//! contacts can be reduced to a minimal set with [`contact::determine_minimal_set`].

#![deny(unused_results)]
#![deny(unused_qualifications)]
#![warn(missing_docs)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_inception)]

extern crate alloc;

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;
#[macro_use]
extern crate approx;
extern crate num_traits as num;

pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod contact;
pub mod partitioning;
pub mod pipeline;
pub mod query;
pub mod shape;
pub mod transformation;
pub mod utils;

mod real {
    /// The floating-point type used for every coordinate and time value.
    #[cfg(feature = "f64")]
    pub use f64 as Real;

    /// The floating-point type used for every coordinate and time value.
    #[cfg(all(feature = "f32", not(feature = "f64")))]
    pub use f32 as Real;
}

/// Aliases for the `nalgebra` types used by this crate, for the selected scalar type.
#[cfg(feature = "dim3")]
pub mod math {
    pub use super::real::*;
    pub use na::{Isometry3 as Isometry, Matrix3 as Matrix, Point3 as Point, Vector3 as Vector};
    pub use na::{Point2, Translation3 as Translation};

    /// Tolerance used when normalizing vectors.
    pub const DEFAULT_EPSILON: Real = Real::EPSILON;

    /// Quantities below this magnitude are treated as zero (square root of the machine epsilon).
    #[cfg(feature = "f64")]
    pub const NEAR_ZERO: Real = 1.490_116_119_384_765_6e-8;

    /// Quantities below this magnitude are treated as zero (square root of the machine epsilon).
    #[cfg(all(feature = "f32", not(feature = "f64")))]
    pub const NEAR_ZERO: Real = 3.452_669_8e-4;

    /// Generalized coordinates or velocities of a body, in the layout chosen by the body set.
    pub type GeneralizedVector = na::DVector<Real>;
}
