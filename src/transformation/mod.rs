//! Convex hulls of the point sets produced by contact reduction.

pub use self::convex_hull2::convex_hull2;
pub use self::convex_hull3::convex_hull3;
pub use self::error::ConvexHullError;
pub use self::utils::project_to_plane;

mod convex_hull2;
mod convex_hull3;
mod error;
pub mod utils;
