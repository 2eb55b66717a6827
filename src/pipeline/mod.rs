//! The collision detection pipeline: geometries, broad phase, time of impact and contacts.

pub use self::body::{ArticulationHandle, BodyHandle, BodyKind, BodySet, SuperBody, Velocity};
pub use self::collision_detector::{CollisionDetector, CollisionDetectorConfig, StateMap};
pub use self::collision_geometry::{CollisionGeometry, GeometryHandle};
pub use self::error::CollisionError;

mod body;
mod broad_phase;
mod collision_detector;
mod collision_geometry;
mod error;
mod narrow_phase;
