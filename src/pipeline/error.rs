use crate::pipeline::{GeometryHandle, SuperBody};
use crate::shape::TriMeshBuilderError;

/// Errors that can occur during a collision detection step.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum CollisionError {
    /// The start or end state of a super body involved in a collision check was not provided.
    #[error("no generalized coordinates were provided for the super body {0:?}")]
    MissingState(SuperBody),
    /// A geometry handle does not refer to any geometry of the collision detector.
    #[error("the geometry {0:?} does not exist")]
    UnknownGeometry(GeometryHandle),
    /// The duration of the time step is zero, negative or not a number.
    #[error("the time step duration must be positive and finite")]
    InvalidTimeStep,
    /// The vertices of a deformable body do not match the topology of its mesh.
    #[error(transparent)]
    InvalidDeformation(#[from] TriMeshBuilderError),
}
