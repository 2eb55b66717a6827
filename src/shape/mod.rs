//! Shapes supported by impact3d.

pub use self::segment::Segment;
pub use self::thick_triangle::ThickTriangle;
pub use self::triangle::{Triangle, TriangleFeature};
pub use self::trimesh::{TriMesh, TriMeshBuilderError};

mod segment;
mod thick_triangle;
mod triangle;
mod trimesh;
