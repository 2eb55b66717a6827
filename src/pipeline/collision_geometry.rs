use crate::math::{Isometry, Real};
use crate::partitioning::{BvTree, BvTreeOptions};
use crate::pipeline::{BodyHandle, BodyKind, BodySet};
use crate::query::PositionedMesh;
use crate::shape::{TriMesh, TriMeshBuilderError};
use alloc::sync::Arc;

/// The index of a collision geometry registered to a
/// [`CollisionDetector`](crate::pipeline::CollisionDetector).
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GeometryHandle(pub u32);

/// A triangle mesh attached to a single body.
///
/// The geometry of a rigid body is a mesh expressed in its local frame, placed relative to the
/// body frame by a fixed offset. The geometry of a deformable body is a mesh with world-space
/// vertices, replaced by the body vertices at each update.
#[derive(Clone, Debug)]
pub struct CollisionGeometry {
    mesh: Arc<TriMesh>,
    body: BodyHandle,
    offset: Isometry<Real>,
    position: Isometry<Real>,
    bv_tree: BvTree,
}

impl CollisionGeometry {
    /// Creates a geometry attached to `body`, building the bounding volume tree of its mesh.
    pub fn new(
        mesh: Arc<TriMesh>,
        body: BodyHandle,
        offset: Isometry<Real>,
        options: &BvTreeOptions,
    ) -> Self {
        let bv_tree = BvTree::build(&mesh, options);
        Self {
            mesh,
            body,
            offset,
            position: offset,
            bv_tree,
        }
    }

    /// The mesh of this geometry, in its local frame.
    #[inline]
    pub fn mesh(&self) -> &Arc<TriMesh> {
        &self.mesh
    }

    /// The single body this geometry is attached to.
    #[inline]
    pub fn body(&self) -> BodyHandle {
        self.body
    }

    /// The position of the geometry relative to its body frame.
    #[inline]
    pub fn offset(&self) -> &Isometry<Real> {
        &self.offset
    }

    /// The world-space position of the geometry, as of the last update.
    #[inline]
    pub fn position(&self) -> &Isometry<Real> {
        &self.position
    }

    /// The bounding volume tree of the mesh, in its local frame.
    #[inline]
    pub fn bv_tree(&self) -> &BvTree {
        &self.bv_tree
    }

    /// This geometry as a positioned mesh, ready for intersection tests.
    #[inline]
    pub fn positioned_mesh(&self) -> PositionedMesh<'_> {
        PositionedMesh {
            mesh: &self.mesh,
            tree: &self.bv_tree,
            pos: &self.position,
        }
    }

    /// Refreshes the world-space position (or vertices) of this geometry from its body.
    pub fn update(
        &mut self,
        bodies: &impl BodySet,
        options: &BvTreeOptions,
    ) -> Result<(), TriMeshBuilderError> {
        match bodies.body_kind(self.body) {
            BodyKind::Rigid => {
                self.position = bodies.position(self.body) * self.offset;
            }
            BodyKind::Deformable => {
                self.position = Isometry::identity();

                if let Some(vertices) = bodies.deformed_vertices(self.body) {
                    if vertices != self.mesh.vertices() {
                        self.mesh = Arc::new(self.mesh.with_vertices(vertices)?);
                        self.bv_tree = BvTree::build(&self.mesh, options);
                    }
                }
            }
        }

        Ok(())
    }
}
