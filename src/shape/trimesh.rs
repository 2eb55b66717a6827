use crate::math::{Point, Real};
use crate::shape::Triangle;

/// Errors raised when a vertex or index buffer cannot form a mesh.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TriMeshBuilderError {
    /// The index buffer is empty.
    #[error("the index buffer contains no triangle")]
    EmptyIndices,
    /// A triangle references a vertex that does not exist.
    #[error("the triangle {triangle} references the vertex {index} which does not exist.")]
    IndexOutOfBounds {
        /// The index of the faulty triangle.
        triangle: u32,
        /// The out-of-bounds vertex index.
        index: u32,
    },
    /// The new vertex buffer of a mesh does not match the size of the previous one.
    #[error("expected {expected} vertices, found {found}.")]
    VertexCountMismatch {
        /// The number of vertices of the original mesh.
        expected: usize,
        /// The number of vertices provided.
        found: usize,
    },
}

/// An immutable indexed triangle mesh.
///
/// Triangle meshes are meant to be shared between collision geometries through an
/// [`Arc`](alloc::sync::Arc): they are never modified after construction.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct TriMesh {
    vertices: Vec<Point<Real>>,
    indices: Vec<[u32; 3]>,
}

impl TriMesh {
    /// Builds a mesh, checking that every index refers to an existing vertex.
    pub fn new(
        vertices: Vec<Point<Real>>,
        indices: Vec<[u32; 3]>,
    ) -> Result<Self, TriMeshBuilderError> {
        if indices.is_empty() {
            return Err(TriMeshBuilderError::EmptyIndices);
        }

        for (triangle, idx) in indices.iter().enumerate() {
            if let Some(index) = idx.iter().find(|i| **i as usize >= vertices.len()) {
                return Err(TriMeshBuilderError::IndexOutOfBounds {
                    triangle: triangle as u32,
                    index: *index,
                });
            }
        }

        Ok(Self { vertices, indices })
    }

    /// Creates a mesh with the same topology as `self` but with new vertex positions.
    pub fn with_vertices(&self, vertices: Vec<Point<Real>>) -> Result<Self, TriMeshBuilderError> {
        if vertices.len() != self.vertices.len() {
            return Err(TriMeshBuilderError::VertexCountMismatch {
                expected: self.vertices.len(),
                found: vertices.len(),
            });
        }

        Ok(Self {
            vertices,
            indices: self.indices.clone(),
        })
    }

    /// The vertices, in the local frame of the mesh.
    #[inline]
    pub fn vertices(&self) -> &[Point<Real>] {
        &self.vertices
    }

    /// The vertex indices of each triangle.
    #[inline]
    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }

    /// The number of triangles.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.indices.len()
    }

    /// The triangle at index `i`, in the local frame.
    #[inline]
    pub fn triangle(&self, i: u32) -> Triangle {
        let idx = self.indices[i as usize];
        Triangle::new(
            self.vertices[idx[0] as usize],
            self.vertices[idx[1] as usize],
            self.vertices[idx[2] as usize],
        )
    }

    /// Iterates over every triangle, in index order.
    pub fn triangles(&self) -> impl ExactSizeIterator<Item = Triangle> + '_ {
        (0..self.indices.len() as u32).map(move |i| self.triangle(i))
    }

    /// Does the `i`-th triangle reference the vertex `vid`?
    #[inline]
    pub fn triangle_has_vertex(&self, i: u32, vid: u32) -> bool {
        self.indices[i as usize].contains(&vid)
    }

    /// Do the triangles `i` and `j` share at least one vertex?
    #[inline]
    pub fn triangles_share_vertex(&self, i: u32, j: u32) -> bool {
        let idx_j = self.indices[j as usize];
        self.indices[i as usize]
            .iter()
            .any(|vid| idx_j.contains(vid))
    }
}
