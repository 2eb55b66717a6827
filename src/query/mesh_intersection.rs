//! Intersection tests between whole triangle meshes.

use crate::math::{Isometry, Real};
use crate::partitioning::{BvTree, TraversalMode};
use crate::query::intersection_test_triangle_triangle;
use crate::shape::TriMesh;

/// A triangle mesh together with its bounding volume tree and world-space position.
#[derive(Copy, Clone, Debug)]
pub struct PositionedMesh<'a> {
    /// The mesh, expressed in its local frame.
    pub mesh: &'a TriMesh,
    /// The tree built over `mesh` in its local frame.
    pub tree: &'a BvTree,
    /// The position of the mesh local frame.
    pub pos: &'a Isometry<Real>,
}

/// Computes the pairs of intersecting triangles between two meshes.
///
/// Each returned pair contains the index of a triangle of `mesh1` and the index of a triangle
/// of `mesh2`. With [`TraversalMode::FirstContact`] at most one pair is returned.
pub fn intersecting_triangle_pairs(
    mesh1: PositionedMesh,
    mesh2: PositionedMesh,
    mode: TraversalMode,
) -> Vec<(u32, u32)> {
    let pos12 = mesh1.pos.inv_mul(mesh2.pos);
    let mut result = vec![];

    let _ = mesh1
        .tree
        .traverse_pairs(mesh2.tree, &pos12, mode, &mut |i1, i2| {
            let tri1 = mesh1.mesh.triangle(i1);
            let tri2 = mesh2.mesh.triangle(i2).transformed(&pos12);
            let hit = intersection_test_triangle_triangle(&tri1, &tri2);

            if hit {
                log::trace!("triangles {} and {} intersect", i1, i2);
                result.push((i1, i2));
            }

            hit
        });

    result
}

/// Tests if two meshes intersect.
pub fn intersection_test_meshes(mesh1: PositionedMesh, mesh2: PositionedMesh) -> bool {
    !intersecting_triangle_pairs(mesh1, mesh2, TraversalMode::FirstContact).is_empty()
}

/// Computes the pairs of intersecting triangles of a mesh with itself.
///
/// Pairs of triangles sharing at least one vertex are topologically adjacent and are never
/// tested. Each returned pair `(i, j)` satisfies `i < j`.
pub fn self_intersecting_triangle_pairs(mesh: &TriMesh, mode: TraversalMode) -> Vec<(u32, u32)> {
    let num_triangles = mesh.num_triangles() as u32;
    let mut result = vec![];

    for i in 0..num_triangles {
        for j in i + 1..num_triangles {
            if mesh.triangles_share_vertex(i, j) {
                continue;
            }

            if intersection_test_triangle_triangle(&mesh.triangle(i), &mesh.triangle(j)) {
                result.push((i, j));

                if mode == TraversalMode::FirstContact {
                    return result;
                }
            }
        }
    }

    result
}

/// Tests if a mesh intersects itself.
pub fn self_intersection_test(mesh: &TriMesh) -> bool {
    !self_intersecting_triangle_pairs(mesh, TraversalMode::FirstContact).is_empty()
}
