use super::{BvNode, BvTree, BvTreeOptions};
use crate::bounding_volume::{Aabb, BoundingVolumeKind};
use crate::math::{Point, Real};
use crate::shape::TriMesh;
use smallvec::smallvec;

impl BvTree {
    /// Builds a tree over all the triangles of `mesh`, top-down.
    ///
    /// Each node with more than `options.max_leaf_triangles` triangles is split in two halves
    /// at the median of the triangle centroids along the axis where the centroids are the most
    /// spread.
    pub fn build(mesh: &TriMesh, options: &BvTreeOptions) -> Self {
        let max_leaf = options.max_leaf_triangles.max(1);
        let margin = options.margin.max(0.0);
        let centroids: Vec<Point<Real>> = mesh.triangles().map(|tri| tri.center()).collect();

        let mut nodes = vec![BvNode::placeholder()];
        let mut stack = vec![(0u32, (0..mesh.num_triangles() as u32).collect::<Vec<_>>())];

        while let Some((id, mut triangles)) = stack.pop() {
            let pts: Vec<Point<Real>> = triangles
                .iter()
                .flat_map(|i| mesh.triangle(*i).vertices())
                .collect();
            let volume = BoundingVolumeKind::enclose(options.kind, &pts).loosened(margin);

            if triangles.len() <= max_leaf {
                nodes[id as usize] = BvNode {
                    volume,
                    children: smallvec![],
                    triangles,
                };
                continue;
            }

            let spread = Aabb::from_points(triangles.iter().map(|i| centroids[*i as usize]));
            let axis = spread.longest_axis();
            triangles.sort_by(|i, j| {
                centroids[*i as usize][axis].total_cmp(&centroids[*j as usize][axis])
            });
            let right = triangles.split_off(triangles.len() / 2);

            let left_id = nodes.len() as u32;
            let right_id = left_id + 1;
            nodes.push(BvNode::placeholder());
            nodes.push(BvNode::placeholder());

            nodes[id as usize] = BvNode {
                volume,
                children: smallvec![left_id, right_id],
                triangles: Vec::new(),
            };

            stack.push((right_id, right));
            stack.push((left_id, triangles));
        }

        log::trace!(
            "built a tree with {} nodes over {} triangles",
            nodes.len(),
            mesh.num_triangles()
        );

        Self { nodes }
    }

    /// A tree made of a single pass-through root holding every triangle of `mesh`.
    ///
    /// Traversing such a tree tests every pair of triangles.
    pub fn pass_through(mesh: &TriMesh) -> Self {
        Self {
            nodes: vec![BvNode {
                volume: BoundingVolumeKind::PassThrough,
                children: smallvec![],
                triangles: (0..mesh.num_triangles() as u32).collect(),
            }],
        }
    }
}
