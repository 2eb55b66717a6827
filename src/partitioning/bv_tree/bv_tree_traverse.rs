use super::{BvTree, TraversalMode};
use crate::math::{Isometry, Real};
use alloc::collections::VecDeque;

impl BvTree {
    /// Traverses this tree simultaneously with `other` and reports pairs of triangles lying in
    /// overlapping leaves.
    ///
    /// The transformation `pos12` maps points from the local frame of `other` to the local frame
    /// of `self`. The closure `callback` is called with the index of a triangle of `self` and the
    /// index of a triangle of `other`. It must run the exact test on that pair and return whether
    /// they actually intersect.
    ///
    /// The two trees are descended alternately, breadth-first. With
    /// [`TraversalMode::FirstContact`], the traversal stops as soon as `callback` returns `true`.
    ///
    /// Returns `true` if `callback` returned `true` at least once.
    pub fn traverse_pairs(
        &self,
        other: &BvTree,
        pos12: &Isometry<Real>,
        mode: TraversalMode,
        callback: &mut impl FnMut(u32, u32) -> bool,
    ) -> bool {
        let (Some(root1), Some(root2)) = (self.root(), other.root()) else {
            return false;
        };

        if !root1.volume.intersects_with_transform(&root2.volume, pos12) {
            return false;
        }

        let pos21 = pos12.inverse();
        let mut found = false;
        // Each entry is `(node_a, node_b, reversed)`. If `reversed` is false, `node_a` belongs
        // to `self` and `node_b` to `other`.
        let mut queue = VecDeque::new();
        queue.push_back((Self::ROOT, Self::ROOT, false));

        while let Some((a, b, reversed)) = queue.pop_front() {
            let (tree_a, tree_b, pos_ab, pos_ba) = if reversed {
                (other, self, &pos21, pos12)
            } else {
                (self, other, pos12, &pos21)
            };
            let node_a = tree_a.node(a);
            let node_b = tree_b.node(b);

            match (node_a.is_leaf(), node_b.is_leaf()) {
                (true, true) => {
                    for tri_a in &node_a.triangles {
                        for tri_b in &node_b.triangles {
                            let (tri1, tri2) = if reversed {
                                (*tri_b, *tri_a)
                            } else {
                                (*tri_a, *tri_b)
                            };

                            if callback(tri1, tri2) {
                                found = true;

                                if mode == TraversalMode::FirstContact {
                                    return true;
                                }
                            }
                        }
                    }
                }
                (false, true) => {
                    for child in &node_a.children {
                        let child_volume = &tree_a.node(*child).volume;
                        if child_volume.intersects_with_transform(&node_b.volume, pos_ab) {
                            queue.push_back((*child, b, reversed));
                        }
                    }
                }
                (_, false) => {
                    for child in &node_b.children {
                        let child_volume = &tree_b.node(*child).volume;
                        if child_volume.intersects_with_transform(&node_a.volume, pos_ba) {
                            queue.push_back((*child, a, !reversed));
                        }
                    }
                }
            }
        }

        found
    }
}
