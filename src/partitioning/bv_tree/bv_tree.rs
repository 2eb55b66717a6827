use crate::bounding_volume::{BoundingVolumeKind, BoundingVolumeType};
use crate::math::{Real, NEAR_ZERO};
use smallvec::SmallVec;

/// Options controlling the construction of a [`BvTree`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct BvTreeOptions {
    /// The kind of bounding volume enclosing each node.
    pub kind: BoundingVolumeType,
    /// The maximum number of triangles stored in a leaf.
    pub max_leaf_triangles: usize,
    /// A margin by which every node volume is enlarged.
    pub margin: Real,
}

impl Default for BvTreeOptions {
    fn default() -> Self {
        Self {
            kind: BoundingVolumeType::Obb,
            max_leaf_triangles: 1,
            margin: NEAR_ZERO,
        }
    }
}

/// Controls when a traversal of two trees stops.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum TraversalMode {
    /// Stop as soon as one pair of intersecting triangles is found.
    FirstContact,
    /// Report every pair of intersecting triangles.
    #[default]
    AllContacts,
}

/// A node of a [`BvTree`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct BvNode {
    /// The volume enclosing every triangle of this node subtree.
    pub volume: BoundingVolumeKind,
    /// Indices of the children nodes. Empty for leaves.
    pub children: SmallVec<[u32; 2]>,
    /// Indices of the mesh triangles stored in this node. Empty for internal nodes.
    pub triangles: Vec<u32>,
}

impl BvNode {
    pub(super) fn placeholder() -> Self {
        Self {
            volume: BoundingVolumeKind::PassThrough,
            children: SmallVec::new(),
            triangles: Vec::new(),
        }
    }

    /// Is this node a leaf?
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A bounding volume hierarchy over the triangles of a mesh.
///
/// The nodes are stored in an arena and addressed by their `u32` index. The root has index 0.
/// All the volumes are expressed in the local frame of the mesh.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct BvTree {
    pub(super) nodes: Vec<BvNode>,
}

impl BvTree {
    /// The index of the root node.
    pub const ROOT: u32 = 0;

    /// The root of this tree, if it isn’t empty.
    #[inline]
    pub fn root(&self) -> Option<&BvNode> {
        self.nodes.first()
    }

    /// The `i`-th node of this tree.
    #[inline]
    pub fn node(&self, i: u32) -> &BvNode {
        &self.nodes[i as usize]
    }

    /// All the nodes of this tree.
    #[inline]
    pub fn nodes(&self) -> &[BvNode] {
        &self.nodes
    }

    /// Does this tree contain no node at all?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// An iterator through the leaves of this tree.
    pub fn leaves(&self) -> impl Iterator<Item = &BvNode> + '_ {
        self.nodes.iter().filter(|node| node.is_leaf())
    }
}
