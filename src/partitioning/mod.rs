//! Spatial partitioning tools.

pub use self::bv_tree::{BvNode, BvTree, BvTreeOptions, TraversalMode};

mod bv_tree;
