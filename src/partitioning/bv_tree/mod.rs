pub use self::bv_tree::{BvNode, BvTree, BvTreeOptions, TraversalMode};

mod bv_tree;
mod bv_tree_build;
mod bv_tree_traverse;
