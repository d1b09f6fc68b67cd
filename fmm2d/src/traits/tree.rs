//! Tree Traits

/// Interface for nodes of a uniform quaternary tree, addressed by level and Morton index.
pub trait TreeNode
where
    Self: Sized,
{
    /// The level of this node, the root is at level 0.
    fn level(&self) -> u64;

    /// Morton index of this node within its level.
    fn raw(&self) -> u64;

    /// Parent of this node, `None` for the root.
    fn parent(&self) -> Option<Self>;

    /// The four children of this node, in sequential Morton order.
    fn children(&self) -> Vec<Self>;

    /// All nodes at the same level adjacent to this node, filtering out those outside of the domain.
    fn neighbors(&self) -> Vec<Self>;

    /// Nodes at the same level which are well separated from this node, but whose parents are adjacent
    /// to this node's parent.
    fn interaction_list(&self) -> Vec<Self>;
}
