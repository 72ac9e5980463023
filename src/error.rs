use crate::Operation;
use thiserror::Error;

/// Reasons a tree or an edit script cannot be processed.
///
/// All of these point at a bug in the caller's [Tree][crate::Tree] implementation, cost model or
/// script, so none of them is worth retrying.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum Error<I> {
    /// The node is reachable more than once, so the structure is not a tree.
    #[error("node {0:?} is reachable more than once")]
    Revisited(I),

    /// The node's parent back-reference disagrees with the children lists.
    #[error("node {node:?} reports parent {reported:?}, but is a child of {actual:?}")]
    ParentMismatch {
        node: I,
        reported: Option<I>,
        actual: Option<I>,
    },

    /// The position reported for a child disagrees with the children lists.
    #[error("child {child:?} of {parent:?} is at position {expected}, but reported at {found:?}")]
    PositionMismatch {
        parent: I,
        child: I,
        expected: usize,
        found: Option<usize>,
    },

    /// The cost model returned a cost below zero.
    #[error("negative cost for {operation:?} of node {node:?}")]
    NegativeCost { operation: Operation, node: I },

    /// The tree reported a structure different from the one it was indexed with.
    #[error("the tree changed while it was being compared")]
    Inconsistent,

    /// The node does not belong to the tree.
    #[error("node {0:?} does not exist")]
    UnknownNode(I),

    /// No node has taken the place of this one yet.
    #[error("parent {0:?} has not been inserted or renamed into yet")]
    Unresolved(I),

    /// The insertion range does not fit within the parent's children.
    #[error("cannot insert at {position} adopting {siblings} of the {len} children of {parent:?}")]
    OutOfRange {
        parent: I,
        position: usize,
        siblings: usize,
        len: usize,
    },

    /// Removing the root would leave a forest or nothing at all.
    #[error("cannot remove root {node:?} with {children} children")]
    RootRemoval { node: I, children: usize },

    /// A new root must adopt exactly the old root.
    #[error("a new root must be inserted at 0 adopting 1 node, not at {position} adopting {siblings}")]
    RootInsertion { position: usize, siblings: usize },
}
