use std::{fmt::Debug, hash::Hash, ops::Add};

/// The kind of change a [Node] undergoes, as seen by its cost model.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Operation {
    /// Insert the [Node] as a child of `other`, or as the new root if there is no `other`.
    Insert,

    /// Delete the [Node], promoting its children to its parent.
    Delete,

    /// Replace the [Node]'s content by that of `other`.
    Rename,
}

/// An abstraction for the content of a tree node.
pub trait Node {
    /// The type of this [Node]'s transformation costs.
    ///
    /// The default value of this type is assumed to be the additive identity (i.e. _zero_).
    /// Costs below that are rejected.
    type Weight: Default + Copy + Ord + Add<Output = Self::Weight>;

    /// Returns the cost of transforming this [Node] through `operation`.
    ///
    /// * [Operation::Delete] is always called with `other` set to `None`;
    /// * [Operation::Insert] receives the parent this [Node] is inserted under, which is `None`
    ///   only for the root;
    /// * [Operation::Rename] receives the [Node] this one is turned into.
    fn cost(&self, operation: Operation, other: Option<&Self>) -> Self::Weight;
}

/// The [Weight][Node::Weight] of a [Tree]'s nodes.
pub type Weight<T> = <<T as Tree>::Node as Node>::Weight;

/// An abstraction for an ordered tree whose nodes are addressed by handles.
///
/// Handles identify nodes: two distinct nodes with equal content have distinct handles.
pub trait Tree {
    /// A handle to one of this [Tree]'s nodes.
    type Id: Copy + Eq + Hash + Debug;

    /// The content of this [Tree]'s nodes.
    type Node: Node;

    /// An ordered sequence of handles to a node's children.
    type Children<'c>: IntoIterator<Item = Self::Id>
    where
        Self: 'c;

    /// Returns the handle to the root.
    fn root(&self) -> Self::Id;

    /// Returns the content of a node.
    fn node(&self, id: Self::Id) -> &Self::Node;

    /// Returns the handle to a node's parent, or `None` for the root.
    fn parent(&self, id: Self::Id) -> Option<Self::Id>;

    /// Returns handles to a node's immediate children, in order.
    fn children(&self, id: Self::Id) -> Self::Children<'_>;

    /// Returns the 0-based position of `child` among the children of `parent`.
    fn position(&self, parent: Self::Id, child: Self::Id) -> Option<usize> {
        self.children(parent).into_iter().position(|c| c == child)
    }
}


#[cfg(test)]
pub(crate) use tests::{parse, Label, MockTree, Size};
