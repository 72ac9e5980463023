use crate::{Cost, Operation};

/// A single operation of an edit script.
///
/// `I` is a handle to a tree node: deletes and renames refer to nodes of the tree being edited,
/// inserts to nodes of the tree it is being turned into. Positions only make sense once every
/// earlier [Edit] of the same script has been applied.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Edit<I, W> {
    /// Insert a copy of `node` as a leaf at `position` among the children of whatever stands for
    /// `parent`.
    ///
    /// A leaf cannot become the root, so this only applies without a `parent` as a
    /// [Edit::NestedInsert].
    Insert {
        node: I,
        parent: Option<I>,
        position: usize,
        cost: W,
    },

    /// Like [Edit::Insert], but the `siblings` children from `position` onwards become children of
    /// the inserted node.
    ///
    /// A new root always adopts the old root.
    NestedInsert {
        node: I,
        parent: Option<I>,
        position: usize,
        siblings: usize,
        cost: W,
    },

    /// Remove `node`, moving its children to its place.
    Delete { node: I, cost: W },

    /// Replace the content of `node` by that of `into`.
    ///
    /// Every node kept by the script is renamed, if only to an equal node at no cost.
    Rename { node: I, into: I, cost: W },
}

impl<I: Copy, W> Edit<I, W> {
    /// The [Operation] the cost of this [Edit] was computed for.
    pub fn operation(&self) -> Operation {
        match self {
            Edit::Insert { .. } | Edit::NestedInsert { .. } => Operation::Insert,
            Edit::Delete { .. } => Operation::Delete,
            Edit::Rename { .. } => Operation::Rename,
        }
    }

    /// The node this [Edit] is about.
    pub fn node(&self) -> I {
        match *self {
            Edit::Insert { node, .. }
            | Edit::NestedInsert { node, .. }
            | Edit::Delete { node, .. }
            | Edit::Rename { node, .. } => node,
        }
    }
}

impl<I, W: Copy> Cost for Edit<I, W> {
    type Output = W;

    #[inline]
    fn cost(&self) -> Self::Output {
        match *self {
            Edit::Insert { cost, .. }
            | Edit::NestedInsert { cost, .. }
            | Edit::Delete { cost, .. }
            | Edit::Rename { cost, .. } => cost,
        }
    }
}
