use crate::{Error, Tree};
use std::collections::{hash_map::Entry, HashMap};
use std::{hash::Hash, ops::Index};

/// A bijection between the nodes of a [Tree] and `0..n`, numbered in postorder.
///
/// Every node is numbered after all of its descendants, so the root is always `n - 1`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Postorder<I: Eq + Hash> {
    nodes: Box<[I]>,
    ids: HashMap<I, usize>,
}

impl<I: Copy + Eq + Hash> Postorder<I> {
    /// The number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`, every tree has a root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The postorder id of `node`, if it belongs to the tree.
    pub fn id(&self, node: I) -> Option<usize> {
        self.ids.get(&node).copied()
    }

    /// The node numbered `id`.
    pub fn node(&self, id: usize) -> I {
        self.nodes[id]
    }

    /// Iterates over the nodes in postorder.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = I> + '_ {
        self.nodes.iter().copied()
    }
}

impl<I: Copy + Eq + Hash> Index<I> for Postorder<I> {
    type Output = usize;

    fn index(&self, node: I) -> &usize {
        &self.ids[&node]
    }
}

/// Numbers the nodes of a [Tree] in postorder, children left to right before their parent.
///
/// Also checks that the [Tree] is what it claims to be: every node is reachable once, reports the
/// node it is listed under as its parent and is found at its actual position by
/// [position][Tree::position].
pub fn postorder<T: Tree>(tree: &T) -> Result<Postorder<T::Id>, Error<T::Id>> {
    let root = tree.root();
    if let Some(p) = tree.parent(root) {
        return Err(Error::ParentMismatch {
            node: root,
            reported: Some(p),
            actual: None,
        });
    }

    let mut nodes = Vec::new();
    let mut ids = HashMap::from([(root, usize::MAX)]);
    let mut stack = vec![(root, 0, tree.children(root).into_iter())];

    while let Some((parent, position, children)) = stack.last_mut() {
        let parent = *parent;
        let Some(child) = children.next() else {
            ids.insert(parent, nodes.len());
            nodes.push(parent);
            stack.pop();
            continue;
        };

        let expected = *position;
        *position += 1;

        match ids.entry(child) {
            Entry::Occupied(_) => return Err(Error::Revisited(child)),
            Entry::Vacant(e) => e.insert(usize::MAX),
        };

        match tree.parent(child) {
            Some(p) if p == parent => {}
            reported => {
                return Err(Error::ParentMismatch {
                    node: child,
                    reported,
                    actual: Some(parent),
                })
            }
        }

        match tree.position(parent, child) {
            Some(p) if p == expected => {}
            found => {
                return Err(Error::PositionMismatch {
                    parent,
                    child,
                    expected,
                    found,
                })
            }
        }

        stack.push((child, 0, tree.children(child).into_iter()));
    }

    Ok(Postorder {
        nodes: nodes.into(),
        ids,
    })
}
