use crate::{Error, Node, Tree};
use std::fmt::{self, Display};
use std::ops::{Index, IndexMut};

pub use indextree::NodeId;

/// An ordered tree whose nodes live in an [indextree::Arena].
///
/// A [NodeId] stays invalid once its node is removed, even if the arena later reuses its slot.
/// Indexing with a [NodeId] that was never issued by this arena panics.
///
/// # Example
///
/// ```rust
/// use zhang_shasha::Arena;
///
/// let mut tree = Arena::new('a');
/// let b = tree.push(tree.root(), 'b');
/// tree.push(b, 'c');
/// tree.push(tree.root(), 'd');
///
/// assert_eq!(tree.to_string(), "a(b(c),d)");
///
/// tree.remove(b)?;
/// assert_eq!(tree.to_string(), "a(c,d)");
/// # Ok::<_, zhang_shasha::Error<zhang_shasha::NodeId>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Arena<N> {
    arena: indextree::Arena<N>,
    root: NodeId,
}

impl<N> Arena<N> {
    /// Creates a tree made of a single root node.
    pub fn new(value: N) -> Self {
        let mut arena = indextree::Arena::new();
        let root = arena.new_node(value);
        Arena { arena, root }
    }

    /// The handle to the root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The number of nodes in the tree.
    pub fn count(&self) -> usize {
        self.descendants(self.root).count()
    }

    /// Whether `id` refers to a node currently in the tree.
    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.get(id).is_some() && !id.is_removed(&self.arena)
    }

    /// The content of a node, if it is in the tree.
    pub fn get(&self, id: NodeId) -> Option<&N> {
        match self.contains(id) {
            true => Some(self.arena[id].get()),
            false => None,
        }
    }

    /// The content of a node, if it is in the tree.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut N> {
        match self.contains(id) {
            true => Some(self.arena[id].get_mut()),
            false => None,
        }
    }

    /// The handle to a node's parent, or `None` for the root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena[id].parent()
    }

    /// Handles to a node's children, in order.
    pub fn children(&self, id: NodeId) -> indextree::Children<'_, N> {
        id.children(&self.arena)
    }

    /// The 0-based position of `child` among the children of `parent`.
    pub fn position(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.children(parent).position(|c| c == child)
    }

    /// Appends a new node as the last child of `parent`.
    pub fn push(&mut self, parent: NodeId, value: N) -> NodeId {
        let id = self.arena.new_node(value);
        parent.append(id, &mut self.arena);
        id
    }

    /// Inserts a new node at `position` among the children of `parent`.
    ///
    /// The `siblings` children found from `position` onwards become the new node's children, in
    /// order. Without a `parent` the new node becomes the root and adopts the current root, which
    /// requires `position == 0` and `siblings == 1`.
    pub fn insert(
        &mut self,
        parent: Option<NodeId>,
        position: usize,
        siblings: usize,
        value: N,
    ) -> Result<NodeId, Error<NodeId>> {
        let Some(parent) = parent else {
            if (position, siblings) != (0, 1) {
                return Err(Error::RootInsertion { position, siblings });
            }

            let id = self.arena.new_node(value);
            id.append(self.root, &mut self.arena);
            self.root = id;
            return Ok(id);
        };

        if !self.contains(parent) {
            return Err(Error::UnknownNode(parent));
        }

        let children: Vec<_> = self.children(parent).collect();
        let len = children.len();
        if position + siblings > len {
            return Err(Error::OutOfRange {
                parent,
                position,
                siblings,
                len,
            });
        }

        let id = self.arena.new_node(value);
        match children.get(position) {
            Some(&next) => next.insert_before(id, &mut self.arena),
            None => parent.append(id, &mut self.arena),
        }

        for &c in &children[position..position + siblings] {
            c.detach(&mut self.arena);
            id.append(c, &mut self.arena);
        }

        Ok(id)
    }

    /// Removes a node, moving its children to its place among its parent's children.
    ///
    /// The root may only be removed when it has exactly one child, which becomes the new root.
    pub fn remove(&mut self, id: NodeId) -> Result<(), Error<NodeId>> {
        if !self.contains(id) {
            return Err(Error::UnknownNode(id));
        }

        if id == self.root {
            let mut children = self.children(id);
            let (Some(child), None) = (children.next(), children.next()) else {
                return Err(Error::RootRemoval {
                    node: id,
                    children: self.children(id).count(),
                });
            };

            child.detach(&mut self.arena);
            self.root = child;
        }

        id.remove(&mut self.arena);
        Ok(())
    }

    /// Handles to `id` and all of its descendants, parents before children and siblings left to
    /// right.
    pub fn descendants(&self, id: NodeId) -> indextree::Descendants<'_, N> {
        id.descendants(&self.arena)
    }

    /// Replaces the content of a node, returning the previous one.
    pub fn rename(&mut self, id: NodeId, value: N) -> Result<N, Error<NodeId>> {
        let slot = self.get_mut(id).ok_or(Error::UnknownNode(id))?;
        Ok(std::mem::replace(slot, value))
    }

    fn eq_at(&self, a: NodeId, other: &Self, b: NodeId) -> bool
    where
        N: PartialEq,
    {
        self[a] == other[b]
            && self.children(a).count() == other.children(b).count()
            && self
                .children(a)
                .zip(other.children(b))
                .all(|(c, d)| self.eq_at(c, other, d))
    }

    fn fmt_at(&self, id: NodeId, f: &mut fmt::Formatter<'_>) -> fmt::Result
    where
        N: Display,
    {
        write!(f, "{}", self[id])?;
        if self.children(id).next().is_some() {
            write!(f, "(")?;
            for (i, c) in self.children(id).enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                self.fmt_at(c, f)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl<N> Index<NodeId> for Arena<N> {
    type Output = N;

    fn index(&self, id: NodeId) -> &N {
        self.arena[id].get()
    }
}

impl<N> IndexMut<NodeId> for Arena<N> {
    fn index_mut(&mut self, id: NodeId) -> &mut N {
        self.arena[id].get_mut()
    }
}

/// Two [Arena]s are equal if they have the same shape and content, regardless of handles.
impl<N: PartialEq> PartialEq for Arena<N> {
    fn eq(&self, other: &Self) -> bool {
        self.eq_at(self.root, other, other.root)
    }
}

impl<N: Eq> Eq for Arena<N> {}

/// Renders the tree as `root(child(grandchild),child)`.
impl<N: Display> Display for Arena<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_at(self.root, f)
    }
}

impl<N: Node> Tree for Arena<N> {
    type Id = NodeId;
    type Node = N;
    type Children<'c> = indextree::Children<'c, N>
    where
        Self: 'c;

    fn root(&self) -> NodeId {
        self.root
    }

    fn node(&self, id: NodeId) -> &N {
        &self[id]
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena[id].parent()
    }

    fn children(&self, id: NodeId) -> Self::Children<'_> {
        id.children(&self.arena)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse, Label, MockTree};
    use assert_matches::assert_matches;
    use test_strategy::proptest;

    fn child<N>(t: &Arena<N>, i: usize) -> NodeId {
        t.children(t.root()).nth(i).unwrap()
    }

    #[test]
    fn removing_splices_children_into_place() {
        let mut t = parse("A(B,C(D,E),F)");
        let c = child(&t, 1);
        t.remove(c).unwrap();
        assert_eq!(t.to_string(), "A(B,D,E,F)");
        assert!(!t.contains(c));
        assert_eq!(t.count(), 5);

        for d in t.children(t.root()) {
            assert_eq!(t.parent(d), Some(t.root()));
        }
    }

    #[test]
    fn removing_a_leaf_drops_it() {
        let mut t = parse("A(B,C)");
        let b = child(&t, 0);
        t.remove(b).unwrap();
        assert_eq!(t, parse("A(C)"));
    }

    #[test]
    fn removing_the_root_promotes_its_only_child() {
        let mut t = parse("A(B(C,D))");
        let a = t.root();
        t.remove(a).unwrap();
        assert_eq!(t.to_string(), "B(C,D)");
        assert_eq!(t.parent(t.root()), None);
        assert_eq!(t.count(), 3);
    }

    #[test]
    fn removing_the_root_of_a_forest_fails() {
        let mut t = parse("A(B,C)");
        let a = t.root();
        assert_matches!(t.remove(a), Err(Error::RootRemoval { children: 2, .. }));
        assert_eq!(t, parse("A(B,C)"));

        let mut t = parse("A");
        let a = t.root();
        assert_matches!(t.remove(a), Err(Error::RootRemoval { children: 0, .. }));
    }

    #[test]
    fn removing_twice_fails() {
        let mut t = parse("A(B)");
        let b = child(&t, 0);
        t.remove(b).unwrap();
        assert_eq!(t.remove(b), Err(Error::UnknownNode(b)));
    }

    #[test]
    fn removed_handles_stay_invalid_after_inserting() {
        let mut t = parse("A(B)");
        let b = child(&t, 0);
        t.remove(b).unwrap();
        t.push(t.root(), "C".into());

        assert!(!t.contains(b));
        assert_eq!(t.get(b), None);
        assert_eq!(t.rename(b, "X".into()), Err(Error::UnknownNode(b)));
        assert_eq!(t.to_string(), "A(C)");
    }

    #[test]
    fn inserting_adopts_the_following_siblings() {
        let mut t = parse("A(B,C,D,E)");
        let x = t.insert(Some(t.root()), 1, 2, "X".into()).unwrap();
        assert_eq!(t.to_string(), "A(B,X(C,D),E)");
        assert_eq!(t.position(t.root(), x), Some(1));

        for c in t.children(x) {
            assert_eq!(t.parent(c), Some(x));
        }
    }

    #[test]
    fn inserting_at_the_end_adopts_nothing() {
        let mut t = parse("A(B)");
        t.insert(Some(t.root()), 1, 0, "C".into()).unwrap();
        assert_eq!(t.to_string(), "A(B,C)");
    }

    #[test]
    fn inserting_at_the_end_may_adopt_the_last_children() {
        let mut t = parse("A(B,C)");
        t.insert(Some(t.root()), 0, 2, "X".into()).unwrap();
        assert_eq!(t.to_string(), "A(X(B,C))");
    }

    #[test]
    fn inserting_a_root_adopts_the_old_root() {
        let mut t = parse("A(B)");
        let x = t.insert(None, 0, 1, "X".into()).unwrap();
        assert_eq!(t.root(), x);
        assert_eq!(t.to_string(), "X(A(B))");
        assert_eq!(
            t.insert(None, 0, 0, "Y".into()),
            Err(Error::RootInsertion {
                position: 0,
                siblings: 0
            })
        );
    }

    #[test]
    fn inserting_out_of_range_fails() {
        let mut t = parse("A(B,C)");
        let root = t.root();
        assert_matches!(
            t.insert(Some(root), 1, 2, "X".into()),
            Err(Error::OutOfRange {
                position: 1,
                siblings: 2,
                len: 2,
                ..
            })
        );
        assert_eq!(t, parse("A(B,C)"));
    }

    #[test]
    fn renaming_keeps_the_structure() {
        let mut t = parse("A(B,C)");
        let b = child(&t, 0);
        assert_eq!(t.rename(b, "X".into()), Ok(Label::from("B")));
        assert_eq!(t.to_string(), "A(X,C)");
    }

    #[test]
    fn equality_ignores_handles() {
        let mut t = parse("A(X,B,C)");
        let x = child(&t, 0);
        t.remove(x).unwrap();
        assert_eq!(t, parse("A(B,C)"));
        assert_ne!(t, parse("A(C,B)"));
        assert_ne!(t, parse("A(B(C))"));
        assert_ne!(t, parse("A(B,C,D)"));
    }

    #[test]
    fn preorder_visits_parents_first() {
        let t = parse("A(B(C,D),E)");
        let labels: Vec<_> = t
            .descendants(t.root())
            .map(|id| t[id].to_string())
            .collect();
        assert_eq!(labels, ["A", "B", "C", "D", "E"]);
    }

    #[proptest]
    fn clones_are_equal(t: MockTree) {
        let a = t.arena();
        assert_eq!(a.clone(), a);
    }

    #[proptest]
    fn children_point_back_to_their_parent(t: MockTree) {
        let a = t.arena();
        for id in a.descendants(a.root()) {
            for c in a.children(id) {
                assert_eq!(a.parent(c), Some(id));
            }
        }
    }
}
