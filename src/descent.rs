use crate::{Postorder, Tree};

/// Finds the leftmost leaf descendant of every node in a [Tree].
///
/// The result is indexed by postorder id and holds postorder ids: following the first child from
/// the node numbered `i` down to a leaf ends at the node numbered `lmld[i]`.
pub fn leftmost_leaf_descendants<T: Tree>(tree: &T, postorder: &Postorder<T::Id>) -> Box<[usize]> {
    let mut lmld = vec![0; postorder.len()].into_boxed_slice();
    descend(tree, postorder, tree.root(), &mut Vec::new(), &mut lmld);
    lmld
}

// `chain` holds the ancestors reached through first children only since the last branching.
fn descend<T: Tree>(
    tree: &T,
    postorder: &Postorder<T::Id>,
    node: T::Id,
    chain: &mut Vec<usize>,
    lmld: &mut [usize],
) {
    let id = postorder[node];
    let mut children = tree.children(node).into_iter();

    match children.next() {
        None => {
            lmld[id] = id;
            for &a in chain.iter() {
                lmld[a] = id;
            }
        }

        Some(first) => {
            chain.push(id);
            descend(tree, postorder, first, chain, lmld);
            for c in children {
                descend(tree, postorder, c, &mut Vec::new(), lmld);
            }
        }
    }
}
