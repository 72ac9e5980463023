use crate::{Postorder, Tree};
use itertools::Itertools;

/// Finds the keyroots of a [Tree], sorted by postorder id.
///
/// A keyroot is either the root or a node with an elder sibling. Equivalently, it is the highest
/// node among those sharing a leftmost leaf descendant.
pub fn keyroots<T: Tree>(tree: &T, postorder: &Postorder<T::Id>) -> Box<[T::Id]> {
    let mut keyroots = Vec::new();
    collect(tree, tree.root(), &mut Vec::new(), &mut keyroots);
    keyroots
        .into_iter()
        .sorted_unstable_by_key(|&k| postorder[k])
        .collect()
}

// Each first-child chain ends at a leaf and contributes the node it started from.
fn collect<T: Tree>(tree: &T, node: T::Id, chain: &mut Vec<T::Id>, keyroots: &mut Vec<T::Id>) {
    let mut children = tree.children(node).into_iter();

    match children.next() {
        None => keyroots.push(chain.first().copied().unwrap_or(node)),
        Some(first) => {
            chain.push(node);
            collect(tree, first, chain, keyroots);
            for c in children {
                collect(tree, c, &mut Vec::new(), keyroots);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{leftmost_leaf_descendants, parse, postorder, MockTree};
    use std::collections::HashSet;
    use test_strategy::proptest;

    #[test]
    fn keyroots_are_the_root_and_nodes_with_elder_siblings() {
        let t = parse("A(B(C),D,E(F))");
        let p = postorder(&t).unwrap();
        let k: Vec<_> = keyroots(&t, &p).iter().map(|&k| p[k]).collect();
        assert_eq!(k, [2, 4, 5]);
    }

    #[test]
    fn a_chain_has_a_single_keyroot() {
        let t = parse("A(B(C(D)))");
        let p = postorder(&t).unwrap();
        assert_eq!(&*keyroots(&t, &p), &[t.root()]);
    }

    #[proptest]
    fn there_is_one_keyroot_per_younger_sibling_plus_the_root(t: MockTree) {
        let a = t.arena();
        let p = postorder(&a).unwrap();
        let k = keyroots(&a, &p);

        let younger = a
            .descendants(a.root())
            .filter(|&id| a.parent(id).and_then(|q| a.position(q, id)) > Some(0))
            .count();

        assert_eq!(k.len(), younger + 1);
        assert_eq!(k.last(), Some(&a.root()));
    }

    #[proptest]
    fn keyroots_are_sorted(t: MockTree) {
        let a = t.arena();
        let p = postorder(&a).unwrap();
        let k = keyroots(&a, &p);
        assert!(k.windows(2).all(|w| p[w[0]] < p[w[1]]));
    }

    #[proptest]
    fn keyroots_have_distinct_leftmost_leaves(t: MockTree) {
        let a = t.arena();
        let p = postorder(&a).unwrap();
        let lmld = leftmost_leaf_descendants(&a, &p);
        let k = keyroots(&a, &p);

        let leaves: HashSet<_> = k.iter().map(|&k| lmld[p[k]]).collect();
        assert_eq!(leaves.len(), k.len());

        // every node shares its leftmost leaf with a keyroot at or above it
        for id in a.descendants(a.root()) {
            assert!(k.iter().any(|&k| lmld[p[k]] == lmld[p[id]] && p[k] >= p[id]));
        }
    }
}
