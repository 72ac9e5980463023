use crate::distance::{Costs, Indexed};
use crate::trail::{Step, TrailId, Trails};
use crate::tracing_macros::trace;
use crate::{Arena, Edit, Error, NodeId, Tree};
use itertools::Itertools;
use std::ops::Add;

/// Turns the solution rooted at `root` into an ordered edit script.
///
/// Deletes come first, in postorder, then a new root if the old one doesn't survive, then every
/// node of `b` in preorder, either renamed from its counterpart in `a` or inserted. Positions are
/// found by replaying the script on a copy of `a` whose nodes hold their postorder id in `b`.
pub(crate) fn script<T, W>(
    a: &Indexed<T>,
    b: &Indexed<T>,
    costs: &Costs<W>,
    trails: &Trails<W>,
    root: TrailId,
) -> Result<Box<[Edit<T::Id, W>]>, Error<T::Id>>
where
    T: Tree,
    W: Default + Copy + Ord + Add<Output = W>,
{
    let mut into = vec![None; a.len()];
    let mut from = vec![None; b.len()];

    for trail in trails.walk(root) {
        if let Step::Rename(x, y) = trail.step {
            into[x] = Some(y);
            from[y] = Some(x);
        }
    }

    let inconsistent = |_: Error<NodeId>| Error::Inconsistent;

    let mut shadow = Arena::new(into[a.root()]);
    let mut of1 = vec![shadow.root(); a.len()];
    let mut stack = vec![a.root()];
    while let Some(x) = stack.pop() {
        for c in a.tree.children(a.id(x)) {
            let c = a.postorder[c];
            of1[c] = shadow.push(of1[x], into[c]);
            stack.push(c);
        }
    }

    let mut edits = Vec::with_capacity(a.len() + b.len());

    for x in (0..a.root()).filter(|&x| into[x].is_none()) {
        shadow.remove(of1[x]).map_err(inconsistent)?;
        edits.push(Edit::Delete {
            node: a.id(x),
            cost: costs.delete[x],
        });
    }

    let mut of2 = vec![None; b.len()];

    if from[b.root()].is_none() {
        let id = shadow.insert(None, 0, 1, Some(b.root())).map_err(inconsistent)?;
        of2[b.root()] = Some(id);
        edits.push(Edit::NestedInsert {
            node: b.id(b.root()),
            parent: None,
            position: 0,
            siblings: 1,
            cost: costs.insert[b.root()],
        });
    }

    if into[a.root()].is_none() {
        shadow.remove(of1[a.root()]).map_err(inconsistent)?;
        edits.push(Edit::Delete {
            node: a.id(a.root()),
            cost: costs.delete[a.root()],
        });
    }

    let mut stack = vec![b.root()];
    while let Some(y) = stack.pop() {
        let children = b.tree.children(b.id(y)).into_iter().collect_vec();
        stack.extend(children.into_iter().rev().map(|c| b.postorder[c]));

        if let Some(x) = from[y] {
            of2[y] = Some(of1[x]);
            edits.push(Edit::Rename {
                node: a.id(x),
                into: b.id(y),
                cost: costs.rename[(x, y)],
            });

            continue;
        }

        let Some(p) = b.parent(y) else {
            continue;
        };

        let parent = of2[p].ok_or(Error::Inconsistent)?;

        // children of `parent` that map to nodes before `y`, then to descendants of `y`
        let lmld = b.lmld[y];
        let mut images = shadow.children(parent).map(|c| shadow[c]).peekable();
        let position = images.peeking_take_while(|i| i.is_some_and(|i| i < lmld)).count();
        let siblings = images.take_while(|i| i.is_some_and(|i| i < y)).count();

        trace!(node = y, parent = p, position, siblings, "insert");

        let id = shadow
            .insert(Some(parent), position, siblings, Some(y))
            .map_err(inconsistent)?;

        of2[y] = Some(id);

        let (node, parent, cost) = (b.id(y), Some(b.id(p)), costs.insert[y]);
        edits.push(match siblings {
            0 => Edit::Insert {
                node,
                parent,
                position,
                cost,
            },
            _ => Edit::NestedInsert {
                node,
                parent,
                position,
                siblings,
                cost,
            },
        });
    }

    Ok(edits.into())
}

#[cfg(test)]
mod tests {
    use crate::{apply, diff, parse, Edit, MockTree};
    use assert_matches::assert_matches;
    use test_strategy::proptest;

    fn shape<I, W>(edits: &[Edit<I, W>]) -> String {
        edits
            .iter()
            .map(|e| match e {
                Edit::Insert { .. } => 'i',
                Edit::NestedInsert { .. } => 'n',
                Edit::Delete { .. } => 'd',
                Edit::Rename { .. } => 'r',
            })
            .collect()
    }

    #[test]
    fn deletes_come_first_and_renames_follow_the_target_in_preorder() {
        let (a, b) = (parse("A(B(C),D)"), parse("A(C,E(D))"));
        let (e, c) = diff(&a, &b).unwrap();
        assert_eq!(c, 2);
        assert_eq!(shape(&e), "drrnr");
        assert_eq!(apply(&a, &b, &e).unwrap(), b);
    }

    #[test]
    fn a_new_root_adopts_the_old_one() {
        let (a, b) = (parse("A(B)"), parse("R(A(B))"));
        let (e, c) = diff(&a, &b).unwrap();
        assert_eq!(c, 1);
        assert_matches!(
            &e[0],
            &Edit::NestedInsert {
                parent: None,
                position: 0,
                siblings: 1,
                ..
            }
        );

        assert_eq!(shape(&e), "nrr");
        assert_eq!(apply(&a, &b, &e).unwrap(), b);
    }

    #[test]
    fn an_old_root_is_deleted_after_the_new_one_is_in_place() {
        let (a, b) = (parse("R(A(B))"), parse("A(B)"));
        let (e, _) = diff(&a, &b).unwrap();
        assert_eq!(shape(&e), "drr");
        assert_matches!(e[0], Edit::Delete { node, .. } if node == a.root());
        assert_eq!(apply(&a, &b, &e).unwrap(), b);
    }

    #[test]
    fn replacing_the_whole_tree_swaps_roots() {
        let (a, b) = (parse("A"), parse("B(C)"));
        let (e, c) = diff(&a, &b).unwrap();
        assert_eq!(c, 2);
        assert_eq!(apply(&a, &b, &e).unwrap(), b);
    }

    #[test]
    fn inserts_land_between_existing_siblings() {
        let (a, b) = (parse("R(A,C)"), parse("R(A,B,C)"));
        let (e, c) = diff(&a, &b).unwrap();
        assert_eq!(c, 1);
        assert_matches!(
            e.iter().find(|e| matches!(e, Edit::Insert { .. })),
            Some(&Edit::Insert {
                position: 1,
                parent: Some(p),
                ..
            }) if p == b.root()
        );
    }

    #[proptest]
    fn every_script_turns_one_tree_into_the_other(a: MockTree, b: MockTree) {
        let (a, b) = (a.arena(), b.arena());
        let (e, _) = diff(&a, &b).unwrap();
        assert_eq!(apply(&a, &b, &e).unwrap(), b);
    }

    #[proptest]
    fn deletes_precede_everything_else(a: MockTree, b: MockTree) {
        let (a, b) = (a.arena(), b.arena());
        let (e, _) = diff(&a, &b).unwrap();
        let shape = shape(&e);
        let first = shape.trim_start_matches('d');
        let rest = first.strip_prefix("nd").or(first.strip_prefix('n')).unwrap_or(first);
        assert!(!rest.contains('d'), "{shape}");
    }
}
