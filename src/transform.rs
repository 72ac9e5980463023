use crate::tracing_macros::trace;
use crate::{Arena, Edit, Error, NodeId};
use std::collections::HashMap;

/// Replays an edit script on a copy of `tree`.
///
/// Deletes and renames refer to nodes of `tree`, inserts to nodes of `target`, whose content is
/// copied over. The parent of an insert is a node of `target` that an earlier [Edit] of the script
/// must have renamed into or inserted.
///
/// # Example
///
/// ```rust
/// use zhang_shasha::{apply, Edit, Arena};
///
/// let mut a = Arena::new('a');
/// let b = a.push(a.root(), 'b');
///
/// let mut t = Arena::new('a');
/// let c = t.push(t.root(), 'c');
///
/// let script = [
///     Edit::Delete { node: b, cost: 1 },
///     Edit::Rename { node: a.root(), into: t.root(), cost: 0 },
///     Edit::Insert { node: c, parent: Some(t.root()), position: 0, cost: 1 },
/// ];
///
/// assert_eq!(apply(&a, &t, &script)?.to_string(), "a(c)");
/// # Ok::<_, zhang_shasha::Error<zhang_shasha::NodeId>>(())
/// ```
pub fn apply<N: Clone, W>(
    tree: &Arena<N>,
    target: &Arena<N>,
    script: &[Edit<NodeId, W>],
) -> Result<Arena<N>, Error<NodeId>> {
    let mut result = tree.clone();
    let mut resolved = HashMap::new();

    let copy = |node: NodeId| target.get(node).cloned().ok_or(Error::UnknownNode(node));

    for edit in script {
        trace!(node = ?edit.node(), operation = ?edit.operation(), "apply");

        match *edit {
            Edit::Delete { node, .. } => result.remove(node)?,

            Edit::Rename { node, into, .. } => {
                result.rename(node, copy(into)?)?;
                resolved.insert(into, node);
            }

            Edit::Insert {
                node,
                parent,
                position,
                ..
            } => {
                let parent = resolve(&resolved, parent)?;
                let id = result.insert(parent, position, 0, copy(node)?)?;
                resolved.insert(node, id);
            }

            Edit::NestedInsert {
                node,
                parent,
                position,
                siblings,
                ..
            } => {
                let parent = resolve(&resolved, parent)?;
                let id = result.insert(parent, position, siblings, copy(node)?)?;
                resolved.insert(node, id);
            }
        }
    }

    Ok(result)
}

fn resolve(
    resolved: &HashMap<NodeId, NodeId>,
    parent: Option<NodeId>,
) -> Result<Option<NodeId>, Error<NodeId>> {
    parent
        .map(|p| resolved.get(&p).copied().ok_or(Error::Unresolved(p)))
        .transpose()
}
