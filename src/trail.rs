use derive_more::From;
use std::ops::Add;

/// A handle to a [Trail] in [Trails].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, From)]
pub(crate) struct TrailId(usize);

impl TrailId {
    /// The empty forest aligned with the empty forest.
    pub(crate) const EMPTY: Self = TrailId(0);
}

/// The operation a [Trail] stands for, on postorder ids.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub(crate) enum Step {
    Empty,
    Delete(usize),
    Insert(usize),
    Rename(usize, usize),

    /// A pair of whole subtrees, solved by the [Trail] in `tree`.
    Subtree,
}

/// One step of a partial solution, linked to the rest of it.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) struct Trail<W> {
    pub(crate) step: Step,
    pub(crate) cost: W,
    pub(crate) next: Option<TrailId>,
    pub(crate) tree: Option<TrailId>,
    total: W,
}

/// An append-only table of the [Trail]s along one solution.
#[derive(Debug, Clone)]
pub(crate) struct Trails<W> {
    trails: Vec<Trail<W>>,
}

impl<W: Default + Copy + Add<Output = W>> Trails<W> {
    pub(crate) fn new() -> Self {
        Trails {
            trails: vec![Trail {
                step: Step::Empty,
                cost: W::default(),
                next: None,
                tree: None,
                total: W::default(),
            }],
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.trails.len()
    }

    pub(crate) fn get(&self, id: TrailId) -> &Trail<W> {
        &self.trails[id.0]
    }

    /// The total cost of the [Trail] `id`, without walking its links.
    pub(crate) fn total(&self, id: TrailId) -> W {
        self.trails[id.0].total
    }

    /// The total cost a [Trail] would have if it were pushed.
    pub(crate) fn estimate(&self, cost: W, next: Option<TrailId>, tree: Option<TrailId>) -> W {
        [next, tree]
            .into_iter()
            .flatten()
            .fold(cost, |w, id| w + self.total(id))
    }

    pub(crate) fn push(
        &mut self,
        step: Step,
        cost: W,
        next: Option<TrailId>,
        tree: Option<TrailId>,
    ) -> TrailId {
        let total = self.estimate(cost, next, tree);
        let id = self.trails.len().into();
        self.trails.push(Trail {
            step,
            cost,
            next,
            tree,
            total,
        });
        id
    }

    /// Walks the [Trail]s reachable from `id`, subtrees before the rest of the forest.
    pub(crate) fn walk(&self, id: TrailId) -> impl Iterator<Item = &Trail<W>> + '_ {
        let mut stack = vec![id];
        std::iter::from_fn(move || {
            let trail = self.get(stack.pop()?);
            stack.extend(trail.next);
            stack.extend(trail.tree);
            Some(trail)
        })
    }
}
