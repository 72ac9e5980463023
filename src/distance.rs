use crate::script::script;
use crate::trail::{Step, TrailId, Trails};
use crate::tracing_macros::{debug, trace};
use crate::{keyroots, leftmost_leaf_descendants, postorder};
use crate::{Cost, Edit, Error, Node, Operation, Postorder, Tree, Weight};
use arrayvec::ArrayVec;
use pathfinding::matrix::Matrix;
use std::ops::Add;

/// A [Tree] along with the tables derived from it, all keyed by postorder id.
pub(crate) struct Indexed<'t, T: Tree> {
    pub(crate) tree: &'t T,
    pub(crate) postorder: Postorder<T::Id>,
    pub(crate) lmld: Box<[usize]>,
    pub(crate) keyroots: Box<[usize]>,
}

impl<'t, T: Tree> Indexed<'t, T> {
    pub(crate) fn new(tree: &'t T) -> Result<Self, Error<T::Id>> {
        let postorder = postorder(tree)?;
        let lmld = leftmost_leaf_descendants(tree, &postorder);
        let keyroots = keyroots(tree, &postorder)
            .iter()
            .map(|&k| postorder[k])
            .collect();

        Ok(Indexed {
            tree,
            postorder,
            lmld,
            keyroots,
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.postorder.len()
    }

    pub(crate) fn root(&self) -> usize {
        self.len() - 1
    }

    pub(crate) fn id(&self, id: usize) -> T::Id {
        self.postorder.node(id)
    }

    pub(crate) fn node(&self, id: usize) -> &T::Node {
        self.tree.node(self.id(id))
    }

    pub(crate) fn parent(&self, id: usize) -> Option<usize> {
        let parent = self.tree.parent(self.id(id))?;
        Some(self.postorder[parent])
    }
}

/// The cost of every operation the algorithm may choose from.
pub(crate) struct Costs<W> {
    pub(crate) delete: Box<[W]>,
    pub(crate) insert: Box<[W]>,
    pub(crate) rename: Matrix<W>,
}

fn checked<I, W: Default + Ord>(cost: W, operation: Operation, node: I) -> Result<W, Error<I>> {
    if cost < W::default() {
        Err(Error::NegativeCost { operation, node })
    } else {
        Ok(cost)
    }
}

impl<W: Default + Copy + Ord> Costs<W> {
    fn new<T>(a: &Indexed<T>, b: &Indexed<T>) -> Result<Self, Error<T::Id>>
    where
        T: Tree,
        T::Node: Node<Weight = W>,
    {
        use Operation::*;

        let delete = (0..a.len())
            .map(|x| checked(a.node(x).cost(Delete, None), Delete, a.id(x)))
            .collect::<Result<_, _>>()?;

        let insert = (0..b.len())
            .map(|y| {
                let parent = b.parent(y).map(|p| b.node(p));
                checked(b.node(y).cost(Insert, parent), Insert, b.id(y))
            })
            .collect::<Result<_, _>>()?;

        let mut rename = Matrix::new(a.len(), b.len(), W::default());
        for x in 0..a.len() {
            for y in 0..b.len() {
                let cost = a.node(x).cost(Rename, Some(b.node(y)));
                rename[(x, y)] = checked(cost, Rename, a.id(x))?;
            }
        }

        Ok(Costs {
            delete,
            insert,
            rename,
        })
    }
}

#[derive(Debug, Copy, Clone)]
struct Candidate<W> {
    step: Step,
    cost: W,
    // the cell this step comes from
    next: (usize, usize),
    // the pair of whole subtrees this step skips over
    tree: Option<(usize, usize)>,
    total: W,
}

/// The dynamic program shared by all pairs of keyroots.
///
/// Only distances are kept across pairs. Paths are recovered afterwards by solving again the few
/// forests they go through.
struct Engine<'c, W> {
    lmld: (&'c [usize], &'c [usize]),
    costs: &'c Costs<W>,
    // the distance between every pair of whole subtrees solved so far
    trees: Matrix<W>,
}

impl<'c, W: Default + Copy + Ord + Add<Output = W>> Engine<'c, W> {
    /// The cheapest way to reach cell `(i, j)` of the forest grid starting at leaves `l`.
    fn best(
        &self,
        forest: &Matrix<W>,
        l: (usize, usize),
        (i, j): (usize, usize),
    ) -> Option<Candidate<W>> {
        let (lmld1, lmld2) = self.lmld;
        let x = i.checked_sub(1).map(|d| l.0 + d);
        let y = j.checked_sub(1).map(|d| l.1 + d);

        let mut candidates = ArrayVec::<_, 3>::new();

        if let Some(y) = y {
            let (next, cost) = ((i, j - 1), self.costs.insert[y]);
            candidates.push(Candidate {
                step: Step::Insert(y),
                cost,
                next,
                tree: None,
                total: forest[next] + cost,
            });
        }

        if let Some(x) = x {
            let (next, cost) = ((i - 1, j), self.costs.delete[x]);
            candidates.push(Candidate {
                step: Step::Delete(x),
                cost,
                next,
                tree: None,
                total: forest[next] + cost,
            });
        }

        if let (Some(x), Some(y)) = (x, y) {
            if (lmld1[x], lmld2[y]) == l {
                let (next, cost) = ((i - 1, j - 1), self.costs.rename[(x, y)]);
                candidates.push(Candidate {
                    step: Step::Rename(x, y),
                    cost,
                    next,
                    tree: None,
                    total: forest[next] + cost,
                });
            } else {
                let next = (lmld1[x] - l.0, lmld2[y] - l.1);
                candidates.push(Candidate {
                    step: Step::Subtree,
                    cost: W::default(),
                    next,
                    tree: Some((x, y)),
                    total: forest[next] + self.trees[(x, y)],
                });
            }
        }

        // ties go to the earliest candidate: insert, then delete, then rename
        candidates.into_iter().min_by_key(|c| c.total)
    }

    /// Aligns the forests that end at `x` and `y` and start at their leftmost leaves.
    ///
    /// Rows walk the first tree and columns the second.
    fn solve(&self, x: usize, y: usize) -> Matrix<W> {
        let l = (self.lmld.0[x], self.lmld.1[y]);
        let (rows, columns) = (x - l.0 + 2, y - l.1 + 2);
        let mut forest = Matrix::new(rows, columns, W::default());

        for i in 0..rows {
            for j in 0..columns {
                if let Some(c) = self.best(&forest, l, (i, j)) {
                    forest[(i, j)] = c.total;
                }
            }
        }

        forest
    }

    /// Solves the keyroots `k1` and `k2`, recording the distance between every pair of whole
    /// subtrees along the way.
    fn forest_distance(&mut self, k1: usize, k2: usize) {
        let forest = self.solve(k1, k2);
        let (lmld1, lmld2) = self.lmld;
        let (l1, l2) = (lmld1[k1], lmld2[k2]);

        for x in (l1..=k1).filter(|&x| lmld1[x] == l1) {
            for y in (l2..=k2).filter(|&y| lmld2[y] == l2) {
                self.trees[(x, y)] = forest[(x - l1 + 1, y - l2 + 1)];
            }
        }
    }

    /// Recovers the cheapest way to turn subtree `x` into subtree `y` as a [Trail][crate::trail].
    fn trail(&self, trails: &mut Trails<W>, x: usize, y: usize) -> TrailId {
        let forest = self.solve(x, y);
        let l = (self.lmld.0[x], self.lmld.1[y]);

        let mut steps = Vec::new();
        let mut cell = (forest.rows - 1, forest.columns - 1);
        while let Some(c) = self.best(&forest, l, cell) {
            steps.push(c);
            cell = c.next;
        }

        drop(forest);

        let mut next = TrailId::EMPTY;
        for c in steps.into_iter().rev() {
            let tree = c.tree.map(|(x, y)| self.trail(trails, x, y));
            next = trails.push(c.step, c.cost, Some(next), tree);
        }

        next
    }
}

/// Runs the dynamic program and recovers the cheapest path between the roots.
fn shortest<T: Tree>(
    a: &Indexed<T>,
    b: &Indexed<T>,
    costs: &Costs<Weight<T>>,
) -> (Trails<Weight<T>>, TrailId) {
    let mut engine = Engine {
        lmld: (&a.lmld, &b.lmld),
        costs,
        trees: Matrix::new(a.len(), b.len(), Default::default()),
    };

    for &k1 in a.keyroots.iter() {
        for &k2 in b.keyroots.iter() {
            trace!(k1, k2, "forest distance");
            engine.forest_distance(k1, k2);
        }
    }

    let mut trails = Trails::new();
    let root = engine.trail(&mut trails, a.root(), b.root());
    debug_assert!(trails.total(root) == engine.trees[(a.root(), b.root())]);

    (trails, root)
}

/// Finds the lowest cost sequence of [Edit]s that transforms one [Tree] into the other.
///
/// The sequence of [Edit]s is understood to apply to the left-hand side so it becomes the
/// right-hand side, see [apply][crate::apply]. Among sequences of equal cost, inserting is
/// preferred to deleting, and deleting to renaming.
///
/// Fails if either side is not a well-formed [Tree] or if the cost model returns a negative cost.
pub fn diff<T: Tree>(
    a: &T,
    b: &T,
) -> Result<(Box<[Edit<T::Id, Weight<T>>]>, Weight<T>), Error<T::Id>> {
    let a = Indexed::new(a)?;
    let b = Indexed::new(b)?;

    debug!(
        nodes = a.len(),
        keyroots = a.keyroots.len(),
        other_nodes = b.len(),
        other_keyroots = b.keyroots.len(),
        "diff"
    );

    let costs = Costs::new(&a, &b)?;
    let (trails, root) = shortest(&a, &b, &costs);
    let cost = trails.total(root);
    let edits = script(&a, &b, &costs, &trails, root)?;

    debug!(edits = edits.len(), trails = trails.len(), "diff done");
    debug_assert!(edits.cost() == cost);

    Ok((edits, cost))
}
