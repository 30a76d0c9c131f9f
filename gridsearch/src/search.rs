use std::cmp::Reverse;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, VecDeque};
use std::hash::Hash;

use rustc_hash::{FxHashMap, FxHashSet};

/// Accumulated cost of reaching a state.
pub type Cost = u64;

/// Minimum cost of every state a search reached.
///
/// States that were never reached are absent. [`iter`](Self::iter) walks
/// states in the order the search settled them, which depends only on the
/// starts, the successor function and the tie-break, never on hashing.
#[derive(Debug, Clone)]
pub struct DistanceMap<S> {
    dist: FxHashMap<S, Cost>,
    order: Vec<S>,
}

impl<S> Default for DistanceMap<S> {
    fn default() -> Self {
        Self { dist: FxHashMap::default(), order: Vec::new() }
    }
}

impl<S: Clone + Eq + Hash> DistanceMap<S> {
    fn settle(&mut self, state: S, cost: Cost) {
        self.order.push(state.clone());
        self.dist.insert(state, cost);
    }

    pub fn get(&self, state: &S) -> Option<Cost> {
        self.dist.get(state).copied()
    }

    pub fn contains(&self, state: &S) -> bool {
        self.dist.contains_key(state)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// States with their cost, in settle order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, Cost)> + '_ {
        self.order.iter().map(|s| (s, self.dist[s]))
    }

    /// States in settle order.
    pub fn states(&self) -> &[S] {
        &self.order
    }

    pub fn into_states(self) -> Vec<S> {
        self.order
    }

    pub fn into_inner(self) -> FxHashMap<S, Cost> {
        self.dist
    }
}

/// Breadth-first distance map from `starts`, every move costing 1.
///
/// Successors are enqueued in the order `successors` yields them.
pub fn bfs<S, I>(starts: impl IntoIterator<Item = S>, successors: impl FnMut(&S) -> I) -> DistanceMap<S>
where
    S: Clone + Eq + Hash,
    I: IntoIterator<Item = S>,
{
    let (dist, _) = breadth_first(starts, successors, |_| false);
    dist
}

/// Breadth-first search that stops at the first state satisfying `is_target`.
///
/// Returns that state and its distance, or `None` when no target is
/// reachable. A start that is itself a target is returned with cost 0.
pub fn bfs_to<S, I>(
    starts: impl IntoIterator<Item = S>,
    successors: impl FnMut(&S) -> I,
    is_target: impl FnMut(&S) -> bool,
) -> Option<(S, Cost)>
where
    S: Clone + Eq + Hash,
    I: IntoIterator<Item = S>,
{
    breadth_first(starts, successors, is_target).1
}

fn breadth_first<S, I>(
    starts: impl IntoIterator<Item = S>,
    mut successors: impl FnMut(&S) -> I,
    mut is_target: impl FnMut(&S) -> bool,
) -> (DistanceMap<S>, Option<(S, Cost)>)
where
    S: Clone + Eq + Hash,
    I: IntoIterator<Item = S>,
{
    let mut dist = DistanceMap::default();
    let mut queue = VecDeque::new();
    for s in starts {
        if dist.contains(&s) {
            continue;
        }
        if is_target(&s) {
            return (dist, Some((s, 0)));
        }
        dist.settle(s.clone(), 0);
        queue.push_back((s, 0));
    }

    while let Some((s, d)) = queue.pop_front() {
        for n in successors(&s) {
            if dist.contains(&n) {
                continue;
            }
            if is_target(&n) {
                return (dist, Some((n, d + 1)));
            }
            dist.settle(n.clone(), d + 1);
            queue.push_back((n, d + 1));
        }
    }

    log::trace!("bfs exhausted after {} states", dist.len());
    (dist, None)
}

/// Every state reachable from `starts`, in discovery order.
pub fn flood_fill<S, I>(starts: impl IntoIterator<Item = S>, successors: impl FnMut(&S) -> I) -> Vec<S>
where
    S: Clone + Eq + Hash,
    I: IntoIterator<Item = S>,
{
    bfs(starts, successors).into_states()
}

/// Split `states` into connected components.
///
/// Components are discovered by flooding from each state that no earlier
/// component covered, in input order, so `successors` should be symmetric.
pub fn components<S, I>(states: impl IntoIterator<Item = S>, mut successors: impl FnMut(&S) -> I) -> Vec<Vec<S>>
where
    S: Clone + Eq + Hash,
    I: IntoIterator<Item = S>,
{
    let mut seen = FxHashSet::default();
    let mut out = Vec::new();
    for s in states {
        if seen.contains(&s) {
            continue;
        }
        let region = flood_fill([s], &mut successors);
        seen.extend(region.iter().cloned());
        out.push(region);
    }
    out
}

/// Dijkstra distance map from `starts` over non-negative edge costs.
///
/// Equal costs are settled in ascending state order.
pub fn dijkstra<S, I>(starts: impl IntoIterator<Item = S>, successors: impl FnMut(&S) -> I) -> DistanceMap<S>
where
    S: Clone + Ord + Hash,
    I: IntoIterator<Item = (S, Cost)>,
{
    best_first(starts, successors, |_| false, None).0
}

/// Dijkstra search that stops once the cheapest target is settled.
///
/// When several targets tie on cost the smallest state wins.
pub fn dijkstra_to<S, I>(
    starts: impl IntoIterator<Item = S>,
    successors: impl FnMut(&S) -> I,
    is_target: impl FnMut(&S) -> bool,
) -> Option<(S, Cost)>
where
    S: Clone + Ord + Hash,
    I: IntoIterator<Item = (S, Cost)>,
{
    best_first(starts, successors, is_target, None).1
}

/// Dijkstra distance map that also remembers every optimal predecessor.
pub fn dijkstra_paths<S, I>(starts: impl IntoIterator<Item = S>, successors: impl FnMut(&S) -> I) -> ShortestPaths<S>
where
    S: Clone + Ord + Hash,
    I: IntoIterator<Item = (S, Cost)>,
{
    let mut preds = FxHashMap::default();
    let (dist, _) = best_first(starts, successors, |_| false, Some(&mut preds));
    ShortestPaths { dist, preds }
}

fn best_first<S, I>(
    starts: impl IntoIterator<Item = S>,
    mut successors: impl FnMut(&S) -> I,
    mut is_target: impl FnMut(&S) -> bool,
    mut preds: Option<&mut FxHashMap<S, Vec<S>>>,
) -> (DistanceMap<S>, Option<(S, Cost)>)
where
    S: Clone + Ord + Hash,
    I: IntoIterator<Item = (S, Cost)>,
{
    let mut settled = DistanceMap::default();
    let mut best: FxHashMap<S, Cost> = FxHashMap::default();
    let mut open = BinaryHeap::new();
    for s in starts {
        if let Entry::Vacant(e) = best.entry(s) {
            open.push(Reverse((0, e.key().clone())));
            e.insert(0);
        }
    }

    // Reverse turns the max-heap into a min-heap on (cost, state).
    while let Some(Reverse((cost, s))) = open.pop() {
        if settled.contains(&s) {
            continue;
        }
        settled.settle(s.clone(), cost);
        if is_target(&s) {
            return (settled, Some((s, cost)));
        }

        for (n, step) in successors(&s) {
            let nc = cost + step;
            match best.entry(n) {
                Entry::Occupied(mut e) => {
                    if nc > *e.get() {
                        continue;
                    }
                    if let Some(preds) = preds.as_mut() {
                        let list = preds.entry(e.key().clone()).or_default();
                        if nc < *e.get() {
                            list.clear();
                        }
                        list.push(s.clone());
                    }
                    if nc < *e.get() {
                        open.push(Reverse((nc, e.key().clone())));
                        e.insert(nc);
                    }
                }
                Entry::Vacant(e) => {
                    if let Some(preds) = preds.as_mut() {
                        preds.insert(e.key().clone(), vec![s.clone()]);
                    }
                    open.push(Reverse((nc, e.key().clone())));
                    e.insert(nc);
                }
            }
        }
    }

    log::trace!("dijkstra exhausted after {} states, {} discovered", settled.len(), best.len());
    (settled, None)
}

/// Result of [`dijkstra_paths`].
#[derive(Debug, Clone)]
pub struct ShortestPaths<S> {
    dist: DistanceMap<S>,
    preds: FxHashMap<S, Vec<S>>,
}

impl<S: Clone + Eq + Hash> ShortestPaths<S> {
    pub fn distances(&self) -> &DistanceMap<S> {
        &self.dist
    }

    pub fn get(&self, state: &S) -> Option<Cost> {
        self.dist.get(state)
    }

    /// States from which `state` is reached on an optimal edge.
    pub fn predecessors(&self, state: &S) -> &[S] {
        self.preds.get(state).map(Vec::as_slice).unwrap_or_default()
    }

    /// Every state lying on at least one optimal path to any of `ends`.
    ///
    /// Unreached ends contribute nothing.
    pub fn on_paths(&self, ends: impl IntoIterator<Item = S>) -> FxHashSet<S> {
        let mut on = FxHashSet::default();
        let mut stack: Vec<S> = ends.into_iter().filter(|e| self.dist.contains(e)).collect();
        on.extend(stack.iter().cloned());
        while let Some(s) = stack.pop() {
            for p in self.predecessors(&s) {
                if on.insert(p.clone()) {
                    stack.push(p.clone());
                }
            }
        }
        on
    }
}
