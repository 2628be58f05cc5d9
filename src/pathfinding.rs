//! Dijkstra's and A* shortest-path search over a [`Graph`]
//!
//! Both searches drive a [`MinHeap`] with lazy deletion: the heap has no
//! `decrease_key`, so a vertex may be queued several times and every entry
//! after the first one to surface is skipped as stale. The heap therefore
//! holds at most one entry per edge.
//!
//! Dijkstra and A* are the same algorithm; Dijkstra is A* with `h(n) = 0`.
//! They differ in what they return:
//!
//! - [`Graph::shortest_paths_dijkstra`] settles every reachable vertex and
//!   returns the shortest-path tree as a new graph, which
//!   [`Graph::back_track_dijkstra`] turns into a start-to-goal path.
//! - [`Graph::shortest_path_astar`] stops at the goal and returns the path.
//!
//! # Example
//!
//! ```rust
//! use rust_classic_collections::graph::Graph;
//!
//! let mut graph = Graph::new();
//! graph.add_edge("a", "b", 1.0);
//! graph.add_edge("b", "c", 1.0);
//! graph.add_edge("a", "c", 5.0);
//!
//! let tree = graph.shortest_paths_dijkstra(&"a").unwrap();
//! let path = Graph::back_track_dijkstra(&tree, &"a", &"c").unwrap();
//! assert_eq!(path.len(), 2);
//! assert_eq!(path.get(1).unwrap().weight, 2.0);
//!
//! let path = graph.shortest_path_astar(&"a", &"c", &|_: &&str, _: &&str| 0.0).unwrap();
//! assert_eq!(path.map(|p| p.len()), Some(2));
//! ```

use crate::array::DynamicArray;
use crate::error::{CollectionError, Result};
use crate::graph::{DirectedEdge, Graph};
use crate::hash_table::HashTable;
use crate::heap::MinHeap;
use crate::traits::PriorityQueue;
use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

/// A heuristic estimate of the remaining cost between two vertices
///
/// For A* to find optimal paths the estimate must never exceed the true
/// remaining cost. Any `Fn(&V, &V) -> f64` is an estimator, for example
/// [`haversine_distance`](crate::geo::haversine_distance) on coordinates.
pub trait Estimator<V> {
    /// Estimates the cost from `current` to `goal`
    fn estimate(&self, current: &V, goal: &V) -> f64;
}

impl<V, F> Estimator<V> for F
where
    F: Fn(&V, &V) -> f64,
{
    fn estimate(&self, current: &V, goal: &V) -> f64 {
        self(current, goal)
    }
}

/// A heap entry that orders by `priority` alone
///
/// Lower priorities surface first. Priorities compare with
/// [`f64::total_cmp`], so the order is total even for NaN.
#[derive(Debug, Clone)]
pub(crate) struct Prioritized<T> {
    pub(crate) priority: f64,
    pub(crate) item: T,
}

impl<T> Prioritized<T> {
    pub(crate) fn new(priority: f64, item: T) -> Self {
        Prioritized { priority, item }
    }
}

impl<T> PartialEq for Prioritized<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Prioritized<T> {}

impl<T> PartialOrd for Prioritized<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Prioritized<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority.total_cmp(&other.priority)
    }
}

/// A vertex reached during A*, linked to the node it was reached from
struct SearchNode<'a, V> {
    vertex: &'a V,
    /// The edge used to reach `vertex`; `None` for the start
    edge: Option<&'a DirectedEdge<V>>,
    /// Cost from the start (g-score)
    cost: f64,
    previous: Option<usize>,
}

impl<V> Graph<V>
where
    V: Hash + Eq + Clone + fmt::Debug,
{
    /// Computes the shortest-path tree rooted at `start`
    ///
    /// Every reachable vertex other than `start` gets exactly one edge in the
    /// returned graph, pointing from the vertex to its predecessor on a
    /// shortest path, weighted with the vertex's total distance from `start`.
    /// Unreachable vertices are absent. Negative weights are not supported.
    ///
    /// # Errors
    /// [`CollectionError::KeyNotFound`] if `start` is not a vertex.
    pub fn shortest_paths_dijkstra(&self, start: &V) -> Result<Graph<V>> {
        if !self.contains_vertex(start) {
            return Err(CollectionError::key_not_found(start));
        }

        let mut tree = Graph::new();
        let mut settled: HashTable<&V, ()> = HashTable::new();
        let mut queue = MinHeap::new();
        let mut pops = 0usize;

        // (vertex, predecessor) keyed by distance; the start is its own predecessor
        queue.enqueue(Prioritized::new(0.0, (start, start)));

        while let Ok(Prioritized {
            priority: distance,
            item: (vertex, predecessor),
        }) = queue.dequeue()
        {
            pops += 1;
            if settled.contains(&vertex) {
                log::trace!("dijkstra skipping stale entry for {vertex:?} at {distance}");
                continue;
            }
            settled.add(vertex, ())?;

            if vertex != predecessor {
                tree.add_edge(vertex.clone(), predecessor.clone(), distance);
            }

            for edge in self.edges(vertex)? {
                if !settled.contains(&&edge.to) {
                    queue.enqueue(Prioritized::new(distance + edge.weight, (&edge.to, vertex)));
                }
            }
        }

        log::debug!(
            "dijkstra from {start:?} settled {} vertices in {pops} heap pops",
            settled.len()
        );
        Ok(tree)
    }

    /// Reconstructs the path from `start` to `goal` out of a shortest-path tree
    ///
    /// `tree` must come from [`Graph::shortest_paths_dijkstra`] run from
    /// `start`. The path is returned as `predecessor -> vertex` edges in
    /// start-to-goal order; each edge carries the distance from `start` to its
    /// target, so the last edge's weight is the length of the whole path.
    /// When `start == goal` the path is empty.
    ///
    /// # Errors
    /// [`CollectionError::IllegalState`] if a vertex on the way back has no
    /// recorded predecessor, i.e. `goal` is not reachable from `start`.
    pub fn back_track_dijkstra(
        tree: &Graph<V>,
        start: &V,
        goal: &V,
    ) -> Result<DynamicArray<DirectedEdge<V>>> {
        let mut path = DynamicArray::new();
        let mut current = goal;
        while current != start {
            let edge = tree
                .edges(current)
                .ok()
                .and_then(|edges| edges.get(0).ok())
                .ok_or_else(|| {
                    CollectionError::IllegalState(format!("No path found to {current:?}"))
                })?;
            path.add_first(DirectedEdge::new(
                edge.to.clone(),
                edge.from.clone(),
                edge.weight,
            ));
            current = &edge.to;
        }
        Ok(path)
    }

    /// Finds a cheapest path from `start` to `goal` with A* search
    ///
    /// The open set is ordered by `f = g + h` where `g` is the cost so far and
    /// `h` is `estimator.estimate(vertex, goal)`. The result is the sequence of
    /// graph edges from `start` to `goal`, `Some` of an empty path when
    /// `start == goal`, or `None` when `goal` cannot be reached.
    ///
    /// # Errors
    /// [`CollectionError::KeyNotFound`] if `start` is not a vertex.
    pub fn shortest_path_astar<E>(
        &self,
        start: &V,
        goal: &V,
        estimator: &E,
    ) -> Result<Option<DynamicArray<DirectedEdge<V>>>>
    where
        E: Estimator<V> + ?Sized,
    {
        if !self.contains_vertex(start) {
            return Err(CollectionError::key_not_found(start));
        }

        // queue entries index into this arena instead of owning nodes
        let mut nodes: DynamicArray<SearchNode<'_, V>> = DynamicArray::new();
        let mut closed: HashTable<&V, ()> = HashTable::new();
        let mut open = MinHeap::new();

        nodes.add_last(SearchNode {
            vertex: start,
            edge: None,
            cost: 0.0,
            previous: None,
        });
        open.enqueue(Prioritized::new(estimator.estimate(start, goal), 0));

        while let Ok(Prioritized { item: index, .. }) = open.dequeue() {
            let (vertex, cost) = {
                let node = nodes.get(index)?;
                (node.vertex, node.cost)
            };

            if vertex == goal {
                log::debug!(
                    "a* reached {goal:?} from {start:?} at cost {cost} after closing {} vertices",
                    closed.len()
                );
                return Self::reconstruct_path(&nodes, index).map(Some);
            }
            if closed.contains(&vertex) {
                log::trace!("a* skipping stale entry for {vertex:?}");
                continue;
            }
            closed.add(vertex, ())?;

            for edge in self.edges(vertex)? {
                if closed.contains(&&edge.to) {
                    continue;
                }
                let cost = cost + edge.weight;
                let estimate = cost + estimator.estimate(&edge.to, goal);
                nodes.add_last(SearchNode {
                    vertex: &edge.to,
                    edge: Some(edge),
                    cost,
                    previous: Some(index),
                });
                open.enqueue(Prioritized::new(estimate, nodes.len() - 1));
            }
        }

        log::debug!(
            "a* found no path from {start:?} to {goal:?} after closing {} vertices",
            closed.len()
        );
        Ok(None)
    }

    /// Follows the predecessor chain from `index` back to the start
    fn reconstruct_path(
        nodes: &DynamicArray<SearchNode<'_, V>>,
        mut index: usize,
    ) -> Result<DynamicArray<DirectedEdge<V>>> {
        let mut path = DynamicArray::new();
        loop {
            let node = nodes.get(index)?;
            let (Some(edge), Some(previous)) = (node.edge, node.previous) else {
                break;
            };
            path.add_first(edge.clone());
            index = previous;
        }
        Ok(path)
    }
}
