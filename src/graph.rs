//! Weighted directed graph over hashable vertex values
//!
//! The graph is an adjacency list: a [`HashTable`] from each vertex to the
//! [`DynamicArray`] of its outgoing [`DirectedEdge`]s, kept in insertion order.
//! Vertices are created the first time an edge mentions them. Edges are never
//! deduplicated, so repeated `add_edge` calls produce parallel edges, and a
//! bidirectional connection is simply two directed edges.
//!
//! The search and spanning-tree algorithms live in
//! [`pathfinding`](crate::pathfinding) and [`spanning_tree`](crate::spanning_tree).
//!
//! # Example
//!
//! ```rust
//! use rust_classic_collections::graph::Graph;
//!
//! let mut graph = Graph::new();
//! graph.add_edge(1, 2, 1.0);
//! graph.add_edge(2, 3, 2.0);
//! graph.add_edge(3, 4, 3.0);
//!
//! assert_eq!(graph.len(), 4);
//! assert_eq!(graph.total_weight(), 6.0);
//! assert_eq!(graph.dfs_from(&1).unwrap().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
//! ```

use crate::array::DynamicArray;
use crate::error::{CollectionError, Result};
use crate::hash_table::HashTable;
use crate::stack::Stack;
use crate::traits::Collection;
use std::fmt::{self, Write as _};
use std::hash::Hash;

/// A weighted edge from one vertex to another
///
/// Weights are expected to be non-negative but this is not enforced.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectedEdge<V> {
    pub from: V,
    pub to: V,
    pub weight: f64,
}

impl<V> DirectedEdge<V> {
    pub fn new(from: V, to: V, weight: f64) -> Self {
        DirectedEdge { from, to, weight }
    }
}

impl<V: fmt::Display> fmt::Display for DirectedEdge<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({:?})", self.from, self.to, self.weight)
    }
}

/// Adjacency-list graph with weighted directed edges
#[derive(Clone)]
pub struct Graph<V> {
    pub(crate) adjacency: HashTable<V, DynamicArray<DirectedEdge<V>>>,
}

impl<V> Graph<V> {
    /// Creates an empty graph
    pub fn new() -> Self {
        Graph {
            adjacency: HashTable::new(),
        }
    }

    /// Returns the number of vertices
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns true if the graph has no vertices
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Returns every vertex in adjacency-table order
    pub fn vertices(&self) -> DynamicArray<&V> {
        self.adjacency.keys()
    }

    /// Iterates over every edge, grouped by source vertex
    pub fn all_edges(&self) -> impl Iterator<Item = &DirectedEdge<V>> + '_ {
        self.adjacency.iter().flat_map(|(_, edges)| edges.iter())
    }

    /// Returns the number of directed edges
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(|(_, edges)| edges.len()).sum()
    }

    /// Sums the weight of every directed edge
    ///
    /// A bidirectional connection contributes its weight twice; see
    /// [`Graph::total_undirected_weight`] for the deduplicated sum.
    pub fn total_weight(&self) -> f64 {
        self.all_edges().map(|edge| edge.weight).sum()
    }
}

impl<V> Graph<V>
where
    V: Hash + Eq + Clone + fmt::Debug,
{
    /// Adds a vertex without edges; returns false if it already existed
    pub fn add_vertex(&mut self, vertex: V) -> bool {
        if self.adjacency.contains(&vertex) {
            return false;
        }
        self.adjacency.add(vertex, DynamicArray::new()).is_ok()
    }

    /// Returns true if `vertex` has been added
    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.adjacency.contains(vertex)
    }

    /// Appends a directed edge, creating either endpoint if needed
    pub fn add_edge(&mut self, from: V, to: V, weight: f64) {
        self.add_vertex(from.clone());
        self.add_vertex(to.clone());
        if let Ok(edges) = self.adjacency.get_mut(&from) {
            edges.add_last(DirectedEdge::new(from, to, weight));
        }
    }

    /// Adds `from -> to` followed by `to -> from`, both with `weight`
    pub fn add_edge_bidirectional(&mut self, from: V, to: V, weight: f64) {
        self.add_edge(from.clone(), to.clone(), weight);
        self.add_edge(to, from, weight);
    }

    /// Returns the outgoing edges of `vertex` in insertion order
    ///
    /// # Errors
    /// [`CollectionError::KeyNotFound`] if `vertex` was never added.
    pub fn edges(&self, vertex: &V) -> Result<&DynamicArray<DirectedEdge<V>>> {
        self.adjacency.get(vertex)
    }

    /// Sums edge weights, counting a pair of opposite edges with equal weight
    /// once
    ///
    /// Each edge cancels at most one earlier reverse edge of the same weight.
    /// Reverse edges with a different weight and parallel edges are all
    /// counted.
    pub fn total_undirected_weight(&self) -> f64 {
        // weights of counted edges still waiting for their mirror
        let mut unmatched: HashTable<(&V, &V), DynamicArray<f64>> = HashTable::new();
        let mut total = 0.0;
        for edge in self.all_edges() {
            if let Ok(waiting) = unmatched.get_mut(&(&edge.to, &edge.from)) {
                let mirror = waiting.iter().position(|w| *w == edge.weight);
                if mirror.is_some_and(|index| waiting.remove_at(index).is_ok()) {
                    continue;
                }
            }
            total += edge.weight;
            match unmatched.get_mut(&(&edge.from, &edge.to)) {
                Ok(waiting) => waiting.add_last(edge.weight),
                Err(_) => {
                    let mut waiting = DynamicArray::new();
                    waiting.add_last(edge.weight);
                    let _ = unmatched.add((&edge.from, &edge.to), waiting);
                }
            }
        }
        total
    }

    /// Collects each connection once, paired with whether it is mirrored
    ///
    /// An edge is skipped when an edge between the same two vertices, in
    /// either direction, was already collected. A collected edge is mirrored
    /// when its target has an edge back to its source with the same weight.
    fn connections(&self) -> DynamicArray<(&DirectedEdge<V>, bool)> {
        let mut seen: HashTable<(&V, &V), ()> = HashTable::new();
        let mut connections = DynamicArray::new();
        for edge in self.all_edges() {
            if seen.contains(&(&edge.from, &edge.to)) || seen.contains(&(&edge.to, &edge.from)) {
                continue;
            }
            let _ = seen.add((&edge.from, &edge.to), ());
            let mirrored = self.edges(&edge.to).is_ok_and(|back| {
                back.iter()
                    .any(|reverse| reverse.to == edge.from && reverse.weight == edge.weight)
            });
            if mirrored {
                let _ = seen.add((&edge.to, &edge.from), ());
            }
            connections.add_last((edge, mirrored));
        }
        connections
    }

    /// Depth-first traversal from the first vertex in adjacency-table order
    pub fn dfs(&self) -> Dfs<'_, V> {
        let mut dfs = Dfs::new(self);
        if let Ok(start) = self.vertices().get(0) {
            dfs.stack.push(*start);
        }
        dfs
    }

    /// Depth-first traversal from `start`
    ///
    /// # Errors
    /// [`CollectionError::KeyNotFound`] if `start` is not a vertex.
    pub fn dfs_from<'a>(&'a self, start: &'a V) -> Result<Dfs<'a, V>> {
        if !self.contains_vertex(start) {
            return Err(CollectionError::key_not_found(start));
        }
        let mut dfs = Dfs::new(self);
        dfs.stack.push(start);
        Ok(dfs)
    }
}

impl<V> Default for Graph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for Graph<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.adjacency.iter().map(|(vertex, edges)| {
                (vertex, edges.iter().map(|e| (&e.to, e.weight)).collect::<Vec<_>>())
            }))
            .finish()
    }
}

impl<V> Collection for Graph<V>
where
    V: Hash + Eq + Clone + fmt::Debug + fmt::Display,
{
    fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// One labelled edge per connection; a mirrored connection is printed as
    /// its forward edge immediately followed by the reverse edge
    fn graph_viz(&self, name: &str) -> String {
        let mut dot = format!("digraph {name} {{\n");
        for (edge, mirrored) in self.connections().iter() {
            let _ = writeln!(
                dot,
                "\"{}\" -> \"{}\" [label=\"{:?}\"]",
                edge.from, edge.to, edge.weight
            );
            if *mirrored {
                let _ = writeln!(
                    dot,
                    "\"{}\" -> \"{}\" [label=\"{:?}\"]",
                    edge.to, edge.from, edge.weight
                );
            }
        }
        dot.push_str("}\n");
        dot
    }
}

/// Stack-based depth-first iterator over a [`Graph`]
///
/// Each vertex is yielded once. Unvisited neighbours are pushed in adjacency
/// order, so the last-added edge of a vertex is followed first.
pub struct Dfs<'a, V> {
    graph: &'a Graph<V>,
    stack: Stack<&'a V>,
    visited: HashTable<&'a V, ()>,
}

impl<'a, V> Dfs<'a, V> {
    fn new(graph: &'a Graph<V>) -> Self {
        Dfs {
            graph,
            stack: Stack::new(),
            visited: HashTable::new(),
        }
    }
}

impl<'a, V> Iterator for Dfs<'a, V>
where
    V: Hash + Eq + fmt::Debug,
{
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        let graph = self.graph;
        while let Ok(vertex) = self.stack.pop() {
            if self.visited.add(vertex, ()).is_err() {
                continue;
            }
            if let Ok(edges) = graph.adjacency.get(vertex) {
                for edge in edges {
                    if !self.visited.contains(&&edge.to) {
                        self.stack.push(&edge.to);
                    }
                }
            }
            return Some(vertex);
        }
        None
    }
}

impl<'a, V> IntoIterator for &'a Graph<V>
where
    V: Hash + Eq + Clone + fmt::Debug,
{
    type Item = &'a V;
    type IntoIter = Dfs<'a, V>;

    fn into_iter(self) -> Dfs<'a, V> {
        self.dfs()
    }
}
