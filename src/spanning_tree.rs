//! Minimum-cost spanning trees with Prim's algorithm
//!
//! Prim grows a tree from one vertex, repeatedly taking the cheapest queued
//! edge whose target is not yet in the tree. Edges are followed in their
//! stored direction only, so an undirected graph should be built with
//! [`Graph::add_edge_bidirectional`].

use crate::error::Result;
use crate::graph::Graph;
use crate::hash_table::HashTable;
use crate::heap::MinHeap;
use crate::pathfinding::Prioritized;
use crate::traits::PriorityQueue;
use std::fmt;
use std::hash::Hash;

impl<V> Graph<V>
where
    V: Hash + Eq + Clone + fmt::Debug,
{
    /// Minimum-cost spanning tree of the component holding the first vertex
    ///
    /// The start is the first vertex in adjacency-table order. Vertices not
    /// reachable from it are left out; use
    /// [`Graph::minimum_cost_spanning_forest`] to cover every component. An
    /// empty graph yields an empty tree.
    pub fn minimum_cost_spanning_tree(&self) -> Result<Graph<V>> {
        let mut tree = Graph::new();
        let mut visited = HashTable::new();
        let vertices = self.vertices();
        if let Ok(start) = vertices.get(0) {
            self.grow_tree(*start, &mut visited, &mut tree)?;
        }
        log::debug!(
            "prim spanned {} of {} vertices with weight {}",
            tree.len(),
            self.len(),
            tree.total_weight()
        );
        Ok(tree)
    }

    /// Minimum-cost spanning forest over every vertex
    ///
    /// Prim is restarted from each vertex, in adjacency-table order, that no
    /// earlier tree reached. Isolated vertices appear in the forest without
    /// edges.
    pub fn minimum_cost_spanning_forest(&self) -> Result<Graph<V>> {
        let mut forest = Graph::new();
        let mut visited = HashTable::new();
        let mut components = 0usize;
        for start in self.vertices().iter() {
            if !visited.contains(start) {
                self.grow_tree(*start, &mut visited, &mut forest)?;
                components += 1;
            }
        }
        log::debug!(
            "prim spanned {components} components with weight {}",
            forest.total_weight()
        );
        Ok(forest)
    }

    fn grow_tree<'a>(
        &'a self,
        start: &'a V,
        visited: &mut HashTable<&'a V, ()>,
        tree: &mut Graph<V>,
    ) -> Result<()> {
        visited.add(start, ())?;
        tree.add_vertex(start.clone());

        let mut queue = MinHeap::new();
        for edge in self.edges(start)? {
            queue.enqueue(Prioritized::new(edge.weight, edge));
        }

        while let Ok(Prioritized { item: edge, .. }) = queue.dequeue() {
            if visited.contains(&&edge.to) {
                continue;
            }
            visited.add(&edge.to, ())?;
            tree.add_edge(edge.from.clone(), edge.to.clone(), edge.weight);

            for next in self.edges(&edge.to)? {
                if !visited.contains(&&next.to) {
                    queue.enqueue(Prioritized::new(next.weight, next));
                }
            }
        }
        Ok(())
    }
}
