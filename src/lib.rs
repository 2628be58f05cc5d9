//! Classic Data Structures for Rust
//!
//! This crate implements the textbook containers from scratch instead of
//! delegating to `std::collections`, each with its own invariants, plus the
//! classic weighted-graph algorithms built on top of them.
//!
//! # Features
//!
//! - **Dynamic Array**: growable sequence; doubling growth capped at 256 extra slots; selection and quick sort; binary search
//! - **Hash Table**: separate chaining over array buckets; rehash past a 0.75 load factor
//! - **Binary Min-Heap**: O(log n) enqueue and dequeue over a dynamic array
//! - **Stack**: LIFO over a dynamic array
//! - **Doubly Linked List**: slot-map arena nodes linked by key; O(1) at both ends
//! - **Queue**: FIFO over the doubly linked list
//! - **Ordered Map**: binary search tree, optionally AVL-balanced; in-order keys and prefix search
//! - **Weighted Directed Graph**: Dijkstra, A*, Prim's minimum spanning tree and depth-first iteration
//!
//! Every structure renders its internal shape as Graphviz DOT through
//! [`Collection::graph_viz`].
//!
//! # Example
//!
//! ```rust
//! use rust_classic_collections::graph::Graph;
//! use rust_classic_collections::geo::{haversine_distance, Coordinate};
//!
//! let amsterdam = Coordinate::new(52.3789, 4.9004);
//! let utrecht = Coordinate::new(52.0894, 5.1100);
//! let amersfoort = Coordinate::new(52.1535, 5.3742);
//!
//! let mut graph = Graph::new();
//! graph.add_edge_bidirectional(amsterdam, utrecht, 36.1);
//! graph.add_edge_bidirectional(utrecht, amersfoort, 22.0);
//! graph.add_edge_bidirectional(amsterdam, amersfoort, 48.6);
//!
//! let estimate = |from: &Coordinate, to: &Coordinate| haversine_distance(from, to);
//! let path = graph
//!     .shortest_path_astar(&amsterdam, &amersfoort, &estimate)
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(path.len(), 1);
//! ```

pub mod array;
pub mod avl;
pub mod error;
pub mod geo;
pub mod graph;
pub mod hash_table;
pub mod heap;
pub mod linked_list;
pub mod pathfinding;
pub mod queue;
pub mod spanning_tree;
pub mod stack;
pub mod traits;
pub mod tree;

// Re-export the shared traits and error type for convenience
pub use error::{CollectionError, Result};
pub use traits::{Collection, PriorityQueue, Searchable, Sortable};
