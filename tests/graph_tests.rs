//! Graph algorithm tests on fixed fixtures
//!
//! Tests cover:
//! - Adjacency bookkeeping and total weight
//! - Depth-first iteration order
//! - Dijkstra shortest-path tree and backtracking
//! - A* with the haversine estimator
//! - Prim's spanning tree and spanning forest
//! - Graphviz export pairing of mirrored edges

use rust_classic_collections::geo::{haversine_distance, Coordinate};
use rust_classic_collections::graph::{DirectedEdge, Graph};
use rust_classic_collections::{Collection, CollectionError};

// ============================================================================
// Fixtures
// ============================================================================

fn chain() -> Graph<i32> {
    let mut graph = Graph::new();
    graph.add_edge(1, 2, 1.0);
    graph.add_edge(2, 3, 2.0);
    graph.add_edge(3, 4, 3.0);
    graph
}

fn dijkstra_graph() -> Graph<&'static str> {
    let mut graph = Graph::new();
    for (from, to, weight) in [
        ("a", "b", 1.0),
        ("a", "c", 4.0),
        ("b", "e", 10.0),
        ("b", "d", 3.0),
        ("c", "d", 2.0),
        ("c", "g", 3.0),
        ("d", "e", 5.0),
        ("d", "f", 7.0),
        ("d", "g", 1.0),
        ("e", "f", 7.0),
        ("g", "f", 5.0),
    ] {
        graph.add_edge(from, to, weight);
    }
    graph
}

fn prim_graph() -> Graph<&'static str> {
    let mut graph = Graph::new();
    for (from, to, weight) in [
        ("a", "b", 4.0),
        ("a", "h", 8.0),
        ("b", "h", 11.0),
        ("b", "c", 8.0),
        ("c", "i", 2.0),
        ("c", "f", 4.0),
        ("c", "d", 7.0),
        ("d", "f", 14.0),
        ("d", "e", 9.0),
        ("e", "f", 10.0),
        ("f", "g", 2.0),
        ("g", "i", 6.0),
        ("g", "h", 1.0),
        ("h", "i", 7.0),
    ] {
        graph.add_edge_bidirectional(from, to, weight);
    }
    graph
}

fn has_edge<V: PartialEq>(graph: &[DirectedEdge<V>], from: &V, to: &V, weight: f64) -> bool {
    graph
        .iter()
        .any(|edge| &edge.from == from && &edge.to == to && edge.weight == weight)
}

// ============================================================================
// Structure
// ============================================================================

#[test]
fn test_chain_scenario() {
    let graph = chain();
    assert!(!graph.is_empty());
    assert_eq!(graph.len(), 4);
    assert_eq!(graph.total_weight(), 6.0);
    let order: Vec<i32> = graph.dfs_from(&1).unwrap().copied().collect();
    assert_eq!(order, vec![1, 2, 3, 4]);
}

#[test]
fn test_edges_per_vertex() {
    let graph = chain();
    for (from, to) in [(1, 2), (2, 3), (3, 4)] {
        let edges = graph.edges(&from).unwrap();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges.get(0).map(|e| (e.from, e.to)), Ok((from, to)));
    }
    assert!(graph.edges(&4).unwrap().is_empty());

    let error = graph.edges(&0).unwrap_err();
    assert_eq!(error.to_string(), "Key 0 is not found.");
}

#[test]
fn test_bidirectional_edges() {
    let mut graph = Graph::new();
    graph.add_edge_bidirectional(1, 2, 1.0);
    assert_eq!(
        graph.edges(&1).unwrap().get(0),
        Ok(&DirectedEdge::new(1, 2, 1.0))
    );
    assert_eq!(
        graph.edges(&2).unwrap().get(0),
        Ok(&DirectedEdge::new(2, 1, 1.0))
    );
    assert_eq!(graph.total_weight(), 2.0);
    assert_eq!(graph.total_undirected_weight(), 1.0);
}

#[test]
fn test_prim_fixture_undirected_weight() {
    let graph = prim_graph();
    assert_eq!(graph.total_weight(), 2.0 * graph.total_undirected_weight());
    assert_eq!(graph.total_undirected_weight(), 93.0);
}

// ============================================================================
// Depth-first iteration
// ============================================================================

#[test]
fn test_dfs_follows_last_added_edge_first() {
    let mut graph = Graph::new();
    graph.add_edge(1, 2, 1.0);
    graph.add_edge(2, 4, 2.0);
    graph.add_edge(1, 3, 2.0);
    graph.add_edge(3, 6, 3.0);
    let order: Vec<i32> = graph.dfs_from(&1).unwrap().copied().collect();
    assert_eq!(order, vec![1, 3, 6, 2, 4]);
}

#[test]
fn test_dfs_over_whole_graph() {
    let graph = prim_graph();
    let mut seen: Vec<&str> = (&graph).into_iter().copied().collect();
    assert_eq!(seen.len(), 9);
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), 9);
}

#[test]
fn test_dfs_empty_graph() {
    let graph: Graph<i32> = Graph::new();
    assert_eq!(graph.dfs().next(), None);
}

// ============================================================================
// Dijkstra
// ============================================================================

#[test]
fn test_dijkstra_a_to_f() {
    let graph = dijkstra_graph();
    let tree = graph.shortest_paths_dijkstra(&"a").unwrap();
    let path = Graph::back_track_dijkstra(&tree, &"a", &"f").unwrap();

    let hops: Vec<(&str, &str)> = path.iter().map(|edge| (edge.from, edge.to)).collect();
    assert_eq!(hops, vec![("a", "b"), ("b", "d"), ("d", "g"), ("g", "f")]);

    let total = path.get(path.len() - 1).unwrap().weight;
    assert!((total - 10.0).abs() < 1e-9);
}

#[test]
fn test_dijkstra_tree_distances() {
    let graph = dijkstra_graph();
    let tree = graph.shortest_paths_dijkstra(&"a").unwrap();
    assert_eq!(tree.len(), graph.len());
    assert_eq!(tree.edge_count(), graph.len() - 1);
    for (vertex, distance) in [("b", 1.0), ("c", 4.0), ("d", 4.0), ("e", 9.0), ("g", 5.0)] {
        let edge = tree.edges(&vertex).unwrap().get(0).unwrap();
        assert_eq!(edge.weight, distance, "distance to {vertex}");
    }
}

#[test]
fn test_dijkstra_unreachable_goal() {
    let mut graph = dijkstra_graph();
    graph.add_edge("x", "y", 1.0);
    graph.add_edge("y", "z", 1.0);
    let tree = graph.shortest_paths_dijkstra(&"a").unwrap();

    let error = Graph::back_track_dijkstra(&tree, &"a", &"z").unwrap_err();
    assert!(matches!(error, CollectionError::IllegalState(_)));
    assert_eq!(error.to_string(), "No path found to \"z\"");
}

// ============================================================================
// A*
// ============================================================================

fn amsterdam() -> Coordinate {
    Coordinate::new(52.3676, 4.9041)
}

fn almere() -> Coordinate {
    Coordinate::new(52.2297, 5.1669)
}

fn eindhoven() -> Coordinate {
    Coordinate::new(51.4416, 5.4697)
}

fn rotterdam() -> Coordinate {
    Coordinate::new(51.9225, 4.47917)
}

#[test]
fn test_astar_with_haversine() {
    let mut graph = Graph::new();
    graph.add_edge(amsterdam(), almere(), 1.3);
    graph.add_edge(almere(), eindhoven(), 2.7);
    graph.add_edge(eindhoven(), rotterdam(), 2.3);
    graph.add_edge(amsterdam(), rotterdam(), 100.0);

    let path = graph
        .shortest_path_astar(&amsterdam(), &rotterdam(), &haversine_distance)
        .unwrap()
        .expect("a path exists");

    assert_eq!(path.len(), 3);
    let total: f64 = path.iter().map(|edge| edge.weight).sum();
    assert!((total - 6.3).abs() < 1e-9);
    assert_eq!(path.get(0).map(|edge| edge.from), Ok(amsterdam()));
    assert_eq!(path.get(2).map(|edge| edge.to), Ok(rotterdam()));
}

#[test]
fn test_astar_unreachable_goal() {
    let mut graph = Graph::new();
    graph.add_edge(amsterdam(), almere(), 1.3);
    graph.add_edge(almere(), eindhoven(), 2.7);
    graph.add_vertex(rotterdam());

    let result = graph.shortest_path_astar(&amsterdam(), &rotterdam(), &haversine_distance);
    assert!(matches!(result, Ok(None)));
}

#[test]
fn test_astar_matches_dijkstra_with_zero_estimate() {
    let graph = dijkstra_graph();
    let zero = |_: &&str, _: &&str| 0.0;
    for goal in ["b", "c", "d", "e", "f", "g"] {
        let tree = graph.shortest_paths_dijkstra(&"a").unwrap();
        let expected = Graph::back_track_dijkstra(&tree, &"a", &goal).unwrap();
        let expected = expected.get(expected.len() - 1).unwrap().weight;

        let path = graph.shortest_path_astar(&"a", &goal, &zero).unwrap().unwrap();
        let actual: f64 = path.iter().map(|edge| edge.weight).sum();
        assert!((actual - expected).abs() < 1e-9, "goal {goal}");
    }
}

// ============================================================================
// Prim
// ============================================================================

#[test]
fn test_prim_fixture() {
    let graph = prim_graph();
    let tree = graph.minimum_cost_spanning_tree().unwrap();

    assert_eq!(tree.total_weight(), 37.0);
    assert_eq!(tree.len(), 9);
    assert_eq!(tree.edge_count(), 8);

    let source: Vec<DirectedEdge<&str>> = graph.all_edges().cloned().collect();
    for edge in tree.all_edges() {
        assert!(has_edge(&source, &edge.from, &edge.to, edge.weight));
    }

    // edges every minimum spanning tree of this graph contains
    let chosen: Vec<DirectedEdge<&str>> = tree.all_edges().cloned().collect();
    for (from, to, weight) in [
        ("a", "b", 4.0),
        ("h", "g", 1.0),
        ("g", "f", 2.0),
        ("f", "c", 4.0),
        ("c", "i", 2.0),
        ("c", "d", 7.0),
        ("d", "e", 9.0),
    ] {
        assert!(
            has_edge(&chosen, &from, &to, weight) || has_edge(&chosen, &to, &from, weight),
            "missing {from} - {to}"
        );
    }
}

#[test]
fn test_prim_cycle() {
    let mut graph = Graph::new();
    graph.add_edge_bidirectional(1, 2, 1.0);
    graph.add_edge_bidirectional(2, 3, 2.0);
    graph.add_edge_bidirectional(3, 4, 3.0);
    graph.add_edge_bidirectional(4, 1, 4.0);
    graph.add_edge_bidirectional(1, 3, 5.0);

    let tree = graph.minimum_cost_spanning_tree().unwrap();
    assert_eq!(tree.total_weight(), 6.0);
    assert_eq!(tree.len(), 4);
    assert_eq!(tree.edge_count(), 3);
}

#[test]
fn test_prim_disconnected() {
    let mut graph = Graph::new();
    graph.add_edge_bidirectional(1, 2, 1.0);
    graph.add_edge_bidirectional(2, 3, 2.0);
    graph.add_edge_bidirectional(3, 4, 3.0);
    graph.add_edge_bidirectional(5, 6, 1.0);
    graph.add_edge_bidirectional(6, 7, 2.0);

    let tree = graph.minimum_cost_spanning_tree().unwrap();
    let spans_first = tree.contains_vertex(&1);
    if spans_first {
        assert_eq!((tree.len(), tree.total_weight()), (4, 6.0));
        assert!(tree.edges(&5).is_err());
    } else {
        assert_eq!((tree.len(), tree.total_weight()), (3, 3.0));
        assert!(tree.edges(&1).is_err());
    }

    let forest = graph.minimum_cost_spanning_forest().unwrap();
    assert_eq!(forest.len(), 7);
    assert_eq!(forest.edge_count(), 5);
    assert_eq!(forest.total_weight(), 9.0);
}

// ============================================================================
// Graphviz
// ============================================================================

#[test]
fn test_graph_viz_one_directional() {
    let graph = dijkstra_graph();
    let dot = graph.graph_viz("MyGraph");
    assert!(dot.starts_with("digraph MyGraph {\n"));
    assert!(dot.ends_with("}\n"));
    assert_eq!(dot.lines().count(), 13);
    for line in [
        "\"a\" -> \"b\" [label=\"1.0\"]",
        "\"b\" -> \"e\" [label=\"10.0\"]",
        "\"g\" -> \"f\" [label=\"5.0\"]",
    ] {
        assert!(dot.lines().any(|l| l == line), "missing {line}");
    }
}

#[test]
fn test_graph_viz_bidirectional_pairs() {
    let mut graph = Graph::new();
    graph.add_edge_bidirectional("a", "b", 1.0);
    graph.add_edge_bidirectional("a", "c", 4.0);
    graph.add_edge_bidirectional("c", "d", 2.0);

    let dot = graph.graph_viz("MyGraph");
    let lines: Vec<&str> = dot.lines().collect();
    assert_eq!(lines.len(), 8);

    // every edge line is immediately followed or preceded by its mirror
    for pair in lines[1..7].chunks(2) {
        let forward: Vec<&str> = pair[0].split('"').collect();
        let backward: Vec<&str> = pair[1].split('"').collect();
        assert_eq!(forward[1], backward[3]);
        assert_eq!(forward[3], backward[1]);
        assert_eq!(forward[5], backward[5]);
    }
}

#[test]
fn test_graph_viz_empty() {
    let graph: Graph<&str> = Graph::new();
    assert_eq!(graph.graph_viz("MyGraph"), "digraph MyGraph {\n}\n");
}
