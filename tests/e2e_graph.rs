//! End-to-end tests for graph structure: vertex and edge lifecycle,
//! adjacency caches, edge deduplication, and stale handles.

use decograph::{EdgeKind, Error, Graph, VertexId};
use pretty_assertions::assert_eq;

// ============================================================================
// Helper: a small directed graph A→B, A→C, B→C
// ============================================================================

fn triangle() -> (Graph<&'static str, u32>, VertexId, VertexId, VertexId) {
    let mut g = Graph::new();
    let a = g.create_vertex("A");
    let b = g.create_vertex("B");
    let c = g.create_vertex("C");
    g.edge_between(a, b, 1).unwrap();
    g.edge_between(a, c, 2).unwrap();
    g.edge_between(b, c, 3).unwrap();
    (g, a, b, c)
}

// ============================================================================
// 1. Adjacency
// ============================================================================

#[test]
fn test_adjacency_caches_follow_edge_direction() {
    let (g, a, b, c) = triangle();

    let va = g.vertex(a).unwrap();
    assert_eq!(va.outgoing_neighbors(), &[b, c]);
    assert!(va.incoming_neighbors().is_empty());
    assert_eq!(va.neighbors(), &[b, c]);

    let vc = g.vertex(c).unwrap();
    assert_eq!(vc.incoming_neighbors(), &[a, b]);
    assert!(vc.outgoing_edges().is_empty());
    assert_eq!(vc.degree(), 2);
}

#[test]
fn test_bidirectional_edge_is_outgoing_at_both_ends() {
    let mut g: Graph<(), ()> = Graph::new();
    let a = g.create_vertex(());
    let b = g.create_vertex(());
    let e = g.bidirectional_edge_between(a, b, ()).unwrap();

    assert_eq!(g.edge(e).unwrap().kind(), EdgeKind::Bidirectional);
    for (v, other) in [(a, b), (b, a)] {
        let vertex = g.vertex(v).unwrap();
        assert_eq!(vertex.outgoing_edges(), &[e]);
        assert_eq!(vertex.incoming_edges(), &[e]);
        assert_eq!(vertex.outgoing_neighbors(), &[other]);
    }
    assert_eq!(g.edge(e).unwrap().other_end(a), Some(b));
}

// ============================================================================
// 2. Deduplication
// ============================================================================

#[test]
fn test_repeated_edge_between_returns_existing() {
    let (mut g, a, b, _) = triangle();
    let first = g.find_edge(a, b).unwrap();

    let again = g.edge_between(a, b, 99).unwrap();
    assert_eq!(again, first);
    assert_eq!(g.edge(first).unwrap().data, 1);
    assert_eq!(g.edge_count(), 3);
}

#[test]
fn test_reverse_direction_is_a_new_edge() {
    let (mut g, a, b, _) = triangle();
    let forward = g.find_edge(a, b).unwrap();
    let backward = g.edge_between(b, a, 7).unwrap();

    assert_ne!(forward, backward);
    assert_eq!(g.edge_count(), 4);
    assert_eq!(g.find_edge(b, a), Some(backward));
}

#[test]
fn test_bidirectional_edge_satisfies_either_direction() {
    let mut g: Graph<(), u8> = Graph::new();
    let a = g.create_vertex(());
    let b = g.create_vertex(());
    let e = g.bidirectional_edge_between(a, b, 1).unwrap();

    assert_eq!(g.edge_between(b, a, 2).unwrap(), e);
    assert_eq!(g.edge_count(), 1);
}

// ============================================================================
// 3. Removal
// ============================================================================

#[test]
fn test_remove_edge_updates_both_endpoints() {
    let (mut g, a, b, c) = triangle();
    let ab = g.find_edge(a, b).unwrap();

    assert_eq!(g.remove_edge(ab).unwrap(), 1);
    assert_eq!(g.vertex(a).unwrap().outgoing_neighbors(), &[c]);
    assert!(g.vertex(b).unwrap().incoming_edges().is_empty());
    assert!(matches!(g.edge(ab), Err(Error::NotFound(_))));
}

#[test]
fn test_remove_vertex_drops_incident_edges() {
    let (mut g, a, b, c) = triangle();

    assert_eq!(g.remove_vertex(b).unwrap(), "B");
    assert_eq!(g.vertex_count(), 2);
    assert_eq!(g.edge_count(), 1);
    assert_eq!(g.vertex(a).unwrap().outgoing_neighbors(), &[c]);
    assert_eq!(g.vertex(c).unwrap().incoming_neighbors(), &[a]);
}

#[test]
fn test_remove_vertex_with_self_loop() {
    let mut g: Graph<(), ()> = Graph::new();
    let a = g.create_vertex(());
    let b = g.create_vertex(());
    g.edge_between(a, a, ()).unwrap();
    g.edge_between(a, b, ()).unwrap();

    g.remove_vertex(a).unwrap();
    assert_eq!(g.edge_count(), 0);
    assert_eq!(g.vertex(b).unwrap().degree(), 0);
}

#[test]
fn test_stale_vertex_id_is_not_found() {
    let mut g: Graph<u8, ()> = Graph::new();
    let old = g.create_vertex(1);
    g.remove_vertex(old).unwrap();
    let new = g.create_vertex(2);

    assert_eq!(new.index(), old.index());
    assert_ne!(new, old);
    assert!(matches!(g.vertex(old), Err(Error::NotFound(_))));
    assert!(matches!(g.edge_between(old, new, ()), Err(Error::NotFound(_))));
    assert_eq!(g.vertex(new).unwrap().data, 2);
}

#[test]
fn test_clear_invalidates_everything() {
    let (mut g, a, ..) = triangle();
    g.clear();

    assert!(g.is_empty());
    assert_eq!(g.edge_count(), 0);
    assert!(!g.contains_vertex(a));
}
