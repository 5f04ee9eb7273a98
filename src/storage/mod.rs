//! # Graph Store
//!
//! Arena-owned vertices and edges with automatically maintained adjacency
//! caches.
//!
//! ## Invariants
//!
//! - A vertex's caches mirror exactly the edges that currently reference it.
//! - An edge is registered in its endpoints' caches for exactly its lifetime.
//! - No edge references a vertex that is not in the graph.
//!
//! ## Decorations
//!
//! The graph also owns the channel registry used by
//! [`DecorationContext`](crate::DecorationContext). A context borrows the
//! graph immutably, so structural mutation is impossible while any context
//! is alive; each context's registrations are gone by the time `&mut Graph`
//! is available again.

mod arena;
pub mod shared;

use hashbrown::HashSet;
use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::decoration::{Channel, SlotHandle, SlotTable};
use crate::model::*;
use crate::{Error, Result};
use arena::Arena;

pub use shared::SharedGraph;

// ============================================================================
// Graph
// ============================================================================

/// Mutable directed graph with vertex payload `V` and edge payload `E`.
#[derive(Debug)]
pub struct Graph<V, E> {
    vertices: Arena<VertexId, Vertex<V>>,
    edges: Arena<EdgeId, Edge<E>>,
    /// Graph-level slot table: one `SlotHandle::Channel` per live context.
    channels: RwLock<SlotTable>,
}

impl<V, E> Graph<V, E> {
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// Pre-allocate for a known graph size.
    pub fn with_capacity(vertex_count: usize, edge_count: usize) -> Self {
        Self {
            vertices: Arena::with_capacity(vertex_count),
            edges: Arena::with_capacity(edge_count),
            channels: RwLock::new(SlotTable::new()),
        }
    }

    // ========================================================================
    // Vertices
    // ========================================================================

    /// Add a vertex carrying `data`.
    ///
    /// # Panics
    ///
    /// If all `u32::MAX` vertex slots are live. Use
    /// [`try_create_vertex`](Self::try_create_vertex) to get an error instead.
    pub fn create_vertex(&mut self, data: V) -> VertexId {
        self.try_create_vertex(data).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_create_vertex(&mut self, data: V) -> Result<VertexId> {
        self.vertices.insert_with(|id| Vertex::new(id, data))
    }

    pub fn create_vertices(&mut self, data: impl IntoIterator<Item = V>) -> Vec<VertexId> {
        data.into_iter().map(|d| self.create_vertex(d)).collect()
    }

    pub fn vertex(&self, id: VertexId) -> Result<&Vertex<V>> {
        self.vertices
            .get(id)
            .ok_or_else(|| Error::NotFound(format!("Vertex {id}")))
    }

    pub fn vertex_mut(&mut self, id: VertexId) -> Result<&mut Vertex<V>> {
        self.vertices
            .get_mut(id)
            .ok_or_else(|| Error::NotFound(format!("Vertex {id}")))
    }

    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertices.contains(id)
    }

    /// Remove a vertex together with every edge incident to it.
    ///
    /// Returns the vertex payload.
    pub fn remove_vertex(&mut self, id: VertexId) -> Result<V> {
        let incident: HashSet<EdgeId> = self.vertex(id)?.edges().iter().copied().collect();
        for edge in &incident {
            self.remove_edge(*edge)?;
        }
        let vertex = self
            .vertices
            .remove(id)
            .ok_or_else(|| Error::NotFound(format!("Vertex {id}")))?;
        debug!(vertex = %id, edges = incident.len(), "vertex removed");
        Ok(vertex.data)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Vertex<V>> + '_ {
        self.vertices.iter().map(|(_, v)| v)
    }

    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.keys()
    }

    // ========================================================================
    // Edges
    // ========================================================================

    /// Return the directed edge `from → to`, creating it with `data` if
    /// there is none yet.
    ///
    /// The lookup goes through `to`'s incoming-neighbor cache, so any edge
    /// already leading from `from` to `to` (including a bidirectional one)
    /// is returned and `data` is dropped.
    pub fn edge_between(&mut self, from: VertexId, to: VertexId, data: E) -> Result<EdgeId> {
        self.link(from, to, EdgeKind::Directed, data)
    }

    /// Same contract as [`edge_between`](Self::edge_between) for a
    /// bidirectional edge.
    pub fn bidirectional_edge_between(&mut self, a: VertexId, b: VertexId, data: E) -> Result<EdgeId> {
        self.link(a, b, EdgeKind::Bidirectional, data)
    }

    /// Existing edge that can be traversed from `from` to `to`.
    pub fn find_edge(&self, from: VertexId, to: VertexId) -> Option<EdgeId> {
        let target = self.vertices.get(to)?;
        if !target.incoming_neighbors().contains(&from) {
            return None;
        }
        target
            .incoming_edges()
            .iter()
            .copied()
            .find(|&e| self.edges.get(e).is_some_and(|edge| edge.leads(from, to)))
    }

    pub fn edge(&self, id: EdgeId) -> Result<&Edge<E>> {
        self.edges
            .get(id)
            .ok_or_else(|| Error::NotFound(format!("Edge {id}")))
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> Result<&mut Edge<E>> {
        self.edges
            .get_mut(id)
            .ok_or_else(|| Error::NotFound(format!("Edge {id}")))
    }

    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edges.contains(id)
    }

    /// Unlink an edge from both endpoints and drop it, returning its payload.
    pub fn remove_edge(&mut self, id: EdgeId) -> Result<E> {
        let edge = self
            .edges
            .remove(id)
            .ok_or_else(|| Error::NotFound(format!("Edge {id}")))?;

        let (out, inc) = edge.from_roles();
        if let Some(v) = self.vertices.get_mut(edge.from()) {
            v.detach(id, edge.to(), out, inc);
        }
        let (out, inc) = edge.to_roles();
        if let Some(v) = self.vertices.get_mut(edge.to()) {
            v.detach(id, edge.from(), out, inc);
        }

        trace!(edge = %id, from = %edge.from(), to = %edge.to(), "edge removed");
        Ok(edge.data)
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge<E>> + '_ {
        self.edges.iter().map(|(_, e)| e)
    }

    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.keys()
    }

    /// Drop every vertex and edge. Previously issued ids become stale.
    pub fn clear(&mut self) {
        self.edges.clear();
        self.vertices.clear();
        debug!("graph cleared");
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.len() == 0
    }

    fn link(&mut self, from: VertexId, to: VertexId, kind: EdgeKind, data: E) -> Result<EdgeId> {
        // Verify both vertices exist
        self.vertex(from)?;
        self.vertex(to)?;

        if let Some(existing) = self.find_edge(from, to) {
            return Ok(existing);
        }

        let id = self.edges.insert_with(|id| Edge::new(id, from, to, kind, data))?;
        let (from_roles, to_roles) = {
            let edge = self.edge(id)?;
            (edge.from_roles(), edge.to_roles())
        };

        // Update adjacency for both endpoints
        self.vertex_mut(from)?.attach(id, to, from_roles.0, from_roles.1);
        self.vertex_mut(to)?.attach(id, from, to_roles.0, to_roles.1);

        trace!(edge = %id, %from, %to, ?kind, "edge created");
        Ok(id)
    }

    // ========================================================================
    // Decoration channels
    // ========================================================================

    /// Whether a decoration context currently holds `channel`.
    pub fn channel_in_use(&self, channel: Channel) -> bool {
        self.channels.read().contains(channel.index())
    }

    /// Number of decoration contexts currently attached.
    pub fn channel_count(&self) -> usize {
        self.channels.read().live_count()
    }

    pub(crate) fn acquire_channel(&self) -> Channel {
        let mut channels = self.channels.write();
        let index = channels.free_index();
        channels.set(index, SlotHandle::Channel);
        Channel(index)
    }

    pub(crate) fn release_channel(&self, channel: Channel) {
        self.channels.write().reset(channel.index());
    }
}

impl<V, E> Default for Graph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> (Graph<&'static str, u32>, VertexId, VertexId, VertexId) {
        let mut g = Graph::new();
        let a = g.create_vertex("a");
        let b = g.create_vertex("b");
        let c = g.create_vertex("c");
        g.edge_between(a, b, 1).unwrap();
        g.edge_between(b, c, 2).unwrap();
        g.edge_between(c, a, 3).unwrap();
        (g, a, b, c)
    }

    #[test]
    fn test_create_vertex() {
        let mut g: Graph<&str, ()> = Graph::new();
        let a = g.create_vertex("a");
        assert_eq!(g.vertex(a).unwrap().data, "a");
        assert_eq!(g.vertex(a).unwrap().id(), a);
        assert_eq!(g.vertex_count(), 1);

        let b = g.try_create_vertex("b").unwrap();
        assert_eq!(g.vertex(b).unwrap().data, "b");
        assert_eq!(g.vertex_count(), 2);
    }

    #[test]
    fn test_edge_between_registers_caches() {
        let mut g: Graph<(), ()> = Graph::new();
        let a = g.create_vertex(());
        let b = g.create_vertex(());
        let e = g.edge_between(a, b, ()).unwrap();

        let va = g.vertex(a).unwrap();
        let vb = g.vertex(b).unwrap();
        assert_eq!(va.outgoing_edges(), &[e]);
        assert!(va.incoming_edges().is_empty());
        assert_eq!(va.outgoing_neighbors(), &[b]);
        assert_eq!(vb.incoming_edges(), &[e]);
        assert!(vb.outgoing_edges().is_empty());
        assert_eq!(vb.incoming_neighbors(), &[a]);
        assert_eq!(va.edges(), &[e]);
        assert_eq!(vb.edges(), &[e]);
    }

    #[test]
    fn test_edge_between_dedups() {
        let mut g: Graph<(), &str> = Graph::new();
        let a = g.create_vertex(());
        let b = g.create_vertex(());
        let first = g.edge_between(a, b, "first").unwrap();
        let second = g.edge_between(a, b, "second").unwrap();

        assert_eq!(first, second);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.edge(first).unwrap().data, "first");

        // The reverse direction is a different ordered pair.
        let back = g.edge_between(b, a, "back").unwrap();
        assert_ne!(back, first);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn test_bidirectional_registers_symmetrically() {
        let mut g: Graph<(), ()> = Graph::new();
        let a = g.create_vertex(());
        let b = g.create_vertex(());
        let e = g.bidirectional_edge_between(a, b, ()).unwrap();

        for v in [a, b] {
            let vertex = g.vertex(v).unwrap();
            assert_eq!(vertex.outgoing_edges(), &[e]);
            assert_eq!(vertex.incoming_edges(), &[e]);
        }
        assert_eq!(g.find_edge(b, a), Some(e));
        assert_eq!(g.edge_between(b, a, ()).unwrap(), e);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_edge_to_missing_vertex() {
        let mut g: Graph<(), ()> = Graph::new();
        let a = g.create_vertex(());
        let b = g.create_vertex(());
        g.remove_vertex(b).unwrap();

        let result = g.edge_between(a, b, ());
        assert!(matches!(result, Err(Error::NotFound(_))));
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_remove_vertex_cascades() {
        let (mut g, a, b, c) = triangle();
        assert_eq!(g.remove_vertex(b).unwrap(), "b");

        assert_eq!(g.vertex_count(), 2);
        assert_eq!(g.edge_count(), 1);
        let va = g.vertex(a).unwrap();
        let vc = g.vertex(c).unwrap();
        assert!(va.outgoing_edges().is_empty());
        assert_eq!(va.incoming_neighbors(), &[c]);
        assert!(vc.incoming_edges().is_empty());
        assert_eq!(vc.outgoing_neighbors(), &[a]);
        assert!(matches!(g.vertex(b), Err(Error::NotFound(_))));
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
    fn test_remove_edge_returns_payload() {
        let (mut g, a, b, _) = triangle();
        let e = g.find_edge(a, b).unwrap();
        assert_eq!(g.remove_edge(e).unwrap(), 1);
        assert_eq!(g.find_edge(a, b), None);
        assert!(matches!(g.remove_edge(e), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_clear_invalidates_ids() {
        let (mut g, a, _, _) = triangle();
        g.clear();
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
        assert!(!g.contains_vertex(a));

        let fresh = g.create_vertex("fresh");
        assert_ne!(fresh, a);
        assert!(g.vertex(a).is_err());
    }

    #[test]
    fn test_channel_registry() {
        let g: Graph<(), ()> = Graph::new();
        let c0 = g.acquire_channel();
        let c1 = g.acquire_channel();
        assert_eq!((c0, c1), (Channel(0), Channel(1)));
        assert_eq!(g.channel_count(), 2);

        g.release_channel(c0);
        assert!(!g.channel_in_use(c0));
        assert_eq!(g.acquire_channel(), c0);
    }
}
