//! Decoration context: one algorithm run's private per-element state.

use hashbrown::HashSet;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Channel, SlotHandle, SlotTable};
use crate::model::*;
use crate::pathfinding::{CostEvaluator, UnitCost};
use crate::storage::Graph;
use crate::{Error, Result};

// ============================================================================
// Decoration records
// ============================================================================

/// Processing state of an edge during a search.
///
/// Kept on the edge rather than the vertex because the search walks edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum ProcessingState {
    /// Not seen by the current run yet.
    #[default]
    Unexplored = 0,
    /// Sitting in the frontier.
    Discovered = 1,
    /// Reserved for pruning; no search assigns it.
    Excluded = 254,
    /// Fully processed.
    Explored = 255,
}

/// Per-vertex scratch record.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexDecoration {
    vertex: VertexId,
    entry: Option<PathEntry>,
}

impl VertexDecoration {
    fn new(vertex: VertexId) -> Self {
        Self { vertex, entry: None }
    }

    pub fn vertex(&self) -> VertexId {
        self.vertex
    }

    /// How this vertex was reached. `None` for the root or an unvisited vertex.
    pub fn entry(&self) -> Option<&PathEntry> {
        self.entry.as_ref()
    }

    /// Accumulated cost, if the vertex has been reached.
    pub fn cost(&self) -> Option<f64> {
        self.entry.map(|e| e.cost)
    }

    pub(crate) fn set_entry(&mut self, entry: PathEntry) {
        self.entry = Some(entry);
    }

    pub(crate) fn clear(&mut self) {
        self.entry = None;
    }
}

/// Per-edge scratch record.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeDecoration {
    edge: EdgeId,
    cost: Option<f64>,
    state: ProcessingState,
}

impl EdgeDecoration {
    fn new(edge: EdgeId, cost: f64) -> Self {
        Self { edge, cost: Some(cost), state: ProcessingState::Unexplored }
    }

    pub fn edge(&self) -> EdgeId {
        self.edge
    }

    /// Traversal cost cached from the evaluator.
    pub fn cost(&self) -> Option<f64> {
        self.cost
    }

    pub fn state(&self) -> ProcessingState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: ProcessingState) {
        self.state = state;
    }

    fn reset(&mut self, cost: f64) {
        self.cost = Some(cost);
        self.state = ProcessingState::Unexplored;
    }
}

// ============================================================================
// DecorationContext
// ============================================================================

/// Reserves one channel on a graph and decorates every vertex and edge
/// under it.
///
/// The records live here; elements only hold a [`SlotHandle`] pointing
/// back into this context. Dropping the context removes the handles and
/// frees the channel, leaving the graph undecorated.
pub struct DecorationContext<'g, V, E, C = UnitCost> {
    graph: &'g Graph<V, E>,
    channel: Channel,
    evaluator: C,
    vertices: Vec<VertexDecoration>,
    edges: Vec<EdgeDecoration>,
    /// Set once a run has touched the records; the next run resets first.
    dirty: bool,
}

impl<'g, V, E, C: CostEvaluator<V, E>> DecorationContext<'g, V, E, C> {
    /// Decorate every current vertex and edge of `graph`.
    ///
    /// Each edge cost is evaluated once here. An evaluator failure aborts
    /// construction and releases whatever was already registered.
    pub fn new(graph: &'g Graph<V, E>, evaluator: C) -> Result<Self> {
        let channel = graph.acquire_channel();
        let mut ctx = Self {
            graph,
            channel,
            evaluator,
            vertices: Vec::with_capacity(graph.vertex_count()),
            edges: Vec::with_capacity(graph.edge_count()),
            dirty: false,
        };

        for vertex in graph.vertices() {
            let handle = SlotHandle::Vertex(ctx.vertices.len() as u32);
            register(vertex.slots(), channel, handle, vertex.id())?;
            ctx.vertices.push(VertexDecoration::new(vertex.id()));
        }
        for edge in graph.edges() {
            let cost = evaluate(&ctx.evaluator, graph, edge)?;
            let handle = SlotHandle::Edge(ctx.edges.len() as u32);
            register(edge.slots(), channel, handle, edge.id())?;
            ctx.edges.push(EdgeDecoration::new(edge.id(), cost));
        }

        debug!(
            channel = channel.index(),
            vertices = ctx.vertices.len(),
            edges = ctx.edges.len(),
            "decoration context attached"
        );
        Ok(ctx)
    }

    /// Return every record to its initial state and re-evaluate edge costs.
    ///
    /// The channel is kept, so repeated runs cost no reallocation.
    pub fn reset(&mut self) -> Result<()> {
        for node in &mut self.vertices {
            node.clear();
        }
        for node in &mut self.edges {
            let edge = self.graph.edge(node.edge)?;
            node.reset(evaluate(&self.evaluator, self.graph, edge)?);
        }
        self.dirty = false;
        Ok(())
    }

    /// Prepare the records for a new run.
    pub(crate) fn begin_run(&mut self) -> Result<()> {
        if self.dirty {
            self.reset()?;
        }
        self.dirty = true;
        Ok(())
    }
}

impl<'g, V, E, C> DecorationContext<'g, V, E, C> {
    pub fn graph(&self) -> &'g Graph<V, E> {
        self.graph
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn evaluator(&self) -> &C {
        &self.evaluator
    }

    pub fn vertex_decorations(&self) -> &[VertexDecoration] {
        &self.vertices
    }

    pub fn edge_decorations(&self) -> &[EdgeDecoration] {
        &self.edges
    }

    // ========================================================================
    // Lookup through the element slot tables
    // ========================================================================

    /// This context's record for `vertex`.
    pub fn vertex_node(&self, vertex: VertexId) -> Result<&VertexDecoration> {
        let index = self.vertex_slot(vertex)?;
        self.vertices
            .get(index)
            .filter(|d| d.vertex == vertex)
            .ok_or_else(|| self.stale(format!("Vertex {vertex}")))
    }

    pub(crate) fn vertex_node_mut(&mut self, vertex: VertexId) -> Result<&mut VertexDecoration> {
        let index = self.vertex_slot(vertex)?;
        let channel = self.channel;
        self.vertices
            .get_mut(index)
            .filter(|d| d.vertex == vertex)
            .ok_or_else(|| stale(channel, format!("Vertex {vertex}")))
    }

    /// This context's record for `edge`.
    pub fn edge_node(&self, edge: EdgeId) -> Result<&EdgeDecoration> {
        let index = self.edge_slot(edge)?;
        self.edges
            .get(index)
            .filter(|d| d.edge == edge)
            .ok_or_else(|| self.stale(format!("Edge {edge}")))
    }

    pub(crate) fn edge_node_mut(&mut self, edge: EdgeId) -> Result<&mut EdgeDecoration> {
        let index = self.edge_slot(edge)?;
        let channel = self.channel;
        self.edges
            .get_mut(index)
            .filter(|d| d.edge == edge)
            .ok_or_else(|| stale(channel, format!("Edge {edge}")))
    }

    pub fn vertex_nodes(
        &self,
        vertices: impl IntoIterator<Item = VertexId>,
    ) -> Result<Vec<&VertexDecoration>> {
        vertices.into_iter().map(|v| self.vertex_node(v)).collect()
    }

    pub fn edge_nodes(&self, edges: impl IntoIterator<Item = EdgeId>) -> Result<Vec<&EdgeDecoration>> {
        edges.into_iter().map(|e| self.edge_node(e)).collect()
    }

    /// Walk Entry back-pointers from `destination` to the root.
    ///
    /// Returns an empty path when `destination` has no Entry.
    pub fn path_to(&self, destination: VertexId) -> Result<Path> {
        let mut entries = Vec::new();
        let mut seen = HashSet::new();
        let mut current = destination;

        while let Some(entry) = self.vertex_node(current)?.entry {
            if !seen.insert(current) {
                return Err(Error::InvalidState(format!(
                    "back-pointer cycle through vertex {current} on channel {}",
                    self.channel
                )));
            }
            entries.push(entry);
            current = entry.from;
        }

        entries.reverse();
        Ok(Path::new(entries))
    }

    fn vertex_slot(&self, vertex: VertexId) -> Result<usize> {
        self.graph
            .vertex(vertex)?
            .decoration(self.channel)
            .and_then(SlotHandle::as_vertex)
            .ok_or_else(|| self.stale(format!("Vertex {vertex}")))
    }

    fn edge_slot(&self, edge: EdgeId) -> Result<usize> {
        self.graph
            .edge(edge)?
            .decoration(self.channel)
            .and_then(SlotHandle::as_edge)
            .ok_or_else(|| self.stale(format!("Edge {edge}")))
    }

    fn stale(&self, what: String) -> Error {
        stale(self.channel, what)
    }
}

impl<V, E, C> Drop for DecorationContext<'_, V, E, C> {
    fn drop(&mut self) {
        let index = self.channel.index();
        for node in &self.vertices {
            if let Ok(vertex) = self.graph.vertex(node.vertex) {
                vertex.slots().write().reset(index);
            }
        }
        for node in &self.edges {
            if let Ok(edge) = self.graph.edge(node.edge) {
                edge.slots().write().reset(index);
            }
        }
        self.graph.release_channel(self.channel);
        debug!(channel = index, "decoration context released");
    }
}

impl<V, E, C> std::fmt::Debug for DecorationContext<'_, V, E, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecorationContext")
            .field("channel", &self.channel)
            .field("vertices", &self.vertices.len())
            .field("edges", &self.edges.len())
            .finish()
    }
}

fn register(
    slots: &RwLock<SlotTable>,
    channel: Channel,
    handle: SlotHandle,
    owner: impl std::fmt::Display,
) -> Result<()> {
    let mut slots = slots.write();
    if slots.contains(channel.index()) {
        return Err(Error::InvalidState(format!(
            "{owner} already carries a decoration on channel {channel}"
        )));
    }
    slots.set(channel.index(), handle);
    Ok(())
}

fn stale(channel: Channel, what: String) -> Error {
    Error::InvalidState(format!("{what} is not decorated on channel {channel}"))
}

fn evaluate<V, E, C: CostEvaluator<V, E>>(
    evaluator: &C,
    graph: &Graph<V, E>,
    edge: &Edge<E>,
) -> Result<f64> {
    let cost = evaluator
        .cost(graph, edge)
        .map_err(|source| Error::Evaluator { edge: edge.id(), source })?;
    if !cost.is_finite() || cost < 0.0 {
        return Err(Error::InvalidCost { edge: edge.id(), cost });
    }
    Ok(cost)
}

// ============================================================================
// Tests
// ============================================================================
