//! Vertex in the graph.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::EdgeId;
use crate::decoration::{Channel, SlotHandle, SlotTable};

/// Adjacency caches stay inline until a vertex has more than four entries.
pub(crate) type EdgeList = SmallVec<[EdgeId; 4]>;
pub(crate) type VertexList = SmallVec<[VertexId; 4]>;

/// Generational vertex identifier.
///
/// The generation changes every time the underlying arena slot is reused,
/// so an id kept past `remove_vertex` or `clear` never aliases a newer vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl VertexId {
    pub fn index(&self) -> usize {
        self.index as usize
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl std::fmt::Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}:{}", self.index, self.generation)
    }
}

/// A vertex: caller payload plus adjacency caches maintained by the graph.
///
/// The caches are multisets. A self-loop shows up twice in `edges()`, and
/// two opposite directed edges make the other endpoint appear twice in
/// `neighbors()`.
#[derive(Debug)]
pub struct Vertex<V> {
    id: VertexId,
    pub data: V,
    edges: EdgeList,
    incoming_edges: EdgeList,
    outgoing_edges: EdgeList,
    neighbors: VertexList,
    incoming_neighbors: VertexList,
    outgoing_neighbors: VertexList,
    slots: RwLock<SlotTable>,
}

impl<V> Vertex<V> {
    pub(crate) fn new(id: VertexId, data: V) -> Self {
        Self {
            id,
            data,
            edges: EdgeList::new(),
            incoming_edges: EdgeList::new(),
            outgoing_edges: EdgeList::new(),
            neighbors: VertexList::new(),
            incoming_neighbors: VertexList::new(),
            outgoing_neighbors: VertexList::new(),
            slots: RwLock::new(SlotTable::new()),
        }
    }

    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Every incident edge, in registration order.
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    pub fn incoming_edges(&self) -> &[EdgeId] {
        &self.incoming_edges
    }

    pub fn outgoing_edges(&self) -> &[EdgeId] {
        &self.outgoing_edges
    }

    pub fn neighbors(&self) -> &[VertexId] {
        &self.neighbors
    }

    pub fn incoming_neighbors(&self) -> &[VertexId] {
        &self.incoming_neighbors
    }

    pub fn outgoing_neighbors(&self) -> &[VertexId] {
        &self.outgoing_neighbors
    }

    pub fn degree(&self) -> usize {
        self.edges.len()
    }

    /// Handle registered on this vertex under `channel`, if any.
    pub fn decoration(&self, channel: Channel) -> Option<SlotHandle> {
        self.slots.read().get(channel.index())
    }

    /// Number of decoration channels currently registered on this vertex.
    pub fn decoration_count(&self) -> usize {
        self.slots.read().live_count()
    }

    pub(crate) fn slots(&self) -> &RwLock<SlotTable> {
        &self.slots
    }

    /// Register `edge` (whose opposite endpoint is `other`) in the caches
    /// selected by `outgoing` / `incoming`.
    pub(crate) fn attach(&mut self, edge: EdgeId, other: VertexId, outgoing: bool, incoming: bool) {
        self.edges.push(edge);
        self.neighbors.push(other);
        if outgoing {
            self.outgoing_edges.push(edge);
            self.outgoing_neighbors.push(other);
        }
        if incoming {
            self.incoming_edges.push(edge);
            self.incoming_neighbors.push(other);
        }
    }

    /// Exact inverse of [`attach`](Self::attach) for the same arguments.
    pub(crate) fn detach(&mut self, edge: EdgeId, other: VertexId, outgoing: bool, incoming: bool) {
        remove_one(&mut self.edges, edge);
        remove_one(&mut self.neighbors, other);
        if outgoing {
            remove_one(&mut self.outgoing_edges, edge);
            remove_one(&mut self.outgoing_neighbors, other);
        }
        if incoming {
            remove_one(&mut self.incoming_edges, edge);
            remove_one(&mut self.incoming_neighbors, other);
        }
    }
}

/// Remove the first occurrence of `item`, keeping the order of the rest.
fn remove_one<A>(list: &mut SmallVec<A>, item: A::Item)
where
    A: smallvec::Array,
    A::Item: PartialEq,
{
    if let Some(pos) = list.iter().position(|x| *x == item) {
        list.remove(pos);
    }
}
