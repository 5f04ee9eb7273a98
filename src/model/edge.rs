//! Edge (connector) between two vertices.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::VertexId;
use crate::decoration::{Channel, SlotHandle, SlotTable};

/// Generational edge identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl EdgeId {
    pub fn index(&self) -> usize {
        self.index as usize
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "e{}:{}", self.index, self.generation)
    }
}

/// How an edge registers itself in its endpoints' caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EdgeKind {
    /// `from`'s outgoing caches and `to`'s incoming caches only.
    #[default]
    Directed,
    /// Both endpoints' incoming and outgoing caches.
    Bidirectional,
}

/// An edge owned by the graph arena.
#[derive(Debug)]
pub struct Edge<E> {
    id: EdgeId,
    from: VertexId,
    to: VertexId,
    kind: EdgeKind,
    pub data: E,
    slots: RwLock<SlotTable>,
}

impl<E> Edge<E> {
    pub(crate) fn new(id: EdgeId, from: VertexId, to: VertexId, kind: EdgeKind, data: E) -> Self {
        Self {
            id,
            from,
            to,
            kind,
            data,
            slots: RwLock::new(SlotTable::new()),
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn from(&self) -> VertexId {
        self.from
    }

    pub fn to(&self) -> VertexId {
        self.to
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    pub fn is_bidirectional(&self) -> bool {
        self.kind == EdgeKind::Bidirectional
    }

    /// The "other" end of the edge from the given vertex.
    pub fn other_end(&self, v: VertexId) -> Option<VertexId> {
        if v == self.from { Some(self.to) }
        else if v == self.to { Some(self.from) }
        else { None }
    }

    /// Whether this edge can be traversed from `from` to `to`.
    pub fn leads(&self, from: VertexId, to: VertexId) -> bool {
        (self.from == from && self.to == to)
            || (self.is_bidirectional() && self.from == to && self.to == from)
    }

    /// Handle registered on this edge under `channel`, if any.
    pub fn decoration(&self, channel: Channel) -> Option<SlotHandle> {
        self.slots.read().get(channel.index())
    }

    pub fn decoration_count(&self) -> usize {
        self.slots.read().live_count()
    }

    pub(crate) fn slots(&self) -> &RwLock<SlotTable> {
        &self.slots
    }

    /// `(outgoing, incoming)` cache roles of the `from` endpoint.
    pub(crate) fn from_roles(&self) -> (bool, bool) {
        match self.kind {
            EdgeKind::Directed => (true, false),
            EdgeKind::Bidirectional => (true, true),
        }
    }

    /// `(outgoing, incoming)` cache roles of the `to` endpoint.
    pub(crate) fn to_roles(&self) -> (bool, bool) {
        match self.kind {
            EdgeKind::Directed => (false, true),
            EdgeKind::Bidirectional => (true, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vid(index: u32) -> VertexId {
        VertexId { index, generation: 0 }
    }

    fn edge(kind: EdgeKind) -> Edge<()> {
        Edge::new(EdgeId { index: 0, generation: 0 }, vid(1), vid(2), kind, ())
    }

    #[test]
    fn test_directed_leads_one_way() {
        let e = edge(EdgeKind::Directed);
        assert!(e.leads(vid(1), vid(2)));
        assert!(!e.leads(vid(2), vid(1)));
        assert_eq!(e.from_roles(), (true, false));
        assert_eq!(e.to_roles(), (false, true));
    }

    #[test]
    fn test_bidirectional_leads_both_ways() {
        let e = edge(EdgeKind::Bidirectional);
        assert!(e.leads(vid(1), vid(2)));
        assert!(e.leads(vid(2), vid(1)));
        assert!(!e.leads(vid(1), vid(3)));
        assert_eq!(e.from_roles(), (true, true));
        assert_eq!(e.to_roles(), (true, true));
    }

    #[test]
    fn test_other_end() {
        let e = edge(EdgeKind::Directed);
        assert_eq!(e.other_end(vid(1)), Some(vid(2)));
        assert_eq!(e.other_end(vid(2)), Some(vid(1)));
        assert_eq!(e.other_end(vid(9)), None);
    }
}
