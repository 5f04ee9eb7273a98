//! Path: the result handed from a search to its caller.

use serde::{Deserialize, Serialize};

use super::{EdgeId, VertexId};

/// One hop of a path: how a vertex was reached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathEntry {
    /// Predecessor vertex.
    pub from: VertexId,
    /// Edge traversed from `from`.
    pub edge: EdgeId,
    /// Total cost from the root up to and including `edge`.
    pub cost: f64,
}

impl PathEntry {
    pub fn new(from: VertexId, edge: EdgeId, cost: f64) -> Self {
        Self { from, edge, cost }
    }
}

/// A path ordered source-adjacent first, destination last.
///
/// An empty path means the destination was not reached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub entries: Vec<PathEntry>,
}

impl Path {
    pub fn new(entries: Vec<PathEntry>) -> Self {
        Self { entries }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of edges in the path.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Accumulated cost at the destination, or `0.0` for an empty path.
    pub fn cost(&self) -> f64 {
        self.entries.last().map_or(0.0, |e| e.cost)
    }

    /// The vertex the path starts from.
    pub fn source(&self) -> Option<VertexId> {
        self.entries.first().map(|e| e.from)
    }

    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.entries.iter().map(|e| e.edge)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathEntry;
    type IntoIter = std::slice::Iter<'a, PathEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
