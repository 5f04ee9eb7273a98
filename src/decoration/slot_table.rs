//! Per-element decoration slot table.
//!
//! Every vertex, every edge, and the graph itself carry one of these. A
//! [`DecorationContext`](super::DecorationContext) reserves one index (its
//! channel) and stores a [`SlotHandle`] there on each element it decorates.

use serde::{Deserialize, Serialize};

/// Index under which one decoration context registers on every element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Channel(pub usize);

impl Channel {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tagged decoration handle.
///
/// `Vertex` and `Edge` carry an index into the owning context's record
/// storage. `Channel` is stored on the graph's own table to mark the
/// channel as reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotHandle {
    Channel,
    Vertex(u32),
    Edge(u32),
}

impl SlotHandle {
    pub fn as_vertex(self) -> Option<usize> {
        match self {
            SlotHandle::Vertex(i) => Some(i as usize),
            _ => None,
        }
    }

    pub fn as_edge(self) -> Option<usize> {
        match self {
            SlotHandle::Edge(i) => Some(i as usize),
            _ => None,
        }
    }
}

/// Growable, index-addressed table of decoration handles.
///
/// Indices are never compacted. A caller must `reset` an index before
/// anyone else may reuse it.
#[derive(Debug, Clone, Default)]
pub struct SlotTable {
    items: Vec<Option<SlotHandle>>,
    live: usize,
}

impl SlotTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `handle` at `index`, growing the table as needed.
    ///
    /// Returns the handle that was displaced, if the slot was occupied.
    pub fn set(&mut self, index: usize, handle: SlotHandle) -> Option<SlotHandle> {
        if self.items.len() <= index {
            self.items.resize(index + 1, None);
        }
        let previous = self.items[index].replace(handle);
        if previous.is_none() {
            self.live += 1;
        }
        previous
    }

    /// Clear `index`, returning what was stored there.
    pub fn reset(&mut self, index: usize) -> Option<SlotHandle> {
        let previous = self.items.get_mut(index).and_then(Option::take);
        if previous.is_some() {
            self.live -= 1;
        }
        previous
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.live = 0;
    }

    pub fn get(&self, index: usize) -> Option<SlotHandle> {
        self.items.get(index).copied().flatten()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// First empty index, or one past the end.
    pub fn free_index(&self) -> usize {
        self.items
            .iter()
            .position(Option::is_none)
            .unwrap_or(self.items.len())
    }

    /// One past the highest index ever allocated.
    pub fn next_index(&self) -> usize {
        self.items.len()
    }

    /// Number of occupied slots.
    pub fn live_count(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}
