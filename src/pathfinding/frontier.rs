//! Frontier of discovered, not yet explored edges.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use super::FrontierKind;
use crate::model::EdgeId;

#[derive(Debug)]
pub(crate) enum Frontier {
    Fifo(VecDeque<EdgeId>),
    CostOrdered { heap: BinaryHeap<Queued>, seq: u64 },
}

/// Heap entry. Ordered so that `BinaryHeap` pops the lowest key first and,
/// among equal keys, the earliest push.
#[derive(Debug)]
pub(crate) struct Queued {
    key: f64,
    seq: u64,
    edge: EdgeId,
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .total_cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl Frontier {
    pub(crate) fn new(kind: FrontierKind) -> Self {
        match kind {
            FrontierKind::Fifo => Frontier::Fifo(VecDeque::new()),
            FrontierKind::CostOrdered => Frontier::CostOrdered { heap: BinaryHeap::new(), seq: 0 },
        }
    }

    /// Queue `edge`. `key` is the cost at which it would reach its far end;
    /// the FIFO variant ignores it.
    pub(crate) fn push(&mut self, edge: EdgeId, key: f64) {
        match self {
            Frontier::Fifo(queue) => queue.push_back(edge),
            Frontier::CostOrdered { heap, seq } => {
                heap.push(Queued { key, seq: *seq, edge });
                *seq += 1;
            }
        }
    }

    /// Next edge and its key (`None` for FIFO, which tracks no keys).
    pub(crate) fn pop(&mut self) -> Option<(EdgeId, Option<f64>)> {
        match self {
            Frontier::Fifo(queue) => queue.pop_front().map(|e| (e, None)),
            Frontier::CostOrdered { heap, .. } => heap.pop().map(|q| (q.edge, Some(q.key))),
        }
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            Frontier::Fifo(queue) => queue.len(),
            Frontier::CostOrdered { heap, .. } => heap.len(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
