//! Cost-based best-first search over a decoration context.
//!
//! ```text
//! seed:    frontier ← Unexplored outgoing edges of source   (→ Discovered)
//! step:    pop e = (f → t)
//!          relax   t.Entry ← (f, e, cost(f) + cost(e))   if strictly cheaper
//!          expand  Unexplored outgoing edges of t (and of f if bidirectional)
//!          e       → Explored
//! finish:  walk Entry back-pointers from destination
//! ```

use tracing::{debug, trace};

use super::frontier::Frontier;
use super::{CostEvaluator, SearchConfig};
use crate::decoration::{DecorationContext, ProcessingState};
use crate::model::*;
use crate::{Error, Result};

/// Outcome of a single [`Search::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// One edge left the frontier and was explored.
    Expanded(EdgeId),
    /// Nothing left to do; [`Search::path`] is final.
    Finished,
}

/// An in-progress search.
///
/// Holds the context exclusively for its lifetime. Callers that want to
/// cancel simply stop calling [`step`](Self::step); the context stays
/// valid and the next search resets it.
pub struct Search<'c, 'g, V, E, C> {
    ctx: &'c mut DecorationContext<'g, V, E, C>,
    frontier: Frontier,
    source: VertexId,
    destination: VertexId,
    expansions: usize,
    max_expansions: Option<usize>,
    finished: bool,
}

impl<'c, 'g, V, E, C: CostEvaluator<V, E>> Search<'c, 'g, V, E, C> {
    /// Reset the context and seed the frontier from `source`.
    pub fn new(
        ctx: &'c mut DecorationContext<'g, V, E, C>,
        source: VertexId,
        destination: VertexId,
        config: &SearchConfig,
    ) -> Result<Self> {
        if ctx.vertex_decorations().is_empty() {
            return Err(Error::InvalidState(format!(
                "search on channel {} over a context with no vertices",
                ctx.channel()
            )));
        }
        ctx.vertex_node(source)?;
        ctx.vertex_node(destination)?;
        if source == destination {
            return Err(Error::InvalidState(format!(
                "search from vertex {source} to itself"
            )));
        }

        ctx.begin_run()?;
        ctx.vertex_node_mut(source)?.clear();

        let mut search = Self {
            ctx,
            frontier: Frontier::new(config.frontier),
            source,
            destination,
            expansions: 0,
            max_expansions: config.max_expansions,
            finished: false,
        };
        search.expand(source)?;
        Ok(search)
    }
}

impl<'c, 'g, V, E, C> Search<'c, 'g, V, E, C> {
    /// Pop and process one frontier edge.
    pub fn step(&mut self) -> Result<Step> {
        if self.finished {
            return Ok(Step::Finished);
        }
        if let Some(limit) = self.max_expansions {
            if self.expansions >= limit && !self.frontier.is_empty() {
                return Err(Error::ExpansionLimit(limit));
            }
        }

        let Some((edge_id, key)) = self.frontier.pop() else {
            return Ok(self.finish());
        };

        // Cost-ordered keys never decrease, so once the cheapest queued
        // edge cannot beat the destination nothing else can.
        if let (Some(key), Some(best)) = (key, self.ctx.vertex_node(self.destination)?.cost()) {
            if key >= best {
                return Ok(self.finish());
            }
        }

        let graph = self.ctx.graph();
        let edge = graph.edge(edge_id)?;
        let (f, t) = (edge.from(), edge.to());
        let cost = edge_cost(self.ctx, edge_id)?;

        self.relax(f, t, edge_id, cost)?;
        if edge.is_bidirectional() && f != self.source {
            self.relax(t, f, edge_id, cost)?;
        }

        self.expand(t)?;
        if edge.is_bidirectional() {
            self.expand(f)?;
        }

        self.ctx.edge_node_mut(edge_id)?.set_state(ProcessingState::Explored);
        self.expansions += 1;
        trace!(edge = %edge_id, from = %f, to = %t, cost, queued = self.frontier.len(), "edge explored");
        Ok(Step::Expanded(edge_id))
    }

    /// Step until the frontier is exhausted, then reconstruct the path.
    pub fn run(mut self) -> Result<Path> {
        while let Step::Expanded(_) = self.step()? {}
        self.path()
    }

    /// Path to the destination as currently known. Final once
    /// [`step`](Self::step) has returned [`Step::Finished`].
    pub fn path(&self) -> Result<Path> {
        self.ctx.path_to(self.destination)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Number of edges explored so far.
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    pub fn source(&self) -> VertexId {
        self.source
    }

    pub fn destination(&self) -> VertexId {
        self.destination
    }

    fn finish(&mut self) -> Step {
        self.finished = true;
        let best = self
            .ctx
            .vertex_node(self.destination)
            .ok()
            .and_then(|node| node.cost());
        debug!(
            source = %self.source,
            destination = %self.destination,
            expansions = self.expansions,
            reached = best.is_some(),
            cost = best.unwrap_or(0.0),
            "search finished"
        );
        Step::Finished
    }

    /// Accumulated cost at `v`: zero for the root, `None` if not reached.
    fn visited_cost(&self, v: VertexId) -> Result<Option<f64>> {
        if v == self.source {
            return Ok(Some(0.0));
        }
        Ok(self.ctx.vertex_node(v)?.cost())
    }

    /// Point `to` at `from` if that is strictly cheaper. Ties keep the
    /// first predecessor found; the root never gets an Entry.
    fn relax(&mut self, from: VertexId, to: VertexId, edge: EdgeId, cost: f64) -> Result<bool> {
        if to == self.source {
            return Ok(false);
        }
        let Some(from_cost) = self.visited_cost(from)? else {
            return Ok(false);
        };

        let full = from_cost + cost;
        let node = self.ctx.vertex_node_mut(to)?;
        match node.cost() {
            Some(current) if full >= current => Ok(false),
            _ => {
                node.set_entry(PathEntry::new(from, edge, full));
                Ok(true)
            }
        }
    }

    /// Move every Unexplored outgoing edge of `v` into the frontier.
    fn expand(&mut self, v: VertexId) -> Result<()> {
        let graph = self.ctx.graph();
        let base = self.visited_cost(v)?.unwrap_or(0.0);

        for &e in graph.vertex(v)?.outgoing_edges() {
            let cost = edge_cost(self.ctx, e)?;
            let node = self.ctx.edge_node_mut(e)?;
            if node.state() != ProcessingState::Unexplored {
                continue;
            }
            node.set_state(ProcessingState::Discovered);
            self.frontier.push(e, base + cost);
        }
        Ok(())
    }
}

fn edge_cost<V, E, C>(ctx: &DecorationContext<'_, V, E, C>, edge: EdgeId) -> Result<f64> {
    ctx.edge_node(edge)?
        .cost()
        .ok_or_else(|| Error::InvalidState(format!("Edge {edge} has no cached cost")))
}
