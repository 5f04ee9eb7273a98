//! # Pathfinding
//!
//! Best-first search driven by an injected [`CostEvaluator`].
//!
//! | Entry point | Use |
//! |-------------|-----|
//! | [`search`] / [`search_with`] | One-shot search over an existing context |
//! | [`Search`] | Step-wise search; stop calling `step` to cancel |
//! | [`Pathfinder`] | Owns its context; repeated `find` calls reuse the channel |
//!
//! Edge costs are evaluated once per context construction or reset, never
//! per traversal. Evaluators must be side-effect free and depend only on
//! data that stays fixed while the context is alive.

mod bfs;
mod config;
mod frontier;

use crate::decoration::DecorationContext;
use crate::model::*;
use crate::storage::Graph;
use crate::Result;

pub use bfs::{Search, Step};
pub use config::{FrontierKind, SearchConfig};

/// Boxed error an evaluator may return.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

// ============================================================================
// Cost evaluators
// ============================================================================

/// Computes the traversal cost of an edge.
///
/// Costs must be finite and non-negative; anything else aborts context
/// construction with [`Error::InvalidCost`](crate::Error::InvalidCost).
pub trait CostEvaluator<V, E> {
    fn cost(&self, graph: &Graph<V, E>, edge: &Edge<E>) -> std::result::Result<f64, BoxError>;
}

impl<V, E, C: CostEvaluator<V, E> + ?Sized> CostEvaluator<V, E> for &C {
    fn cost(&self, graph: &Graph<V, E>, edge: &Edge<E>) -> std::result::Result<f64, BoxError> {
        (**self).cost(graph, edge)
    }
}

impl<V, E, C: CostEvaluator<V, E> + ?Sized> CostEvaluator<V, E> for Box<C> {
    fn cost(&self, graph: &Graph<V, E>, edge: &Edge<E>) -> std::result::Result<f64, BoxError> {
        (**self).cost(graph, edge)
    }
}

/// Every edge costs 1. Searches then minimise hop count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnitCost;

impl<V, E> CostEvaluator<V, E> for UnitCost {
    fn cost(&self, _graph: &Graph<V, E>, _edge: &Edge<E>) -> std::result::Result<f64, BoxError> {
        Ok(1.0)
    }
}

/// Uses the edge payload itself as the cost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PayloadCost;

impl<V, E: Copy + Into<f64>> CostEvaluator<V, E> for PayloadCost {
    fn cost(&self, _graph: &Graph<V, E>, edge: &Edge<E>) -> std::result::Result<f64, BoxError> {
        Ok(edge.data.into())
    }
}

/// Infallible closure evaluator, see [`cost_fn`].
#[derive(Clone, Copy)]
pub struct FnCost<F>(F);

impl<V, E, F> CostEvaluator<V, E> for FnCost<F>
where
    F: Fn(&Graph<V, E>, &Edge<E>) -> f64,
{
    fn cost(&self, graph: &Graph<V, E>, edge: &Edge<E>) -> std::result::Result<f64, BoxError> {
        Ok((self.0)(graph, edge))
    }
}

/// Fallible closure evaluator, see [`try_cost_fn`].
#[derive(Clone, Copy)]
pub struct TryFnCost<F>(F);

impl<V, E, F> CostEvaluator<V, E> for TryFnCost<F>
where
    F: Fn(&Graph<V, E>, &Edge<E>) -> std::result::Result<f64, BoxError>,
{
    fn cost(&self, graph: &Graph<V, E>, edge: &Edge<E>) -> std::result::Result<f64, BoxError> {
        (self.0)(graph, edge)
    }
}

/// Wrap a closure as an evaluator.
pub fn cost_fn<V, E, F>(f: F) -> FnCost<F>
where
    F: Fn(&Graph<V, E>, &Edge<E>) -> f64,
{
    FnCost(f)
}

/// Wrap a fallible closure as an evaluator.
pub fn try_cost_fn<V, E, F>(f: F) -> TryFnCost<F>
where
    F: Fn(&Graph<V, E>, &Edge<E>) -> std::result::Result<f64, BoxError>,
{
    TryFnCost(f)
}

// ============================================================================
// One-shot search
// ============================================================================

/// Search `source → destination` with the default configuration.
///
/// Returns an empty path when the destination is unreachable.
pub fn search<V, E, C: CostEvaluator<V, E>>(
    ctx: &mut DecorationContext<'_, V, E, C>,
    source: VertexId,
    destination: VertexId,
) -> Result<Path> {
    search_with(ctx, source, destination, &SearchConfig::default())
}

pub fn search_with<V, E, C: CostEvaluator<V, E>>(
    ctx: &mut DecorationContext<'_, V, E, C>,
    source: VertexId,
    destination: VertexId,
    config: &SearchConfig,
) -> Result<Path> {
    Search::new(ctx, source, destination, config)?.run()
}

// ============================================================================
// Pathfinder
// ============================================================================

/// A search object that owns its decoration context.
///
/// Building it decorates the graph once; every [`find`](Self::find)
/// resets and reuses the same channel.
pub struct Pathfinder<'g, V, E, C = UnitCost> {
    context: DecorationContext<'g, V, E, C>,
    config: SearchConfig,
}

impl<'g, V, E, C: CostEvaluator<V, E>> Pathfinder<'g, V, E, C> {
    pub fn new(graph: &'g Graph<V, E>, evaluator: C) -> Result<Self> {
        Ok(Self {
            context: DecorationContext::new(graph, evaluator)?,
            config: SearchConfig::default(),
        })
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn find(&mut self, from: VertexId, to: VertexId) -> Result<Path> {
        search_with(&mut self.context, from, to, &self.config)
    }

    pub fn context(&self) -> &DecorationContext<'g, V, E, C> {
        &self.context
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

// ============================================================================
// Tests
// ============================================================================
