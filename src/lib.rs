//! # decograph — Decorated Graphs and Cost-Based Search
//!
//! A mutable directed graph whose vertices and edges carry slot tables, so
//! that several algorithm runs can attach private scratch state to the same
//! elements at once without the element types knowing about any of them.
//!
//! ## Design Principles
//!
//! 1. **Graph owns elements**: vertices and edges live in generational arenas
//!    and are addressed by stable [`VertexId`] / [`EdgeId`] handles
//! 2. **Decorations are borrowed views**: a [`DecorationContext`] borrows the
//!    graph, so structure cannot change while a run is in flight
//! 3. **Costs are injected**: a [`CostEvaluator`] prices each edge once per
//!    context, never per traversal
//! 4. **Teardown is automatic**: dropping a context clears every slot it set
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use decograph::{DecorationContext, Graph, PayloadCost, search};
//!
//! # fn example() -> decograph::Result<()> {
//! let mut graph: Graph<&str, f64> = Graph::new();
//! let a = graph.create_vertex("A");
//! let b = graph.create_vertex("B");
//! let c = graph.create_vertex("C");
//! graph.edge_between(a, b, 1.0)?;
//! graph.edge_between(b, c, 2.0)?;
//!
//! let mut ctx = DecorationContext::new(&graph, PayloadCost)?;
//! let path = search(&mut ctx, a, c)?;
//! assert_eq!(path.cost(), 3.0);
//! # Ok(())
//! # }
//! ```
//!
//! ## Frontiers
//!
//! | Frontier | Config | Description |
//! |----------|--------|-------------|
//! | FIFO | (default) | Single relaxation pass per edge, exact for uniform costs |
//! | Cost-ordered | `FrontierKind::CostOrdered` | Min-heap keyed by cost, optimal for non-negative costs |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod decoration;
pub mod storage;
pub mod pathfinding;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{Edge, EdgeId, EdgeKind, Path, PathEntry, Vertex, VertexId};

// ============================================================================
// Re-exports: Storage
// ============================================================================

pub use storage::{Graph, SharedGraph};

// ============================================================================
// Re-exports: Decoration
// ============================================================================

pub use decoration::{
    Channel, SlotHandle, SlotTable,
    DecorationContext, VertexDecoration, EdgeDecoration, ProcessingState,
};

// ============================================================================
// Re-exports: Pathfinding
// ============================================================================

pub use pathfinding::{
    BoxError, CostEvaluator, UnitCost, PayloadCost, cost_fn, try_cost_fn,
    search, search_with, Search, Step, SearchConfig, FrontierKind, Pathfinder,
};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Cost evaluation failed for edge {edge}: {source}")]
    Evaluator {
        edge: EdgeId,
        #[source]
        source: BoxError,
    },

    #[error("Invalid cost {cost} for edge {edge}: costs must be finite and non-negative")]
    InvalidCost { edge: EdgeId, cost: f64 },

    #[error("Search aborted after {0} expansions")]
    ExpansionLimit(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
