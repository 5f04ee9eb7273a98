//! # Decorations
//!
//! Per-run scratch state attached to graph elements without touching the
//! element types.
//!
//! ```text
//! Graph.channels  [0: Channel] [1: Channel]          ← one per live context
//! Vertex.slots    [0: Vertex(3)] [1: Vertex(3)]      ← index into ctx records
//! Edge.slots      [0: Edge(7)]   [1: Edge(7)]
//! ```
//!
//! A [`DecorationContext`] owns the records. Each element only stores a
//! tagged [`SlotHandle`] under the context's [`Channel`], so two contexts
//! over the same graph never see each other's state.

pub mod slot_table;
pub mod context;

pub use slot_table::{Channel, SlotHandle, SlotTable};
pub use context::{DecorationContext, EdgeDecoration, ProcessingState, VertexDecoration};
