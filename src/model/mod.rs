//! # Graph Model
//!
//! Vertices, edges, and the path DTO produced by searches.
//!
//! Vertices and edges are owned by [`Graph`](crate::Graph); callers hold
//! [`VertexId`] / [`EdgeId`] handles and borrow elements through the graph.
//! Adjacency caches are read-only from outside the crate.

pub mod vertex;
pub mod edge;
pub mod path;

pub use vertex::{Vertex, VertexId};
pub use edge::{Edge, EdgeId, EdgeKind};
pub use path::{Path, PathEntry};
