//! Shared graph handle for multi-threaded callers.
//!
//! The graph itself does no locking around structural mutation. This
//! wrapper is the external mutual-exclusion layer: any number of readers
//! may build decoration contexts and search concurrently, and a writer
//! gets exclusive access for vertex/edge creation and removal.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::Graph;

/// Cloneable, thread-safe handle to a [`Graph`].
pub struct SharedGraph<V, E> {
    inner: Arc<RwLock<Graph<V, E>>>,
}

impl<V, E> SharedGraph<V, E> {
    pub fn new(graph: Graph<V, E>) -> Self {
        Self { inner: Arc::new(RwLock::new(graph)) }
    }

    /// Shared access. Decoration contexts borrow from the returned guard.
    pub fn read(&self) -> RwLockReadGuard<'_, Graph<V, E>> {
        self.inner.read()
    }

    /// Exclusive access for structural mutation.
    pub fn write(&self) -> RwLockWriteGuard<'_, Graph<V, E>> {
        self.inner.write()
    }

    /// Recover the graph if this is the last handle.
    pub fn try_unwrap(self) -> Result<Graph<V, E>, Self> {
        Arc::try_unwrap(self.inner)
            .map(RwLock::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl<V, E> Clone for SharedGraph<V, E> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<V, E> Default for SharedGraph<V, E> {
    fn default() -> Self {
        Self::new(Graph::new())
    }
}

impl<V, E> From<Graph<V, E>> for SharedGraph<V, E> {
    fn from(graph: Graph<V, E>) -> Self {
        Self::new(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read() {
        let shared: SharedGraph<&str, ()> = SharedGraph::default();
        let a = shared.write().create_vertex("a");
        let b = shared.write().create_vertex("b");
        shared.write().edge_between(a, b, ()).unwrap();

        let g = shared.read();
        assert_eq!(g.vertex_count(), 2);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_try_unwrap() {
        let shared: SharedGraph<(), ()> = SharedGraph::default();
        let other = shared.clone();
        let shared = shared.try_unwrap().unwrap_err();
        drop(other);
        assert!(shared.try_unwrap().is_ok());
    }
}
