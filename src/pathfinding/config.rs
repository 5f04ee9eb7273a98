//! Search configuration.

use serde::{Deserialize, Serialize};

/// Order in which discovered edges leave the frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrontierKind {
    /// Strict FIFO, single relaxation pass per edge.
    ///
    /// Exact when every edge costs the same. With uneven weights a cheaper
    /// route found after an edge is explored is not propagated further.
    #[default]
    Fifo,
    /// Min-priority frontier keyed by accumulated cost, ties in FIFO order.
    ///
    /// Optimal for non-negative weights, and stops as soon as nothing left
    /// in the frontier can improve the destination.
    CostOrdered,
}

/// Knobs for a single search run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub frontier: FrontierKind,
    /// Abort with [`Error::ExpansionLimit`](crate::Error::ExpansionLimit)
    /// after this many frontier pops.
    pub max_expansions: Option<usize>,
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frontier(mut self, frontier: FrontierKind) -> Self {
        self.frontier = frontier;
        self
    }

    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.frontier, FrontierKind::Fifo);
        assert_eq!(config.max_expansions, None);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: SearchConfig = serde_json::from_str(r#"{"frontier": "cost_ordered"}"#).unwrap();
        assert_eq!(config, SearchConfig::new().with_frontier(FrontierKind::CostOrdered));

        let config: SearchConfig = serde_json::from_str(r#"{"max_expansions": 10}"#).unwrap();
        assert_eq!(config.frontier, FrontierKind::Fifo);
        assert_eq!(config.max_expansions, Some(10));
    }
}
