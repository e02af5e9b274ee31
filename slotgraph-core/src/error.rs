//! Error Types
//!
//! The engine reports exactly two kinds of failure: running out of fixed
//! capacity on insertion, and a cycle on resolution. Neither one mutates the
//! graph, and the graph stays usable afterwards.

use thiserror::Error;

/// Which capacity an insertion ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Overflow {
    /// A node id at or above the node capacity.
    #[error("node {node} is outside the node capacity of {capacity}")]
    Node { node: u64, capacity: usize },

    /// The edge arena is full and the free list is empty.
    #[error("edge arena exhausted ({capacity} slots in use)")]
    Edges { capacity: usize },
}

/// Errors reported by [`DepGraph`](crate::graph::DepGraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("capacity overflow: {0}")]
    Overflow(#[from] Overflow),

    /// The live edges contain a cycle (a self-loop counts).
    #[error("cycle detected: {unresolved} of {active} nodes could not be ordered")]
    CycleDetected { unresolved: usize, active: usize },
}

impl GraphError {
    pub fn is_overflow(&self) -> bool {
        matches!(self, Self::Overflow(_))
    }

    pub fn is_cycle(&self) -> bool {
        matches!(self, Self::CycleDetected { .. })
    }
}

/// Errors from validating or loading a [`GraphConfig`](crate::config::GraphConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("node capacity {requested} exceeds the id type's range ({max})")]
    NodeCapacity { requested: usize, max: usize },

    #[error("edge capacity {requested} exceeds the arena limit ({max})")]
    EdgeCapacity { requested: usize, max: usize },

    #[error("invalid graph config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors reported by [`Planner`](crate::plan::Planner).
#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("unknown package: {0}")]
    UnknownPackage(String),

    #[error("dependency cycle among: {}", .unresolved.join(", "))]
    Cycle { unresolved: Vec<String> },
}
