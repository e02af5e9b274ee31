//! Slotgraph Core
//!
//! This crate provides an embeddable incremental dependency graph for build
//! systems, reactive computation graphs and package managers. It implements:
//!
//! - An arena-backed directed graph with O(1) edge insertion and removal
//! - Incrementally maintained in-degree counters
//! - Deterministic O(V+E) topological resolution with cycle detection
//! - A name-keyed planner for hosts that think in package names
//!
//! With the `python` feature the graph is also exposed as a Python extension
//! module via PyO3.
//!
//! # Architecture
//!
//! - `graph`: the engine ([`DepGraph`]) and its id/handle types
//! - `config`: fixed capacities, loadable from JSON
//! - `plan`: name to dense-id mapping on top of the engine
//! - `error`: error types shared by the above
//!
//! # Example
//!
//! ```rust
//! use slotgraph_core::DepGraph;
//!
//! let mut graph: DepGraph = DepGraph::new(16, 32);
//!
//! // 0 must come before 1, 1 before 2
//! let first = graph.add(0, 1).unwrap();
//! graph.add(1, 2).unwrap();
//! assert_eq!(graph.resolve().unwrap(), &[0, 1, 2]);
//!
//! // Drop an edge without rebuilding anything
//! graph.remove(first, 0);
//! assert_eq!(graph.in_degree(1), 0);
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod plan;

#[cfg(feature = "python")]
mod python;

pub use config::GraphConfig;
pub use error::{ConfigError, GraphError, Overflow, PlanError};
pub use graph::{DepGraph, EdgeHandle, NodeId};
pub use plan::Planner;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Python module definition.
///
/// This function is called by Python when importing the module.
/// It registers all Python-exposed types and functions.
#[cfg(feature = "python")]
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<python::PyDepGraph>()?;

    // Add version info
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
