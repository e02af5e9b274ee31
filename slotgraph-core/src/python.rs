//! Python Bindings
//!
//! Exposes [`DepGraph`] to Python as `slotgraph._core.DepGraph`. Node ids are
//! `u32`, edge handles are plain ints.

use pyo3::exceptions::{PyOverflowError, PyValueError};
use pyo3::prelude::*;

use crate::config::GraphConfig;
use crate::error::GraphError;
use crate::graph::{DepGraph, EdgeHandle};

fn to_py_err(err: GraphError) -> PyErr {
    match err {
        GraphError::Overflow(_) => PyOverflowError::new_err(err.to_string()),
        GraphError::CycleDetected { .. } => PyValueError::new_err(err.to_string()),
    }
}

/// Python-exposed dependency graph.
#[pyclass(name = "DepGraph")]
pub struct PyDepGraph {
    inner: DepGraph<u32>,
}

#[pymethods]
impl PyDepGraph {
    #[new]
    #[pyo3(signature = (node_capacity = GraphConfig::DEFAULT_NODE_CAPACITY, edge_capacity = GraphConfig::DEFAULT_EDGE_CAPACITY))]
    fn new(node_capacity: usize, edge_capacity: usize) -> PyResult<Self> {
        let config = GraphConfig::new(node_capacity, edge_capacity);
        let inner = DepGraph::with_config(&config)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Add the edge `u -> v` and return its handle.
    fn add(&mut self, u: u32, v: u32) -> PyResult<u32> {
        let handle = self.inner.add(u, v).map_err(to_py_err)?;
        Ok(handle.raw())
    }

    /// Remove an edge. `u` is optional; when given it must match the source.
    #[pyo3(signature = (handle, u = None))]
    fn remove(&mut self, handle: u32, u: Option<u32>) -> bool {
        let handle = EdgeHandle::from_raw(handle);
        match u {
            Some(u) => self.inner.remove(handle, u),
            None => self.inner.remove_edge(handle).is_some(),
        }
    }

    /// Topological order of all active nodes.
    fn resolve(&mut self) -> PyResult<Vec<u32>> {
        self.inner
            .resolve()
            .map(|order| order.to_vec())
            .map_err(to_py_err)
    }

    fn clear(&mut self) {
        self.inner.clear();
    }

    fn in_degree(&self, v: u32) -> u32 {
        self.inner.in_degree(v)
    }

    #[getter]
    fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    fn __len__(&self) -> usize {
        self.inner.node_count()
    }

    fn __repr__(&self) -> String {
        format!(
            "DepGraph(nodes={}, edges={}, capacity=({}, {}))",
            self.inner.node_count(),
            self.inner.edge_count(),
            self.inner.node_capacity(),
            self.inner.edge_capacity()
        )
    }
}
