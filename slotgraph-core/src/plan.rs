//! Build Planner
//!
//! Hosts usually think in names, not dense ids. `Planner` interns package
//! names into consecutive ids and records "X needs Y" declarations as engine
//! edges `Y -> X`, so a resolved order lists every dependency before the
//! packages that need it.
//!
//! Declarations are kept per `(dependency, dependent)` pair so they can be
//! withdrawn again by name. Declaring the same pair twice stores two edges;
//! each `undepend` withdraws one of them.

use std::collections::HashMap;

use indexmap::IndexSet;
use smallvec::SmallVec;
use tracing::debug;

use crate::config::GraphConfig;
use crate::error::{ConfigError, GraphError, Overflow, PlanError};
use crate::graph::{DepGraph, EdgeHandle};

/// Maps package names onto a [`DepGraph`] and produces build orders.
#[derive(Debug, Clone)]
pub struct Planner {
    /// Interned names; a name's position is its node id.
    names: IndexSet<String>,

    graph: DepGraph<u32>,

    /// Live edge handles per `(dependency, dependent)` pair, oldest first.
    declared: HashMap<(u32, u32), SmallVec<[EdgeHandle; 1]>>,
}

impl Planner {
    /// Create a planner from a validated config.
    pub fn new(config: &GraphConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_graph(DepGraph::with_config(config)?))
    }

    /// Create a planner with the given capacities (see [`DepGraph::new`]).
    pub fn with_capacity(packages: usize, dependencies: usize) -> Self {
        Self::from_graph(DepGraph::new(packages, dependencies))
    }

    fn from_graph(graph: DepGraph<u32>) -> Self {
        Self {
            names: IndexSet::new(),
            graph,
            declared: HashMap::new(),
        }
    }

    /// Intern `name`, returning its node id.
    ///
    /// Ids are handed out in first-seen order. Fails with an overflow once
    /// every id below the node capacity is taken.
    pub fn package(&mut self, name: &str) -> Result<u32, PlanError> {
        if let Some(id) = self.id(name) {
            return Ok(id);
        }
        let next = self.names.len();
        if next >= self.graph.node_capacity() {
            return Err(GraphError::from(Overflow::Node {
                node: next as u64,
                capacity: self.graph.node_capacity(),
            })
            .into());
        }
        self.names.insert(name.to_owned());
        Ok(next as u32)
    }

    /// Declare that `dependent` needs `dependency` built first.
    ///
    /// Unknown names are interned. If either the names or the edge do not
    /// fit, nothing is recorded.
    pub fn depend(&mut self, dependent: &str, dependency: &str) -> Result<EdgeHandle, PlanError> {
        let missing = match (self.id(dependent), self.id(dependency)) {
            (Some(_), Some(_)) => 0,
            (None, None) if dependent != dependency => 2,
            _ => 1,
        };
        // A slot is free somewhere iff fewer edges are live than the arena holds.
        if missing > 0 && self.graph.edge_count() >= self.graph.edge_capacity() {
            return Err(GraphError::from(Overflow::Edges {
                capacity: self.graph.edge_capacity(),
            })
            .into());
        }
        if self.names.len() + missing > self.graph.node_capacity() {
            return Err(GraphError::from(Overflow::Node {
                node: (self.names.len() + missing - 1) as u64,
                capacity: self.graph.node_capacity(),
            })
            .into());
        }

        let to = self.package(dependent)?;
        let from = self.package(dependency)?;
        let handle = self.graph.add(from, to)?;
        self.declared.entry((from, to)).or_default().push(handle);
        debug!(dependent, dependency, %handle, "dependency declared");
        Ok(handle)
    }

    /// Withdraw the most recent `dependent` needs `dependency` declaration.
    ///
    /// Returns `false` if no such declaration is live.
    pub fn undepend(&mut self, dependent: &str, dependency: &str) -> Result<bool, PlanError> {
        let to = self.require(dependent)?;
        let from = self.require(dependency)?;

        let Some(handles) = self.declared.get_mut(&(from, to)) else {
            return Ok(false);
        };
        let Some(handle) = handles.pop() else {
            return Ok(false);
        };
        if handles.is_empty() {
            self.declared.remove(&(from, to));
        }
        let removed = self.graph.remove(handle, from);
        debug!(dependent, dependency, %handle, "dependency withdrawn");
        Ok(removed)
    }

    /// Every known package, dependencies first.
    ///
    /// On a cycle, fails with [`PlanError::Cycle`] naming every package that
    /// sits on or behind the cycle.
    pub fn build_order(&mut self) -> Result<Vec<&str>, PlanError> {
        let resolved: Result<Vec<u32>, GraphError> =
            self.graph.resolve().map(|order| order.to_vec());

        match resolved {
            Ok(mut order) => {
                // Packages interned after the last edge endpoint have no
                // edges at all, so any position is valid for them.
                let active = self.graph.node_count() as u32;
                order.extend(active..self.names.len() as u32);
                Ok(order.into_iter().filter_map(|id| self.name(id)).collect())
            }
            Err(GraphError::CycleDetected { .. }) => {
                let unresolved = self
                    .graph
                    .unresolved()
                    .into_iter()
                    .filter_map(|id| self.name(id).map(str::to_owned))
                    .collect();
                Err(PlanError::Cycle { unresolved })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Node id of an interned name.
    pub fn id(&self, name: &str) -> Option<u32> {
        self.names.get_index_of(name).map(|index| index as u32)
    }

    /// Name behind a node id.
    pub fn name(&self, id: u32) -> Option<&str> {
        self.names.get_index(id as usize).map(String::as_str)
    }

    /// Number of interned packages.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The underlying engine.
    pub fn graph(&self) -> &DepGraph<u32> {
        &self.graph
    }

    /// Forget every package and declaration.
    pub fn clear(&mut self) {
        self.names.clear();
        self.declared.clear();
        self.graph.clear();
    }

    fn require(&self, name: &str) -> Result<u32, PlanError> {
        self.id(name)
            .ok_or_else(|| PlanError::UnknownPackage(name.to_owned()))
    }
}
