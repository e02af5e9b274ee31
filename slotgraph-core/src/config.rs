//! Graph Configuration
//!
//! Capacities are fixed for a graph's lifetime, so they are the only thing a
//! host configures. A config can be built in code or loaded from JSON, and is
//! checked once against the node id type before any memory is allocated.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::graph::{EdgeHandle, NodeId};

/// Fixed capacities for a [`DepGraph`](crate::graph::DepGraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Node ids must be strictly below this value.
    pub node_capacity: usize,

    /// Maximum number of live edges.
    pub edge_capacity: usize,
}

impl GraphConfig {
    pub const DEFAULT_NODE_CAPACITY: usize = 1024;
    pub const DEFAULT_EDGE_CAPACITY: usize = 4096;

    pub fn new(node_capacity: usize, edge_capacity: usize) -> Self {
        Self {
            node_capacity,
            edge_capacity,
        }
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check that every node below `node_capacity` is representable as `N`
    /// and that the edge arena is addressable by an [`EdgeHandle`].
    pub fn validate<N: NodeId>(&self) -> Result<(), ConfigError> {
        let max_nodes = N::MAX_INDEX.saturating_add(1);
        if self.node_capacity > max_nodes {
            return Err(ConfigError::NodeCapacity {
                requested: self.node_capacity,
                max: max_nodes,
            });
        }
        if self.edge_capacity > EdgeHandle::MAX_SLOTS {
            return Err(ConfigError::EdgeCapacity {
                requested: self.edge_capacity,
                max: EdgeHandle::MAX_SLOTS,
            });
        }
        Ok(())
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NODE_CAPACITY, Self::DEFAULT_EDGE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let config = GraphConfig::from_json(r#"{ "node_capacity": 16 }"#).unwrap();
        assert_eq!(config.node_capacity, 16);
        assert_eq!(config.edge_capacity, GraphConfig::DEFAULT_EDGE_CAPACITY);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = GraphConfig::from_json("{ node_capacity: }").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn node_capacity_is_bounded_by_id_type() {
        assert!(GraphConfig::new(256, 8).validate::<u8>().is_ok());

        let err = GraphConfig::new(257, 8).validate::<u8>().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NodeCapacity { requested: 257, max: 256 }
        ));
    }

    #[test]
    fn zero_capacities_are_valid() {
        assert!(GraphConfig::new(0, 0).validate::<u32>().is_ok());
    }
}
