//! Dependency Graph
//!
//! This module implements the graph engine: a directed graph over dense
//! integer node ids that supports cheap incremental edits and produces a
//! deterministic topological order on demand.
//!
//! # Overview
//!
//! - Nodes are host-chosen integers in `[0, node_capacity)`. They need no
//!   registration; a node is active once any edge mentions it.
//! - An edge `u -> v` means `u` must come before `v` in the resolved order.
//!   Each insertion returns an [`EdgeHandle`] that later removes exactly
//!   that edge.
//!
//! # Design Decisions
//!
//! 1. All storage is flat arrays sized at construction. Adjacency lists and
//!    the free list are chains of slot indexes, not heap pointers, so edits
//!    never allocate and the whole graph is trivially cloneable.
//!
//! 2. In-degree counters are maintained on every edit, so resolution starts
//!    from a copy instead of a scan over all edges.
//!
//! 3. Resolution reuses an internal buffer and hands out a borrow of it. The
//!    borrow checker makes sure the caller is done with one order before the
//!    graph can be edited or resolved again.

mod edge;
mod engine;
mod node;

pub use edge::{EdgeHandle, Successors};
pub use engine::DepGraph;
pub use node::NodeId;
