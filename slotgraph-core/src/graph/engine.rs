//! Dependency Graph Engine
//!
//! `DepGraph` keeps a directed graph over dense node ids in flat,
//! preallocated arrays and linearizes it on demand.
//!
//! # Layout
//!
//! - `head[u]` is the first slot of `u`'s adjacency list.
//! - `slots` is the edge arena. Its length is the high-water mark; slots past
//!   it have never been used. The backing allocation is reserved up front.
//! - `free` heads a LIFO list of released slots, linked through `next`.
//! - `refs[v]` counts the live edges whose target is `v`. It is updated on
//!   every insertion and removal and is never recomputed.
//!
//! # Resolution
//!
//! `resolve` runs Kahn's algorithm over a copy of `refs`, using the output
//! buffer itself as the FIFO queue:
//!
//! 1. Seed the buffer with every zero in-degree node, ascending.
//! 2. Pop from the read cursor, walk that node's adjacency list and append
//!    neighbours whose working in-degree drops to zero.
//! 3. Stop when the read cursor catches the write cursor. Fewer than `n`
//!    emitted nodes means the rest sit on or behind a cycle.
//!
//! Adjacency lists are walked newest edge first, so the order is a pure
//! function of the insertion/removal history.

use tracing::{debug, trace, warn};

use super::edge::{EdgeHandle, EdgeSlot, Successors, NIL};
use super::node::NodeId;
use crate::config::GraphConfig;
use crate::error::{ConfigError, GraphError, Overflow};

/// An incrementally maintained dependency graph with fixed capacities.
///
/// # Type Parameters
///
/// - `N`: the host's node id type. See [`NodeId`].
///
/// # Example
///
/// ```
/// use slotgraph_core::graph::DepGraph;
///
/// let mut graph: DepGraph<u16> = DepGraph::new(8, 8);
/// graph.add(0, 1).unwrap();
/// graph.add(0, 2).unwrap();
/// graph.add(1, 3).unwrap();
/// graph.add(2, 3).unwrap();
///
/// let order = graph.resolve().unwrap();
/// assert_eq!(order, &[0, 2, 1, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct DepGraph<N: NodeId = u32> {
    node_capacity: usize,
    edge_capacity: usize,

    /// First adjacency slot per node, `NIL` when the node has no out-edges.
    head: Vec<u32>,

    /// Live in-degree per node.
    refs: Vec<u32>,

    /// Edge arena; `slots.len()` is the high-water mark.
    slots: Vec<EdgeSlot<N>>,

    /// Head of the free list.
    free: u32,

    /// Active node count: one past the largest endpoint seen since the last clear.
    active: usize,

    /// Number of live edges.
    live: usize,

    /// Working in-degrees for `resolve`.
    degree: Vec<u32>,

    /// Output buffer and work queue for `resolve`.
    order: Vec<N>,
}

impl<N: NodeId> DepGraph<N> {
    /// Create an empty graph.
    ///
    /// Capacities beyond what `N` or an [`EdgeHandle`] can address are clamped
    /// to the addressable maximum. Use [`DepGraph::with_config`] to reject
    /// them instead.
    pub fn new(node_capacity: usize, edge_capacity: usize) -> Self {
        let max_nodes = N::MAX_INDEX.saturating_add(1);
        let nodes = node_capacity.min(max_nodes);
        let edges = edge_capacity.min(EdgeHandle::MAX_SLOTS);
        if nodes != node_capacity || edges != edge_capacity {
            warn!(
                requested_nodes = node_capacity,
                requested_edges = edge_capacity,
                nodes,
                edges,
                "graph capacity clamped to addressable range"
            );
        }
        Self::allocate(nodes, edges)
    }

    /// Create an empty graph from a validated config.
    pub fn with_config(config: &GraphConfig) -> Result<Self, ConfigError> {
        config.validate::<N>()?;
        Ok(Self::allocate(config.node_capacity, config.edge_capacity))
    }

    fn allocate(node_capacity: usize, edge_capacity: usize) -> Self {
        Self {
            node_capacity,
            edge_capacity,
            head: vec![NIL; node_capacity],
            refs: vec![0; node_capacity],
            slots: Vec::with_capacity(edge_capacity),
            free: NIL,
            active: 0,
            live: 0,
            degree: vec![0; node_capacity],
            order: Vec::with_capacity(node_capacity),
        }
    }

    /// Record the edge `u -> v`: `u` will precede `v` in every resolved order.
    ///
    /// Fails with [`GraphError::Overflow`] if either id is at or above the
    /// node capacity, or if no edge slot is free. The graph is untouched on
    /// failure. Self-loops are accepted here and reported by [`resolve`].
    ///
    /// [`resolve`]: DepGraph::resolve
    pub fn add(&mut self, u: N, v: N) -> Result<EdgeHandle, GraphError> {
        let source = self.check_node(u)?;
        let target = self.check_node(v)?;
        let slot = self.take_slot()?;

        let next = self.head[source];
        let edge = EdgeSlot::new(u, v, next);
        if slot == self.slots.len() {
            self.slots.push(edge);
        } else {
            self.slots[slot] = edge;
        }
        if next != NIL {
            self.slots[next as usize].prev = slot as u32;
        }
        self.head[source] = slot as u32;

        self.refs[target] += 1;
        self.active = self.active.max(source.max(target) + 1);
        self.live += 1;

        let handle = EdgeHandle::from_slot(slot);
        trace!(%u, %v, %handle, "edge added");
        Ok(handle)
    }

    /// Remove the edge behind `handle`, which was inserted with source `u`.
    ///
    /// Unlinks the slot from `u`'s adjacency list, decrements the target's
    /// in-degree and puts the slot on the free list. Returns `false` and
    /// leaves the graph alone if the handle is not live or `u` is not the
    /// source it was added under.
    pub fn remove(&mut self, handle: EdgeHandle, u: N) -> bool {
        let Some(slot) = self.slots.get(handle.slot()).filter(|slot| slot.live) else {
            return false;
        };
        if slot.source != u {
            warn!(%handle, %u, source = %slot.source, "remove called with wrong source node");
            return false;
        }
        self.release(handle.slot());
        true
    }

    /// Remove the edge behind `handle` using the source stored in its slot.
    ///
    /// Returns the removed `(u, v)` pair, or `None` if the handle is not live.
    pub fn remove_edge(&mut self, handle: EdgeHandle) -> Option<(N, N)> {
        let slot = self.slots.get(handle.slot()).filter(|slot| slot.live)?;
        let pair = (slot.source, slot.dest);
        self.release(handle.slot());
        Some(pair)
    }

    /// Compute a topological order of all active nodes.
    ///
    /// The result borrows the graph's scratch buffer: it lists every id in
    /// `0..node_count()` exactly once, with `u` before `v` for every live edge
    /// `u -> v`. Zero in-degree nodes are seeded in ascending order.
    ///
    /// Fails with [`GraphError::CycleDetected`] if the live edges are cyclic;
    /// no partial order is returned. Stored edges and in-degrees are not
    /// modified either way.
    pub fn resolve(&mut self) -> Result<&[N], GraphError> {
        let active = self.active;
        let emitted = self.kahn();
        if emitted == active {
            debug!(nodes = active, edges = self.live, "graph resolved");
            Ok(&self.order)
        } else {
            let unresolved = active - emitted;
            debug!(nodes = active, unresolved, "cycle detected during resolve");
            Err(GraphError::CycleDetected { unresolved, active })
        }
    }

    /// Active nodes that no topological order can reach: those on a cycle and
    /// everything downstream of one. Empty when the graph is acyclic.
    pub fn unresolved(&mut self) -> Vec<N> {
        let active = self.active;
        if self.kahn() == active {
            return Vec::new();
        }
        self.degree[..active]
            .iter()
            .enumerate()
            .filter(|&(_, &degree)| degree > 0)
            .map(|(index, _)| N::from_index(index))
            .collect()
    }

    /// Drop every edge and reset the active node count. Capacity is kept.
    pub fn clear(&mut self) {
        self.head.fill(NIL);
        self.refs.fill(0);
        self.slots.clear();
        self.order.clear();
        self.free = NIL;
        self.active = 0;
        self.live = 0;
        debug!(
            nodes = self.node_capacity,
            edges = self.edge_capacity,
            "graph cleared"
        );
    }

    pub fn node_capacity(&self) -> usize {
        self.node_capacity
    }

    pub fn edge_capacity(&self) -> usize {
        self.edge_capacity
    }

    /// Number of active nodes, i.e. the length of a successful `resolve`.
    pub fn node_count(&self) -> usize {
        self.active
    }

    /// Number of live edges.
    pub fn edge_count(&self) -> usize {
        self.live
    }

    /// Number of edge slots ever allocated since the last clear.
    pub fn high_water(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Live in-degree of `v` (0 for ids outside the node capacity).
    pub fn in_degree(&self, v: N) -> u32 {
        v.checked_index()
            .and_then(|index| self.refs.get(index))
            .copied()
            .unwrap_or(0)
    }

    /// Whether `handle` refers to a live edge.
    pub fn contains(&self, handle: EdgeHandle) -> bool {
        self.edge(handle).is_some()
    }

    /// The `(u, v)` pair behind a live handle.
    pub fn edge(&self, handle: EdgeHandle) -> Option<(N, N)> {
        self.slots
            .get(handle.slot())
            .filter(|slot| slot.live)
            .map(|slot| (slot.source, slot.dest))
    }

    /// Outgoing edges of `u`, most recently inserted first.
    pub fn successors(&self, u: N) -> Successors<'_, N> {
        let cursor = u
            .checked_index()
            .and_then(|index| self.head.get(index))
            .copied()
            .unwrap_or(NIL);
        Successors {
            slots: &self.slots,
            cursor,
        }
    }

    fn check_node(&self, node: N) -> Result<usize, GraphError> {
        match node.checked_index() {
            Some(index) if index < self.node_capacity => Ok(index),
            _ => Err(Overflow::Node {
                node: node.raw(),
                capacity: self.node_capacity,
            }
            .into()),
        }
    }

    /// Pick the slot for a new edge: the free list first, else the next
    /// unused slot. Pops the free list only on success.
    fn take_slot(&mut self) -> Result<usize, GraphError> {
        if self.free != NIL {
            let slot = self.free as usize;
            self.free = self.slots[slot].next;
            Ok(slot)
        } else if self.slots.len() < self.edge_capacity {
            Ok(self.slots.len())
        } else {
            Err(Overflow::Edges {
                capacity: self.edge_capacity,
            }
            .into())
        }
    }

    /// Unlink a live slot and push it on the free list.
    fn release(&mut self, slot: usize) {
        let EdgeSlot {
            source,
            dest,
            prev,
            next,
            ..
        } = self.slots[slot];

        if prev == NIL {
            self.head[source.index()] = next;
        } else {
            self.slots[prev as usize].next = next;
        }
        if next != NIL {
            self.slots[next as usize].prev = prev;
        }

        let refs = &mut self.refs[dest.index()];
        *refs = refs.saturating_sub(1);

        let freed = &mut self.slots[slot];
        freed.live = false;
        freed.prev = NIL;
        freed.next = self.free;
        self.free = slot as u32;
        self.live -= 1;

        trace!(u = %source, v = %dest, slot, "edge removed");
    }

    /// Run Kahn's algorithm into `order`, leaving leftover in-degrees in
    /// `degree`. Returns the number of nodes emitted.
    fn kahn(&mut self) -> usize {
        let active = self.active;
        self.degree[..active].copy_from_slice(&self.refs[..active]);
        self.order.clear();
        self.order.extend(
            self.degree[..active]
                .iter()
                .enumerate()
                .filter(|&(_, &degree)| degree == 0)
                .map(|(index, _)| N::from_index(index)),
        );

        let mut read = 0;
        while read < self.order.len() {
            let node = self.order[read];
            read += 1;

            let mut cursor = self.head[node.index()];
            while cursor != NIL {
                let slot = &self.slots[cursor as usize];
                let degree = &mut self.degree[slot.dest.index()];
                debug_assert!(*degree > 0, "in-degree counter out of sync");
                *degree -= 1;
                if *degree == 0 {
                    self.order.push(slot.dest);
                }
                cursor = slot.next;
            }
        }
        self.order.len()
    }
}

impl<N: NodeId> Default for DepGraph<N> {
    fn default() -> Self {
        Self::new(
            GraphConfig::DEFAULT_NODE_CAPACITY,
            GraphConfig::DEFAULT_EDGE_CAPACITY,
        )
    }
}
