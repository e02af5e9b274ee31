//! Edge Slots
//!
//! Edges live in a fixed-capacity arena. Each slot is one directed edge plus
//! the two links that place it in its source's adjacency list. Removed slots
//! are threaded onto a free list through the same `next` link.

use std::fmt;

use super::node::NodeId;

/// Sentinel link value: "no slot".
pub(crate) const NIL: u32 = u32::MAX;

/// Handle to one inserted edge.
///
/// The handle is the edge's slot index in the arena. It is the only way to
/// remove that particular edge; inserting the same `(u, v)` pair twice yields
/// two independent handles.
///
/// Once the edge is removed its slot may be handed to a later insertion, so a
/// handle must not be kept past the removal of its edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeHandle(u32);

impl EdgeHandle {
    /// Largest edge capacity an arena can be built with.
    pub const MAX_SLOTS: usize = NIL as usize;

    /// Rebuild a handle from its raw slot index (e.g. one passed through FFI).
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw slot index.
    pub fn raw(&self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) fn slot(&self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub(crate) fn from_slot(slot: usize) -> Self {
        debug_assert!(slot < Self::MAX_SLOTS);
        Self(slot as u32)
    }
}

impl fmt::Display for EdgeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// One cell of the edge arena.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EdgeSlot<N: NodeId> {
    /// Node whose adjacency list holds this slot.
    pub source: N,

    /// Target node of the edge.
    pub dest: N,

    /// Previous slot in the adjacency list, `NIL` at the head.
    pub prev: u32,

    /// Next slot in the adjacency list, or next free slot once released.
    pub next: u32,

    /// False while the slot sits on the free list.
    pub live: bool,
}

impl<N: NodeId> EdgeSlot<N> {
    pub fn new(source: N, dest: N, next: u32) -> Self {
        Self {
            source,
            dest,
            prev: NIL,
            next,
            live: true,
        }
    }
}

/// Iterator over a node's outgoing edges, most recently inserted first.
pub struct Successors<'a, N: NodeId> {
    pub(crate) slots: &'a [EdgeSlot<N>],
    pub(crate) cursor: u32,
}

impl<'a, N: NodeId> Iterator for Successors<'a, N> {
    type Item = (EdgeHandle, N);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == NIL {
            return None;
        }
        let handle = EdgeHandle(self.cursor);
        let slot = self.slots.get(handle.slot())?;
        self.cursor = slot.next;
        Some((handle, slot.dest))
    }
}
