//! Node Identifiers
//!
//! Nodes are dense unsigned integers picked by the host. The engine never
//! hands them out; a node exists as soon as an edge mentions it. All the
//! engine needs from the host's integer type is a way to turn it into an
//! array index and back.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// An unsigned integer type usable as a dense node identifier.
///
/// Implemented for `u8`, `u16`, `u32`, `u64` and `usize`. Pick the narrowest
/// type that covers the largest node count you expect; it is the element type
/// of the buffer returned by [`DepGraph::resolve`](crate::graph::DepGraph::resolve).
pub trait NodeId: Copy + Eq + Ord + Hash + Debug + Display + Send + Sync + 'static {
    /// Largest value of this type, expressed as an index (saturating at `usize::MAX`).
    const MAX_INDEX: usize;

    /// Convert to an array index, or `None` if the value does not fit `usize`.
    fn checked_index(self) -> Option<usize>;

    /// Convert to an array index.
    ///
    /// Only called on ids the engine has already bounds-checked.
    fn index(self) -> usize;

    /// Build an id from an index known to be `<= MAX_INDEX`.
    fn from_index(index: usize) -> Self;

    /// Widen to `u64` for error reporting.
    fn raw(self) -> u64;
}

macro_rules! impl_node_id {
    ($($ty:ty),* $(,)?) => {$(
        impl NodeId for $ty {
            const MAX_INDEX: usize = if (<$ty>::MAX as u128) > (usize::MAX as u128) {
                usize::MAX
            } else {
                <$ty>::MAX as usize
            };

            #[inline]
            fn checked_index(self) -> Option<usize> {
                usize::try_from(self).ok()
            }

            #[inline]
            fn index(self) -> usize {
                self as usize
            }

            #[inline]
            fn from_index(index: usize) -> Self {
                debug_assert!(index <= Self::MAX_INDEX);
                index as $ty
            }

            #[inline]
            fn raw(self) -> u64 {
                self as u64
            }
        }
    )*};
}

impl_node_id!(u8, u16, u32, u64, usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_index_matches_type_width() {
        assert_eq!(<u8 as NodeId>::MAX_INDEX, 255);
        assert_eq!(<u16 as NodeId>::MAX_INDEX, 65_535);
        assert_eq!(<usize as NodeId>::MAX_INDEX, usize::MAX);
    }

    #[test]
    fn index_round_trips_through_from_index() {
        assert_eq!(<u16 as NodeId>::from_index(42).index(), 42);
        assert_eq!(7u8.checked_index(), Some(7));
        assert_eq!(9u64.raw(), 9);
    }
}
