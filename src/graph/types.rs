//! Dense identifier types for nodes, edges and the two type vocabularies

use serde::{Deserialize, Serialize};
use std::fmt;

/// An identifier that indexes a dense, contiguous ID space starting at zero.
///
/// Implemented by every ID kind so a [`Vocabulary`](super::Vocabulary) can
/// hand out typed IDs instead of bare integers.
pub trait DenseId: Copy + Eq + Ord + fmt::Debug {
    /// Build the ID from its position in the ID space. Callers keep
    /// `index` within `u32`; the builder rejects inputs that would not.
    fn from_index(index: usize) -> Self;

    /// Position of this ID in the ID space
    fn index(self) -> usize;
}

macro_rules! dense_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            pub fn new(id: u32) -> Self {
                $name(id)
            }

            pub fn as_u32(&self) -> u32 {
                self.0
            }
        }

        impl DenseId for $name {
            fn from_index(index: usize) -> Self {
                debug_assert!(index <= u32::MAX as usize);
                $name(index as u32)
            }

            fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "({})"), self.0)
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                $name(id)
            }
        }
    };
}

dense_id!(
    /// Dense node identifier in `[0, node_count)`
    NodeId,
    "NodeId"
);

dense_id!(
    /// Construction-order identifier of an input edge in `[0, edge_count)`
    EdgeId,
    "EdgeId"
);

dense_id!(
    /// Identifier in the node-type vocabulary
    NodeTypeId,
    "NodeTypeId"
);

dense_id!(
    /// Identifier in the edge-type vocabulary
    EdgeTypeId,
    "EdgeTypeId"
);
