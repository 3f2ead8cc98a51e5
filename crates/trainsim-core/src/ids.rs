//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys without
//! ceremony. The inner integer is `pub` so callers can index into parallel
//! `Vec`s directly via `id.0 as usize` when convenient, but prefer the
//! `.index()` helper for clarity.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }
    };
}

typed_id! {
    /// A device registered on the [network bus](../trainsim_net/index.html):
    /// either a train or a client. Trains and clients share one ID space, so
    /// a `sender`/`receiver` field in a [`Message`](../trainsim_proto/enum.Message.html)
    /// never needs a separate tag to disambiguate kind.
    pub struct DeviceId(u32);
}

typed_id! {
    /// Index of a map vertex.
    pub struct NodeId(u32);
}

typed_id! {
    /// Index of a directed edge entry in the map's adjacency arrays.
    ///
    /// Not to be confused with [`EdgeKey`], the canonical *undirected* edge
    /// identity used by the semaphore and by a train's `current_edge`.
    pub struct EdgeId(u32);
}

/// The unordered pair `{u, v}` canonicalized as `(max(u, v), min(u, v))`.
///
/// This is the unique identifier for an undirected edge used by
/// [`EdgeSemaphore`](../trainsim_semaphore/struct.EdgeSemaphore.html) and by
/// a train's `current_edge` field. Two directed edge entries `u -> v` and
/// `v -> u` in the map share exactly one `EdgeKey`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeKey(pub NodeId, pub NodeId);

impl EdgeKey {
    /// Build the canonical key for the unordered pair `{a, b}`.
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a.0 >= b.0 {
            EdgeKey(a, b)
        } else {
            EdgeKey(b, a)
        }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}
