//! `trainsim-semaphore` — the shared per-edge mutual-exclusion mapping.
//!
//! Spec §4.6 / §9: the EdgeSemaphore is the only shared mutable state across
//! agents. Under a sequential driver a plain mapping would suffice, but a
//! multi-threaded port must guard it with a lock per edge or a single mutex
//! and perform check-and-set atomically — this crate implements the
//! mutex-guarded form unconditionally so the invariant holds by
//! construction rather than by the driver's scheduling discipline.

mod error;

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::trace;
use trainsim_core::EdgeKey;

pub use error::{SemaphoreError, SemaphoreResult};

/// A mapping from canonical edge key to availability, guarded by one mutex.
///
/// Initialize with every edge in the map set to available (spec §3:
/// "Initialized to true for every existing edge").
pub struct EdgeSemaphore {
    state: Mutex<HashMap<EdgeKey, bool>>,
}

impl EdgeSemaphore {
    /// Build a semaphore with every given edge initially available.
    pub fn new(edges: impl IntoIterator<Item = EdgeKey>) -> Self {
        let state = edges.into_iter().map(|k| (k, true)).collect();
        Self { state: Mutex::new(state) }
    }

    /// Atomically check-and-set: if `edge` is available, mark it held and
    /// return `true`; otherwise leave state untouched and return `false`.
    ///
    /// This is the only operation that may transition an edge from
    /// available to held, and it does so under one lock acquisition so no
    /// interleaving can let two holders observe `true` for the same edge.
    pub fn try_acquire(&self, edge: EdgeKey) -> bool {
        let mut state = self.state.lock().expect("semaphore mutex poisoned");
        match state.get_mut(&edge) {
            Some(available @ true) => {
                *available = false;
                trace!(%edge, "edge acquired");
                true
            }
            Some(false) => false,
            None => false,
        }
    }

    /// Release a held edge, making it available again.
    ///
    /// A release of an edge the caller does not hold, or of an unknown
    /// edge, is a logic error in the caller (a train only ever releases
    /// `current_edge`, which it acquired itself) and is reported rather than
    /// silently ignored.
    pub fn release(&self, edge: EdgeKey) -> SemaphoreResult<()> {
        let mut state = self.state.lock().expect("semaphore mutex poisoned");
        match state.get_mut(&edge) {
            Some(available) => {
                *available = true;
                trace!(%edge, "edge released");
                Ok(())
            }
            None => Err(SemaphoreError::UnknownEdge(edge)),
        }
    }

    /// `true` if `edge` is currently available (does not acquire it).
    pub fn is_available(&self, edge: EdgeKey) -> bool {
        let state = self.state.lock().expect("semaphore mutex poisoned");
        state.get(&edge).copied().unwrap_or(false)
    }
}
