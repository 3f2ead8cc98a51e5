//! `trainsim-agents` — the two device kinds: [`Train`] and [`Client`].
//!
//! Both are driven by an explicit `step()` rather than a coroutine or async
//! task, matching the cooperative, non-blocking scheduling model (spec §5):
//! all retries are state-machine countdowns (`delay_t`, `msg_wait`,
//! `dropoff_grace`), never a suspended wait.
//!
//! # Storage shape
//!
//! `Train` and `Client` are plain structs stored as `Vec<Train>` /
//! `Vec<Client>` by the driver (array-of-structs), not the
//! structure-of-arrays layout used elsewhere in this codebase for large,
//! homogeneous agent populations. A train dispatch run has at most a few
//! dozen devices with very different shapes (a train's election and motion
//! state vs. a client's request/ride state), so there is no hot SoA loop to
//! win back, and AoS keeps each agent's invariants (e.g. "`pending` is
//! either empty or fully populated") enforced by the type itself.

pub mod client;
pub mod error;
pub mod train;

#[cfg(test)]
mod tests;

pub use client::{Client, ClientMode, ClientOutcome};
pub use error::{AgentError, AgentResult};
pub use train::{PendingElection, Train, TrainMode, TrainOutcome};
