//! Simulation observer trait for progress reporting and trace output.

use trainsim_agents::{Client, Train};
use trainsim_core::Tick;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at tick boundaries.
///
/// All methods default to no-ops so implementors only override what they
/// need. `trainsim-output`'s trace writers are `SimObserver` implementations.
pub trait SimObserver {
    /// Called at the very start of each tick, before any device steps.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick, with read-only access to every
    /// surviving device (spec §6: "a per-tick text log listing each
    /// device's id, mode, and train-specific fields").
    fn on_tick_end(&mut self, _tick: Tick, _trains: &[Train], _clients: &[Client]) {}

    /// Called once after the run loop stops.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
