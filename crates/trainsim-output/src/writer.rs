//! The `TraceWriter` trait implemented by all backends.

use trainsim_agents::{Client, Train};
use trainsim_core::Tick;

use crate::OutputResult;

/// Trait implemented by the text and CSV trace backends.
///
/// All methods are infallible from the observer's perspective — errors are
/// stored internally and retrieved with
/// [`SimTraceObserver::take_error`](crate::SimTraceObserver::take_error).
pub trait TraceWriter {
    /// Record one tick's worth of device state (spec §6).
    fn write_tick(
        &mut self,
        tick: Tick,
        elapsed_secs: f32,
        trains: &[Train],
        clients: &[Client],
    ) -> OutputResult<()>;

    /// Flush and close all underlying file handles. Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
