//! `SimTraceObserver<W>` — bridges `trainsim_sim::SimObserver` to a
//! [`TraceWriter`] backend.

use trainsim_agents::{Client, Train};
use trainsim_core::time::SimClock;
use trainsim_core::Tick;
use trainsim_sim::SimObserver;

use crate::writer::TraceWriter;
use crate::OutputError;

/// A [`SimObserver`] that writes one trace block per tick to any
/// [`TraceWriter`] backend (text, CSV, …).
///
/// Errors from the writer are stored internally because `SimObserver`
/// methods have no return value. After `sim.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct SimTraceObserver<W: TraceWriter> {
    writer: W,
    clock: SimClock,
    last_error: Option<OutputError>,
}

impl<W: TraceWriter> SimTraceObserver<W> {
    pub fn new(writer: W, clock: SimClock) -> Self {
        Self { writer, clock, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: TraceWriter> SimObserver for SimTraceObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, trains: &[Train], clients: &[Client]) {
        let elapsed_secs = self.clock.elapsed_secs(tick);
        let result = self.writer.write_tick(tick, elapsed_secs, trains, clients);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
