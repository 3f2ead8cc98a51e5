//! `trainsim-output` — per-tick trace writers.
//!
//! spec §6: "A per-tick text log listing each device's id, mode, and
//! train-specific fields (`pending`, `path`, `clientQueue`). No other
//! persistence." Two backends are provided, both implementing
//! [`TraceWriter`] and driven by [`SimTraceObserver`] (a
//! `trainsim_sim::SimObserver`):
//!
//! | Backend            | Format                                           |
//! |---------------------|--------------------------------------------------|
//! | [`TextTraceWriter`] | Plain text, one block per device per tick — matches `original_source/Simulation.py`'s `log.txt`. |
//! | [`CsvTraceWriter`]  | One row per device per tick, via the `csv` crate. |
//!
//! # Usage
//!
//! ```rust,ignore
//! use trainsim_output::{SimTraceObserver, TextTraceWriter};
//!
//! let writer = TextTraceWriter::new(Path::new("log.txt"))?;
//! let mut obs = SimTraceObserver::new(writer, sim.clock);
//! sim.run(&mut obs)?;
//! obs.take_error().map(|e| eprintln!("trace write error: {e}"));
//! ```

pub mod csv_writer;
pub mod error;
pub mod observer;
pub mod row;
pub mod text_writer;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv_writer::CsvTraceWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimTraceObserver;
pub use row::DeviceTraceRow;
pub use text_writer::TextTraceWriter;
pub use writer::TraceWriter;
