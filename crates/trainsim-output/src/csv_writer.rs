//! CSV trace backend.
//!
//! Writes a single `devices.csv` in the configured directory, one row per
//! device per tick (see [`DeviceTraceRow`]).

use std::fs::File;
use std::path::Path;

use csv::Writer;

use trainsim_agents::{Client, Train};
use trainsim_core::Tick;

use crate::row::DeviceTraceRow;
use crate::writer::TraceWriter;
use crate::OutputResult;

pub struct CsvTraceWriter {
    devices: Writer<File>,
    finished: bool,
}

impl CsvTraceWriter {
    /// Open (or create) `devices.csv` in `dir` and write the header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut devices = Writer::from_path(dir.join("devices.csv"))?;
        devices.write_record([
            "tick",
            "elapsed_secs",
            "device_id",
            "kind",
            "mode",
            "pending_client",
            "path",
            "client_queue",
            "assigned_train",
        ])?;
        Ok(Self { devices, finished: false })
    }

    fn write_row(&mut self, row: &DeviceTraceRow) -> OutputResult<()> {
        self.devices.write_record(&[
            row.tick.to_string(),
            row.elapsed_secs.to_string(),
            row.device_id.to_string(),
            row.kind.to_string(),
            row.mode.clone(),
            row.pending_client.to_string(),
            row.path.clone(),
            row.client_queue.clone(),
            row.assigned_train.to_string(),
        ])?;
        Ok(())
    }
}

impl TraceWriter for CsvTraceWriter {
    fn write_tick(
        &mut self,
        tick: Tick,
        elapsed_secs: f32,
        trains: &[Train],
        clients: &[Client],
    ) -> OutputResult<()> {
        for train in trains {
            let row = DeviceTraceRow {
                tick: tick.0,
                elapsed_secs,
                device_id: train.id.0,
                kind: "train",
                mode: format!("{:?}", train.mode),
                pending_client: train
                    .pending
                    .as_ref()
                    .map(|p| p.client.0)
                    .unwrap_or(DeviceTraceRow::NONE),
                path: train
                    .path
                    .iter()
                    .map(|n| n.0.to_string())
                    .collect::<Vec<_>>()
                    .join(";"),
                client_queue: train
                    .client_queue
                    .iter()
                    .map(|leg| leg.client.0.to_string())
                    .collect::<Vec<_>>()
                    .join(";"),
                assigned_train: DeviceTraceRow::NONE,
            };
            self.write_row(&row)?;
        }

        for client in clients {
            let row = DeviceTraceRow {
                tick: tick.0,
                elapsed_secs,
                device_id: client.id.0,
                kind: "client",
                mode: format!("{:?}", client.mode),
                pending_client: DeviceTraceRow::NONE,
                path: String::new(),
                client_queue: String::new(),
                assigned_train: client
                    .assigned_train
                    .map(|t| t.0)
                    .unwrap_or(DeviceTraceRow::NONE),
            };
            self.write_row(&row)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.devices.flush()?;
        Ok(())
    }
}
