//! Plain-text trace backend, matching `original_source/Simulation.py`'s
//! per-tick `log.txt` layout:
//!
//! ```text
//! Simulation step 12, timer 1.20
//!     Device DeviceId(0), mode Busy
//!       Processing request None
//!       Path [NodeId(3), NodeId(4)]
//!       Clients list [DeviceId(2)]
//!     Device DeviceId(2), mode Onboard
//!       Train that will pick me up Some(DeviceId(0))
//!
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use trainsim_agents::{Client, Train};
use trainsim_core::Tick;

use crate::writer::TraceWriter;
use crate::OutputResult;

pub struct TextTraceWriter {
    out: BufWriter<File>,
    finished: bool,
}

impl TextTraceWriter {
    pub fn new(path: &Path) -> OutputResult<Self> {
        Ok(Self { out: BufWriter::new(File::create(path)?), finished: false })
    }
}

impl TraceWriter for TextTraceWriter {
    fn write_tick(
        &mut self,
        tick: Tick,
        elapsed_secs: f32,
        trains: &[Train],
        clients: &[Client],
    ) -> OutputResult<()> {
        writeln!(self.out, "Simulation step {}, timer {:.2}", tick.0, elapsed_secs)?;

        for train in trains {
            writeln!(self.out, "\tDevice {}, mode {:?}", train.id, train.mode)?;
            let pending = train.pending.as_ref().map(|p| p.client);
            writeln!(self.out, "\t  Processing request {:?}", pending)?;
            writeln!(self.out, "\t  Path {:?}", train.path)?;
            let queue: Vec<_> = train.client_queue.iter().map(|leg| leg.client).collect();
            writeln!(self.out, "\t  Clients list {:?}", queue)?;
        }
        for client in clients {
            writeln!(self.out, "\tDevice {}, mode {:?}", client.id, client.mode)?;
            writeln!(self.out, "\t  Train that will pick me up {:?}", client.assigned_train)?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.out.flush()?;
        Ok(())
    }
}
