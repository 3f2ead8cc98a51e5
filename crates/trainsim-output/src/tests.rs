use trainsim_core::time::SimClock;
use trainsim_core::{DeviceId, DeviceRng, NodeId, Point};
use trainsim_net::NetworkBus;

use trainsim_agents::{Client, Train};

use crate::{CsvTraceWriter, SimTraceObserver, TextTraceWriter, TraceWriter};

fn tmp() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp dir")
}

fn fixture_train(id: u32) -> Train {
    let mut rng = DeviceRng::new(0, DeviceId(id));
    Train::new(DeviceId(id), NodeId(0), Point::new(0.0, 0.0), 6.0, &mut rng)
}

fn fixture_client(id: u32, bus: &mut NetworkBus) -> Client {
    Client::new(DeviceId(id), Point::new(0.0, 0.0), Point::new(5.0, 5.0), 20, 1000.0, bus).unwrap()
}

mod text {
    use super::*;

    #[test]
    fn writes_one_block_per_tick() {
        let dir = tmp();
        let path = dir.path().join("log.txt");
        let mut bus = NetworkBus::new();
        let train = fixture_train(0);
        let client = fixture_client(1, &mut bus);

        let mut w = TextTraceWriter::new(&path).unwrap();
        w.write_tick(trainsim_core::Tick(0), 0.0, &[train], &[client]).unwrap();
        w.finish().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("Simulation step 0, timer 0.00"));
        assert!(contents.contains("Device DeviceId(0), mode Wait"));
        assert!(contents.contains("Processing request None"));
        assert!(contents.contains("Device DeviceId(1), mode Call"));
        assert!(contents.contains("Train that will pick me up None"));
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tmp();
        let mut w = TextTraceWriter::new(&dir.path().join("log.txt")).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

mod csv_backend {
    use super::*;

    #[test]
    fn creates_file_with_header() {
        let dir = tmp();
        let mut w = CsvTraceWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("devices.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers,
            [
                "tick",
                "elapsed_secs",
                "device_id",
                "kind",
                "mode",
                "pending_client",
                "path",
                "client_queue",
                "assigned_train",
            ]
        );
    }

    #[test]
    fn writes_one_row_per_device() {
        let dir = tmp();
        let mut bus = NetworkBus::new();
        let train = fixture_train(0);
        let client = fixture_client(1, &mut bus);

        let mut w = CsvTraceWriter::new(dir.path()).unwrap();
        w.write_tick(trainsim_core::Tick(7), 0.7, &[train], &[client]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("devices.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "7");
        assert_eq!(&rows[0][3], "train");
        assert_eq!(&rows[0][5], "4294967295"); // no pending election
        assert_eq!(&rows[1][3], "client");
        assert_eq!(&rows[1][8], "4294967295"); // no assigned train yet
    }
}

#[test]
fn observer_forwards_ticks_and_reports_no_error() {
    let dir = tmp();
    let writer = TextTraceWriter::new(&dir.path().join("log.txt")).unwrap();
    let mut obs = SimTraceObserver::new(writer, SimClock::default());

    let mut bus = NetworkBus::new();
    let train = fixture_train(0);
    let client = fixture_client(1, &mut bus);

    use trainsim_sim::SimObserver;
    obs.on_tick_end(trainsim_core::Tick(0), &[train], &[client]);
    obs.on_sim_end(trainsim_core::Tick(1));

    assert!(obs.take_error().is_none());
}
