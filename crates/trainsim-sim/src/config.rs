//! Driver configuration (spec §6 "Driver configuration").
//!
//! This is the *library* surface only: parsing these fields from `argv` is a
//! CLI concern and explicitly out of scope (spec §1).

use trainsim_core::Tick;

/// When the driver should stop (spec §6: "total steps or default stopping
/// rule (stop after 10 clients delivered)").
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StoppingRule {
    /// Run for exactly this many ticks.
    FixedTicks(u64),
    /// Stop once this many clients have reached `Dropoff` and retired.
    DeliveredCount(u32),
}

impl StoppingRule {
    pub fn is_satisfied(&self, tick: Tick, delivered: u32) -> bool {
        match *self {
            StoppingRule::FixedTicks(n) => tick.0 >= n,
            StoppingRule::DeliveredCount(n) => delivered >= n,
        }
    }
}

impl Default for StoppingRule {
    fn default() -> Self {
        StoppingRule::DeliveredCount(10)
    }
}

/// Driver configuration (spec §6), mirroring the original CLI's defaults:
/// `-nT 3 -fC 25 -tS -1 -vS 1`.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Initial number of trains placed on the map.
    pub train_count: usize,
    /// `r % client_frequency == 0` chance of a client spawn per tick
    /// (`original_source/Simulation.py`'s `args.frequency_of_client`).
    pub client_frequency: u32,
    pub stopping_rule: StoppingRule,
    /// Seconds of simulated time per tick; also the display ratio for the
    /// per-tick elapsed-time figure (spec §6 "step-to-second ratio").
    pub tick_duration_secs: f32,
    /// Seed for every per-device RNG and the simulation-level RNG.
    pub seed: u64,
    /// Override for the client broadcast range. `None` derives it from the
    /// map's declared size via `Map::suggested_ranges()`.
    pub client_range: Option<f32>,
    /// Override for the train broadcast range. `None` derives it the same way.
    pub train_range: Option<f32>,
    /// `vMax` given to every newly built train (spec §3 `Train.vMax`).
    pub train_speed: f32,
    /// Ticks between REQ rebroadcasts while a client is unacknowledged.
    pub client_req_period: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            train_count: 3,
            client_frequency: 25,
            stopping_rule: StoppingRule::default(),
            tick_duration_secs: 0.1,
            seed: 0,
            client_range: None,
            train_range: None,
            train_speed: 6.0,
            client_req_period: 20,
        }
    }
}
