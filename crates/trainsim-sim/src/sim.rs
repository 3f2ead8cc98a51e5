//! The `Sim` struct and its tick loop.

use std::sync::Arc;

use tracing::{debug, info};

use trainsim_agents::{Client, ClientOutcome, Train, TrainOutcome};
use trainsim_core::time::SimClock;
use trainsim_core::{DeviceId, Point, SimRng, Tick};
use trainsim_map::{Map, Router};
use trainsim_net::NetworkBus;
use trainsim_semaphore::EdgeSemaphore;

use crate::config::SimConfig;
use crate::spawner::ClientSpawner;
use crate::{SimObserver, SimResult};

/// The main simulation runner.
///
/// Holds the `Map`, the shared `EdgeSemaphore`, the `NetworkBus`, and the
/// device population as two typed vectors — `Vec<Train>` and `Vec<Client>`
/// rather than a single homogeneous store, since spec's agent population is
/// small, heterogeneous, and message-driven (see `trainsim-agents`'s module
/// docs for why this departs from a Structure-of-Arrays layout).
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<S: ClientSpawner> {
    pub config: SimConfig,
    pub map: Map,
    pub router: Box<dyn Router>,
    pub bus: NetworkBus,
    pub sem: Arc<EdgeSemaphore>,
    pub trains: Vec<Train>,
    pub clients: Vec<Client>,
    pub spawner: S,
    pub rng: SimRng,
    pub clock: SimClock,
    pub tick: Tick,
    pub(crate) next_device_id: DeviceId,
    pub(crate) delivered: u32,
    pub client_range: f32,
    pub train_range: f32,
}

impl<S: ClientSpawner> Sim<S> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until `config.stopping_rule` is satisfied, calling `observer` at
    /// every tick boundary.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while !self.config.stopping_rule.is_satisfied(self.tick, self.delivered) {
            observer.on_tick_start(self.tick);
            self.step()?;
            observer.on_tick_end(self.tick, &self.trains, &self.clients);
            self.tick = self.tick.next();
        }
        observer.on_sim_end(self.tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position, ignoring
    /// `config.stopping_rule`. Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            observer.on_tick_start(self.tick);
            self.step()?;
            observer.on_tick_end(self.tick, &self.trains, &self.clients);
            self.tick = self.tick.next();
        }
        Ok(())
    }

    /// Number of clients that have reached `Dropoff` and retired so far.
    pub fn delivered(&self) -> u32 {
        self.delivered
    }

    /// Register a client directly, bypassing the spawner boundary. Used by
    /// tests that need an exact pickup/dropoff pair (spec §8 scenarios).
    pub fn spawn_client(&mut self, pickup: Point, dropoff: Point) -> SimResult<DeviceId> {
        let id = self.next_id();
        let client = Client::new(id, pickup, dropoff, self.config.client_req_period, self.client_range, &mut self.bus)?;
        self.clients.push(client);
        Ok(id)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    /// Advance exactly one tick: maybe spawn a client, step every train,
    /// step every client, then retire terminated trains and delivered
    /// clients (spec §2: "a discrete-time driver repeatedly invokes `step()`
    /// on every registered device in an unspecified-but-stable order").
    pub fn step(&mut self) -> SimResult<()> {
        if let Some((pickup, dropoff)) = self.spawner.maybe_spawn(self.tick, &self.map, &mut self.rng) {
            self.spawn_client(pickup, dropoff)?;
        }

        let mut terminated = Vec::new();
        for i in 0..self.trains.len() {
            let outcome = self.trains[i].step(
                &mut self.bus,
                &self.map,
                self.router.as_ref(),
                &self.sem,
                self.config.tick_duration_secs,
            )?;
            self.bus.update_position(self.trains[i].id, self.trains[i].pos)?;
            if outcome == TrainOutcome::Terminate {
                terminated.push(i);
            }
        }
        for &i in terminated.iter().rev() {
            let train = self.trains.remove(i);
            debug!(train = %train.id, "retired (out-of-order arrival)");
            self.bus.deregister(train.id);
        }

        let mut retired = Vec::new();
        for i in 0..self.clients.len() {
            let train_pos = self.clients[i]
                .assigned_train
                .and_then(|tid| self.trains.iter().find(|t| t.id == tid))
                .map(|t| t.pos);
            let outcome = self.clients[i].step(&mut self.bus, train_pos)?;
            if outcome == ClientOutcome::Retire {
                retired.push(i);
            }
        }
        for &i in retired.iter().rev() {
            let client = self.clients.remove(i);
            info!(client = %client.id, "delivered and retired");
            self.bus.deregister(client.id);
            self.delivered += 1;
        }

        Ok(())
    }

    fn next_id(&mut self) -> DeviceId {
        let id = self.next_device_id;
        self.next_device_id = DeviceId(id.0 + 1);
        id
    }
}
