//! Fluent builder for constructing a [`Sim`].

use std::collections::HashSet;
use std::sync::Arc;

use trainsim_core::{DeviceId, DeviceRng, NodeId, SimRng};
use trainsim_core::time::SimClock;
use trainsim_map::{Map, Router};
use trainsim_net::NetworkBus;
use trainsim_semaphore::EdgeSemaphore;
use trainsim_agents::Train;

use crate::config::SimConfig;
use crate::spawner::ClientSpawner;
use crate::{Sim, SimResult};

/// Builds a [`Sim`] from a [`SimConfig`], a loaded [`Map`], a router, and a
/// [`ClientSpawner`].
///
/// # Example
///
/// ```rust,ignore
/// let map = trainsim_map::load_map("maps/demo")?;
/// let sim = SimBuilder::new(SimConfig::default(), map, Box::new(DijkstraRouter), PoissonFrequencySpawner::new(25))
///     .build()?;
/// ```
pub struct SimBuilder<S: ClientSpawner> {
    config: SimConfig,
    map: Map,
    router: Box<dyn Router>,
    spawner: S,
}

impl<S: ClientSpawner> SimBuilder<S> {
    pub fn new(config: SimConfig, map: Map, router: Box<dyn Router>, spawner: S) -> Self {
        Self { config, map, router, spawner }
    }

    /// Place `config.train_count` trains at random map vertices (not
    /// necessarily stops — `original_source/Simulation.py` places trains at
    /// `vert_pos[randint(0, nVertices - 1)]`, any vertex), wire up the bus
    /// and semaphore, and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<S>> {
        let (derived_client_range, derived_train_range) = self.map.suggested_ranges();
        let client_range = self.config.client_range.unwrap_or(derived_client_range);
        let train_range = self.config.train_range.unwrap_or(derived_train_range);

        let map_ref = &self.map;
        let edge_keys: HashSet<_> = (0..map_ref.node_count())
            .flat_map(|i| {
                let node = NodeId(i as u32);
                map_ref.out_edges(node).map(|e| map_ref.edge_key(e))
            })
            .collect();
        let sem = Arc::new(EdgeSemaphore::new(edge_keys));

        let mut bus = NetworkBus::new();
        let mut rng = SimRng::new(self.config.seed);

        let train_count = self.config.train_count;
        let mut trains = Vec::with_capacity(train_count);
        for i in 0..train_count {
            let id = DeviceId(i as u32);
            let start = rng.gen_range(0..self.map.node_count());
            let start_node = NodeId(start as u32);
            let pos = self.map.node_pos(start_node);
            let mut device_rng = DeviceRng::new(self.config.seed, id);
            let train = Train::new(id, start_node, pos, self.config.train_speed, &mut device_rng);
            bus.register(train.id, train.pos, train_range);
            trains.push(train);
        }

        Ok(Sim {
            config: self.config,
            map: self.map,
            router: self.router,
            bus,
            sem,
            trains,
            clients: Vec::new(),
            spawner: self.spawner,
            rng,
            clock: SimClock::default(),
            tick: trainsim_core::Tick::ZERO,
            next_device_id: DeviceId(train_count as u32),
            delivered: 0,
            client_range,
            train_range,
        })
    }
}
