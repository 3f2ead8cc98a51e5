//! The client-arrival generator boundary (spec §1: "the random client
//! generator" is out of scope; only its contract is specified here).

use trainsim_core::{Point, SimRng, Tick};
use trainsim_map::Map;

/// Decides, once per tick, whether a new client appears and where.
///
/// Implementations return `Some((pickup, dropoff))` in map-space positions
/// drawn from the map's stops, or `None` if no client appears this tick.
pub trait ClientSpawner {
    fn maybe_spawn(&mut self, tick: Tick, map: &Map, rng: &mut SimRng) -> Option<(Point, Point)>;
}

/// Default spawner, grounded directly on `original_source/Simulation.py`'s
/// `r = randint(1, 100); if r % frequency_of_client == 0: spawn`.
///
/// Not a real Poisson process (the name matches the original's informal
/// terminology for "clients trickle in at roughly this rate") — it carries
/// no further tuning surface, per spec §1/§9: the generator's exact
/// statistical shape is out of scope.
pub struct PoissonFrequencySpawner {
    pub frequency: u32,
}

impl PoissonFrequencySpawner {
    pub fn new(frequency: u32) -> Self {
        Self { frequency }
    }
}

impl ClientSpawner for PoissonFrequencySpawner {
    fn maybe_spawn(&mut self, _tick: Tick, map: &Map, rng: &mut SimRng) -> Option<(Point, Point)> {
        let roll: u32 = rng.gen_range(1..=100);
        if roll % self.frequency != 0 {
            return None;
        }

        let stops: Vec<_> = map.stops().collect();
        if stops.len() < 2 {
            return None;
        }

        let init = rng.gen_range(0..stops.len());
        let mut fin = rng.gen_range(0..stops.len());
        if fin == init {
            fin += 1;
            if fin == stops.len() {
                fin = 0;
            }
        }

        Some((map.node_pos(stops[init]), map.node_pos(stops[fin])))
    }
}

/// A spawner that never spawns. Useful for tests that inject clients
/// directly rather than through the random generator boundary.
pub struct NoSpawner;

impl ClientSpawner for NoSpawner {
    fn maybe_spawn(&mut self, _tick: Tick, _map: &Map, _rng: &mut SimRng) -> Option<(Point, Point)> {
        None
    }
}
