//! Deterministic per-device and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each device gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (device_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive device IDs uniformly across the seed space.
//! Trains never share RNG state, and inserting a new train or client at the
//! end of the registry does not disturb the seeds of existing devices — runs
//! are reproducible from one seed even as the population grows (e.g. as
//! clients spawn over the course of a run).

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::DeviceId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Per-device deterministic RNG.
///
/// Used by [`Train`](../trainsim_agents/struct.Train.html) to draw its
/// one-shot `delayWanted` value (spec §3/§4.4) at construction.
pub struct DeviceRng(SmallRng);

impl DeviceRng {
    /// Seed deterministically from the run's global seed and a device ID.
    pub fn new(global_seed: u64, device: DeviceId) -> Self {
        let seed = global_seed ^ (device.0 as u64).wrapping_mul(MIXING_CONSTANT);
        DeviceRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}

/// Simulation-level RNG for global operations (the client-arrival generator
/// boundary, initial train placement).
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Choose a random element from a non-empty slice.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
