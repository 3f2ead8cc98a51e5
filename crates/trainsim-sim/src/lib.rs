//! `trainsim-sim` — the discrete-time driver loop.
//!
//! # Tick loop (spec §2, §4.6, §5)
//!
//! ```text
//! for each tick:
//!   ① Spawn    — the ClientSpawner boundary maybe adds one new client.
//!   ② Trains   — step() every train: receive filter, election state
//!                machine, motion + semaphore integrator.
//!   ③ Clients  — step() every client: receive filter, mode transitions.
//!   ④ Retire   — remove trains that self-terminated (OutOfOrder arrival)
//!                and clients that finished their dropoff grace period.
//! ```
//!
//! Unlike the teacher framework's sparse wake-queue scheduler, every device
//! steps every tick — spec's population is small and message-driven rather
//! than bulk-scheduled (spec §2: "a discrete-time driver repeatedly invokes
//! `step()` on every registered device").
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use trainsim_map::{load_map, DijkstraRouter};
//! use trainsim_sim::{NoopObserver, SimBuilder, SimConfig};
//! use trainsim_sim::spawner::PoissonFrequencySpawner;
//!
//! let map = load_map("maps/demo")?;
//! let mut sim = SimBuilder::new(
//!     SimConfig::default(),
//!     map,
//!     Box::new(DijkstraRouter),
//!     PoissonFrequencySpawner::new(25),
//! )
//! .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod sim;
pub mod spawner;


pub use builder::SimBuilder;
pub use config::{SimConfig, StoppingRule};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
pub use spawner::{ClientSpawner, NoSpawner, PoissonFrequencySpawner};
