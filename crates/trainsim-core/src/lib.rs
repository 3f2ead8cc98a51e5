//! `trainsim-core` — foundational types for the train dispatch simulation.
//!
//! This crate is a dependency of every other `trainsim-*` crate. It
//! intentionally has no `trainsim-*` dependencies and minimal external ones
//! (only `rand` and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                           |
//! |-----------|-----------------------------------------------------|
//! | [`ids`]   | `DeviceId`, `NodeId`, `EdgeId`, `EdgeKey`           |
//! | [`geo`]   | `Point`, Euclidean distance and vector helpers     |
//! | [`time`]  | `Tick`, `SimClock`                                 |
//! | [`rng`]   | `DeviceRng` (per-device), `SimRng` (global)        |
//! | [`error`] | `CoreError`, `CoreResult`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

pub use error::{CoreError, CoreResult};
pub use geo::Point;
pub use ids::{DeviceId, EdgeId, EdgeKey, NodeId};
pub use rng::{DeviceRng, SimRng};
pub use time::Tick;
