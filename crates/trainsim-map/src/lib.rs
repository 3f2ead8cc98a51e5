//! `trainsim-map` — the map graph, its CSV loader, and the routing oracle.
//!
//! # Crate layout
//!
//! | Module      | Contents                                             |
//! |-------------|-------------------------------------------------------|
//! | [`network`] | `Map` (undirected CSR graph), `MapBuilder`            |
//! | [`loader`]  | `load_map` — the three-CSV map file format            |
//! | [`router`]  | `Router` trait, `Route`, `DijkstraRouter`              |
//! | [`error`]   | `MapError`, `MapResult<T>`                            |
//!
//! Unlike a road network built from OSM, this graph is small, fully declared
//! up front by a map file set, and never snapped to spatially — every
//! position a device cares about (a client's pickup, a stop) is already a
//! named vertex, so there is no R-tree here.

pub mod error;
pub mod loader;
pub mod network;
pub mod router;

#[cfg(test)]
mod tests;

pub use error::{MapError, MapResult};
pub use loader::load_map;
pub use network::{Map, MapBuilder};
pub use router::{DijkstraRouter, Route, Router};
