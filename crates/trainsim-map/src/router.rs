//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! A train calls routing via the [`Router`] trait, so applications can swap
//! in a custom routing oracle (contraction hierarchies, A*, a congestion
//! model) without touching the election or motion logic. The source this
//! simulation is modeled on stubs its `calculate_route` to return an empty
//! path and a fixed distance of 4; this spec treats the oracle as an
//! injected capability with contract `route(from, to) -> (vertices[],
//! length)` and the default [`DijkstraRouter`] gives that contract a real
//! shortest-path implementation.
//!
//! # Cost units
//!
//! Edge weights are plain Euclidean lengths (`f32`), not travel time — the
//! map carries no speed profile, and every train shares one `vMax`.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use trainsim_core::NodeId;

use crate::error::MapError;
use crate::network::Map;

/// The result of a routing query: an ordered list of vertices to traverse
/// (excluding `from`, which the caller is already at) and the total length.
#[derive(Debug, Clone)]
pub struct Route {
    /// Vertices to visit in order, from the hop after `from` through `to`.
    pub vertices: Vec<NodeId>,
    /// Cumulative Euclidean length of the route.
    pub total_length: f32,
}

impl Route {
    /// `true` if the source and destination are the same vertex.
    pub fn is_trivial(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Pluggable routing engine.
///
/// Implementations must be `Send + Sync` so a multi-threaded driver could
/// share one oracle across trains (spec §9: a parallel port would still
/// treat this as a read-only shared capability).
pub trait Router: Send + Sync {
    /// Compute a route from `from` to `to`.
    ///
    /// Returns [`MapError::NoRoute`] if no path exists. `from == to` is
    /// handled as a trivial empty route rather than an error.
    fn route(&self, map: &Map, from: NodeId, to: NodeId) -> Result<Route, MapError>;
}

/// Standard Dijkstra's algorithm over the map's CSR adjacency.
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(&self, map: &Map, from: NodeId, to: NodeId) -> Result<Route, MapError> {
        dijkstra(map, from, to)
    }
}

fn dijkstra(map: &Map, from: NodeId, to: NodeId) -> Result<Route, MapError> {
    if from == to {
        return Ok(Route { vertices: vec![], total_length: 0.0 });
    }

    let n = map.node_count();
    // dist[v] stored as bits so it can live in an ordered min-heap key.
    let mut dist = vec![f32::INFINITY; n];
    let mut prev = vec![NodeId::INVALID; n];

    dist[from.index()] = 0.0;

    let mut heap: BinaryHeap<Reverse<(ordered_f32::OrderedF32, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((ordered_f32::OrderedF32(0.0), from)));

    while let Some(Reverse((cost, node))) = heap.pop() {
        if node == to {
            return Ok(reconstruct(prev, from, to, dist[to.index()]));
        }
        if cost.0 > dist[node.index()] {
            continue;
        }
        for edge in map.out_edges(node) {
            let neighbor = map.edge_to[edge.index()];
            let new_cost = cost.0 + map.edge_weight(edge);
            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev[neighbor.index()] = node;
                heap.push(Reverse((ordered_f32::OrderedF32(new_cost), neighbor)));
            }
        }
    }

    Err(MapError::NoRoute { from, to })
}

fn reconstruct(prev: Vec<NodeId>, from: NodeId, to: NodeId, total_length: f32) -> Route {
    let mut vertices = Vec::new();
    let mut cur = to;
    while cur != from {
        vertices.push(cur);
        cur = prev[cur.index()];
    }
    vertices.reverse();
    Route { vertices, total_length }
}

/// A thin `f32` wrapper implementing `Ord` for use as a binary-heap key.
///
/// Map edge weights are always finite and non-negative (spec §3 invariant),
/// so `NaN` never enters the heap; `partial_cmp` is safe to unwrap.
mod ordered_f32 {
    #[derive(Copy, Clone, PartialEq, PartialOrd)]
    pub struct OrderedF32(pub f32);

    impl Eq for OrderedF32 {}

    impl Ord for OrderedF32 {
        fn cmp(&self, other: &Self) -> std::cmp::Ordering {
            self.0.partial_cmp(&other.0).expect("edge weights are never NaN")
        }
    }
}
