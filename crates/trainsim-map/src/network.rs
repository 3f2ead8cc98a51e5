//! Map representation and builder.
//!
//! # Data layout
//!
//! The graph is undirected but stored as a directed **Compressed Sparse Row
//! (CSR)** adjacency: each undirected edge `{u, v}` with weight `w` is
//! entered as two directed entries, `u -> v` and `v -> u`, both carrying
//! `w`. Given a `NodeId n`, its outgoing entries occupy the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! Iteration over a node's neighbors is therefore a contiguous memory scan,
//! same as a directed road graph's out-edges — ideal for Dijkstra's inner
//! loop. [`EdgeKey`](trainsim_core::EdgeKey) is the canonical identity that
//! collapses the two directed entries `u -> v` and `v -> u` back into one
//! edge for the semaphore and for a train's `current_edge`.

use std::collections::HashMap;

use trainsim_core::{EdgeId, EdgeKey, NodeId, Point};

use crate::error::{MapError, MapResult};

/// Undirected weighted graph with planar vertex positions and a stop flag.
///
/// All arrays are `pub` for direct indexed access on hot paths (the motion
/// integrator and the router both live outside this crate). Do not
/// construct directly; use [`MapBuilder`].
pub struct Map {
    /// Declared identifier of each vertex. Indexed by `NodeId`.
    pub node_name: Vec<String>,
    /// Planar position of each vertex. Indexed by `NodeId`.
    pub node_pos: Vec<Point>,
    /// Whether each vertex is a passenger stop (name does not start with `_`).
    pub node_is_stop: Vec<bool>,

    /// CSR row pointer. Outgoing entries of node `n` are at `EdgeId`s
    /// `node_out_start[n] .. node_out_start[n+1]`. Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    /// Source node of each directed entry (indexed by `EdgeId`).
    pub edge_from: Vec<NodeId>,
    /// Destination node of each directed entry.
    pub edge_to: Vec<NodeId>,
    /// Weight of each directed entry (mirrored across the two directions of
    /// the same undirected edge).
    pub edge_weight: Vec<f32>,

    /// The declared `Map size;S` field from the Graph Info file, used to
    /// derive default broadcast ranges (spec §6/§9 `R_train = 3 * R_client`).
    pub size: f32,

    name_index: HashMap<String, NodeId>,
}

impl Map {
    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    /// Number of distinct undirected edges (half of the directed entry count).
    pub fn edge_count(&self) -> usize {
        self.edge_to.len() / 2
    }

    pub fn node_pos(&self, node: NodeId) -> Point {
        self.node_pos[node.index()]
    }

    pub fn is_stop(&self, node: NodeId) -> bool {
        self.node_is_stop[node.index()]
    }

    pub fn node_name(&self, node: NodeId) -> &str {
        &self.node_name[node.index()]
    }

    pub fn node_by_name(&self, name: &str) -> MapResult<NodeId> {
        self.name_index
            .get(name)
            .copied()
            .ok_or_else(|| MapError::UnknownVertexName(name.to_string()))
    }

    /// Find the vertex whose position exactly matches `pos`, if any.
    ///
    /// Used to resolve a `REQ`'s `(x, y)` pickup/dropoff payload (spec §6:
    /// "Positions are `(x, y)` real pairs") back to a routable `NodeId` —
    /// clients always originate and terminate exactly at a vertex.
    pub fn node_at(&self, pos: Point) -> Option<NodeId> {
        self.node_pos
            .iter()
            .position(|&p| p.same_as(pos))
            .map(|i| NodeId(i as u32))
    }

    /// All vertices flagged as passenger stops.
    pub fn stops(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.node_count())
            .map(|i| NodeId(i as u32))
            .filter(move |&n| self.is_stop(n))
    }

    /// Iterator over the `EdgeId`s of all directed entries leaving `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// Canonical edge key `{u, v}` of a directed entry.
    pub fn edge_key(&self, edge: EdgeId) -> EdgeKey {
        EdgeKey::new(self.edge_from[edge.index()], self.edge_to[edge.index()])
    }

    pub fn edge_weight(&self, edge: EdgeId) -> f32 {
        self.edge_weight[edge.index()]
    }

    /// Weight of the edge between two adjacent vertices, if one exists.
    pub fn edge_weight_between(&self, a: NodeId, b: NodeId) -> Option<f32> {
        self.out_edges(a)
            .find(|&e| self.edge_to[e.index()] == b)
            .map(|e| self.edge_weight(e))
    }

    /// Default `(client_range, train_range)` derived from the map's declared
    /// size, per spec §6/§9: `R_train = 3 * R_client`.
    pub fn suggested_ranges(&self) -> (f32, f32) {
        let client_range = self.size * 0.5;
        (client_range, client_range * 3.0)
    }
}

struct RawEdge {
    a: NodeId,
    b: NodeId,
    weight: f32,
}

/// Construct a [`Map`] incrementally, then call [`build`](Self::build).
pub struct MapBuilder {
    names: Vec<String>,
    positions: Vec<Point>,
    raw_edges: Vec<RawEdge>,
    size: f32,
}

impl MapBuilder {
    pub fn new() -> Self {
        Self {
            names: Vec::new(),
            positions: Vec::new(),
            raw_edges: Vec::new(),
            size: 0.0,
        }
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            names: Vec::with_capacity(nodes),
            positions: Vec::with_capacity(nodes),
            raw_edges: Vec::with_capacity(edges),
            size: 0.0,
        }
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Add a vertex and return its `NodeId` (sequential from 0). A vertex's
    /// stop flag is derived from its name at `build()` time, not here.
    pub fn add_node(&mut self, name: impl Into<String>, pos: Point) -> NodeId {
        let id = NodeId(self.names.len() as u32);
        self.names.push(name.into());
        self.positions.push(pos);
        id
    }

    /// Add an undirected edge `{a, b}` with the given weight. Two directed
    /// CSR entries are created at `build()` time.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, weight: f32) {
        self.raw_edges.push(RawEdge { a, b, weight });
    }

    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    pub fn edge_count(&self) -> usize {
        self.raw_edges.len()
    }

    /// Consume the builder and produce a [`Map`].
    pub fn build(self) -> Map {
        let node_count = self.names.len();

        let mut directed: Vec<(NodeId, NodeId, f32)> = Vec::with_capacity(self.raw_edges.len() * 2);
        for e in &self.raw_edges {
            directed.push((e.a, e.b, e.weight));
            directed.push((e.b, e.a, e.weight));
        }
        directed.sort_unstable_by_key(|&(from, _, _)| from.0);

        let edge_from: Vec<NodeId> = directed.iter().map(|&(f, _, _)| f).collect();
        let edge_to: Vec<NodeId> = directed.iter().map(|&(_, t, _)| t).collect();
        let edge_weight: Vec<f32> = directed.iter().map(|&(_, _, w)| w).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for &(from, _, _) in &directed {
            node_out_start[from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, directed.len());

        let node_is_stop: Vec<bool> = self.names.iter().map(|n| !n.starts_with('_')).collect();
        let name_index: HashMap<String, NodeId> = self
            .names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), NodeId(i as u32)))
            .collect();

        Map {
            node_name: self.names,
            node_pos: self.positions,
            node_is_stop,
            node_out_start,
            edge_from,
            edge_to,
            edge_weight,
            size: self.size,
            name_index,
        }
    }
}

impl Default for MapBuilder {
    fn default() -> Self {
        Self::new()
    }
}
