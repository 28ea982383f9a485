//! Road network representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! All edge arrays (`edge_from`, `edge_to`, `edge_length_m`) are sorted by
//! source node and indexed by `EdgeId`.  The sort is stable, so a node's
//! outgoing edges keep the order in which the loader added them.  That
//! order is the router's edge-iteration order and fixes which of several
//! equal-length paths it returns.
//!
//! The network is immutable once built.  Share it by reference; nothing
//! downstream holds a mutable handle.

use cr_core::{EdgeId, GeoPoint, NodeId};

use crate::{GraphLoadError, SpatialError, SpatialResult};

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Directed road graph in CSR format.
///
/// All fields are `pub` for direct indexed access on hot paths.  Do not
/// construct directly; use [`RoadNetworkBuilder`].
pub struct RoadNetwork {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Geographic position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<GeoPoint>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Outgoing edges of node `n` are at EdgeIds
    /// `node_out_start[n] .. node_out_start[n+1]`.
    /// Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeId = position in sorted order) ──────────
    /// Source node of each edge.  Used to walk predecessor edges back to
    /// the origin during route reconstruction.
    pub edge_from: Vec<NodeId>,

    /// Destination node of each edge.
    pub edge_to: Vec<NodeId>,

    /// Length of each edge in metres.  Dijkstra edge cost.
    pub edge_length_m: Vec<f64>,
}

impl RoadNetwork {
    /// Construct an empty network with no nodes or edges.
    ///
    /// A placeholder only: [`RoadNetworkBuilder::build`] never returns an
    /// empty network, and spatial queries against this one fail with
    /// [`SpatialError::EmptyGraph`].
    pub fn empty() -> Self {
        Self {
            node_pos:       Vec::new(),
            node_out_start: vec![0],
            edge_from:      Vec::new(),
            edge_to:        Vec::new(),
            edge_length_m:  Vec::new(),
        }
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    /// `true` if `node` was added to this network.
    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_count()
    }

    /// Fail with [`SpatialError::NodeNotFound`] unless `node` exists.
    #[inline]
    pub fn check_node(&self, node: NodeId) -> SpatialResult<()> {
        if self.contains(node) {
            Ok(())
        } else {
            Err(SpatialError::NodeNotFound(node))
        }
    }

    // ── Node & edge lookup ────────────────────────────────────────────────

    /// Coordinate of `node`.
    pub fn node_pos(&self, node: NodeId) -> SpatialResult<GeoPoint> {
        self.node_pos
            .get(node.index())
            .copied()
            .ok_or(SpatialError::NodeNotFound(node))
    }

    /// `(from, to)` of `edge`, or `None` for an id outside this network.
    pub fn edge_endpoints(&self, edge: EdgeId) -> Option<(NodeId, NodeId)> {
        let i = edge.index();
        Some((*self.edge_from.get(i)?, *self.edge_to.get(i)?))
    }

    /// Length of `edge` in metres, or `None` for an id outside this network.
    pub fn edge_length_m(&self, edge: EdgeId) -> Option<f64> {
        self.edge_length_m.get(edge.index()).copied()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    ///
    /// This is a contiguous index range — no heap allocation.  `node` must
    /// exist; use [`check_node`](Self::check_node) on untrusted ids.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// Outgoing edges of `node` as `(edge, target, length_m)` triples.
    #[inline]
    pub fn outgoing(&self, node: NodeId) -> impl Iterator<Item = (EdgeId, NodeId, f64)> + '_ {
        self.out_edges(node)
            .map(|e| (e, self.edge_to[e.index()], self.edge_length_m[e.index()]))
    }

    /// Out-degree of `node` (number of outgoing edges).
    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] incrementally, then call [`build`](Self::build).
///
/// This is the hand-off point for external loaders: they parse their own
/// format, add nodes and directed edges in any order, and let `build()`
/// validate the result.
///
/// # Example
///
/// ```
/// use cr_core::GeoPoint;
/// use cr_spatial::RoadNetworkBuilder;
///
/// let mut b = RoadNetworkBuilder::new();
/// let a = b.add_node(GeoPoint::new(-17.389, -66.179));
/// let c = b.add_node(GeoPoint::new(-17.387, -66.148));
/// b.add_road(a, c, 3_300.0);
/// let net = b.build().unwrap();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2); // bidirectional
/// ```
pub struct RoadNetworkBuilder {
    nodes:     Vec<GeoPoint>,
    raw_edges: Vec<RawEdge>,
}

struct RawEdge {
    from:     NodeId,
    to:       NodeId,
    length_m: f64,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self { nodes: Vec::new(), raw_edges: Vec::new() }
    }

    /// Pre-allocate for the expected number of nodes and edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes:     Vec::with_capacity(nodes),
            raw_edges: Vec::with_capacity(edges),
        }
    }

    /// Add a road node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, pos: GeoPoint) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(pos);
        id
    }

    /// Add a **directed** edge from `from` to `to` of `length_m` metres.
    ///
    /// Endpoints and length are checked in [`build`](Self::build), not here.
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId, length_m: f64) {
        self.raw_edges.push(RawEdge { from, to, length_m });
    }

    /// Convenience: add edges in **both directions** for a two-way segment.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, length_m: f64) {
        self.add_directed_edge(a, b, length_m);
        self.add_directed_edge(b, a, length_m);
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Validate the input and produce a [`RoadNetwork`].
    ///
    /// # Errors
    ///
    /// - [`GraphLoadError::Empty`] when no node was added.
    /// - [`GraphLoadError::InvalidCoordinate`] for a NaN/infinite position.
    /// - [`GraphLoadError::DanglingEdge`] when an edge names a missing node.
    /// - [`GraphLoadError::InvalidLength`] for a negative or non-finite
    ///   length.
    ///
    /// Time complexity: O(N + E log E).
    pub fn build(self) -> Result<RoadNetwork, GraphLoadError> {
        let node_count = self.nodes.len();
        let edge_count = self.raw_edges.len();

        if node_count == 0 {
            return Err(GraphLoadError::Empty);
        }
        if let Some((i, &pos)) = self.nodes.iter().enumerate().find(|(_, p)| !p.is_finite()) {
            return Err(GraphLoadError::InvalidCoordinate { node: NodeId(i as u32), pos });
        }
        for (edge, e) in self.raw_edges.iter().enumerate() {
            if e.from.index() >= node_count || e.to.index() >= node_count {
                return Err(GraphLoadError::DanglingEdge {
                    edge,
                    from: e.from,
                    to: e.to,
                    node_count,
                });
            }
            if !e.length_m.is_finite() || e.length_m < 0.0 {
                return Err(GraphLoadError::InvalidLength {
                    edge,
                    from: e.from,
                    to: e.to,
                    length_m: e.length_m,
                });
            }
        }

        // Stable sort keeps per-node insertion order.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_from:     Vec<NodeId> = raw.iter().map(|e| e.from).collect();
        let edge_to:       Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_length_m: Vec<f64>    = raw.iter().map(|e| e.length_m).collect();

        // Build CSR row pointer (node_out_start).
        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        Ok(RoadNetwork {
            node_pos: self.nodes,
            node_out_start,
            edge_from,
            edge_to,
            edge_length_m,
        })
    }
}

impl Default for RoadNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
