//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! The planning session calls routing through the [`Router`] trait, so
//! applications can swap in other engines (A*, contraction hierarchies)
//! without touching the session.  The default [`DijkstraRouter`] minimises
//! total edge length.
//!
//! # Cost units
//!
//! Costs are edge lengths in **metres** (`f64`).  Lengths are validated as
//! finite and non-negative when the network is built, so the search never
//! re-checks them.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use cr_core::{EdgeId, NodeId};

use crate::network::RoadNetwork;
use crate::{SpatialError, SpatialResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query.
///
/// `nodes` runs from origin to destination; `edges[i]` is the edge chosen
/// between `nodes[i]` and `nodes[i + 1]`, so `edges.len() == nodes.len() - 1`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub nodes: Vec<NodeId>,
    pub edges: Vec<EdgeId>,
    /// Cumulative length of `edges` as accumulated by the search, in metres.
    pub length_m: f64,
}

impl Route {
    /// The single-node route from `node` to itself.
    pub fn trivial(node: NodeId) -> Self {
        Self { nodes: vec![node], edges: Vec::new(), length_m: 0.0 }
    }

    pub fn origin(&self) -> NodeId {
        self.nodes.first().copied().unwrap_or(NodeId::INVALID)
    }

    pub fn destination(&self) -> NodeId {
        self.nodes.last().copied().unwrap_or(NodeId::INVALID)
    }

    /// `true` if the origin and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }

    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.edges.len()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`: one router value serves every
/// request of a session, including requests running on rayon workers.
/// Search state belongs to a single `route` call.
pub trait Router: Send + Sync {
    /// Compute a minimum-length route from `from` to `to`.
    ///
    /// # Errors
    ///
    /// - [`SpatialError::NodeNotFound`] if either endpoint is not in `network`.
    /// - [`SpatialError::NoRoute`] if `to` is unreachable from `from`.
    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<Route>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Standard priority-queue Dijkstra over the CSR road graph.
///
/// Among equal-length paths the result is the one discovered first: the
/// frontier pops `(cost, NodeId)` in ascending order and a node's
/// predecessor is only replaced on a strictly shorter distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<Route> {
        dijkstra(network, from, to)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Frontier entry.  `f64` costs are totally ordered via `total_cmp`; the
/// node id breaks equal costs.
#[derive(Copy, Clone, Debug)]
struct Frontier {
    cost: f64,
    node: NodeId,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .total_cmp(&other.cost)
            .then_with(|| self.node.cmp(&other.node))
    }
}

fn dijkstra(network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<Route> {
    network.check_node(from)?;
    network.check_node(to)?;

    if from == to {
        return Ok(Route::trivial(from));
    }

    let n = network.node_count();
    // dist[v] = best known length (m) to reach v.
    let mut dist      = vec![f64::INFINITY; n];
    // prev_edge[v] = EdgeId that reached v; EdgeId::INVALID for unreached nodes.
    let mut prev_edge = vec![EdgeId::INVALID; n];

    dist[from.index()] = 0.0;

    // Reverse makes BinaryHeap (max) behave as min-heap.
    let mut heap: BinaryHeap<Reverse<Frontier>> = BinaryHeap::new();
    heap.push(Reverse(Frontier { cost: 0.0, node: from }));

    while let Some(Reverse(Frontier { cost, node })) = heap.pop() {
        if node == to {
            return Ok(reconstruct(network, &prev_edge, from, to, cost));
        }

        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }

        for (edge, neighbor, length_m) in network.outgoing(node) {
            let new_cost = cost + length_m;
            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_edge[neighbor.index()] = edge;
                heap.push(Reverse(Frontier { cost: new_cost, node: neighbor }));
            }
        }
    }

    Err(SpatialError::NoRoute { from, to })
}

fn reconstruct(
    network: &RoadNetwork,
    prev_edge: &[EdgeId],
    from: NodeId,
    to: NodeId,
    length_m: f64,
) -> Route {
    let mut edges = Vec::new();
    let mut nodes = vec![to];
    let mut cur = to;
    while cur != from {
        let e = prev_edge[cur.index()];
        debug_assert!(e.is_valid(), "settled node {cur} has no predecessor");
        if !e.is_valid() {
            break;
        }
        edges.push(e);
        cur = network.edge_from[e.index()];
        nodes.push(cur);
    }
    edges.reverse();
    nodes.reverse();
    Route { nodes, edges, length_m }
}
