//! Nearest-node spatial index.
//!
//! An R-tree (via `rstar`) maps `(lat, lon)` to road nodes.  It is built once
//! per [`RoadNetwork`] and is read-only afterwards, so one index can serve
//! any number of concurrent lookups.
//!
//! # Metric
//!
//! Squared Euclidean distance in lat/lon degree space.  Node coordinates
//! and query points must share that projection; at city scale the ranking
//! matches great-circle distance.
//!
//! # Ties
//!
//! Every node whose squared distance lies within [`tie_slack`] of the best
//! candidate counts as equidistant, and the lowest `NodeId` among them
//! wins.  The answer therefore never depends on R-tree packing order.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use cr_core::{GeoPoint, NodeId};

use crate::network::RoadNetwork;
use crate::{SpatialError, SpatialResult};

/// Relative part of the tie slack: rounding error of a squared distance
/// scales with its magnitude.
pub const TIE_REL_TOLERANCE: f64 = 1e-12;

/// Absolute floor of the tie slack, in squared degrees (≈ 1e-9° ≈ 0.1 mm).
pub const TIE_ABS_TOLERANCE: f64 = 1e-18;

/// Largest squared-distance gap to `best_d2` still counted as a tie.
#[inline]
pub fn tie_slack(best_d2: f64) -> f64 {
    best_d2 * TIE_REL_TOLERANCE + TIE_ABS_TOLERANCE
}

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a `[lat, lon]` point with its `NodeId`.
#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2], // [lat, lon]
    id:    NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── SpatialIndex ──────────────────────────────────────────────────────────────

/// Answers "nearest node to point P" for one road network.
pub struct SpatialIndex {
    tree: RTree<NodeEntry>,
}

impl SpatialIndex {
    /// Bulk-load the R-tree from every node of `network`.
    ///
    /// O(N log N).  An empty network yields an empty index whose queries
    /// fail with [`SpatialError::EmptyGraph`].
    pub fn build(network: &RoadNetwork) -> Self {
        let entries: Vec<NodeEntry> = network
            .node_pos
            .iter()
            .enumerate()
            .map(|(i, &pos)| NodeEntry {
                point: [pos.lat, pos.lon],
                id:    NodeId(i as u32),
            })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Return the road node nearest to `pos`.
    ///
    /// # Errors
    ///
    /// - [`SpatialError::NonFiniteQuery`] if `pos` has a NaN/infinite part.
    /// - [`SpatialError::EmptyGraph`] if the index holds no nodes.
    pub fn nearest(&self, pos: GeoPoint) -> SpatialResult<NodeId> {
        if !pos.is_finite() {
            return Err(SpatialError::NonFiniteQuery(pos));
        }
        let mut candidates = self
            .tree
            .nearest_neighbor_iter_with_distance_2(&[pos.lat, pos.lon]);

        let (first, best_d2) = candidates.next().ok_or(SpatialError::EmptyGraph)?;
        let slack = tie_slack(best_d2);
        let winner = candidates
            .take_while(|&(_, d2)| d2 - best_d2 <= slack)
            .map(|(e, _)| e.id)
            .fold(first.id, NodeId::min);
        Ok(winner)
    }

    /// Return up to `k` nearest nodes to `pos`, sorted by ascending distance.
    pub fn k_nearest(&self, pos: GeoPoint, k: usize) -> SpatialResult<Vec<NodeId>> {
        if !pos.is_finite() {
            return Err(SpatialError::NonFiniteQuery(pos));
        }
        if self.is_empty() {
            return Err(SpatialError::EmptyGraph);
        }
        Ok(self
            .tree
            .nearest_neighbor_iter(&[pos.lat, pos.lon])
            .take(k)
            .map(|e| e.id)
            .collect())
    }
}
