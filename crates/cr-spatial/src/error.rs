//! Spatial-subsystem error types.

use thiserror::Error;

use cr_core::{GeoPoint, NodeId};

/// Rejected network input.  Fatal to construction: no `RoadNetwork` is
/// produced.
#[derive(Debug, Error, PartialEq)]
pub enum GraphLoadError {
    #[error("network has no nodes")]
    Empty,

    #[error("edge #{edge} ({from} -> {to}) references a node outside 0..{node_count}")]
    DanglingEdge {
        edge:       usize,
        from:       NodeId,
        to:         NodeId,
        node_count: usize,
    },

    #[error("edge #{edge} ({from} -> {to}) has invalid length {length_m}")]
    InvalidLength {
        edge:     usize,
        from:     NodeId,
        to:       NodeId,
        length_m: f64,
    },

    #[error("node {node} has a non-finite coordinate {pos}")]
    InvalidCoordinate { node: NodeId, pos: GeoPoint },
}

/// Errors produced by `cr-spatial` queries.
///
/// `NodeNotFound`, `UnknownLocation`, `DuplicateName`, `NonFiniteQuery` and
/// `NoRoute` reject a single request and leave shared state untouched.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("invalid road network: {0}")]
    GraphLoad(#[from] GraphLoadError),

    #[error("road network has no nodes")]
    EmptyGraph,

    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("query point {0} is not finite")]
    NonFiniteQuery(GeoPoint),

    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[error("unknown location {0:?}")]
    UnknownLocation(String),

    #[error("location {0:?} is already registered")]
    DuplicateName(String),
}

impl SpatialError {
    /// `true` for the expected "destination unreachable" outcome.
    pub fn is_no_route(&self) -> bool {
        matches!(self, SpatialError::NoRoute { .. })
    }
}

pub type SpatialResult<T> = Result<T, SpatialError>;
