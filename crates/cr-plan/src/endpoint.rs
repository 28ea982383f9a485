//! Trip endpoints as handed over by an interface.

use std::fmt;

use cr_core::{GeoPoint, NodeId};

/// Where a trip starts or ends.
///
/// Interfaces parse their own input (dropdown selections, `"lat, lon"`
/// text fields) and hand over one of these already typed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Endpoint {
    /// A location registered with the session.
    Named(String),
    /// A raw coordinate, snapped to its nearest road node.
    Point(GeoPoint),
    /// A road node the caller already holds.
    Node(NodeId),
}

impl From<&str> for Endpoint {
    fn from(name: &str) -> Self {
        Endpoint::Named(name.to_owned())
    }
}

impl From<String> for Endpoint {
    fn from(name: String) -> Self {
        Endpoint::Named(name)
    }
}

impl From<GeoPoint> for Endpoint {
    fn from(pos: GeoPoint) -> Self {
        Endpoint::Point(pos)
    }
}

impl From<NodeId> for Endpoint {
    fn from(node: NodeId) -> Self {
        Endpoint::Node(node)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Named(name) => f.write_str(name),
            Endpoint::Point(pos) => write!(f, "{pos}"),
            Endpoint::Node(node) => write!(f, "{node}"),
        }
    }
}
