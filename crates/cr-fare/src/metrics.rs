//! Route → distance / time / fare.
//!
//! Everything here is a pure function of its inputs.  Metrics are derived
//! fresh from each [`Route`] and never cached.

use std::sync::LazyLock;

use cr_spatial::{RoadNetwork, Route};

use crate::{FareError, FarePolicy, FareResult};

static REFERENCE_POLICY: LazyLock<FarePolicy> = LazyLock::new(FarePolicy::default);

/// Rider-facing figures for one route.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteMetrics {
    /// Sum of traversed edge lengths, metres.
    pub distance_m: f64,
    /// Estimated travel time, minutes (rollover rule applied).
    pub time_min: f64,
    /// Fare in currency units.
    pub fare: u32,
}

impl RouteMetrics {
    /// Derive metrics for `route` on `network` under `policy`.
    ///
    /// Fails with [`FareError::UnknownEdge`] if `route` was computed on a
    /// different network.
    pub fn compute(policy: &FarePolicy, network: &RoadNetwork, route: &Route) -> FareResult<Self> {
        Ok(Self::from_distance(policy, route_distance_m(network, route)?))
    }

    /// Metrics for a known distance.
    pub fn from_distance(policy: &FarePolicy, distance_m: f64) -> Self {
        Self {
            distance_m,
            time_min: policy.estimated_time_min(distance_m),
            fare:     policy.cost_tier(distance_m),
        }
    }
}

/// Sum of the lengths of the edges `route` actually traverses.
///
/// Independent of the router's own accumulator; the two must agree.  A
/// trivial route is `+0.0` m.
///
/// # Errors
///
/// [`FareError::UnknownEdge`] for an edge id outside `network`.
pub fn route_distance_m(network: &RoadNetwork, route: &Route) -> FareResult<f64> {
    route.edges.iter().try_fold(0.0, |acc, &e| {
        network
            .edge_length_m(e)
            .map(|len| acc + len)
            .ok_or(FareError::UnknownEdge(e))
    })
}

/// [`FarePolicy::estimated_time_min`] under the reference policy.
pub fn estimated_time_min(distance_m: f64) -> f64 {
    REFERENCE_POLICY.estimated_time_min(distance_m)
}

/// [`FarePolicy::cost_tier`] under the reference policy.
pub fn cost_tier(distance_m: f64) -> u32 {
    REFERENCE_POLICY.cost_tier(distance_m)
}
