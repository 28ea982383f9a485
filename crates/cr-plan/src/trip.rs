//! Planned trips.

use cr_core::NodeId;
use cr_fare::RouteMetrics;
use cr_spatial::Route;

/// One priced, one-way trip.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripPlan {
    pub origin:      NodeId,
    pub destination: NodeId,
    pub route:       Route,
    pub metrics:     RouteMetrics,
}

/// A trip out and the trip back.  The two legs are routed independently;
/// on a directed network they need not mirror each other.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundTrip {
    pub outbound: TripPlan,
    pub inbound:  TripPlan,
}

impl RoundTrip {
    pub fn total_distance_m(&self) -> f64 {
        self.outbound.metrics.distance_m + self.inbound.metrics.distance_m
    }

    /// Sum of the two legs' reported times.
    pub fn total_time_min(&self) -> f64 {
        self.outbound.metrics.time_min + self.inbound.metrics.time_min
    }

    /// Each leg is priced on its own; this is not the fare of the summed
    /// distance.
    pub fn total_fare(&self) -> u32 {
        self.outbound.metrics.fare + self.inbound.metrics.fare
    }
}
