//! Planning session: one network, one index, one registry, many requests.

use tracing::{debug, info, warn};

use cr_core::{GeoPoint, NodeId};
use cr_fare::{FarePolicy, RouteMetrics};
use cr_spatial::{
    DijkstraRouter, LocationKind, LocationRegistry, RoadNetwork, Router, SpatialError,
    SpatialIndex,
};

use crate::{Endpoint, PlanResult, RoundTrip, TripPlan};

// ── SessionBuilder ────────────────────────────────────────────────────────────

/// Fluent builder for [`Session<R>`].
///
/// # Required inputs
///
/// - [`RoadNetwork`] — already materialised by a loader
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                   |
/// |---------------------|---------------------------|
/// | `.policy(p)`        | `FarePolicy::default()`   |
/// | `.router(r)`        | `DijkstraRouter`          |
/// | `.location(..)`     | no named locations        |
///
/// # Example
///
/// ```rust,ignore
/// let session = SessionBuilder::new(network)
///     .location("CasaA", GeoPoint::new(-17.39248, -66.15938), LocationKind::Home)
///     .location("Hospital Viedma", GeoPoint::new(-17.38566, -66.14865), LocationKind::Facility)
///     .build()?;
/// let trip = session.plan(&"CasaA".into(), &"Hospital Viedma".into())?;
/// ```
pub struct SessionBuilder<R: Router = DijkstraRouter> {
    network:   RoadNetwork,
    policy:    FarePolicy,
    router:    R,
    locations: Vec<(String, GeoPoint, LocationKind)>,
}

impl SessionBuilder<DijkstraRouter> {
    pub fn new(network: RoadNetwork) -> Self {
        Self {
            network,
            policy:    FarePolicy::default(),
            router:    DijkstraRouter,
            locations: Vec::new(),
        }
    }
}

impl<R: Router> SessionBuilder<R> {
    /// Replace the reference fare policy.  Validated in [`build`](Self::build).
    pub fn policy(mut self, policy: FarePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Swap the routing engine.
    pub fn router<R2: Router>(self, router: R2) -> SessionBuilder<R2> {
        SessionBuilder {
            network:   self.network,
            policy:    self.policy,
            router,
            locations: self.locations,
        }
    }

    /// Queue a named location for registration.
    pub fn location(mut self, name: impl Into<String>, pos: GeoPoint, kind: LocationKind) -> Self {
        self.locations.push((name.into(), pos, kind));
        self
    }

    /// Queue several named locations, all of the same `kind`.
    pub fn locations<I, S>(mut self, kind: LocationKind, entries: I) -> Self
    where
        I: IntoIterator<Item = (S, GeoPoint)>,
        S: Into<String>,
    {
        self.locations
            .extend(entries.into_iter().map(|(name, pos)| (name.into(), pos, kind)));
        self
    }

    /// Validate the policy, build the spatial index and snap every queued
    /// location to its nearest node.
    ///
    /// # Errors
    ///
    /// - [`SpatialError::EmptyGraph`] for a network without nodes.
    /// - [`PlanError::Fare`](crate::PlanError::Fare) for an invalid policy.
    /// - [`SpatialError::DuplicateName`] if a name was queued twice.
    /// - [`SpatialError::NonFiniteQuery`] for a NaN/infinite location.
    pub fn build(self) -> PlanResult<Session<R>> {
        if self.network.is_empty() {
            return Err(SpatialError::EmptyGraph.into());
        }
        self.policy.validate()?;

        let index = SpatialIndex::build(&self.network);

        let mut registry = LocationRegistry::new();
        for (name, pos, kind) in self.locations {
            let node = registry.register(&index, name.as_str(), pos, kind)?;
            debug!(name = %name, %pos, ?kind, %node, "location registered");
        }

        info!(
            nodes = self.network.node_count(),
            edges = self.network.edge_count(),
            locations = registry.len(),
            "planning session ready"
        );

        Ok(Session {
            network: self.network,
            index,
            registry,
            policy: self.policy,
            router: self.router,
        })
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

/// Read-only planning state shared by every request.
///
/// `plan*` methods take `&self` and keep their search state on the stack,
/// so one session can serve concurrent requests.  Only
/// [`register`](Self::register) needs `&mut self`.
pub struct Session<R: Router = DijkstraRouter> {
    network:  RoadNetwork,
    index:    SpatialIndex,
    registry: LocationRegistry,
    policy:   FarePolicy,
    router:   R,
}

impl<R: Router> Session<R> {
    pub fn network(&self) -> &RoadNetwork {
        &self.network
    }

    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }

    pub fn registry(&self) -> &LocationRegistry {
        &self.registry
    }

    pub fn policy(&self) -> &FarePolicy {
        &self.policy
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    /// Register another named location after construction.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        pos: GeoPoint,
        kind: LocationKind,
    ) -> PlanResult<NodeId> {
        Ok(self.registry.register(&self.index, name, pos, kind)?)
    }

    /// Names offered as trip origins (homes), in registration order.
    pub fn origins(&self) -> impl Iterator<Item = &str> + '_ {
        self.registry.names_of_kind(LocationKind::Home)
    }

    /// Names offered as trip destinations (facilities), in registration order.
    pub fn destinations(&self) -> impl Iterator<Item = &str> + '_ {
        self.registry.names_of_kind(LocationKind::Facility)
    }

    /// Map an endpoint to a road node.
    pub fn resolve(&self, endpoint: &Endpoint) -> PlanResult<NodeId> {
        let node = match endpoint {
            Endpoint::Named(name) => self.registry.resolve(name)?,
            Endpoint::Point(pos) => self.index.nearest(*pos)?,
            Endpoint::Node(node) => {
                self.network.check_node(*node)?;
                *node
            }
        };
        Ok(node)
    }

    /// Route and price a trip between two endpoints.
    ///
    /// # Errors
    ///
    /// - [`SpatialError::UnknownLocation`] for an unregistered name.
    /// - [`SpatialError::NodeNotFound`] for a node id outside the network.
    /// - [`SpatialError::NoRoute`] when the destination is unreachable;
    ///   check with [`PlanError::is_no_route`](crate::PlanError::is_no_route).
    pub fn plan(&self, origin: &Endpoint, destination: &Endpoint) -> PlanResult<TripPlan> {
        let from = self.resolve(origin)?;
        let to   = self.resolve(destination)?;

        match self.plan_nodes(from, to) {
            Ok(trip) => {
                debug!(
                    %origin,
                    %destination,
                    hops = trip.route.hop_count(),
                    distance_m = trip.metrics.distance_m,
                    time_min = trip.metrics.time_min,
                    fare = trip.metrics.fare,
                    "trip planned"
                );
                Ok(trip)
            }
            Err(e) => {
                if e.is_no_route() {
                    warn!(%origin, %destination, "no route");
                }
                Err(e)
            }
        }
    }

    /// Route and price a trip between two known nodes.
    pub fn plan_nodes(&self, from: NodeId, to: NodeId) -> PlanResult<TripPlan> {
        let route = self.router.route(&self.network, from, to)?;

        let metrics = RouteMetrics::compute(&self.policy, &self.network, &route)?;
        debug_assert!(
            (metrics.distance_m - route.length_m).abs() <= 1e-6 * route.length_m.max(1.0),
            "router length {} disagrees with traversed edges ({})",
            route.length_m,
            metrics.distance_m,
        );

        Ok(TripPlan { origin: from, destination: to, route, metrics })
    }

    /// Plan `a → b` and then `b → a`.  Fails if either leg fails.
    pub fn plan_round_trip(&self, a: &Endpoint, b: &Endpoint) -> PlanResult<RoundTrip> {
        let outbound = self.plan(a, b)?;
        let inbound  = self.plan(b, a)?;
        Ok(RoundTrip { outbound, inbound })
    }

    /// Plan independent requests.  Results line up with `requests`; one
    /// failure does not affect the others.
    #[cfg(not(feature = "parallel"))]
    pub fn plan_batch(&self, requests: &[(Endpoint, Endpoint)]) -> Vec<PlanResult<TripPlan>> {
        requests.iter().map(|(o, d)| self.plan(o, d)).collect()
    }

    /// Plan independent requests on the Rayon pool.  Results line up with
    /// `requests`; one failure does not affect the others.
    #[cfg(feature = "parallel")]
    pub fn plan_batch(&self, requests: &[(Endpoint, Endpoint)]) -> Vec<PlanResult<TripPlan>> {
        use rayon::prelude::*;
        requests.par_iter().map(|(o, d)| self.plan(o, d)).collect()
    }
}

impl<R: Router> std::fmt::Debug for Session<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("nodes", &self.network.node_count())
            .field("edges", &self.network.edge_count())
            .field("locations", &self.registry.len())
            .finish()
    }
}

