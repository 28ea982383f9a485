//! Unit tests for cr-plan.

#[cfg(test)]
mod helpers {
    use cr_core::{GeoPoint, NodeId};
    use cr_spatial::{LocationKind, RoadNetwork, RoadNetworkBuilder};

    use crate::{Session, SessionBuilder};

    pub const CASA_A:   GeoPoint = GeoPoint { lat: -17.39248, lon: -66.15938 };
    pub const PLAZA:    GeoPoint = GeoPoint { lat: -17.39350, lon: -66.15700 };
    pub const MIDWAY:   GeoPoint = GeoPoint { lat: -17.38900, lon: -66.15400 };
    pub const HOSPITAL: GeoPoint = GeoPoint { lat: -17.38566, lon: -66.14865 };
    pub const ISLAND:   GeoPoint = GeoPoint { lat: -17.37000, lon: -66.13000 };
    pub const ISLAND_2: GeoPoint = GeoPoint { lat: -17.37050, lon: -66.13050 };

    /// Six nodes:
    ///
    /// ```text
    /// casa ⇄ plaza ⇄ midway ⇄ hospital     (800 m, 900 m, 700 m)
    /// hospital → casa                      (1 000 m, one-way)
    /// island ⇄ island_2                    (100 m, unreachable from the rest)
    /// ```
    pub fn city() -> (RoadNetwork, [NodeId; 6]) {
        let mut b = RoadNetworkBuilder::new();
        let casa     = b.add_node(CASA_A);
        let plaza    = b.add_node(PLAZA);
        let midway   = b.add_node(MIDWAY);
        let hospital = b.add_node(HOSPITAL);
        let island   = b.add_node(ISLAND);
        let island_2 = b.add_node(ISLAND_2);

        b.add_road(casa, plaza, 800.0);
        b.add_road(plaza, midway, 900.0);
        b.add_road(midway, hospital, 700.0);
        b.add_directed_edge(hospital, casa, 1_000.0);
        b.add_road(island, island_2, 100.0);

        (b.build().unwrap(), [casa, plaza, midway, hospital, island, island_2])
    }

    pub fn session() -> (Session, [NodeId; 6]) {
        let (net, nodes) = city();
        let session = SessionBuilder::new(net)
            .location("CasaA", CASA_A, LocationKind::Home)
            .location("CasaB", GeoPoint::new(-17.39340, -66.15710), LocationKind::Home)
            .location("Hospital Viedma", HOSPITAL, LocationKind::Facility)
            .location("Island", ISLAND, LocationKind::Other)
            .build()
            .unwrap();
        (session, nodes)
    }

    pub fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }
}

// ── Session construction ──────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use cr_core::GeoPoint;
    use cr_fare::{FareError, FarePolicy};
    use cr_spatial::{LocationKind, RoadNetwork, SpatialError};

    use super::helpers::*;
    use crate::{PlanError, SessionBuilder};

    #[test]
    fn empty_network_aborts_setup() {
        let err = SessionBuilder::new(RoadNetwork::empty()).build().unwrap_err();
        assert!(matches!(err, PlanError::Spatial(SpatialError::EmptyGraph)));
    }

    #[test]
    fn invalid_policy_aborts_setup() {
        let (net, _) = city();
        let policy = FarePolicy { speed_m_per_min: 0.0, ..FarePolicy::default() };
        let err = SessionBuilder::new(net).policy(policy).build().unwrap_err();
        assert!(matches!(err, PlanError::Fare(FareError::InvalidSpeed(_))));
    }

    #[test]
    fn duplicate_location_aborts_setup() {
        let (net, _) = city();
        let err = SessionBuilder::new(net)
            .location("CasaA", CASA_A, LocationKind::Home)
            .location("CasaA", HOSPITAL, LocationKind::Facility)
            .build()
            .unwrap_err();
        assert!(matches!(err, PlanError::Spatial(SpatialError::DuplicateName(n)) if n == "CasaA"));
    }

    #[test]
    fn bulk_locations_share_a_kind() {
        let (net, nodes) = city();
        let session = SessionBuilder::new(net)
            .locations(LocationKind::Facility, [("SSU", HOSPITAL), ("CORDES", MIDWAY)])
            .locations(LocationKind::Home, vec![("CasaSucre".to_string(), CASA_A)])
            .build()
            .unwrap();
        assert_eq!(session.destinations().collect::<Vec<_>>(), ["SSU", "CORDES"]);
        assert_eq!(session.origins().collect::<Vec<_>>(), ["CasaSucre"]);
        assert_eq!(session.registry().resolve("CORDES").unwrap(), nodes[2]);
    }

    #[test]
    fn origins_and_destinations_by_kind() {
        let (session, _) = session();
        assert_eq!(session.origins().collect::<Vec<_>>(), ["CasaA", "CasaB"]);
        assert_eq!(session.destinations().collect::<Vec<_>>(), ["Hospital Viedma"]);
    }

    #[test]
    fn late_registration() {
        let (mut session, nodes) = session();
        let node = session
            .register("Clinica Univalle", GeoPoint::new(-17.38901, -66.15401), LocationKind::Facility)
            .unwrap();
        assert_eq!(node, nodes[2]);
        assert!(session.register("CasaA", CASA_A, LocationKind::Home).is_err());
        assert_eq!(session.destinations().count(), 2);
    }
}

// ── Endpoint resolution ───────────────────────────────────────────────────────

#[cfg(test)]
mod resolve {
    use cr_core::{GeoPoint, NodeId};
    use cr_spatial::SpatialError;

    use super::helpers::*;
    use crate::{Endpoint, PlanError};

    #[test]
    fn named_resolution_is_idempotent() {
        let (session, nodes) = session();
        let first  = session.resolve(&"CasaB".into()).unwrap();
        let second = session.resolve(&"CasaB".into()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, nodes[1]);
    }

    #[test]
    fn coincident_point_resolves_to_that_node() {
        let (session, nodes) = session();
        assert_eq!(session.resolve(&Endpoint::Point(HOSPITAL)).unwrap(), nodes[3]);
    }

    #[test]
    fn node_endpoint_is_checked() {
        let (session, nodes) = session();
        assert_eq!(session.resolve(&nodes[4].into()).unwrap(), nodes[4]);
        let err = session.resolve(&Endpoint::Node(NodeId(99))).unwrap_err();
        assert!(matches!(err, PlanError::Spatial(SpatialError::NodeNotFound(NodeId(99)))));
    }

    #[test]
    fn unknown_name_is_rejected() {
        let (session, _) = session();
        let err = session.resolve(&"Clinica los Olivos".into()).unwrap_err();
        assert!(matches!(err, PlanError::Spatial(SpatialError::UnknownLocation(_))));
        assert!(!err.is_no_route());
    }

    #[test]
    fn non_finite_point_is_rejected() {
        let (session, _) = session();
        let err = session.resolve(&GeoPoint::new(f64::NAN, -66.15).into()).unwrap_err();
        assert!(matches!(err, PlanError::Spatial(SpatialError::NonFiniteQuery(_))));
    }
}

// ── Trip planning ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod planning {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use cr_core::{GeoPoint, NodeId};
    use cr_fare::route_distance_m;
    use cr_spatial::{DijkstraRouter, RoadNetwork, Route, Router, SpatialError, SpatialResult};

    use super::helpers::*;
    use crate::{Endpoint, PlanError, SessionBuilder};

    #[test]
    fn named_trip_is_shortest_and_priced() {
        let (session, [casa, plaza, midway, hospital, ..]) = session();
        let trip = session.plan(&"CasaA".into(), &"Hospital Viedma".into()).unwrap();

        assert_eq!(trip.origin, casa);
        assert_eq!(trip.destination, hospital);
        assert_eq!(trip.route.nodes, vec![casa, plaza, midway, hospital]);
        assert_eq!(trip.metrics.distance_m, 2_400.0);
        // 2 400 m / 160 = 15.0 min
        assert!(close(trip.metrics.time_min, 15.0));
        assert_eq!(trip.metrics.fare, 12);
    }

    #[test]
    fn metrics_distance_matches_router_length() {
        let (session, _) = session();
        let trip = session.plan(&"CasaB".into(), &"Hospital Viedma".into()).unwrap();
        assert_eq!(trip.metrics.distance_m, trip.route.length_m);
        assert_eq!(route_distance_m(session.network(), &trip.route).unwrap(), trip.route.length_m);
    }

    #[test]
    fn same_origin_and_destination_is_trivial() {
        let (session, [casa, ..]) = session();
        let trip = session.plan(&"CasaA".into(), &Endpoint::Point(CASA_A)).unwrap();
        assert_eq!(trip.route.nodes, vec![casa]);
        assert!(trip.route.is_trivial());
        assert_eq!(trip.metrics.distance_m, 0.0);
        assert_eq!(trip.metrics.time_min, 0.0);
        assert!(trip.metrics.distance_m.is_sign_positive());
        assert!(trip.metrics.time_min.is_sign_positive());
        assert_eq!(trip.metrics.fare, 10);
    }

    #[test]
    fn unregistered_name_is_rejected_not_empty() {
        let (session, _) = session();
        let err = session.plan(&"CasaA".into(), &"CasaZ".into()).unwrap_err();
        assert!(matches!(err, PlanError::Spatial(SpatialError::UnknownLocation(n)) if n == "CasaZ"));
        let err = session.plan(&"CasaZ".into(), &"CasaA".into()).unwrap_err();
        assert!(matches!(err, PlanError::Spatial(SpatialError::UnknownLocation(_))));
    }

    #[test]
    fn disconnected_component_is_no_route() {
        let (session, [casa, .., island, _]) = session();
        let err = session.plan(&"CasaA".into(), &"Island".into()).unwrap_err();
        assert!(err.is_no_route());
        assert!(matches!(
            err,
            PlanError::Spatial(SpatialError::NoRoute { from, to }) if from == casa && to == island
        ));
    }

    #[test]
    fn failed_request_leaves_session_usable() {
        let (session, _) = session();
        assert!(session.plan(&"CasaA".into(), &"Island".into()).is_err());
        assert!(session.plan(&"CasaA".into(), &"Hospital Viedma".into()).is_ok());
    }

    #[test]
    fn round_trip_legs_follow_one_way_streets() {
        let (session, [casa, _, _, hospital, ..]) = session();
        let rt = session
            .plan_round_trip(&"CasaA".into(), &"Hospital Viedma".into())
            .unwrap();

        assert_eq!(rt.outbound.metrics.distance_m, 2_400.0);
        assert_eq!(rt.inbound.route.nodes, vec![hospital, casa]);
        assert_eq!(rt.inbound.metrics.distance_m, 1_000.0);

        assert_eq!(rt.total_distance_m(), 3_400.0);
        // 15.0 + 6.25
        assert!(close(rt.total_time_min(), 21.25));
        // 12 + 10, each leg priced on its own
        assert_eq!(rt.total_fare(), 22);
    }

    #[test]
    fn round_trip_fails_if_either_leg_fails() {
        let (session, _) = session();
        let err = session.plan_round_trip(&"Island".into(), &"CasaA".into()).unwrap_err();
        assert!(err.is_no_route());
    }

    #[test]
    fn batch_results_line_up_with_requests() {
        let (session, [casa, .., hospital, _, _]) = session();
        let requests = vec![
            (Endpoint::from("CasaA"), Endpoint::from("Hospital Viedma")),
            (Endpoint::from("CasaA"), Endpoint::from("Nowhere")),
            (Endpoint::from("CasaA"), Endpoint::from("Island")),
            (Endpoint::Node(hospital), Endpoint::Node(casa)),
        ];
        let results = session.plan_batch(&requests);

        assert_eq!(results.len(), 4);
        assert_eq!(results[0].as_ref().unwrap().metrics.distance_m, 2_400.0);
        assert!(matches!(
            results[1],
            Err(PlanError::Spatial(SpatialError::UnknownLocation(_)))
        ));
        assert!(results[2].as_ref().unwrap_err().is_no_route());
        assert_eq!(results[3].as_ref().unwrap().metrics.distance_m, 1_000.0);
    }

    #[test]
    fn raw_points_snap_before_routing() {
        let (session, [_, plaza, _, hospital, ..]) = session();
        let near_plaza    = GeoPoint::new(-17.39351, -66.15699);
        let near_hospital = GeoPoint::new(-17.38560, -66.14860);
        let trip = session.plan(&near_plaza.into(), &near_hospital.into()).unwrap();
        assert_eq!(trip.origin, plaza);
        assert_eq!(trip.destination, hospital);
        assert_eq!(trip.metrics.distance_m, 1_600.0);
    }

    /// Delegates to Dijkstra and counts calls.
    #[derive(Default)]
    struct CountingRouter {
        calls: AtomicUsize,
    }

    impl Router for CountingRouter {
        fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<Route> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            DijkstraRouter.route(network, from, to)
        }
    }

    #[test]
    fn custom_router_is_used() {
        let (net, _) = city();
        let session = SessionBuilder::new(net)
            .router(CountingRouter::default())
            .location("CasaA", CASA_A, Default::default())
            .build()
            .unwrap();
        session.plan(&"CasaA".into(), &Endpoint::Point(HOSPITAL)).unwrap();
        session.plan_round_trip(&"CasaA".into(), &Endpoint::Point(MIDWAY)).unwrap();
        assert_eq!(session.router_calls(), 3);
    }

    impl crate::Session<CountingRouter> {
        fn router_calls(&self) -> usize {
            self.router().calls.load(Ordering::Relaxed)
        }
    }
}
