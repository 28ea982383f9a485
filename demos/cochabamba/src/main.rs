//! cochabamba — smallest end-to-end example for the cityroute planner.
//!
//! Registers the homes and hospitals of central Cochabamba on a synthetic
//! street grid, then prices the trip from every home to every hospital and
//! one round trip.  Set `RUST_LOG=debug` to see per-request events.

mod network;

use std::time::Instant;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use cr_core::GeoPoint;
use cr_plan::{Endpoint, SessionBuilder};
use cr_spatial::LocationKind;

use network::build_network;

// ── Named places ──────────────────────────────────────────────────────────────

const HOMES: [(&str, GeoPoint); 3] = [
    ("CasaA",     GeoPoint { lat: -17.39248,  lon: -66.15938 }),
    ("CasaB",     GeoPoint { lat: -17.387175, lon: -66.175565 }),
    ("CasaSucre", GeoPoint { lat: -17.39269,  lon: -66.14787 }),
];

const HOSPITALS: [(&str, GeoPoint); 6] = [
    ("Clinica los Olivos",  GeoPoint { lat: -17.38955, lon: -66.17980 }),
    ("SSU",                 GeoPoint { lat: -17.38792, lon: -66.14876 }),
    ("Hospital Viedma",     GeoPoint { lat: -17.38566, lon: -66.14865 }),
    ("Clinica Univalle",    GeoPoint { lat: -17.37205, lon: -66.16075 }),
    ("Clinica los Angeles", GeoPoint { lat: -17.37872, lon: -66.16479 }),
    ("CORDES",              GeoPoint { lat: -17.37650, lon: -66.16295 }),
];

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    println!("=== cochabamba — cityroute planner ===");
    println!();

    // 1. Build road network.
    let network = build_network()?;
    println!(
        "Road network: {} nodes, {} edges",
        network.node_count(),
        network.edge_count()
    );

    // 2. Build the session: spatial index + registry.
    let session = SessionBuilder::new(network)
        .locations(LocationKind::Home, HOMES)
        .locations(LocationKind::Facility, HOSPITALS)
        .build()?;

    for loc in session.registry().iter() {
        println!("  {:<20} {} → {}", loc.name, loc.pos, loc.node);
    }
    println!();

    // 3. Every home to every hospital.
    let requests: Vec<(Endpoint, Endpoint)> = session
        .origins()
        .flat_map(|home| {
            session
                .destinations()
                .map(move |hospital| (Endpoint::from(home), Endpoint::from(hospital)))
        })
        .collect();

    let t0 = Instant::now();
    let results = session.plan_batch(&requests);
    let elapsed = t0.elapsed();

    println!(
        "{:<11} {:<20} {:>5} {:>10} {:>8} {:>5}",
        "From", "To", "Hops", "Dist (m)", "Min", "Fare"
    );
    println!("{}", "-".repeat(64));
    for ((origin, destination), result) in requests.iter().zip(&results) {
        match result {
            Ok(trip) => println!(
                "{:<11} {:<20} {:>5} {:>10.1} {:>8.2} {:>5}",
                origin.to_string(),
                destination.to_string(),
                trip.route.hop_count(),
                trip.metrics.distance_m,
                trip.metrics.time_min,
                trip.metrics.fare,
            ),
            Err(e) if e.is_no_route() => {
                println!("{:<11} {:<20} no route", origin.to_string(), destination.to_string())
            }
            Err(e) => println!("{:<11} {:<20} error: {e}", origin.to_string(), destination.to_string()),
        }
    }
    println!();
    println!("{} trips planned in {:.3} ms", results.len(), elapsed.as_secs_f64() * 1e3);
    println!();

    // 4. A round trip between a home and a raw coordinate.
    let home = Endpoint::from("CasaB");
    let point = Endpoint::Point(GeoPoint::new(-17.3800, -66.1500));
    let rt = session.plan_round_trip(&home, &point)?;
    println!("Round trip {home} ⇄ {point}");
    println!(
        "  out:  {} hops, {:.1} m, {:.2} min, fare {}",
        rt.outbound.route.hop_count(),
        rt.outbound.metrics.distance_m,
        rt.outbound.metrics.time_min,
        rt.outbound.metrics.fare,
    );
    println!(
        "  back: {} hops, {:.1} m, {:.2} min, fare {}",
        rt.inbound.route.hop_count(),
        rt.inbound.metrics.distance_m,
        rt.inbound.metrics.time_min,
        rt.inbound.metrics.fare,
    );
    println!(
        "  total: {:.1} m, {:.2} min, fare {}",
        rt.total_distance_m(),
        rt.total_time_min(),
        rt.total_fare()
    );

    Ok(())
}
