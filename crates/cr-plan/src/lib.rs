//! `cr-plan` — planning session for the `cityroute` workspace.
//!
//! # Request flow
//!
//! ```text
//! Endpoint ──resolve──► NodeId ──Router::route──► Route ──RouteMetrics──► TripPlan
//!   Named   → LocationRegistry (cached at registration)
//!   Point   → SpatialIndex::nearest
//!   Node    → checked against the network
//! ```
//!
//! A [`Session`] owns the network, its spatial index, the registry and the
//! fare policy.  All of it is fixed once [`SessionBuilder::build`] returns;
//! planning requests only read it.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `parallel` | `Session::plan_batch` runs requests on Rayon's pool.     |
//! | `serde`    | Derives `Serialize`/`Deserialize` on trips and endpoints.|
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cr_core::GeoPoint;
//! use cr_plan::{Endpoint, SessionBuilder};
//! use cr_spatial::LocationKind;
//!
//! let session = SessionBuilder::new(network)
//!     .location("CasaA", GeoPoint::new(-17.39248, -66.15938), LocationKind::Home)
//!     .build()?;
//! let trip = session.plan(&"CasaA".into(), &Endpoint::Point(GeoPoint::new(-17.38566, -66.14865)))?;
//! println!("{:.1} min, fare {}", trip.metrics.time_min, trip.metrics.fare);
//! ```

pub mod endpoint;
pub mod error;
pub mod session;
pub mod trip;

#[cfg(test)]
mod tests;

pub use endpoint::Endpoint;
pub use error::{PlanError, PlanResult};
pub use session::{Session, SessionBuilder};
pub use trip::{RoundTrip, TripPlan};
