//! `cr-core` — foundational types for the `cityroute` route planner.
//!
//! This crate is a dependency of every other `cr-*` crate.  It has no
//! `cr-*` dependencies and no required external ones (only optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module  | Contents                                   |
//! |---------|--------------------------------------------|
//! | [`ids`] | `NodeId`, `EdgeId`                         |
//! | [`geo`] | `GeoPoint`, haversine distance             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                               |
//! |---------|------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.  |

pub mod geo;
pub mod ids;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use geo::GeoPoint;
pub use ids::{EdgeId, NodeId};
