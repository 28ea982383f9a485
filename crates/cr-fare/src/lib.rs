//! `cr-fare` — route metrics: distance, estimated time and tiered fare.
//!
//! | Module      | Contents                                            |
//! |-------------|-----------------------------------------------------|
//! | [`policy`]  | `FarePolicy`, `FareTier` (reference values)         |
//! | [`metrics`] | `RouteMetrics`, `route_distance_m`, free helpers    |
//! | [`error`]   | `FareError`, `FareResult<T>`                        |

pub mod error;
pub mod metrics;
pub mod policy;


pub use error::{FareError, FareResult};
pub use metrics::{RouteMetrics, cost_tier, estimated_time_min, route_distance_m};
pub use policy::{FarePolicy, FareTier};
