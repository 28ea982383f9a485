use thiserror::Error;

use cr_core::EdgeId;

/// A [`FarePolicy`](crate::FarePolicy) that cannot be applied, or a route
/// it cannot price.
#[derive(Debug, Error, PartialEq)]
pub enum FareError {
    #[error("average speed must be positive and finite, got {0} m/min")]
    InvalidSpeed(f64),

    #[error("minute rollover must lie strictly between 0 and 1, got {0}")]
    InvalidRollover(f64),

    #[error("fare policy has no tiers")]
    NoTiers,

    #[error("first fare tier must start at 0 m, got {0} m")]
    FirstTierNotZero(f64),

    #[error("fare tier thresholds must be strictly ascending ({prev} m then {next} m)")]
    TiersNotAscending { prev: f64, next: f64 },

    #[error("route edge {0} is not part of the network")]
    UnknownEdge(EdgeId),
}

pub type FareResult<T> = Result<T, FareError>;
