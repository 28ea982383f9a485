//! Errors surfaced to callers of a planning session.

use cr_fare::FareError;
use cr_spatial::{GraphLoadError, SpatialError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Spatial(#[from] SpatialError),

    #[error("fare: {0}")]
    Fare(#[from] FareError),
}

impl PlanError {
    /// `true` for the expected "destination unreachable" outcome, which
    /// interfaces report as "no route" rather than as a failure.
    pub fn is_no_route(&self) -> bool {
        matches!(self, PlanError::Spatial(e) if e.is_no_route())
    }
}

impl From<GraphLoadError> for PlanError {
    fn from(e: GraphLoadError) -> Self {
        PlanError::Spatial(SpatialError::GraphLoad(e))
    }
}

pub type PlanResult<T> = Result<T, PlanError>;
