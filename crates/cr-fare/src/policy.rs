//! Fare configuration.
//!
//! # Reference policy
//!
//! [`FarePolicy::default`] reproduces the taxi rules the planner was built
//! around:
//!
//! | Quantity          | Value                                     |
//! |-------------------|-------------------------------------------|
//! | Average speed     | 160 m/min                                 |
//! | Minute rollover   | 0.6                                       |
//! | Fare tiers        | <2000 m: 10, ≥2000: 12, ≥3000: 15, ≥4000: 20 |
//!
//! These are business rules, not a physical model.  In particular the
//! rollover rule is asymmetric and must not be replaced by ordinary
//! rounding.

use crate::{FareError, FareResult};

/// One step of the fare step function: routes of at least
/// `min_distance_m` metres pay `fare`, unless a higher tier applies.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FareTier {
    pub min_distance_m: f64,
    pub fare: u32,
}

impl FareTier {
    pub const fn new(min_distance_m: f64, fare: u32) -> Self {
        Self { min_distance_m, fare }
    }
}

/// Rider-facing time and fare rules.
///
/// Typically deserialised by the application from its own config file;
/// missing fields fall back to the reference values.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FarePolicy {
    /// Average travel speed in metres per minute.
    pub speed_m_per_min: f64,

    /// Fractional-minute threshold of the time rounding rule.  Estimates
    /// whose fractional part is below this are reported unchanged; others
    /// become `floor(t) + 1 - minute_rollover`.
    pub minute_rollover: f64,

    /// Fare tiers, ascending by threshold.  The first must start at 0 m.
    pub tiers: Vec<FareTier>,
}

impl Default for FarePolicy {
    fn default() -> Self {
        Self {
            speed_m_per_min: 160.0,
            minute_rollover: 0.6,
            tiers: vec![
                FareTier::new(0.0, 10),
                FareTier::new(2_000.0, 12),
                FareTier::new(3_000.0, 15),
                FareTier::new(4_000.0, 20),
            ],
        }
    }
}

impl FarePolicy {
    /// Check that the policy is applicable to every non-negative distance.
    pub fn validate(&self) -> FareResult<()> {
        if !(self.speed_m_per_min.is_finite() && self.speed_m_per_min > 0.0) {
            return Err(FareError::InvalidSpeed(self.speed_m_per_min));
        }
        if !(self.minute_rollover > 0.0 && self.minute_rollover < 1.0) {
            return Err(FareError::InvalidRollover(self.minute_rollover));
        }
        let first = self.tiers.first().ok_or(FareError::NoTiers)?;
        if first.min_distance_m != 0.0 {
            return Err(FareError::FirstTierNotZero(first.min_distance_m));
        }
        for pair in self.tiers.windows(2) {
            let (prev, next) = (pair[0].min_distance_m, pair[1].min_distance_m);
            if !(next > prev) {
                return Err(FareError::TiersNotAscending { prev, next });
            }
        }
        Ok(())
    }

    /// Travel time in minutes for `distance_m`, after the rollover rule:
    ///
    /// ```text
    /// t = distance_m / speed_m_per_min
    /// reported = t                            if frac(t) <  rollover
    ///          = floor(t) + 1 - rollover      otherwise
    /// ```
    pub fn estimated_time_min(&self, distance_m: f64) -> f64 {
        let time = distance_m / self.speed_m_per_min;
        let whole = time.floor();
        if time - whole < self.minute_rollover {
            time
        } else {
            whole + 1.0 - self.minute_rollover
        }
    }

    /// Fare for `distance_m`: the highest tier whose threshold it reaches.
    ///
    /// Tiers do not accumulate.  A distance below every threshold (only
    /// possible for a policy that was not validated) pays the first tier.
    pub fn cost_tier(&self, distance_m: f64) -> u32 {
        self.tiers
            .iter()
            .rev()
            .find(|tier| distance_m >= tier.min_distance_m)
            .or(self.tiers.first())
            .map_or(0, |tier| tier.fare)
    }
}
