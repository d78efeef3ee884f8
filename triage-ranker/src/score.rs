//! Per-facility sub-scores and their weighted combination.
#![forbid(unsafe_code)]

use triage_core::{Case, Facility, haversine_km};

use crate::{ScoreWeights, SpecializationMatch};

/// Upper bound of every sub-score.
pub const MAX_SUBSCORE: f64 = 10.0;

/// Kilometres of distance that cost one point of distance score.
const KM_PER_POINT: f64 = 5.0;

/// Capacity units that earn one point of capacity score.
const CAPACITY_PER_POINT: f64 = 10.0;

/// Distance sub-score: linear decay from `10.0` at the case to `0.0` at
/// 50 km and beyond.
#[expect(
    clippy::float_arithmetic,
    reason = "distance score decays linearly with kilometres"
)]
#[must_use]
pub fn distance_score(distance_km: f64) -> f64 {
    (MAX_SUBSCORE - distance_km / KM_PER_POINT).max(0.0)
}

/// Capacity sub-score: linear up to a capacity of 100, capped at `10.0`.
#[expect(
    clippy::float_arithmetic,
    reason = "capacity score scales linearly with capacity"
)]
#[must_use]
pub fn capacity_score(capacity: u64) -> f64 {
    // Anything past `u32::MAX` is far beyond the cap already.
    let capacity = u32::try_from(capacity).unwrap_or(u32::MAX);
    (f64::from(capacity) / CAPACITY_PER_POINT).min(MAX_SUBSCORE)
}

/// Round to two decimal places.
///
/// Rounds the exact binary value, so `2.675` (stored just below) becomes
/// `2.67`; exact ties go to the even digit.
#[must_use]
pub fn round_to_hundredths(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

/// The unweighted components behind one facility's score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    /// Unrounded great-circle distance to the case.
    pub distance_km: f64,
    /// Distance sub-score.
    pub distance: f64,
    /// Capability fit for the case type.
    pub specialization: SpecializationMatch,
    /// Capacity sub-score.
    pub capacity: f64,
}

impl ScoreBreakdown {
    /// Score `facility` against `case`.
    #[must_use]
    pub fn compute(facility: &Facility, case: &Case) -> Self {
        let distance_km = haversine_km(case.location, facility.location);
        Self {
            distance_km,
            distance: distance_score(distance_km),
            specialization: SpecializationMatch::evaluate(&case.kind, &facility.specializations),
            capacity: capacity_score(facility.capacity),
        }
    }

    /// Weighted composite score, rounded to two decimals.
    #[expect(
        clippy::float_arithmetic,
        reason = "composite score is a weighted sum of sub-scores"
    )]
    #[must_use]
    pub fn composite(&self, weights: ScoreWeights) -> f64 {
        let total = self.distance * weights.distance
            + self.specialization.points() * weights.specialization
            + self.capacity * weights.capacity;
        round_to_hundredths(total)
    }
}
