//! Rank candidate facilities against a single incoming case.
//!
//! Each facility earns three sub-scores on a `0.0..=10.0` scale:
//! - **distance**, decaying linearly to zero at 50 km from the case;
//! - **specialization**, from a fixed priority table keyed by case type
//!   (see [`SpecializationMatch`]);
//! - **capacity**, linear up to a capacity of 100.
//!
//! The composite score is their weighted sum ([`ScoreWeights`], by default
//! `0.5`/`0.3`/`0.2`) rounded to two decimals. Facilities are sorted by
//! descending score with a stable sort, so ties keep their input order, and
//! the top [`RankerConfig::top_n`] are reported.
//!
//! Ranking is pure: the only wall-clock input is the timestamp supplied by the
//! caller, and the facility slice is only borrowed.
//!
//! # Examples
//!
//! ```
//! use chrono::Utc;
//! use triage_core::{Case, Facility, GeoPoint};
//! use triage_ranker::Ranker;
//!
//! let case = Case::new("E-1", "cardiac", GeoPoint::new(44.42, 26.10), 7);
//! let facilities = vec![
//!     Facility::new("far", "Far", GeoPoint::new(45.0, 27.0)).with_capacity(200),
//!     Facility::new("near", "Near", GeoPoint::new(44.43, 26.10))
//!         .with_capacity(40)
//!         .with_specializations(["Cardiology"]),
//! ];
//!
//! let result = Ranker::default().rank(&facilities, &case, Utc::now());
//! let best = result.best_match.expect("two candidates were ranked");
//! assert_eq!(best.facility_id, "near");
//! assert!(best.specialization_match);
//! ```

#![forbid(unsafe_code)]

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde_json::Value;
use triage_core::{Case, Facility, FacilityMatch, RankingResult};

mod error;
mod score;
mod specialization;
mod weights;

pub use error::RankError;
pub use score::{
    MAX_SUBSCORE, ScoreBreakdown, capacity_score, distance_score, round_to_hundredths,
};
pub use specialization::SpecializationMatch;
pub use weights::{DEFAULT_TOP_N, RankerConfig, ScoreWeights};

/// Scores and orders facilities for one case at a time.
///
/// The ranker holds only its validated configuration, so a single instance
/// can serve any number of independent calls.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Ranker {
    config: RankerConfig,
}

impl Ranker {
    /// Build a ranker from a configuration.
    ///
    /// # Errors
    /// Propagates [`RankerConfig::validate`] failures.
    pub fn new(config: RankerConfig) -> Result<Self, RankError> {
        Ok(Self {
            config: config.validate()?,
        })
    }

    /// The configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &RankerConfig {
        &self.config
    }

    /// Score a single facility against `case`.
    #[must_use]
    pub fn score(&self, facility: &Facility, case: &Case) -> FacilityMatch {
        if !facility.location.is_in_range() {
            warn!(
                "facility {:?} has out-of-range coordinates {:?}",
                facility.id, facility.location
            );
        }
        let breakdown = ScoreBreakdown::compute(facility, case);
        let score = breakdown.composite(self.config.weights);
        debug!(
            "facility {:?}: {:.2} km, specialization {:?}, capacity {}, score {score}",
            facility.id, breakdown.distance_km, breakdown.specialization, facility.capacity
        );
        FacilityMatch {
            facility_id: facility.id.clone(),
            facility_name: facility.name.clone(),
            distance_km: round_to_hundredths(breakdown.distance_km),
            score,
            specialization_match: breakdown.specialization.is_match(),
            capacity: facility.capacity,
        }
    }

    /// Rank `facilities` for `case`, stamping the result with `timestamp`.
    ///
    /// The returned matches are sorted by descending score; equal scores keep
    /// their order in `facilities`. At most [`RankerConfig::top_n`] matches are
    /// kept and `best_match` is the first of them, or `None` when
    /// `facilities` is empty.
    #[must_use]
    pub fn rank(
        &self,
        facilities: &[Facility],
        case: &Case,
        timestamp: DateTime<Utc>,
    ) -> RankingResult {
        let mut matches: Vec<FacilityMatch> = facilities
            .iter()
            .map(|facility| self.score(facility, case))
            .collect();
        // `sort_by` is stable, which keeps input order on ties.
        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches.truncate(self.config.top_n);
        info!(
            "ranked {} facilities for case {:?}; kept {}",
            facilities.len(),
            case.id,
            matches.len()
        );
        RankingResult::new(case, timestamp, matches)
    }

    /// Extract the case from `document` and rank `facilities` for it.
    ///
    /// # Errors
    /// Returns [`RankError::Case`] when the document has no usable case record.
    pub fn rank_document(
        &self,
        facilities: &[Facility],
        document: &Value,
        timestamp: DateTime<Utc>,
    ) -> Result<RankingResult, RankError> {
        let case = Case::from_document(document)?;
        Ok(self.rank(facilities, &case, timestamp))
    }
}

/// Rank `facilities` for `case` with the default configuration.
#[must_use]
pub fn rank(facilities: &[Facility], case: &Case, timestamp: DateTime<Utc>) -> RankingResult {
    Ranker::default().rank(facilities, case, timestamp)
}

#[cfg(test)]
mod tests;
