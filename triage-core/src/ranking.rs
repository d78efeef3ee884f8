//! Ranked output records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Case;

/// A scored facility, serialised with the downstream `hospital_*` keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityMatch {
    /// Identifier of the scored facility.
    #[serde(rename = "hospital_id")]
    pub facility_id: String,
    /// Display name of the scored facility.
    #[serde(rename = "hospital_name")]
    pub facility_name: String,
    /// Great-circle distance to the case, rounded to two decimals.
    pub distance_km: f64,
    /// Composite score, rounded to two decimals.
    pub score: f64,
    /// Whether the facility offers the capability the case type calls for.
    pub specialization_match: bool,
    /// Capacity the score was computed from.
    pub capacity: u64,
}

/// The outcome of ranking facilities for one case.
///
/// `matches` is ordered by descending score and `best_match` always mirrors
/// its first element. Build values through [`RankingResult::new`] to keep the
/// two in step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingResult {
    /// Identifier of the ranked case.
    #[serde(rename = "emergency_id")]
    pub case_id: String,
    /// Case type as supplied, without case folding.
    #[serde(rename = "emergency_type")]
    pub case_type: String,
    /// Case severity as decoded.
    #[serde(rename = "emergency_severity")]
    pub case_severity: i64,
    /// When the ranking was produced.
    pub timestamp: DateTime<Utc>,
    /// Top-ranked facilities, best first.
    pub matches: Vec<FacilityMatch>,
    /// The first entry of `matches`, if any.
    pub best_match: Option<FacilityMatch>,
}

impl RankingResult {
    /// Assemble a result for `case` from already ordered matches.
    #[must_use]
    pub fn new(case: &Case, timestamp: DateTime<Utc>, matches: Vec<FacilityMatch>) -> Self {
        let best_match = matches.first().cloned();
        Self {
            case_id: case.id.clone(),
            case_type: case.kind.clone(),
            case_severity: case.severity,
            timestamp,
            matches,
            best_match,
        }
    }
}
