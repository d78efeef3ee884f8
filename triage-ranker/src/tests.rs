//! Unit coverage for sub-scores and ranking order.
#![expect(
    clippy::float_arithmetic,
    clippy::indexing_slicing,
    reason = "tests compare floating-point scores and index known-length results"
)]

use chrono::{DateTime, TimeZone, Utc};
use rstest::{fixture, rstest};
use serde_json::json;
use triage_core::{Case, CaseInputError, Facility, GeoPoint};

use crate::{
    RankError, Ranker, RankerConfig, ScoreBreakdown, ScoreWeights, SpecializationMatch,
    capacity_score, distance_score, rank, round_to_hundredths,
};

const TOLERANCE: f64 = 1e-9;

/// Kilometres covered by one degree of latitude on the scoring sphere.
const KM_PER_DEGREE: f64 = 111.194_926_644_558_73;

#[fixture]
fn timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 8, 0, 0)
        .single()
        .expect("valid timestamp")
}

#[fixture]
fn cardiac_case() -> Case {
    Case::new("E-1", "cardiac", GeoPoint::new(0.0, 0.0), 7)
}

/// Facility due north of the origin at roughly `km` kilometres.
fn facility_at(id: &str, km: f64) -> Facility {
    Facility::new(id, format!("Facility {id}"), GeoPoint::new(km / KM_PER_DEGREE, 0.0))
}

#[rstest]
#[case(0.0, 10.0)]
#[case(5.0, 9.0)]
#[case(25.0, 5.0)]
#[case(50.0, 0.0)]
#[case(75.0, 0.0)]
fn distance_score_decays_linearly(#[case] km: f64, #[case] expected: f64) {
    assert!((distance_score(km) - expected).abs() < TOLERANCE);
}

#[rstest]
#[case(0, 0.0)]
#[case(45, 4.5)]
#[case(100, 10.0)]
#[case(150, 10.0)]
#[case(u64::from(u32::MAX), 10.0)]
#[case(5_000_000_000, 10.0)]
#[case(u64::MAX, 10.0)]
fn capacity_score_caps_at_ten(#[case] capacity: u64, #[case] expected: f64) {
    assert!((capacity_score(capacity) - expected).abs() < TOLERANCE);
}

#[rstest]
#[case(8.694_9, 8.69)]
#[case(8.695_1, 8.7)]
#[case(0.0, 0.0)]
#[case(10.0, 10.0)]
#[case::stored_below_half(2.675, 2.67)]
#[case::stored_below_half_again(8.345, 8.34)]
#[case::exact_tie_to_even(0.125, 0.12)]
#[case::exact_tie_to_even_upwards(0.375, 0.38)]
fn rounds_to_two_decimals(#[case] value: f64, #[case] expected: f64) {
    assert!((round_to_hundredths(value) - expected).abs() < TOLERANCE);
}

#[rstest]
fn breakdown_combines_default_weights(cardiac_case: Case) {
    let facility = facility_at("A", 10.0)
        .with_capacity(60)
        .with_specializations(["Cardiology"]);
    let breakdown = ScoreBreakdown::compute(&facility, &cardiac_case);

    assert!((breakdown.distance_km - 10.0).abs() < 1e-6);
    assert!((breakdown.distance - 8.0).abs() < 1e-6);
    assert_eq!(breakdown.specialization, SpecializationMatch::Exact);
    assert!((breakdown.capacity - 6.0).abs() < TOLERANCE);
    // 0.5 * 8 + 0.3 * 10 + 0.2 * 6
    let composite = breakdown.composite(ScoreWeights::default());
    assert!((composite - 8.2).abs() < TOLERANCE);
}

#[rstest]
fn facility_at_fifty_km_scores_zero_distance(cardiac_case: Case) {
    let facility = Facility::new("edge", "Edge", GeoPoint::new(50.0 / KM_PER_DEGREE, 0.0));
    let breakdown = ScoreBreakdown::compute(&facility, &cardiac_case);
    assert!(breakdown.distance.abs() < 1e-9);
    assert!(breakdown.distance >= 0.0);
}

#[rstest]
fn score_reports_rounded_distance(cardiac_case: Case) {
    let facility = Facility::new("near", "Near", GeoPoint::new(0.0123, 0.0));
    let scored = Ranker::default().score(&facility, &cardiac_case);
    // 0.0123 degrees of latitude is 1.3677 km.
    assert!((scored.distance_km - 1.37).abs() < TOLERANCE);
    assert_eq!(scored.facility_id, "near");
    assert_eq!(scored.capacity, 0);
    assert!(!scored.specialization_match);
}

#[rstest]
fn capacity_beyond_u32_still_earns_full_points(cardiac_case: Case) {
    let facility = facility_at("vast", 0.0).with_capacity(5_000_000_000);
    let scored = Ranker::default().score(&facility, &cardiac_case);
    // 0.5 * 10 + 0.2 * 10
    assert!((scored.score - 7.0).abs() < TOLERANCE);
    assert_eq!(scored.capacity, 5_000_000_000);
}

#[rstest]
fn general_emergency_is_not_a_match(cardiac_case: Case) {
    let facility = facility_at("gen", 0.0).with_specializations(["Emergency"]);
    let scored = Ranker::default().score(&facility, &cardiac_case);
    // 0.5 * 10 + 0.3 * 5
    assert!((scored.score - 6.5).abs() < TOLERANCE);
    assert!(!scored.specialization_match);
}

#[rstest]
fn ranks_by_descending_score(cardiac_case: Case, timestamp: DateTime<Utc>) {
    let facilities = vec![
        facility_at("far", 40.0),
        facility_at("near", 1.0),
        facility_at("mid", 20.0).with_specializations(["cardiology"]),
    ];
    let result = rank(&facilities, &cardiac_case, timestamp);
    let ids: Vec<&str> = result
        .matches
        .iter()
        .map(|m| m.facility_id.as_str())
        .collect();
    assert_eq!(ids, ["mid", "near", "far"]);
    assert_eq!(result.best_match.as_ref(), result.matches.first());
}

#[rstest]
fn ties_keep_input_order(cardiac_case: Case, timestamp: DateTime<Utc>) {
    let facilities: Vec<Facility> = ["first", "second", "third", "fourth"]
        .into_iter()
        .map(|id| facility_at(id, 12.0).with_capacity(30))
        .collect();
    let result = rank(&facilities, &cardiac_case, timestamp);
    let ids: Vec<&str> = result
        .matches
        .iter()
        .map(|m| m.facility_id.as_str())
        .collect();
    assert_eq!(ids, ["first", "second", "third"]);
}

#[rstest]
#[case(0, 0)]
#[case(1, 1)]
#[case(3, 3)]
#[case(7, 3)]
fn keeps_at_most_three_matches(
    cardiac_case: Case,
    timestamp: DateTime<Utc>,
    #[case] count: usize,
    #[case] expected: usize,
) {
    let facilities: Vec<Facility> = (0..count)
        .map(|index| facility_at(&index.to_string(), 5.0))
        .collect();
    let result = rank(&facilities, &cardiac_case, timestamp);
    assert_eq!(result.matches.len(), expected);
    assert_eq!(result.best_match.is_none(), count == 0);
}

#[rstest]
fn result_carries_case_fields(timestamp: DateTime<Utc>) {
    let case = Case::new("E-9", "Stroke", GeoPoint::new(1.0, 1.0), 9);
    let result = rank(&[], &case, timestamp);
    assert_eq!(result.case_id, "E-9");
    assert_eq!(result.case_type, "Stroke");
    assert_eq!(result.case_severity, 9);
    assert_eq!(result.timestamp, timestamp);
}

#[rstest]
fn custom_top_n_and_weights(cardiac_case: Case, timestamp: DateTime<Utc>) {
    let config = RankerConfig {
        weights: ScoreWeights {
            distance: 0.0,
            specialization: 0.0,
            capacity: 1.0,
        },
        top_n: 1,
    };
    let ranker = Ranker::new(config).expect("valid config");
    let facilities = vec![
        facility_at("close", 0.0).with_capacity(10),
        facility_at("large", 45.0).with_capacity(90),
    ];
    let result = ranker.rank(&facilities, &cardiac_case, timestamp);
    assert_eq!(result.matches.len(), 1);
    assert_eq!(result.matches[0].facility_id, "large");
    assert!((result.matches[0].score - 9.0).abs() < TOLERANCE);
}

#[rstest]
fn rejects_invalid_config() {
    let config = RankerConfig {
        top_n: 0,
        ..RankerConfig::default()
    };
    assert_eq!(Ranker::new(config), Err(RankError::InvalidTopN));
}

#[rstest]
fn rank_document_requires_case(timestamp: DateTime<Utc>) {
    let facilities = vec![facility_at("A", 1.0)];
    let err = Ranker::default()
        .rank_document(&facilities, &json!({"emergency": {}}), timestamp)
        .expect_err("empty case should fail");
    assert_eq!(err, RankError::Case(CaseInputError::Missing));
}

#[rstest]
fn rank_document_decodes_case(timestamp: DateTime<Utc>) {
    let facilities = vec![facility_at("A", 1.0).with_specializations(["neurology"])];
    let document = json!({
        "emergency": {
            "emergencyId": "E-2",
            "type": "stroke",
            "location": {"lat": 0.0, "lng": 0.0}
        }
    });
    let result = Ranker::default()
        .rank_document(&facilities, &document, timestamp)
        .expect("case should decode");
    assert_eq!(result.case_id, "E-2");
    assert_eq!(result.case_severity, triage_core::DEFAULT_SEVERITY);
    let best = result.best_match.expect("one facility was ranked");
    assert!(best.specialization_match);
}
