//! Facade crate for the triage engine.
//!
//! This crate re-exports the domain types and the facility ranker so callers
//! can depend on a single crate.

#![forbid(unsafe_code)]

pub use triage_core::{
    Case, CaseInputError, DEFAULT_SEVERITY, EARTH_RADIUS_KM, Facility, FacilityMatch, GeoPoint,
    RankingResult, Specializations, haversine_km,
};

pub use triage_ranker::{
    DEFAULT_TOP_N, MAX_SUBSCORE, RankError, Ranker, RankerConfig, ScoreBreakdown, ScoreWeights,
    SpecializationMatch, rank,
};
