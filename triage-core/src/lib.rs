//! Core domain types for the triage engine.
//!
//! Records arriving from the data source are decoded leniently: missing or
//! malformed fields fall back to documented defaults instead of failing the
//! run. The only fatal input condition is an absent or empty case record,
//! surfaced through [`CaseInputError`].

#![forbid(unsafe_code)]

pub mod case;
pub mod facility;
pub mod geo_point;
mod lenient;
pub mod ranking;

pub use case::{Case, CaseInputError, DEFAULT_SEVERITY};
pub use facility::{Facility, Specializations};
pub use geo_point::{EARTH_RADIUS_KM, GeoPoint, haversine_km};
pub use ranking::{FacilityMatch, RankingResult};
