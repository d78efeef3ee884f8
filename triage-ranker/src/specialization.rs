//! Capability matching between a case type and a facility.
#![forbid(unsafe_code)]

use triage_core::Specializations;

/// Case types that call for one specific capability, checked in order.
const PRIORITY_RULES: [(&str, &str); 3] = [
    ("cardiac", "cardiology"),
    ("trauma", "emergency"),
    ("stroke", "neurology"),
];

/// Capability that earns partial credit for any case type.
const GENERAL_CAPABILITY: &str = "emergency";

/// How well a facility's capabilities fit a case type.
///
/// # Examples
/// ```
/// use triage_core::Specializations;
/// use triage_ranker::SpecializationMatch;
///
/// let specs = Specializations::from_iter(["Cardiology"]);
/// let fit = SpecializationMatch::evaluate("Cardiac", &specs);
/// assert_eq!(fit, SpecializationMatch::Exact);
/// assert_eq!(fit.points(), 10.0);
/// assert!(fit.is_match());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecializationMatch {
    /// The facility offers the capability the case type calls for.
    Exact,
    /// The facility only offers general emergency care.
    General,
    /// No relevant capability.
    Unmatched,
}

impl SpecializationMatch {
    /// Classify `specializations` against `case_type`, ignoring case.
    ///
    /// The first priority rule whose case type and capability both match
    /// wins; otherwise general emergency capability earns partial credit.
    #[must_use]
    pub fn evaluate(case_type: &str, specializations: &Specializations) -> Self {
        let kind = case_type.to_lowercase();
        let exact = PRIORITY_RULES.iter().any(|&(rule_kind, required)| {
            kind == rule_kind && specializations.contains(required)
        });
        if exact {
            Self::Exact
        } else if specializations.contains(GENERAL_CAPABILITY) {
            Self::General
        } else {
            Self::Unmatched
        }
    }

    /// Sub-score on the `0.0..=10.0` scale.
    #[must_use]
    pub const fn points(self) -> f64 {
        match self {
            Self::Exact => 10.0,
            Self::General => 5.0,
            Self::Unmatched => 0.0,
        }
    }

    /// Whether this counts as a high-confidence match.
    #[must_use]
    pub const fn is_match(self) -> bool {
        matches!(self, Self::Exact)
    }
}
