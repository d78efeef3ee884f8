//! The incoming case matched against candidate facilities.

use log::warn;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::{GeoPoint, lenient};

/// Severity assumed when the case record does not carry a usable value.
pub const DEFAULT_SEVERITY: i64 = 5;

/// Member of the case document that holds the case record.
const CASE_MEMBER: &str = "emergency";

/// A single case awaiting a facility.
///
/// Decoded from a JSON object by [`Case::from_record`]; every field falls
/// back to a default when missing or malformed. The id is read from
/// `emergencyId`, or from `id` when the former is absent.
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    /// Source identifier of the case.
    pub id: String,
    /// Case category such as `cardiac`, `trauma`, or `stroke`.
    pub kind: String,
    /// Where the case originated.
    pub location: GeoPoint,
    /// Domain-defined severity; carried through to the result unscored.
    pub severity: i64,
}

/// Errors raised when the case document cannot yield a case record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CaseInputError {
    /// The document carries no case record, or an empty one.
    #[error("no emergency data provided in algorithm inputs")]
    Missing,
    /// The case record is present but is not a JSON object.
    #[error("emergency data must be a JSON object, found {found}")]
    NotAnObject {
        /// JSON type found in place of the record.
        found: &'static str,
    },
}

impl Case {
    /// Construct a case from already-validated parts.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        kind: impl Into<String>,
        location: GeoPoint,
        severity: i64,
    ) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            location,
            severity,
        }
    }

    /// Extract the case from a document shaped like `{"emergency": {...}}`.
    ///
    /// # Errors
    /// Returns [`CaseInputError::Missing`] when the member is absent, `null`,
    /// or an empty object, and [`CaseInputError::NotAnObject`] for any other
    /// non-object value.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use triage_core::{Case, CaseInputError, DEFAULT_SEVERITY};
    ///
    /// let case = Case::from_document(&json!({
    ///     "emergency": {"emergencyId": "E-1", "type": "cardiac"}
    /// })).unwrap();
    /// assert_eq!(case.kind, "cardiac");
    /// assert_eq!(case.severity, DEFAULT_SEVERITY);
    ///
    /// let missing = Case::from_document(&json!({"emergency": {}}));
    /// assert_eq!(missing, Err(CaseInputError::Missing));
    /// ```
    pub fn from_document(document: &Value) -> Result<Self, CaseInputError> {
        match document.get(CASE_MEMBER) {
            None | Some(Value::Null) => Err(CaseInputError::Missing),
            Some(Value::Object(record)) if record.is_empty() => Err(CaseInputError::Missing),
            Some(Value::Object(record)) => Ok(Self::from_record(record)),
            Some(other) => Err(CaseInputError::NotAnObject {
                found: json_type_name(other),
            }),
        }
    }

    /// Decode a case from its record, defaulting every malformed field.
    #[must_use]
    pub fn from_record(record: &Map<String, Value>) -> Self {
        let id = record
            .get("emergencyId")
            .or_else(|| record.get("id"))
            .map(lenient::identifier_from_value)
            .unwrap_or_default();
        let kind = record
            .get("type")
            .map(lenient::from_value_or_default::<String>)
            .unwrap_or_default();
        let location = if let Some(value) = record.get("location") {
            lenient::from_value_or_default::<GeoPoint>(value)
        } else {
            warn!("case {id:?} has no location; assuming (0, 0)");
            GeoPoint::default()
        };
        let severity = record
            .get("severity")
            .and_then(Value::as_i64)
            .unwrap_or(DEFAULT_SEVERITY);
        Self {
            id,
            kind,
            location,
            severity,
        }
    }
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
