//! Candidate facilities and their declared capabilities.

use std::collections::BTreeSet;

use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::{GeoPoint, lenient};

/// Case-insensitive set of capability names offered by a facility.
///
/// Entries are stored lowercased. Decoding skips non-string entries and
/// treats anything other than a JSON array as an empty set.
///
/// # Examples
/// ```
/// use triage_core::Specializations;
///
/// let specs = Specializations::from_iter(["Cardiology", "Emergency"]);
/// assert!(specs.contains("cardiology"));
/// assert!(specs.contains("EMERGENCY"));
/// assert!(!specs.contains("neurology"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Specializations(BTreeSet<String>);

impl Specializations {
    /// Create an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Add a capability, normalising its case.
    pub fn insert(&mut self, name: &str) {
        self.0.insert(name.to_lowercase());
    }

    /// Report whether `name` is present, ignoring case.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(&name.to_lowercase())
    }

    /// Iterate over the normalised names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of distinct capabilities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Report whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Specializations {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut specs = Self::new();
        for name in iter {
            specs.insert(name.as_ref());
        }
        specs
    }
}

impl<'de> Deserialize<'de> for Specializations {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let specs = match value {
            Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
            _ => Self::new(),
        };
        Ok(specs)
    }
}

/// A facility that may receive the incoming case.
///
/// Every field is optional on input: `id` and `name` default to empty
/// strings, `location` to `(0, 0)`, `capacity` to `0`, and `specializations`
/// to the empty set. Numeric ids are rendered as strings and capacities too
/// large for a `u64` saturate.
///
/// # Examples
/// ```
/// use triage_core::{Facility, GeoPoint};
///
/// let facility: Facility = serde_json::from_str(
///     r#"{"id": 7, "name": "St. Mary", "capacity": "unknown"}"#,
/// ).unwrap();
/// assert_eq!(facility.id, "7");
/// assert_eq!(facility.location, GeoPoint::default());
/// assert_eq!(facility.capacity, 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    /// Source identifier.
    #[serde(default, deserialize_with = "lenient::identifier")]
    pub id: String,
    /// Display name.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub name: String,
    /// Facility position.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub location: GeoPoint,
    /// Number of cases the facility can currently absorb.
    #[serde(default, deserialize_with = "lenient::count")]
    pub capacity: u64,
    /// Declared capabilities.
    #[serde(default)]
    pub specializations: Specializations,
}

impl Facility {
    /// Construct a facility with no capacity and no capabilities.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location,
            capacity: 0,
            specializations: Specializations::new(),
        }
    }

    /// Set the capacity while consuming `self`, enabling chaining.
    #[must_use]
    pub const fn with_capacity(mut self, capacity: u64) -> Self {
        self.capacity = capacity;
        self
    }

    /// Decode a facility from one dataset record, defaulting every malformed
    /// field.
    ///
    /// Logs a warning when the record has no location, since the facility is
    /// then placed at `(0, 0)`.
    #[must_use]
    pub fn from_record(record: &Map<String, Value>) -> Self {
        let id = record
            .get("id")
            .map(lenient::identifier_from_value)
            .unwrap_or_default();
        let location = match record.get("location") {
            Some(value) if !value.is_null() => lenient::from_value_or_default::<GeoPoint>(value),
            _ => {
                warn!("facility {id:?} has no location; assuming (0, 0)");
                GeoPoint::default()
            }
        };
        Self {
            name: record
                .get("name")
                .map(lenient::from_value_or_default::<String>)
                .unwrap_or_default(),
            location,
            capacity: record
                .get("capacity")
                .map(lenient::count_from_value)
                .unwrap_or_default(),
            specializations: record
                .get("specializations")
                .map(lenient::from_value_or_default::<Specializations>)
                .unwrap_or_default(),
            id,
        }
    }

    /// Replace the capabilities while consuming `self`, enabling chaining.
    #[must_use]
    pub fn with_specializations<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.specializations = names.into_iter().collect();
        self
    }
}
