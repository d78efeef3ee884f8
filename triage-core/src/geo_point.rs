//! Geographic positions and great-circle distance.

use geo::{Coord, Point};
use serde::{Deserialize, Serialize};

use crate::lenient;

/// Mean Earth radius, in kilometres, used by [`haversine_km`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 position expressed in decimal degrees.
///
/// Serialised as `{"lat": .., "lng": ..}`; `latitude`/`longitude` are accepted
/// on input. A missing or non-numeric component decodes as `0.0`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use triage_core::GeoPoint;
///
/// let point = GeoPoint::new(44.42, 26.1);
/// let coord: Coord<f64> = point.into();
/// assert_eq!(coord, Coord { x: 26.1, y: 44.42 });
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees, nominally `-90.0..=90.0`.
    #[serde(
        rename = "lat",
        alias = "latitude",
        default,
        deserialize_with = "lenient::or_default"
    )]
    pub latitude: f64,
    /// Longitude in degrees, nominally `-180.0..=180.0`.
    #[serde(
        rename = "lng",
        alias = "longitude",
        default,
        deserialize_with = "lenient::or_default"
    )]
    pub longitude: f64,
}

impl GeoPoint {
    /// Construct a point from latitude and longitude in degrees.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Report whether both components are finite and inside the WGS84 range.
    ///
    /// Distances are still computed for points outside the range; callers use
    /// this only to flag suspicious records.
    #[must_use]
    pub fn is_in_range(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl From<GeoPoint> for Coord<f64> {
    fn from(point: GeoPoint) -> Self {
        Self {
            x: point.longitude,
            y: point.latitude,
        }
    }
}

impl From<GeoPoint> for Point<f64> {
    fn from(point: GeoPoint) -> Self {
        Self(point.into())
    }
}

impl From<Coord<f64>> for GeoPoint {
    fn from(coord: Coord<f64>) -> Self {
        Self::new(coord.y, coord.x)
    }
}

/// Great-circle distance between two points in kilometres.
///
/// Uses the haversine formula on a sphere of radius [`EARTH_RADIUS_KM`]. The
/// intermediate haversine term is clamped to `0.0..=1.0` so floating-point
/// overshoot for near-antipodal points never reaches `asin` out of domain.
///
/// # Examples
/// ```
/// use triage_core::{GeoPoint, haversine_km};
///
/// let origin = GeoPoint::new(0.0, 0.0);
/// assert_eq!(haversine_km(origin, origin), 0.0);
///
/// let north = GeoPoint::new(1.0, 0.0);
/// assert!((haversine_km(origin, north) - 111.19).abs() < 0.01);
/// ```
#[must_use]
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lon_a = a.longitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let lon_b = b.longitude.to_radians();

    let half_d_lat = (lat_b - lat_a) / 2.0;
    let half_d_lon = (lon_b - lon_a) / 2.0;
    let raw = half_d_lat.sin().powi(2) + lat_a.cos() * lat_b.cos() * half_d_lon.sin().powi(2);
    let h = raw.clamp(0.0, 1.0);

    2.0 * h.sqrt().asin() * EARTH_RADIUS_KM
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(GeoPoint::new(0.0, 0.0), true)]
    #[case(GeoPoint::new(90.0, 180.0), true)]
    #[case(GeoPoint::new(-90.0, -180.0), true)]
    #[case(GeoPoint::new(90.5, 0.0), false)]
    #[case(GeoPoint::new(0.0, -180.1), false)]
    #[case(GeoPoint::new(f64::NAN, 0.0), false)]
    fn range_check(#[case] point: GeoPoint, #[case] expected: bool) {
        assert_eq!(point.is_in_range(), expected);
    }

    #[rstest]
    fn antipodal_points_stay_in_domain() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 180.0);
        let distance = haversine_km(a, b);
        assert!(distance.is_finite());
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((distance - half_circumference).abs() < 1e-6);
    }

    #[rstest]
    fn decodes_aliases_and_defaults() {
        let point: GeoPoint =
            serde_json::from_str(r#"{"latitude": 51.5, "lng": "east"}"#).expect("decode point");
        assert_eq!(point, GeoPoint::new(51.5, 0.0));
    }

    #[rstest]
    fn serialises_with_source_keys() {
        let json = serde_json::to_value(GeoPoint::new(1.5, -2.0)).expect("encode point");
        assert_eq!(json, serde_json::json!({"lat": 1.5, "lng": -2.0}));
    }
}
