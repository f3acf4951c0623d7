//! Geographic coordinate types.

use std::fmt;

use geo::{Distance, Haversine, Point};
use serde::{Deserialize, Serialize};

/// Error returned when constructing an out-of-range coordinate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinate: {reason}")]
pub struct InvalidCoordinate {
    reason: &'static str,
}

/// A WGS84 latitude/longitude pair, in degrees.
///
/// Latitude is always within `[-90, 90]` and longitude within
/// `[-180, 180]`. Deserialization goes through the same validation as
/// [`LatLng::new`], so a `LatLng` arriving from a request body is as
/// trustworthy as one built in code.
///
/// # Examples
///
/// ```
/// use ev_trip_server::domain::LatLng;
///
/// let pune = LatLng::new(18.5204, 73.8567).unwrap();
/// assert_eq!(pune.lat(), 18.5204);
///
/// assert!(LatLng::new(91.0, 0.0).is_err());
/// assert!(LatLng::new(0.0, f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLatLng")]
pub struct LatLng {
    lat: f64,
    lng: f64,
}

/// A single coordinate along a route.
pub type Waypoint = LatLng;

#[derive(Deserialize)]
struct RawLatLng {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawLatLng> for LatLng {
    type Error = InvalidCoordinate;

    fn try_from(raw: RawLatLng) -> Result<Self, Self::Error> {
        LatLng::new(raw.lat, raw.lng)
    }
}

impl LatLng {
    /// Create a coordinate, rejecting non-finite or out-of-range values.
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidCoordinate> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(InvalidCoordinate {
                reason: "must be finite",
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoordinate {
                reason: "latitude must be within [-90, 90]",
            });
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(InvalidCoordinate {
                reason: "longitude must be within [-180, 180]",
            });
        }
        Ok(Self { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Round both axes to `decimals` places and scale to integers.
    ///
    /// With 3 decimals the buckets are roughly 111 m tall.
    pub fn quantize(&self, decimals: i32) -> (i64, i64) {
        let scale = 10f64.powi(decimals);
        (
            (self.lat * scale).round() as i64,
            (self.lng * scale).round() as i64,
        )
    }

    /// Great-circle distance to `other` in kilometres.
    pub fn haversine_km(&self, other: &LatLng) -> f64 {
        let a = Point::new(self.lng, self.lat);
        let b = Point::new(other.lng, other.lat);
        Haversine.distance(a, b) / 1000.0
    }
}

impl fmt::Display for LatLng {
    /// Formats as `lat,lng`, the shape most map APIs take as a query value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any in-range pair constructs and reports back its inputs
        #[test]
        fn in_range_roundtrip(lat in -90.0f64..=90.0, lng in -180.0f64..=180.0) {
            let p = LatLng::new(lat, lng).unwrap();
            prop_assert_eq!(p.lat(), lat);
            prop_assert_eq!(p.lng(), lng);
        }

        /// Points within the same quantization bucket are at most ~160 m apart
        #[test]
        fn same_bucket_is_close(lat in -60.0f64..60.0, lng in -170.0f64..170.0, dlat in -0.0004f64..0.0004) {
            let a = LatLng::new(lat, lng).unwrap();
            let b = LatLng::new(lat + dlat, lng).unwrap();
            if a.quantize(3) == b.quantize(3) {
                prop_assert!(a.haversine_km(&b) < 0.16);
            }
        }
    }
}
