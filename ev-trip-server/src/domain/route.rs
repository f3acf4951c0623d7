//! Canonical driving route.

use chrono::Duration;
use serde::Serialize;

use super::LatLng;

/// Rectangle enclosing a route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub northeast: LatLng,
    pub southwest: LatLng,
}

/// Distance, duration and step end points of one origin→destination leg.
#[derive(Debug, Clone, PartialEq)]
pub struct LegSummary {
    pub distance_meters: u64,
    pub duration_seconds: u64,
    pub step_ends: Vec<LatLng>,
}

/// A driving route, normalized from a directions provider response.
///
/// The totals are always the exact sums over the legs the route was built
/// from, and waypoints keep leg/step order. Consecutive duplicate
/// waypoints are allowed.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    id: String,
    waypoints: Vec<LatLng>,
    total_distance_meters: u64,
    total_duration_seconds: u64,
    encoded_path: String,
    bounding_box: Option<BoundingBox>,
}

impl Route {
    /// Build a route by accumulating its legs in order.
    pub fn from_legs(
        id: impl Into<String>,
        legs: impl IntoIterator<Item = LegSummary>,
        encoded_path: impl Into<String>,
        bounding_box: Option<BoundingBox>,
    ) -> Self {
        let mut waypoints = Vec::new();
        let mut total_distance_meters = 0u64;
        let mut total_duration_seconds = 0u64;

        for leg in legs {
            total_distance_meters += leg.distance_meters;
            total_duration_seconds += leg.duration_seconds;
            waypoints.extend(leg.step_ends);
        }

        Self {
            id: id.into(),
            waypoints,
            total_distance_meters,
            total_duration_seconds,
            encoded_path: encoded_path.into(),
            bounding_box,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn waypoints(&self) -> &[LatLng] {
        &self.waypoints
    }

    pub fn total_distance_meters(&self) -> u64 {
        self.total_distance_meters
    }

    pub fn total_duration_seconds(&self) -> u64 {
        self.total_duration_seconds
    }

    /// Opaque provider polyline; never decoded server-side.
    pub fn encoded_path(&self) -> &str {
        &self.encoded_path
    }

    pub fn bounding_box(&self) -> Option<&BoundingBox> {
        self.bounding_box.as_ref()
    }

    /// Distance formatted as kilometres with one decimal, e.g. `"148.3 km"`.
    pub fn distance_text(&self) -> String {
        format!("{:.1} km", self.total_distance_meters as f64 / 1000.0)
    }

    /// Duration formatted as hours and minutes, e.g. `"2h 5m"`.
    pub fn duration_text(&self) -> String {
        let duration = Duration::seconds(self.total_duration_seconds as i64);
        let hours = duration.num_hours();
        let minutes = (duration - Duration::hours(hours)).num_minutes();
        format!("{hours}h {minutes}m")
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Totals are exactly the sums over the legs
        #[test]
        fn totals_equal_leg_sums(legs in proptest::collection::vec((0u64..10_000_000, 0u64..1_000_000), 0..20)) {
            let summaries: Vec<LegSummary> = legs
                .iter()
                .map(|&(d, t)| LegSummary { distance_meters: d, duration_seconds: t, step_ends: Vec::new() })
                .collect();
            let route = Route::from_legs("r", summaries, "", None);

            prop_assert_eq!(route.total_distance_meters(), legs.iter().map(|l| l.0).sum::<u64>());
            prop_assert_eq!(route.total_duration_seconds(), legs.iter().map(|l| l.1).sum::<u64>());
        }
    }
}
