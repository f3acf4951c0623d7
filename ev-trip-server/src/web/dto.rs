//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{BoundingBox, LatLng, Route, Source, Station, VehicleProfile};
use crate::poi::{PlaceDetails, PlaceReview};
use crate::trip::{ConnectorMatch, StationFilter};

/// Trip search form.
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    /// Origin, as free text or "lat,lng"
    pub from: String,

    /// Destination, as free text or "lat,lng"
    pub to: String,

    /// Vehicle model for the range estimate
    pub vehicle_model: Option<String>,

    /// Battery percentage, 0 to 100. Kept as text so an empty field is
    /// "not given" rather than a form rejection.
    pub battery_level: Option<String>,
}

impl SearchForm {
    /// The selected vehicle, if any.
    pub fn vehicle_model(&self) -> Option<&str> {
        self.vehicle_model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }

    /// Parse the battery level field.
    ///
    /// Returns `Ok(None)` when the field is absent or blank.
    pub fn battery_level(&self) -> Result<Option<f64>, String> {
        match self.battery_level.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse::<f64>()
                .map(Some)
                .map_err(|_| format!("Invalid battery level: {raw}")),
        }
    }
}

/// A route in search results.
#[derive(Debug, Serialize)]
pub struct RouteResult {
    pub id: String,

    /// Waypoints in travel order
    pub points: Vec<LatLng>,

    /// Total distance in metres
    pub distance: u64,

    /// Total duration in seconds
    pub duration: u64,

    pub distance_text: String,
    pub duration_text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<BoundingBox>,

    /// Encoded polyline for map display
    pub overview_polyline: String,
}

impl RouteResult {
    pub fn from_route(route: &Route) -> Self {
        Self {
            id: route.id().to_string(),
            points: route.waypoints().to_vec(),
            distance: route.total_distance_meters(),
            duration: route.total_duration_seconds(),
            distance_text: route.distance_text(),
            duration_text: route.duration_text(),
            bounds: route.bounding_box().copied(),
            overview_polyline: route.encoded_path().to_string(),
        }
    }
}

/// Response for trip search.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub from: String,
    pub to: String,
    pub routes: Vec<RouteResult>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_model: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery_level: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_range_km: Option<f64>,
}

/// How the `connector` field of a stations request is matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectorMode {
    #[default]
    Contains,
    Equals,
}

/// Request for stations along a route.
#[derive(Debug, Deserialize)]
pub struct StationsRequest {
    /// Route waypoints
    pub route: Vec<LatLng>,

    /// Only stations with this connector type
    #[serde(default)]
    pub connector: Option<String>,

    #[serde(default)]
    pub connector_match: ConnectorMode,

    /// Only stations reported as operational
    #[serde(default)]
    pub operational_only: bool,
}

impl StationsRequest {
    pub fn filter(&self) -> StationFilter {
        let connector = self
            .connector
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(|c| match self.connector_match {
                ConnectorMode::Contains => ConnectorMatch::Contains(c.to_string()),
                ConnectorMode::Equals => ConnectorMatch::Equals(c.to_string()),
            });

        StationFilter {
            connector,
            operational_only: self.operational_only,
        }
    }
}

/// A charging station in results.
///
/// Fields a provider did not report are omitted rather than sent as null.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub id: String,
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub source: Source,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_ratings_total: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_kw: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub connectors: Option<Vec<String>>,

    pub is_operational: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_from_route_km: Option<f64>,
}

impl StationResult {
    pub fn from_station(station: &Station) -> Self {
        Self {
            id: station.id.clone(),
            name: station.name.clone(),
            address: station.address.clone(),
            lat: station.position.lat(),
            lng: station.position.lng(),
            source: station.source,
            rating: station.rating,
            user_ratings_total: station.user_ratings_total,
            power_kw: station.power_kw,
            connectors: station
                .connector_types
                .as_ref()
                .map(|set| set.iter().cloned().collect()),
            is_operational: station.is_operational,
            distance_from_route_km: station.distance_from_route_km,
        }
    }
}

/// Response for stations along a route.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<StationResult>,

    /// Provider calls that failed; their stations are missing.
    #[serde(skip_serializing_if = "is_zero")]
    pub failed_queries: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

/// A user review of a station.
#[derive(Debug, Serialize)]
pub struct ReviewResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_time_description: Option<String>,
}

impl From<PlaceReview> for ReviewResult {
    fn from(review: PlaceReview) -> Self {
        Self {
            author_name: review.author_name,
            rating: review.rating,
            text: review.text,
            relative_time_description: review.relative_time_description,
        }
    }
}

/// Extended information about one station.
#[derive(Debug, Serialize)]
pub struct StationDetailsResult {
    pub id: String,
    pub name: String,
    pub address: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    /// One line per weekday
    pub opening_hours: Vec<String>,

    pub reviews: Vec<ReviewResult>,
}

impl StationDetailsResult {
    pub fn from_details(id: &str, details: PlaceDetails) -> Self {
        Self {
            id: id.to_string(),
            name: details
                .name
                .unwrap_or_else(|| "Unknown Station".to_string()),
            address: details
                .formatted_address
                .unwrap_or_else(|| "Unknown Location".to_string()),
            phone: details.formatted_phone_number,
            rating: details.rating,
            website: details.website.filter(|w| !w.is_empty()),
            opening_hours: details
                .opening_hours
                .map(|h| h.weekday_text)
                .unwrap_or_default(),
            reviews: details.reviews.into_iter().map(ReviewResult::from).collect(),
        }
    }
}

/// Range estimate query.
#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub vehicle_model: String,
    pub battery_level: f64,
}

#[derive(Debug, Serialize)]
pub struct RangeResponse {
    pub vehicle_model: String,
    pub battery_level: f64,
    pub estimated_range_km: f64,
}

/// A vehicle in the catalog listing.
#[derive(Debug, Serialize)]
pub struct VehicleResult {
    pub model: String,

    #[serde(flatten)]
    pub profile: VehicleProfile,
}

#[derive(Debug, Serialize)]
pub struct VehiclesResponse {
    pub vehicles: Vec<VehicleResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
