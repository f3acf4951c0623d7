//! Directions API response DTOs.
//!
//! These map directly to the provider's JSON. Most fields are optional
//! because the provider omits them rather than sending nulls.

use serde::Deserialize;

/// Response from the directions endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    /// `"OK"` on success; `"ZERO_RESULTS"`, `"NOT_FOUND"`,
    /// `"REQUEST_DENIED"` etc. otherwise.
    pub status: String,

    /// Alternative routes, best first.
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,

    /// Human-readable detail for non-OK statuses.
    pub error_message: Option<String>,
}

impl DirectionsResponse {
    /// Check if the response indicates success.
    pub fn is_ok(&self) -> bool {
        self.status == "OK"
    }
}

/// One alternative route.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsRoute {
    /// Short description, e.g. the main road taken.
    pub summary: Option<String>,

    pub bounds: Option<Bounds>,

    pub overview_polyline: Option<EncodedPolyline>,

    #[serde(default)]
    pub legs: Vec<RouteLeg>,
}

/// Viewport enclosing a route.
#[derive(Debug, Clone, Deserialize)]
pub struct Bounds {
    pub northeast: LatLngLiteral,
    pub southwest: LatLngLiteral,
}

/// A raw coordinate as sent by the provider; not yet range-checked.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLngLiteral {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EncodedPolyline {
    pub points: String,
}

/// One origin-to-destination segment of a route.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteLeg {
    pub distance: TextValue,
    pub duration: TextValue,

    pub start_address: Option<String>,
    pub end_address: Option<String>,

    #[serde(default)]
    pub steps: Vec<RouteStep>,
}

/// A quantity with its display text, e.g. `{"text": "5.2 km", "value": 5213}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TextValue {
    pub text: Option<String>,
    pub value: u64,
}

/// A single manoeuvre within a leg.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteStep {
    pub start_location: Option<LatLngLiteral>,
    pub end_location: LatLngLiteral,
    pub distance: Option<TextValue>,
    pub duration: Option<TextValue>,
}
