//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::Route;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the trip search form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub vehicles: Vec<String>,
}

/// Route alternatives with the range estimate.
///
/// Stations are loaded per route by `static/stations.js`.
#[derive(Template)]
#[template(path = "routes.html")]
pub struct RoutesTemplate {
    pub from: String,
    pub to: String,
    pub routes: Vec<RouteView>,
    pub vehicle_model: Option<String>,
    pub estimated_range: Option<String>,
    pub maps_api_key: String,
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
    pub details: Option<String>,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Route view model for templates.
#[derive(Debug, Clone)]
pub struct RouteView {
    pub id: String,
    pub distance_text: String,
    pub duration_text: String,
    /// Waypoints as a JSON array, read by the page script.
    pub points_json: String,
    pub overview_polyline: String,
}

impl RouteView {
    pub fn from_route(route: &Route) -> Self {
        Self {
            id: route.id().to_string(),
            distance_text: route.distance_text(),
            duration_text: route.duration_text(),
            points_json: serde_json::to_string(route.waypoints()).unwrap_or_else(|_| "[]".into()),
            overview_polyline: route.encoded_path().to_string(),
        }
    }

    /// Human-readable label, e.g. "Route 1".
    pub fn label(&self) -> String {
        let n = self
            .id
            .strip_prefix("route_")
            .and_then(|i| i.parse::<usize>().ok())
            .map_or(0, |i| i + 1);
        format!("Route {n}")
    }
}
