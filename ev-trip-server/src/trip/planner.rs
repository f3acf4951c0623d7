//! The trip planner: routes in, charging stations out.

use std::future::Future;

use tracing::{debug, info};

use crate::directions::{DirectionsError, DirectionsResponse, normalize_routes};
use crate::domain::{Route, Station, Waypoint};
use crate::poi::PoiProvider;

use super::config::TripConfig;
use super::fetch::{FetchReport, distinct_points, fetch_and_merge};
use super::filter::StationFilter;
use super::sample::sample_waypoints;

/// Error during trip planning.
#[derive(Debug, thiserror::Error)]
pub enum TripError {
    /// The provider found no route between the two places
    #[error("no route found from {origin} to {destination}")]
    NoRouteFound { origin: String, destination: String },

    /// Invalid planning request
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The directions call itself failed
    #[error("directions request failed: {0}")]
    Directions(#[from] DirectionsError),

    /// Station search did not finish before the deadline
    #[error("station search timed out after {secs}s")]
    Timeout { secs: u64 },
}

/// Source of driving routes.
///
/// This abstraction allows the planner to be tested with a canned
/// directions response.
pub trait RouteProvider: Send + Sync {
    fn directions(
        &self,
        origin: &str,
        destination: &str,
    ) -> impl Future<Output = Result<DirectionsResponse, DirectionsError>> + Send;
}

/// Plans routes and finds charging stations along them.
pub struct TripPlanner<R, P> {
    routes: R,
    providers: Vec<P>,
    config: TripConfig,
}

impl<R: RouteProvider, P: PoiProvider> TripPlanner<R, P> {
    pub fn new(routes: R, providers: Vec<P>, config: TripConfig) -> Self {
        Self {
            routes,
            providers,
            config,
        }
    }

    pub fn providers(&self) -> &[P] {
        &self.providers
    }

    /// Fetch and normalize route alternatives between two places.
    ///
    /// Routes come back in provider order with ids `route_0`, `route_1`...
    pub async fn plan_route(&self, origin: &str, destination: &str) -> Result<Vec<Route>, TripError> {
        let origin = origin.trim();
        let destination = destination.trim();
        if origin.is_empty() || destination.is_empty() {
            return Err(TripError::InvalidRequest(
                "origin and destination are required".to_string(),
            ));
        }

        let response = self.routes.directions(origin, destination).await?;

        let routes = normalize_routes(&response).map_err(|e| match e {
            DirectionsError::NoRouteFound { .. } => TripError::NoRouteFound {
                origin: origin.to_string(),
                destination: destination.to_string(),
            },
            other => TripError::Directions(other),
        })?;

        info!(origin, destination, routes = routes.len(), "route planned");
        Ok(routes)
    }

    /// Find charging stations along a route.
    ///
    /// An empty result is not an error. See [`Self::search_stations`] for
    /// the per-call failure detail.
    pub async fn fetch_stations(
        &self,
        waypoints: &[Waypoint],
        filter: &StationFilter,
    ) -> Result<Vec<Station>, TripError> {
        Ok(self.search_stations(waypoints, filter).await?.stations)
    }

    /// Sample the route, query every provider, merge, and filter.
    ///
    /// Individual provider failures are reported in the result and do not
    /// fail the search. Exceeding the request deadline does, and no partial
    /// list is returned.
    pub async fn search_stations(
        &self,
        waypoints: &[Waypoint],
        filter: &StationFilter,
    ) -> Result<FetchReport, TripError> {
        let sample = sample_waypoints(waypoints, &self.config.sample);
        if sample.is_empty() || self.providers.is_empty() {
            debug!(waypoints = waypoints.len(), "nothing to search");
            return Ok(FetchReport::default());
        }

        let points = distinct_points(&sample);
        debug!(
            waypoints = waypoints.len(),
            samples = sample.len(),
            points = points.len(),
            providers = self.providers.len(),
            "searching for stations"
        );

        let mut report = tokio::time::timeout(
            self.config.request_timeout(),
            fetch_and_merge(&self.providers, &points, &self.config),
        )
        .await
        .map_err(|_| TripError::Timeout {
            secs: self.config.request_timeout_secs,
        })?;

        for station in &mut report.stations {
            station.distance_from_route_km = nearest_distance_km(station, &points);
        }

        let found = report.stations.len();
        report.stations = filter.apply(std::mem::take(&mut report.stations));

        info!(
            found,
            kept = report.stations.len(),
            failures = report.failures.len(),
            provider_calls = report.provider_calls,
            "station search complete"
        );

        Ok(report)
    }
}

/// Haversine distance to the closest point, rounded to 2 decimals.
fn nearest_distance_km(station: &Station, points: &[Waypoint]) -> Option<f64> {
    points
        .iter()
        .map(|p| station.position.haversine_km(p))
        .reduce(f64::min)
        .map(|km| (km * 100.0).round() / 100.0)
}
