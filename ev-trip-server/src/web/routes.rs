//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::{
    Form, Json, Router,
    extract::{Path as UrlPath, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::directions::DirectionsError;
use crate::domain::Route;
use crate::poi::ProviderError;
use crate::trip::{RangeError, TripError, estimate_range};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/search", post(search))
        .route("/get_stations", post(get_stations))
        .route("/station_details/:id", get(station_details))
        .route("/api/range", get(range))
        .route("/api/vehicles", get(vehicles))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with search form.
async fn index_page(State(state): State<AppState>) -> impl IntoResponse {
    let template = IndexTemplate {
        vehicles: state.catalog.models().map(str::to_string).collect(),
    };
    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Plan routes for the search form and estimate range.
///
/// Browsers get the routes page (or an error page); other clients get JSON.
async fn search(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<SearchForm>,
) -> Result<Response, AppError> {
    let html = accepts_html(&headers);

    let planned = match plan_search(&state, &form).await {
        Ok(planned) => planned,
        Err(e) if html => return Ok(e.into_page()),
        Err(e) => return Err(e),
    };

    if html {
        let template = RoutesTemplate {
            from: form.from.trim().to_string(),
            to: form.to.trim().to_string(),
            routes: planned.routes.iter().map(RouteView::from_route).collect(),
            vehicle_model: form.vehicle_model().map(str::to_string),
            estimated_range: planned.estimated_range_km.map(|km| format!("{km:.2}")),
            maps_api_key: state.maps_api_key.to_string(),
        };
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

        Ok(Html(html).into_response())
    } else {
        Ok(Json(SearchResponse {
            from: form.from.trim().to_string(),
            to: form.to.trim().to_string(),
            routes: planned.routes.iter().map(RouteResult::from_route).collect(),
            vehicle_model: form.vehicle_model().map(str::to_string),
            battery_level: planned.battery_level,
            estimated_range_km: planned.estimated_range_km,
        })
        .into_response())
    }
}

/// Routes plus the optional range estimate for one search.
struct PlannedSearch {
    routes: Vec<Route>,
    battery_level: Option<f64>,
    estimated_range_km: Option<f64>,
}

async fn plan_search(state: &AppState, form: &SearchForm) -> Result<PlannedSearch, AppError> {
    let battery_level = form
        .battery_level()
        .map_err(|message| AppError::BadRequest { message })?;

    let estimated_range_km = match (form.vehicle_model(), battery_level) {
        (Some(model), Some(pct)) => Some(estimate_range(&state.catalog, model, pct)?),
        _ => None,
    };

    let routes = state.planner.plan_route(&form.from, &form.to).await?;

    Ok(PlannedSearch {
        routes,
        battery_level,
        estimated_range_km,
    })
}

/// Charging stations along a route.
async fn get_stations(
    State(state): State<AppState>,
    Json(req): Json<StationsRequest>,
) -> Result<Json<StationsResponse>, AppError> {
    let report = state
        .planner
        .search_stations(&req.route, &req.filter())
        .await?;

    Ok(Json(StationsResponse {
        stations: report
            .stations
            .iter()
            .map(StationResult::from_station)
            .collect(),
        failed_queries: report.failures.len(),
    }))
}

/// Details for one places-style station.
async fn station_details(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
) -> Result<Json<StationDetailsResult>, AppError> {
    let Some(places) = state.places.as_ref() else {
        return Err(AppError::NotFound {
            message: "Station details are not available".to_string(),
        });
    };

    let details = places
        .place_details(&id)
        .await?
        .ok_or_else(|| AppError::NotFound {
            message: format!("Unknown station: {id}"),
        })?;

    Ok(Json(StationDetailsResult::from_details(&id, details)))
}

/// Remaining range for a vehicle at a battery level.
async fn range(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<RangeResponse>, AppError> {
    let estimated_range_km =
        estimate_range(&state.catalog, &query.vehicle_model, query.battery_level)?;

    Ok(Json(RangeResponse {
        vehicle_model: query.vehicle_model,
        battery_level: query.battery_level,
        estimated_range_km,
    }))
}

/// The vehicle catalog.
async fn vehicles(State(state): State<AppState>) -> Json<VehiclesResponse> {
    Json(VehiclesResponse {
        vehicles: state
            .catalog
            .iter()
            .map(|(model, profile)| VehicleResult {
                model: model.to_string(),
                profile: profile.clone(),
            })
            .collect(),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Upstream { message: String },
    Timeout { message: String },
    Internal { message: String },
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, &str) {
        match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.as_str()),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message.as_str()),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message.as_str()),
            AppError::Timeout { message } => (StatusCode::GATEWAY_TIMEOUT, message.as_str()),
            AppError::Internal { message } => {
                (StatusCode::INTERNAL_SERVER_ERROR, message.as_str())
            }
        }
    }

    fn log(&self) {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = message, "request failed");
        } else {
            warn!(status = status.as_u16(), error = message, "request rejected");
        }
    }

    /// Render as an HTML error page.
    fn into_page(self) -> Response {
        self.log();
        let (status, message) = self.status_and_message();

        let title = match status {
            StatusCode::NOT_FOUND => "No route found",
            StatusCode::BAD_REQUEST => "Invalid search",
            _ => "Something went wrong",
        };
        let template = ErrorTemplate {
            title: title.to_string(),
            message: "Could not fetch routes. Please check your input and try again.".to_string(),
            details: Some(message.to_string()),
        };
        let body = template
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e));

        (status, Html(body)).into_response()
    }
}

impl From<TripError> for AppError {
    fn from(e: TripError) -> Self {
        let message = e.to_string();
        match e {
            TripError::NoRouteFound { .. } => AppError::NotFound { message },
            TripError::InvalidRequest(message) => AppError::BadRequest { message },
            TripError::Timeout { .. } => AppError::Timeout { message },
            TripError::Directions(DirectionsError::NoRouteFound { .. }) => {
                AppError::NotFound { message }
            }
            TripError::Directions(_) => AppError::Upstream { message },
        }
    }
}

impl From<RangeError> for AppError {
    fn from(e: RangeError) -> Self {
        let message = e.to_string();
        match e {
            RangeError::UnknownVehicleModel(_) => AppError::NotFound { message },
            RangeError::InvalidBatteryLevel(_) => AppError::BadRequest { message },
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(e: ProviderError) -> Self {
        AppError::Upstream {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        self.log();
        let (status, message) = self.status_and_message();

        let body = Json(ErrorResponse {
            error: message.to_string(),
        });
        (status, body).into_response()
    }
}
