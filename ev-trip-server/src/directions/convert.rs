//! Conversion from directions DTOs to domain routes.

use tracing::warn;

use crate::domain::{BoundingBox, InvalidCoordinate, LatLng, LegSummary, Route};

use super::error::DirectionsError;
use super::types::{Bounds, DirectionsResponse, DirectionsRoute, LatLngLiteral};

/// Normalize every alternative in a directions response.
///
/// Routes are numbered `route_0`, `route_1`, ... in provider order. A route
/// containing an out-of-range coordinate is skipped with a warning. Fails
/// with [`DirectionsError::NoRouteFound`] when the status is not `OK` or
/// nothing usable remains.
pub fn normalize_routes(response: &DirectionsResponse) -> Result<Vec<Route>, DirectionsError> {
    if !response.is_ok() {
        return Err(DirectionsError::NoRouteFound {
            status: response.status.clone(),
            message: response.error_message.clone(),
        });
    }

    let mut routes = Vec::with_capacity(response.routes.len());

    for (i, dto) in response.routes.iter().enumerate() {
        match convert_route(format!("route_{i}"), dto) {
            Ok(route) => routes.push(route),
            Err(e) => {
                warn!(route = i, error = %e, "skipping route with invalid coordinates");
            }
        }
    }

    if routes.is_empty() {
        return Err(DirectionsError::NoRouteFound {
            status: response.status.clone(),
            message: Some("response contained no usable routes".to_string()),
        });
    }

    Ok(routes)
}

/// Convert a single provider route.
fn convert_route(id: String, dto: &DirectionsRoute) -> Result<Route, InvalidCoordinate> {
    let legs = dto
        .legs
        .iter()
        .map(|leg| -> Result<LegSummary, InvalidCoordinate> {
            let step_ends = leg
                .steps
                .iter()
                .map(|step| to_lat_lng(&step.end_location))
                .collect::<Result<Vec<_>, _>>()?;

            Ok(LegSummary {
                distance_meters: leg.distance.value,
                duration_seconds: leg.duration.value,
                step_ends,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let bounding_box = dto.bounds.as_ref().map(to_bounding_box).transpose()?;

    let encoded_path = dto
        .overview_polyline
        .as_ref()
        .map(|p| p.points.clone())
        .unwrap_or_default();

    Ok(Route::from_legs(id, legs, encoded_path, bounding_box))
}

fn to_lat_lng(literal: &LatLngLiteral) -> Result<LatLng, InvalidCoordinate> {
    LatLng::new(literal.lat, literal.lng)
}

fn to_bounding_box(bounds: &Bounds) -> Result<BoundingBox, InvalidCoordinate> {
    Ok(BoundingBox {
        northeast: to_lat_lng(&bounds.northeast)?,
        southwest: to_lat_lng(&bounds.southwest)?,
    })
}
