//! Directions provider client.
//!
//! Fetches driving routes (with alternatives) between two locations and
//! normalizes them into [`crate::domain::Route`]s.
//!
//! Key characteristics of the provider:
//! - A 200 response can still carry a failure `status` such as
//!   `ZERO_RESULTS` or `REQUEST_DENIED`
//! - Each route is made of legs, each leg of steps; waypoints are taken
//!   from the step end locations

mod client;
mod convert;
mod error;
mod types;

pub use client::{DirectionsClient, DirectionsConfig};
pub use convert::normalize_routes;
pub use error::DirectionsError;
pub use types::{
    Bounds, DirectionsResponse, DirectionsRoute, EncodedPolyline, LatLngLiteral, RouteLeg,
    RouteStep, TextValue,
};
