//! Domain types for the EV trip planner.
//!
//! These types represent validated trip data: coordinates are range-checked
//! at construction, routes carry totals consistent with their legs, and
//! stations carry the identity used for deduplication.

mod coord;
mod route;
mod station;
mod vehicle;

pub use coord::{InvalidCoordinate, LatLng, Waypoint};
pub use route::{BoundingBox, LegSummary, Route};
pub use station::{DEDUP_PRECISION, DedupKey, Source, Station};
pub use vehicle::{CatalogError, VehicleCatalog, VehicleProfile};
