//! Web layer for the EV trip planner.
//!
//! Provides the search form, route results, station lookup along a route,
//! and the range estimate over HTTP.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, LivePlanner};
pub use templates::*;
