//! Application state for the web layer.

use std::sync::Arc;

use crate::directions::DirectionsClient;
use crate::domain::VehicleCatalog;
use crate::poi::{ConfiguredProvider, PlacesClient};
use crate::trip::TripPlanner;

/// The planner as wired up against the real providers.
pub type LivePlanner = TripPlanner<DirectionsClient, ConfiguredProvider>;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Route planning and station search
    pub planner: Arc<LivePlanner>,

    /// Places client for station details, bypassing the response cache
    pub places: Option<PlacesClient>,

    /// Vehicle profiles for range estimates
    pub catalog: Arc<VehicleCatalog>,

    /// Browser key for the map script on the routes page
    pub maps_api_key: Arc<str>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        planner: LivePlanner,
        places: Option<PlacesClient>,
        catalog: VehicleCatalog,
        maps_api_key: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            planner: Arc::new(planner),
            places,
            catalog: Arc::new(catalog),
            maps_api_key: maps_api_key.into(),
        }
    }
}
