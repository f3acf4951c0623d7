use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ev_trip_server::cache::CachedPoiProvider;
use ev_trip_server::config::AppConfig;
use ev_trip_server::directions::{DirectionsClient, DirectionsConfig};
use ev_trip_server::domain::VehicleCatalog;
use ev_trip_server::poi::{ConfiguredProvider, PlacesClient, PlacesConfig, RegistryClient};
use ev_trip_server::trip::TripPlanner;
use ev_trip_server::web::{AppState, create_router};

const DEFAULT_LOG_FILTER: &str = "ev_trip_server=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let catalog = match &config.vehicle_catalog {
        Some(path) => VehicleCatalog::from_path(path)?,
        None => VehicleCatalog::builtin(),
    };
    info!(vehicles = catalog.len(), "loaded vehicle catalog");

    let timeout_secs = config.request_timeout_secs;
    let directions = DirectionsClient::new(
        DirectionsConfig::new(&config.maps_api_key).with_timeout(timeout_secs),
    )?;

    // Station details go straight to the places client; only searches are cached.
    let places =
        PlacesClient::new(PlacesConfig::new(&config.maps_api_key).with_timeout(timeout_secs))?;
    let cache_config = config.cache_config();
    let mut providers = vec![ConfiguredProvider::Places(CachedPoiProvider::new(
        places.clone(),
        &cache_config,
    ))];

    if let Some(registry_config) = config.registry_config() {
        let registry = RegistryClient::new(registry_config)?;
        providers.push(ConfiguredProvider::Registry(CachedPoiProvider::new(
            registry,
            &cache_config,
        )));
    } else {
        info!("OCM_API_KEY not set; searching places only");
    }
    info!(providers = providers.len(), "configured station providers");

    let planner = TripPlanner::new(directions, providers, config.trip_config());
    let state = AppState::new(
        planner,
        Some(places),
        catalog,
        config.maps_api_key.as_str(),
    );
    let app = create_router(state, &config.static_dir);

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "EV trip planner listening");
    info!("  GET  /                      - Search form");
    info!("  GET  /health                - Health check");
    info!("  POST /search                - Plan routes");
    info!("  POST /get_stations          - Charging stations along a route");
    info!("  GET  /station_details/:id   - Station details");
    info!("  GET  /api/range             - Range estimate");
    info!("  GET  /api/vehicles          - Vehicle catalog");

    axum::serve(listener, app).await?;
    Ok(())
}
