//! Normalization of provider-native records into canonical stations.

use std::collections::BTreeSet;

use crate::domain::{LatLng, Source, Station};

use super::types::{Place, RegistryPoi};

/// Place type the places-style provider uses for chargers.
pub const EV_CHARGING_PLACE_TYPE: &str = "electric_vehicle_charging_station";

/// Error during record to station conversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// Required field absent
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Coordinates outside the valid range
    #[error("invalid coordinates ({lat}, {lng})")]
    InvalidCoordinates { lat: f64, lng: f64 },
}

/// A raw record from one POI provider, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderRecord {
    Places(Place),
    Registry(RegistryPoi),
}

impl ProviderRecord {
    /// The provider that produced this record.
    pub fn source(&self) -> Source {
        match self {
            ProviderRecord::Places(_) => Source::Places,
            ProviderRecord::Registry(_) => Source::Registry,
        }
    }

    /// Normalize into a canonical [`Station`].
    pub fn into_station(self) -> Result<Station, ConversionError> {
        match self {
            ProviderRecord::Places(place) => station_from_place(place),
            ProviderRecord::Registry(poi) => station_from_registry(poi),
        }
    }
}

fn position(lat: f64, lng: f64) -> Result<LatLng, ConversionError> {
    LatLng::new(lat, lng).map_err(|_| ConversionError::InvalidCoordinates { lat, lng })
}

/// Map a places-style result.
///
/// The provider has no connector or power data, so those stay `None`.
/// A place is operational unless it reports a business status other than
/// `OPERATIONAL`.
fn station_from_place(place: Place) -> Result<Station, ConversionError> {
    let location = place
        .geometry
        .as_ref()
        .map(|g| g.location)
        .ok_or(ConversionError::MissingField("geometry.location"))?;
    let position = position(location.lat, location.lng)?;

    let mut station = Station::new(
        place.place_id,
        place.name.unwrap_or_else(|| "Unknown Station".to_string()),
        place
            .vicinity
            .unwrap_or_else(|| "Unknown Location".to_string()),
        position,
        Source::Places,
    );
    station.rating = place.rating;
    station.user_ratings_total = place.user_ratings_total;
    station.is_operational = place
        .business_status
        .as_deref()
        .is_none_or(|s| s == "OPERATIONAL");

    Ok(station)
}

/// Map a registry site.
///
/// Power is the highest connector rating; connectors are the distinct
/// connector type titles. The site-level status flag decides operational
/// state and defaults to operational when the registry has no status.
fn station_from_registry(poi: RegistryPoi) -> Result<Station, ConversionError> {
    let address = poi
        .address_info
        .ok_or(ConversionError::MissingField("AddressInfo"))?;
    let lat = address
        .latitude
        .ok_or(ConversionError::MissingField("AddressInfo.Latitude"))?;
    let lng = address
        .longitude
        .ok_or(ConversionError::MissingField("AddressInfo.Longitude"))?;
    let position = position(lat, lng)?;

    let street = [
        address.address_line1.as_deref(),
        address.town.as_deref(),
        address.state_or_province.as_deref(),
        address.postcode.as_deref(),
    ]
    .into_iter()
    .flatten()
    .map(str::trim)
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(", ");

    let connections = poi.connections.unwrap_or_default();

    let power_kw = connections
        .iter()
        .filter_map(|c| c.power_kw)
        .filter(|kw| kw.is_finite() && *kw > 0.0)
        .reduce(f64::max);

    let connector_types: BTreeSet<String> = connections
        .iter()
        .filter_map(|c| c.connection_type.as_ref()?.title.clone())
        .filter(|title| !title.trim().is_empty())
        .collect();

    let mut station = Station::new(
        format!("ocm-{}", poi.id),
        address
            .title
            .unwrap_or_else(|| "Unknown Station".to_string()),
        if street.is_empty() {
            "Unknown Location".to_string()
        } else {
            street
        },
        position,
        Source::Registry,
    );
    station.power_kw = power_kw;
    station.connector_types = (!connector_types.is_empty()).then_some(connector_types);
    station.is_operational = poi
        .status_type
        .and_then(|s| s.is_operational)
        .unwrap_or(true);

    Ok(station)
}

/// Decide whether a places-style result is really a charging station.
///
/// Nearby search with a type filter still returns loosely related places
/// (parking lots, dealerships). Accept the ones tagged with the charging
/// type, or whose name says so.
pub fn looks_like_charging_station(record: &ProviderRecord) -> bool {
    let ProviderRecord::Places(place) = record else {
        return true;
    };

    if place.types.iter().any(|t| t == EV_CHARGING_PLACE_TYPE) {
        return true;
    }

    let name = place.name.as_deref().unwrap_or_default().to_lowercase();
    ["charg", "ev ", "electric"]
        .iter()
        .any(|needle| name.contains(needle))
}
