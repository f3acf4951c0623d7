//! Charging-station POI providers.
//!
//! Each provider answers "what chargers are near this point" in its own
//! schema. [`ProviderRecord::into_station`] normalizes the answers into
//! [`crate::domain::Station`]s.

mod convert;
mod error;
mod places;
mod provider;
mod registry;
mod types;

pub use convert::{
    ConversionError, EV_CHARGING_PLACE_TYPE, ProviderRecord, looks_like_charging_station,
};
pub use error::ProviderError;
pub use places::{PlacesClient, PlacesConfig};
pub use provider::{ConfiguredProvider, PoiProvider};
pub use registry::{RegistryClient, RegistryConfig};
pub use types::*;
