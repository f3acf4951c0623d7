//! The POI provider abstraction and the set of configured providers.

use std::future::Future;

use crate::cache::CachedPoiProvider;
use crate::domain::{LatLng, Source};

use super::convert::ProviderRecord;
use super::error::ProviderError;
use super::places::PlacesClient;
use super::registry::RegistryClient;

/// A source of charging-station records near a point.
///
/// This abstraction allows the station pipeline to be tested with mock
/// providers.
pub trait PoiProvider: Send + Sync {
    /// Tag attached to every station this provider produces.
    fn source(&self) -> Source;

    /// Search for records within `radius_m` metres of `point`.
    fn nearby(
        &self,
        point: LatLng,
        radius_m: u32,
    ) -> impl Future<Output = Result<Vec<ProviderRecord>, ProviderError>> + Send;

    /// Whether a record should be emitted at all.
    ///
    /// Records failing this are dropped before normalization.
    fn accepts(&self, _record: &ProviderRecord) -> bool {
        true
    }
}

/// One of the providers the server can be configured with.
pub enum ConfiguredProvider {
    Places(CachedPoiProvider<PlacesClient>),
    Registry(CachedPoiProvider<RegistryClient>),
}

impl PoiProvider for ConfiguredProvider {
    fn source(&self) -> Source {
        match self {
            ConfiguredProvider::Places(p) => p.source(),
            ConfiguredProvider::Registry(p) => p.source(),
        }
    }

    async fn nearby(
        &self,
        point: LatLng,
        radius_m: u32,
    ) -> Result<Vec<ProviderRecord>, ProviderError> {
        match self {
            ConfiguredProvider::Places(p) => p.nearby(point, radius_m).await,
            ConfiguredProvider::Registry(p) => p.nearby(point, radius_m).await,
        }
    }

    fn accepts(&self, record: &ProviderRecord) -> bool {
        match self {
            ConfiguredProvider::Places(p) => p.accepts(record),
            ConfiguredProvider::Registry(p) => p.accepts(record),
        }
    }
}
