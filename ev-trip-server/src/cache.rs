//! Caching layer for POI provider responses.
//!
//! Sample points from nearby routes (alternatives often share long
//! stretches) land on the same coordinates, and users repeat searches.
//! Caching the provider-native records for a short TTL absorbs those
//! repeated calls without ever holding canonical stations across requests.
//!
//! Points are quantized to 4 decimals (roughly 11 m) for the key, which
//! bounds cache cardinality without merging genuinely distinct queries.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::{LatLng, Source};
use crate::poi::{PoiProvider, ProviderError, ProviderRecord};

/// Decimal places kept for cache key coordinates.
const KEY_PRECISION: i32 = 4;

/// Cache key: (quantized lat, quantized lng, radius in metres).
type NearbyKey = (i64, i64, u32);

/// Cached provider answer.
type NearbyEntry = Arc<Vec<ProviderRecord>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 1000,
        }
    }
}

/// A POI provider with response caching.
///
/// Failed calls are not cached, so a transient outage is retried on the
/// next request.
pub struct CachedPoiProvider<P> {
    inner: P,
    entries: MokaCache<NearbyKey, NearbyEntry>,
}

impl<P: PoiProvider> CachedPoiProvider<P> {
    /// Wrap a provider.
    pub fn new(inner: P, config: &CacheConfig) -> Self {
        let entries = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, entries }
    }

    fn key(point: LatLng, radius_m: u32) -> NearbyKey {
        let (lat, lng) = point.quantize(KEY_PRECISION);
        (lat, lng, radius_m)
    }

    /// Access the underlying provider for operations that bypass cache.
    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: PoiProvider> PoiProvider for CachedPoiProvider<P> {
    fn source(&self) -> Source {
        self.inner.source()
    }

    async fn nearby(
        &self,
        point: LatLng,
        radius_m: u32,
    ) -> Result<Vec<ProviderRecord>, ProviderError> {
        let key = Self::key(point, radius_m);

        if let Some(cached) = self.entries.get(&key).await {
            return Ok(cached.as_ref().clone());
        }

        let records = self.inner.nearby(point, radius_m).await?;
        self.entries.insert(key, Arc::new(records.clone())).await;

        Ok(records)
    }

    fn accepts(&self, record: &ProviderRecord) -> bool {
        self.inner.accepts(record)
    }
}
