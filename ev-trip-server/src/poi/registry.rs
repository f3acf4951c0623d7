//! Open charging registry client.
//!
//! The registry returns a bare JSON array of sites with connector detail,
//! which the places-style provider lacks.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{LatLng, Source};

use super::convert::ProviderRecord;
use super::error::ProviderError;
use super::provider::PoiProvider;
use super::types::RegistryPoi;

/// Default base URL for the registry API.
const DEFAULT_BASE_URL: &str = "https://api.openchargemap.io/v3";

/// Registry status id for "operational".
const STATUS_OPERATIONAL: &str = "50";

/// Configuration for the registry client.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// API key, sent as the `X-API-Key` header when present
    pub api_key: Option<String>,
    /// Base URL for the API
    pub base_url: String,
    /// Maximum sites returned per query
    pub max_results: u32,
    /// Ask the registry for operational sites only
    pub operational_only: bool,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            max_results: 50,
            operational_only: false,
            max_concurrent: 8,
            timeout_secs: 10,
        }
    }
}

impl RegistryConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            ..Self::default()
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_max_results(mut self, n: u32) -> Self {
        self.max_results = n;
        self
    }

    pub fn with_operational_only(mut self, yes: bool) -> Self {
        self.operational_only = yes;
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Registry API client.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    max_results: u32,
    operational_only: bool,
    semaphore: Arc<Semaphore>,
}

impl RegistryClient {
    pub fn new(config: RegistryConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::unavailable(Source::Registry, e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            max_results: config.max_results,
            operational_only: config.operational_only,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Search for sites within `radius_m` metres of `point`.
    ///
    /// The registry takes its distance in kilometres.
    pub async fn poi_search(
        &self,
        point: LatLng,
        radius_m: u32,
    ) -> Result<Vec<RegistryPoi>, ProviderError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| ProviderError::unavailable(Source::Registry, "semaphore closed"))?;

        let url = format!("{}/poi/", self.base_url);
        let mut query = vec![
            ("output", "json".to_string()),
            ("latitude", point.lat().to_string()),
            ("longitude", point.lng().to_string()),
            ("distance", format_km(radius_m)),
            ("distanceunit", "KM".to_string()),
            ("maxresults", self.max_results.to_string()),
            ("compact", "true".to_string()),
            ("verbose", "false".to_string()),
        ];
        if self.operational_only {
            query.push(("statustypeid", STATUS_OPERATIONAL.to_string()));
        }

        let mut request = self.http.get(&url).query(&query);
        if let Some(key) = &self.api_key {
            request = request.header("X-API-Key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ProviderError::unavailable(Source::Registry, e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::unavailable(Source::Registry, e.to_string()))?;

        if !status.is_success() {
            let snippet: String = body.chars().take(200).collect();
            return Err(ProviderError::unavailable(
                Source::Registry,
                format!("HTTP {}: {snippet}", status.as_u16()),
            ));
        }

        let pois: Vec<RegistryPoi> = serde_json::from_str(&body)
            .map_err(|e| ProviderError::malformed(Source::Registry, e.to_string()))?;

        debug!(%point, results = pois.len(), "registry poi search");
        Ok(pois)
    }
}

impl PoiProvider for RegistryClient {
    fn source(&self) -> Source {
        Source::Registry
    }

    async fn nearby(
        &self,
        point: LatLng,
        radius_m: u32,
    ) -> Result<Vec<ProviderRecord>, ProviderError> {
        let pois = self.poi_search(point, radius_m).await?;
        Ok(pois.into_iter().map(ProviderRecord::Registry).collect())
    }
}

/// Metres to a kilometre string, without trailing zeros.
fn format_km(radius_m: u32) -> String {
    let km = f64::from(radius_m) / 1000.0;
    format!("{km}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_in_km() {
        assert_eq!(format_km(5000), "5");
        assert_eq!(format_km(2500), "2.5");
        assert_eq!(format_km(0), "0");
    }

    #[test]
    fn config_defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.api_key, None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_results, 50);
        assert!(!config.operational_only);
    }

    #[test]
    fn config_builder() {
        let config = RegistryConfig::new(Some("k".to_string()))
            .with_base_url("http://localhost:9000")
            .with_max_results(10)
            .with_operational_only(true)
            .with_timeout(3);

        assert_eq!(config.api_key.as_deref(), Some("k"));
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.max_results, 10);
        assert!(config.operational_only);
        assert_eq!(config.timeout_secs, 3);
    }
}
