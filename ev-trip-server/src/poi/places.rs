//! Places-style POI client.
//!
//! Nearby search returns places of a given type around a point; the
//! details endpoint returns phone, hours and reviews for one place.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{LatLng, Source};

use super::convert::{EV_CHARGING_PLACE_TYPE, ProviderRecord, looks_like_charging_station};
use super::error::ProviderError;
use super::provider::PoiProvider;
use super::types::{NearbySearchResponse, Place, PlaceDetails, PlaceDetailsResponse};

/// Default base URL for the places API.
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Fields requested from the details endpoint.
const DETAIL_FIELDS: &str =
    "name,rating,formatted_phone_number,formatted_address,opening_hours,website,review";

/// Configuration for the places client.
#[derive(Debug, Clone)]
pub struct PlacesConfig {
    /// API key, sent as the `key` query parameter
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Place type to restrict nearby search to
    pub type_filter: String,
}

impl PlacesConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 10,
            type_filter: EV_CHARGING_PLACE_TYPE.to_string(),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Places API client.
#[derive(Debug, Clone)]
pub struct PlacesClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    type_filter: String,
    semaphore: Arc<Semaphore>,
}

impl PlacesClient {
    /// Create a new places client with the given configuration.
    pub fn new(config: PlacesConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::unavailable(Source::Places, e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            type_filter: config.type_filter,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// GET an endpoint and return the body, mapping transport failures.
    async fn get_body(&self, url: &str, query: &[(&str, &str)]) -> Result<String, ProviderError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| ProviderError::unavailable(Source::Places, "semaphore closed"))?;

        let response = self
            .http
            .get(url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| ProviderError::unavailable(Source::Places, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::unavailable(
                Source::Places,
                format!("HTTP {}: {}", status.as_u16(), truncate(&body)),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| ProviderError::unavailable(Source::Places, e.to_string()))
    }

    /// Search for places near `point`.
    ///
    /// `ZERO_RESULTS` is an empty list; any other non-`OK` status is an error.
    pub async fn nearby_search(
        &self,
        point: LatLng,
        radius_m: u32,
    ) -> Result<Vec<Place>, ProviderError> {
        let url = format!("{}/place/nearbysearch/json", self.base_url);
        let location = point.to_string();
        let radius = radius_m.to_string();

        let body = self
            .get_body(
                &url,
                &[
                    ("location", location.as_str()),
                    ("radius", radius.as_str()),
                    ("type", self.type_filter.as_str()),
                ],
            )
            .await?;

        let response: NearbySearchResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::malformed(Source::Places, e.to_string()))?;

        match response.status.as_str() {
            "OK" => {
                debug!(%point, results = response.results.len(), "places nearby search");
                Ok(response.results)
            }
            "ZERO_RESULTS" => Ok(Vec::new()),
            status => Err(ProviderError::unavailable(
                Source::Places,
                format!(
                    "status {status}: {}",
                    response.error_message.unwrap_or_default()
                ),
            )),
        }
    }

    /// Fetch details for a single place.
    ///
    /// Returns `Ok(None)` when the place id is unknown.
    pub async fn place_details(&self, place_id: &str) -> Result<Option<PlaceDetails>, ProviderError> {
        let url = format!("{}/place/details/json", self.base_url);

        let body = self
            .get_body(&url, &[("place_id", place_id), ("fields", DETAIL_FIELDS)])
            .await?;

        let response: PlaceDetailsResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::malformed(Source::Places, e.to_string()))?;

        match response.status.as_str() {
            "OK" => Ok(response.result),
            "NOT_FOUND" | "INVALID_REQUEST" => Ok(None),
            status => Err(ProviderError::unavailable(
                Source::Places,
                format!(
                    "status {status}: {}",
                    response.error_message.unwrap_or_default()
                ),
            )),
        }
    }
}

impl PoiProvider for PlacesClient {
    fn source(&self) -> Source {
        Source::Places
    }

    async fn nearby(
        &self,
        point: LatLng,
        radius_m: u32,
    ) -> Result<Vec<ProviderRecord>, ProviderError> {
        let places = self.nearby_search(point, radius_m).await?;
        Ok(places.into_iter().map(ProviderRecord::Places).collect())
    }

    fn accepts(&self, record: &ProviderRecord) -> bool {
        looks_like_charging_station(record)
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(200).collect()
}
