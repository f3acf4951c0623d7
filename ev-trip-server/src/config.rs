//! Application configuration from environment variables.

use std::env::VarError;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::poi::RegistryConfig;
use crate::trip::TripConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Everything the server needs to start, resolved once at boot.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Key for the directions and places APIs.
    pub maps_api_key: String,

    /// Key for the charging registry. The registry is not queried without one.
    pub registry_api_key: Option<String>,

    /// Sites returned per registry query.
    pub registry_max_results: u32,

    /// Ask the registry for operational sites only.
    pub registry_operational_only: bool,

    pub bind_addr: SocketAddr,

    pub search_radius_m: u32,
    pub max_in_flight: usize,
    pub request_timeout_secs: u64,
    pub retry_attempts: u32,

    /// TTL for cached provider responses.
    pub provider_cache_ttl_secs: u64,

    /// JSON file replacing the built-in vehicle catalog.
    pub vehicle_catalog: Option<PathBuf>,

    /// Directory served under `/static`.
    pub static_dir: PathBuf,
}

impl AppConfig {
    /// Load from the process environment, after applying any `.env` file.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Load from the process environment only.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key))
    }

    /// Build from an arbitrary lookup, so tests need not touch the real
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let non_empty = |var: &str| lookup(var).ok().filter(|v| !v.trim().is_empty());

        let or_default =
            |var: &str, default: &str| non_empty(var).unwrap_or_else(|| default.to_string());

        fn parse<T>(var: &str, raw: String) -> Result<T, ConfigError>
        where
            T: std::str::FromStr,
            T::Err: std::fmt::Display,
        {
            raw.trim().parse::<T>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
        }

        let maps_api_key = non_empty("GOOGLE_MAPS_API_KEY")
            .ok_or_else(|| ConfigError::MissingEnvVar("GOOGLE_MAPS_API_KEY".to_string()))?;
        let registry_api_key = non_empty("OCM_API_KEY");
        let registry_max_results =
            parse("EV_OCM_MAX_RESULTS", or_default("EV_OCM_MAX_RESULTS", "50"))?;
        let registry_operational_only = parse(
            "EV_OCM_OPERATIONAL_ONLY",
            or_default("EV_OCM_OPERATIONAL_ONLY", "false"),
        )?;

        let bind_addr = parse("EV_BIND_ADDR", or_default("EV_BIND_ADDR", "127.0.0.1:3000"))?;
        let search_radius_m = parse("EV_SEARCH_RADIUS_M", or_default("EV_SEARCH_RADIUS_M", "5000"))?;
        let max_in_flight = parse("EV_MAX_IN_FLIGHT", or_default("EV_MAX_IN_FLIGHT", "8"))?;
        let request_timeout_secs = parse(
            "EV_REQUEST_TIMEOUT_SECS",
            or_default("EV_REQUEST_TIMEOUT_SECS", "30"),
        )?;
        let retry_attempts = parse("EV_RETRY_ATTEMPTS", or_default("EV_RETRY_ATTEMPTS", "0"))?;
        let provider_cache_ttl_secs = parse(
            "EV_PROVIDER_CACHE_TTL_SECS",
            or_default("EV_PROVIDER_CACHE_TTL_SECS", "60"),
        )?;

        if search_radius_m == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: "EV_SEARCH_RADIUS_M".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        if request_timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: "EV_REQUEST_TIMEOUT_SECS".to_string(),
                reason: "must be positive".to_string(),
            });
        }

        Ok(Self {
            maps_api_key,
            registry_api_key,
            registry_max_results,
            registry_operational_only,
            bind_addr,
            search_radius_m,
            max_in_flight,
            request_timeout_secs,
            retry_attempts,
            provider_cache_ttl_secs,
            vehicle_catalog: non_empty("EV_VEHICLE_CATALOG").map(PathBuf::from),
            static_dir: PathBuf::from(or_default("EV_STATIC_DIR", "static")),
        })
    }

    /// Pipeline configuration derived from these settings.
    pub fn trip_config(&self) -> TripConfig {
        TripConfig::default()
            .with_search_radius(self.search_radius_m)
            .with_max_in_flight(self.max_in_flight)
            .with_request_timeout(self.request_timeout_secs)
            .with_retries(self.retry_attempts, TripConfig::default().retry_backoff_ms)
    }

    /// Registry client settings, or `None` when no registry key is set.
    pub fn registry_config(&self) -> Option<RegistryConfig> {
        let key = self.registry_api_key.clone()?;
        Some(
            RegistryConfig::new(Some(key))
                .with_max_results(self.registry_max_results)
                .with_operational_only(self.registry_operational_only)
                .with_timeout(self.request_timeout_secs),
        )
    }

    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            ttl: Duration::from_secs(self.provider_cache_ttl_secs),
            ..CacheConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Result<String, VarError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned().ok_or(VarError::NotPresent)
    }

    #[test]
    fn defaults_with_only_maps_key() {
        let config = AppConfig::from_lookup(lookup(&[("GOOGLE_MAPS_API_KEY", "maps")])).unwrap();

        assert_eq!(config.maps_api_key, "maps");
        assert_eq!(config.registry_api_key, None);
        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.search_radius_m, 5000);
        assert_eq!(config.max_in_flight, 8);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.retry_attempts, 0);
        assert_eq!(config.provider_cache_ttl_secs, 60);
        assert_eq!(config.vehicle_catalog, None);
        assert_eq!(config.static_dir, PathBuf::from("static"));
    }

    #[test]
    fn missing_maps_key_is_an_error() {
        let err = AppConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref v) if v == "GOOGLE_MAPS_API_KEY"));

        let err = AppConfig::from_lookup(lookup(&[("GOOGLE_MAPS_API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(_)));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = AppConfig::from_lookup(lookup(&[
            ("GOOGLE_MAPS_API_KEY", "maps"),
            ("OCM_API_KEY", "ocm"),
            ("EV_BIND_ADDR", "0.0.0.0:8080"),
            ("EV_SEARCH_RADIUS_M", "2500"),
            ("EV_MAX_IN_FLIGHT", "64"),
            ("EV_REQUEST_TIMEOUT_SECS", "5"),
            ("EV_VEHICLE_CATALOG", "/etc/ev/vehicles.json"),
        ]))
        .unwrap();

        assert_eq!(config.registry_api_key.as_deref(), Some("ocm"));
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(
            config.vehicle_catalog,
            Some(PathBuf::from("/etc/ev/vehicles.json"))
        );

        let trip = config.trip_config();
        assert_eq!(trip.search_radius_m, 2500);
        assert_eq!(trip.max_in_flight, 16);
        assert_eq!(trip.request_timeout_secs, 5);
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        let err = AppConfig::from_lookup(lookup(&[
            ("GOOGLE_MAPS_API_KEY", "maps"),
            ("EV_SEARCH_RADIUS_M", "five km"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "EV_SEARCH_RADIUS_M"));

        let err = AppConfig::from_lookup(lookup(&[
            ("GOOGLE_MAPS_API_KEY", "maps"),
            ("EV_REQUEST_TIMEOUT_SECS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar { .. }));
    }

    #[test]
    fn cache_ttl_flows_into_cache_config() {
        let config = AppConfig::from_lookup(lookup(&[
            ("GOOGLE_MAPS_API_KEY", "maps"),
            ("EV_PROVIDER_CACHE_TTL_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.cache_config().ttl, Duration::from_secs(5));
    }

    #[test]
    fn registry_options_flow_into_registry_config() {
        let without_key =
            AppConfig::from_lookup(lookup(&[("GOOGLE_MAPS_API_KEY", "maps")])).unwrap();
        assert!(without_key.registry_config().is_none());

        let config = AppConfig::from_lookup(lookup(&[
            ("GOOGLE_MAPS_API_KEY", "maps"),
            ("OCM_API_KEY", "ocm"),
            ("EV_OCM_MAX_RESULTS", "20"),
            ("EV_OCM_OPERATIONAL_ONLY", "true"),
            ("EV_REQUEST_TIMEOUT_SECS", "12"),
        ]))
        .unwrap();

        let registry = config.registry_config().unwrap();
        assert_eq!(registry.api_key.as_deref(), Some("ocm"));
        assert_eq!(registry.max_results, 20);
        assert!(registry.operational_only);
        assert_eq!(registry.timeout_secs, 12);
    }

    #[test]
    fn invalid_registry_flag_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[
            ("GOOGLE_MAPS_API_KEY", "maps"),
            ("EV_OCM_OPERATIONAL_ONLY", "sometimes"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "EV_OCM_OPERATIONAL_ONLY"));
    }
}
