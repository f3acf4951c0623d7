//! Vehicle profiles and the read-only catalog they are looked up in.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors loading a vehicle catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog file could not be read
    #[error("failed to read vehicle catalog: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog file is not valid JSON
    #[error("invalid vehicle catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A profile has an unusable value
    #[error("invalid profile for {model}: {reason}")]
    InvalidProfile { model: String, reason: &'static str },
}

/// Static characteristics of one vehicle model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleProfile {
    /// Range on a full battery, in kilometres.
    pub range_km: f64,

    /// Usable battery capacity.
    #[serde(default)]
    pub battery_capacity_kwh: Option<f64>,

    /// Peak DC fast-charging power.
    #[serde(default)]
    pub dc_charge_kw: Option<f64>,

    /// On-board AC charger power.
    #[serde(default)]
    pub ac_charge_kw: Option<f64>,
}

/// Vehicle profiles keyed by model name.
///
/// Built once at startup and shared read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct VehicleCatalog {
    profiles: BTreeMap<String, VehicleProfile>,
}

impl VehicleCatalog {
    /// The models shipped with the application.
    pub fn builtin() -> Self {
        let profiles = BTreeMap::from([
            (
                "Tata Nexon".to_string(),
                VehicleProfile {
                    range_km: 312.0,
                    battery_capacity_kwh: Some(30.2),
                    dc_charge_kw: Some(50.0),
                    ac_charge_kw: Some(7.2),
                },
            ),
            (
                "Mahindra e2o".to_string(),
                VehicleProfile {
                    range_km: 140.0,
                    battery_capacity_kwh: Some(15.44),
                    dc_charge_kw: Some(30.0),
                    ac_charge_kw: Some(3.3),
                },
            ),
        ]);
        Self { profiles }
    }

    /// Parse a catalog from a JSON object of `model -> profile`.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let profiles: BTreeMap<String, VehicleProfile> = serde_json::from_str(json)?;

        for (model, profile) in &profiles {
            if !profile.range_km.is_finite() || profile.range_km <= 0.0 {
                return Err(CatalogError::InvalidProfile {
                    model: model.clone(),
                    reason: "range_km must be a positive number",
                });
            }
        }

        Ok(Self { profiles })
    }

    /// Load a catalog from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn get(&self, model: &str) -> Option<&VehicleProfile> {
        self.profiles.get(model)
    }

    /// Model names in sorted order.
    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &VehicleProfile)> {
        self.profiles.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
