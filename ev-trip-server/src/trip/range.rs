//! Remaining-range estimation.

use crate::domain::VehicleCatalog;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RangeError {
    #[error("unknown vehicle model: {0}")]
    UnknownVehicleModel(String),

    #[error("battery level must be between 0 and 100, got {0}")]
    InvalidBatteryLevel(f64),
}

/// Estimate remaining range in kilometres, rounded to 2 decimals.
///
/// Linear in battery percentage. A full battery gives the profile's range
/// exactly, unrounded.
///
/// ```
/// use ev_trip_server::domain::VehicleCatalog;
/// use ev_trip_server::trip::estimate_range;
///
/// let catalog = VehicleCatalog::builtin();
/// assert_eq!(estimate_range(&catalog, "Tata Nexon", 50.0), Ok(156.0));
/// ```
pub fn estimate_range(
    catalog: &VehicleCatalog,
    model: &str,
    battery_pct: f64,
) -> Result<f64, RangeError> {
    if !(0.0..=100.0).contains(&battery_pct) {
        return Err(RangeError::InvalidBatteryLevel(battery_pct));
    }

    let profile = catalog
        .get(model)
        .ok_or_else(|| RangeError::UnknownVehicleModel(model.to_string()))?;

    if battery_pct == 100.0 {
        return Ok(profile.range_km);
    }

    Ok(round2(battery_pct / 100.0 * profile.range_km))
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn half_battery_nexon() {
        let catalog = VehicleCatalog::builtin();
        assert_eq!(estimate_range(&catalog, "Tata Nexon", 50.0), Ok(156.0));
        assert_eq!(estimate_range(&catalog, "Mahindra e2o", 25.0), Ok(35.0));
    }

    #[test]
    fn full_battery_is_full_range() {
        let catalog = VehicleCatalog::builtin();
        for (model, profile) in catalog.iter() {
            assert_eq!(estimate_range(&catalog, model, 100.0), Ok(profile.range_km));
        }
    }

    #[test]
    fn full_battery_keeps_loaded_precision() {
        let catalog =
            VehicleCatalog::from_json_str(r#"{"MG ZS EV": {"range_km": 461.125}}"#).unwrap();

        assert_eq!(estimate_range(&catalog, "MG ZS EV", 100.0), Ok(461.125));
        assert_eq!(estimate_range(&catalog, "MG ZS EV", 50.0), Ok(230.56));
        assert!(estimate_range(&catalog, "MG ZS EV", 99.99).unwrap() <= 461.125);
    }

    #[test]
    fn empty_battery_is_zero() {
        let catalog = VehicleCatalog::builtin();
        assert_eq!(estimate_range(&catalog, "Tata Nexon", 0.0), Ok(0.0));
    }

    #[test]
    fn unknown_model_fails() {
        let catalog = VehicleCatalog::builtin();
        assert_eq!(
            estimate_range(&catalog, "DeLorean", 50.0),
            Err(RangeError::UnknownVehicleModel("DeLorean".to_string()))
        );
    }

    #[test]
    fn battery_out_of_range_fails() {
        let catalog = VehicleCatalog::builtin();
        assert_eq!(
            estimate_range(&catalog, "Tata Nexon", 100.5),
            Err(RangeError::InvalidBatteryLevel(100.5))
        );
        assert_eq!(
            estimate_range(&catalog, "Tata Nexon", -1.0),
            Err(RangeError::InvalidBatteryLevel(-1.0))
        );
        assert!(estimate_range(&catalog, "Tata Nexon", f64::NAN).is_err());
    }

    proptest! {
        #[test]
        fn monotone_in_battery(a in 0.0f64..=100.0, b in 0.0f64..=100.0) {
            let catalog = VehicleCatalog::builtin();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let r_lo = estimate_range(&catalog, "Tata Nexon", lo).unwrap();
            let r_hi = estimate_range(&catalog, "Tata Nexon", hi).unwrap();
            prop_assert!(r_lo <= r_hi);
        }
    }
}
