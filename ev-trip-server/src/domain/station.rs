//! Canonical charging station and its deduplication identity.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use super::LatLng;

/// Decimal places kept when quantizing station coordinates for dedup.
///
/// Three places gives a grid of roughly 111 m.
pub const DEDUP_PRECISION: i32 = 3;

/// Which POI provider contributed a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Places-style search (nearby places tagged as EV charging).
    Places,
    /// Open charging-station registry.
    Registry,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Places => "places",
            Source::Registry => "registry",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity used to decide whether two records are the same physical station.
///
/// Coordinates are quantized to [`DEDUP_PRECISION`] decimals. When `source`
/// is `Some`, records from different providers never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DedupKey {
    lat_q: i64,
    lng_q: i64,
    source: Option<Source>,
}

impl DedupKey {
    /// Key for a position, optionally scoped to one provider.
    pub fn new(position: LatLng, source: Option<Source>) -> Self {
        let (lat_q, lng_q) = position.quantize(DEDUP_PRECISION);
        Self {
            lat_q,
            lng_q,
            source,
        }
    }

    pub fn source(&self) -> Option<Source> {
        self.source
    }

    /// The same bucket with the provider discriminator dropped.
    pub fn without_source(self) -> Self {
        Self {
            source: None,
            ..self
        }
    }
}

impl fmt::Display for DedupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scale = 10f64.powi(DEDUP_PRECISION);
        let prec = DEDUP_PRECISION as usize;
        write!(
            f,
            "{:.prec$},{:.prec$}",
            self.lat_q as f64 / scale,
            self.lng_q as f64 / scale
        )?;
        if let Some(source) = self.source {
            write!(f, "@{source}")?;
        }
        Ok(())
    }
}

/// A charging station in canonical form.
///
/// Optional fields are `None` when the contributing provider has no such
/// concept; they are never filled with placeholder values.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// Derived identity; unique within one aggregation result.
    pub dedup_key: DedupKey,

    /// Provider-native identifier.
    pub id: String,

    pub name: String,

    pub address: String,

    pub position: LatLng,

    pub source: Source,

    /// Average user rating (places-style providers only).
    pub rating: Option<f64>,

    /// Number of ratings behind `rating`.
    pub user_ratings_total: Option<u32>,

    /// Highest connector power in kW.
    pub power_kw: Option<f64>,

    /// Connector type titles. `None` means the provider did not report any.
    pub connector_types: Option<BTreeSet<String>>,

    pub is_operational: bool,

    /// Haversine distance to the nearest queried sample point, filled in
    /// after merging.
    pub distance_from_route_km: Option<f64>,
}

impl Station {
    /// Create a station with only the fields every provider supplies.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        position: LatLng,
        source: Source,
    ) -> Self {
        Self {
            dedup_key: DedupKey::new(position, Some(source)),
            id: id.into(),
            name: name.into(),
            address: address.into(),
            position,
            source,
            rating: None,
            user_ratings_total: None,
            power_kw: None,
            connector_types: None,
            is_operational: true,
            distance_from_route_km: None,
        }
    }

    /// Whether the station reports at least one connector type.
    pub fn has_connectors(&self) -> bool {
        self.connector_types.as_ref().is_some_and(|c| !c.is_empty())
    }

    /// Fill fields this station lacks from a duplicate record.
    ///
    /// `rating` and `is_operational` are never taken from the duplicate.
    pub fn absorb(&mut self, other: Station) {
        if self.power_kw.is_none() {
            self.power_kw = other.power_kw;
        }
        if !self.has_connectors() && other.has_connectors() {
            self.connector_types = other.connector_types;
        }
        if self.user_ratings_total.is_none() {
            self.user_ratings_total = other.user_ratings_total;
        }
        if self.distance_from_route_km.is_none() {
            self.distance_from_route_km = other.distance_from_route_km;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(lat: f64, lng: f64) -> LatLng {
        LatLng::new(lat, lng).unwrap()
    }

    #[test]
    fn key_collides_within_grid_cell() {
        let a = DedupKey::new(pt(18.52041, 73.85671), Some(Source::Places));
        let b = DedupKey::new(pt(18.52009, 73.85699), Some(Source::Places));
        assert_eq!(a, b);
    }

    #[test]
    fn key_separates_sources() {
        let a = DedupKey::new(pt(18.5204, 73.8567), Some(Source::Places));
        let b = DedupKey::new(pt(18.5204, 73.8567), Some(Source::Registry));
        assert_ne!(a, b);
        assert_eq!(a.without_source(), b.without_source());
    }

    #[test]
    fn key_display() {
        let key = DedupKey::new(pt(18.5204, 73.8567), Some(Source::Registry));
        assert_eq!(key.to_string(), "18.520,73.857@registry");
        assert_eq!(key.without_source().to_string(), "18.520,73.857");
    }

    #[test]
    fn source_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(Source::Registry).unwrap(),
            serde_json::json!("registry")
        );
    }

    #[test]
    fn absorb_fills_missing_fields_only() {
        let mut base = Station::new("a", "A", "addr", pt(1.0, 1.0), Source::Places);
        base.rating = Some(4.5);
        base.is_operational = false;

        let mut dup = Station::new("b", "B", "addr", pt(1.0, 1.0), Source::Places);
        dup.rating = Some(1.0);
        dup.is_operational = true;
        dup.power_kw = Some(50.0);
        dup.connector_types = Some(BTreeSet::from(["CCS2".to_string()]));

        base.absorb(dup);

        assert_eq!(base.id, "a");
        assert_eq!(base.rating, Some(4.5));
        assert!(!base.is_operational);
        assert_eq!(base.power_kw, Some(50.0));
        assert!(base.has_connectors());
    }

    #[test]
    fn absorb_keeps_existing_values() {
        let mut base = Station::new("a", "A", "addr", pt(1.0, 1.0), Source::Registry);
        base.power_kw = Some(22.0);
        base.connector_types = Some(BTreeSet::from(["Type 2".to_string()]));

        let mut dup = base.clone();
        dup.power_kw = Some(150.0);
        dup.connector_types = Some(BTreeSet::from(["CHAdeMO".to_string()]));

        base.absorb(dup);
        assert_eq!(base.power_kw, Some(22.0));
        assert_eq!(
            base.connector_types,
            Some(BTreeSet::from(["Type 2".to_string()]))
        );
    }

    #[test]
    fn empty_connector_set_is_replaced() {
        let mut base = Station::new("a", "A", "addr", pt(1.0, 1.0), Source::Registry);
        base.connector_types = Some(BTreeSet::new());
        assert!(!base.has_connectors());

        let mut dup = base.clone();
        dup.connector_types = Some(BTreeSet::from(["CCS2".to_string()]));
        base.absorb(dup);
        assert!(base.has_connectors());
    }
}
