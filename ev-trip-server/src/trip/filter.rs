//! Post-merge station filtering.

use serde::Deserialize;

use crate::domain::Station;

/// How a requested connector is compared with a station's connector titles.
///
/// Both comparisons ignore case.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectorMatch {
    Equals(String),
    Contains(String),
}

impl ConnectorMatch {
    fn matches(&self, title: &str) -> bool {
        let title = title.to_lowercase();
        match self {
            ConnectorMatch::Equals(want) => title == want.to_lowercase(),
            ConnectorMatch::Contains(want) => title.contains(&want.to_lowercase()),
        }
    }
}

/// Predicates applied to the merged station list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StationFilter {
    pub connector: Option<ConnectorMatch>,
    pub operational_only: bool,
}

impl StationFilter {
    pub fn operational_only() -> Self {
        Self {
            connector: None,
            operational_only: true,
        }
    }

    pub fn with_connector(mut self, connector: ConnectorMatch) -> Self {
        self.connector = Some(connector);
        self
    }

    /// Whether the filter removes anything at all.
    pub fn is_active(&self) -> bool {
        self.operational_only || self.connector.is_some()
    }

    /// A station with no reported connectors never passes a connector filter.
    pub fn matches(&self, station: &Station) -> bool {
        if self.operational_only && !station.is_operational {
            return false;
        }

        match &self.connector {
            None => true,
            Some(wanted) => station
                .connector_types
                .iter()
                .flatten()
                .any(|title| wanted.matches(title)),
        }
    }

    /// Keep matching stations, preserving order.
    pub fn apply(&self, stations: Vec<Station>) -> Vec<Station> {
        if !self.is_active() {
            return stations;
        }
        stations.into_iter().filter(|s| self.matches(s)).collect()
    }
}
