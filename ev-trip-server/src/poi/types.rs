//! POI provider response DTOs.
//!
//! Two unrelated schemas live here: the places-style search (snake_case,
//! status envelope) and the open charging registry (PascalCase, bare array).

use serde::Deserialize;

// ============================================================================
// Places-style provider
// ============================================================================

/// Response from the nearby search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct NearbySearchResponse {
    /// `"OK"`, `"ZERO_RESULTS"`, or an error status.
    pub status: String,

    #[serde(default)]
    pub results: Vec<Place>,

    pub error_message: Option<String>,

    pub next_page_token: Option<String>,
}

/// A place returned by nearby search.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Place {
    pub place_id: String,

    pub name: Option<String>,

    /// Short address, e.g. "MG Road, Pune".
    pub vicinity: Option<String>,

    pub geometry: Option<Geometry>,

    pub rating: Option<f64>,

    pub user_ratings_total: Option<u32>,

    /// `"OPERATIONAL"`, `"CLOSED_TEMPORARILY"` or `"CLOSED_PERMANENTLY"`.
    /// Absent for places that have never reported a status.
    pub business_status: Option<String>,

    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Geometry {
    pub location: PlaceLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PlaceLocation {
    pub lat: f64,
    pub lng: f64,
}

/// Response from the place details endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceDetailsResponse {
    pub status: String,
    pub result: Option<PlaceDetails>,
    pub error_message: Option<String>,
}

/// Extended information about a single place.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceDetails {
    pub name: Option<String>,
    pub formatted_address: Option<String>,
    pub formatted_phone_number: Option<String>,
    pub rating: Option<f64>,
    pub website: Option<String>,
    pub opening_hours: Option<OpeningHours>,
    #[serde(default)]
    pub reviews: Vec<PlaceReview>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpeningHours {
    pub open_now: Option<bool>,
    /// One line per day, e.g. "Monday: 8:00 AM – 10:00 PM".
    #[serde(default)]
    pub weekday_text: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceReview {
    pub author_name: Option<String>,
    pub rating: Option<f64>,
    pub text: Option<String>,
    pub relative_time_description: Option<String>,
}

// ============================================================================
// Open charging registry
// ============================================================================

/// A charging site in the registry. The endpoint returns a bare array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegistryPoi {
    #[serde(rename = "ID")]
    pub id: i64,

    pub address_info: Option<AddressInfo>,

    pub connections: Option<Vec<Connection>>,

    pub status_type: Option<StatusType>,

    pub number_of_points: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddressInfo {
    pub title: Option<String>,
    pub address_line1: Option<String>,
    pub town: Option<String>,
    pub state_or_province: Option<String>,
    pub postcode: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// One connector (or group of identical connectors) at a site.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Connection {
    pub connection_type: Option<ConnectionType>,

    #[serde(rename = "PowerKW")]
    pub power_kw: Option<f64>,

    pub quantity: Option<u32>,

    pub status_type: Option<StatusType>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConnectionType {
    #[serde(rename = "ID")]
    pub id: Option<i64>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatusType {
    pub is_operational: Option<bool>,
    pub title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_nearby_search() {
        let json = r#"{
            "status": "OK",
            "results": [{
                "place_id": "ChIJ123",
                "name": "Tata Power EZ Charge",
                "vicinity": "Baner Road, Pune",
                "geometry": {"location": {"lat": 18.559, "lng": 73.786}},
                "rating": 4.2,
                "user_ratings_total": 31,
                "business_status": "OPERATIONAL",
                "types": ["electric_vehicle_charging_station", "point_of_interest"]
            }]
        }"#;

        let response: NearbySearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.status, "OK");
        let place = &response.results[0];
        assert_eq!(place.place_id, "ChIJ123");
        assert_eq!(place.geometry.as_ref().unwrap().location.lat, 18.559);
        assert_eq!(place.user_ratings_total, Some(31));
        assert_eq!(place.types.len(), 2);
    }

    #[test]
    fn deserialize_registry_poi() {
        let json = r#"[{
            "ID": 98765,
            "AddressInfo": {
                "Title": "Highway Charging Hub",
                "AddressLine1": "NH48",
                "Town": "Lonavala",
                "StateOrProvince": "Maharashtra",
                "Postcode": "410401",
                "Latitude": 18.7546,
                "Longitude": 73.4062
            },
            "Connections": [
                {"ConnectionType": {"ID": 33, "Title": "CCS (Type 2)"}, "PowerKW": 60.0, "Quantity": 2},
                {"ConnectionType": {"ID": 2, "Title": "CHAdeMO"}, "PowerKW": 50.0}
            ],
            "StatusType": {"IsOperational": true, "Title": "Operational"},
            "NumberOfPoints": 3
        }]"#;

        let pois: Vec<RegistryPoi> = serde_json::from_str(json).unwrap();
        let poi = &pois[0];
        assert_eq!(poi.id, 98765);
        let address = poi.address_info.as_ref().unwrap();
        assert_eq!(address.address_line1.as_deref(), Some("NH48"));
        assert_eq!(address.state_or_province.as_deref(), Some("Maharashtra"));
        let connections = poi.connections.as_ref().unwrap();
        assert_eq!(connections[0].power_kw, Some(60.0));
        assert_eq!(
            connections[1].connection_type.as_ref().unwrap().title.as_deref(),
            Some("CHAdeMO")
        );
        assert_eq!(poi.status_type.as_ref().unwrap().is_operational, Some(true));
    }

    #[test]
    fn registry_nulls_are_none() {
        let json = r#"{"ID": 1, "AddressInfo": null, "Connections": null, "StatusType": null}"#;
        let poi: RegistryPoi = serde_json::from_str(json).unwrap();
        assert!(poi.address_info.is_none());
        assert!(poi.connections.is_none());
    }
}
