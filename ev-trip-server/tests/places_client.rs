//! Integration tests for `PlacesClient` using wiremock HTTP mocks.

use ev_trip_server::domain::{LatLng, Source};
use ev_trip_server::poi::{PlacesClient, PlacesConfig, PoiProvider, ProviderError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> PlacesClient {
    PlacesClient::new(PlacesConfig::new("test-key").with_base_url(base_url))
        .expect("client construction should not fail")
}

fn pune() -> LatLng {
    LatLng::new(18.5, 73.8).unwrap()
}

#[tokio::test]
async fn nearby_search_returns_places() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "OK",
        "results": [
            {
                "place_id": "ChIJ-statiq",
                "name": "Statiq Charging Station",
                "vicinity": "FC Road, Pune",
                "geometry": {"location": {"lat": 18.5204, "lng": 73.8412}},
                "rating": 4.2,
                "user_ratings_total": 31,
                "business_status": "OPERATIONAL",
                "types": ["electric_vehicle_charging_station", "point_of_interest"]
            },
            {
                "place_id": "ChIJ-parking",
                "name": "City Parking",
                "geometry": {"location": {"lat": 18.5210, "lng": 73.8420}},
                "types": ["parking"]
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/place/nearbysearch/json"))
        .and(query_param("location", "18.5,73.8"))
        .and(query_param("radius", "5000"))
        .and(query_param("type", "electric_vehicle_charging_station"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let places = client
        .nearby_search(pune(), 5000)
        .await
        .expect("should parse places");

    assert_eq!(places.len(), 2);
    assert_eq!(places[0].place_id, "ChIJ-statiq");
    assert_eq!(places[0].rating, Some(4.2));
    assert_eq!(places[1].name.as_deref(), Some("City Parking"));
}

#[tokio::test]
async fn provider_drops_non_charging_places() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "OK",
        "results": [
            {
                "place_id": "a",
                "name": "Tata Power EZ Charge",
                "geometry": {"location": {"lat": 18.52, "lng": 73.84}},
                "types": ["point_of_interest"]
            },
            {
                "place_id": "b",
                "name": "City Parking",
                "geometry": {"location": {"lat": 18.53, "lng": 73.85}},
                "types": ["parking"]
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/place/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let records = client.nearby(pune(), 5000).await.unwrap();
    let kept: Vec<_> = records.iter().filter(|r| client.accepts(r)).collect();

    assert_eq!(records.len(), 2);
    assert_eq!(kept.len(), 1);
    let station = kept[0].clone().into_station().unwrap();
    assert_eq!(station.id, "a");
    assert_eq!(station.source, Source::Places);
}

#[tokio::test]
async fn zero_results_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/nearbysearch/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"status": "ZERO_RESULTS", "results": []})),
        )
        .mount(&server)
        .await;

    let places = test_client(&server.uri())
        .nearby_search(pune(), 5000)
        .await
        .unwrap();
    assert!(places.is_empty());
}

#[tokio::test]
async fn denied_status_is_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid.",
            "results": []
        })))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .nearby_search(pune(), 5000)
        .await
        .unwrap_err();

    assert!(err.is_transient());
    assert_eq!(err.provider(), Source::Places);
    assert!(err.to_string().contains("REQUEST_DENIED"));
}

#[tokio::test]
async fn http_error_is_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(503).set_body_string("try later"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .nearby_search(pune(), 5000)
        .await
        .unwrap_err();

    match err {
        ProviderError::Unavailable { provider, message } => {
            assert_eq!(provider, Source::Places);
            assert_eq!(message, "HTTP 503: try later");
        }
        other => panic!("expected Unavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_not_transient() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"results\": 7}"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .nearby_search(pune(), 5000)
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Malformed { .. }));
    assert!(!err.is_transient());
}

#[tokio::test]
async fn place_details_parses_result() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "OK",
        "result": {
            "name": "Statiq Charging Station",
            "formatted_address": "FC Road, Shivajinagar, Pune 411005",
            "formatted_phone_number": "020 1234 5678",
            "rating": 4.2,
            "website": "https://statiq.in",
            "opening_hours": {
                "open_now": true,
                "weekday_text": ["Monday: Open 24 hours"]
            },
            "reviews": [
                {
                    "author_name": "Asha",
                    "rating": 5,
                    "text": "Fast and clean.",
                    "relative_time_description": "a month ago"
                }
            ]
        }
    });

    Mock::given(method("GET"))
        .and(path("/place/details/json"))
        .and(query_param("place_id", "ChIJ-statiq"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let details = test_client(&server.uri())
        .place_details("ChIJ-statiq")
        .await
        .unwrap()
        .expect("place should exist");

    assert_eq!(details.name.as_deref(), Some("Statiq Charging Station"));
    assert_eq!(details.formatted_phone_number.as_deref(), Some("020 1234 5678"));
    assert_eq!(details.opening_hours.unwrap().open_now, Some(true));
    assert_eq!(details.reviews.len(), 1);
    assert_eq!(details.reviews[0].author_name.as_deref(), Some("Asha"));
}

#[tokio::test]
async fn unknown_place_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/details/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "NOT_FOUND"})),
        )
        .mount(&server)
        .await;

    let details = test_client(&server.uri())
        .place_details("missing")
        .await
        .unwrap();
    assert!(details.is_none());
}
