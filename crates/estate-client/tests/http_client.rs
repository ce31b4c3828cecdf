//! Integration tests for HttpLiveClient.
//!
//! Uses wiremock for HTTP mocking. Covers detail lookups (found / 404 / 5xx),
//! query forwarding, the polygon POST body, and decode failures.

use std::time::Duration;

use estate_client::{ClientConfig, ClientError, HttpLiveClient, LiveClient};
use estate_types::{Coordinate, Coordinates};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_client(mock_server: &MockServer) -> HttpLiveClient {
    let config = ClientConfig::new(mock_server.uri()).with_request_timeout(Duration::from_secs(5));
    HttpLiveClient::new(config).expect("failed to create client")
}

fn chair_json(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "name": "desk chair",
        "description": "comfortable",
        "thumbnail": "/images/chair/1.png",
        "price": 12000,
        "height": 90,
        "width": 50,
        "depth": 50,
        "color": "black",
        "features": "armrest",
        "kind": "office"
    })
}

fn estate_json(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "thumbnail": "/images/estate/1.png",
        "name": "sunny flat",
        "description": "near station",
        "latitude": 35.6,
        "longitude": 139.7,
        "address": "Tokyo",
        "rent": 80000,
        "doorHeight": 200,
        "doorWidth": 90,
        "features": "pets"
    })
}

#[tokio::test]
async fn test_chair_detail_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/chair/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chair_json(42)))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let chair = client
        .chair_detail("42")
        .await
        .expect("request failed")
        .expect("expected Some");

    assert_eq!(chair.id, 42);
    assert_eq!(chair.kind, "office");
}

#[tokio::test]
async fn test_estate_detail_not_found_is_absent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/estate/9999"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.estate_detail("9999").await.expect("request failed");

    assert!(result.is_none(), "expected None for 404");
}

#[tokio::test]
async fn test_server_error_maps_to_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/chair/low_priced"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let err = client.low_priced_chairs().await.unwrap_err();

    assert_eq!(err, ClientError::Status(500));
}

#[tokio::test]
async fn test_search_forwards_query_pairs() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/estate/search"))
        .and(query_param("rentRangeId", "1"))
        .and(query_param("features", "pets ok"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"count": 1, "estates": [estate_json(3)]})),
        )
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let query = vec![
        ("rentRangeId".to_string(), "1".to_string()),
        ("features".to_string(), "pets ok".to_string()),
    ];
    let response = client.search_estates(&query).await.expect("request failed");

    assert_eq!(response.count, 1);
    assert_eq!(response.estates[0].door_width, 90);
}

#[tokio::test]
async fn test_polygon_search_posts_coordinates() {
    let mock_server = MockServer::start().await;

    let polygon = Coordinates {
        coordinates: vec![
            Coordinate {
                latitude: 35.0,
                longitude: 139.0,
            },
            Coordinate {
                latitude: 35.5,
                longitude: 139.5,
            },
            Coordinate {
                latitude: 35.0,
                longitude: 139.5,
            },
        ],
    };

    Mock::given(method("POST"))
        .and(path("/api/estate/nazotte"))
        .and(body_json(&polygon))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"count": 2, "estates": [estate_json(1), estate_json(2)]})),
        )
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let response = client
        .search_estates_in_polygon(&polygon)
        .await
        .expect("request failed");

    assert_eq!(response.estates.len(), 2);
}

#[tokio::test]
async fn test_recommended_estates_uses_chair_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/recommended_estate/17"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"estates": [estate_json(5)]})),
        )
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let response = client
        .recommended_estates_for_chair(17)
        .await
        .expect("request failed")
        .expect("expected Some");

    assert_eq!(response.count, 0);
    assert_eq!(response.estates[0].id, 5);
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/chair/search/condition"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let err = client.chair_search_condition().await.unwrap_err();

    assert!(matches!(err, ClientError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);
    drop(mock_server);

    let err = client.estate_search_condition().await.unwrap_err();

    assert!(matches!(err, ClientError::Transport(_)), "got {err:?}");
}
