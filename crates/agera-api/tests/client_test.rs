#![allow(clippy::unwrap_used)]
// Integration tests for `AgeraClient` and `SkinClient` using wiremock.

use std::time::Duration;

use serde_json::json;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use agera_api::{AgeraClient, Error, SkinClient, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, AgeraClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = AgeraClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

// ── Player endpoints ────────────────────────────────────────────────

#[tokio::test]
async fn test_player_stats() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/player/stats/Steve/BW"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "wins": 10, "kills": 5 }
        })))
        .mount(&server)
        .await;

    let stats = client.player_stats("Steve", "BW").await.unwrap();

    assert_eq!(stats["data"]["wins"], 10);
    assert_eq!(stats["data"]["kills"], 5);
}

#[tokio::test]
async fn test_player_profile() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/player/profile/Alex"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": "Alex",
            "online": true,
            "ranks": [{ "name": "GOLD" }]
        })))
        .mount(&server)
        .await;

    let profile = client.player_profile("Alex").await.unwrap();

    assert_eq!(profile["username"], "Alex");
    assert_eq!(profile["ranks"][0]["name"], "GOLD");
}

#[tokio::test]
async fn test_api_key_header_is_sent() {
    let server = MockServer::start().await;
    let transport = TransportConfig::default().with_api_key("secret-key".to_string().into());
    let client = AgeraClient::new(Url::parse(&server.uri()).unwrap(), &transport).unwrap();

    Mock::given(method("GET"))
        .and(path("/v1/core/online/total"))
        .and(header("X-Api-Key", "secret-key"))
        .and(header("User-Agent", "AgeraPvP-Discord-Bot/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "online": 42 })))
        .expect(1)
        .mount(&server)
        .await;

    let online = client.total_online().await.unwrap();

    assert_eq!(online["online"], 42);
}

// ── Staff endpoints ─────────────────────────────────────────────────

#[tokio::test]
async fn test_staff_online() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/staff/online"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "players": [
                { "displayName": "§cAdmin", "userId": 1 },
                { "displayName": "Helper", "userId": 2 }
            ]
        })))
        .mount(&server)
        .await;

    let staff = client.staff_online().await.unwrap();

    assert_eq!(staff["players"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_staff_stats() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/staff/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalBans": 120,
            "totalMutes": 64
        })))
        .mount(&server)
        .await;

    let stats = client.staff_stats().await.unwrap();

    assert_eq!(stats["totalBans"], 120);
}

// ── Connectivity probe ──────────────────────────────────────────────

#[tokio::test]
async fn test_connection_ok() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/test"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    assert!(client.test_connection().await);
}

#[tokio::test]
async fn test_connection_non_200() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/test"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    assert!(!client.test_connection().await);
}

#[tokio::test]
async fn test_connection_unreachable() {
    // Nothing listens on port 9 (discard) in the test environment.
    let client = AgeraClient::with_client(
        reqwest::Client::new(),
        Url::parse("http://127.0.0.1:9").unwrap(),
    );

    assert!(!client.test_connection().await);
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_success_false_is_rejected() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/player/stats/Ghost/BW"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Игрок не найден"
        })))
        .mount(&server)
        .await;

    let result = client.player_stats("Ghost", "BW").await;

    match result {
        Err(Error::Rejected { ref message }) => assert_eq!(message, "Игрок не найден"),
        other => panic!("expected Rejected error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result = client.staff_stats().await;

    let err = result.unwrap_err();
    assert!(err.is_unreachable());
    match err {
        Error::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected Status error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_json_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/core/online/total"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client.total_online().await;

    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_timeout() {
    let server = MockServer::start().await;
    let transport = TransportConfig::default().with_timeout(Duration::from_millis(100));
    let client = AgeraClient::new(Url::parse(&server.uri()).unwrap(), &transport).unwrap();

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "online": 1 }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let result = client.total_online().await;

    assert!(
        matches!(result, Err(Error::Timeout { .. })),
        "expected Timeout error, got: {result:?}"
    );
}

// ── Skin service ────────────────────────────────────────────────────

#[tokio::test]
async fn test_skin_fetch() {
    let server = MockServer::start().await;
    let skins = SkinClient::with_client(reqwest::Client::new(), Url::parse(&server.uri()).unwrap());

    Mock::given(method("GET"))
        .and(path("/v1/body/Steve/1024"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8, 2, 3]))
        .mount(&server)
        .await;

    let body = skins.fetch_body("Steve").await.unwrap();

    assert_eq!(body.as_deref(), Some(&[1u8, 2, 3][..]));
}

#[tokio::test]
async fn test_skin_missing() {
    let server = MockServer::start().await;
    let skins = SkinClient::with_client(reqwest::Client::new(), Url::parse(&server.uri()).unwrap());

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    assert!(skins.fetch_body("Nobody").await.unwrap().is_none());
}
