use client_core::config::ServerConfig;
use client_core::error::gateway::GatewayError;
use client_core::gateway::HttpGateway;

use common::{HttpStatusCode, RedactedToken};
use models::{NewStation, Station};

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway_for(server: &MockServer, max_retries: u32) -> HttpGateway {
    let config = ServerConfig {
        api_endpoint: server.uri(),
        request_timeout_secs: 5,
        max_retries,
        retry_initial_interval_ms: 10,
    };
    HttpGateway::new(&config).expect("Failed to build gateway")
}

/// **VALUE**: Verifies the access token travels as a bearer Authorization header.
///
/// **WHY THIS MATTERS**: Every collection fetch after sign-in depends on it.
///
/// **BUG THIS CATCHES**: Would catch a missing "Bearer " prefix or the token
/// being sent redacted.
#[tokio::test]
async fn given_token_when_fetching_then_bearer_header_sent() {
    // GIVEN: A server that only answers authorized requests
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stations"))
        .and(header("Authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Gangnam" }
        ])))
        .expect(1)
        .mount(&server)
        .await;
    let gateway = gateway_for(&server, 0);
    let token = RedactedToken::new("secret-token");

    // WHEN: Fetching with the token
    let stations: Vec<Station> = gateway.get("/stations", Some(&token)).await.unwrap();

    // THEN: The authorized response is decoded
    assert_eq!(stations.len(), 1);
    assert_eq!(stations[0].name, "Gangnam");
}

/// **VALUE**: Verifies rejected requests carry the server's status and message.
///
/// **BUG THIS CATCHES**: Would catch error bodies being dropped, leaving the
/// user with a generic alert for a specific problem like a duplicate name.
#[tokio::test]
async fn given_rejected_post_when_creating_then_status_error_with_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/stations"))
        .and(body_json(json!({ "name": "Gangnam" })))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "Duplicate station name" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    let gateway = gateway_for(&server, 2);
    let body = NewStation {
        name: "Gangnam".to_string(),
    };

    let error = gateway
        .post::<_, Station>("/stations", &body, None)
        .await
        .unwrap_err();

    assert_eq!(error.status(), Some(HttpStatusCode::BAD_REQUEST));
    assert_eq!(error.message(), "Duplicate station name");
    assert!(matches!(error, GatewayError::Status { .. }));
}

#[tokio::test]
async fn given_plain_text_error_body_when_deleting_then_body_becomes_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/lines/9"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such line"))
        .mount(&server)
        .await;
    let gateway = gateway_for(&server, 0);

    let error = gateway.delete("/lines/9", None).await.unwrap_err();

    assert_eq!(error.status(), Some(HttpStatusCode(404)));
    assert_eq!(error.message(), "no such line");
}

/// **VALUE**: Verifies transient failures on reads are retried with backoff.
///
/// **WHY THIS MATTERS**: A backend restart should not blank the lines page.
///
/// **BUG THIS CATCHES**: Would catch the retry loop giving up after the first
/// 503 or retrying forever.
#[tokio::test]
async fn given_transient_503_when_fetching_then_retried_until_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lines"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/lines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    let gateway = gateway_for(&server, 2);

    let lines: Vec<models::Line> = gateway.get("/lines", None).await.unwrap();

    assert!(lines.is_empty());
}

/// **VALUE**: Verifies mutations are never retried.
///
/// **BUG THIS CATCHES**: Would catch a retried POST creating the same line twice.
#[tokio::test]
async fn given_transient_503_when_posting_then_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/lines"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    let gateway = gateway_for(&server, 3);

    let result = gateway
        .post::<_, models::Line>("/lines", &json!({ "name": "Line 1" }), None)
        .await;

    assert_eq!(result.unwrap_err().status(), Some(HttpStatusCode(503)));
}

#[test]
fn given_endpoint_with_path_prefix_when_building_then_prefix_kept() {
    let config = ServerConfig {
        api_endpoint: "http://localhost:8080/api".to_string(),
        ..ServerConfig::default()
    };

    let gateway = HttpGateway::new(&config).unwrap();

    assert_eq!(gateway.base_url().as_str(), "http://localhost:8080/api/");
}
