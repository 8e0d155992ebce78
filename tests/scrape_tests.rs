//! Integration tests for the scrape pipeline
//!
//! These tests use wiremock to stand in for the scraping backend and
//! exercise the full pipeline end-to-end: liveness probe, scrape call,
//! and response decoding.

use scrape_relay::backend::{build_http_client, run_scrape, scrape};
use scrape_relay::config::BackendConfig;
use scrape_relay::outcome::{FailureKind, Link, ScrapeOutcome, ScrapeResult};
use scrape_relay::request::{validate, DepthPolicy, ScrapeRequest};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a backend config pointing at the mock server
fn backend_config(base_url: &str, probe_liveness: bool) -> BackendConfig {
    BackendConfig {
        base_url: base_url.to_string(),
        probe_liveness,
        ..BackendConfig::default()
    }
}

fn request(url: &str, depth: u8) -> ScrapeRequest {
    ScrapeRequest {
        url: url.to_string(),
        depth,
    }
}

/// Mounts a healthy /health endpoint with the backend's usual payload
async fn mount_healthy_probe(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "healthy",
            "service": "web-scraper-backend",
            "timestamp": 1704067200
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_probe_failure_short_circuits() {
    let mock_server = MockServer::start().await;

    // Backend is "sleeping": health answers 503
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    // The scrape endpoint must never be hit
    Mock::given(method("GET"))
        .and(path("/scrape"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = backend_config(&mock_server.uri(), true);
    let client = build_http_client(&config).expect("Failed to build client");
    let req = request("https://example.com", 1);

    let outcome = run_scrape(&client, &config, &req).await;

    match outcome {
        ScrapeOutcome::Failure {
            url,
            depth,
            kind,
            message,
        } => {
            assert_eq!(kind, FailureKind::BackendUnavailable);
            assert_eq!(url, "https://example.com");
            assert_eq!(depth, 1);
            assert!(message.contains("sleeping"), "unexpected message: {}", message);
        }
        other => panic!("Expected BackendUnavailable failure, got {:?}", other),
    }

    // Wiremock verifies the expect(0) on drop
}

#[tokio::test]
async fn test_successful_scrape_decodes_result() {
    let mock_server = MockServer::start().await;
    mount_healthy_probe(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/scrape"))
        .and(query_param("url", "https://example.com"))
        .and(query_param("depth", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "title": "Example Domain",
            "rawHtml": "<html><body>Example</body></html>",
            "markdown": "# Example Domain\n\nThis domain is for use in examples.",
            "links": [
                {"text": "More information...", "href": "https://www.iana.org/domains/example"}
            ],
            "warnings": ["depth limited to reachable pages"],
            "fetchedAt": "2024-01-01T00:00:00Z"
        })))
        .mount(&mock_server)
        .await;

    let config = backend_config(&mock_server.uri(), true);
    let client = build_http_client(&config).expect("Failed to build client");
    let req = request("https://example.com", 2);

    let outcome = run_scrape(&client, &config, &req).await;

    let expected = ScrapeResult {
        title: "Example Domain".to_string(),
        markdown: "# Example Domain\n\nThis domain is for use in examples.".to_string(),
        links: vec![Link {
            text: "More information...".to_string(),
            href: "https://www.iana.org/domains/example".to_string(),
        }],
        raw_html: Some("<html><body>Example</body></html>".to_string()),
        warnings: Some(vec!["depth limited to reachable pages".to_string()]),
        fetched_at: "2024-01-01T00:00:00Z".to_string(),
    };

    match outcome {
        ScrapeOutcome::Success { url, depth, result } => {
            assert_eq!(url, "https://example.com");
            assert_eq!(depth, 2);
            assert_eq!(result, expected);
        }
        other => panic!("Expected success, got {:?}", other),
    }
}

#[tokio::test]
async fn test_backend_error_message_is_extracted() {
    let mock_server = MockServer::start().await;
    mount_healthy_probe(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/scrape"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({"error": "rate limited"})),
        )
        .mount(&mock_server)
        .await;

    let config = backend_config(&mock_server.uri(), true);
    let client = build_http_client(&config).expect("Failed to build client");
    let req = request("https://example.com", 1);

    let outcome = run_scrape(&client, &config, &req).await;

    match outcome {
        ScrapeOutcome::Failure { kind, message, .. } => {
            assert_eq!(kind, FailureKind::BackendRequestFailed);
            assert_eq!(message, "rate limited");
        }
        other => panic!("Expected BackendRequestFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_envelope_prefers_message_field() {
    let mock_server = MockServer::start().await;
    mount_healthy_probe(&mock_server).await;

    // The backend's full envelope carries both an error type and a message
    Mock::given(method("GET"))
        .and(path("/scrape"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "invalid_depth",
            "message": "Depth must be a positive integer"
        })))
        .mount(&mock_server)
        .await;

    let config = backend_config(&mock_server.uri(), true);
    let client = build_http_client(&config).expect("Failed to build client");
    let req = request("https://example.com", 1);

    let outcome = run_scrape(&client, &config, &req).await;

    match outcome {
        ScrapeOutcome::Failure { kind, message, .. } => {
            assert_eq!(kind, FailureKind::BackendRequestFailed);
            assert_eq!(message, "Depth must be a positive integer");
        }
        other => panic!("Expected BackendRequestFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_error_body_falls_back_to_status_line() {
    let mock_server = MockServer::start().await;
    mount_healthy_probe(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/scrape"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>upstream died</html>"))
        .mount(&mock_server)
        .await;

    let config = backend_config(&mock_server.uri(), true);
    let client = build_http_client(&config).expect("Failed to build client");
    let req = request("https://example.com", 1);

    let outcome = run_scrape(&client, &config, &req).await;

    match outcome {
        ScrapeOutcome::Failure { kind, message, .. } => {
            assert_eq!(kind, FailureKind::BackendRequestFailed);
            assert_eq!(message, "HTTP 502: Bad Gateway");
        }
        other => panic!("Expected BackendRequestFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unparsable_success_body() {
    let mock_server = MockServer::start().await;
    mount_healthy_probe(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/scrape"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let config = backend_config(&mock_server.uri(), true);
    let client = build_http_client(&config).expect("Failed to build client");
    let req = request("https://example.com", 1);

    let outcome = run_scrape(&client, &config, &req).await;

    match outcome {
        ScrapeOutcome::Failure { kind, message, .. } => {
            assert_eq!(kind, FailureKind::InvalidResponseBody);
            assert_eq!(message, "could not parse response");
        }
        other => panic!("Expected InvalidResponseBody, got {:?}", other),
    }
}

#[tokio::test]
async fn test_disabled_probe_issues_no_health_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/scrape"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "title": "T",
            "markdown": "M",
            "links": [],
            "fetchedAt": "2024-01-01T00:00:00Z"
        })))
        .mount(&mock_server)
        .await;

    let config = backend_config(&mock_server.uri(), false);
    let client = build_http_client(&config).expect("Failed to build client");
    let req = request("https://example.com", 1);

    let outcome = run_scrape(&client, &config, &req).await;
    assert!(outcome.is_success(), "Expected success, got {:?}", outcome);
}

#[tokio::test]
async fn test_transport_failure_maps_to_network_error() {
    // Port 1 is never listening, so the connection is refused immediately
    let config = backend_config("http://127.0.0.1:1", false);
    let client = build_http_client(&config).expect("Failed to build client");
    let req = request("https://example.com", 1);

    let outcome = run_scrape(&client, &config, &req).await;

    match outcome {
        ScrapeOutcome::Failure { kind, .. } => {
            assert_eq!(kind, FailureKind::NetworkError);
        }
        other => panic!("Expected NetworkError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_identical_requests_yield_identical_outcomes() {
    let mock_server = MockServer::start().await;
    mount_healthy_probe(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/scrape"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "title": "T",
            "markdown": "M",
            "links": [{"text": "a", "href": "https://example.com/a"}],
            "fetchedAt": "2024-01-01T00:00:00Z"
        })))
        .mount(&mock_server)
        .await;

    let config = backend_config(&mock_server.uri(), true);
    let client = build_http_client(&config).expect("Failed to build client");
    let req = request("https://example.com", 3);

    let first = run_scrape(&client, &config, &req).await;
    let second = run_scrape(&client, &config, &req).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_query_parameters_are_encoded() {
    let mock_server = MockServer::start().await;

    // wiremock matches against the decoded parameter value, so this only
    // passes if reqwest url-encoded the submitted URL on the wire
    Mock::given(method("GET"))
        .and(path("/scrape"))
        .and(query_param("url", "https://example.com/search?q=rust lang"))
        .and(query_param("depth", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "title": "T",
            "markdown": "M",
            "links": [],
            "fetchedAt": "2024-01-01T00:00:00Z"
        })))
        .mount(&mock_server)
        .await;

    let config = backend_config(&mock_server.uri(), false);
    let client = build_http_client(&config).expect("Failed to build client");
    let req = request("https://example.com/search?q=rust lang", 1);

    let outcome = run_scrape(&client, &config, &req).await;
    assert!(outcome.is_success(), "Expected success, got {:?}", outcome);
}

#[tokio::test]
async fn test_validated_input_through_convenience_entry_point() {
    let mock_server = MockServer::start().await;
    mount_healthy_probe(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/scrape"))
        .and(query_param("depth", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "title": "T",
            "markdown": "M",
            "links": [],
            "fetchedAt": "2024-01-01T00:00:00Z"
        })))
        .mount(&mock_server)
        .await;

    let config = backend_config(&mock_server.uri(), true);

    // Raw form input with a string depth, as submitted by a user
    let req = validate("https://example.com", Some("2"), DepthPolicy::Strict)
        .expect("Input should validate");

    let outcome = scrape(&config, &req).await.expect("Failed to build client");

    assert!(outcome.is_success());
    assert_eq!(outcome.url(), "https://example.com");
    assert_eq!(outcome.depth(), 2);
}
