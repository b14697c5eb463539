//! Dynamic Client Registration Integration Tests
//!
//! These tests run the complete discovery and registration flow against mock
//! authorization servers.

use oauth_dcr::errors::{DiscoveryError, RegistrationError};
use oauth_dcr::oauth::{DcrOutcome, parse_redirect_uris, run};
use reqwest::Client;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_metadata(server: &MockServer, registration_endpoint: &str) {
    Mock::given(method("GET"))
        .and(path("/.well-known/oauth-authorization-server"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "issuer": server.uri(),
            "authorization_endpoint": format!("{}/oauth/authorize", server.uri()),
            "token_endpoint": format!("{}/oauth/token", server.uri()),
            "registration_endpoint": registration_endpoint,
            "response_types_supported": ["code"],
            "grant_types_supported": ["authorization_code", "refresh_token"]
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_complete_registration_flow() {
    let server = MockServer::start().await;
    let registration_endpoint = format!("{}/oauth/clients/register", server.uri());
    mount_metadata(&server, &registration_endpoint).await;

    Mock::given(method("POST"))
        .and(path("/oauth/clients/register"))
        .and(body_json(json!({
            "client_name": "Test Application",
            "redirect_uris": ["http://localhost:8080/callback", "http://localhost:3000/auth"],
            "grant_types": ["authorization_code"],
            "response_types": ["code"],
            "token_endpoint_auth_method": "client_secret_basic"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "client_id": "abc123",
            "client_secret": "s3cret",
            "client_name": "Test Application",
            "registration_access_token": "rat"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let redirect_uris =
        parse_redirect_uris("http://localhost:8080/callback, http://localhost:3000/auth ,");
    let outcome = run(
        &Client::new(),
        &server.uri(),
        "Test Application",
        redirect_uris.as_slice(),
    )
    .await;

    assert!(outcome.is_success());
    match outcome {
        DcrOutcome::Registered {
            registration_endpoint: endpoint,
            metadata,
            response,
        } => {
            assert_eq!(endpoint, registration_endpoint);
            assert_eq!(metadata.registration_endpoint(), Some(endpoint.as_str()));
            assert_eq!(response.client_id(), Some("abc123"));
            assert_eq!(response.client_secret(), Some("s3cret"));
            assert_eq!(response.get("registration_access_token"), Some(&json!("rat")));
        }
        other => panic!("expected Registered, got {other:?}"),
    }
}

#[tokio::test]
async fn test_structured_rejection() {
    let server = MockServer::start().await;
    mount_metadata(&server, &format!("{}/register", server.uri())).await;

    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_redirect_uri",
            "error_description": "bad uri"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = run(
        &Client::new(),
        &server.uri(),
        "Test Application",
        &["http://localhost:8080/callback"],
    )
    .await;

    match outcome {
        DcrOutcome::RegistrationFailed {
            error:
                RegistrationError::Rejected {
                    status,
                    error,
                    error_description,
                    ..
                },
            ..
        } => {
            assert_eq!(status, 400);
            assert_eq!(error, "invalid_redirect_uri");
            assert_eq!(error_description, "bad uri");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unstructured_rejection() {
    let server = MockServer::start().await;
    mount_metadata(&server, &format!("{}/register", server.uri())).await;

    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(ResponseTemplate::new(400).set_body_string("oops"))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = run(
        &Client::new(),
        &server.uri(),
        "Test Application",
        &["http://localhost:8080/callback"],
    )
    .await;

    match outcome {
        DcrOutcome::RegistrationFailed {
            error: RegistrationError::Unstructured { status, body },
            ..
        } => {
            assert_eq!(status, 400);
            assert_eq!(body, "oops");
        }
        other => panic!("expected Unstructured, got {other:?}"),
    }
}

#[tokio::test]
async fn test_metadata_fetch_error_skips_registration() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/.well-known/oauth-authorization-server"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"client_id": "x"})))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = run(
        &Client::new(),
        &server.uri(),
        "Test Application",
        &["http://localhost:8080/callback"],
    )
    .await;

    match outcome {
        DcrOutcome::DiscoveryFailed(DiscoveryError::MetadataFetch { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("expected MetadataFetch, got {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_refused_skips_registration() {
    let registration_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"client_id": "x"})))
        .expect(0)
        .mount(&registration_server)
        .await;

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let outcome = run(
        &Client::new(),
        &format!("http://{}", address),
        "Test Application",
        &["http://localhost:8080/callback"],
    )
    .await;

    match outcome {
        DcrOutcome::DiscoveryFailed(err) => assert!(err.is_connection(), "got {err:?}"),
        other => panic!("expected DiscoveryFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_no_redirect_uris_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let redirect_uris = parse_redirect_uris(" , ,, ");
    let outcome = run(
        &Client::new(),
        &server.uri(),
        "Test Application",
        redirect_uris.as_slice(),
    )
    .await;

    match outcome {
        DcrOutcome::RegistrationFailed { error, .. } => assert!(error.is_validation()),
        other => panic!("expected validation failure, got {other:?}"),
    }
    assert!(server.received_requests().await.unwrap().is_empty());
}
