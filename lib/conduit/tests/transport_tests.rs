//! Integration tests for `HyperClient` using wiremock.

use std::time::Duration;

use assert2::{check, let_assert};
use conduit::{HyperClient, Method, Request, Transport, TransportError, middleware::LoggingLayer};
use serde::{Deserialize, Serialize};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path, query_param},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct User {
    id: u64,
    name: String,
}

fn url(server: &MockServer, path: &str) -> url::Url {
    url::Url::parse(&format!("{}{path}", server.uri())).expect("url")
}

#[tokio::test]
async fn test_get_request() {
    let mock_server = MockServer::start().await;
    let user = User {
        id: 1,
        name: "Alice".to_string(),
    };

    Mock::given(method("GET"))
        .and(path("/users/1"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&user))
        .mount(&mock_server)
        .await;

    let client = HyperClient::new();
    let request = Request::builder(Method::GET, url(&mock_server, "/users/1"))
        .header("Accept", "application/json")
        .build();

    let response = client.execute(request).await.expect("response");

    check!(response.status() == 200);
    let body: User = conduit::from_json(response.body()).expect("json");
    check!(body == user);
}

#[tokio::test]
async fn test_post_request_with_json_body() {
    let mock_server = MockServer::start().await;
    let input = User {
        id: 0,
        name: "Bob".to_string(),
    };

    Mock::given(method("POST"))
        .and(path("/users"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(&input))
        .respond_with(ResponseTemplate::new(201))
        .mount(&mock_server)
        .await;

    let client = HyperClient::new();
    let request = Request::builder(Method::POST, url(&mock_server, "/users"))
        .json(&input)
        .expect("json body")
        .build();

    let response = client.execute(request).await.expect("response");
    check!(response.status() == 201);
}

#[tokio::test]
async fn test_error_status_is_a_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("nope"))
        .mount(&mock_server)
        .await;

    let client = HyperClient::new();
    let request = Request::builder(Method::GET, url(&mock_server, "/missing")).build();

    let response = client.execute(request).await.expect("response");
    check!(response.status() == 404);
    check!(response.body().as_ref() == b"nope");
}

#[tokio::test]
async fn test_query_parameters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "rust lang"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = HyperClient::new();
    let request = Request::builder(Method::GET, url(&mock_server, "/search"))
        .query("q", "rust lang")
        .build();

    let response = client.execute(request).await.expect("response");
    check!(response.status() == 200);
}

#[tokio::test]
async fn test_response_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/with-headers"))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("set-cookie", "a=1")
                .append_header("set-cookie", "b=2")
                .insert_header("x-request-id", "abc-123"),
        )
        .mount(&mock_server)
        .await;

    let client = HyperClient::new();
    let request = Request::builder(Method::GET, url(&mock_server, "/with-headers")).build();

    let response = client.execute(request).await.expect("response");
    check!(response.header("X-Request-Id") == Some("abc-123"));
    check!(response.header_all("set-cookie").count() == 2);
}

#[tokio::test]
async fn test_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let client = HyperClient::builder()
        .timeout(Duration::from_millis(100))
        .build();
    let request = Request::builder(Method::GET, url(&mock_server, "/slow")).build();

    let result = client.execute(request).await;
    let_assert!(Err(TransportError::Timeout) = result);
}

#[tokio::test]
async fn test_connection_refused_is_connectivity_loss() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = HyperClient::new();
    let target = url::Url::parse(&format!("http://{addr}/")).expect("url");
    let request = Request::builder(Method::GET, target).build();

    let_assert!(Err(err) = client.execute(request).await);
    check!(err.is_connectivity_loss(), "expected connectivity loss, got: {err}");
}

#[tokio::test]
async fn test_logging_layer_keeps_flow() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/logged"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"logged": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HyperClient::builder()
        .layer(LoggingLayer::with_headers())
        .build();
    let request = Request::builder(Method::GET, url(&mock_server, "/logged")).build();

    let response = client.execute(request).await.expect("response");
    check!(response.status() == 200);
}
