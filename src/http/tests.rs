//! Tests for the HTTP client module

use super::*;
use crate::config::{BackoffType, ClientConfig};
use reqwest::Method;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(server: &MockServer) -> ClientConfig {
    ClientConfig::builder()
        .api_endpoint(server.uri())
        .api_key("1/testkey")
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(1),
            Duration::from_millis(1),
        )
        .build()
}

fn url(server: &MockServer, path: &str) -> Url {
    Url::parse(&server.uri()).unwrap().join(path).unwrap()
}

#[test]
fn test_request_config_builder() {
    let config = RequestConfig::new()
        .query("status", "success")
        .query_opt("from", Some("10"))
        .query_opt("to", None::<String>)
        .header("X-Request-Id", "abc123")
        .json(serde_json::json!({"key": "value"}))
        .timeout(Duration::from_secs(10))
        .retries(2);

    assert_eq!(config.query.get("status"), Some(&"success".to_string()));
    assert_eq!(config.query.get("from"), Some(&"10".to_string()));
    assert!(!config.query.contains_key("to"));
    assert_eq!(
        config.headers.get("X-Request-Id"),
        Some(&"abc123".to_string())
    );
    assert!(matches!(config.body, Some(RequestBody::Json(_))));
    assert_eq!(config.timeout, Some(Duration::from_secs(10)));
    assert_eq!(config.max_retries, Some(2));
}

#[tokio::test]
async fn test_get_sends_api_key_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/database/list"))
        .and(header("Authorization", "CS1 1/testkey"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "databases": []
        })))
        .mount(&server)
        .await;

    let client = HttpClient::new(&test_config(&server)).unwrap();
    let body: serde_json::Value = client
        .get_json(url(&server, "/v3/database/list"), RequestConfig::default())
        .await
        .unwrap();

    assert_eq!(body["databases"], serde_json::json!([]));
}

#[tokio::test]
async fn test_query_params_forwarded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/job/list"))
        .and(query_param("status", "running"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"jobs": []})))
        .mount(&server)
        .await;

    let client = HttpClient::new(&test_config(&server)).unwrap();
    let body: serde_json::Value = client
        .get_json(
            url(&server, "/v3/job/list"),
            RequestConfig::new().query("status", "running"),
        )
        .await
        .unwrap();

    assert_eq!(body["jobs"], serde_json::json!([]));
}

#[tokio::test]
async fn test_non_2xx_becomes_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/job/show/9"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"error": "Job 9 does not exist"})),
        )
        .mount(&server)
        .await;

    let client = HttpClient::new(&test_config(&server)).unwrap();
    let err = client
        .request(Method::GET, url(&server, "/v3/job/show/9"), RequestConfig::default())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert!(err.to_string().contains("Job 9 does not exist"));
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/database/list"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": "apikey is invalid"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(&test_config(&server)).unwrap();
    let err = client
        .request(
            Method::GET,
            url(&server, "/v3/database/list"),
            RequestConfig::default(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn test_server_error_retries_then_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/database/list"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v3/database/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"databases": []})))
        .mount(&server)
        .await;

    let client = HttpClient::new(&test_config(&server)).unwrap();
    let response = client
        .request(
            Method::GET,
            url(&server, "/v3/database/list"),
            RequestConfig::default(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_429_honors_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/job/list"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "0")
                .set_body_string("slow down"),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v3/job/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"jobs": []})))
        .mount(&server)
        .await;

    let client = HttpClient::new(&test_config(&server)).unwrap();
    let response = client
        .request(Method::GET, url(&server, "/v3/job/list"), RequestConfig::default())
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_byte_body_upload() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v3/bulk_import/upload_part/session1/part_0"))
        .and(header("Content-Type", "application/octet-stream"))
        .and(body_string("raw-part-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "session1"
        })))
        .mount(&server)
        .await;

    let client = HttpClient::new(&test_config(&server)).unwrap();
    let body: serde_json::Value = client
        .request_json(
            Method::PUT,
            url(&server, "/v3/bulk_import/upload_part/session1/part_0"),
            RequestConfig::new().bytes(&b"raw-part-data"[..]),
        )
        .await
        .unwrap();

    assert_eq!(body["name"], "session1");
}
