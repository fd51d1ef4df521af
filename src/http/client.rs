//! HTTP client with retry and self-throttling
//!
//! Wraps a single `reqwest::Client` shared by every service handle. Retries
//! transient failures with configurable backoff, honors `Retry-After` on
//! 429, and converts non-2xx responses into structured API errors.

use super::rate_limit::RateLimiter;
use crate::auth::Credentials;
use crate::config::{BackoffType, ClientConfig};
use crate::error::{Error, Result};
use bytes::Bytes;
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Body of an outgoing request
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// JSON-serialized body with `Content-Type: application/json`
    Json(Value),
    /// Raw bytes (bulk import part upload)
    Bytes(Bytes),
}

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters
    pub query: HashMap<String, String>,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Request body
    pub body: Option<RequestBody>,
    /// Override timeout for this request
    pub timeout: Option<Duration>,
    /// Override max retries for this request
    pub max_retries: Option<u32>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add a query parameter if the value is present
    #[must_use]
    pub fn query_opt(self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.query(key, v),
            None => self,
        }
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    /// Set raw byte body
    #[must_use]
    pub fn bytes(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(RequestBody::Bytes(body.into()));
        self
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set max retries
    #[must_use]
    pub fn retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }
}

/// Shared HTTP client
pub struct HttpClient {
    client: Client,
    credentials: Credentials,
    timeout: Duration,
    max_retries: u32,
    initial_backoff: Duration,
    max_backoff: Duration,
    backoff_type: BackoffType,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Create a client from a [`ClientConfig`]
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            credentials: config.credentials.clone(),
            timeout: config.timeout,
            max_retries: config.max_retries,
            initial_backoff: config.initial_backoff,
            max_backoff: config.max_backoff,
            backoff_type: config.backoff_type,
            rate_limiter: config.requests_per_second.map(RateLimiter::per_second),
        })
    }

    /// Whether self-throttling is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// Send a request, retrying transient failures
    ///
    /// Returns the raw 2xx response; every non-2xx outcome becomes an error.
    pub async fn request(&self, method: Method, url: Url, config: RequestConfig) -> Result<Response> {
        let max_retries = config.max_retries.unwrap_or(self.max_retries);
        let timeout = config.timeout.unwrap_or(self.timeout);

        let mut last_error = None;
        let mut attempt = 0;

        while attempt <= max_retries {
            if let Some(ref limiter) = self.rate_limiter {
                limiter.wait().await;
            }

            let mut req = self.client.request(method.clone(), url.clone());

            for (key, value) in &config.headers {
                req = req.header(key.as_str(), value.as_str());
            }
            if !config.query.is_empty() {
                req = req.query(&config.query);
            }
            match &config.body {
                Some(RequestBody::Json(body)) => req = req.json(body),
                Some(RequestBody::Bytes(body)) => {
                    req = req
                        .header("Content-Type", "application/octet-stream")
                        .body(body.clone());
                }
                None => {}
            }
            req = req.timeout(timeout);
            req = self.credentials.apply(req);

            match req.send().await {
                Ok(response) => {
                    let status = response.status();

                    if status == StatusCode::TOO_MANY_REQUESTS {
                        let retry_after = extract_retry_after(&response);
                        if attempt < max_retries {
                            warn!(
                                "Rate limited (429), attempt {}/{}, waiting {}s",
                                attempt + 1,
                                max_retries + 1,
                                retry_after
                            );
                            tokio::time::sleep(Duration::from_secs(retry_after)).await;
                            attempt += 1;
                            continue;
                        }
                        return Err(Error::RateLimited {
                            retry_after_seconds: retry_after,
                        });
                    }

                    if status.is_server_error() && attempt < max_retries {
                        let delay = self.calculate_backoff(attempt);
                        warn!(
                            "Request failed with {}, attempt {}/{}, retrying in {:?}",
                            status.as_u16(),
                            attempt + 1,
                            max_retries + 1,
                            delay
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        last_error = Some(Error::api(status.as_u16(), String::new()));
                        continue;
                    }

                    if !status.is_success() {
                        let body = response.text().await.unwrap_or_default();
                        return Err(parse_api_error(status.as_u16(), &body));
                    }

                    debug!("Request succeeded: {} {}", method, url);
                    return Ok(response);
                }
                Err(e) => {
                    if e.is_timeout() {
                        if attempt < max_retries {
                            let delay = self.calculate_backoff(attempt);
                            warn!(
                                "Request timeout, attempt {}/{}, retrying in {:?}",
                                attempt + 1,
                                max_retries + 1,
                                delay
                            );
                            tokio::time::sleep(delay).await;
                            attempt += 1;
                            last_error = Some(Error::Timeout {
                                timeout_ms: timeout.as_millis() as u64,
                            });
                            continue;
                        }
                        return Err(Error::Timeout {
                            timeout_ms: timeout.as_millis() as u64,
                        });
                    }

                    if e.is_connect() && attempt < max_retries {
                        let delay = self.calculate_backoff(attempt);
                        warn!(
                            "Connection error, attempt {}/{}, retrying in {:?}",
                            attempt + 1,
                            max_retries + 1,
                            delay
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        last_error = Some(Error::Http(e));
                        continue;
                    }

                    return Err(Error::Http(e));
                }
            }
        }

        Err(last_error.unwrap_or(Error::MaxRetriesExceeded { max_retries }))
    }

    /// Send a request and decode the JSON response body
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        config: RequestConfig,
    ) -> Result<T> {
        let response = self.request(method, url, config).await?;
        let body = response.json::<T>().await?;
        Ok(body)
    }

    /// GET and decode JSON
    pub async fn get_json<T: DeserializeOwned>(&self, url: Url, config: RequestConfig) -> Result<T> {
        self.request_json(Method::GET, url, config).await
    }

    /// POST and decode JSON
    pub async fn post_json<T: DeserializeOwned>(
        &self,
        url: Url,
        config: RequestConfig,
    ) -> Result<T> {
        self.request_json(Method::POST, url, config).await
    }

    /// Send a request whose body the caller will consume as a byte stream
    ///
    /// Status handling and retry are identical to [`Self::request`]; only
    /// body consumption differs, so streamed downloads get the same envelope
    /// treatment as everything else.
    pub async fn request_stream(
        &self,
        method: Method,
        url: Url,
        config: RequestConfig,
    ) -> Result<Response> {
        self.request(method, url, config).await
    }

    /// Calculate backoff delay for a given attempt
    fn calculate_backoff(&self, attempt: u32) -> Duration {
        let delay = match self.backoff_type {
            BackoffType::Constant => self.initial_backoff,
            BackoffType::Linear => self.initial_backoff * (attempt + 1),
            BackoffType::Exponential => {
                let factor = 2u32.saturating_pow(attempt);
                self.initial_backoff * factor
            }
        };

        std::cmp::min(delay, self.max_backoff)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("credentials", &self.credentials)
            .field("max_retries", &self.max_retries)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

/// Parse the platform's error envelope out of a non-2xx body
///
/// Core endpoints answer `{"error": "...", "text": "..."}`; the CDP and
/// workflow surfaces answer `{"message": "..."}`. Anything unparseable is
/// carried as the raw body text.
fn parse_api_error(status: u16, body: &str) -> Error {
    #[derive(serde::Deserialize)]
    struct ErrorEnvelope {
        error: Option<String>,
        message: Option<String>,
        text: Option<String>,
    }

    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error.or(envelope.message).or(envelope.text))
        .unwrap_or_else(|| body.to_string());

    Error::api(status, message)
}

/// Extract retry-after header value
fn extract_retry_after(response: &Response) -> u64 {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok())
        .unwrap_or(60)
}
