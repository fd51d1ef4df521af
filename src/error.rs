//! Error types for the Cascata client
//!
//! All public APIs return `Result<T, Error>` where Error is defined here.

use bytes::Bytes;
use thiserror::Error;

/// The main error type for the Cascata client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing API key (set CASCATA_API_KEY or pass --apikey)")]
    MissingApiKey,

    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid {kind} name '{name}': must match [a-z0-9_]{{3,255}}")]
    InvalidName { kind: &'static str, name: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited, retry after {retry_after_seconds}s")]
    RateLimited { retry_after_seconds: u64 },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Max retries ({max_retries}) exceeded")]
    MaxRetriesExceeded { max_retries: u32 },

    // ============================================================================
    // Decode Errors
    // ============================================================================
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Field '{field}' has unexpected {kind} value")]
    MalformedField { field: String, kind: &'static str },

    #[error("'{value}' is neither an epoch timestamp nor RFC3339")]
    MalformedTimestamp { value: String },

    #[error("Result line is not valid JSON: {source}")]
    ResultDecode {
        /// The offending line, verbatim
        line: Bytes,
        #[source]
        source: serde_json::Error,
    },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an API error from a status code and message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a malformed-field error
    pub fn malformed_field(field: impl Into<String>, kind: &'static str) -> Self {
        Self::MalformedField {
            field: field.into(),
            kind,
        }
    }

    /// Create a malformed-timestamp error
    pub fn malformed_timestamp(value: impl Into<String>) -> Self {
        Self::MalformedTimestamp {
            value: value.into(),
        }
    }

    /// Create a result-line decode error
    pub fn result_decode(line: impl Into<Bytes>, source: serde_json::Error) -> Self {
        Self::ResultDecode {
            line: line.into(),
            source,
        }
    }

    /// HTTP status carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this error is retryable at the transport level
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(_) | Error::RateLimited { .. } | Error::Timeout { .. } => true,
            Error::Api { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Result type alias for the Cascata client
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::api(404, "Not found");
        assert_eq!(err.to_string(), "API error 404: Not found");

        let err = Error::malformed_timestamp("soon");
        assert_eq!(
            err.to_string(),
            "'soon' is neither an epoch timestamp nor RFC3339"
        );
    }

    #[test]
    fn test_is_retryable() {
        assert!(Error::RateLimited {
            retry_after_seconds: 60
        }
        .is_retryable());
        assert!(Error::Timeout { timeout_ms: 1000 }.is_retryable());
        assert!(Error::api(429, "").is_retryable());
        assert!(Error::api(500, "").is_retryable());
        assert!(Error::api(503, "").is_retryable());

        assert!(!Error::api(400, "").is_retryable());
        assert!(!Error::api(401, "").is_retryable());
        assert!(!Error::api(404, "").is_retryable());
        assert!(!Error::config("test").is_retryable());
    }

    #[test]
    fn test_status() {
        assert_eq!(Error::api(409, "conflict").status(), Some(409));
        assert_eq!(Error::config("x").status(), None);
    }

    #[test]
    fn test_result_decode_keeps_line() {
        let bad = serde_json::from_slice::<serde_json::Value>(b"{oops").unwrap_err();
        let err = Error::result_decode(&b"{oops"[..], bad);
        match err {
            Error::ResultDecode { line, .. } => assert_eq!(&line[..], b"{oops"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
