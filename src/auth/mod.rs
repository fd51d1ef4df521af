//! Authentication
//!
//! The platform authenticates every request with an account API key carried
//! in the `Authorization` header using the `CS1` scheme. A handful of
//! account-management endpoints also accept email/password basic auth.

use reqwest::RequestBuilder;

/// Authorization scheme prefix for API keys
pub const API_KEY_SCHEME: &str = "CS1";

/// Account credentials applied to outgoing requests
#[derive(Clone, Default)]
pub enum Credentials {
    /// No authentication (only useful against local test servers)
    #[default]
    None,
    /// Account API key, sent as `Authorization: CS1 <key>`
    ApiKey { key: String },
    /// Email/password basic auth
    Basic { username: String, password: String },
}

impl Credentials {
    /// Create API-key credentials
    pub fn api_key(key: impl Into<String>) -> Self {
        Self::ApiKey { key: key.into() }
    }

    /// Create basic-auth credentials
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Apply these credentials to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match self {
            Credentials::None => req,
            Credentials::ApiKey { key } => {
                req.header("Authorization", format!("{API_KEY_SCHEME} {key}"))
            }
            Credentials::Basic { username, password } => req.basic_auth(username, Some(password)),
        }
    }

    /// Whether any credentials are configured
    pub fn is_configured(&self) -> bool {
        !matches!(self, Credentials::None)
    }
}

// Keys must never leak through Debug output or logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::None => f.write_str("Credentials::None"),
            Credentials::ApiKey { .. } => f.write_str("Credentials::ApiKey {{ .. }}"),
            Credentials::Basic { username, .. } => f
                .debug_struct("Credentials::Basic")
                .field("username", username)
                .finish_non_exhaustive(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_value(credentials: &Credentials) -> Option<String> {
        let client = reqwest::Client::new();
        let req = credentials
            .apply(client.get("http://localhost/"))
            .build()
            .unwrap();
        req.headers()
            .get("Authorization")
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[test]
    fn test_api_key_header() {
        let credentials = Credentials::api_key("1/abcdef0123");
        assert_eq!(header_value(&credentials).as_deref(), Some("CS1 1/abcdef0123"));
    }

    #[test]
    fn test_basic_auth_header() {
        let credentials = Credentials::basic("user@example.com", "hunter2");
        let value = header_value(&credentials).unwrap();
        assert!(value.starts_with("Basic "));
    }

    #[test]
    fn test_none_leaves_request_untouched() {
        assert_eq!(header_value(&Credentials::None), None);
        assert!(!Credentials::None.is_configured());
        assert!(Credentials::api_key("k").is_configured());
    }

    #[test]
    fn test_debug_redacts_key() {
        let debug = format!("{:?}", Credentials::api_key("secret"));
        assert!(!debug.contains("secret"));
    }
}
