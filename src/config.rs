//! Client configuration
//!
//! Endpoints, credentials, and transport knobs for the three API surfaces.
//! Built explicitly through [`ClientConfig::builder`] or picked up from the
//! environment with [`ClientConfig::from_env`].

use crate::auth::Credentials;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Default endpoint for the core REST API
pub const DEFAULT_API_ENDPOINT: &str = "https://api.cascata.io";
/// Default endpoint for the CDP API
pub const DEFAULT_CDP_ENDPOINT: &str = "https://api-cdp.cascata.io";
/// Default endpoint for the workflow API
pub const DEFAULT_WORKFLOW_ENDPOINT: &str = "https://api-workflow.cascata.io";

/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "CASCATA_API_KEY";
/// Environment variable overriding the core endpoint
pub const ENV_API_ENDPOINT: &str = "CASCATA_API_ENDPOINT";
/// Environment variable overriding the CDP endpoint
pub const ENV_CDP_ENDPOINT: &str = "CASCATA_CDP_ENDPOINT";
/// Environment variable overriding the workflow endpoint
pub const ENV_WORKFLOW_ENDPOINT: &str = "CASCATA_WORKFLOW_ENDPOINT";

/// Type of backoff between retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}

/// Configuration for a [`crate::Client`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Core API endpoint
    pub api_endpoint: String,
    /// CDP API endpoint
    pub cdp_endpoint: String,
    /// Workflow API endpoint
    pub workflow_endpoint: String,
    /// Account credentials
    pub credentials: Credentials,
    /// Request timeout
    pub timeout: Duration,
    /// Maximum number of retries
    pub max_retries: u32,
    /// Initial delay for backoff
    pub initial_backoff: Duration,
    /// Maximum delay for backoff
    pub max_backoff: Duration,
    /// Type of backoff strategy
    pub backoff_type: BackoffType,
    /// Requests per second to self-throttle to (None = unthrottled)
    pub requests_per_second: Option<u32>,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            cdp_endpoint: DEFAULT_CDP_ENDPOINT.to_string(),
            workflow_endpoint: DEFAULT_WORKFLOW_ENDPOINT.to_string(),
            credentials: Credentials::None,
            timeout: Duration::from_secs(60),
            max_retries: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(60),
            backoff_type: BackoffType::Exponential,
            requests_per_second: None,
            user_agent: format!("cascata-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a config with just an API key and default endpoints
    pub fn with_api_key(key: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::api_key(key),
            ..Self::default()
        }
    }

    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Build a config from the environment
    ///
    /// Reads `CASCATA_API_KEY` (required) and the optional endpoint
    /// overrides. Fails with [`Error::MissingApiKey`] when no key is set.
    pub fn from_env() -> Result<Self> {
        let key = std::env::var(ENV_API_KEY).map_err(|_| Error::MissingApiKey)?;
        let mut config = Self::with_api_key(key);
        if let Ok(endpoint) = std::env::var(ENV_API_ENDPOINT) {
            config.api_endpoint = endpoint;
        }
        if let Ok(endpoint) = std::env::var(ENV_CDP_ENDPOINT) {
            config.cdp_endpoint = endpoint;
        }
        if let Ok(endpoint) = std::env::var(ENV_WORKFLOW_ENDPOINT) {
            config.workflow_endpoint = endpoint;
        }
        config.validate()?;
        Ok(config)
    }

    /// Check that every endpoint parses as an absolute URL
    pub fn validate(&self) -> Result<()> {
        for endpoint in [
            &self.api_endpoint,
            &self.cdp_endpoint,
            &self.workflow_endpoint,
        ] {
            Url::parse(endpoint)?;
        }
        Ok(())
    }
}

/// Builder for [`ClientConfig`]
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the core API endpoint
    pub fn api_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.api_endpoint = endpoint.into();
        self
    }

    /// Set the CDP API endpoint
    pub fn cdp_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.cdp_endpoint = endpoint.into();
        self
    }

    /// Set the workflow API endpoint
    pub fn workflow_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.workflow_endpoint = endpoint.into();
        self
    }

    /// Set the API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.credentials = Credentials::api_key(key);
        self
    }

    /// Set full credentials
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.config.credentials = credentials;
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set max retries
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set backoff configuration
    pub fn backoff(mut self, backoff_type: BackoffType, initial: Duration, max: Duration) -> Self {
        self.config.backoff_type = backoff_type;
        self.config.initial_backoff = initial;
        self.config.max_backoff = max;
        self
    }

    /// Self-throttle outgoing requests
    pub fn requests_per_second(mut self, rps: u32) -> Self {
        self.config.requests_per_second = Some(rps);
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
