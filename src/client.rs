//! Client handle
//!
//! A [`Client`] owns one [`HttpClient`] shared by every service handle it
//! hands out. Handles are cheap clones around the same transport; nothing
//! else is shared between them.

use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::HttpClient;
use crate::services::{
    BulkImportService, CdpService, DatabaseService, JobService, PolicyService, TableService,
    UserService, WorkflowService,
};
use std::sync::Arc;
use url::Url;

/// Entry point for every API call
#[derive(Debug, Clone)]
pub struct Client {
    http: Arc<HttpClient>,
    api_endpoint: Url,
    cdp_endpoint: Url,
    workflow_endpoint: Url,
}

impl Client {
    /// Build a client from a configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        let api_endpoint = Url::parse(&config.api_endpoint)?;
        let cdp_endpoint = Url::parse(&config.cdp_endpoint)?;
        let workflow_endpoint = Url::parse(&config.workflow_endpoint)?;
        let http = Arc::new(HttpClient::new(&config)?);
        Ok(Self {
            http,
            api_endpoint,
            cdp_endpoint,
            workflow_endpoint,
        })
    }

    /// Build a client with just an API key and default endpoints
    pub fn with_api_key(key: impl Into<String>) -> Result<Self> {
        Self::new(ClientConfig::with_api_key(key))
    }

    /// Build a client from `CASCATA_API_KEY` and the endpoint overrides
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Database endpoints
    pub fn databases(&self) -> DatabaseService {
        DatabaseService::new(self.http.clone(), self.api_endpoint.clone())
    }

    /// Table endpoints
    pub fn tables(&self) -> TableService {
        TableService::new(self.http.clone(), self.api_endpoint.clone())
    }

    /// Job endpoints, including query issue and result streaming
    pub fn jobs(&self) -> JobService {
        JobService::new(self.http.clone(), self.api_endpoint.clone())
    }

    /// User endpoints
    pub fn users(&self) -> UserService {
        UserService::new(self.http.clone(), self.api_endpoint.clone())
    }

    /// Access-control policy endpoints
    pub fn policies(&self) -> PolicyService {
        PolicyService::new(self.http.clone(), self.api_endpoint.clone())
    }

    /// Bulk import endpoints
    pub fn bulk_imports(&self) -> BulkImportService {
        BulkImportService::new(self.http.clone(), self.api_endpoint.clone())
    }

    /// CDP endpoints: audiences, segments, activations, journeys
    pub fn cdp(&self) -> CdpService {
        CdpService::new(self.http.clone(), self.cdp_endpoint.clone())
    }

    /// Workflow orchestration endpoints
    pub fn workflows(&self) -> WorkflowService {
        WorkflowService::new(self.http.clone(), self.workflow_endpoint.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_from_config() {
        let client = Client::with_api_key("1/abcdef").unwrap();
        assert_eq!(client.api_endpoint.as_str(), "https://api.cascata.io/");
        assert_eq!(client.cdp_endpoint.as_str(), "https://api-cdp.cascata.io/");
    }

    #[test]
    fn test_client_rejects_bad_endpoint() {
        let config = ClientConfig::builder()
            .api_key("k")
            .api_endpoint("not a url")
            .build();
        assert!(Client::new(config).is_err());
    }
}
