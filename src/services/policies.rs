//! Access-control policy endpoints

use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::models::{Policy, PolicyRequest};
use reqwest::Method;
use std::sync::Arc;
use url::Url;

/// `/v3/access_control/policies` endpoints
#[derive(Debug, Clone)]
pub struct PolicyService {
    http: Arc<HttpClient>,
    endpoint: Url,
}

impl PolicyService {
    pub(crate) fn new(http: Arc<HttpClient>, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    /// List all policies
    pub async fn list(&self) -> Result<Vec<Policy>> {
        let url = self.endpoint.join("/v3/access_control/policies")?;
        self.http.get_json(url, RequestConfig::new()).await
    }

    /// One policy by id
    pub async fn get(&self, id: u64) -> Result<Policy> {
        let url = self
            .endpoint
            .join(&format!("/v3/access_control/policies/{id}"))?;
        self.http.get_json(url, RequestConfig::new()).await
    }

    /// Create a policy
    pub async fn create(&self, request: &PolicyRequest) -> Result<Policy> {
        let url = self.endpoint.join("/v3/access_control/policies")?;
        let config = RequestConfig::new().json(serde_json::to_value(request)?);
        self.http.post_json(url, config).await
    }

    /// Delete a policy
    pub async fn delete(&self, id: u64) -> Result<()> {
        let url = self
            .endpoint
            .join(&format!("/v3/access_control/policies/{id}"))?;
        self.http
            .request(Method::DELETE, url, RequestConfig::new())
            .await?;
        Ok(())
    }

    /// Attach a user to a policy
    pub async fn attach_user(&self, policy_id: u64, user_id: u64) -> Result<()> {
        let url = self.endpoint.join(&format!(
            "/v3/access_control/policies/{policy_id}/users/{user_id}"
        ))?;
        self.http
            .request(Method::POST, url, RequestConfig::new())
            .await?;
        Ok(())
    }

    /// Detach a user from a policy
    pub async fn detach_user(&self, policy_id: u64, user_id: u64) -> Result<()> {
        let url = self.endpoint.join(&format!(
            "/v3/access_control/policies/{policy_id}/users/{user_id}"
        ))?;
        self.http
            .request(Method::DELETE, url, RequestConfig::new())
            .await?;
        Ok(())
    }
}
