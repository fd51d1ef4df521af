//! User endpoints

use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::models::{ApiKeyList, User, UserList};
use reqwest::Method;
use std::sync::Arc;
use url::Url;

/// `/v3/user` endpoints
#[derive(Debug, Clone)]
pub struct UserService {
    http: Arc<HttpClient>,
    endpoint: Url,
}

impl UserService {
    pub(crate) fn new(http: Arc<HttpClient>, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    /// List the account's users
    pub async fn list(&self) -> Result<Vec<User>> {
        let url = self.endpoint.join("/v3/user/list")?;
        let body: UserList = self.http.get_json(url, RequestConfig::new()).await?;
        Ok(body.users)
    }

    /// Invite a user to the account
    pub async fn create(&self, name: &str, email: &str) -> Result<()> {
        let url = self.endpoint.join(&format!("/v3/user/create/{name}"))?;
        let config = RequestConfig::new().json(serde_json::json!({ "email": email }));
        self.http.request(Method::POST, url, config).await?;
        Ok(())
    }

    /// Remove a user from the account
    pub async fn delete(&self, name: &str) -> Result<()> {
        let url = self.endpoint.join(&format!("/v3/user/delete/{name}"))?;
        self.http
            .request(Method::POST, url, RequestConfig::new())
            .await?;
        Ok(())
    }

    /// List a user's API keys
    pub async fn api_keys(&self, name: &str) -> Result<Vec<String>> {
        let url = self
            .endpoint
            .join(&format!("/v3/user/apikey/list/{name}"))?;
        let body: ApiKeyList = self.http.get_json(url, RequestConfig::new()).await?;
        Ok(body.apikeys)
    }
}
