//! Database endpoints

use super::validate_name;
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::models::{Database, DatabaseList};
use reqwest::Method;
use std::sync::Arc;
use url::Url;

/// `/v3/database` endpoints
#[derive(Debug, Clone)]
pub struct DatabaseService {
    http: Arc<HttpClient>,
    endpoint: Url,
}

impl DatabaseService {
    pub(crate) fn new(http: Arc<HttpClient>, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    /// List all databases visible to the caller
    pub async fn list(&self) -> Result<Vec<Database>> {
        let url = self.endpoint.join("/v3/database/list")?;
        let body: DatabaseList = self.http.get_json(url, RequestConfig::new()).await?;
        Ok(body.databases)
    }

    /// Create a database
    pub async fn create(&self, name: &str) -> Result<()> {
        validate_name("database", name)?;
        let url = self.endpoint.join(&format!("/v3/database/create/{name}"))?;
        self.http
            .request(Method::POST, url, RequestConfig::new())
            .await?;
        Ok(())
    }

    /// Delete a database and everything in it
    pub async fn delete(&self, name: &str) -> Result<()> {
        validate_name("database", name)?;
        let url = self.endpoint.join(&format!("/v3/database/delete/{name}"))?;
        self.http
            .request(Method::POST, url, RequestConfig::new())
            .await?;
        Ok(())
    }
}
