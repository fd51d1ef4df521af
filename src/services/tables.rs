//! Table endpoints

use super::validate_name;
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::models::{Table, TableList, TableUpdate};
use reqwest::Method;
use std::sync::Arc;
use url::Url;

/// `/v3/table` endpoints
#[derive(Debug, Clone)]
pub struct TableService {
    http: Arc<HttpClient>,
    endpoint: Url,
}

impl TableService {
    pub(crate) fn new(http: Arc<HttpClient>, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    /// List the tables of a database
    pub async fn list(&self, database: &str) -> Result<Vec<Table>> {
        validate_name("database", database)?;
        let url = self.endpoint.join(&format!("/v3/table/list/{database}"))?;
        let body: TableList = self.http.get_json(url, RequestConfig::new()).await?;
        Ok(body.tables)
    }

    /// Create a log table
    pub async fn create(&self, database: &str, table: &str) -> Result<()> {
        validate_name("database", database)?;
        validate_name("table", table)?;
        let url = self
            .endpoint
            .join(&format!("/v3/table/create/{database}/{table}/log"))?;
        self.http
            .request(Method::POST, url, RequestConfig::new())
            .await?;
        Ok(())
    }

    /// Update mutable table attributes
    pub async fn update(&self, database: &str, table: &str, update: &TableUpdate) -> Result<()> {
        validate_name("database", database)?;
        validate_name("table", table)?;
        let url = self
            .endpoint
            .join(&format!("/v3/table/update/{database}/{table}"))?;
        let config = RequestConfig::new().json(serde_json::to_value(update)?);
        self.http.request(Method::POST, url, config).await?;
        Ok(())
    }

    /// Delete a table
    pub async fn delete(&self, database: &str, table: &str) -> Result<()> {
        validate_name("database", database)?;
        validate_name("table", table)?;
        let url = self
            .endpoint
            .join(&format!("/v3/table/delete/{database}/{table}"))?;
        self.http
            .request(Method::POST, url, RequestConfig::new())
            .await?;
        Ok(())
    }

    /// Atomically swap the contents of two tables in the same database
    pub async fn swap(&self, database: &str, table1: &str, table2: &str) -> Result<()> {
        validate_name("database", database)?;
        validate_name("table", table1)?;
        validate_name("table", table2)?;
        let url = self
            .endpoint
            .join(&format!("/v3/table/swap/{database}/{table1}/{table2}"))?;
        self.http
            .request(Method::POST, url, RequestConfig::new())
            .await?;
        Ok(())
    }
}
