//! Bulk import session endpoints
//!
//! The session lifecycle is: create, upload parts, freeze, perform (runs a
//! job that validates and converts the parts), commit into the target table,
//! then delete. Unfreeze reopens a frozen session for more uploads.

use super::validate_name;
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::models::{BulkImport, BulkImportList, PartList, PerformResult};
use bytes::Bytes;
use reqwest::Method;
use std::sync::Arc;
use url::Url;

/// `/v3/bulk_import` endpoints
#[derive(Debug, Clone)]
pub struct BulkImportService {
    http: Arc<HttpClient>,
    endpoint: Url,
}

impl BulkImportService {
    pub(crate) fn new(http: Arc<HttpClient>, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    /// List the account's sessions
    pub async fn list(&self) -> Result<Vec<BulkImport>> {
        let url = self.endpoint.join("/v3/bulk_import/list")?;
        let body: BulkImportList = self.http.get_json(url, RequestConfig::new()).await?;
        Ok(body.bulk_imports)
    }

    /// One session by name
    pub async fn show(&self, name: &str) -> Result<BulkImport> {
        let url = self.endpoint.join(&format!("/v3/bulk_import/show/{name}"))?;
        self.http.get_json(url, RequestConfig::new()).await
    }

    /// Create a session targeting a table
    pub async fn create(&self, name: &str, database: &str, table: &str) -> Result<()> {
        validate_name("database", database)?;
        validate_name("table", table)?;
        let url = self
            .endpoint
            .join(&format!("/v3/bulk_import/create/{name}/{database}/{table}"))?;
        self.http
            .request(Method::POST, url, RequestConfig::new())
            .await?;
        Ok(())
    }

    /// Upload one part, raw msgpack.gz bytes
    pub async fn upload_part(&self, name: &str, part: &str, data: impl Into<Bytes>) -> Result<()> {
        let url = self
            .endpoint
            .join(&format!("/v3/bulk_import/upload_part/{name}/{part}"))?;
        let config = RequestConfig::new().bytes(data);
        self.http.request(Method::PUT, url, config).await?;
        Ok(())
    }

    /// Delete one uploaded part
    pub async fn delete_part(&self, name: &str, part: &str) -> Result<()> {
        let url = self
            .endpoint
            .join(&format!("/v3/bulk_import/delete_part/{name}/{part}"))?;
        self.http
            .request(Method::POST, url, RequestConfig::new())
            .await?;
        Ok(())
    }

    /// List a session's uploaded parts
    pub async fn list_parts(&self, name: &str) -> Result<Vec<String>> {
        let url = self
            .endpoint
            .join(&format!("/v3/bulk_import/list_parts/{name}"))?;
        let body: PartList = self.http.get_json(url, RequestConfig::new()).await?;
        Ok(body.parts)
    }

    /// Block further part uploads
    pub async fn freeze(&self, name: &str) -> Result<()> {
        let url = self.endpoint.join(&format!("/v3/bulk_import/freeze/{name}"))?;
        self.http
            .request(Method::POST, url, RequestConfig::new())
            .await?;
        Ok(())
    }

    /// Reopen a frozen session for uploads
    pub async fn unfreeze(&self, name: &str) -> Result<()> {
        let url = self
            .endpoint
            .join(&format!("/v3/bulk_import/unfreeze/{name}"))?;
        self.http
            .request(Method::POST, url, RequestConfig::new())
            .await?;
        Ok(())
    }

    /// Run the validation/conversion job over the uploaded parts
    pub async fn perform(&self, name: &str) -> Result<PerformResult> {
        let url = self
            .endpoint
            .join(&format!("/v3/bulk_import/perform/{name}"))?;
        self.http.post_json(url, RequestConfig::new()).await
    }

    /// Commit performed data into the target table
    pub async fn commit(&self, name: &str) -> Result<()> {
        let url = self.endpoint.join(&format!("/v3/bulk_import/commit/{name}"))?;
        self.http
            .request(Method::POST, url, RequestConfig::new())
            .await?;
        Ok(())
    }

    /// Delete a session
    pub async fn delete(&self, name: &str) -> Result<()> {
        let url = self.endpoint.join(&format!("/v3/bulk_import/delete/{name}"))?;
        self.http
            .request(Method::POST, url, RequestConfig::new())
            .await?;
        Ok(())
    }
}
