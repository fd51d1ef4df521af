//! Job endpoints: issue, inspect, kill, and stream results

use super::validate_name;
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::models::{
    IssuedJob, Job, JobList, JobListParams, JobStatusInfo, KilledJob, QueryEngine, QueryRequest,
};
use crate::results::ResultCursor;
use reqwest::Method;
use std::sync::Arc;
use url::Url;

/// `/v3/job` endpoints
#[derive(Debug, Clone)]
pub struct JobService {
    http: Arc<HttpClient>,
    endpoint: Url,
}

impl JobService {
    pub(crate) fn new(http: Arc<HttpClient>, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    /// Issue a query job against a database
    pub async fn issue(
        &self,
        engine: QueryEngine,
        database: &str,
        request: &QueryRequest,
    ) -> Result<IssuedJob> {
        validate_name("database", database)?;
        let url = self
            .endpoint
            .join(&format!("/v3/job/issue/{}/{database}", engine.as_str()))?;
        let config = RequestConfig::new().json(serde_json::to_value(request)?);
        self.http.post_json(url, config).await
    }

    /// List jobs, newest first
    pub async fn list(&self, params: &JobListParams) -> Result<Vec<Job>> {
        let url = self.endpoint.join("/v3/job/list")?;
        let config = RequestConfig::new()
            .query_opt("from", params.from.map(|v| v.to_string()))
            .query_opt("to", params.to.map(|v| v.to_string()))
            .query_opt("status", params.status.map(|s| s.to_string()));
        let body: JobList = self.http.get_json(url, config).await?;
        Ok(body.jobs)
    }

    /// Full detail of one job
    pub async fn show(&self, job_id: &str) -> Result<Job> {
        let url = self.endpoint.join(&format!("/v3/job/show/{job_id}"))?;
        self.http.get_json(url, RequestConfig::new()).await
    }

    /// Lifecycle state of one job, cheaper than [`Self::show`]
    pub async fn status(&self, job_id: &str) -> Result<JobStatusInfo> {
        let url = self.endpoint.join(&format!("/v3/job/status/{job_id}"))?;
        self.http.get_json(url, RequestConfig::new()).await
    }

    /// Request that a job be killed
    pub async fn kill(&self, job_id: &str) -> Result<KilledJob> {
        let url = self.endpoint.join(&format!("/v3/job/kill/{job_id}"))?;
        self.http.post_json(url, RequestConfig::new()).await
    }

    /// Stream a finished job's result as newline-delimited JSON
    ///
    /// The returned cursor owns the response body; call
    /// [`ResultCursor::release`] (or drop the cursor) when done.
    pub async fn result(&self, job_id: &str) -> Result<ResultCursor> {
        let url = self.endpoint.join(&format!("/v3/job/result/{job_id}"))?;
        let config = RequestConfig::new().query("format", "jsonl");
        let response = self.http.request_stream(Method::GET, url, config).await?;
        Ok(ResultCursor::new(response))
    }
}
