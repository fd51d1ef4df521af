//! Workflow orchestration endpoints

use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::models::{
    Attempt, AttemptList, AttemptListParams, Schedule, ScheduleList, StartAttemptRequest,
    Workflow, WorkflowList,
};
use reqwest::Method;
use std::sync::Arc;
use url::Url;

/// Workflow surface endpoints
#[derive(Debug, Clone)]
pub struct WorkflowService {
    http: Arc<HttpClient>,
    endpoint: Url,
}

impl WorkflowService {
    pub(crate) fn new(http: Arc<HttpClient>, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    /// List workflows, optionally capped
    pub async fn list(&self, count: Option<u32>) -> Result<Vec<Workflow>> {
        let url = self.endpoint.join("/api/workflows")?;
        let config = RequestConfig::new().query_opt("count", count.map(|c| c.to_string()));
        let body: WorkflowList = self.http.get_json(url, config).await?;
        Ok(body.workflows)
    }

    /// One workflow by id
    pub async fn get(&self, id: &str) -> Result<Workflow> {
        let url = self.endpoint.join(&format!("/api/workflows/{id}"))?;
        self.http.get_json(url, RequestConfig::new()).await
    }

    /// List attempts, newest first
    pub async fn attempts(&self, params: &AttemptListParams) -> Result<Vec<Attempt>> {
        let url = self.endpoint.join("/api/attempts")?;
        let config = RequestConfig::new()
            .query_opt("workflow_id", params.workflow_id.clone())
            .query_opt("status", params.status.clone());
        let body: AttemptList = self.http.get_json(url, config).await?;
        Ok(body.attempts)
    }

    /// One attempt by id
    pub async fn attempt(&self, id: &str) -> Result<Attempt> {
        let url = self.endpoint.join(&format!("/api/attempts/{id}"))?;
        self.http.get_json(url, RequestConfig::new()).await
    }

    /// Start a new attempt of a workflow
    pub async fn start_attempt(&self, request: &StartAttemptRequest) -> Result<Attempt> {
        let url = self.endpoint.join("/api/attempts")?;
        let config = RequestConfig::new().json(serde_json::to_value(request)?);
        self.http.post_json(url, config).await
    }

    /// Request that a running attempt be killed
    pub async fn kill_attempt(&self, id: &str) -> Result<()> {
        let url = self.endpoint.join(&format!("/api/attempts/{id}/kill"))?;
        self.http
            .request(Method::POST, url, RequestConfig::new())
            .await?;
        Ok(())
    }

    /// List all schedules
    pub async fn schedules(&self) -> Result<Vec<Schedule>> {
        let url = self.endpoint.join("/api/schedules")?;
        let body: ScheduleList = self.http.get_json(url, RequestConfig::new()).await?;
        Ok(body.schedules)
    }

    /// Enable a schedule
    pub async fn enable_schedule(&self, id: &str) -> Result<Schedule> {
        let url = self.endpoint.join(&format!("/api/schedules/{id}/enable"))?;
        self.http.post_json(url, RequestConfig::new()).await
    }

    /// Disable a schedule
    pub async fn disable_schedule(&self, id: &str) -> Result<Schedule> {
        let url = self.endpoint.join(&format!("/api/schedules/{id}/disable"))?;
        self.http.post_json(url, RequestConfig::new()).await
    }
}
