//! CDP endpoints: audiences, segments, activations, journeys
//!
//! These live on the CDP surface, which returns bare JSON arrays for list
//! endpoints rather than the core API's envelope objects.

use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::models::{
    Activation, ActivationRequest, ActivationRun, Audience, Journey, Segment, SegmentRequest,
};
use reqwest::Method;
use std::sync::Arc;
use url::Url;

/// CDP surface endpoints
#[derive(Debug, Clone)]
pub struct CdpService {
    http: Arc<HttpClient>,
    endpoint: Url,
}

impl CdpService {
    pub(crate) fn new(http: Arc<HttpClient>, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    /// List all audiences
    pub async fn audiences(&self) -> Result<Vec<Audience>> {
        let url = self.endpoint.join("/audiences")?;
        self.http.get_json(url, RequestConfig::new()).await
    }

    /// One audience by id
    pub async fn audience(&self, id: &str) -> Result<Audience> {
        let url = self.endpoint.join(&format!("/audiences/{id}"))?;
        self.http.get_json(url, RequestConfig::new()).await
    }

    /// List an audience's segments
    pub async fn segments(&self, audience_id: &str) -> Result<Vec<Segment>> {
        let url = self
            .endpoint
            .join(&format!("/audiences/{audience_id}/segments"))?;
        self.http.get_json(url, RequestConfig::new()).await
    }

    /// One segment by id
    pub async fn segment(&self, audience_id: &str, segment_id: &str) -> Result<Segment> {
        let url = self
            .endpoint
            .join(&format!("/audiences/{audience_id}/segments/{segment_id}"))?;
        self.http.get_json(url, RequestConfig::new()).await
    }

    /// Create a segment in an audience
    pub async fn create_segment(
        &self,
        audience_id: &str,
        request: &SegmentRequest,
    ) -> Result<Segment> {
        let url = self
            .endpoint
            .join(&format!("/audiences/{audience_id}/segments"))?;
        let config = RequestConfig::new().json(serde_json::to_value(request)?);
        self.http.post_json(url, config).await
    }

    /// Delete a segment
    pub async fn delete_segment(&self, audience_id: &str, segment_id: &str) -> Result<()> {
        let url = self
            .endpoint
            .join(&format!("/audiences/{audience_id}/segments/{segment_id}"))?;
        self.http
            .request(Method::DELETE, url, RequestConfig::new())
            .await?;
        Ok(())
    }

    /// List a segment's activations
    pub async fn activations(
        &self,
        audience_id: &str,
        segment_id: &str,
    ) -> Result<Vec<Activation>> {
        let url = self.endpoint.join(&format!(
            "/audiences/{audience_id}/segments/{segment_id}/activations"
        ))?;
        self.http.get_json(url, RequestConfig::new()).await
    }

    /// Create an activation for a segment
    pub async fn create_activation(
        &self,
        audience_id: &str,
        segment_id: &str,
        request: &ActivationRequest,
    ) -> Result<Activation> {
        let url = self.endpoint.join(&format!(
            "/audiences/{audience_id}/segments/{segment_id}/activations"
        ))?;
        let config = RequestConfig::new().json(serde_json::to_value(request)?);
        self.http.post_json(url, config).await
    }

    /// Trigger an activation run now
    pub async fn run_activation(&self, id: &str) -> Result<ActivationRun> {
        let url = self.endpoint.join(&format!("/activations/{id}/run"))?;
        self.http.post_json(url, RequestConfig::new()).await
    }

    /// List an audience's journeys
    pub async fn journeys(&self, audience_id: &str) -> Result<Vec<Journey>> {
        let url = self
            .endpoint
            .join(&format!("/audiences/{audience_id}/journeys"))?;
        self.http.get_json(url, RequestConfig::new()).await
    }

    /// One journey by id
    pub async fn journey(&self, id: &str) -> Result<Journey> {
        let url = self.endpoint.join(&format!("/journeys/{id}"))?;
        self.http.get_json(url, RequestConfig::new()).await
    }

    /// Pause a running journey
    pub async fn pause_journey(&self, id: &str) -> Result<Journey> {
        let url = self.endpoint.join(&format!("/journeys/{id}/pause"))?;
        self.http.post_json(url, RequestConfig::new()).await
    }

    /// Resume a paused journey
    pub async fn resume_journey(&self, id: &str) -> Result<Journey> {
        let url = self.endpoint.join(&format!("/journeys/{id}/resume"))?;
        self.http.post_json(url, RequestConfig::new()).await
    }
}
