//! Job and query models
//!
//! Jobs are where the core API's wire drift concentrates: `job_id` arrives
//! as a number or a string depending on the endpoint, `query` as a raw SQL
//! string or an object, and `hive_result_schema` as a JSON-encoded string or
//! null. All of those land on [`FlexValue`].

use crate::decode::{FlexTime, FlexValue};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Query engine selector for `POST /v3/job/issue/{engine}/{database}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryEngine {
    /// Hive engine
    Hive,
    /// Trino engine
    Trino,
}

impl QueryEngine {
    /// Path segment used when issuing a job
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hive => "hive",
            Self::Trino => "trino",
        }
    }
}

impl fmt::Display for QueryEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryEngine {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hive" => Ok(Self::Hive),
            "trino" | "presto" => Ok(Self::Trino),
            other => Err(crate::error::Error::config(format!(
                "unknown query engine '{other}' (expected hive or trino)"
            ))),
        }
    }
}

/// Lifecycle state of a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Waiting for a slot
    Queued,
    /// Cluster resources being prepared
    Booting,
    /// Executing
    Running,
    /// Finished successfully
    Success,
    /// Finished with an error
    Error,
    /// Killed by a caller
    Killed,
}

impl JobStatus {
    /// Whether the job has reached a terminal state
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Success | Self::Error | Self::Killed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Queued => "queued",
            Self::Booting => "booting",
            Self::Running => "running",
            Self::Success => "success",
            Self::Error => "error",
            Self::Killed => "killed",
        };
        f.write_str(s)
    }
}

impl FromStr for JobStatus {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "queued" => Ok(Self::Queued),
            "booting" => Ok(Self::Booting),
            "running" => Ok(Self::Running),
            "success" => Ok(Self::Success),
            "error" => Ok(Self::Error),
            "killed" => Ok(Self::Killed),
            other => Err(crate::error::Error::config(format!(
                "unknown job status '{other}'"
            ))),
        }
    }
}

/// A job on the core API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Job id, number or string on the wire
    #[serde(default)]
    pub job_id: FlexValue,
    /// Job kind (`hive`, `trino`, `bulk_import_perform`, ...)
    #[serde(rename = "type", default)]
    pub job_type: Option<String>,
    /// Lifecycle state
    #[serde(default)]
    pub status: Option<JobStatus>,
    /// The issued query; raw SQL string or an object on the wire
    #[serde(default)]
    pub query: FlexValue,
    /// Database the job ran against
    #[serde(default)]
    pub database: Option<String>,
    /// Issuing user
    #[serde(default)]
    pub user_name: Option<String>,
    /// Submission time
    #[serde(default)]
    pub created_at: Option<FlexTime>,
    /// Execution start time
    #[serde(default)]
    pub start_at: Option<FlexTime>,
    /// Completion time
    #[serde(default)]
    pub end_at: Option<FlexTime>,
    /// Wall-clock duration in seconds
    #[serde(default)]
    pub duration: Option<u64>,
    /// Result row count
    #[serde(default)]
    pub num_records: Option<u64>,
    /// Result size in bytes
    #[serde(default)]
    pub result_size: Option<u64>,
    /// Result schema, a JSON-encoded string or null
    #[serde(default)]
    pub hive_result_schema: FlexValue,
    /// Scheduling priority (-2 lowest to 2 highest)
    #[serde(default)]
    pub priority: Option<i32>,
    /// Automatic retry cap
    #[serde(default)]
    pub retry_limit: Option<u32>,
}

/// Envelope for `GET /v3/job/list`
#[derive(Debug, Clone, Deserialize)]
pub struct JobList {
    /// Number of jobs returned
    #[serde(default)]
    pub count: Option<u64>,
    /// The jobs
    pub jobs: Vec<Job>,
}

/// Filters for `GET /v3/job/list`
#[derive(Debug, Clone, Default)]
pub struct JobListParams {
    /// List from this job index
    pub from: Option<u64>,
    /// List up to this job index
    pub to: Option<u64>,
    /// Only jobs in this state
    pub status: Option<JobStatus>,
}

/// Body for `POST /v3/job/issue/{engine}/{database}`
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest {
    /// The SQL text
    pub query: String,
    /// Scheduling priority (-2 lowest to 2 highest)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    /// Automatic retry cap
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_limit: Option<u32>,
    /// Result export target URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

impl QueryRequest {
    /// A request with just the SQL text
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            priority: None,
            retry_limit: None,
            result: None,
        }
    }
}

/// Response to issuing a job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedJob {
    /// The new job's id
    #[serde(default)]
    pub job_id: FlexValue,
    /// Database it was issued against
    #[serde(default)]
    pub database: Option<String>,
}

/// Response to `GET /v3/job/status/{id}`, a lighter probe than show
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatusInfo {
    /// Job id
    #[serde(default)]
    pub job_id: FlexValue,
    /// Lifecycle state
    pub status: JobStatus,
    /// Submission time
    #[serde(default)]
    pub created_at: Option<FlexTime>,
    /// Execution start time
    #[serde(default)]
    pub start_at: Option<FlexTime>,
    /// Completion time
    #[serde(default)]
    pub end_at: Option<FlexTime>,
    /// Wall-clock duration in seconds
    #[serde(default)]
    pub duration: Option<u64>,
}

/// Response to `POST /v3/job/kill/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KilledJob {
    /// Job id
    #[serde(default)]
    pub job_id: FlexValue,
    /// State the job was in when the kill was accepted
    #[serde(default)]
    pub former_status: Option<JobStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_job_decodes_query_as_string_or_object() {
        let wire = r#"{"job_id":862,"type":"trino","status":"success",
                       "query":"SELECT 1","database":"sample"}"#;
        let job: Job = serde_json::from_str(wire).unwrap();
        assert_eq!(job.job_id.as_text(), Some("862"));
        assert_eq!(job.query.as_text(), Some("SELECT 1"));

        let wire = r#"{"job_id":"863","query":{"sql":"SELECT 2"},"status":"running"}"#;
        let job: Job = serde_json::from_str(wire).unwrap();
        assert_eq!(job.job_id.as_text(), Some("863"));
        assert_eq!(job.query.as_text(), Some(r#"{"sql":"SELECT 2"}"#));
        assert_eq!(job.status, Some(JobStatus::Running));
        assert!(job.hive_result_schema.is_absent());
    }

    #[test]
    fn test_query_request_omits_unset_knobs() {
        let body = serde_json::to_value(QueryRequest::new("SELECT 1")).unwrap();
        assert_eq!(body, serde_json::json!({"query": "SELECT 1"}));
    }

    #[test]
    fn test_engine_round_trip() {
        assert_eq!("trino".parse::<QueryEngine>().unwrap(), QueryEngine::Trino);
        assert_eq!(QueryEngine::Hive.to_string(), "hive");
        assert!("spark".parse::<QueryEngine>().is_err());
    }

    #[test]
    fn test_status_terminal_states() {
        assert!(JobStatus::Success.is_finished());
        assert!(JobStatus::Killed.is_finished());
        assert!(!JobStatus::Queued.is_finished());
        assert!(!JobStatus::Running.is_finished());
    }
}
