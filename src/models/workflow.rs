//! Workflow orchestration models
//!
//! The workflow surface speaks camelCase JSON; ids arrive as numbers or
//! strings depending on the endpoint, timestamps as RFC3339.

use crate::decode::{FlexTime, FlexValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reference to an owning project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRef {
    /// Project id
    #[serde(default)]
    pub id: FlexValue,
    /// Project name
    pub name: String,
}

/// Reference to a workflow from an attempt or schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowRef {
    /// Workflow id
    #[serde(default)]
    pub id: FlexValue,
    /// Workflow name
    pub name: String,
}

/// A workflow definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    /// Workflow id
    #[serde(default)]
    pub id: FlexValue,
    /// Workflow name
    pub name: String,
    /// Owning project
    #[serde(default)]
    pub project: Option<ProjectRef>,
    /// Deployed revision
    #[serde(default)]
    pub revision: Option<String>,
    /// Scheduling timezone
    #[serde(default)]
    pub timezone: Option<String>,
    /// The workflow definition body
    #[serde(default)]
    pub config: Option<Value>,
}

/// Envelope for `GET /api/workflows`
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowList {
    /// The workflows
    pub workflows: Vec<Workflow>,
}

/// One execution attempt of a workflow session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    /// Attempt id
    #[serde(default)]
    pub id: FlexValue,
    /// Attempt index within its session
    #[serde(default)]
    pub index: Option<u64>,
    /// The workflow executed
    #[serde(default)]
    pub workflow: Option<WorkflowRef>,
    /// Owning session id
    #[serde(default)]
    pub session_id: FlexValue,
    /// Owning session UUID
    #[serde(default)]
    pub session_uuid: Option<String>,
    /// The session's logical time
    #[serde(default)]
    pub session_time: Option<FlexTime>,
    /// Name given when retrying
    #[serde(default)]
    pub retry_attempt_name: Option<String>,
    /// Whether execution has ended
    #[serde(default)]
    pub done: bool,
    /// Whether execution ended successfully
    #[serde(default)]
    pub success: bool,
    /// Whether a kill was requested
    #[serde(default)]
    pub cancel_requested: bool,
    /// Parameters the attempt started with
    #[serde(default)]
    pub params: Option<Value>,
    /// Start time
    #[serde(default)]
    pub created_at: Option<FlexTime>,
    /// End time
    #[serde(default)]
    pub finished_at: Option<FlexTime>,
}

/// Envelope for `GET /api/attempts`
#[derive(Debug, Clone, Deserialize)]
pub struct AttemptList {
    /// The attempts
    pub attempts: Vec<Attempt>,
}

/// Filters for `GET /api/attempts`
#[derive(Debug, Clone, Default)]
pub struct AttemptListParams {
    /// Only attempts of this workflow
    pub workflow_id: Option<String>,
    /// Only attempts in this state (`running`, `done`)
    pub status: Option<String>,
}

/// Body for `POST /api/attempts`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartAttemptRequest {
    /// Workflow to run
    pub workflow_id: String,
    /// Logical session time (defaults to now on the server)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_time: Option<FlexTime>,
    /// Parameters passed to the workflow
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    /// Name for a retry of an existing session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_attempt_name: Option<String>,
}

impl StartAttemptRequest {
    /// A request with server-side session time and no parameters
    pub fn new(workflow_id: impl Into<String>) -> Self {
        Self {
            workflow_id: workflow_id.into(),
            session_time: None,
            params: None,
            retry_attempt_name: None,
        }
    }
}

/// A workflow schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    /// Schedule id
    #[serde(default)]
    pub id: FlexValue,
    /// Owning project
    #[serde(default)]
    pub project: Option<ProjectRef>,
    /// Scheduled workflow
    #[serde(default)]
    pub workflow: Option<WorkflowRef>,
    /// Next session's logical time
    #[serde(default)]
    pub next_schedule_time: Option<FlexTime>,
    /// Wall-clock time of the next run
    #[serde(default)]
    pub next_run_time: Option<FlexTime>,
    /// When the schedule was disabled, if it is
    #[serde(default)]
    pub disabled_at: Option<FlexTime>,
}

impl Schedule {
    /// Whether the schedule is currently disabled
    pub fn is_disabled(&self) -> bool {
        self.disabled_at.is_some()
    }
}

/// Envelope for `GET /api/schedules`
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleList {
    /// The schedules
    pub schedules: Vec<Schedule>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_attempt_decodes_mixed_id_forms() {
        let wire = r#"{
            "id": 817,
            "index": 1,
            "workflow": {"id": "93", "name": "nightly_rollup"},
            "sessionId": "902",
            "sessionTime": "2025-01-10T00:00:00+00:00",
            "done": true,
            "success": true,
            "cancelRequested": false,
            "createdAt": "2025-01-10T00:00:12Z",
            "finishedAt": "2025-01-10T00:04:55Z"
        }"#;
        let attempt: Attempt = serde_json::from_str(wire).unwrap();
        assert_eq!(attempt.id.as_text(), Some("817"));
        assert_eq!(attempt.workflow.unwrap().id.as_text(), Some("93"));
        assert_eq!(attempt.session_id.as_text(), Some("902"));
        assert!(attempt.done && attempt.success);
    }

    #[test]
    fn test_start_attempt_request_body() {
        let body = serde_json::to_value(StartAttemptRequest {
            params: Some(serde_json::json!({"day": "2025-01-10"})),
            ..StartAttemptRequest::new("93")
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"workflowId": "93", "params": {"day": "2025-01-10"}})
        );
    }

    #[test]
    fn test_schedule_disabled_flag() {
        let wire = r#"{"id": 4, "disabledAt": "2025-01-10T17:05:37Z"}"#;
        let schedule: Schedule = serde_json::from_str(wire).unwrap();
        assert!(schedule.is_disabled());

        let wire = r#"{"id": 4, "disabledAt": null}"#;
        let schedule: Schedule = serde_json::from_str(wire).unwrap();
        assert!(!schedule.is_disabled());
    }
}
