//! CDP models: audiences, segments, activations, journeys
//!
//! The CDP surface speaks camelCase JSON with RFC3339 timestamps, unlike the
//! core API's snake_case and epoch seconds. [`crate::decode::FlexTime`]
//! absorbs the timestamp difference; ids here are always strings.

use crate::decode::{FlexTime, FlexValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A parent audience (master segment)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Audience {
    /// Audience id
    pub id: String,
    /// Audience name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Profile count at last build
    #[serde(default)]
    pub population: Option<u64>,
    /// Build schedule kind (`none`, `daily`, `hourly`)
    #[serde(default)]
    pub schedule_type: Option<String>,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<FlexTime>,
    /// Last update time
    #[serde(default)]
    pub updated_at: Option<FlexTime>,
}

/// A segment within an audience
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Segment id
    pub id: String,
    /// Owning audience id
    #[serde(default)]
    pub audience_id: Option<String>,
    /// Segment name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the segment is evaluated in realtime
    #[serde(default)]
    pub realtime: Option<bool>,
    /// Profile count at last evaluation
    #[serde(default)]
    pub count_population: Option<u64>,
    /// Filter rule, an object on the wire, captured as its JSON text
    #[serde(default)]
    pub rule: FlexValue,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<FlexTime>,
    /// Last update time
    #[serde(default)]
    pub updated_at: Option<FlexTime>,
}

/// Body for `POST /audiences/{id}/segments`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentRequest {
    /// Segment name
    pub name: String,
    /// Free-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Filter rule
    pub rule: Value,
}

impl SegmentRequest {
    /// A request with a name and filter rule
    pub fn new(name: impl Into<String>, rule: Value) -> Self {
        Self {
            name: name.into(),
            description: None,
            rule,
        }
    }
}

/// An activation (syndication of a segment to a destination)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activation {
    /// Activation id
    pub id: String,
    /// Activation name
    pub name: String,
    /// Owning audience id
    #[serde(default)]
    pub audience_id: Option<String>,
    /// Owning segment id
    #[serde(default)]
    pub segment_id: Option<String>,
    /// Destination connection id
    #[serde(default)]
    pub connection_id: Option<String>,
    /// Last run state
    #[serde(default)]
    pub status: Option<String>,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<FlexTime>,
    /// Last update time
    #[serde(default)]
    pub updated_at: Option<FlexTime>,
}

/// Body for `POST /audiences/{id}/segments/{sid}/activations`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivationRequest {
    /// Activation name
    pub name: String,
    /// Destination connection id
    pub connection_id: String,
    /// Columns to export (empty = all)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<String>,
}

impl ActivationRequest {
    /// A request exporting all columns
    pub fn new(name: impl Into<String>, connection_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            connection_id: connection_id.into(),
            columns: Vec::new(),
        }
    }
}

/// Response to `POST /activations/{id}/run`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivationRun {
    /// The triggered run's id
    #[serde(default)]
    pub id: FlexValue,
    /// Run state at acceptance
    #[serde(default)]
    pub status: Option<String>,
}

/// Execution state of a journey
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JourneyState {
    /// Being edited, not yet launched
    Draft,
    /// Live
    Running,
    /// Suspended by a caller
    Paused,
    /// Finished
    Completed,
}

/// A customer journey
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Journey {
    /// Journey id
    pub id: String,
    /// Owning audience id
    #[serde(default)]
    pub audience_id: Option<String>,
    /// Journey name
    pub name: String,
    /// Execution state
    #[serde(default)]
    pub state: Option<JourneyState>,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<FlexTime>,
    /// Last update time
    #[serde(default)]
    pub updated_at: Option<FlexTime>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_segment_decodes_camel_case_with_rfc3339_times() {
        let wire = r#"{
            "id": "233941",
            "audienceId": "344",
            "name": "lapsed_buyers",
            "realtime": false,
            "countPopulation": 41233,
            "rule": {"type": "And", "conditions": []},
            "createdAt": "2025-01-10T17:05:37.259Z",
            "updatedAt": "2025-01-10T17:05:37.259Z"
        }"#;
        let segment: Segment = serde_json::from_str(wire).unwrap();
        assert_eq!(segment.audience_id.as_deref(), Some("344"));
        assert_eq!(segment.count_population, Some(41233));
        assert_eq!(
            segment.rule.as_text(),
            Some(r#"{"type":"And","conditions":[]}"#)
        );
        assert_eq!(
            segment.created_at.unwrap().epoch_seconds(),
            1_736_528_737
        );
    }

    #[test]
    fn test_activation_request_skips_empty_columns() {
        let body = serde_json::to_value(ActivationRequest::new("sync", "c-1")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"name": "sync", "connectionId": "c-1"})
        );
    }
}
