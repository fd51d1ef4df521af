//! Access-control policy models

use serde::{Deserialize, Serialize};

/// An access-control policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Policy {
    /// Policy id
    pub id: u64,
    /// Policy name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Number of users attached
    #[serde(default)]
    pub user_count: Option<u64>,
}

/// Body for `POST /v3/access_control/policies`
#[derive(Debug, Clone, Serialize)]
pub struct PolicyRequest {
    /// Policy name
    pub name: String,
    /// Free-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PolicyRequest {
    /// A request with just a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }
}
