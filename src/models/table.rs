//! Table models

use crate::decode::{FlexTime, FlexValue};
use serde::{Deserialize, Serialize};

/// A table on the core API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Table name
    pub name: String,
    /// Table type (`log` is the only kind still created)
    #[serde(rename = "type", default)]
    pub table_type: Option<String>,
    /// Record count
    #[serde(default)]
    pub count: Option<u64>,
    /// Stored schema, a JSON-encoded string or null
    #[serde(default)]
    pub schema: FlexValue,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<FlexTime>,
    /// Last update time
    #[serde(default)]
    pub updated_at: Option<FlexTime>,
    /// Timestamp of the newest record
    #[serde(default)]
    pub last_log_timestamp: Option<FlexTime>,
    /// Retention in days (0 = keep forever)
    #[serde(default)]
    pub expire_days: Option<u32>,
    /// Storage estimate in bytes
    #[serde(default)]
    pub estimated_storage_size: Option<u64>,
    /// Whether deletion is blocked
    #[serde(default)]
    pub delete_protected: Option<bool>,
}

/// Envelope for `GET /v3/table/list/{database}`
#[derive(Debug, Clone, Deserialize)]
pub struct TableList {
    /// The database queried
    #[serde(default)]
    pub database: Option<String>,
    /// Its tables
    pub tables: Vec<Table>,
}

/// Mutable table attributes for `POST /v3/table/update/{database}/{table}`
#[derive(Debug, Clone, Default, Serialize)]
pub struct TableUpdate {
    /// Retention in days (0 = keep forever)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire_days: Option<u32>,
    /// Block deletion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_protected: Option<bool>,
}
