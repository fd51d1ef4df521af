//! Database models

use crate::decode::FlexTime;
use serde::{Deserialize, Serialize};

/// A database on the core API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Database {
    /// Database name
    pub name: String,
    /// Total record count across all tables
    #[serde(default)]
    pub count: Option<u64>,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<FlexTime>,
    /// Last update time
    #[serde(default)]
    pub updated_at: Option<FlexTime>,
    /// Caller's permission on this database (`administrator`, `full_access`,
    /// `import_only`, `query_only`)
    #[serde(default)]
    pub permission: Option<String>,
    /// Whether deletion is blocked
    #[serde(default)]
    pub delete_protected: Option<bool>,
}

/// Envelope for `GET /v3/database/list`
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseList {
    /// The databases visible to the caller
    pub databases: Vec<Database>,
}
