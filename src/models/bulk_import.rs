//! Bulk import session models

use crate::decode::FlexValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a bulk import session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkImportStatus {
    /// Accepting part uploads
    Uploading,
    /// Perform job running
    Performing,
    /// Performed, ready to commit
    Ready,
    /// Commit in progress
    Committing,
    /// Data committed to the target table
    Committed,
}

impl fmt::Display for BulkImportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Uploading => "uploading",
            Self::Performing => "performing",
            Self::Ready => "ready",
            Self::Committing => "committing",
            Self::Committed => "committed",
        };
        f.write_str(s)
    }
}

/// A bulk import session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkImport {
    /// Session name
    pub name: String,
    /// Target database
    pub database: String,
    /// Target table
    pub table: String,
    /// Lifecycle state
    #[serde(default)]
    pub status: Option<BulkImportStatus>,
    /// Perform job id, once perform has been requested
    #[serde(default)]
    pub job_id: FlexValue,
    /// Whether new part uploads are blocked
    #[serde(default)]
    pub upload_frozen: Option<bool>,
    /// Records that passed validation during perform
    #[serde(default)]
    pub valid_records: Option<u64>,
    /// Records rejected during perform
    #[serde(default)]
    pub error_records: Option<u64>,
    /// Parts that parsed cleanly
    #[serde(default)]
    pub valid_parts: Option<u64>,
    /// Parts that failed to parse
    #[serde(default)]
    pub error_parts: Option<u64>,
}

/// Envelope for `GET /v3/bulk_import/list`
#[derive(Debug, Clone, Deserialize)]
pub struct BulkImportList {
    /// The account's sessions
    pub bulk_imports: Vec<BulkImport>,
}

/// Envelope for `GET /v3/bulk_import/list_parts/{name}`
#[derive(Debug, Clone, Deserialize)]
pub struct PartList {
    /// Uploaded part names
    pub parts: Vec<String>,
}

/// Response to `POST /v3/bulk_import/perform/{name}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformResult {
    /// The perform job's id
    #[serde(default)]
    pub job_id: FlexValue,
    /// The session the job belongs to
    #[serde(default)]
    pub bulk_import: Option<String>,
}
