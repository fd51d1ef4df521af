//! Endpoint service handles
//!
//! One struct per endpoint family. Every method follows the same shape:
//! build a path against the surface's endpoint, optionally serialize a
//! request body, send through the shared [`crate::http::HttpClient`], and
//! decode the JSON response into a typed model.

mod bulk_import;
mod cdp;
mod databases;
mod jobs;
mod policies;
mod tables;
mod users;
mod workflows;

pub use bulk_import::BulkImportService;
pub use cdp::CdpService;
pub use databases::DatabaseService;
pub use jobs::JobService;
pub use policies::PolicyService;
pub use tables::TableService;
pub use users::UserService;
pub use workflows::WorkflowService;

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// Platform naming rule for databases and tables
static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9_]{3,255}$").unwrap());

/// Reject names the platform would refuse, before building a request
pub(crate) fn validate_name(kind: &'static str, name: &str) -> Result<()> {
    if NAME_RE.is_match(name) {
        Ok(())
    } else {
        Err(Error::InvalidName {
            kind,
            name: name.to_string(),
        })
    }
}
