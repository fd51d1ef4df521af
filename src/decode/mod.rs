//! Wire-format tolerant field types
//!
//! The platform's API surfaces disagree on how the same logical field is
//! encoded: a job's `query` arrives as a raw SQL string on some endpoints
//! and as an object on others, numeric ids show up as numbers or strings
//! depending on the API family, and timestamps are epoch integers on the
//! core API but RFC3339 strings on the CDP and workflow APIs.
//!
//! The two types here absorb that drift at decode time so model structs and
//! their callers only ever see one stable shape. Adding a fourth wire form
//! later touches this module and nothing else.

mod text;
mod time;

pub use text::FlexValue;
pub use time::FlexTime;

/// Name the JSON token kind of a value, for error messages
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests;
