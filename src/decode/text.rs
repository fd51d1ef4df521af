//! Flexible text field
//!
//! Logically an optional string whose wire form may be a JSON string,
//! number, object, or null. Decoding normalizes every present form to its
//! textual payload; re-encoding always emits a plain JSON string, so the
//! number/object distinction is deliberately not round-tripped.

use crate::decode::json_kind;
use crate::error::{Error, Result};
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// A field that is text once decoded, whatever it was on the wire
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FlexValue {
    /// Wire value was `null` (or the field was missing)
    #[default]
    Absent,
    /// Wire value was a string, number, or object, captured as text
    Present(String),
}

impl FlexValue {
    /// Create a present value
    pub fn text(text: impl Into<String>) -> Self {
        Self::Present(text.into())
    }

    /// The textual payload, if present
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Absent => None,
            Self::Present(text) => Some(text),
        }
    }

    /// Whether the field was absent on the wire
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Decode a raw JSON value, naming the owning field in errors
    ///
    /// Strings are taken verbatim, numbers keep their decimal text, objects
    /// are re-serialized to compact JSON. Arrays and booleans fail.
    pub fn from_value(field: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::Absent),
            Value::String(s) => Ok(Self::Present(s.clone())),
            Value::Number(n) => Ok(Self::Present(n.to_string())),
            Value::Object(_) => {
                let compact = serde_json::to_string(value)?;
                Ok(Self::Present(compact))
            }
            other => Err(Error::malformed_field(field, json_kind(other))),
        }
    }
}

impl From<Option<String>> for FlexValue {
    fn from(value: Option<String>) -> Self {
        match value {
            None => Self::Absent,
            Some(text) => Self::Present(text),
        }
    }
}

impl From<&str> for FlexValue {
    fn from(value: &str) -> Self {
        Self::Present(value.to_string())
    }
}

impl fmt::Display for FlexValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_text().unwrap_or_default())
    }
}

impl Serialize for FlexValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Absent => serializer.serialize_unit(),
            Self::Present(text) => serializer.serialize_str(text),
        }
    }
}

struct FlexValueVisitor;

impl<'de> Visitor<'de> for FlexValueVisitor {
    type Value = FlexValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number, object, or null")
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(FlexValue::Absent)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(FlexValue::Absent)
    }

    fn visit_some<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> std::result::Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
        Ok(FlexValue::Present(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Self::Value, E> {
        Ok(FlexValue::Present(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
        Ok(FlexValue::Present(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
        Ok(FlexValue::Present(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Self::Value, E> {
        // Rust float formatting is shortest-round-trip, so no precision is
        // invented or lost relative to the wire text.
        Ok(FlexValue::Present(v.to_string()))
    }

    fn visit_map<A: MapAccess<'de>>(
        self,
        mut access: A,
    ) -> std::result::Result<Self::Value, A::Error> {
        let mut object = serde_json::Map::new();
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            object.insert(key, value);
        }
        let compact = serde_json::to_string(&Value::Object(object)).map_err(de::Error::custom)?;
        Ok(FlexValue::Present(compact))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Self::Value, E> {
        Err(de::Error::invalid_type(de::Unexpected::Bool(v), &self))
    }

    fn visit_seq<A: de::SeqAccess<'de>>(
        self,
        _access: A,
    ) -> std::result::Result<Self::Value, A::Error> {
        Err(de::Error::invalid_type(de::Unexpected::Seq, &self))
    }
}

impl<'de> Deserialize<'de> for FlexValue {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(FlexValueVisitor)
    }
}
