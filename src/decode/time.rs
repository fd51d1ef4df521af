//! Flexible timestamp field
//!
//! The core API encodes timestamps as unix epoch seconds, the CDP and
//! workflow APIs as RFC3339 strings with fractional seconds and a zone
//! offset. Both decode to the same UTC instant; equality is on the instant,
//! never the source text.

use crate::error::{Error, Result};
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A point in time decoded from either wire form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FlexTime(DateTime<Utc>);

impl FlexTime {
    /// Interpret whole seconds since the Unix epoch, UTC
    pub fn from_epoch(secs: i64) -> Result<Self> {
        Utc.timestamp_opt(secs, 0)
            .single()
            .map(Self)
            .ok_or_else(|| Error::malformed_timestamp(secs.to_string()))
    }

    /// Parse a wire string: an epoch integer as text, or RFC3339
    pub fn parse(text: &str) -> Result<Self> {
        if let Ok(secs) = text.parse::<i64>() {
            return Self::from_epoch(secs);
        }
        DateTime::parse_from_rfc3339(text)
            .map(|t| Self(t.with_timezone(&Utc)))
            .map_err(|_| Error::malformed_timestamp(text))
    }

    /// The decoded instant
    pub fn instant(&self) -> DateTime<Utc> {
        self.0
    }

    /// Seconds since the Unix epoch
    pub fn epoch_seconds(&self) -> i64 {
        self.0.timestamp()
    }
}

impl From<DateTime<Utc>> for FlexTime {
    fn from(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

impl fmt::Display for FlexTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl Serialize for FlexTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

struct FlexTimeVisitor;

impl Visitor<'_> for FlexTimeVisitor {
    type Value = FlexTime;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("epoch seconds or an RFC3339 timestamp")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
        FlexTime::from_epoch(v).map_err(de::Error::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
        let secs = i64::try_from(v)
            .map_err(|_| de::Error::invalid_value(de::Unexpected::Unsigned(v), &self))?;
        FlexTime::from_epoch(secs).map_err(de::Error::custom)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Self::Value, E> {
        // Some encoders widen epoch integers to floats; accept only exact ones.
        if v.fract() == 0.0 && v >= i64::MIN as f64 && v <= i64::MAX as f64 {
            FlexTime::from_epoch(v as i64).map_err(de::Error::custom)
        } else {
            Err(de::Error::invalid_value(de::Unexpected::Float(v), &self))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
        FlexTime::parse(v).map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for FlexTime {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(FlexTimeVisitor)
    }
}
