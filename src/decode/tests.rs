//! Tests for the wire-format tolerant field types

use super::*;
use crate::error::Error;
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::json;
use test_case::test_case;

// ============================================================================
// FlexValue
// ============================================================================

#[test]
fn test_null_decodes_absent() {
    let value: FlexValue = serde_json::from_str("null").unwrap();
    assert_eq!(value, FlexValue::Absent);
    assert!(value.is_absent());
    assert_eq!(value.as_text(), None);
}

#[test]
fn test_absent_encodes_null_and_round_trips() {
    let encoded = serde_json::to_string(&FlexValue::Absent).unwrap();
    assert_eq!(encoded, "null");
    let decoded: FlexValue = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, FlexValue::Absent);
}

#[test_case(""; "empty string")]
#[test_case("SELECT 1"; "plain sql")]
#[test_case("12345"; "digits in a string")]
#[test_case("{\"a\":1}"; "object text in a string")]
fn test_string_round_trips_exactly(text: &str) {
    let wire = serde_json::to_string(text).unwrap();
    let decoded: FlexValue = serde_json::from_str(&wire).unwrap();
    assert_eq!(decoded.as_text(), Some(text));

    let encoded = serde_json::to_string(&decoded).unwrap();
    assert_eq!(encoded, wire);
}

#[test_case("0", "0")]
#[test_case("42", "42")]
#[test_case("-7", "-7")]
#[test_case("8592174029", "8592174029"; "id wider than u32")]
#[test_case("1.5", "1.5"; "float keeps its text")]
fn test_number_decodes_to_decimal_text(wire: &str, expected: &str) {
    let decoded: FlexValue = serde_json::from_str(wire).unwrap();
    assert_eq!(decoded.as_text(), Some(expected));

    // Value survives, format does not: re-encoding yields a string token.
    let encoded = serde_json::to_string(&decoded).unwrap();
    assert_eq!(encoded, format!("\"{expected}\""));
}

#[test]
fn test_object_decodes_to_compact_json() {
    let decoded: FlexValue = serde_json::from_value(json!({"sql": "SELECT 1"})).unwrap();
    assert_eq!(decoded.as_text(), Some(r#"{"sql":"SELECT 1"}"#));
}

#[test]
fn test_object_encode_then_decode_is_idempotent() {
    let decoded: FlexValue =
        serde_json::from_str(r#"{"sql":"SELECT 1","priority":0}"#).unwrap();
    let text = decoded.as_text().unwrap().to_string();

    // Once textual, the payload rides through another decode unchanged.
    let encoded = serde_json::to_string(&decoded).unwrap();
    let again: FlexValue = serde_json::from_str(&encoded).unwrap();
    assert_eq!(again.as_text(), Some(text.as_str()));
}

#[test_case("true"; "boolean")]
#[test_case("[1,2]"; "array")]
fn test_unsupported_token_kinds_fail(wire: &str) {
    let result = serde_json::from_str::<FlexValue>(wire);
    assert!(result.is_err());
}

#[test]
fn test_from_value_names_the_field() {
    let err = FlexValue::from_value("query", &json!([1, 2])).unwrap_err();
    match &err {
        Error::MalformedField { field, kind } => {
            assert_eq!(field, "query");
            assert_eq!(*kind, "array");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("query"));
    assert!(err.to_string().contains("array"));
}

#[test]
fn test_from_value_accepts_all_wire_forms() {
    assert_eq!(
        FlexValue::from_value("id", &json!(null)).unwrap(),
        FlexValue::Absent
    );
    assert_eq!(
        FlexValue::from_value("id", &json!("12")).unwrap().as_text(),
        Some("12")
    );
    assert_eq!(
        FlexValue::from_value("id", &json!(12)).unwrap().as_text(),
        Some("12")
    );
    assert_eq!(
        FlexValue::from_value("q", &json!({"sql":"SELECT 1"}))
            .unwrap()
            .as_text(),
        Some(r#"{"sql":"SELECT 1"}"#)
    );
}

#[derive(Debug, Deserialize)]
struct Record {
    #[serde(default)]
    schema: FlexValue,
}

#[test]
fn test_missing_field_is_absent() {
    let record: Record = serde_json::from_str("{}").unwrap();
    assert!(record.schema.is_absent());

    let record: Record = serde_json::from_str(r#"{"schema": 101}"#).unwrap();
    assert_eq!(record.schema.as_text(), Some("101"));
}

// ============================================================================
// FlexTime
// ============================================================================

#[test]
fn test_epoch_and_rfc3339_decode_to_same_instant() {
    // 1736528737 == 2025-01-10T17:05:37Z
    let from_epoch: FlexTime = serde_json::from_str("1736528737").unwrap();
    let from_text: FlexTime = serde_json::from_str("\"2025-01-10T17:05:37Z\"").unwrap();
    assert_eq!(from_epoch, from_text);
    assert_eq!(from_epoch.epoch_seconds(), 1_736_528_737);
}

#[test]
fn test_offset_normalizes_to_same_instant() {
    let zulu: FlexTime = serde_json::from_str("\"2025-01-10T17:05:37.259Z\"").unwrap();
    let offset: FlexTime = serde_json::from_str("\"2025-01-10T18:05:37.259+01:00\"").unwrap();
    assert_eq!(zulu, offset);
}

#[test]
fn test_epoch_as_string_matches_epoch_number() {
    let from_number: FlexTime = serde_json::from_str("1736528737").unwrap();
    let from_string: FlexTime = serde_json::from_str("\"1736528737\"").unwrap();
    assert_eq!(from_number, from_string);
}

#[test]
fn test_fractional_seconds_survive() {
    let t: FlexTime = serde_json::from_str("\"2025-01-10T17:05:37.259Z\"").unwrap();
    assert_eq!(t.instant().timestamp_subsec_millis(), 259);
}

#[test_case("\"not a time\""; "prose")]
#[test_case("\"2025-01-10 17:05:37\""; "missing offset")]
#[test_case("true"; "boolean")]
#[test_case("[]"; "array")]
fn test_malformed_timestamps_fail(wire: &str) {
    assert!(serde_json::from_str::<FlexTime>(wire).is_err());
}

#[test]
fn test_parse_reports_malformed_timestamp() {
    let err = FlexTime::parse("tomorrow").unwrap_err();
    assert!(matches!(err, Error::MalformedTimestamp { .. }));
    assert!(err.to_string().contains("tomorrow"));
}

#[test]
fn test_serializes_as_rfc3339() {
    let t = FlexTime::from_epoch(1_736_528_737).unwrap();
    assert_eq!(
        serde_json::to_string(&t).unwrap(),
        "\"2025-01-10T17:05:37Z\""
    );
}

#[test]
fn test_ordering_is_on_the_instant() {
    let earlier = FlexTime::parse("2025-01-10T00:00:00Z").unwrap();
    let later = FlexTime::parse("1736528737").unwrap();
    assert!(earlier < later);
}
