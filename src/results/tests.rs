//! Tests for the streaming result cursor

use super::*;
use crate::error::Error;
use bytes::Bytes;
use futures::stream;
use serde_json::{json, Value};

fn cursor_over(chunks: Vec<&'static [u8]>) -> ResultCursor {
    ResultCursor::from_byte_stream(stream::iter(
        chunks.into_iter().map(|c| Ok(Bytes::from_static(c))),
    ))
}

#[tokio::test]
async fn test_three_lines_without_trailing_newline() {
    let mut cursor = cursor_over(vec![b"{\"id\":1}\n{\"id\":2}\n{\"id\":3}"]);

    for expected in 1..=3 {
        assert!(cursor.advance().await);
        let record: Value = cursor.decode_current().unwrap();
        assert_eq!(record, json!({"id": expected}));
    }

    assert!(!cursor.advance().await);
    assert!(cursor.last_error().is_none());
}

#[tokio::test]
async fn test_end_of_stream_is_sticky() {
    let mut cursor = cursor_over(vec![b"{\"id\":1}\n"]);

    assert!(cursor.advance().await);
    assert!(!cursor.advance().await);
    assert!(!cursor.advance().await);
}

#[tokio::test]
async fn test_line_split_across_chunks() {
    let mut cursor = cursor_over(vec![b"{\"id\"", b":1}\n{\"i", b"d\":2}\n"]);

    assert!(cursor.advance().await);
    assert_eq!(cursor.current_text(), "{\"id\":1}");
    assert!(cursor.advance().await);
    assert_eq!(cursor.current_text(), "{\"id\":2}");
    assert!(!cursor.advance().await);
}

#[tokio::test]
async fn test_crlf_line_endings() {
    let mut cursor = cursor_over(vec![b"{\"id\":1}\r\n{\"id\":2}\r\n"]);

    assert!(cursor.advance().await);
    assert_eq!(cursor.current_bytes(), b"{\"id\":1}");
    assert!(cursor.advance().await);
    assert_eq!(cursor.current_bytes(), b"{\"id\":2}");
}

#[tokio::test]
async fn test_empty_body() {
    let mut cursor = cursor_over(vec![]);
    assert!(!cursor.advance().await);
    assert!(cursor.last_error().is_none());
}

#[tokio::test]
async fn test_malformed_line_does_not_stop_iteration() {
    let mut cursor = cursor_over(vec![b"{\"id\":1}\nnot json{\n{\"id\":3}\n"]);

    assert!(cursor.advance().await);
    assert!(cursor.decode_current::<Value>().is_ok());

    // The malformed line still counts as a line read.
    assert!(cursor.advance().await);
    let err = cursor.decode_current::<Value>().unwrap_err();
    match &err {
        Error::ResultDecode { line, .. } => assert_eq!(&line[..], b"not json{"),
        other => panic!("unexpected error: {other}"),
    }

    assert!(cursor.advance().await);
    assert_eq!(
        cursor.decode_current::<Value>().unwrap(),
        json!({"id": 3})
    );
    assert!(!cursor.advance().await);
    assert!(cursor.last_error().is_none());
}

#[tokio::test]
async fn test_decode_current_does_not_move_the_cursor() {
    let mut cursor = cursor_over(vec![b"{\"id\":1}\n{\"id\":2}\n"]);

    assert!(cursor.advance().await);
    let first: Value = cursor.decode_current().unwrap();
    let again: Value = cursor.decode_current().unwrap();
    assert_eq!(first, again);
    assert_eq!(first, json!({"id": 1}));
}

#[tokio::test]
async fn test_transport_error_is_sticky_and_discards_partial() {
    let chunks: Vec<crate::error::Result<Bytes>> = vec![
        Ok(Bytes::from_static(b"{\"id\":1}\n{\"id\"")),
        Err(Error::Other("connection reset".to_string())),
        Ok(Bytes::from_static(b":2}\n")),
    ];
    let mut cursor = ResultCursor::from_byte_stream(stream::iter(chunks));

    assert!(cursor.advance().await);
    assert_eq!(cursor.current_text(), "{\"id\":1}");

    // The buffered half-line is not surfaced once the stream fails.
    assert!(!cursor.advance().await);
    assert!(!cursor.advance().await);

    let err = cursor.last_error().unwrap();
    assert!(err.to_string().contains("connection reset"));
}

#[tokio::test]
async fn test_release_is_idempotent_and_ends_iteration() {
    let mut cursor = cursor_over(vec![b"{\"id\":1}\n{\"id\":2}\n{\"id\":3}\n"]);

    assert!(cursor.advance().await);
    cursor.release();
    cursor.release();

    assert!(!cursor.advance().await);
    // The line read before release stays accessible.
    assert_eq!(cursor.current_text(), "{\"id\":1}");
    assert!(cursor.last_error().is_none());
}

#[tokio::test]
async fn test_release_before_any_advance() {
    let mut cursor = cursor_over(vec![b"{\"id\":1}\n"]);
    cursor.release();
    assert!(!cursor.advance().await);
}

#[tokio::test]
async fn test_release_after_exhaustion() {
    let mut cursor = cursor_over(vec![b"{\"id\":1}"]);
    assert!(cursor.advance().await);
    assert!(!cursor.advance().await);
    cursor.release();
    assert!(!cursor.advance().await);
}

#[tokio::test]
async fn test_blank_lines_count_as_lines() {
    let mut cursor = cursor_over(vec![b"{\"id\":1}\n\n{\"id\":2}\n"]);

    assert!(cursor.advance().await);
    assert!(cursor.advance().await);
    assert_eq!(cursor.current_bytes(), b"");
    assert!(cursor.decode_current::<Value>().is_err());
    assert!(cursor.advance().await);
    assert!(!cursor.advance().await);
}

#[tokio::test]
async fn test_decode_into_typed_struct() {
    #[derive(Debug, PartialEq, serde::Deserialize)]
    struct Row {
        id: u64,
        name: String,
    }

    let mut cursor = cursor_over(vec![b"{\"id\":7,\"name\":\"alice\"}\n"]);
    assert!(cursor.advance().await);
    let row: Row = cursor.decode_current().unwrap();
    assert_eq!(
        row,
        Row {
            id: 7,
            name: "alice".to_string()
        }
    );
}
