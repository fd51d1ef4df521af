//! Forward-only cursor over a newline-delimited JSON response body

use crate::error::{Error, Result};
use bytes::{Bytes, BytesMut};
use futures::stream::BoxStream;
use futures::{Stream, StreamExt, TryStreamExt};
use serde::de::DeserializeOwned;
use std::borrow::Cow;

/// Forward-only reader over a streamed result body
///
/// The cursor exclusively owns the response body it was built from. The body
/// is closed exactly once: by [`ResultCursor::release`], or on drop if the
/// caller abandons iteration early.
///
/// A malformed line does not stop iteration; [`ResultCursor::decode_current`]
/// reports the error for that line and the caller decides whether to keep
/// advancing. A transport-level read failure is sticky: iteration ends and
/// the error stays available through [`ResultCursor::last_error`].
pub struct ResultCursor {
    body: Option<BoxStream<'static, Result<Bytes>>>,
    buffer: BytesMut,
    current: Bytes,
    finished: bool,
    error: Option<Error>,
}

impl ResultCursor {
    /// Take ownership of a response body
    pub fn new(response: reqwest::Response) -> Self {
        Self::from_byte_stream(response.bytes_stream().map_err(Error::Http))
    }

    /// Build a cursor over any byte stream (chunk boundaries are arbitrary)
    pub fn from_byte_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes>> + Send + 'static,
    {
        Self {
            body: Some(stream.boxed()),
            buffer: BytesMut::new(),
            current: Bytes::new(),
            finished: false,
            error: None,
        }
    }

    /// Pull the next line; `true` when one is available
    ///
    /// Once the stream ends, fails, or is released, every further call
    /// returns `false` without touching the transport. A final line without
    /// a trailing newline still counts.
    pub async fn advance(&mut self) -> bool {
        if self.finished {
            return false;
        }

        loop {
            if let Some(pos) = memchr_newline(&self.buffer) {
                let mut line = self.buffer.split_to(pos + 1);
                line.truncate(pos);
                strip_carriage_return(&mut line);
                self.current = line.freeze();
                return true;
            }

            let Some(body) = self.body.as_mut() else {
                // Stream already drained: flush a trailing unterminated line.
                if self.buffer.is_empty() {
                    self.finished = true;
                    return false;
                }
                let line = self.buffer.split();
                self.current = line.freeze();
                return true;
            };

            match body.next().await {
                Some(Ok(chunk)) => self.buffer.extend_from_slice(&chunk),
                Some(Err(e)) => {
                    // The stream is no longer trustworthy; drop what it
                    // buffered and stop for good.
                    self.error = Some(e);
                    self.buffer.clear();
                    self.body = None;
                    self.finished = true;
                    return false;
                }
                None => {
                    self.body = None;
                }
            }
        }
    }

    /// The most recently read line, without its trailing newline
    ///
    /// Only meaningful after an [`ResultCursor::advance`] that returned
    /// `true`; before that the content is unspecified (currently empty).
    pub fn current_bytes(&self) -> &[u8] {
        &self.current
    }

    /// The most recently read line as text
    pub fn current_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.current)
    }

    /// Decode the current line as one JSON value
    ///
    /// Does not move the cursor. On failure the error carries the offending
    /// line verbatim so callers can log or skip it.
    pub fn decode_current<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.current)
            .map_err(|e| Error::result_decode(self.current.clone(), e))
    }

    /// The sticky transport error that ended iteration, if any
    ///
    /// `None` after a clean end-of-stream.
    pub fn last_error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Close the underlying response body
    ///
    /// Idempotent, and callable in any state: mid-iteration, exhausted, or
    /// errored. After release, [`ResultCursor::advance`] returns `false`;
    /// the current line stays readable.
    pub fn release(&mut self) {
        self.body = None;
        self.buffer.clear();
        self.finished = true;
    }
}

impl std::fmt::Debug for ResultCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCursor")
            .field("open", &self.body.is_some())
            .field("finished", &self.finished)
            .field("errored", &self.error.is_some())
            .finish_non_exhaustive()
    }
}

fn memchr_newline(buffer: &[u8]) -> Option<usize> {
    buffer.iter().position(|&b| b == b'\n')
}

fn strip_carriage_return(line: &mut BytesMut) {
    if line.last() == Some(&b'\r') {
        line.truncate(line.len() - 1);
    }
}
