//! Streaming query results
//!
//! Job results can run to millions of rows; the platform serves them as
//! newline-delimited JSON. [`ResultCursor`] walks that body one line at a
//! time without materializing the payload, and owns the underlying HTTP
//! response body until it is released.

mod cursor;

pub use cursor::ResultCursor;

#[cfg(test)]
mod tests;
