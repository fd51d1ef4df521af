//! Shared HTTP request helper
//!
//! Every service method funnels through [`HttpClient::request`]: apply
//! credentials, send with retry and optional self-throttling, turn non-2xx
//! responses into [`crate::Error::Api`], and hand back either a decoded JSON
//! body or the raw streaming response.

mod client;
mod rate_limit;

pub use client::{HttpClient, RequestBody, RequestConfig};
pub use rate_limit::RateLimiter;

#[cfg(test)]
mod tests;
