//! Minimal JSON-over-HTTP client with safe logging and retries.
//!
//! - Request options: query params, query-param `Auth`, timeout, retries
//! - Redacts secret-looking query params; the key itself is never logged
//! - Retries network failures, 429 and 5xx with exponential backoff and
//!   `Retry-After` support
//! - Optional *raw* request/response logging via `RADAR_HTTP_RAW=1`
//!
//! Example (no_run):
//! ```no_run
//! # async fn demo() -> Result<(), radar_http::HttpError> {
//! use radar_http::{Auth, HttpClient, RequestOpts};
//! use std::borrow::Cow;
//!
//! let client = HttpClient::new("https://www.googleapis.com/youtube/v3/")?;
//! let got: serde_json::Value = client
//!     .get_json(
//!         "videos",
//!         RequestOpts {
//!             query: Some(vec![("part", Cow::Borrowed("id")), ("id", "abc".into())]),
//!             auth: Some(Auth::Query { name: "key", value: "secret".into() }),
//!             ..Default::default()
//!         },
//!     )
//!     .await?;
//! # Ok(()) }
//! ```
//!
//! Observability: structured `tracing` events are emitted for request start,
//! response headers, truncated body snippets, retries and final errors.

mod client;
mod error;
mod redact;

pub use client::{Auth, HttpClient, RequestOpts};
pub use error::HttpError;
pub use reqwest::StatusCode;
