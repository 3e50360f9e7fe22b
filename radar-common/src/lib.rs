//! Common types shared across the yt-radar crates.
//!
//! This crate is intentionally small so every other crate can depend on it:
//!
//! - [`RadarError`] and [`Result`]: shared error handling
//! - [`ApiKey`]: the platform credential, redacted whenever it is formatted
//! - [`observability`]: centralised tracing/logging initialisation
//!
//! # Examples
//!
//! ```rust
//! use radar_common::ApiKey;
//!
//! let key = ApiKey::new("  AIza-secret  ").expect("non-empty key");
//! assert_eq!(key.expose(), "AIza-secret");
//! assert_eq!(format!("{key}"), "<redacted>");
//! assert!(!format!("{key:?}").contains("secret"));
//! ```
use std::fmt;

pub mod observability;

/// Error types used across the yt-radar workspace.
#[derive(thiserror::Error, Debug)]
pub enum RadarError {
    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No platform API key could be resolved. This is the only hard stop.
    #[error("{name} not set.\nSet it in your environment, or create a config file:\n\n  {path}\n  {name}=YOUR_KEY_HERE\n")]
    MissingApiKey { name: String, path: String },

    /// User input was rejected before any network activity started.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The video platform could not be reached or refused a request.
    #[error("Platform error: {0}")]
    Platform(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A background task failed or panicked.
    #[error("Task '{task}' failed: {message}")]
    Task { task: String, message: String },
}

/// Convenient alias for results that use [`RadarError`].
pub type Result<T> = std::result::Result<T, RadarError>;

/// Platform API key. Never printed in clear text.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Trims the raw value; returns `None` when nothing is left.
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The secret value, for the one place that must send it.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&"<redacted>").finish()
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}
