use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("request build failed: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("decode error: {0}, body_snippet: {1}")]
    Decode(String, String),
    #[error("server returned error {status}: {message} (reason={})", .reason.as_deref().unwrap_or("-"))]
    Api {
        status: StatusCode,
        message: String,
        /// First machine-readable reason, e.g. `quotaExceeded`.
        reason: Option<String>,
    },
}

impl HttpError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            HttpError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            HttpError::Api { reason, .. } => reason.as_deref(),
            _ => None,
        }
    }
}

/// Pull a human message and reason out of an error body.
///
/// Understands the Google envelope
/// `{"error":{"code":403,"message":"...","errors":[{"reason":"..."}]}}`,
/// a bare `{"error":"..."}` / `{"message":"..."}`, and falls back to a
/// snippet of the body.
pub(crate) fn extract_error(body: &[u8]) -> (String, Option<String>) {
    #[derive(Deserialize)]
    struct GoogleEnv {
        error: GoogleDetail,
    }
    #[derive(Deserialize)]
    struct GoogleDetail {
        #[serde(default)]
        message: String,
        #[serde(default)]
        errors: Vec<GoogleReason>,
    }
    #[derive(Deserialize)]
    struct GoogleReason {
        #[serde(default)]
        reason: Option<String>,
        #[serde(default)]
        message: Option<String>,
    }

    #[derive(Deserialize)]
    struct Flat {
        #[serde(default)]
        message: String,
        #[serde(default)]
        error: String,
    }

    if let Ok(env) = serde_json::from_slice::<GoogleEnv>(body) {
        let first = env.error.errors.into_iter().next();
        let reason = first.as_ref().and_then(|e| e.reason.clone());
        let message = if !env.error.message.is_empty() {
            env.error.message
        } else {
            first
                .and_then(|e| e.message)
                .unwrap_or_else(|| snip_body(body))
        };
        return (message, reason);
    }
    if let Ok(flat) = serde_json::from_slice::<Flat>(body) {
        if !flat.message.is_empty() {
            return (flat.message, None);
        }
        if !flat.error.is_empty() {
            return (flat.error, None);
        }
    }
    (snip_body(body), None)
}

pub(crate) fn snip_body(body: &[u8]) -> String {
    let mut snip = String::from_utf8_lossy(body).to_string();
    if snip.len() > 500 {
        let mut cut = 500;
        while !snip.is_char_boundary(cut) {
            cut -= 1;
        }
        snip.truncate(cut);
        snip.push_str("...");
    }
    snip
}
