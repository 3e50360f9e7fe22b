use std::borrow::Cow;
use std::env;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tokio::time::sleep;

use crate::error::{HttpError, extract_error, snip_body};
use crate::redact::{host_path, make_curl, redact_headers, redact_pairs};

const RAW_ENV: &str = "RADAR_HTTP_RAW";
const RAW_MAX_BODY: usize = 64 * 1024;
/// Longest `Retry-After` we are willing to sleep for.
const MAX_RETRY_AFTER: Duration = Duration::from_secs(30);

static REQUEST_SEQ: AtomicU64 = AtomicU64::new(1);

fn raw_enabled() -> bool {
    matches!(
        env::var(RAW_ENV).as_deref(),
        Ok("1") | Ok("true") | Ok("yes")
    )
}

/// Authentication strategies supported by [`HttpClient`].
///
/// ```
/// use radar_http::Auth;
///
/// let auth = Auth::Query { name: "key", value: "secret".into() };
/// match auth {
///     Auth::Query { name, .. } => assert_eq!(name, "key"),
///     Auth::None => unreachable!(),
/// }
/// ```
#[derive(Clone, Debug)]
pub enum Auth<'a> {
    /// API key sent as a query parameter (e.g. YouTube: `key=...`).
    Query { name: &'a str, value: Cow<'a, str> },
    None,
}

/// Per-request tuning knobs.
///
/// ```
/// use radar_http::RequestOpts;
/// use std::time::Duration;
///
/// let opts = RequestOpts {
///     timeout: Some(Duration::from_secs(30)),
///     retries: Some(1),
///     ..Default::default()
/// };
/// assert_eq!(opts.timeout.unwrap().as_secs(), 30);
/// assert!(opts.auth.is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestOpts<'a> {
    pub timeout: Option<Duration>,
    pub retries: Option<usize>,
    pub auth: Option<Auth<'a>>,
    pub query: Option<Vec<(&'a str, Cow<'a, str>)>>,
}

impl<'a> RequestOpts<'a> {
    /// Caller query plus the auth param, in send order.
    fn all_pairs(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<(&str, &str)> = self
            .query
            .iter()
            .flatten()
            .map(|(k, v)| (*k, v.as_ref()))
            .collect();
        if let Some(Auth::Query { name, value }) = &self.auth {
            pairs.push((*name, value.as_ref()));
        }
        pairs
    }
}

#[derive(Clone)]
pub struct HttpClient {
    base: Url,
    inner: Client,
    pub default_timeout: Duration,
    pub max_retries: usize,
}

impl HttpClient {
    /// Construct a client anchored to a base URL.
    ///
    /// ```
    /// use radar_http::{HttpClient, HttpError};
    /// use std::time::Duration;
    ///
    /// let client = HttpClient::new("https://api.example.com/v3/")?;
    /// assert_eq!(client.default_timeout, Duration::from_secs(15));
    /// assert_eq!(client.max_retries, 2);
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn new(base: &str) -> Result<Self, HttpError> {
        let base = Url::parse(base).map_err(|e| HttpError::Url(e.to_string()))?;
        let inner = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;
        Ok(Self {
            base,
            inner,
            default_timeout: Duration::from_secs(15),
            max_retries: 2,
        })
    }

    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.default_timeout = dur;
        self
    }

    /// ```
    /// use radar_http::{HttpClient, HttpError};
    ///
    /// let client = HttpClient::new("https://api.example.com")?.with_retries(0);
    /// assert_eq!(client.max_retries, 0);
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn with_retries(mut self, n: usize) -> Self {
        self.max_retries = n;
        self
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// GET `path` (relative to the base) and decode the JSON body.
    pub async fn get_json<T>(&self, path: &str, opts: RequestOpts<'_>) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
    {
        let url = self
            .base
            .join(path)
            .map_err(|e| HttpError::Url(e.to_string()))?;
        let pairs = opts.all_pairs();
        let logged_query = redact_pairs(pairs.iter().copied());
        let timeout = opts.timeout.unwrap_or(self.default_timeout);
        let max_retries = opts.retries.unwrap_or(self.max_retries);
        let auth_kind = match &opts.auth {
            Some(Auth::Query { .. }) => "query",
            Some(Auth::None) | None => "none",
        };
        let req_id = format!("r{}", REQUEST_SEQ.fetch_add(1, Ordering::Relaxed));

        let mut attempt = 0usize;
        loop {
            let rb = self
                .inner
                .get(url.clone())
                .timeout(timeout)
                .query(&pairs);

            tracing::debug!(
                req_id=%req_id,
                attempt=attempt + 1,
                max_retries,
                host_path=%host_path(&url),
                query=?logged_query,
                timeout_ms=timeout.as_millis() as u64,
                auth_kind,
                "http.request.start"
            );
            if raw_enabled() {
                let curl = make_curl(&url, &logged_query);
                tracing::debug!(target: "http.raw", %req_id, %curl, "request");
            }

            let started = Instant::now();
            let resp = match rb.send().await {
                Ok(resp) => resp,
                Err(err) => {
                    // The URL carries the key.
                    let err = err.without_url();
                    if attempt < max_retries {
                        attempt += 1;
                        let delay = backoff(attempt);
                        tracing::warn!(
                            req_id=%req_id,
                            attempt,
                            max_retries,
                            backoff_ms=delay.as_millis() as u64,
                            message=%err,
                            "http.retrying.network_send"
                        );
                        sleep(delay).await;
                        continue;
                    }
                    tracing::warn!(req_id=%req_id, attempt, message=%err, "http.network_error.send");
                    return Err(HttpError::Network(err.to_string()));
                }
            };

            let status = resp.status();
            let headers = resp.headers().clone();
            let bytes = match resp.bytes().await {
                Ok(bytes) => bytes,
                Err(err) => {
                    let err = err.without_url();
                    if attempt < max_retries {
                        attempt += 1;
                        let delay = backoff(attempt);
                        tracing::warn!(
                            req_id=%req_id,
                            attempt,
                            max_retries,
                            backoff_ms=delay.as_millis() as u64,
                            message=%err,
                            "http.retrying.network_body"
                        );
                        sleep(delay).await;
                        continue;
                    }
                    tracing::warn!(req_id=%req_id, attempt, message=%err, "http.network_error.body");
                    return Err(HttpError::Network(err.to_string()));
                }
            };
            let duration_ms = started.elapsed().as_millis() as u64;

            tracing::debug!(
                req_id=%req_id,
                %status,
                duration_ms,
                body_len=bytes.len(),
                "http.response.headers"
            );
            if raw_enabled() {
                let shown = &bytes[..bytes.len().min(RAW_MAX_BODY)];
                tracing::info!(
                    target: "http.raw",
                    %req_id,
                    %status,
                    duration_ms,
                    headers=?redact_headers(&headers),
                    body=%String::from_utf8_lossy(shown),
                    truncated=bytes.len() > RAW_MAX_BODY
                );
            }

            let snippet = snip_body(&bytes);
            tracing::trace!(req_id=%req_id, body_snippet=%snippet, "http.response.body_snippet");

            if status.is_success() {
                return serde_json::from_slice::<T>(&bytes).map_err(|e| {
                    tracing::warn!(
                        req_id=%req_id,
                        serde_line=%e.line(),
                        serde_col=%e.column(),
                        serde_err=%e,
                        body_snippet=%snippet,
                        "http.response.decode_error"
                    );
                    HttpError::Decode(e.to_string(), snippet)
                });
            }

            let (message, reason) = extract_error(&bytes);
            let is_429 = status == StatusCode::TOO_MANY_REQUESTS;
            if (is_429 || status.is_server_error()) && attempt < max_retries {
                attempt += 1;
                let delay = retry_delay(&headers, is_429, attempt);
                tracing::warn!(
                    req_id=%req_id,
                    %status,
                    attempt,
                    max_retries,
                    backoff_ms=delay.as_millis() as u64,
                    message=%message,
                    "http.retrying"
                );
                sleep(delay).await;
                continue;
            }

            tracing::warn!(
                req_id=%req_id,
                %status,
                message=%message,
                reason=?reason,
                "http.error"
            );
            return Err(HttpError::Api {
                status,
                message,
                reason,
            });
        }
    }
}

fn backoff(attempt: usize) -> Duration {
    let shift = attempt.saturating_sub(1).min(10) as u32;
    Duration::from_millis(200u64.saturating_mul(1u64 << shift))
}

fn retry_delay(h: &HeaderMap, is_429: bool, attempt: usize) -> Duration {
    match retry_after_secs(h) {
        Some(secs) => Duration::from_secs(secs).min(MAX_RETRY_AFTER),
        None if is_429 => backoff(attempt).max(Duration::from_millis(1100)),
        None => backoff(attempt),
    }
}

fn retry_after_secs(h: &HeaderMap) -> Option<u64> {
    h.get(RETRY_AFTER)?.to_str().ok()?.trim().parse().ok()
}
