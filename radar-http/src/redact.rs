use reqwest::Url;
use reqwest::header::HeaderMap;

pub(crate) const REDACTED: &str = "<redacted>";

const SECRET_PARAMS: &[&str] = &[
    "key",
    "api_key",
    "apikey",
    "access_token",
    "authorization",
    "auth",
    "token",
    "secret",
    "client_secret",
    "bearer",
];

pub(crate) fn is_secret_param(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    SECRET_PARAMS.contains(&lower.as_str())
}

/// Query pairs as they may be logged.
pub(crate) fn redact_pairs<'a, I>(pairs: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| {
            let v = if is_secret_param(k) { REDACTED } else { v };
            (k.to_string(), v.to_string())
        })
        .collect()
}

/// `host/path` of a URL, without its query.
pub(crate) fn host_path(url: &Url) -> String {
    format!("{}{}", url.host_str().unwrap_or("-"), url.path())
}

/// Header pairs as they may be logged.
pub(crate) fn redact_headers(h: &HeaderMap) -> Vec<(String, String)> {
    h.iter()
        .map(|(k, v)| {
            let key = k.as_str().to_string();
            let val = if key.eq_ignore_ascii_case("authorization") || key.contains("api-key") {
                REDACTED.to_string()
            } else {
                v.to_str().unwrap_or("").to_string()
            };
            (key, val)
        })
        .collect()
}

/// Best-effort curl line for repro, with secret query params redacted.
pub(crate) fn make_curl(url: &Url, query: &[(String, String)]) -> String {
    let mut shown = url.clone();
    shown.set_query(None);
    if !query.is_empty() {
        let mut pairs = shown.query_pairs_mut();
        for (k, v) in query {
            pairs.append_pair(k, v);
        }
    }
    format!("curl -XGET '{}'", shown.as_str().replace('\'', r"'\''"))
}
