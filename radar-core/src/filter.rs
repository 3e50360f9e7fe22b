//! Threshold filtering over fetched videos.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

use crate::models::{Filters, Video};

/// Keep videos passing every threshold, in input order, relative to now.
pub fn apply(videos: Vec<Video>, filters: &Filters) -> Vec<Video> {
    apply_at(videos, filters, Utc::now())
}

/// [`apply`] with an explicit clock.
pub fn apply_at(videos: Vec<Video>, filters: &Filters, now: DateTime<Utc>) -> Vec<Video> {
    let cutoff = since_cutoff(filters.since_days, now);
    videos
        .into_iter()
        .filter(|v| v.view_count >= filters.min_views)
        .filter(|v| v.comment_count >= filters.min_comments)
        .filter(|v| match cutoff {
            Some(cutoff) => published_at(&v.published_at).is_some_and(|at| at >= cutoff),
            None => true,
        })
        .collect()
}

fn since_cutoff(days: Option<i64>, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let days = days?.max(0);
    let cutoff = Duration::try_days(days).and_then(|span| now.checked_sub_signed(span));
    Some(cutoff.unwrap_or(DateTime::<Utc>::MIN_UTC))
}

/// Malformed timestamps yield `None`; zone-less ones are read as UTC.
fn published_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Parse a recency bound like `"30d"` or `"7"`.
///
/// ```
/// use radar_core::filter::parse_since;
///
/// assert_eq!(parse_since("30d"), Some(30));
/// assert_eq!(parse_since(" 7D "), Some(7));
/// assert_eq!(parse_since(""), None);
/// assert_eq!(parse_since("soon"), None);
/// ```
pub fn parse_since(raw: &str) -> Option<i64> {
    let s = raw.trim().to_ascii_lowercase();
    if s.is_empty() {
        return None;
    }
    s.strip_suffix('d').unwrap_or(&s).trim().parse().ok()
}
