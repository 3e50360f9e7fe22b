use std::collections::BTreeMap;

use radar_common::{RadarError, Result};
use serde::{Deserialize, Serialize};

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// A video with its metadata and statistics, as returned by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub video_id: String,
    pub title: String,
    pub channel_title: String,
    /// ISO-8601 UTC, e.g. `2025-01-20T12:34:56Z`.
    pub published_at: String,
    pub view_count: u64,
    pub comment_count: u64,
}

impl Video {
    /// Canonical watch URL.
    ///
    /// ```
    /// use radar_core::Video;
    ///
    /// let v = Video {
    ///     video_id: "dQw4w9WgXcQ".into(),
    ///     title: String::new(),
    ///     channel_title: String::new(),
    ///     published_at: String::new(),
    ///     view_count: 0,
    ///     comment_count: 0,
    /// };
    /// assert_eq!(v.url(), "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    /// ```
    pub fn url(&self) -> String {
        format!("{WATCH_URL}{}", self.video_id)
    }
}

/// Thresholds applied by [`crate::filter::apply`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Filters {
    pub min_views: u64,
    pub min_comments: u64,
    /// Only videos published in the last N days. Negative means "now".
    pub since_days: Option<i64>,
}

/// Numeric field used for ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Views,
    Comments,
}

impl SortKey {
    /// Unknown keys fall back to [`SortKey::Views`].
    ///
    /// ```
    /// use radar_core::SortKey;
    ///
    /// assert_eq!(SortKey::parse(" Comments "), SortKey::Comments);
    /// assert_eq!(SortKey::parse("likes"), SortKey::Views);
    /// ```
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "comments" => SortKey::Comments,
            _ => SortKey::Views,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Views => "views",
            SortKey::Comments => "comments",
        }
    }
}

/// How a comment qualifies as matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// At least one term occurs.
    #[default]
    Any,
    /// Every term occurs.
    All,
}

impl MatchMode {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "all" => MatchMode::All,
            _ => MatchMode::Any,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::Any => "any",
            MatchMode::All => "all",
        }
    }
}

/// Keywords to look for in comment text.
///
/// Terms are trimmed, non-empty and unique ignoring case. Spelling is kept
/// for display; comparisons are case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermQuery {
    terms: Vec<String>,
    pub mode: MatchMode,
}

impl TermQuery {
    /// Build from arbitrary strings, dropping blanks and case-insensitive
    /// duplicates (the first spelling wins). May end up empty.
    pub fn new<I, S>(terms: I, mode: MatchMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen: Vec<String> = Vec::new();
        let mut kept = Vec::new();
        for raw in terms {
            let term = raw.as_ref().trim();
            if term.is_empty() {
                continue;
            }
            let folded = term.to_lowercase();
            if seen.contains(&folded) {
                continue;
            }
            seen.push(folded);
            kept.push(term.to_string());
        }
        Self { terms: kept, mode }
    }

    /// Parse a comma-separated list such as `"pob, league start"`.
    ///
    /// ```
    /// use radar_core::{MatchMode, TermQuery};
    ///
    /// let q = TermQuery::from_csv("pob, League Start,,POB", MatchMode::All).unwrap();
    /// assert_eq!(q.terms(), ["pob", "League Start"]);
    /// assert!(TermQuery::from_csv(" , ", MatchMode::Any).is_err());
    /// ```
    pub fn from_csv(raw: &str, mode: MatchMode) -> Result<Self> {
        let query = Self::new(raw.split(','), mode);
        if query.is_empty() {
            return Err(RadarError::InvalidInput(
                "enter at least one term (comma-separated)".into(),
            ));
        }
        Ok(query)
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Count of unique comments containing each term at least once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TermTotals(BTreeMap<String, usize>);

impl TermTotals {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn bump(&mut self, term: &str, by: usize) {
        if by == 0 {
            return;
        }
        *self.0.entry(term.to_string()).or_insert(0) += by;
    }

    pub(crate) fn merge(&mut self, other: &TermTotals) {
        for (term, n) in &other.0 {
            self.bump(term, *n);
        }
    }

    pub fn get(&self, term: &str) -> usize {
        self.0.get(term).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Highest count first; ties ordered by term, ignoring case.
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut out: Vec<(&str, usize)> = self.0.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        out.sort_by(|a, b| {
            b.1.cmp(&a.1)
                .then_with(|| a.0.to_lowercase().cmp(&b.0.to_lowercase()))
        });
        out
    }
}

/// Comment analysis of one video that had at least one matched comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentTermsResult {
    pub video: Video,
    pub total_term_hits: usize,
    pub matched_comments: usize,
    /// Up to three matched comments, verbatim, in fetch order.
    pub samples: Vec<String>,
    pub per_term_unique_comments: TermTotals,
}

/// Output of the comment terms service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentTermsReport {
    /// Sorted by `(total_term_hits, matched_comments)` descending, stable.
    pub results: Vec<CommentTermsResult>,
    pub term_totals: TermTotals,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_query_keeps_first_spelling() {
        let q = TermQuery::new(["  POB ", "pob", "", "Build"], MatchMode::Any);
        assert_eq!(q.terms(), ["POB", "Build"]);
    }

    #[test]
    fn ranked_totals_order() {
        let mut t = TermTotals::new();
        t.bump("beta", 2);
        t.bump("Alpha", 2);
        t.bump("gamma", 5);
        t.bump("zero", 0);
        assert_eq!(t.ranked(), vec![("gamma", 5), ("Alpha", 2), ("beta", 2)]);
        assert_eq!(t.get("zero"), 0);
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn match_mode_parse_falls_back_to_any() {
        assert_eq!(MatchMode::parse("ALL"), MatchMode::All);
        assert_eq!(MatchMode::parse("whatever"), MatchMode::Any);
    }
}
