//! Keyword matching over comment text.
//!
//! Text and terms are lowercased before comparison. A term hit is one
//! non-overlapping occurrence, scanning left to right (`"aaaa"` holds two
//! hits of `"aa"`).

use crate::models::{MatchMode, TermQuery, TermTotals};

pub const MAX_SAMPLES: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSummary {
    /// Term hits summed over matched comments only.
    pub total_hits: usize,
    pub matched_comments: usize,
    /// First [`MAX_SAMPLES`] matched comments, verbatim.
    pub samples: Vec<String>,
}

/// Lowercased terms paired with their display spelling.
fn folded_terms(query: &TermQuery) -> Vec<(String, &str)> {
    query
        .terms()
        .iter()
        .map(|t| (t.to_lowercase(), t.as_str()))
        .collect()
}

pub fn match_comments<S: AsRef<str>>(comments: &[S], query: &TermQuery) -> MatchSummary {
    let terms = folded_terms(query);
    let mut summary = MatchSummary::default();
    if terms.is_empty() {
        return summary;
    }

    for comment in comments {
        let original = comment.as_ref();
        if original.is_empty() {
            continue;
        }
        let text = original.to_lowercase();

        let hits: usize = terms.iter().map(|(t, _)| text.matches(t.as_str()).count()).sum();
        let matched = match query.mode {
            MatchMode::All => terms.iter().all(|(t, _)| text.contains(t.as_str())),
            MatchMode::Any => terms.iter().any(|(t, _)| text.contains(t.as_str())),
        };

        if matched {
            summary.matched_comments += 1;
            summary.total_hits += hits;
            if summary.samples.len() < MAX_SAMPLES {
                summary.samples.push(original.to_string());
            }
        }
    }
    summary
}

/// Per term, how many comments contain it at least once. Ignores the match
/// mode; every term is counted on its own.
pub fn unique_comment_counts<S: AsRef<str>>(comments: &[S], query: &TermQuery) -> TermTotals {
    let terms = folded_terms(query);
    let mut totals = TermTotals::new();
    for comment in comments {
        let text = comment.as_ref().to_lowercase();
        if text.is_empty() {
            continue;
        }
        for (folded, display) in &terms {
            if text.contains(folded.as_str()) {
                totals.bump(display, 1);
            }
        }
    }
    totals
}
