//! JSON export of search results, with comment analysis when it was run.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{CommentTermsResult, Video};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentAnalysis {
    pub term_hits: usize,
    pub matched_comments: usize,
    pub samples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRecord {
    pub video_id: String,
    pub title: String,
    pub channel_title: String,
    pub published_at: String,
    pub view_count: u64,
    pub comment_count: u64,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_analysis: Option<CommentAnalysis>,
}

/// One record per video, in order; `comment_analysis` comes from
/// `analysis_by_id` when present.
pub fn records(
    videos: &[Video],
    analysis_by_id: &HashMap<String, CommentTermsResult>,
) -> Vec<ExportRecord> {
    videos
        .iter()
        .map(|v| ExportRecord {
            video_id: v.video_id.clone(),
            title: v.title.clone(),
            channel_title: v.channel_title.clone(),
            published_at: v.published_at.clone(),
            view_count: v.view_count,
            comment_count: v.comment_count,
            url: v.url(),
            comment_analysis: analysis_by_id.get(&v.video_id).map(|r| CommentAnalysis {
                term_hits: r.total_term_hits,
                matched_comments: r.matched_comments,
                samples: r.samples.clone(),
            }),
        })
        .collect()
}

/// Pretty JSON array; non-ASCII text is written as-is.
pub fn to_json_pretty(records: &[ExportRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}
