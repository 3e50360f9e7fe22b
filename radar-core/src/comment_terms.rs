use std::sync::Arc;

use radar_common::{RadarError, Result};

use crate::matcher;
use crate::models::{CommentTermsReport, CommentTermsResult, SortKey, TermQuery, TermTotals, Video};
use crate::ranker;
use crate::search::{clamp_pages, clamp_per_page};
use crate::traits::VideoPlatform;

/// Parameters of a standalone comment-terms run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentTermsRequest {
    pub query: String,
    pub pages: u32,
    pub per_page: u32,
    pub top_videos: usize,
    pub terms: TermQuery,
    pub comments_per_video: usize,
}

impl CommentTermsRequest {
    /// Blank queries and empty term lists are rejected before any I/O.
    pub fn validate(&self) -> Result<()> {
        if self.query.trim().is_empty() {
            return Err(RadarError::InvalidInput("enter a search query".into()));
        }
        if self.terms.is_empty() {
            return Err(RadarError::InvalidInput(
                "enter at least one term (comma-separated)".into(),
            ));
        }
        Ok(())
    }
}

/// Fetches comments per video, matches terms, aggregates per-term totals.
#[derive(Clone)]
pub struct CommentTermsService {
    platform: Arc<dyn VideoPlatform>,
}

impl CommentTermsService {
    pub fn new(platform: Arc<dyn VideoPlatform>) -> Self {
        Self { platform }
    }

    /// Search, rank by views (regardless of any caller sort), keep the top
    /// `top_videos`, then analyse their comments. No filtering.
    pub async fn run(&self, req: &CommentTermsRequest) -> CommentTermsReport {
        let ids = self
            .platform
            .search_video_ids(
                &req.query,
                clamp_pages(req.pages),
                clamp_per_page(req.per_page),
            )
            .await;
        let videos = self.platform.fetch_videos(&ids).await;

        let mut ranked = ranker::sort(videos, SortKey::Views);
        ranked.truncate(req.top_videos.max(1));

        self.run_on_videos(&ranked, &req.terms, req.comments_per_video)
            .await
    }

    /// Analyse comments of the given videos; nothing is searched or refetched.
    pub async fn run_on_videos(
        &self,
        videos: &[Video],
        terms: &TermQuery,
        comments_per_video: usize,
    ) -> CommentTermsReport {
        let mut results = Vec::new();
        let mut term_totals = TermTotals::new();

        for video in videos {
            let comments = if comments_per_video == 0 {
                Vec::new()
            } else {
                self.platform
                    .fetch_comment_text(&video.video_id, comments_per_video)
                    .await
            };

            let summary = matcher::match_comments(&comments, terms);
            let per_term = matcher::unique_comment_counts(&comments, terms);
            term_totals.merge(&per_term);

            tracing::debug!(
                target: "radar.comment_terms",
                video_id = %video.video_id,
                fetched = comments.len(),
                matched = summary.matched_comments,
                hits = summary.total_hits,
                "comment_terms.video"
            );

            if summary.matched_comments > 0 {
                results.push(CommentTermsResult {
                    video: video.clone(),
                    total_term_hits: summary.total_hits,
                    matched_comments: summary.matched_comments,
                    samples: summary.samples,
                    per_term_unique_comments: per_term,
                });
            }
        }

        results.sort_by(|a, b| {
            (b.total_term_hits, b.matched_comments).cmp(&(a.total_term_hits, a.matched_comments))
        });

        tracing::info!(
            target: "radar.comment_terms",
            videos = videos.len(),
            with_matches = results.len(),
            terms = terms.terms().len(),
            mode = terms.mode.as_str(),
            "comment_terms.done"
        );
        CommentTermsReport {
            results,
            term_totals,
        }
    }
}
