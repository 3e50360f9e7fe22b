use std::collections::HashMap;

use crate::comment_terms::CommentTermsService;
use crate::models::{CommentTermsReport, CommentTermsResult, TermQuery, Video};
use crate::search::{SearchRequest, SearchService};

/// Search results plus the comment analysis of the leading videos.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    /// Every video the search returned, in ranked order.
    pub videos: Vec<Video>,
    pub report: CommentTermsReport,
}

impl Analysis {
    pub fn analysis_by_video_id(&self) -> HashMap<String, CommentTermsResult> {
        self.report
            .results
            .iter()
            .map(|r| (r.video.video_id.clone(), r.clone()))
            .collect()
    }
}

/// Search (filters, sort and top honored), then term-match the comments of
/// the first `top_videos` results.
#[derive(Clone)]
pub struct Analyzer {
    search: SearchService,
    comment_terms: CommentTermsService,
}

impl Analyzer {
    pub fn new(search: SearchService, comment_terms: CommentTermsService) -> Self {
        Self {
            search,
            comment_terms,
        }
    }

    pub async fn analyze(
        &self,
        req: &SearchRequest,
        terms: &TermQuery,
        top_videos: usize,
        comments_per_video: usize,
    ) -> Analysis {
        let videos = self.search.search(req).await;
        let picked = top_videos.max(1).min(videos.len());
        let report = self
            .comment_terms
            .run_on_videos(&videos[..picked], terms, comments_per_video)
            .await;
        Analysis { videos, report }
    }
}
