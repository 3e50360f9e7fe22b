//! Turns parsed arguments into validated service calls.
use std::sync::Arc;

use radar_common::Result;
use radar_config::RadarConfig;
use radar_core::filter::parse_since;
use radar_core::{
    Analysis, Analyzer, CommentTermsReport, CommentTermsRequest, CommentTermsService, Filters,
    MatchMode, SearchRequest, SearchService, SortKey, TermQuery, Video, VideoPlatform,
};

use crate::cli::{FetchOpts, RankOpts, TermOpts};

/// A unit of background work, fully validated.
#[derive(Debug, Clone)]
pub enum Job {
    Search(SearchRequest),
    CommentTerms(CommentTermsRequest),
    Analyze {
        search: SearchRequest,
        terms: TermQuery,
        top_videos: usize,
        comments_per_video: usize,
    },
}

#[derive(Debug)]
pub enum JobOutput {
    Search(Vec<Video>),
    CommentTerms(CommentTermsReport),
    Analysis(Analysis),
}

impl Job {
    pub fn search(fetch: &FetchOpts, rank: &RankOpts, cfg: &RadarConfig) -> Result<Self> {
        let req = search_request(fetch, rank, cfg);
        req.validate()?;
        Ok(Job::Search(req))
    }

    pub fn comment_terms(fetch: &FetchOpts, terms: &TermOpts, cfg: &RadarConfig) -> Result<Self> {
        let req = CommentTermsRequest {
            query: fetch.query.clone(),
            pages: fetch.pages.unwrap_or(cfg.search.pages),
            per_page: fetch.per_page.unwrap_or(cfg.search.per_page),
            top_videos: terms.top_videos.unwrap_or(cfg.comments.top_videos),
            terms: term_query(terms, cfg)?,
            comments_per_video: terms.comments.unwrap_or(cfg.comments.comments_per_video),
        };
        req.validate()?;
        Ok(Job::CommentTerms(req))
    }

    pub fn analyze(
        fetch: &FetchOpts,
        rank: &RankOpts,
        terms: &TermOpts,
        cfg: &RadarConfig,
    ) -> Result<Self> {
        let search = search_request(fetch, rank, cfg);
        search.validate()?;
        Ok(Job::Analyze {
            search,
            terms: term_query(terms, cfg)?,
            top_videos: terms.top_videos.unwrap_or(cfg.comments.top_videos),
            comments_per_video: terms.comments.unwrap_or(cfg.comments.comments_per_video),
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Job::Search(_) => "search",
            Job::CommentTerms(_) => "comment-terms",
            Job::Analyze { .. } => "analyze",
        }
    }

    pub async fn run(self, platform: Arc<dyn VideoPlatform>) -> anyhow::Result<JobOutput> {
        let out = match self {
            Job::Search(req) => JobOutput::Search(SearchService::new(platform).search(&req).await),
            Job::CommentTerms(req) => {
                JobOutput::CommentTerms(CommentTermsService::new(platform).run(&req).await)
            }
            Job::Analyze {
                search,
                terms,
                top_videos,
                comments_per_video,
            } => {
                let analyzer = Analyzer::new(
                    SearchService::new(platform.clone()),
                    CommentTermsService::new(platform),
                );
                JobOutput::Analysis(
                    analyzer
                        .analyze(&search, &terms, top_videos, comments_per_video)
                        .await,
                )
            }
        };
        Ok(out)
    }
}

fn search_request(fetch: &FetchOpts, rank: &RankOpts, cfg: &RadarConfig) -> SearchRequest {
    let sort = rank.sort.as_deref().unwrap_or(&cfg.search.sort);
    SearchRequest {
        query: fetch.query.clone(),
        pages: fetch.pages.unwrap_or(cfg.search.pages),
        per_page: fetch.per_page.unwrap_or(cfg.search.per_page),
        top: rank.top.unwrap_or(cfg.search.top),
        sort: SortKey::parse(sort),
        filters: Some(Filters {
            min_views: rank.min_views.max(0) as u64,
            min_comments: rank.min_comments.max(0) as u64,
            since_days: parse_since(&rank.since),
        }),
    }
}

fn term_query(terms: &TermOpts, cfg: &RadarConfig) -> Result<TermQuery> {
    let mode = terms
        .match_mode
        .as_deref()
        .unwrap_or(&cfg.comments.match_mode);
    TermQuery::from_csv(&terms.terms, MatchMode::parse(mode))
}
