use std::sync::Arc;

use radar_common::{RadarError, Result};

use crate::filter;
use crate::models::{Filters, SortKey, Video};
use crate::ranker;
use crate::traits::{MAX_PAGE_SIZE, VideoPlatform};

/// Parameters of one search invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub pages: u32,
    pub per_page: u32,
    pub top: usize,
    pub sort: SortKey,
    pub filters: Option<Filters>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            pages: 2,
            per_page: 25,
            top: 20,
            sort: SortKey::Views,
            filters: None,
        }
    }

    /// Reject a blank query before anything touches the network.
    pub fn validate(&self) -> Result<()> {
        if self.query.trim().is_empty() {
            return Err(RadarError::InvalidInput("enter a search query".into()));
        }
        Ok(())
    }

}

/// At least one result page is always requested.
pub fn clamp_pages(pages: u32) -> u32 {
    pages.max(1)
}

/// Page size within `1..=MAX_PAGE_SIZE`.
pub fn clamp_per_page(per_page: u32) -> u32 {
    per_page.clamp(1, MAX_PAGE_SIZE)
}

/// Search -> fetch -> filter -> rank -> truncate.
#[derive(Clone)]
pub struct SearchService {
    platform: Arc<dyn VideoPlatform>,
}

impl SearchService {
    pub fn new(platform: Arc<dyn VideoPlatform>) -> Self {
        Self { platform }
    }

    pub async fn search(&self, req: &SearchRequest) -> Vec<Video> {
        let ids = self
            .platform
            .search_video_ids(
                &req.query,
                clamp_pages(req.pages),
                clamp_per_page(req.per_page),
            )
            .await;
        let fetched = self.platform.fetch_videos(&ids).await;
        let candidates = fetched.len();

        let kept = match &req.filters {
            Some(filters) => filter::apply(fetched, filters),
            None => fetched,
        };
        let mut ranked = ranker::sort(kept, req.sort);
        ranked.truncate(req.top.max(1));

        tracing::info!(
            target: "radar.search",
            query = %req.query,
            ids = ids.len(),
            candidates,
            returned = ranked.len(),
            sort = req.sort.as_str(),
            "search.done"
        );
        ranked
    }
}
