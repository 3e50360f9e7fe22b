use async_trait::async_trait;

use crate::models::Video;

/// Largest page the search endpoint accepts, and the largest id batch for
/// metadata lookups.
pub const MAX_PAGE_SIZE: u32 = 50;

/// The video platform boundary. Implementations own all network I/O.
///
/// Upstream failures (network, quota, comments disabled) are absorbed here:
/// each operation returns whatever it managed to collect, possibly nothing.
#[async_trait]
pub trait VideoPlatform: Send + Sync {
    /// Candidate ids for `query` over up to `pages` pages, de-duplicated in
    /// first-seen order. Stops early when the platform has no next page.
    async fn search_video_ids(&self, query: &str, pages: u32, per_page: u32) -> Vec<String>;

    /// Metadata and statistics for `ids`, requested in batches of at most
    /// [`MAX_PAGE_SIZE`]. Missing or unparseable counts become 0.
    async fn fetch_videos(&self, ids: &[String]) -> Vec<Video>;

    /// Up to `max_comments` top-level comment texts, in platform order.
    async fn fetch_comment_text(&self, video_id: &str, max_comments: usize) -> Vec<String>;
}
