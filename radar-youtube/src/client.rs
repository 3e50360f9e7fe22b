//! YouTube Data API v3 wrapper.
//!
//! Handles key auth, parameter shaping, pagination and batching before
//! delegating to the shared HTTP client. Upstream failures never escape:
//! they are logged and the call returns what it has collected so far.
use std::borrow::Cow;
use std::collections::HashSet;

use async_trait::async_trait;
use radar_common::{ApiKey, RadarError, Result};
use radar_core::{MAX_PAGE_SIZE, Video, VideoPlatform, clamp_pages, clamp_per_page};
use radar_http::{Auth, HttpClient, RequestOpts};
use serde::de::DeserializeOwned;

use crate::extract;
use crate::types::{CommentThreadListResponse, SearchListResponse, VideoListResponse};

pub const YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3/";

/// Largest `maxResults` accepted by `commentThreads.list`.
pub const MAX_COMMENT_PAGE: usize = 100;

#[derive(Clone)]
pub struct YouTubeApi {
    http: HttpClient,
    key: ApiKey,
}

impl YouTubeApi {
    pub fn new(key: ApiKey) -> Result<Self> {
        Self::with_base(YOUTUBE_API_BASE, key)
    }

    /// Point the client at another base URL (mirrors, test servers).
    pub fn with_base(base: &str, key: ApiKey) -> Result<Self> {
        let http = HttpClient::new(base)
            .map_err(|e| RadarError::Platform(format!("HttpClient init failed: {e}")))?;
        Ok(Self { http, key })
    }

    pub fn with_http(http: HttpClient, key: ApiKey) -> Self {
        Self { http, key }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: Vec<(&str, Cow<'_, str>)>,
    ) -> std::result::Result<T, radar_http::HttpError> {
        self.http
            .get_json(
                endpoint,
                RequestOpts {
                    auth: Some(Auth::Query {
                        name: "key",
                        value: Cow::Borrowed(self.key.expose()),
                    }),
                    query: Some(query),
                    ..Default::default()
                },
            )
            .await
    }
}

#[async_trait]
impl VideoPlatform for YouTubeApi {
    async fn search_video_ids(&self, query: &str, pages: u32, per_page: u32) -> Vec<String> {
        let pages = clamp_pages(pages);
        let per_page = clamp_per_page(per_page).to_string();

        let mut seen: HashSet<String> = HashSet::new();
        let mut ids = Vec::new();
        let mut page_token: Option<String> = None;

        for page_idx in 0..pages {
            let mut params: Vec<(&str, Cow<'_, str>)> = vec![
                ("part", "id".into()),
                ("q", query.into()),
                ("type", "video".into()),
                ("maxResults", per_page.as_str().into()),
            ];
            if let Some(token) = page_token.as_deref() {
                params.push(("pageToken", token.into()));
            }

            let page: SearchListResponse = match self.get("search", params).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!(
                        target: "radar.youtube",
                        query = %query,
                        page = page_idx,
                        collected = ids.len(),
                        error = %e,
                        "youtube.search.error"
                    );
                    break;
                }
            };

            for id in extract::video_ids(&page) {
                if seen.insert(id.to_string()) {
                    ids.push(id.to_string());
                }
            }
            tracing::debug!(
                target: "radar.youtube",
                page = page_idx,
                items = page.items.len(),
                total = ids.len(),
                "youtube.search.page"
            );

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }
        ids
    }

    async fn fetch_videos(&self, ids: &[String]) -> Vec<Video> {
        let mut videos = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(MAX_PAGE_SIZE as usize) {
            let joined = chunk.join(",");
            let params: Vec<(&str, Cow<'_, str>)> = vec![
                ("part", "snippet,statistics".into()),
                ("id", joined.as_str().into()),
            ];
            match self.get::<VideoListResponse>("videos", params).await {
                Ok(resp) => videos.extend(resp.items.iter().map(extract::to_video)),
                Err(e) => {
                    tracing::warn!(
                        target: "radar.youtube",
                        batch = chunk.len(),
                        error = %e,
                        "youtube.videos.error"
                    );
                }
            }
        }
        videos
    }

    async fn fetch_comment_text(&self, video_id: &str, max_comments: usize) -> Vec<String> {
        let mut texts: Vec<String> = Vec::new();
        if max_comments == 0 {
            return texts;
        }
        let mut page_token: Option<String> = None;

        while texts.len() < max_comments {
            let batch = MAX_COMMENT_PAGE.min(max_comments - texts.len()).to_string();
            let mut params: Vec<(&str, Cow<'_, str>)> = vec![
                ("part", "snippet".into()),
                ("videoId", video_id.into()),
                ("maxResults", batch.as_str().into()),
                ("textFormat", "plainText".into()),
                ("order", "relevance".into()),
            ];
            if let Some(token) = page_token.as_deref() {
                params.push(("pageToken", token.into()));
            }

            let page: CommentThreadListResponse = match self.get("commentThreads", params).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!(
                        target: "radar.youtube",
                        video_id = %video_id,
                        collected = texts.len(),
                        reason = e.reason().unwrap_or("-"),
                        error = %e,
                        "youtube.comments.unavailable"
                    );
                    break;
                }
            };

            let room = max_comments - texts.len();
            let before = texts.len();
            texts.extend(extract::comment_texts(&page).take(room).map(str::to_string));

            // Stop on a page that adds nothing or hands back the same token.
            let added = texts.len() - before;
            let repeated = page.next_page_token.is_some()
                && page.next_page_token == page_token;
            match page.next_page_token {
                Some(token) if added > 0 && !repeated && !token.is_empty() => {
                    page_token = Some(token)
                }
                _ => {
                    tracing::debug!(
                        target: "radar.youtube",
                        video_id = %video_id,
                        added,
                        total = texts.len(),
                        "youtube.comments.done"
                    );
                    break;
                }
            }
        }
        texts
    }
}
