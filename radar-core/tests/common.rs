#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

use async_trait::async_trait;
use radar_common::observability::{LogConfig, init_logging};
use radar_core::{Video, VideoPlatform};

static INIT_PATH: OnceLock<std::path::PathBuf> = OnceLock::new();

pub fn init_test_tracing() {
    let _ = INIT_PATH.get_or_init(|| {
        let config = LogConfig {
            app_name: "radar-tests",
            log_dir: Some(std::env::temp_dir().join("radar-tests")),
            default_filter: "debug".to_string(),
            ..LogConfig::default()
        };
        init_logging(config).unwrap_or_default()
    });
}

pub fn video(id: &str, views: u64, comments: u64) -> Video {
    Video {
        video_id: id.to_string(),
        title: format!("Video {id}"),
        channel_title: "Channel".to_string(),
        published_at: "2025-01-20T12:34:56Z".to_string(),
        view_count: views,
        comment_count: comments,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Search { pages: u32, per_page: u32 },
    Fetch(Vec<String>),
    Comments { video_id: String, max: usize },
}

/// In-memory platform. Search pages are `per_page` slices of `ids`
/// (duplicates allowed); unknown ids have no metadata; videos without a
/// comment entry behave like comments-disabled and return nothing.
#[derive(Default)]
pub struct FakePlatform {
    pub ids: Vec<String>,
    pub videos: Vec<Video>,
    pub comments: HashMap<String, Vec<String>>,
    pub calls: Mutex<Vec<Call>>,
}

impl FakePlatform {
    pub fn new(videos: Vec<Video>) -> Self {
        Self {
            ids: videos.iter().map(|v| v.video_id.clone()).collect(),
            videos,
            ..Default::default()
        }
    }

    pub fn with_comments(mut self, video_id: &str, comments: &[&str]) -> Self {
        self.comments.insert(
            video_id.to_string(),
            comments.iter().map(|c| c.to_string()).collect(),
        );
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoPlatform for FakePlatform {
    async fn search_video_ids(&self, _query: &str, pages: u32, per_page: u32) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Search { pages, per_page });
        let take = (pages as usize) * (per_page as usize);
        let mut out: Vec<String> = Vec::new();
        for id in self.ids.iter().take(take) {
            if !out.contains(id) {
                out.push(id.clone());
            }
        }
        out
    }

    async fn fetch_videos(&self, ids: &[String]) -> Vec<Video> {
        self.calls.lock().unwrap().push(Call::Fetch(ids.to_vec()));
        ids.iter()
            .filter_map(|id| self.videos.iter().find(|v| &v.video_id == id).cloned())
            .collect()
    }

    async fn fetch_comment_text(&self, video_id: &str, max_comments: usize) -> Vec<String> {
        self.calls.lock().unwrap().push(Call::Comments {
            video_id: video_id.to_string(),
            max: max_comments,
        });
        self.comments
            .get(video_id)
            .map(|c| c.iter().take(max_comments).cloned().collect())
            .unwrap_or_default()
    }
}
