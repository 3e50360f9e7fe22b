//! Conversions from API payloads into core types.

use radar_core::Video;
use serde_json::Value;

use crate::types::{CommentThreadListResponse, SearchListResponse, VideoItem};

/// Video ids of a search page, in result order.
pub fn video_ids(page: &SearchListResponse) -> impl Iterator<Item = &str> {
    page.items
        .iter()
        .filter_map(|item| item.id.as_ref()?.video_id.as_deref())
        .filter(|id| !id.is_empty())
}

pub fn to_video(item: &VideoItem) -> Video {
    let snippet = item.snippet.as_ref();
    let stats = item.statistics.as_ref();
    Video {
        video_id: item.id.clone().unwrap_or_default(),
        title: snippet.and_then(|s| s.title.clone()).unwrap_or_default(),
        channel_title: snippet
            .and_then(|s| s.channel_title.clone())
            .unwrap_or_default(),
        published_at: snippet
            .and_then(|s| s.published_at.clone())
            .unwrap_or_default(),
        view_count: lenient_count(stats.and_then(|s| s.view_count.as_ref())),
        comment_count: lenient_count(stats.and_then(|s| s.comment_count.as_ref())),
    }
}

/// Top-level comment texts of a page; empty texts are skipped.
pub fn comment_texts(page: &CommentThreadListResponse) -> impl Iterator<Item = &str> {
    page.items
        .iter()
        .filter_map(|thread| {
            thread
                .snippet
                .as_ref()?
                .top_level_comment
                .as_ref()?
                .snippet
                .as_ref()?
                .text_display
                .as_deref()
        })
        .filter(|text| !text.is_empty())
}

/// `"123"` or `123` as a count; anything else (missing, negative, garbage) is 0.
pub fn lenient_count(raw: Option<&Value>) -> u64 {
    match raw {
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        _ => 0,
    }
}
