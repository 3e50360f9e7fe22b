//! Ranking policy. Descending by one numeric field; equal keys keep their
//! input order.

use std::cmp::Reverse;

use crate::models::{SortKey, Video};

pub fn sort(mut videos: Vec<Video>, key: SortKey) -> Vec<Video> {
    match key {
        SortKey::Views => videos.sort_by_key(|v| Reverse(v.view_count)),
        SortKey::Comments => videos.sort_by_key(|v| Reverse(v.comment_count)),
    }
    videos
}
