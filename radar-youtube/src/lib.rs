//! YouTube implementation of the `radar-core` platform boundary.
//!
//! - [`client`]: [`YouTubeApi`], search/videos/commentThreads calls
//! - [`types`]: strongly typed response models
//! - [`extract`]: payload to core-type conversions
pub mod client;
pub mod extract;
pub mod types;

pub use client::{YOUTUBE_API_BASE, YouTubeApi};
