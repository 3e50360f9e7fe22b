//! Search, filter, rank and comment-keyword analysis for video platforms.
//!
//! The pipeline is platform-agnostic: everything that talks to the network
//! sits behind [`VideoPlatform`]. The remaining pieces are synchronous
//! transformations over in-memory lists.
//!
//! - [`filter`]: minimum views/comments and recency thresholds
//! - [`ranker`]: descending sort by views or comments
//! - [`matcher`]: any/all keyword matching and per-term unique counts
//! - [`SearchService`], [`CommentTermsService`], [`Analyzer`]: the services
//! - [`export`]: JSON export records

pub mod analysis;
pub mod comment_terms;
pub mod export;
pub mod filter;
pub mod matcher;
pub mod models;
pub mod ranker;
pub mod search;
pub mod traits;

pub use analysis::{Analysis, Analyzer};
pub use comment_terms::{CommentTermsRequest, CommentTermsService};
pub use models::{
    CommentTermsReport, CommentTermsResult, Filters, MatchMode, SortKey, TermQuery, TermTotals,
    Video,
};
pub use search::{SearchRequest, SearchService, clamp_pages, clamp_per_page};
pub use traits::{MAX_PAGE_SIZE, VideoPlatform};
