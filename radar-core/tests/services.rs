mod common;

use std::sync::Arc;

use common::{Call, FakePlatform, init_test_tracing, video};
use radar_core::{
    Analyzer, CommentTermsRequest, CommentTermsService, Filters, MatchMode, SearchRequest,
    SearchService, SortKey, TermQuery,
};

fn ids(videos: &[radar_core::Video]) -> Vec<&str> {
    videos.iter().map(|v| v.video_id.as_str()).collect()
}

#[tokio::test]
async fn search_filters_ranks_and_truncates() {
    init_test_tracing();
    let platform = Arc::new(FakePlatform::new(vec![
        video("a", 100, 5),
        video("b", 50, 20),
        video("c", 500, 1),
        video("d", 75, 9),
    ]));
    let service = SearchService::new(platform.clone());

    let req = SearchRequest {
        query: "pob".into(),
        pages: 1,
        per_page: 10,
        top: 2,
        sort: SortKey::Comments,
        filters: Some(Filters {
            min_views: 60,
            ..Default::default()
        }),
    };
    let got = service.search(&req).await;
    assert_eq!(ids(&got), ["d", "a"]);
}

#[tokio::test]
async fn search_clamps_top_pages_and_per_page() {
    init_test_tracing();
    let platform = Arc::new(FakePlatform::new(vec![video("a", 1, 1), video("b", 9, 1)]));
    let service = SearchService::new(platform.clone());

    let req = SearchRequest {
        query: "pob".into(),
        pages: 0,
        per_page: 500,
        top: 0,
        sort: SortKey::Views,
        filters: None,
    };
    let got = service.search(&req).await;
    assert_eq!(ids(&got), ["b"]);
    assert_eq!(
        platform.calls()[0],
        Call::Search {
            pages: 1,
            per_page: 50
        }
    );
}

#[tokio::test]
async fn search_dedups_candidate_ids_in_first_seen_order() {
    init_test_tracing();
    let mut fake = FakePlatform::new(vec![video("a", 1, 0), video("b", 1, 0)]);
    fake.ids = vec!["b".into(), "a".into(), "b".into()];
    let platform = Arc::new(fake);
    let got = SearchService::new(platform.clone())
        .search(&SearchRequest::new("q"))
        .await;
    assert_eq!(ids(&got), ["b", "a"]);
    assert_eq!(
        platform.calls()[1],
        Call::Fetch(vec!["b".to_string(), "a".to_string()])
    );
}

#[tokio::test]
async fn blank_query_is_rejected_before_io() {
    assert!(SearchRequest::new("   ").validate().is_err());
    assert!(SearchRequest::new("pob").validate().is_ok());

    let mut req = CommentTermsRequest {
        query: "pob".into(),
        pages: 1,
        per_page: 10,
        top_videos: 1,
        terms: TermQuery::new([" ", ""], MatchMode::Any),
        comments_per_video: 10,
    };
    assert!(req.validate().is_err());
    req.terms = TermQuery::new(["pob"], MatchMode::Any);
    assert!(req.validate().is_ok());
    req.query = "\t".into();
    assert!(req.validate().is_err());
}

#[tokio::test]
async fn run_on_videos_sorts_and_counts_unique_comments() {
    init_test_tracing();
    let platform = Arc::new(
        FakePlatform::new(vec![video("v1", 10, 3), video("v2", 20, 3), video("v3", 30, 1)])
            .with_comments("v1", &["I love pob builds", "no mention here", "POB is great, pob pob"])
            .with_comments("v2", &["pob", "pob pob pob pob pob", "nope", "pob"])
            .with_comments("v3", &["nothing to see"]),
    );
    let service = CommentTermsService::new(platform.clone());
    let videos = platform.videos.clone();
    let terms = TermQuery::new(["pob"], MatchMode::Any);

    let report = service.run_on_videos(&videos, &terms, 100).await;

    assert_eq!(report.results.len(), 2);
    assert_eq!(report.results[0].video.video_id, "v2");
    assert_eq!(report.results[0].total_term_hits, 7);
    assert_eq!(report.results[0].matched_comments, 3);
    assert_eq!(report.results[1].video.video_id, "v1");
    assert_eq!(report.results[1].matched_comments, 2);
    assert_eq!(report.results[1].per_term_unique_comments.get("pob"), 2);
    assert_eq!(report.term_totals.get("pob"), 5);
}

#[tokio::test]
async fn ties_keep_input_order() {
    init_test_tracing();
    let platform = Arc::new(
        FakePlatform::new(vec![video("x", 1, 1), video("y", 1, 1)])
            .with_comments("x", &["rust"])
            .with_comments("y", &["RUST"]),
    );
    let service = CommentTermsService::new(platform.clone());
    let terms = TermQuery::new(["rust"], MatchMode::Any);
    let report = service
        .run_on_videos(&platform.videos.clone(), &terms, 10)
        .await;
    let order: Vec<_> = report
        .results
        .iter()
        .map(|r| r.video.video_id.as_str())
        .collect();
    assert_eq!(order, ["x", "y"]);
}

#[tokio::test]
async fn zero_comments_per_video_yields_empty_report() {
    init_test_tracing();
    let platform = Arc::new(
        FakePlatform::new(vec![video("a", 1, 1), video("b", 2, 2)])
            .with_comments("a", &["pob"])
            .with_comments("b", &["pob"]),
    );
    let service = CommentTermsService::new(platform.clone());
    let report = service
        .run_on_videos(
            &platform.videos.clone(),
            &TermQuery::new(["pob"], MatchMode::Any),
            0,
        )
        .await;
    assert!(report.results.is_empty());
    assert!(report.term_totals.is_empty());
}

#[tokio::test]
async fn disabled_comments_are_skipped_not_fatal() {
    init_test_tracing();
    let platform = Arc::new(
        FakePlatform::new(vec![video("off", 9, 0), video("on", 1, 1)])
            .with_comments("on", &["pob"]),
    );
    let service = CommentTermsService::new(platform.clone());
    let report = service
        .run_on_videos(
            &platform.videos.clone(),
            &TermQuery::new(["pob"], MatchMode::Any),
            50,
        )
        .await;
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].video.video_id, "on");
}

#[tokio::test]
async fn run_ranks_by_views_and_ignores_filters() {
    init_test_tracing();
    let platform = Arc::new(
        FakePlatform::new(vec![video("low", 1, 900), video("high", 1000, 0), video("mid", 50, 3)])
            .with_comments("low", &["pob"])
            .with_comments("high", &["pob"])
            .with_comments("mid", &["pob"]),
    );
    let service = CommentTermsService::new(platform.clone());
    let req = CommentTermsRequest {
        query: "pob".into(),
        pages: 1,
        per_page: 10,
        top_videos: 2,
        terms: TermQuery::new(["pob"], MatchMode::Any),
        comments_per_video: 5,
    };
    let report = service.run(&req).await;

    let analysed: Vec<String> = platform
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::Comments { video_id, .. } => Some(video_id),
            _ => None,
        })
        .collect();
    assert_eq!(analysed, ["high", "mid"]);
    assert_eq!(report.results.len(), 2);
}

#[tokio::test]
async fn run_clamps_search_paging() {
    init_test_tracing();
    let platform = Arc::new(FakePlatform::new(vec![video("a", 5, 1)]).with_comments("a", &["pob"]));
    let req = CommentTermsRequest {
        query: "pob".into(),
        pages: 0,
        per_page: 0,
        top_videos: 1,
        terms: TermQuery::new(["pob"], MatchMode::Any),
        comments_per_video: 5,
    };
    let report = CommentTermsService::new(platform.clone()).run(&req).await;
    assert_eq!(
        platform.calls()[0],
        Call::Search {
            pages: 1,
            per_page: 1
        }
    );
    assert_eq!(report.results.len(), 1);
}

#[tokio::test]
async fn analyzer_uses_search_order_and_top_videos() {
    init_test_tracing();
    let platform = Arc::new(
        FakePlatform::new(vec![video("a", 100, 5), video("b", 50, 20), video("c", 10, 30)])
            .with_comments("a", &["pob"])
            .with_comments("b", &["pob pob"])
            .with_comments("c", &["pob pob pob"]),
    );
    let analyzer = Analyzer::new(
        SearchService::new(platform.clone()),
        CommentTermsService::new(platform.clone()),
    );
    let mut req = SearchRequest::new("pob");
    req.sort = SortKey::Comments;

    let analysis = analyzer
        .analyze(&req, &TermQuery::new(["pob"], MatchMode::Any), 2, 10)
        .await;

    assert_eq!(ids(&analysis.videos), ["c", "b", "a"]);
    let analysed: Vec<_> = analysis
        .report
        .results
        .iter()
        .map(|r| r.video.video_id.as_str())
        .collect();
    assert_eq!(analysed, ["c", "b"]);
    let by_id = analysis.analysis_by_video_id();
    assert!(by_id.contains_key("b"));
    assert!(!by_id.contains_key("a"));
}

#[tokio::test]
async fn analyzer_with_no_candidates_is_empty() {
    init_test_tracing();
    let platform = Arc::new(FakePlatform::default());
    let analyzer = Analyzer::new(
        SearchService::new(platform.clone()),
        CommentTermsService::new(platform.clone()),
    );
    let analysis = analyzer
        .analyze(
            &SearchRequest::new("pob"),
            &TermQuery::new(["pob"], MatchMode::Any),
            10,
            10,
        )
        .await;
    assert!(analysis.videos.is_empty());
    assert!(analysis.report.results.is_empty());
}
