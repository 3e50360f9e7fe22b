use std::collections::HashMap;

use radar_common::RadarError;
use radar_core::{CommentTermsResult, TermTotals, Video};
use radar_runtime::TaskMessage;

use crate::jobs::JobOutput;

/// What the shell currently shows. Owned by the shell and updated only from
/// task messages.
#[derive(Debug, Default)]
pub struct Session {
    pub videos: Vec<Video>,
    pub comment_results: Vec<CommentTermsResult>,
    pub analysis_by_id: HashMap<String, CommentTermsResult>,
    pub term_totals: TermTotals,
    pub last_error: Option<String>,
}

impl Session {
    /// Replace the state the message covers. A failure only records its
    /// error; earlier results stay.
    pub fn apply(&mut self, msg: TaskMessage<JobOutput>) {
        let output = match msg.outcome {
            Ok(output) => output,
            Err(err) => {
                let err = RadarError::Task {
                    task: msg.task,
                    message: err,
                };
                self.last_error = Some(err.to_string());
                return;
            }
        };
        self.last_error = None;
        match output {
            JobOutput::Search(videos) => {
                self.videos = videos;
                self.comment_results.clear();
                self.analysis_by_id.clear();
                self.term_totals = TermTotals::new();
            }
            JobOutput::CommentTerms(report) => {
                self.comment_results = report.results;
                self.term_totals = report.term_totals;
            }
            JobOutput::Analysis(analysis) => {
                self.analysis_by_id = analysis.analysis_by_video_id();
                self.videos = analysis.videos;
                self.comment_results = analysis.report.results;
                self.term_totals = analysis.report.term_totals;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radar_core::{Analysis, CommentTermsReport};

    fn video(id: &str) -> Video {
        Video {
            video_id: id.into(),
            title: id.to_uppercase(),
            channel_title: "c".into(),
            published_at: "2025-01-01T00:00:00Z".into(),
            view_count: 1,
            comment_count: 1,
        }
    }

    fn ok(task: &str, output: JobOutput) -> TaskMessage<JobOutput> {
        TaskMessage {
            task: task.into(),
            outcome: Ok(output),
        }
    }

    fn analysis() -> Analysis {
        Analysis {
            videos: vec![video("a"), video("b")],
            report: CommentTermsReport {
                results: vec![CommentTermsResult {
                    video: video("a"),
                    total_term_hits: 2,
                    matched_comments: 1,
                    samples: vec!["pob pob".into()],
                    per_term_unique_comments: TermTotals::new(),
                }],
                term_totals: TermTotals::new(),
            },
        }
    }

    #[test]
    fn analysis_fills_everything() {
        let mut s = Session::default();
        s.apply(ok("analyze", JobOutput::Analysis(analysis())));
        assert_eq!(s.videos.len(), 2);
        assert_eq!(s.comment_results.len(), 1);
        assert!(s.analysis_by_id.contains_key("a"));
        assert!(s.last_error.is_none());
    }

    #[test]
    fn search_clears_comment_state() {
        let mut s = Session::default();
        s.apply(ok("analyze", JobOutput::Analysis(analysis())));
        s.apply(ok("search", JobOutput::Search(vec![video("z")])));
        assert_eq!(s.videos, vec![video("z")]);
        assert!(s.comment_results.is_empty());
        assert!(s.analysis_by_id.is_empty());
    }

    #[test]
    fn failure_keeps_previous_results() {
        let mut s = Session::default();
        s.apply(ok("search", JobOutput::Search(vec![video("a")])));
        s.apply(TaskMessage {
            task: "search".into(),
            outcome: Err("quota exceeded".into()),
        });
        assert_eq!(s.videos.len(), 1);
        assert_eq!(s.last_error.as_deref(), Some("Task 'search' failed: quota exceeded"));
    }
}
