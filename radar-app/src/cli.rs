//! Command-line surface. Unset options fall back to the loaded config.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "yt-radar",
    version,
    about = "Search YouTube and rank results by engagement (views/comments).",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Mirror logs to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,
    /// Config file (YAML). Defaults to the per-user radar.yaml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Search YouTube and print top results.
    Search(SearchArgs),
    /// Search comment text of the most viewed results for keywords.
    CommentTerms(CommentTermsArgs),
    /// Search, then analyse comments of the leading results.
    Analyze(AnalyzeArgs),
    /// Store the API key in the per-user config file.
    SetKey(SetKeyArgs),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Candidate collection shared by every searching command.
#[derive(Debug, Clone, Args)]
pub struct FetchOpts {
    /// Search query string.
    pub query: String,
    /// Number of result pages to scan.
    #[arg(long)]
    pub pages: Option<u32>,
    /// Results per page (max 50).
    #[arg(long)]
    pub per_page: Option<u32>,
}

/// Ranking and filtering of search results.
#[derive(Debug, Clone, Args)]
pub struct RankOpts {
    /// How many results to keep.
    #[arg(long)]
    pub top: Option<usize>,
    /// Sort results by this field.
    #[arg(long, value_parser = ["views", "comments"])]
    pub sort: Option<String>,
    /// Drop videos with fewer views.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub min_views: i64,
    /// Drop videos with fewer comments.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub min_comments: i64,
    /// Only include videos from the last N days (e.g. "30d").
    #[arg(long, default_value = "")]
    pub since: String,
}

#[derive(Debug, Clone, Args)]
pub struct TermOpts {
    /// Comma-separated keywords, e.g. "pob,league start".
    #[arg(long)]
    pub terms: String,
    /// Match any term or all terms.
    #[arg(long = "match", value_parser = ["any", "all"])]
    pub match_mode: Option<String>,
    /// How many videos to scan comments for.
    #[arg(long)]
    pub top_videos: Option<usize>,
    /// How many comments to fetch per video.
    #[arg(long)]
    pub comments: Option<usize>,
}

#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    #[command(flatten)]
    pub fetch: FetchOpts,
    #[command(flatten)]
    pub rank: RankOpts,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Args)]
pub struct CommentTermsArgs {
    #[command(flatten)]
    pub fetch: FetchOpts,
    #[command(flatten)]
    pub terms: TermOpts,
}

#[derive(Debug, Clone, Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub fetch: FetchOpts,
    #[command(flatten)]
    pub rank: RankOpts,
    #[command(flatten)]
    pub terms: TermOpts,
    /// Sample comments shown per result.
    #[arg(long)]
    pub samples: Option<usize>,
    /// Write search results with their comment analysis to this JSON file.
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct SetKeyArgs {
    /// YouTube Data API v3 key.
    pub key: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_analyze_with_shared_options() {
        let cli = Cli::try_parse_from([
            "yt-radar",
            "--verbose",
            "analyze",
            "path of exile",
            "--terms",
            "pob, league start",
            "--match",
            "all",
            "--sort",
            "comments",
            "--min-views",
            "-5",
            "--since",
            "30d",
            "--export",
            "out.json",
        ])
        .unwrap();
        assert!(cli.verbose);
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.fetch.query, "path of exile");
        assert_eq!(args.terms.match_mode.as_deref(), Some("all"));
        assert_eq!(args.rank.sort.as_deref(), Some("comments"));
        assert_eq!(args.rank.min_views, -5);
        assert_eq!(args.export, Some(PathBuf::from("out.json")));
        assert!(args.fetch.pages.is_none());
    }

    #[test]
    fn comment_terms_requires_terms() {
        assert!(Cli::try_parse_from(["yt-radar", "comment-terms", "pob"]).is_err());
    }

    #[test]
    fn rejects_unknown_sort() {
        assert!(Cli::try_parse_from(["yt-radar", "search", "pob", "--sort", "likes"]).is_err());
    }
}
