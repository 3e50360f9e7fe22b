use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use radar_common::RadarError;
use radar_common::observability::{LogConfig, init_logging};
use radar_config::{RadarConfig, RadarConfigLoader, credentials};
use radar_core::{VideoPlatform, export};
use radar_runtime::JobRunner;
use radar_youtube::YouTubeApi;

use cli::{Cli, Command, OutputFormat};
use jobs::{Job, JobOutput};
use session::Session;

mod cli;
mod jobs;
mod output;
mod session;

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const SHUTDOWN_GRACE: Duration = Duration::from_millis(250);

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "app.failed");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    // 1) Config (file, then RADAR__ env overrides)
    let cfg = load_config(cli.config.as_deref())?;

    // 2) Logging
    let log_path = init_logging(LogConfig {
        app_name: "yt-radar",
        log_dir: cfg.log.dir.clone(),
        emit_stderr: cli.verbose,
        format: cfg.log.format,
        default_filter: cfg.log.filter.clone(),
    })?;
    tracing::info!(log_path = %log_path.display(), "app.start");

    // 3) Validate input before touching credentials or the network
    let job = match &cli.command {
        Command::SetKey(args) => return set_key(&args.key),
        Command::Search(args) => Job::search(&args.fetch, &args.rank, &cfg)?,
        Command::CommentTerms(args) => Job::comment_terms(&args.fetch, &args.terms, &cfg)?,
        Command::Analyze(args) => Job::analyze(&args.fetch, &args.rank, &args.terms, &cfg)?,
    };

    let resolved = match credentials::resolve_api_key() {
        Ok(resolved) => resolved,
        Err(err @ RadarError::MissingApiKey { .. }) => {
            tracing::error!("app.api_key.missing");
            eprintln!("{err}");
            return Ok(ExitCode::from(2));
        }
        Err(err) => return Err(err.into()),
    };
    tracing::info!(source = %resolved.source, "app.api_key.loaded");
    let platform: Arc<dyn VideoPlatform> = Arc::new(YouTubeApi::new(resolved.key)?);

    // 4) Run in the background and poll for the result
    let mut jobs: JobRunner<JobOutput> = JobRunner::start("yt-radar")?;
    let mut session = Session::default();
    eprintln!("Running {}…", job.name());
    jobs.submit(job.name(), job.run(platform));
    while let Some(msg) = jobs.next_message(POLL_INTERVAL) {
        session.apply(msg);
    }
    jobs.shutdown(SHUTDOWN_GRACE);

    if let Some(err) = &session.last_error {
        eprintln!("{err}");
        return Ok(ExitCode::FAILURE);
    }

    // 5) Render
    match &cli.command {
        Command::Search(args) => match args.format {
            OutputFormat::Json => println!("{}", output::videos_json(&session.videos)?),
            OutputFormat::Table => print!("{}", output::videos_table(&session.videos)),
        },
        Command::CommentTerms(_) => {
            print!(
                "{}",
                output::comment_terms_table(&session.comment_results, cfg.comments.samples_to_show)
            );
            print_term_totals(&session);
        }
        Command::Analyze(args) => {
            let samples = args.samples.unwrap_or(cfg.comments.samples_to_show);
            print!(
                "{}",
                output::comment_terms_table(&session.comment_results, samples)
            );
            print_term_totals(&session);
            if let Some(path) = &args.export {
                write_export(path, &session)?;
                eprintln!("Exported {} videos to {}", session.videos.len(), path.display());
            }
        }
        Command::SetKey(_) => {}
    }
    Ok(ExitCode::SUCCESS)
}

fn load_config(explicit: Option<&Path>) -> Result<RadarConfig> {
    let loader = match explicit {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("config file not found: {}", path.display());
            }
            RadarConfigLoader::new().with_file(path)
        }
        None => RadarConfigLoader::new().with_default_file(),
    };
    loader.load().context("loading configuration")
}

fn set_key(raw: &str) -> Result<ExitCode> {
    match credentials::save_api_key(raw)? {
        Some(path) => {
            eprintln!("Saved API key to {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("No key given; nothing saved.");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_term_totals(session: &Session) {
    let totals = output::term_totals(&session.term_totals);
    if !totals.is_empty() {
        print!("\n{totals}");
    }
}

fn write_export(path: &Path, session: &Session) -> Result<()> {
    let records = export::records(&session.videos, &session.analysis_by_id);
    let json = export::to_json_pretty(&records)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), records = records.len(), "app.export.written");
    Ok(())
}
