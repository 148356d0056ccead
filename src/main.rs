//! Sitesnap main entry point
//!
//! This is the command-line interface for the Sitesnap crawler and
//! screenshot archiver.

use anyhow::Context;
use clap::Parser;
use sitesnap::capture::{capture, CaptureReport, ChromeDriver};
use sitesnap::config::{load_or_default, CaptureConfig};
use sitesnap::crawler::crawl;
use sitesnap::storage::{open_store, VisitedStore};
use sitesnap::{SnapError, VisitedSet};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Sitesnap: full-page screenshots of every page of a site
///
/// Sitesnap follows every link of DOMAIN reachable from START_URL, caches the
/// discovered URLs, then saves a full-page screenshot of each of them under
/// screenshots/<domain>/.
#[derive(Parser, Debug)]
#[command(name = "sitesnap")]
#[command(version)]
#[command(about = "Website screenshot tool", long_about = None)]
struct Cli {
    /// The domain to capture screenshots from
    #[arg(value_name = "DOMAIN")]
    domain: String,

    /// The starting URL to begin crawling
    #[arg(value_name = "START_URL", value_parser = parse_start_url)]
    start_url: String,

    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

/// Accepts only absolute URLs but keeps the argument exactly as typed,
/// since visited URLs are compared as raw strings
fn parse_start_url(raw: &str) -> Result<String, String> {
    url::Url::parse(raw)
        .map(|_| raw.to_string())
        .map_err(|e| format!("START_URL must be an absolute URL: {}", e))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config =
        load_or_default(cli.config.as_deref()).context("Failed to load configuration")?;

    setup_logging(Path::new(&config.output.log_path), cli.verbose, cli.quiet)?;
    tracing::info!(
        "Starting run for domain {} from {}",
        cli.domain,
        cli.start_url
    );

    // Discovery
    let mut store = open_store(Path::new(&config.output.cache_path));
    let mut visited = store.load();

    let stats = crawl(&config.crawler, &cli.domain, &cli.start_url, &mut visited)
        .await
        .map_err(|e| log_fatal("Link discovery could not start", e))?;

    store
        .save(&visited)
        .map_err(|e| log_fatal("Failed to save URL cache", SnapError::from(e)))?;

    // Capture
    let report = run_capture(config.capture, cli.domain, visited).await?;

    println!(
        "Discovered {} new URLs ({} fetch failures)",
        stats.urls_added, stats.fetch_failures
    );
    println!(
        "Saved {} screenshots to {} ({} failed)",
        report.artifacts.len(),
        report.domain_dir.display(),
        report.failures.len()
    );
    tracing::info!("Run complete");

    Ok(())
}

/// Sets up the tracing subscriber writing to the append-only log file
fn setup_logging(log_path: &Path, verbose: u8, quiet: bool) -> anyhow::Result<()> {
    let filter = if quiet {
        // Only log errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitesnap=info,warn"),
            1 => EnvFilter::new("sitesnap=debug,info"),
            _ => EnvFilter::new("sitesnap=trace,debug"),
        }
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();

    Ok(())
}

/// Launches the browser and captures every visited URL off the async runtime
///
/// The browser is owned by the blocking task and shut down when it ends,
/// whether the pass succeeds, fails or panics.
async fn run_capture(
    config: CaptureConfig,
    domain: String,
    visited: VisitedSet,
) -> anyhow::Result<CaptureReport> {
    let report = tokio::task::spawn_blocking(move || -> Result<CaptureReport, SnapError> {
        let mut driver = ChromeDriver::launch(&config)?;
        capture(&mut driver, &domain, &visited, &config)
    })
    .await
    .context("Capture task panicked")?
    .map_err(|e| log_fatal("Screenshot capture aborted", e))?;

    Ok(report)
}

/// Logs a run-ending error and converts it for `main`
fn log_fatal(context: &'static str, error: SnapError) -> anyhow::Error {
    tracing::error!("{}: {}", context, error);
    anyhow::Error::new(error).context(context)
}
