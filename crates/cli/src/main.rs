//! Timeweave CLI
//!
//! Loads configuration, wires the adapters to the sync driver, runs one
//! synchronization pass, and prints the run report.

use std::sync::Arc;

use anyhow::Context;
use chrono::{Duration, Utc};
use clap::Parser;
use timeweave_core::{SyncOptions, SyncService, TaskMatcher};
use timeweave_domain::SyncWindow;
use timeweave_infra::{
    config, CalendarClient, HttpClient, IssueTrackerClient, OpenAiClient, TrackerClient,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Sync calendar events and assigned issues into the time tracker.
#[derive(Debug, Parser)]
#[command(name = "timeweave", version, about)]
struct Cli {
    /// Compute and report everything, but write nothing
    #[arg(long)]
    dry_run: bool,

    /// How many days back the sync window reaches
    #[arg(long, default_value_t = 1, conflicts_with = "today")]
    days: i64,

    /// Sync from the start of the current UTC day instead
    #[arg(long)]
    today: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let cfg = config::load().context("failed to load configuration")?;

    let http_client = HttpClient::new().context("failed to build HTTP client")?;

    let tracker = Arc::new(TrackerClient::new(
        http_client.clone(),
        cfg.tracker.base_url.clone(),
        cfg.tracker.api_key.clone(),
        cfg.tracker.workspace_id.clone(),
    ));
    let calendar = Arc::new(CalendarClient::new(
        http_client.clone(),
        cfg.calendar.base_url.clone(),
        cfg.calendar.access_token.clone(),
    ));
    let issues = Arc::new(IssueTrackerClient::new(
        http_client.clone(),
        cfg.issues.base_url.clone(),
        cfg.issues.token.clone(),
    ));
    let oracle =
        Arc::new(OpenAiClient::new(cfg.openai.api_key.clone(), http_client).with_model(&cfg.openai.model));

    let service = SyncService::new(
        tracker.clone(),
        calendar,
        issues,
        tracker,
        TaskMatcher::new(oracle),
        SyncOptions {
            dry_run: cli.dry_run,
            calendar_id: cfg.calendar.calendar_id.clone(),
            target_project: cfg.sync.target_project.clone(),
            workday: Duration::hours(cfg.sync.workday_hours),
        },
    );

    let now = Utc::now();
    let window =
        if cli.today { SyncWindow::today(now) } else { SyncWindow::past_days(cli.days, now) };
    info!(start = %window.start, end = %window.end, "sync window computed");

    let report = service.run(window).await?;

    println!("Sync complete.");
    if cli.dry_run {
        println!("  would create:   {}", report.would_create);
    } else {
        println!("  created:        {}", report.created);
    }
    println!("  duplicates:     {}", report.duplicates);
    println!("  unmatched:      {}", report.unmatched);
    println!("  skipped:        {}", report.skipped_no_budget);
    if report.failed_writes > 0 {
        println!("  failed writes:  {}", report.failed_writes);
    }
    if report.failed_stages > 0 {
        println!("  failed stages:  {}", report.failed_stages);
    }

    Ok(())
}
