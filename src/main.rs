use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;

use job_tracker::api::{ApiClient, FakeApi, ScanApi, TrackerApi};
use job_tracker::config::TrackerConfig;
use job_tracker::jobs::{DashboardMetrics, JobQuery, JobStatus, filter_jobs};
use job_tracker::scan::{ProgressBarSubscriber, ScanCoordinator, ScanOutcome};

#[derive(Parser)]
#[command(name = "job-tracker", version, about = "Job application tracker client")]
struct Cli {
    /// Path to the TOML config file
    #[arg(long, default_value = "job_tracker.toml")]
    config: PathBuf,

    /// Answer from the in-memory fake backend instead of HTTP
    #[arg(long)]
    offline: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start a mailbox scan and follow its progress to completion
    Scan {
        /// Days back from today to search (5, 30, 60 or 90)
        #[arg(long, default_value_t = 60)]
        days_back: u32,
    },

    /// List tracked applications
    Jobs {
        /// Only show applications in this status
        #[arg(long)]
        status: Option<JobStatus>,

        /// Search companies, roles, notes and email subjects
        #[arg(long)]
        search: Option<String>,

        /// Sort by "date", "company" or "status"
        #[arg(long, default_value = "date")]
        sort_by: String,

        /// Sort in descending order
        #[arg(long)]
        descending: bool,

        /// Show at most this many applications
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show aggregate counts and derived rates
    Stats,

    /// Save a note on one application
    Note {
        /// Application id
        #[arg(long)]
        id: i64,

        /// Note text
        #[arg(long)]
        notes: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = TrackerConfig::load(&cli.config)?;

    match cli.command {
        Command::Scan { days_back } => {
            let api: Arc<dyn ScanApi> = if cli.offline {
                Arc::new(FakeApi::new())
            } else {
                Arc::new(ApiClient::new(&config.base_url)?)
            };
            run_scan(api, &config, days_back).await
        }
        command => {
            let api: Arc<dyn TrackerApi> = if cli.offline {
                Arc::new(FakeApi::new())
            } else {
                Arc::new(ApiClient::new(&config.base_url)?)
            };
            match command {
                Command::Jobs {
                    status,
                    search,
                    sort_by,
                    descending,
                    limit,
                } => {
                    let query = JobQuery {
                        status,
                        search,
                        sort_by: Some(sort_by),
                        descending,
                        limit,
                    };
                    list_jobs(api.as_ref(), &query).await
                }
                Command::Stats => show_stats(api.as_ref()).await,
                Command::Note { id, notes } => {
                    api.save_note(id, &notes).await?;
                    println!("Note saved on application {}", id);
                    Ok(())
                }
                Command::Scan { .. } => unreachable!("handled above"),
            }
        }
    }
}

/// Drive one scan to a terminal outcome, rendering progress on the terminal
async fn run_scan(api: Arc<dyn ScanApi>, config: &TrackerConfig, days_back: u32) -> Result<()> {
    info!("Scanning the last {} days", days_back);

    let subscriber = Arc::new(ProgressBarSubscriber::new());
    let mut coordinator = ScanCoordinator::new(api, subscriber, config.schedule());

    coordinator.start(days_back).await?;

    match coordinator.wait().await? {
        ScanOutcome::Succeeded => Ok(()),
        ScanOutcome::Failed(reason) => anyhow::bail!(reason),
    }
}

async fn list_jobs(api: &dyn TrackerApi, query: &JobQuery) -> Result<()> {
    let jobs = api.fetch_jobs().await?;
    let filtered = filter_jobs(&jobs, query);

    if filtered.is_empty() {
        println!("No applications found");
        return Ok(());
    }

    for job in filtered {
        println!(
            "#{:<4} {:<20} {:<24} {:<10} applied {}",
            job.id, job.company, job.role, job.status, job.date_applied
        );
        if !job.notes.is_empty() {
            println!("      notes: {}", job.notes);
        }
    }

    Ok(())
}

async fn show_stats(api: &dyn TrackerApi) -> Result<()> {
    let stats = api.fetch_stats().await?;

    println!("Total applications: {}", stats.total);
    for status in JobStatus::ALL {
        println!("  {:<10} {}", status, stats.count(status));
    }

    let metrics = DashboardMetrics::from_stats(&stats);
    println!("Response rate:  {}%", metrics.response_rate);
    println!("Interview rate: {}%", metrics.interview_rate);
    println!("Offer rate:     {}%", metrics.offer_rate);
    println!("Success rate:   {}%", metrics.success_rate);

    Ok(())
}
