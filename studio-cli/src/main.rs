//! Content Studio CLI
//!
//! Command-line client for the content generation backend: sermons, Bible
//! messages, product detail pages, translation and short-drama videos.
//!
//! Architecture:
//! - Configuration: flags with environment variable fallbacks
//! - Commands: input validation, one request per step, terminal output
//! - Scheduler: render job submission and status polling
//! - Store: last result of each step, kept in a local JSON file

mod commands;
mod config;
mod progress;
mod scheduler;
mod store;
mod validation;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::{Commands, handle_command};
use config::Config;

#[derive(Parser)]
#[command(name = "studio")]
#[command(about = "Content Studio generation CLI", long_about = None)]
struct Cli {
    /// Backend URL
    #[arg(long, env = "STUDIO_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    /// Seconds between render status checks
    #[arg(long, env = "STUDIO_POLL_INTERVAL", default_value_t = 3)]
    poll_interval: u64,

    /// Consecutive "job not found" answers tolerated while rendering
    #[arg(long, env = "STUDIO_NOT_FOUND_RETRIES", default_value_t = 5)]
    not_found_retries: u32,

    /// Per-request timeout in seconds
    #[arg(long, env = "STUDIO_REQUEST_TIMEOUT", default_value_t = 60)]
    request_timeout: u64,

    /// File holding saved step results
    #[arg(long, env = "STUDIO_STATE_FILE", default_value = ".studio/state.json")]
    state_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "studio_cli=info,studio_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config {
        api_url: cli.api_url,
        request_timeout: Duration::from_secs(cli.request_timeout),
        poll_interval: Duration::from_secs(cli.poll_interval),
        not_found_retries: cli.not_found_retries,
        state_file: cli.state_file,
    };
    config.validate()?;

    handle_command(cli.command, &config).await
}
