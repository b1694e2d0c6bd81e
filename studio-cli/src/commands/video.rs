//! Video command handlers
//!
//! Short-drama rendering: media pre-flight checks, job submission with
//! progress polling, and one-off status lookups.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::*;
use std::sync::Arc;
use studio_client::StudioClient;
use studio_core::domain::content::MediaCheck;
use studio_core::domain::job::{JobSnapshot, JobStatus, RenderResult};
use studio_core::dto::job::RenderRequest;
use studio_core::format::{format_duration, format_size};
use tracing::debug;

use super::save_step;
use crate::config::Config;
use crate::progress::TerminalProgress;
use crate::scheduler::{JobPoller, PollOutcome};
use crate::store::keys;
use crate::validation::{
    Resolution, ValidationError, optional_text, parse_clip, require_items, require_range,
    require_text,
};

const CODECS: [&str; 4] = ["h264", "h265", "vp9", "av1"];

/// Video subcommands
#[derive(Subcommand)]
pub enum VideoCommands {
    /// Render a short-drama video and wait for it to finish
    Render(RenderArgs),
    /// Check the status of a render job once
    Status {
        /// Job ID returned when the render was submitted
        job_id: String,
    },
    /// Check which media locations the backend can resolve
    Check {
        /// Media URLs to check
        #[arg(required = true)]
        urls: Vec<String>,
    },
}

#[derive(Args)]
pub struct RenderArgs {
    /// Source clip as URL or URL@START-END (seconds); repeat in playback order
    #[arg(long = "clip", required = true)]
    clips: Vec<String>,

    /// Background audio URL
    #[arg(long)]
    audio: Option<String>,

    /// Subtitle text burned into the video
    #[arg(long)]
    subtitles: Option<String>,

    /// Output resolution as WIDTHxHEIGHT
    #[arg(long, default_value = "1080x1920")]
    resolution: String,

    /// Frames per second (1-120)
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Video codec (h264, h265, vp9, av1)
    #[arg(long, default_value = "h264")]
    codec: String,

    /// Constant rate factor, lower is better quality (0-51)
    #[arg(long, default_value_t = 23)]
    crf: u8,

    /// Submit without checking that every media URL resolves
    #[arg(long)]
    skip_check: bool,
}

/// Handle video commands
pub async fn handle_video_command(command: VideoCommands, config: &Config) -> Result<()> {
    let client = Arc::new(config.client()?);

    match command {
        VideoCommands::Render(args) => render(client, args, config).await,
        VideoCommands::Status { job_id } => show_status(&client, &job_id).await,
        VideoCommands::Check { urls } => check_media(&client, &urls).await,
    }
}

async fn render(client: Arc<StudioClient>, args: RenderArgs, config: &Config) -> Result<()> {
    let req = build_render_request(&args)?;

    if !args.skip_check {
        preflight(&client, &req).await?;
    }

    let sink = Arc::new(TerminalProgress::new());
    let mut poller = JobPoller::new(client.clone(), sink, config.poller_settings());

    let outcome = poller.submit(&req).await;
    debug!(
        state = ?poller.state(),
        polls = poller.polls_issued(),
        timer_started = poller.timer_started(),
        "Render session finished"
    );

    match outcome {
        PollOutcome::Completed(result) => {
            save_step(config, keys::SHORTDRAMA_VIDEO, &result);
            print_render_result(&result, poller.job_id(), client.base_url());
            Ok(())
        }
        PollOutcome::Failed(message) => {
            let progress = poller.last_snapshot().map(|s| s.progress()).unwrap_or(0);
            match poller.job_id() {
                Some(job_id) => {
                    anyhow::bail!("Render job {} failed at {}%: {}", job_id, progress, message)
                }
                None => anyhow::bail!("Render failed: {}", message),
            }
        }
    }
}

/// Refuses to submit when any referenced media cannot be resolved
async fn preflight(client: &StudioClient, req: &RenderRequest) -> Result<()> {
    let urls = req.media_urls();
    println!(
        "{}",
        format!("Checking {} media file(s)...", urls.len()).dimmed()
    );

    let check = client
        .validate_media(&urls)
        .await
        .context("Failed to check media availability")?;

    if check.all_available(&urls) {
        return Ok(());
    }

    print_media_check(&check);
    let missing: Vec<&String> = urls
        .iter()
        .filter(|url| !check.results.iter().any(|r| &r.url == *url && r.available))
        .collect();

    Err(ValidationError::new(
        "clip",
        format!(
            "{} media file(s) unavailable: {}",
            missing.len(),
            missing
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    )
    .into())
}

async fn show_status(client: &StudioClient, job_id: &str) -> Result<()> {
    let job_id = require_text("job id", job_id)?;
    let snapshot = client
        .get_job_status(&job_id)
        .await
        .context("Failed to fetch job status")?;

    println!("{}", "Job Details:".bold());
    println!("  ID:       {}", job_id.cyan());

    match &snapshot {
        JobSnapshot::Pending { progress, message } => {
            println!("  Status:   {}", "Pending".yellow());
            println!("  Progress: {}%", progress);
            if let Some(message) = message {
                println!("  Message:  {}", message);
            }
        }
        JobSnapshot::Processing { progress, message } => {
            println!("  Status:   {}", "Processing".cyan());
            println!("  Progress: {}%", progress);
            if let Some(message) = message {
                println!("  Message:  {}", message);
            }
        }
        JobSnapshot::Completed(result) => {
            println!("  Status:   {}", "Completed".green());
            print_result_fields(result, client.base_url());
        }
        JobSnapshot::Failed { error } => {
            println!("  Status:   {}", "Failed".red());
            println!("  Error:    {}", error.red());
        }
        JobSnapshot::NotFound => {
            println!("  Status:   {}", "Not found".dimmed());
        }
        JobSnapshot::Malformed { reason } => {
            anyhow::bail!("Invalid status response: {}", reason);
        }
    }

    if let Some(status) = snapshot.status() {
        if !status.is_terminal() && status != JobStatus::NotFound {
            println!();
            println!("{}", "Still running; check again later.".dimmed());
        }
    }

    Ok(())
}

async fn check_media(client: &StudioClient, urls: &[String]) -> Result<()> {
    let urls = require_items("url", urls)?;
    let check = client
        .validate_media(&urls)
        .await
        .context("Failed to check media availability")?;

    print_media_check(&check);

    let unavailable = check.unavailable().len();
    if unavailable > 0 {
        println!();
        println!(
            "{}",
            format!("{} of {} unavailable", unavailable, urls.len()).yellow()
        );
    }

    Ok(())
}

fn build_render_request(args: &RenderArgs) -> Result<RenderRequest, ValidationError> {
    let clip_specs = require_items("clip", &args.clips)?;
    let clips = clip_specs
        .iter()
        .map(|spec| parse_clip(spec))
        .collect::<Result<Vec<_>, _>>()?;

    let resolution: Resolution = args.resolution.parse()?;
    let fps = require_range("fps", args.fps, 1, 120)?;
    let crf = require_range("crf", args.crf, 0, 51)?;

    let codec = args.codec.trim().to_ascii_lowercase();
    if !CODECS.contains(&codec.as_str()) {
        return Err(ValidationError::new(
            "codec",
            format!("'{}' is not one of {}", args.codec, CODECS.join(", ")),
        ));
    }

    Ok(RenderRequest {
        clips,
        audio_url: optional_text(args.audio.as_deref()),
        subtitles: optional_text(args.subtitles.as_deref()),
        width: resolution.width,
        height: resolution.height,
        fps,
        codec,
        crf,
    })
}

/// Turns a backend-relative media path into a full URL
fn resolve_media_url(base_url: &str, video_url: &str) -> String {
    if video_url.starts_with('/') {
        format!("{}{}", base_url.trim_end_matches('/'), video_url)
    } else {
        video_url.to_string()
    }
}

fn print_render_result(result: &RenderResult, job_id: Option<&str>, base_url: &str) {
    println!();
    println!("{}", "Render complete:".bold());
    if let Some(job_id) = job_id {
        println!("  Job:      {}", job_id.dimmed());
    }
    print_result_fields(result, base_url);
}

fn print_result_fields(result: &RenderResult, base_url: &str) {
    println!(
        "  Video:    {}",
        resolve_media_url(base_url, &result.video_url).cyan()
    );
    if let Some(duration) = result.duration_secs {
        println!("  Duration: {}", format_duration(duration));
    }
    if let Some(size) = result.size_bytes {
        println!("  Size:     {}", format_size(size));
    }
}

fn print_media_check(check: &MediaCheck) {
    for item in &check.results {
        if item.available {
            println!("  {} {}", "✓".green(), item.url);
        } else {
            let reason = item.reason.as_deref().unwrap_or("unavailable");
            println!("  {} {} {}", "✗".red(), item.url, reason.dimmed());
        }
    }
}
