//! Sermon command handler

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use studio_core::domain::content::SermonDraft;
use studio_core::dto::content::SermonRequest;

use super::save_step;
use crate::config::Config;
use crate::store::keys;
use crate::validation::{ValidationError, optional_text, require_range, require_text};

/// Sermon drafting inputs
#[derive(Args)]
pub struct SermonArgs {
    /// Sermon title
    #[arg(long)]
    title: String,

    /// Scripture reference, e.g. "John 3:16-21"
    #[arg(long)]
    scripture: String,

    /// Intended audience (e.g. youth, adults)
    #[arg(long)]
    audience: Option<String>,

    /// Target length in minutes
    #[arg(long)]
    minutes: Option<u32>,
}

/// Handle the sermon command
pub async fn handle_sermon_command(args: SermonArgs, config: &Config) -> Result<()> {
    let req = build_request(&args)?;
    let client = config.client()?;

    println!("{}", "Drafting sermon...".dimmed());
    let draft = client
        .draft_sermon(&req)
        .await
        .context("Failed to draft sermon")?;

    save_step(config, keys::SERMON_DRAFT, &draft);
    print_sermon(&draft);

    Ok(())
}

fn build_request(args: &SermonArgs) -> Result<SermonRequest, ValidationError> {
    let length_minutes = match args.minutes {
        Some(m) => Some(require_range("minutes", m, 5, 120)?),
        None => None,
    };

    Ok(SermonRequest {
        title: require_text("title", &args.title)?,
        scripture: require_text("scripture", &args.scripture)?,
        audience: optional_text(args.audience.as_deref()),
        length_minutes,
    })
}

fn print_sermon(draft: &SermonDraft) {
    println!("{}", draft.title.bold());

    if !draft.outline.is_empty() {
        println!("\n{}", "Outline:".bold());
        for (idx, point) in draft.outline.iter().enumerate() {
            println!("  {}. {}", idx + 1, point);
        }
    }

    println!("\n{}", draft.content);
}
