//! Bible message command handler

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use studio_core::domain::content::BibleMessage;
use studio_core::dto::content::BibleMessageRequest;

use super::save_step;
use crate::config::Config;
use crate::store::keys;
use crate::validation::{ValidationError, optional_text, require_text};

/// Bible message inputs
#[derive(Args)]
pub struct BibleArgs {
    /// Passage to preach on, e.g. "Psalm 23"
    #[arg(long)]
    passage: String,

    /// Theme to emphasize
    #[arg(long)]
    theme: Option<String>,

    /// Tone of the message (e.g. comforting, exhortative)
    #[arg(long)]
    tone: Option<String>,
}

/// Handle the bible command
pub async fn handle_bible_command(args: BibleArgs, config: &Config) -> Result<()> {
    let req = build_request(&args)?;
    let client = config.client()?;

    println!("{}", "Drafting message...".dimmed());
    let message = client
        .draft_bible_message(&req)
        .await
        .context("Failed to draft Bible message")?;

    save_step(config, keys::BIBLE_MESSAGE, &message);
    print_message(&message);

    Ok(())
}

fn build_request(args: &BibleArgs) -> Result<BibleMessageRequest, ValidationError> {
    Ok(BibleMessageRequest {
        passage: require_text("passage", &args.passage)?,
        theme: optional_text(args.theme.as_deref()),
        tone: optional_text(args.tone.as_deref()),
    })
}

fn print_message(message: &BibleMessage) {
    println!("{}", message.title.bold());
    println!("{}", message.passage.cyan());
    println!("\n{}", message.content);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passage_required() {
        let args = BibleArgs {
            passage: " ".to_string(),
            theme: None,
            tone: None,
        };
        let err = build_request(&args).unwrap_err();
        assert_eq!(err.field, "passage");
    }
}
