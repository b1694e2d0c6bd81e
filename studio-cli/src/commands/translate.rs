//! Translate command handler
//!
//! Translates either a text given on the command line or the saved result
//! of an earlier step.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use colored::*;
use studio_core::domain::content::{BibleMessage, ProductCopy, SermonDraft, Translation};
use studio_core::dto::content::TranslateRequest;

use super::save_step;
use crate::config::Config;
use crate::store::{ResultStore, keys};
use crate::validation::{ValidationError, require_text};

/// A saved step whose text can be translated
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SavedStep {
    Sermon,
    Bible,
    ProductCopy,
}

impl SavedStep {
    fn key(self) -> &'static str {
        match self {
            SavedStep::Sermon => keys::SERMON_DRAFT,
            SavedStep::Bible => keys::BIBLE_MESSAGE,
            SavedStep::ProductCopy => keys::PRODUCT_COPY,
        }
    }

    /// Loads the step's text from the store
    fn load_text(self, store: &ResultStore) -> Result<Option<String>> {
        let text = match self {
            SavedStep::Sermon => store
                .load::<SermonDraft>(self.key())?
                .map(|d| format!("{}\n\n{}", d.title, d.content)),
            SavedStep::Bible => store
                .load::<BibleMessage>(self.key())?
                .map(|m| format!("{}\n{}\n\n{}", m.title, m.passage, m.content)),
            SavedStep::ProductCopy => store
                .load::<ProductCopy>(self.key())?
                .map(|c| c.to_plain_text()),
        };
        Ok(text)
    }
}

/// Translation inputs
#[derive(Args)]
pub struct TranslateArgs {
    /// Text to translate
    #[arg(long, conflicts_with = "from", required_unless_present = "from")]
    text: Option<String>,

    /// Translate the saved result of an earlier step instead
    #[arg(long, value_enum)]
    from: Option<SavedStep>,

    /// Target language (e.g. ko, en, ja)
    #[arg(long)]
    to: String,
}

/// Handle the translate command
pub async fn handle_translate_command(args: TranslateArgs, config: &Config) -> Result<()> {
    let store = ResultStore::new(&config.state_file);
    let req = build_request(&args, &store)?;
    let client = config.client()?;

    println!(
        "{}",
        format!("Translating into {}...", req.target_language).dimmed()
    );
    let translation = client
        .translate(&req)
        .await
        .context("Failed to translate")?;

    save_step(config, keys::TRANSLATION, &translation);
    print_translation(&translation);

    Ok(())
}

fn build_request(args: &TranslateArgs, store: &ResultStore) -> Result<TranslateRequest> {
    let target_language = require_text("target language", &args.to)?;

    let text = match (&args.text, args.from) {
        (Some(text), _) => require_text("text", text)?,
        (None, Some(step)) => match step.load_text(store)? {
            Some(text) => require_text("text", &text)?,
            None => {
                return Err(ValidationError::new(
                    "from",
                    format!("nothing saved for '{}' yet", step.key()),
                )
                .into());
            }
        },
        (None, None) => return Err(ValidationError::new("text", "give --text or --from").into()),
    };

    Ok(TranslateRequest {
        text,
        target_language,
    })
}

fn print_translation(translation: &Translation) {
    if let Some(lang) = &translation.detected_language {
        println!("{}", format!("Detected source language: {}", lang).dimmed());
    }
    println!("{}", translation.translation);
}
