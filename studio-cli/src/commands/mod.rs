//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod bible;
mod product;
mod sermon;
mod store;
mod translate;
mod video;

pub use bible::BibleArgs;
pub use product::ProductCommands;
pub use sermon::SermonArgs;
pub use store::StoreCommands;
pub use translate::TranslateArgs;
pub use video::VideoCommands;

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;
use tracing::warn;

use crate::config::Config;
use crate::store::ResultStore;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Draft a sermon
    Sermon(SermonArgs),
    /// Draft a Bible message for a passage
    Bible(BibleArgs),
    /// Product detail-page copy and images
    Product {
        #[command(subcommand)]
        command: ProductCommands,
    },
    /// Translate a text or a saved result
    Translate(TranslateArgs),
    /// Short-drama video rendering
    Video {
        #[command(subcommand)]
        command: VideoCommands,
    },
    /// Inspect or clear saved results
    Store {
        #[command(subcommand)]
        command: StoreCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Sermon(args) => sermon::handle_sermon_command(args, config).await,
        Commands::Bible(args) => bible::handle_bible_command(args, config).await,
        Commands::Product { command } => product::handle_product_command(command, config).await,
        Commands::Translate(args) => translate::handle_translate_command(args, config).await,
        Commands::Video { command } => video::handle_video_command(command, config).await,
        Commands::Store { command } => store::handle_store_command(command, config),
    }
}

/// Saves a step result for later commands
///
/// The result has already been shown, so a store failure only warns.
fn save_step<T: Serialize>(config: &Config, key: &str, value: &T) {
    let store = ResultStore::new(&config.state_file);
    if let Err(e) = store.save(key, value) {
        warn!("Failed to save '{}' to {}: {:#}", key, store.path().display(), e);
    }
}
