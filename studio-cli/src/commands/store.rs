//! Store command handlers
//!
//! Lists, shows and clears the saved results of earlier steps.

use anyhow::Result;
use clap::Subcommand;
use colored::*;

use crate::config::Config;
use crate::store::ResultStore;

/// Longest preview printed per entry in listings
const PREVIEW_LEN: usize = 60;

/// Store subcommands
#[derive(Subcommand)]
pub enum StoreCommands {
    /// List saved results
    List,
    /// Print one saved result as JSON
    Show {
        /// Step key (e.g. sermon_draft, shortdrama_video)
        key: String,
    },
    /// Remove one saved result, or all of them
    Clear {
        /// Step key; omit to clear everything
        key: Option<String>,
    },
}

/// Handle store commands
pub fn handle_store_command(command: StoreCommands, config: &Config) -> Result<()> {
    let store = ResultStore::new(&config.state_file);

    match command {
        StoreCommands::List => list_entries(&store),
        StoreCommands::Show { key } => show_entry(&store, &key),
        StoreCommands::Clear { key } => clear_entries(&store, key.as_deref()),
    }
}

fn list_entries(store: &ResultStore) -> Result<()> {
    let entries = store.entries()?;

    if entries.is_empty() {
        println!("{}", "No saved results.".yellow());
        return Ok(());
    }

    println!(
        "{}",
        format!("Found {} saved result(s):", entries.len()).bold()
    );
    println!();
    for (key, entry) in &entries {
        println!("  {} {}", "▸".cyan(), key.bold());
        println!(
            "    Saved:   {}",
            entry
                .saved_at
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
                .dimmed()
        );
        println!("    Preview: {}", preview(&entry.value.to_string()).dimmed());
    }

    Ok(())
}

fn show_entry(store: &ResultStore, key: &str) -> Result<()> {
    match store.entry(key)? {
        Some(entry) => {
            println!(
                "{}",
                format!("{} (saved {})", key, entry.saved_at.format("%Y-%m-%d %H:%M:%S")).bold()
            );
            println!("{}", serde_json::to_string_pretty(&entry.value)?);
        }
        None => println!("{}", format!("Nothing saved under '{}'.", key).yellow()),
    }
    Ok(())
}

fn clear_entries(store: &ResultStore, key: Option<&str>) -> Result<()> {
    match key {
        Some(key) => {
            if store.remove(key)? {
                println!("{}", format!("✓ Removed '{}'", key).green());
            } else {
                println!("{}", format!("Nothing saved under '{}'.", key).yellow());
            }
        }
        None => {
            store.clear()?;
            println!("{}", "✓ Cleared all saved results".green());
        }
    }
    Ok(())
}

fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_LEN) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let long = "가".repeat(100);
        let short = preview(&long);
        assert_eq!(short.chars().count(), PREVIEW_LEN + 3);
        assert_eq!(preview("short"), "short");
    }
}
