//! Product detail-page command handlers
//!
//! Copy generation and image generation. Image generation falls back to the
//! headline of the last generated copy when no prompt is given.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::*;
use studio_core::domain::content::{ProductCopy, ProductImages};
use studio_core::dto::content::{ProductCopyRequest, ProductImageRequest};

use super::save_step;
use crate::config::Config;
use crate::store::{ResultStore, keys};
use crate::validation::{ValidationError, optional_text, require_items, require_range, require_text};

/// Product subcommands
#[derive(Subcommand)]
pub enum ProductCommands {
    /// Generate detail-page copy
    Copy(CopyArgs),
    /// Generate product images
    Images(ImagesArgs),
}

#[derive(Args)]
pub struct CopyArgs {
    /// Product name
    #[arg(long)]
    name: String,

    /// Selling point; repeat for several
    #[arg(long = "feature")]
    features: Vec<String>,

    /// Target customers
    #[arg(long)]
    audience: Option<String>,

    /// Output language (e.g. ko, en)
    #[arg(long)]
    language: Option<String>,
}

#[derive(Args)]
pub struct ImagesArgs {
    /// Image prompt; defaults to the headline of the last generated copy
    #[arg(long)]
    prompt: Option<String>,

    /// Number of images (1-8)
    #[arg(long, default_value_t = 4)]
    count: u8,
}

/// Handle product commands
pub async fn handle_product_command(command: ProductCommands, config: &Config) -> Result<()> {
    match command {
        ProductCommands::Copy(args) => generate_copy(args, config).await,
        ProductCommands::Images(args) => generate_images(args, config).await,
    }
}

async fn generate_copy(args: CopyArgs, config: &Config) -> Result<()> {
    let req = build_copy_request(&args)?;
    let client = config.client()?;

    println!("{}", "Generating detail-page copy...".dimmed());
    let copy = client
        .generate_product_copy(&req)
        .await
        .context("Failed to generate product copy")?;

    save_step(config, keys::PRODUCT_COPY, &copy);
    print_copy(&copy);

    Ok(())
}

async fn generate_images(args: ImagesArgs, config: &Config) -> Result<()> {
    let store = ResultStore::new(&config.state_file);
    let req = build_image_request(&args, &store)?;
    let client = config.client()?;

    println!(
        "{}",
        format!("Generating {} image(s)...", req.count).dimmed()
    );
    let images = client
        .generate_product_images(&req)
        .await
        .context("Failed to generate product images")?;

    save_step(config, keys::PRODUCT_IMAGES, &images);
    print_images(&images);

    Ok(())
}

fn build_copy_request(args: &CopyArgs) -> Result<ProductCopyRequest, ValidationError> {
    Ok(ProductCopyRequest {
        product_name: require_text("name", &args.name)?,
        features: require_items("feature", &args.features)?,
        target_audience: optional_text(args.audience.as_deref()),
        language: optional_text(args.language.as_deref()),
    })
}

fn build_image_request(args: &ImagesArgs, store: &ResultStore) -> Result<ProductImageRequest> {
    let count = require_range("count", args.count, 1, 8)?;

    let prompt = match optional_text(args.prompt.as_deref()) {
        Some(prompt) => prompt,
        None => {
            let copy: Option<ProductCopy> = store.load(keys::PRODUCT_COPY)?;
            match copy {
                Some(copy) => require_text("prompt", &copy.headline)?,
                None => {
                    return Err(ValidationError::new(
                        "prompt",
                        "give --prompt or run `product copy` first",
                    )
                    .into());
                }
            }
        }
    };

    Ok(ProductImageRequest { prompt, count })
}

fn print_copy(copy: &ProductCopy) {
    println!("{}", copy.headline.bold());
    for section in &copy.sections {
        println!("\n{}", section.heading.cyan().bold());
        println!("{}", section.body);
    }
}

fn print_images(images: &ProductImages) {
    if images.images.is_empty() {
        println!("{}", "No images returned.".yellow());
        return;
    }

    println!(
        "{}",
        format!("Generated {} image(s):", images.images.len()).bold()
    );
    for url in &images.images {
        println!("  {} {}", "▸".cyan(), url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studio_core::domain::content::CopySection;

    fn temp_store() -> (tempfile::TempDir, ResultStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path().join("state.json"));
        (dir, store)
    }

    #[test]
    fn test_copy_requires_feature() {
        let args = CopyArgs {
            name: "Trail boots".to_string(),
            features: vec![" ".to_string()],
            audience: None,
            language: None,
        };
        let err = build_copy_request(&args).unwrap_err();
        assert_eq!(err.field, "feature");
    }

    #[test]
    fn test_image_prompt_from_args() {
        let (_dir, store) = temp_store();
        let args = ImagesArgs {
            prompt: Some("boots on a rock".to_string()),
            count: 2,
        };
        let req = build_image_request(&args, &store).unwrap();
        assert_eq!(req.prompt, "boots on a rock");
        assert_eq!(req.count, 2);
    }

    #[test]
    fn test_image_prompt_falls_back_to_saved_copy() {
        let (_dir, store) = temp_store();
        store
            .save(
                keys::PRODUCT_COPY,
                &ProductCopy {
                    headline: "Boots that climb".to_string(),
                    sections: vec![CopySection {
                        heading: "Grip".to_string(),
                        body: "Vibram sole".to_string(),
                    }],
                },
            )
            .unwrap();

        let args = ImagesArgs {
            prompt: None,
            count: 4,
        };
        let req = build_image_request(&args, &store).unwrap();
        assert_eq!(req.prompt, "Boots that climb");
    }

    #[test]
    fn test_image_request_without_prompt_or_copy() {
        let (_dir, store) = temp_store();
        let args = ImagesArgs {
            prompt: None,
            count: 4,
        };
        let err = build_image_request(&args, &store).unwrap_err();
        assert!(err.downcast_ref::<ValidationError>().is_some());
    }

    #[test]
    fn test_image_count_bounds() {
        let (_dir, store) = temp_store();
        let args = ImagesArgs {
            prompt: Some("x".to_string()),
            count: 0,
        };
        assert!(build_image_request(&args, &store).is_err());
    }
}
