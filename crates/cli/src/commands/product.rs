//! Product catalog commands.
//!
//! `create` and `edit` drive the full form controller: draft fields are
//! validated before anything is sent, image files are staged through the
//! size-limited stager, and the save protocol reports partial image
//! failures separately from the core result.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use leafpress_admin::{
    AdminConfig, ApiClient, ApiError, IncomingFile, ProductForm, SaveError, SaveReport,
};
use leafpress_core::{Category, ImageRef, ProductId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during product commands.
#[derive(Debug, Error)]
pub enum ProductCommandError {
    /// Backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Save protocol failed (validation or core write).
    #[error(transparent)]
    Save(#[from] SaveError),

    /// Reading a local image file failed.
    #[error("Failed to read image {path}: {source}")]
    ReadImage {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Destructive command run without `--yes`.
    #[error("Refusing to delete without --yes")]
    NotConfirmed,
}

#[derive(Subcommand)]
pub enum ProductAction {
    /// List the full catalog
    List,
    /// Show one product
    Show { id: String },
    /// Create a new product
    Create(CreateArgs),
    /// Edit an existing product
    Edit(EditArgs),
    /// Delete a product
    Delete {
        id: String,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Apply a percentage discount to several products at once
    BulkDiscount {
        /// Discount percentage (0-100)
        #[arg(long)]
        percent: Decimal,
        /// Product ids to discount
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

#[derive(Args)]
pub struct CreateArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    description: String,
    /// Original price
    #[arg(long)]
    price: String,
    /// Discount percentage (0-100), empty for none
    #[arg(long, default_value = "")]
    discount: String,
    #[arg(long)]
    stock: String,
    /// One of: Stationery, "Gift Sets", Paper, Chitrayan
    #[arg(long)]
    category: Category,
    /// Comma-separated tags
    #[arg(long, default_value = "")]
    tags: String,
    #[arg(long)]
    top_pick: bool,
    #[arg(long)]
    trending: bool,
    /// Image file to upload (repeatable, in display order)
    #[arg(long = "image")]
    images: Vec<PathBuf>,
}

#[derive(Args)]
pub struct EditArgs {
    id: String,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    price: Option<String>,
    #[arg(long)]
    discount: Option<String>,
    #[arg(long)]
    stock: Option<String>,
    #[arg(long)]
    category: Option<Category>,
    /// Comma-separated tags (replaces the existing set)
    #[arg(long)]
    tags: Option<String>,
    #[arg(long)]
    top_pick: Option<bool>,
    #[arg(long)]
    trending: Option<bool>,
    /// Persisted image reference to remove (repeatable)
    #[arg(long = "remove-image")]
    remove_images: Vec<String>,
    /// New image file to upload (repeatable)
    #[arg(long = "image")]
    images: Vec<PathBuf>,
}

/// Dispatch a product action.
pub async fn run(
    config: &AdminConfig,
    client: &ApiClient,
    action: ProductAction,
) -> Result<(), ProductCommandError> {
    match action {
        ProductAction::List => list(client).await,
        ProductAction::Show { id } => show(client, &id).await,
        ProductAction::Create(args) => create(config, client, args).await,
        ProductAction::Edit(args) => edit(config, client, args).await,
        ProductAction::Delete { id, yes } => delete(client, &id, yes).await,
        ProductAction::BulkDiscount { percent, ids } => bulk_discount(client, percent, ids).await,
    }
}

#[allow(clippy::print_stdout)]
async fn list(client: &ApiClient) -> Result<(), ProductCommandError> {
    let products = client.list_products().await?;

    println!("{:<26} {:<30} {:>8} {:>6}  {}", "ID", "TITLE", "PRICE", "STOCK", "CATEGORY");
    for product in products {
        println!(
            "{:<26} {:<30} {:>8} {:>6}  {}",
            product.id,
            truncate(&product.title, 30),
            product.original_price,
            product.stock,
            product.category,
        );
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
async fn show(client: &ApiClient, id: &str) -> Result<(), ProductCommandError> {
    let product = client.get_product(&ProductId::new(id)).await?;

    println!("{}: {}", product.id, product.title);
    println!("  description: {}", product.description);
    println!("  price:       {}", product.original_price);
    println!("  discount:    {}%", product.discount_percent);
    println!("  stock:       {}", product.stock);
    println!("  category:    {}", product.category);
    println!("  tags:        {}", product.tags.join(", "));
    println!("  top pick:    {}", product.is_top_pick);
    println!("  trending:    {}", product.is_trending);
    println!("  images:");
    for image in &product.images {
        println!("    {image}");
    }
    Ok(())
}

async fn create(
    config: &AdminConfig,
    client: &ApiClient,
    args: CreateArgs,
) -> Result<(), ProductCommandError> {
    let mut form = ProductForm::new(config.max_image_bytes);
    form.set_title(args.title);
    form.set_description(args.description);
    form.set_original_price(args.price);
    form.set_discount_percent(args.discount);
    form.set_stock(args.stock);
    form.set_category(Some(args.category));
    form.set_tags(args.tags);
    form.set_top_pick(args.top_pick);
    form.set_trending(args.trending);

    stage_images(&mut form, &args.images).await?;

    submit(&mut form, client).await
}

async fn edit(
    config: &AdminConfig,
    client: &ApiClient,
    args: EditArgs,
) -> Result<(), ProductCommandError> {
    let product = client.get_product(&ProductId::new(args.id)).await?;
    let mut form = ProductForm::load(config.max_image_bytes, &product);

    if let Some(title) = args.title {
        form.set_title(title);
    }
    if let Some(description) = args.description {
        form.set_description(description);
    }
    if let Some(price) = args.price {
        form.set_original_price(price);
    }
    if let Some(discount) = args.discount {
        form.set_discount_percent(discount);
    }
    if let Some(stock) = args.stock {
        form.set_stock(stock);
    }
    if let Some(category) = args.category {
        form.set_category(Some(category));
    }
    if let Some(tags) = args.tags {
        form.set_tags(tags);
    }
    if let Some(flag) = args.top_pick {
        form.set_top_pick(flag);
    }
    if let Some(flag) = args.trending {
        form.set_trending(flag);
    }

    for reference in &args.remove_images {
        if !form.mark_for_deletion(&ImageRef::new(reference.as_str())) {
            tracing::warn!("{reference} is not one of the product's images, ignoring");
        }
    }

    stage_images(&mut form, &args.images).await?;

    submit(&mut form, client).await
}

/// Read image files from disk and stage them, surfacing the per-batch
/// oversized-files warning.
async fn stage_images(
    form: &mut ProductForm,
    paths: &[PathBuf],
) -> Result<(), ProductCommandError> {
    if paths.is_empty() {
        return Ok(());
    }

    let mut incoming = Vec::with_capacity(paths.len());
    for path in paths {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ProductCommandError::ReadImage {
                path: path.clone(),
                source,
            })?;
        incoming.push(IncomingFile {
            file_name: file_name_of(path),
            content_type: content_type_for(path).to_string(),
            bytes,
        });
    }

    let outcome = form.stage_files(incoming);
    if outcome.rejected > 0 {
        tracing::warn!(
            "{} file(s) exceeded the size limit and were not staged",
            outcome.rejected
        );
    }
    Ok(())
}

async fn submit(form: &mut ProductForm, client: &ApiClient) -> Result<(), ProductCommandError> {
    match form.save(client).await {
        Ok(report) => {
            print_report(&report);
            Ok(())
        }
        Err(SaveError::Rejected(errors)) => {
            for (field, message) in errors.iter() {
                tracing::error!("{field}: {message}");
            }
            Err(SaveError::Rejected(errors).into())
        }
        Err(error) => Err(error.into()),
    }
}

#[allow(clippy::print_stdout)]
fn print_report(report: &SaveReport) {
    if report.created {
        println!("Created product {}", report.product_id);
    } else {
        println!("Updated product {}", report.product_id);
    }
    for warning in &report.warnings {
        tracing::warn!("{warning}");
    }
}

#[allow(clippy::print_stdout)]
async fn delete(client: &ApiClient, id: &str, yes: bool) -> Result<(), ProductCommandError> {
    if !yes {
        return Err(ProductCommandError::NotConfirmed);
    }
    client.delete_product(&ProductId::new(id)).await?;
    println!("Deleted product {id}");
    Ok(())
}

#[allow(clippy::print_stdout)]
async fn bulk_discount(
    client: &ApiClient,
    percent: Decimal,
    ids: Vec<String>,
) -> Result<(), ProductCommandError> {
    let ids: Vec<ProductId> = ids.into_iter().map(ProductId::new).collect();
    let outcome = client.apply_bulk_discount(&ids, percent).await?;
    println!(
        "Applied {percent}% discount to {} product(s)",
        outcome.modified_count
    );
    Ok(())
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned())
}

/// Guess a MIME type from the file extension.
fn content_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("avif") => "image/avif",
        _ => "application/octet-stream",
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_for_known_extensions() {
        assert_eq!(content_type_for(Path::new("a.PNG")), "image/png");
        assert_eq!(content_type_for(Path::new("b.jpeg")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("c.bin")), "application/octet-stream");
        assert_eq!(content_type_for(Path::new("noext")), "application/octet-stream");
    }

    #[test]
    fn test_truncate_keeps_short_strings() {
        assert_eq!(truncate("Notebook", 30), "Notebook");
        assert_eq!(truncate("abcdefgh", 5), "abcd…");
    }
}
