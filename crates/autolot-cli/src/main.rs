//! Demo CLI for the autolot client flows.
//!
//! Drives upload, compose, delete, and dashboard reconciliation against the
//! configured backends (local filesystem by default). See `Config` for the
//! environment variables.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use autolot_core::models::{Identity, ListingForm};
use autolot_core::Config;
use autolot_db::{create_document_store, ListingRepository};
use autolot_services::{
    AssetUploader, ClientContext, DashboardView, ImagePayload, ListingComposer,
    ListingLifecycleManager, LocalIdentityProvider, UploadSession,
};
use autolot_storage::create_blob_store;

#[derive(Parser, Debug)]
#[command(name = "autolot")]
#[command(about = "Vehicle listing marketplace client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a listing from form fields and image files
    Create(CreateArgs),
    /// List the current owner's listings
    List,
    /// Show one listing as JSON
    Show {
        /// Listing id
        id: String,
    },
    /// Delete a listing and its images
    Delete {
        /// Listing id
        id: String,
    },
}

#[derive(Args, Debug)]
struct CreateArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    model: String,

    #[arg(long)]
    year: String,

    #[arg(long)]
    km: String,

    #[arg(long)]
    price: String,

    #[arg(long)]
    city: String,

    /// Contact number, 11-12 digits
    #[arg(long)]
    whatsapp: String,

    #[arg(long)]
    description: String,

    /// Image file (jpeg/png); repeat for multiple images
    #[arg(long = "image", value_name = "PATH", required = true)]
    images: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    let blobs = create_blob_store(&config).await?;
    let store = create_document_store(&config).await?;
    let listings = ListingRepository::new(store);

    let provider = LocalIdentityProvider::signed_in(identity_from_config(&config)?);
    let ctx = ClientContext::for_identity(&provider, listings, blobs)?;

    match cli.command {
        Command::Create(args) => cmd_create(ctx, args).await,
        Command::List => cmd_list(ctx).await,
        Command::Show { id } => cmd_show(ctx, &id).await,
        Command::Delete { id } => cmd_delete(ctx, &id).await,
    }
}

fn identity_from_config(config: &Config) -> Result<Identity> {
    let Some(id) = config.owner_id() else {
        bail!("Missing owner identity. Set AUTOLOT_OWNER_ID");
    };
    let mut identity = Identity::new(id);
    if let Some(name) = config.owner_name() {
        identity = identity.with_display_name(name);
    }
    if let Some(email) = config.owner_email() {
        identity = identity.with_email(email);
    }
    Ok(identity)
}

fn content_type_for(path: &Path) -> Result<&'static str> {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => Ok("image/jpeg"),
        Some("png") => Ok("image/png"),
        _ => bail!("{}: only jpeg and png images are accepted", path.display()),
    }
}

async fn cmd_create(ctx: ClientContext, args: CreateArgs) -> Result<()> {
    let uploader = AssetUploader::for_context(&ctx);
    let session = UploadSession::new();

    // Uploads are dispatched concurrently; the session collects references in
    // completion order.
    let mut handles = Vec::with_capacity(args.images.len());
    for path in &args.images {
        let content_type = content_type_for(path)?;
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        handles.push((
            path,
            uploader.dispatch_upload(&session, &ctx.identity, ImagePayload::new(content_type, data)),
        ));
    }
    for (path, handle) in handles {
        let reference = handle.join().await??;
        println!("uploaded {} -> {}", path.display(), reference.url);
    }

    let form = ListingForm {
        name: args.name,
        model: args.model,
        year: args.year,
        km: args.km,
        price: args.price,
        city: args.city,
        whatsapp: args.whatsapp,
        description: args.description,
    };

    let record = ListingComposer::new(ctx).submit(&form, &session).await?;
    println!(
        "created listing {} ({} images)",
        record.id,
        record.images.len()
    );
    Ok(())
}

async fn cmd_list(ctx: ClientContext) -> Result<()> {
    let mut view = DashboardView::new();
    view.refresh(&ctx).await?;

    if view.is_empty() {
        println!("no listings for owner {}", ctx.identity.id);
        return Ok(());
    }

    for card in view.cards() {
        println!(
            "{}  {}  {} | {} km  R$ {}  {}  cover: {}",
            card.id, card.name, card.year, card.km, card.price, card.city,
            card.cover_url()
        );
    }
    Ok(())
}

async fn cmd_show(ctx: ClientContext, id: &str) -> Result<()> {
    match ctx.listings.get(id).await? {
        Some(record) => {
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
        None => bail!("listing {} not found", id),
    }
}

async fn cmd_delete(ctx: ClientContext, id: &str) -> Result<()> {
    let manager = ListingLifecycleManager::new(ctx);
    let report = manager.delete_by_id(id).await?;

    if report.is_clean() {
        println!(
            "deleted listing {} and {} images",
            report.listing_id, report.images_attempted
        );
    } else {
        println!(
            "deleted listing {}; {} of {} image deletions failed (orphan blobs left for sweep):",
            report.listing_id,
            report.failures.len(),
            report.images_attempted
        );
        for failure in &report.failures {
            println!("  {}: {}", failure.reference.name, failure.error);
        }
    }
    Ok(())
}
