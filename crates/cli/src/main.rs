//! Leafpress CLI - command-line admin tool for the storefront.
//!
//! # Usage
//!
//! ```bash
//! # Catalog
//! leafpress product list
//! leafpress product create --title "Stapled Notepad" --description "..." \
//!     --price 300 --stock 60 --category Stationery --image cover.png
//! leafpress product edit 64ab12cd --price 280 --remove-image /old/1.png --image new.png
//! leafpress product delete 64ab12cd --yes
//! leafpress product bulk-discount --percent 15 64ab12cd 64ab12ce
//!
//! # Orders
//! leafpress orders list --status processing --sort newest
//! leafpress orders set-status ord-1 shipped
//!
//! # Customers and dashboard
//! leafpress customers list --sort highest_spent
//! leafpress stats --from 2026-01-01 --to 2026-02-01
//! ```
//!
//! # Environment Variables
//!
//! - `LEAFPRESS_API_URL` - Backend base URL (default: `http://localhost:5000`)
//! - `LEAFPRESS_MAX_IMAGE_BYTES` - Staged image size limit (default: 5 MiB)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use leafpress_admin::{AdminConfig, ApiClient};

mod commands;

#[derive(Parser)]
#[command(name = "leafpress")]
#[command(author, version, about = "Leafpress storefront admin tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the product catalog
    Product {
        #[command(subcommand)]
        action: commands::product::ProductAction,
    },
    /// Inspect and update orders
    Orders {
        #[command(subcommand)]
        action: commands::orders::OrderAction,
    },
    /// Inspect customers and send mail
    Customers {
        #[command(subcommand)]
        action: commands::customers::CustomerAction,
    },
    /// Show dashboard statistics
    Stats(commands::stats::StatsArgs),
}

#[tokio::main]
async fn main() {
    // Initialize tracing; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leafpress=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = AdminConfig::from_env()?;
    let client = ApiClient::new(&config);

    match cli.command {
        Commands::Product { action } => commands::product::run(&config, &client, action).await?,
        Commands::Orders { action } => commands::orders::run(&client, action).await?,
        Commands::Customers { action } => commands::customers::run(&client, action).await?,
        Commands::Stats(args) => commands::stats::run(&client, args).await?,
    }
    Ok(())
}
