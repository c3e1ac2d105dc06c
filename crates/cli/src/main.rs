//! Lumera CLI - Price quotes and catalog files.
//!
//! # Usage
//!
//! ```bash
//! # Price a size 15 ring
//! lumera price --base-price 2500 --kind ring --ring-size 15
//!
//! # Price a gemstone mounted in an 18K white gold engagement ring
//! lumera price --base-price 2200 --kind gemstone --mounted \
//!     --jewelry engagement-ring --metal gold-18k-white --ring-size 7
//!
//! # Write the built-in catalog as JSON, then check an edited copy
//! lumera catalog export --output catalog.json
//! lumera catalog check catalog.json
//! ```
//!
//! # Commands
//!
//! - `price` - Compute the unit price of a customized product
//! - `catalog export` - Write the built-in catalog (loadable via `LUMERA_CATALOG_PATH`)
//! - `catalog check` - Validate a catalog file

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

use commands::price::PriceArgs;

#[derive(Parser)]
#[command(name = "lumera")]
#[command(author, version, about = "Lumera CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the unit price of a customized product
    Price(PriceArgs),
    /// Work with catalog files
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Write the built-in catalog as JSON
    Export {
        /// Destination file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Validate a catalog file
    Check {
        /// Catalog file to validate
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    // Quotes and catalog summaries are reported at info level
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
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
    match cli.command {
        Commands::Price(args) => commands::price::quote(&args)?,
        Commands::Catalog { action } => match action {
            CatalogAction::Export { output } => commands::catalog::export(&output).await?,
            CatalogAction::Check { path } => commands::catalog::check(&path).await?,
        },
    }
    Ok(())
}
