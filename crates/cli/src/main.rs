//! Customer Insights CLI - Database migrations, CSV loading and verification.
//!
//! # Usage
//!
//! ```bash
//! # Create the schema (creates ecommerce.db when missing)
//! capi-cli migrate
//!
//! # Replace both tables with the contents of the CSV exports
//! capi-cli load --users data/users.csv --orders data/orders.csv
//!
//! # Report row counts and orphaned orders
//! capi-cli verify
//! ```
//!
//! The database is taken from `--database-url`, then `CAPI_DATABASE_URL`,
//! then `DATABASE_URL`, then `sqlite://ecommerce.db`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use customer_insights_api::config::get_database_url;

mod commands;

#[derive(Parser)]
#[command(name = "capi-cli")]
#[command(author, version, about = "Customer Insights CLI tools")]
struct Cli {
    /// SQLite connection string
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Load customers and orders from CSV files, replacing existing rows
    Load {
        /// Path to users.csv
        #[arg(short, long)]
        users: PathBuf,

        /// Path to orders.csv
        #[arg(short, long)]
        orders: PathBuf,
    },
    /// Report row counts and order/customer reference integrity
    Verify,
}

#[tokio::main]
async fn main() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = cli
        .database_url
        .unwrap_or_else(|| get_database_url("CAPI_DATABASE_URL"));

    match cli.command {
        Commands::Migrate => commands::migrate::run(&database_url).await?,
        Commands::Load { users, orders } => {
            commands::load::run(&database_url, &users, &orders).await?;
        }
        Commands::Verify => {
            commands::verify::run(&database_url).await?;
        }
    }
    Ok(())
}
