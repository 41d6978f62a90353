//! # Lumen POS CLI
//!
//! Terminal front end for a single-store register.
//!
//! ## Command Tree
//! ```text
//! lumen
//! ├── product   add | list | update | delete | low-stock
//! ├── sell      --item ID:QTY ... [--discount] [--pay] [--print]
//! ├── invoice   list | show
//! ├── report    summary | export
//! ├── user      add | list | remove
//! ├── settings  show | set
//! └── seed      (demo catalog)
//! ```
//!
//! All state lives in a local SQLite file (`--db`, default `./lumen.db`).

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lumen_db::{Database, DbConfig};

mod commands;

use commands::{invoice, product, report, seed, sell, settings, user};

// =============================================================================
// CLI Definition
// =============================================================================

#[derive(Parser)]
#[command(name = "lumen", version, about = "Lumen POS - point of sale for a single store")]
struct Cli {
    /// Path to the SQLite database file.
    #[arg(long, global = true, default_value = "./lumen.db")]
    db: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage the product catalog.
    Product {
        #[command(subcommand)]
        command: product::ProductCommand,
    },

    /// Ring up a sale and print the receipt.
    Sell(sell::SellArgs),

    /// Browse the invoice ledger.
    Invoice {
        #[command(subcommand)]
        command: invoice::InvoiceCommand,
    },

    /// Sales and inventory reports.
    Report {
        #[command(subcommand)]
        command: report::ReportCommand,
    },

    /// Manage the staff roster.
    User {
        #[command(subcommand)]
        command: user::UserCommand,
    },

    /// View or change store settings.
    Settings {
        #[command(subcommand)]
        command: settings::SettingsCommand,
    },

    /// Load a small demo catalog into an empty database.
    Seed,
}

// =============================================================================
// Entry Point
// =============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // RUST_LOG controls verbosity; default keeps the register quiet.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let db = Database::new(DbConfig::new(&cli.db)).await?;
    tracing::debug!(path = %cli.db.display(), "database ready");

    match cli.command {
        Command::Product { command } => product::run(&db, command).await,
        Command::Sell(args) => sell::run(&db, args).await,
        Command::Invoice { command } => invoice::run(&db, command).await,
        Command::Report { command } => report::run(&db, command).await,
        Command::User { command } => user::run(&db, command).await,
        Command::Settings { command } => settings::run(&db, command).await,
        Command::Seed => seed::run(&db).await,
    }
}
