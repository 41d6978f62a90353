//! # Report Commands
//!
//! The dashboard summary and the CSV export of the ledger.
//!
//! `summary` folds the whole ledger with lumen-core's reporting
//! functions; `export` writes one row per invoice via the csv crate.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;

use lumen_core::report::{daily_breakdown, export_rows, sales_summary};
use lumen_db::Database;

#[derive(Subcommand)]
pub enum ReportCommand {
    /// Sales, profit and inventory value, plus a per-day breakdown.
    Summary {
        /// Show the last N days in the breakdown.
        #[arg(long, default_value_t = 7)]
        days: usize,
    },

    /// Export all invoices to a CSV file.
    Export {
        /// Output path.
        #[arg(long, default_value = "invoices.csv")]
        out: PathBuf,
    },
}

pub async fn run(db: &Database, command: ReportCommand) -> Result<()> {
    match command {
        ReportCommand::Summary { days } => {
            let settings = db.settings().load().await?;
            let invoices = db.invoices().all().await?;
            let items = db.invoices().all_items().await?;
            let products = db.products().list_all().await?;

            let summary = sales_summary(&invoices, &items, &products);

            println!("Total sales      {} {}", settings.currency, summary.total_sales());
            println!("Orders           {}", summary.total_orders);
            println!("Profit           {} {}", settings.currency, summary.total_profit());
            println!(
                "Inventory value  {} {}",
                settings.currency,
                summary.inventory_value()
            );

            let breakdown = daily_breakdown(&invoices);
            if !breakdown.is_empty() {
                println!();
                println!("{:<12} {:>12} {:>8}", "DAY", "SALES", "ORDERS");
                for day in breakdown.iter().rev().take(days).rev() {
                    println!(
                        "{:<12} {:>12} {:>8}",
                        day.date,
                        lumen_core::Money::from_cents(day.sales_cents).to_string(),
                        day.orders
                    );
                }
            }
        }

        ReportCommand::Export { out } => {
            let invoices = db.invoices().all().await?;
            let rows = export_rows(&invoices);

            let mut writer = csv::Writer::from_path(&out)
                .with_context(|| format!("cannot write {}", out.display()))?;
            for row in &rows {
                writer.serialize(row)?;
            }
            writer.flush()?;

            println!("Exported {} invoices to {}", rows.len(), out.display());
        }
    }

    Ok(())
}
