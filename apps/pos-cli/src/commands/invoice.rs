//! # Invoice Commands
//!
//! Read-only views over the ledger: the newest-first listing and the
//! full receipt for a single invoice.

use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;

use lumen_core::render_text;
use lumen_db::Database;

#[derive(Subcommand)]
pub enum InvoiceCommand {
    /// List invoices, newest first.
    List {
        /// Maximum number of rows.
        #[arg(long, default_value_t = 50)]
        limit: u32,

        /// Only invoices issued today (UTC).
        #[arg(long)]
        today: bool,
    },

    /// Show one invoice as a full receipt.
    Show {
        /// Invoice ID or invoice number.
        reference: String,
    },
}

pub async fn run(db: &Database, command: InvoiceCommand) -> Result<()> {
    match command {
        InvoiceCommand::List { limit, today } => {
            let invoices = if today {
                let start = Utc::now()
                    .date_naive()
                    .and_time(chrono::NaiveTime::MIN)
                    .and_utc();
                let mut todays = db.invoices().list_between(start, Utc::now()).await?;
                todays.reverse(); // newest first, matching the default listing
                todays.truncate(limit as usize);
                todays
            } else {
                db.invoices().list(limit).await?
            };
            if invoices.is_empty() {
                println!("No invoices.");
                return Ok(());
            }

            println!(
                "{:<26}  {:<20} {:>10} {:>8}  {}",
                "NUMBER", "DATE", "TOTAL", "TAX", "PAID"
            );
            for inv in &invoices {
                println!(
                    "{:<26}  {:<20} {:>10} {:>8}  {}",
                    inv.invoice_number,
                    inv.issued_at.format("%Y-%m-%d %H:%M:%S"),
                    inv.total().to_string(),
                    inv.tax().to_string(),
                    inv.payment_method,
                );
            }
        }

        InvoiceCommand::Show { reference } => {
            let (invoice, items) = db.invoices().get_with_items(&reference).await?;
            let settings = db.settings().load().await?;
            print!("{}", render_text(&invoice, &items, &settings));
        }
    }

    Ok(())
}
