//! # Settings Commands
//!
//! View and edit the single store settings record. `set` works on one
//! key at a time; the whole blob is re-saved after each change.

use anyhow::{bail, Result};
use clap::Subcommand;

use lumen_core::validation::validate_tax_rate_bps;
use lumen_core::PaperSize;
use lumen_db::Database;

#[derive(Subcommand)]
pub enum SettingsCommand {
    /// Print the current settings as JSON.
    Show,

    /// Change one setting.
    ///
    /// Keys: store-name, tax-number, phone, address, currency,
    /// footer, return-policy, paper-size (80mm|58mm|A4), language,
    /// dark-mode (true|false), tax-enabled (true|false),
    /// tax-rate (percent, e.g. 15), tax-inclusive (true|false)
    Set {
        key: String,
        value: String,
    },
}

pub async fn run(db: &Database, command: SettingsCommand) -> Result<()> {
    match command {
        SettingsCommand::Show => {
            let settings = db.settings().load().await?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }

        SettingsCommand::Set { key, value } => {
            let mut settings = db.settings().load().await?;

            match key.as_str() {
                "store-name" => settings.store_name = value,
                "tax-number" => settings.tax_number = value,
                "phone" => settings.phone = value,
                "address" => settings.address = value,
                "currency" => settings.currency = value,
                "footer" => settings.footer_message = value,
                "return-policy" => settings.return_policy = value,
                "language" => settings.language = value,

                "paper-size" => {
                    settings.paper_size = match value.as_str() {
                        "80mm" => PaperSize::Mm80,
                        "58mm" => PaperSize::Mm58,
                        "A4" | "a4" => PaperSize::A4,
                        other => bail!("unknown paper size: {other} (80mm, 58mm or A4)"),
                    }
                }

                "dark-mode" => settings.dark_mode = parse_bool(&value)?,
                "tax-enabled" => settings.tax.enabled = parse_bool(&value)?,
                "tax-inclusive" => settings.tax.prices_include_tax = parse_bool(&value)?,

                "tax-rate" => {
                    // percent with up to two decimals, stored as bps
                    let bps = super::parse_money(&value)?.cents();
                    if bps < 0 {
                        bail!("tax rate cannot be negative");
                    }
                    validate_tax_rate_bps(bps as u32)?;
                    settings.tax.rate_bps = bps as u32;
                }

                other => bail!("unknown settings key: {other}"),
            }

            db.settings().save(&settings).await?;
            println!("Updated {key}");
        }
    }

    Ok(())
}

fn parse_bool(value: &str) -> Result<bool> {
    match value {
        "true" | "on" | "yes" => Ok(true),
        "false" | "off" | "no" => Ok(false),
        other => bail!("expected true or false, got '{other}'"),
    }
}
