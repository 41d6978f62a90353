//! # Sell Command
//!
//! Rings up a sale end to end:
//!
//! ```text
//! lumen sell --item <ID>:2 --item <ID> --discount 10% --pay cash --print
//!
//!   fetch products ─► basket ─► totals ─► tender ─► commit ─► receipt
//! ```
//!
//! The basket checks stock against a snapshot; the storage layer
//! re-validates inside the checkout transaction, so a concurrent sale
//! that drained the shelf fails the commit rather than oversells.

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::Args;

use lumen_core::{
    build_invoice, compute_totals, qr_payload, render_text, Basket, Discount, Tender,
};
use lumen_db::Database;

use super::parse_money;

#[derive(Args)]
pub struct SellArgs {
    /// Line item as PRODUCT_ID or PRODUCT_ID:QUANTITY. Repeatable.
    #[arg(long = "item", required = true)]
    pub items: Vec<String>,

    /// Discount: a percentage like "10%" or a flat amount like "5.00".
    #[arg(long)]
    pub discount: Option<String>,

    /// Payment method: cash, card or mixed.
    #[arg(long, default_value = "cash")]
    pub pay: String,

    /// Cash portion for mixed payment.
    #[arg(long)]
    pub cash: Option<String>,

    /// Card portion for mixed payment.
    #[arg(long)]
    pub card: Option<String>,

    /// Print the full receipt instead of the one-line summary.
    #[arg(long)]
    pub print: bool,
}

pub async fn run(db: &Database, args: SellArgs) -> Result<()> {
    let settings = db.settings().load().await?;

    // Assemble the basket from the current catalog
    let mut basket = Basket::new();
    for spec in &args.items {
        let (id, quantity) = parse_item_spec(spec)?;
        let product = db
            .products()
            .get_by_id(id)
            .await?
            .with_context(|| format!("product not found: {id}"))?;
        basket.add(&product, quantity)?;
    }

    let discount = parse_discount(args.discount.as_deref())?;
    let totals = compute_totals(&basket, discount, &settings.tax)?;

    let tender = match args.pay.as_str() {
        "cash" => Tender::Cash,
        "card" => Tender::Card,
        "mixed" => {
            let cash = args
                .cash
                .as_deref()
                .context("--cash is required for mixed payment")?;
            let card = args
                .card
                .as_deref()
                .context("--card is required for mixed payment")?;
            Tender::Mixed {
                cash: parse_money(cash)?,
                card: parse_money(card)?,
            }
        }
        other => bail!("unknown payment method: {other}"),
    };

    let draft = build_invoice(&basket, totals, tender, Utc::now())?;
    let invoice = db.invoices().commit_checkout(&draft).await?;

    if args.print {
        print!("{}", render_text(&invoice, &draft.items, &settings));
    } else {
        println!(
            "{}  total {} {}  (subtotal {}, discount {}, tax {})",
            invoice.invoice_number,
            settings.currency,
            invoice.total(),
            invoice.subtotal(),
            invoice.discount(),
            invoice.tax(),
        );
        println!("qr: {}", qr_payload(&invoice));
    }

    Ok(())
}

/// Parses "ID" or "ID:QTY". Bare IDs mean quantity 1.
fn parse_item_spec(spec: &str) -> Result<(&str, i64)> {
    match spec.rsplit_once(':') {
        Some((id, qty)) => {
            let quantity: i64 = qty
                .parse()
                .map_err(|_| anyhow::anyhow!("invalid quantity in '{spec}'"))?;
            Ok((id, quantity))
        }
        None => Ok((spec, 1)),
    }
}

/// Parses the --discount flag: "10%" is a percentage, anything else a
/// flat amount.
fn parse_discount(input: Option<&str>) -> Result<Discount> {
    let Some(input) = input else {
        return Ok(Discount::None);
    };

    if let Some(pct) = input.strip_suffix('%') {
        // percent with up to two decimals, e.g. "12.5%" → 1250 bps
        let bps = (parse_money(pct)?.cents()) as i64;
        if !(0..=10000).contains(&bps) {
            bail!("discount percentage must be between 0 and 100");
        }
        return Ok(Discount::Percent(bps as u32));
    }

    Ok(Discount::Flat(parse_money(input)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item_spec() {
        assert_eq!(parse_item_spec("abc").unwrap(), ("abc", 1));
        assert_eq!(parse_item_spec("abc:3").unwrap(), ("abc", 3));
        assert!(parse_item_spec("abc:x").is_err());
    }

    #[test]
    fn test_parse_discount() {
        assert!(matches!(parse_discount(None).unwrap(), Discount::None));
        assert!(matches!(
            parse_discount(Some("10%")).unwrap(),
            Discount::Percent(1000)
        ));
        assert!(matches!(
            parse_discount(Some("12.5%")).unwrap(),
            Discount::Percent(1250)
        ));
        assert!(matches!(
            parse_discount(Some("5.00")).unwrap(),
            Discount::Flat(m) if m.cents() == 500
        ));
        assert!(parse_discount(Some("150%")).is_err());
    }
}
