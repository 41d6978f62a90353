//! # Product Commands
//!
//! Catalog management: add, list/search, update, soft-delete and the
//! low-stock listing.

use anyhow::{bail, Result};
use clap::Subcommand;

use lumen_core::validation::{
    validate_category, validate_price_cents, validate_product_name, validate_stock, validate_uuid,
};
use lumen_db::{Database, NewProduct};

use super::parse_money;

#[derive(Subcommand)]
pub enum ProductCommand {
    /// Add a product to the catalog.
    Add {
        /// Display name.
        name: String,

        /// Sale price, e.g. "149.99".
        #[arg(long)]
        price: String,

        /// Cost price (enables profit reporting).
        #[arg(long)]
        cost: Option<String>,

        /// Opening stock level.
        #[arg(long, default_value_t = 0)]
        stock: i64,

        /// Category label.
        #[arg(long, default_value = "")]
        category: String,

        /// Stock level at or below which the product is flagged low.
        #[arg(long, default_value_t = 0)]
        alert: i64,
    },

    /// List products, optionally filtered by a search term.
    List {
        /// Substring matched against name and category.
        search: Option<String>,

        /// Maximum number of rows.
        #[arg(long, default_value_t = 100)]
        limit: u32,
    },

    /// Update fields on an existing product.
    Update {
        /// Product ID.
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        price: Option<String>,

        #[arg(long)]
        cost: Option<String>,

        #[arg(long)]
        stock: Option<i64>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        alert: Option<i64>,
    },

    /// Remove a product from sale (its sales history is kept).
    Delete {
        /// Product ID.
        id: String,
    },

    /// Show products at or below their stock alert threshold.
    LowStock,
}

pub async fn run(db: &Database, command: ProductCommand) -> Result<()> {
    match command {
        ProductCommand::Add {
            name,
            price,
            cost,
            stock,
            category,
            alert,
        } => {
            validate_product_name(&name)?;
            validate_category(&category)?;
            validate_stock(stock)?;

            let price_cents = parse_money(&price)?.cents();
            validate_price_cents(price_cents)?;

            let cost_cents = match cost {
                Some(cost) => {
                    let cents = parse_money(&cost)?.cents();
                    validate_price_cents(cents)?;
                    Some(cents)
                }
                None => None,
            };

            let product = db
                .products()
                .insert(NewProduct {
                    name,
                    price_cents,
                    cost_cents,
                    stock,
                    category,
                    min_stock_alert: alert,
                })
                .await?;

            println!("Added {} ({})", product.name, product.id);
        }

        ProductCommand::List { search, limit } => {
            let products = match search {
                Some(term) => db.products().search(&term, limit).await?,
                None => db.products().search("", limit).await?,
            };

            if products.is_empty() {
                println!("No products.");
                return Ok(());
            }

            println!(
                "{:<36}  {:<30} {:>10} {:>7}  {}",
                "ID", "NAME", "PRICE", "STOCK", "CATEGORY"
            );
            for p in &products {
                let low = if p.is_low_stock() { " (low)" } else { "" };
                println!(
                    "{:<36}  {:<30} {:>10} {:>7}  {}{}",
                    p.id,
                    p.name,
                    p.price().to_string(),
                    p.stock,
                    p.category,
                    low
                );
            }
        }

        ProductCommand::Update {
            id,
            name,
            price,
            cost,
            stock,
            category,
            alert,
        } => {
            validate_uuid(&id)?;
            let Some(mut product) = db.products().get_by_id(&id).await? else {
                bail!("product not found: {id}");
            };

            if let Some(name) = name {
                validate_product_name(&name)?;
                product.name = name;
            }
            if let Some(price) = price {
                let cents = parse_money(&price)?.cents();
                validate_price_cents(cents)?;
                product.price_cents = cents;
            }
            if let Some(cost) = cost {
                let cents = parse_money(&cost)?.cents();
                validate_price_cents(cents)?;
                product.cost_cents = Some(cents);
            }
            if let Some(stock) = stock {
                validate_stock(stock)?;
                product.stock = stock;
            }
            if let Some(category) = category {
                validate_category(&category)?;
                product.category = category;
            }
            if let Some(alert) = alert {
                product.min_stock_alert = alert;
            }

            db.products().update(&product).await?;
            println!("Updated {}", product.name);
        }

        ProductCommand::Delete { id } => {
            validate_uuid(&id)?;
            db.products().soft_delete(&id).await?;
            println!("Removed product {id} from sale");
        }

        ProductCommand::LowStock => {
            let products = db.products().low_stock().await?;
            if products.is_empty() {
                println!("No products below their alert threshold.");
                return Ok(());
            }

            for p in &products {
                println!("{:<30} stock {:>4} (alert at {})", p.name, p.stock, p.min_stock_alert);
            }
        }
    }

    Ok(())
}
