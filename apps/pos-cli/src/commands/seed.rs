//! # Seed Command
//!
//! Loads a small demo catalog and roster into an empty database, for
//! trying out the register before entering real stock.

use anyhow::{bail, Result};

use lumen_core::Role;
use lumen_db::{Database, NewProduct};

pub async fn run(db: &Database) -> Result<()> {
    if db.products().count().await? > 0 {
        bail!("database already has products; seed only works on an empty catalog");
    }

    let catalog = [
        ("Lavender Perfume 50ml", 15000, 9000, 25, "Fragrance"),
        ("Oud Oil 12ml", 32000, 21000, 10, "Fragrance"),
        ("Rose Water Spray", 4500, 1800, 40, "Fragrance"),
        ("Gift Box Small", 2500, 1000, 60, "Packaging"),
        ("Gift Box Large", 5000, 2200, 30, "Packaging"),
        ("Incense Sticks Pack", 1500, 500, 100, "Home"),
        ("Ceramic Burner", 7500, 3800, 15, "Home"),
    ];

    for (name, price, cost, stock, category) in catalog {
        db.products()
            .insert(NewProduct {
                name: name.to_string(),
                price_cents: price,
                cost_cents: Some(cost),
                stock,
                category: category.to_string(),
                min_stock_alert: 5,
            })
            .await?;
    }

    db.users().insert("Owner", Role::Admin).await?;
    db.users().insert("Cashier", Role::Cashier).await?;

    println!("Seeded {} products and 2 users.", catalog.len());
    Ok(())
}
