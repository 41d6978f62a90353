//! # Basket
//!
//! The in-progress, unpersisted list of line items being assembled
//! before checkout.
//!
//! ## Basket Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Basket Operations                            │
//! │                                                                 │
//! │  Cashier Action            Basket Change                        │
//! │  ──────────────            ─────────────                        │
//! │  Pick product ───────────► add(product, 1)                      │
//! │  Change quantity ────────► set_quantity(product, n)             │
//! │  Remove line ────────────► remove(product_id)                   │
//! │  New invoice ────────────► clear()                              │
//! │                                                                 │
//! │  Every mutation that grows a line is checked against the        │
//! │  product's CURRENT stock; the basket can never hold more of a   │
//! │  product than the shelf does.                                   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by `product_id` (adding the same product merges)
//! - Quantity is at least 1 and never exceeds the product's stock
//! - Prices are frozen at the moment the line is created

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Product;
use crate::validation::validate_quantity;
use crate::MAX_BASKET_ITEMS;

// =============================================================================
// Basket Item
// =============================================================================

/// One basket line: product reference plus a frozen name/price snapshot.
///
/// The snapshot ensures the basket (and the invoice built from it)
/// displays consistent data even if the catalog entry is edited while
/// the sale is in progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasketItem {
    /// Product ID (UUID).
    pub product_id: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Price in cents at time of adding (frozen).
    pub unit_price_cents: i64,

    /// Quantity in the basket.
    pub quantity: i64,
}

impl BasketItem {
    fn from_product(product: &Product, quantity: i64) -> Self {
        BasketItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price_cents: product.price_cents,
            quantity,
        }
    }

    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents * self.quantity
    }

    /// Line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents())
    }
}

// =============================================================================
// Basket
// =============================================================================

/// The in-memory basket.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Basket {
    items: Vec<BasketItem>,
}

impl Basket {
    /// Creates a new empty basket.
    pub fn new() -> Self {
        Basket { items: Vec::new() }
    }

    /// Adds a product to the basket, or grows its line if already present.
    ///
    /// ## Stock Guard
    /// The combined quantity for the line may never exceed the product's
    /// current stock. Out-of-stock products are refused outright.
    pub fn add(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;

        if product.stock <= 0 || !product.is_active {
            return Err(CoreError::OutOfStock {
                name: product.name.clone(),
            });
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            let new_qty = item.quantity + quantity;
            if new_qty > product.stock {
                return Err(CoreError::InsufficientStock {
                    name: product.name.clone(),
                    available: product.stock,
                    requested: new_qty,
                });
            }
            item.quantity = new_qty;
            return Ok(());
        }

        if self.items.len() >= MAX_BASKET_ITEMS {
            return Err(CoreError::BasketTooLarge {
                max: MAX_BASKET_ITEMS,
            });
        }

        if quantity > product.stock {
            return Err(CoreError::InsufficientStock {
                name: product.name.clone(),
                available: product.stock,
                requested: quantity,
            });
        }

        self.items.push(BasketItem::from_product(product, quantity));
        Ok(())
    }

    /// Sets the quantity of an existing line.
    ///
    /// Quantities below 1 clamp to 1 (a line with zero quantity is removed
    /// with [`Basket::remove`], not set to zero). Quantities above the
    /// product's stock are refused.
    pub fn set_quantity(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        let quantity = quantity.max(1);
        validate_quantity(quantity)?;

        if quantity > product.stock {
            return Err(CoreError::InsufficientStock {
                name: product.name.clone(),
                available: product.stock,
                requested: quantity,
            });
        }

        let item = self
            .items
            .iter_mut()
            .find(|i| i.product_id == product.id)
            .ok_or_else(|| CoreError::ProductNotFound(product.id.clone()))?;

        item.quantity = quantity;
        Ok(())
    }

    /// Removes a line by product ID. Returns whether a line was removed.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        self.items.len() != before
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// The basket lines, in insertion order.
    pub fn items(&self) -> &[BasketItem] {
        &self.items
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Sum of line totals, before discount and tax.
    pub fn subtotal_cents(&self) -> i64 {
        self.items.iter().map(|i| i.line_total_cents()).sum()
    }

    /// Subtotal as Money.
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents())
    }

    /// Checks if the basket is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_product(id: &str, price_cents: i64, stock: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            price_cents,
            cost_cents: None,
            stock,
            category: "Test".to_string(),
            min_stock_alert: 0,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_add_item() {
        let mut basket = Basket::new();
        let product = test_product("1", 999, 10);

        basket.add(&product, 2).unwrap();

        assert_eq!(basket.line_count(), 1);
        assert_eq!(basket.total_quantity(), 2);
        assert_eq!(basket.subtotal_cents(), 1998);
    }

    #[test]
    fn test_add_same_product_merges_line() {
        let mut basket = Basket::new();
        let product = test_product("1", 999, 10);

        basket.add(&product, 2).unwrap();
        basket.add(&product, 3).unwrap();

        assert_eq!(basket.line_count(), 1);
        assert_eq!(basket.total_quantity(), 5);
    }

    #[test]
    fn test_subtotal_is_sum_of_line_totals() {
        let mut basket = Basket::new();
        basket.add(&test_product("1", 15000, 5), 1).unwrap();
        basket.add(&test_product("2", 4500, 50), 3).unwrap();

        // 150.00 + 3 × 45.00 = 285.00
        assert_eq!(basket.subtotal_cents(), 15000 + 3 * 4500);
    }

    #[test]
    fn test_out_of_stock_product_refused() {
        let mut basket = Basket::new();
        let product = test_product("1", 999, 0);

        let err = basket.add(&product, 1).unwrap_err();
        assert!(matches!(err, CoreError::OutOfStock { .. }));
        assert!(basket.is_empty());
    }

    #[test]
    fn test_cannot_add_past_stock() {
        let mut basket = Basket::new();
        let product = test_product("1", 999, 3);

        let err = basket.add(&product, 4).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available: 3,
                requested: 4,
                ..
            }
        ));
    }

    #[test]
    fn test_cannot_increment_past_stock() {
        let mut basket = Basket::new();
        let product = test_product("1", 999, 3);

        basket.add(&product, 3).unwrap();
        let err = basket.add(&product, 1).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { .. }));

        // Quantity unchanged after the refused increment
        assert_eq!(basket.total_quantity(), 3);
    }

    #[test]
    fn test_set_quantity_clamps_to_one() {
        let mut basket = Basket::new();
        let product = test_product("1", 999, 10);

        basket.add(&product, 5).unwrap();
        basket.set_quantity(&product, 0).unwrap();

        assert_eq!(basket.total_quantity(), 1);
    }

    #[test]
    fn test_set_quantity_respects_stock() {
        let mut basket = Basket::new();
        let product = test_product("1", 999, 4);

        basket.add(&product, 2).unwrap();
        assert!(basket.set_quantity(&product, 5).is_err());
        assert_eq!(basket.total_quantity(), 2);
    }

    #[test]
    fn test_price_frozen_at_add_time() {
        let mut basket = Basket::new();
        let mut product = test_product("1", 1000, 10);

        basket.add(&product, 1).unwrap();
        product.price_cents = 2000; // catalog edit mid-sale

        assert_eq!(basket.subtotal_cents(), 1000);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut basket = Basket::new();
        let product = test_product("1", 999, 10);

        basket.add(&product, 2).unwrap();
        assert!(basket.remove("1"));
        assert!(!basket.remove("1"));
        assert!(basket.is_empty());

        basket.add(&product, 2).unwrap();
        basket.clear();
        assert!(basket.is_empty());
    }
}
