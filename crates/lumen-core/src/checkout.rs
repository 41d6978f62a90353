//! # Checkout
//!
//! Invoice total computation and invoice assembly, the one piece of real
//! domain arithmetic in the system.
//!
//! ## Total Computation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  compute_totals pipeline                        │
//! │                                                                 │
//! │  subtotal  = Σ line totals                                      │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  discount  = percent → subtotal × bps/10000                     │
//! │              flat    → min(flat, subtotal)   (never exceeds)    │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  taxable   = subtotal − discount                                │
//! │       │                                                         │
//! │       ├── tax disabled   → tax = 0,  total = taxable            │
//! │       ├── tax inclusive  → tax backed OUT, total = taxable      │
//! │       └── tax exclusive  → tax added ON,   total = taxable+tax  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The tax configuration is an explicit immutable argument; nothing in
//! this module reads global state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::basket::Basket;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::settings::TaxConfig;
use crate::types::{Invoice, InvoiceItem, PaymentMethod};
use crate::validation::validate_discount_bps;

// =============================================================================
// Discount
// =============================================================================

/// A basket-level discount, either a flat amount or a percentage of the
/// subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum Discount {
    /// No discount applied.
    None,
    /// Flat amount, clamped to the subtotal.
    Flat(Money),
    /// Percentage of the subtotal, in basis points (1000 = 10%).
    Percent(u32),
}

impl Discount {
    /// Computes the discount amount for a given subtotal.
    ///
    /// ## Clamping
    /// The result never exceeds the subtotal: a flat discount larger than
    /// the sale is cut down, and a percentage is capped at 100%.
    pub fn amount_on(&self, subtotal: Money) -> CoreResult<Money> {
        let amount = match self {
            Discount::None => Money::zero(),
            Discount::Flat(flat) => {
                if flat.is_negative() {
                    return Err(CoreError::InvalidPayment {
                        reason: "discount cannot be negative".to_string(),
                    });
                }
                (*flat).min(subtotal)
            }
            Discount::Percent(bps) => {
                validate_discount_bps(*bps)?;
                subtotal.percentage(*bps)
            }
        };
        Ok(amount)
    }
}

impl Default for Discount {
    fn default() -> Self {
        Discount::None
    }
}

// =============================================================================
// Invoice Totals
// =============================================================================

/// The computed money breakdown of a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub subtotal: Money,
    pub discount: Money,
    pub tax: Money,
    pub total: Money,
}

/// Computes invoice totals from a basket, a discount and the tax
/// configuration.
///
/// ## Example
/// ```rust
/// use lumen_core::checkout::{compute_totals, Discount};
/// use lumen_core::money::Money;
/// use lumen_core::settings::TaxConfig;
/// use lumen_core::basket::Basket;
///
/// let basket = Basket::new();
/// let totals =
///     compute_totals(&basket, Discount::None, &TaxConfig::exclusive(1500)).unwrap();
/// assert_eq!(totals.total, Money::zero());
/// ```
pub fn compute_totals(
    basket: &Basket,
    discount: Discount,
    tax: &TaxConfig,
) -> CoreResult<InvoiceTotals> {
    let subtotal = basket.subtotal();
    let discount_amount = discount.amount_on(subtotal)?;
    let taxable = subtotal - discount_amount;

    let (tax_amount, total) = if !tax.enabled {
        (Money::zero(), taxable)
    } else if tax.prices_include_tax {
        // The listed prices already contain the tax; it is backed out
        // for reporting, not added to the amount due.
        (taxable.included_tax(tax.rate_bps), taxable)
    } else {
        let t = taxable.percentage(tax.rate_bps);
        (t, taxable + t)
    };

    Ok(InvoiceTotals {
        subtotal,
        discount: discount_amount,
        tax: tax_amount,
        total,
    })
}

// =============================================================================
// Tender
// =============================================================================

/// How the customer pays the invoice total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tender {
    /// Entire total in cash.
    Cash,
    /// Entire total on card.
    Card,
    /// Split between cash and card; the parts must sum to the total.
    Mixed { cash: Money, card: Money },
}

impl Tender {
    /// The payment method label recorded on the invoice.
    pub fn method(&self) -> PaymentMethod {
        match self {
            Tender::Cash => PaymentMethod::Cash,
            Tender::Card => PaymentMethod::Card,
            Tender::Mixed { .. } => PaymentMethod::Mixed,
        }
    }

    /// Resolves the cash/card split for a given total.
    fn split(&self, total: Money) -> CoreResult<(Money, Money)> {
        match *self {
            Tender::Cash => Ok((total, Money::zero())),
            Tender::Card => Ok((Money::zero(), total)),
            Tender::Mixed { cash, card } => {
                if cash.is_negative() || card.is_negative() {
                    return Err(CoreError::InvalidPayment {
                        reason: "split amounts cannot be negative".to_string(),
                    });
                }
                if cash + card != total {
                    return Err(CoreError::InvalidPayment {
                        reason: format!(
                            "split {} + {} does not equal total {}",
                            cash, card, total
                        ),
                    });
                }
                Ok((cash, card))
            }
        }
    }
}

// =============================================================================
// Invoice Assembly
// =============================================================================

/// A fully assembled, not-yet-persisted checkout: the invoice record and
/// its line items, ready for the storage layer to commit atomically.
#[derive(Debug, Clone)]
pub struct CheckoutDraft {
    pub invoice: Invoice,
    pub items: Vec<InvoiceItem>,
}

/// Builds an immutable invoice from a basket and computed totals.
///
/// ## What This Does
/// 1. Refuses empty baskets
/// 2. Resolves the cash/card split for the tender
/// 3. Snapshots every basket line into an `InvoiceItem`
/// 4. Generates the UUID id and the human invoice number
///
/// Stock is NOT touched here; decrementing (and re-validating) stock is
/// the storage layer's job, inside the checkout transaction.
pub fn build_invoice(
    basket: &Basket,
    totals: InvoiceTotals,
    tender: Tender,
    issued_at: DateTime<Utc>,
) -> CoreResult<CheckoutDraft> {
    if basket.is_empty() {
        return Err(CoreError::EmptyBasket);
    }

    let (paid_cash, paid_card) = tender.split(totals.total)?;

    let invoice_id = Uuid::new_v4().to_string();
    let invoice = Invoice {
        id: invoice_id.clone(),
        invoice_number: generate_invoice_number(issued_at),
        issued_at,
        subtotal_cents: totals.subtotal.cents(),
        discount_cents: totals.discount.cents(),
        tax_cents: totals.tax.cents(),
        total_cents: totals.total.cents(),
        payment_method: tender.method(),
        paid_cash_cents: Some(paid_cash.cents()),
        paid_card_cents: Some(paid_card.cents()),
    };

    let items = basket
        .items()
        .iter()
        .map(|line| InvoiceItem {
            id: Uuid::new_v4().to_string(),
            invoice_id: invoice_id.clone(),
            product_id: line.product_id.clone(),
            name_snapshot: line.name.clone(),
            unit_price_cents: line.unit_price_cents,
            quantity: line.quantity,
            line_total_cents: line.line_total_cents(),
        })
        .collect();

    Ok(CheckoutDraft { invoice, items })
}

/// Generates an invoice number in format `INV-YYYYMMDD-HHMMSS-NNNN`.
///
/// The trailing sequence comes from the sub-second part of the issuance
/// timestamp; uniqueness is ultimately guaranteed by the UUID primary
/// key, this is the human-facing reference.
fn generate_invoice_number(issued_at: DateTime<Utc>) -> String {
    let seq = issued_at.timestamp_subsec_micros() % 10000;
    format!("INV-{}-{:04}", issued_at.format("%Y%m%d-%H%M%S"), seq)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Product;
    use chrono::TimeZone;

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

    fn basket_with_subtotal(cents: i64) -> Basket {
        let mut basket = Basket::new();
        basket.add(&test_product("1", cents, 100), 1).unwrap();
        basket
    }

    #[test]
    fn test_flat_discount_then_exclusive_tax() {
        // subtotal 200.00, flat discount 50.00, tax 15% exclusive
        // → taxable 150.00, tax 22.50, total 172.50
        let basket = basket_with_subtotal(20000);
        let totals = compute_totals(
            &basket,
            Discount::Flat(Money::from_cents(5000)),
            &TaxConfig::exclusive(1500),
        )
        .unwrap();

        assert_eq!(totals.subtotal.cents(), 20000);
        assert_eq!(totals.discount.cents(), 5000);
        assert_eq!(totals.tax.cents(), 2250);
        assert_eq!(totals.total.cents(), 17250);
    }

    #[test]
    fn test_inclusive_tax_leaves_total_unchanged() {
        // subtotal 115.00, tax 15% inclusive, no discount
        // → tax 15.00, total 115.00
        let basket = basket_with_subtotal(11500);
        let totals =
            compute_totals(&basket, Discount::None, &TaxConfig::inclusive(1500)).unwrap();

        assert_eq!(totals.tax.cents(), 1500);
        assert_eq!(totals.total.cents(), 11500);
    }

    #[test]
    fn test_tax_disabled() {
        let basket = basket_with_subtotal(10000);
        let totals = compute_totals(&basket, Discount::None, &TaxConfig::disabled()).unwrap();

        assert_eq!(totals.tax, Money::zero());
        assert_eq!(totals.total.cents(), 10000);
    }

    #[test]
    fn test_flat_discount_clamped_to_subtotal() {
        let basket = basket_with_subtotal(4000);
        let totals = compute_totals(
            &basket,
            Discount::Flat(Money::from_cents(9999)),
            &TaxConfig::disabled(),
        )
        .unwrap();

        assert_eq!(totals.discount.cents(), 4000);
        assert_eq!(totals.total, Money::zero());
    }

    #[test]
    fn test_percent_discount() {
        // 10% of 200.00 = 20.00
        let basket = basket_with_subtotal(20000);
        let totals =
            compute_totals(&basket, Discount::Percent(1000), &TaxConfig::disabled()).unwrap();

        assert_eq!(totals.discount.cents(), 2000);
        assert_eq!(totals.total.cents(), 18000);
    }

    #[test]
    fn test_percent_discount_over_hundred_rejected() {
        let basket = basket_with_subtotal(20000);
        let err =
            compute_totals(&basket, Discount::Percent(10001), &TaxConfig::disabled()).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_negative_flat_discount_rejected() {
        let basket = basket_with_subtotal(20000);
        assert!(compute_totals(
            &basket,
            Discount::Flat(Money::from_cents(-100)),
            &TaxConfig::disabled(),
        )
        .is_err());
    }

    #[test]
    fn test_build_invoice_snapshots_lines() {
        let mut basket = Basket::new();
        basket.add(&test_product("p1", 15000, 10), 2).unwrap();
        basket.add(&test_product("p2", 4500, 10), 1).unwrap();

        let totals = compute_totals(&basket, Discount::None, &TaxConfig::disabled()).unwrap();
        let draft =
            build_invoice(&basket, totals, Tender::Cash, Utc::now()).unwrap();

        assert_eq!(draft.items.len(), 2);
        assert_eq!(draft.items[0].name_snapshot, "Product p1");
        assert_eq!(draft.items[0].line_total_cents, 30000);
        assert_eq!(draft.invoice.subtotal_cents, 34500);
        assert_eq!(draft.invoice.total_cents, 34500);
        assert!(draft.items.iter().all(|i| i.invoice_id == draft.invoice.id));
    }

    #[test]
    fn test_build_invoice_refuses_empty_basket() {
        let basket = Basket::new();
        let totals = compute_totals(&basket, Discount::None, &TaxConfig::disabled()).unwrap();
        let err = build_invoice(&basket, totals, Tender::Cash, Utc::now()).unwrap_err();
        assert!(matches!(err, CoreError::EmptyBasket));
    }

    #[test]
    fn test_cash_tender_records_full_split() {
        let basket = basket_with_subtotal(10000);
        let totals = compute_totals(&basket, Discount::None, &TaxConfig::disabled()).unwrap();
        let draft = build_invoice(&basket, totals, Tender::Cash, Utc::now()).unwrap();

        assert_eq!(draft.invoice.payment_method, PaymentMethod::Cash);
        assert_eq!(draft.invoice.paid_cash_cents, Some(10000));
        assert_eq!(draft.invoice.paid_card_cents, Some(0));
    }

    #[test]
    fn test_mixed_tender_must_cover_total() {
        let basket = basket_with_subtotal(10000);
        let totals = compute_totals(&basket, Discount::None, &TaxConfig::disabled()).unwrap();

        let bad = Tender::Mixed {
            cash: Money::from_cents(3000),
            card: Money::from_cents(3000),
        };
        assert!(build_invoice(&basket, totals, bad, Utc::now()).is_err());

        let good = Tender::Mixed {
            cash: Money::from_cents(4000),
            card: Money::from_cents(6000),
        };
        let draft = build_invoice(&basket, totals, good, Utc::now()).unwrap();
        assert_eq!(draft.invoice.paid_cash_cents, Some(4000));
        assert_eq!(draft.invoice.paid_card_cents, Some(6000));
    }

    #[test]
    fn test_invoice_number_format() {
        let at = Utc.with_ymd_and_hms(2026, 8, 29, 14, 22, 33).unwrap();
        let number = generate_invoice_number(at);
        assert!(number.starts_with("INV-20260829-142233-"));
        assert_eq!(number.len(), "INV-20260829-142233-0000".len());
    }
}
