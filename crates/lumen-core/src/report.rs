//! # Reporting
//!
//! Aggregations over the invoice ledger and the product catalog:
//! sales totals, profit, inventory valuation and per-day breakdowns.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Reporting Pipeline                         │
//! │                                                                 │
//! │  invoices ──┐                                                   │
//! │             ├──► sales_summary() ──► SalesSummary               │
//! │  items ─────┤         │                                         │
//! │             │         └─ profit needs cost per product_id       │
//! │  products ──┘            (missing cost counts as zero)          │
//! │                                                                 │
//! │  invoices ────► daily_breakdown() ──► Vec<DailySnapshot>        │
//! │  invoices ────► export_rows()     ──► Vec<InvoiceRow> (CSV)     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is pure: the storage layer fetches, this module folds.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::money::Money;
use crate::types::{Invoice, InvoiceItem, Product};

// =============================================================================
// Sales Summary
// =============================================================================

/// The headline numbers shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SalesSummary {
    /// Sum of invoice totals.
    pub total_sales_cents: i64,

    /// Number of invoices.
    pub total_orders: i64,

    /// Total sales minus cost of goods sold.
    ///
    /// Cost of goods uses each product's CURRENT recorded cost; items
    /// whose product no longer exists (or has no cost) contribute zero
    /// cost, which overstates profit rather than failing the report.
    pub total_profit_cents: i64,

    /// Σ stock × cost across active products.
    pub inventory_value_cents: i64,
}

impl SalesSummary {
    #[inline]
    pub fn total_sales(&self) -> Money {
        Money::from_cents(self.total_sales_cents)
    }

    #[inline]
    pub fn total_profit(&self) -> Money {
        Money::from_cents(self.total_profit_cents)
    }

    #[inline]
    pub fn inventory_value(&self) -> Money {
        Money::from_cents(self.inventory_value_cents)
    }
}

/// Folds the full ledger and catalog into a [`SalesSummary`].
pub fn sales_summary(
    invoices: &[Invoice],
    items: &[InvoiceItem],
    products: &[Product],
) -> SalesSummary {
    let cost_by_id: HashMap<&str, i64> = products
        .iter()
        .map(|p| (p.id.as_str(), p.cost_cents.unwrap_or(0)))
        .collect();

    let total_sales_cents: i64 = invoices.iter().map(|inv| inv.total_cents).sum();

    let cost_of_goods: i64 = items
        .iter()
        .map(|item| {
            let unit_cost = cost_by_id.get(item.product_id.as_str()).copied().unwrap_or(0);
            unit_cost * item.quantity
        })
        .sum();

    let inventory_value_cents: i64 = products
        .iter()
        .filter(|p| p.is_active)
        .map(|p| p.stock * p.cost_cents.unwrap_or(0))
        .sum();

    SalesSummary {
        total_sales_cents,
        total_orders: invoices.len() as i64,
        total_profit_cents: total_sales_cents - cost_of_goods,
        inventory_value_cents,
    }
}

// =============================================================================
// Daily Breakdown
// =============================================================================

/// Sales totals for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailySnapshot {
    pub date: NaiveDate,
    pub sales_cents: i64,
    pub orders: i64,
}

/// Groups invoices by issuance date (UTC), oldest day first.
pub fn daily_breakdown(invoices: &[Invoice]) -> Vec<DailySnapshot> {
    let mut by_day: HashMap<NaiveDate, (i64, i64)> = HashMap::new();
    for inv in invoices {
        let entry = by_day.entry(inv.issued_at.date_naive()).or_insert((0, 0));
        entry.0 += inv.total_cents;
        entry.1 += 1;
    }

    let mut days: Vec<DailySnapshot> = by_day
        .into_iter()
        .map(|(date, (sales_cents, orders))| DailySnapshot {
            date,
            sales_cents,
            orders,
        })
        .collect();
    days.sort_by_key(|d| d.date);
    days
}

// =============================================================================
// Low Stock
// =============================================================================

/// Active products at or below their alert threshold, lowest stock first.
pub fn low_stock(products: &[Product]) -> Vec<&Product> {
    let mut flagged: Vec<&Product> = products
        .iter()
        .filter(|p| p.is_active && p.is_low_stock())
        .collect();
    flagged.sort_by_key(|p| p.stock);
    flagged
}

// =============================================================================
// Export Rows
// =============================================================================

/// One invoice flattened for tabular export.
///
/// Serializes straight into the CSV writer; the column order below is the
/// column order of the exported file.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceRow {
    pub invoice_number: String,
    pub date: String,
    pub total: String,
    pub tax: String,
    pub discount: String,
    pub payment_method: String,
}

/// Flattens invoices into export rows, preserving input order.
pub fn export_rows(invoices: &[Invoice]) -> Vec<InvoiceRow> {
    invoices
        .iter()
        .map(|inv| InvoiceRow {
            invoice_number: inv.invoice_number.clone(),
            date: inv.issued_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            total: inv.total().to_string(),
            tax: inv.tax().to_string(),
            discount: inv.discount().to_string(),
            payment_method: inv.payment_method.to_string(),
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentMethod;
    use chrono::{TimeZone, Utc};

    fn product(id: &str, cost: Option<i64>, stock: i64, alert: i64, active: bool) -> Product {
        Product {
            id: id.into(),
            name: format!("Product {id}"),
            price_cents: 10000,
            cost_cents: cost,
            stock,
            category: "Test".into(),
            min_stock_alert: alert,
            is_active: active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn invoice(total: i64, tax: i64, day: u32) -> Invoice {
        Invoice {
            id: format!("inv-{total}-{day}"),
            invoice_number: format!("INV-202608{day:02}-000000-0001"),
            issued_at: Utc.with_ymd_and_hms(2026, 8, day, 12, 0, 0).unwrap(),
            subtotal_cents: total,
            discount_cents: 0,
            tax_cents: tax,
            total_cents: total,
            payment_method: PaymentMethod::Cash,
            paid_cash_cents: Some(total),
            paid_card_cents: Some(0),
        }
    }

    fn item(invoice_id: &str, product_id: &str, qty: i64) -> InvoiceItem {
        InvoiceItem {
            id: format!("{invoice_id}-{product_id}"),
            invoice_id: invoice_id.into(),
            product_id: product_id.into(),
            name_snapshot: format!("Product {product_id}"),
            unit_price_cents: 10000,
            quantity: qty,
            line_total_cents: 10000 * qty,
        }
    }

    #[test]
    fn test_sales_summary_profit_and_inventory() {
        let products = vec![
            product("a", Some(6000), 10, 0, true),
            product("b", Some(2000), 5, 0, true),
        ];
        let invoices = vec![invoice(30000, 0, 1)];
        let items = vec![item("inv-30000-1", "a", 2), item("inv-30000-1", "b", 1)];

        let summary = sales_summary(&invoices, &items, &products);

        assert_eq!(summary.total_sales_cents, 30000);
        assert_eq!(summary.total_orders, 1);
        // profit = 300.00 − (2 × 60.00 + 1 × 20.00) = 160.00
        assert_eq!(summary.total_profit_cents, 16000);
        // inventory = 10 × 60.00 + 5 × 20.00 = 700.00
        assert_eq!(summary.inventory_value_cents, 70000);
    }

    #[test]
    fn test_missing_product_cost_counts_as_zero() {
        let products = vec![product("a", None, 10, 0, true)];
        let invoices = vec![invoice(10000, 0, 1)];
        // one item references a product that no longer exists at all
        let items = vec![item("inv-10000-1", "a", 1), item("inv-10000-1", "gone", 1)];

        let summary = sales_summary(&invoices, &items, &products);
        assert_eq!(summary.total_profit_cents, 10000);
        assert_eq!(summary.inventory_value_cents, 0);
    }

    #[test]
    fn test_inactive_products_excluded_from_inventory_value() {
        let products = vec![
            product("a", Some(1000), 10, 0, true),
            product("b", Some(1000), 10, 0, false),
        ];
        let summary = sales_summary(&[], &[], &products);
        assert_eq!(summary.inventory_value_cents, 10000);
    }

    #[test]
    fn test_daily_breakdown_groups_and_sorts() {
        let invoices = vec![invoice(100, 0, 3), invoice(200, 0, 1), invoice(300, 0, 3)];
        let days = daily_breakdown(&invoices);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2026, 8, 1).unwrap());
        assert_eq!(days[0].sales_cents, 200);
        assert_eq!(days[1].sales_cents, 400);
        assert_eq!(days[1].orders, 2);
    }

    #[test]
    fn test_low_stock_sorted_and_filtered() {
        let products = vec![
            product("a", None, 8, 5, true),  // fine
            product("b", None, 2, 5, true),  // low
            product("c", None, 0, 5, true),  // lowest
            product("d", None, 1, 5, false), // inactive, skipped
        ];

        let flagged = low_stock(&products);
        let ids: Vec<&str> = flagged.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b"]);
    }

    #[test]
    fn test_export_rows_format() {
        let rows = export_rows(&[invoice(17250, 2250, 15)]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total, "172.50");
        assert_eq!(rows[0].tax, "22.50");
        assert_eq!(rows[0].payment_method, "cash");
        assert!(rows[0].date.starts_with("2026-08-15"));
    }
}
