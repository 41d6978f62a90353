//! # Domain Types
//!
//! Core domain types used throughout Lumen POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                            │
//! │                                                                 │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────┐    │
//! │  │    Product     │  │    Invoice     │  │  InvoiceItem   │    │
//! │  │  ────────────  │  │  ────────────  │  │  ────────────  │    │
//! │  │  id (UUID)     │  │  id (UUID)     │  │  invoice_id    │    │
//! │  │  name          │  │  invoice_number│  │  product_id    │    │
//! │  │  price_cents   │  │  total_cents   │  │  name_snapshot │    │
//! │  │  stock         │  │  issued_at     │  │  quantity      │    │
//! │  └────────────────┘  └────────────────┘  └────────────────┘    │
//! │                                                                 │
//! │  ┌────────────────┐  ┌────────────────┐                        │
//! │  │     User       │  │ PaymentMethod  │                        │
//! │  │  ────────────  │  │  ────────────  │                        │
//! │  │  id (UUID)     │  │  Cash          │                        │
//! │  │  name          │  │  Card          │                        │
//! │  │  role          │  │  Mixed         │                        │
//! │  └────────────────┘  └────────────────┘                        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Invoices carry both:
//! - `id`: UUID v4 - immutable, used for database relations
//! - `invoice_number`: human-readable receipt reference

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown on the sales grid and on receipts.
    pub name: String,

    /// Sale price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Cost price in cents (for profit and inventory valuation).
    pub cost_cents: Option<i64>,

    /// Current stock level. Decremented only at checkout.
    pub stock: i64,

    /// Category label used for browsing and search.
    pub category: String,

    /// Stock level at or below which the product is flagged as low.
    pub min_stock_alert: i64,

    /// Whether the product is active (soft delete).
    pub is_active: bool,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the sale price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the cost price, treating an unset cost as zero.
    ///
    /// Matches the reporting rule: a product without a recorded cost
    /// contributes nothing to cost-of-goods and inventory value.
    #[inline]
    pub fn cost(&self) -> Money {
        Money::from_cents(self.cost_cents.unwrap_or(0))
    }

    /// Checks whether stock is at or below the configured alert threshold.
    ///
    /// A visual flag only; not an automated reorder mechanism.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.min_stock_alert
    }

    /// Checks if the requested quantity can be sold from current stock.
    pub fn can_sell(&self, quantity: i64) -> bool {
        self.is_active && self.stock >= quantity
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How an invoice was paid.
///
/// `Mixed` splits the total between cash and card; the split amounts are
/// recorded on the invoice itself.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment on an external terminal.
    Card,
    /// Part cash, part card.
    Mixed,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Mixed => "mixed",
        };
        f.write_str(label)
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            "mixed" => Ok(PaymentMethod::Mixed),
            other => Err(format!("unknown payment method: {other}")),
        }
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// A finalized sale.
///
/// ## Immutability
/// Once created at checkout an invoice is never edited, voided or deleted.
/// There is deliberately no update path anywhere in the system; the invoice
/// list is an append-only ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Invoice {
    pub id: String,
    /// Human-readable receipt reference, e.g. `INV-20260829-142233-0917`.
    pub invoice_number: String,
    /// Issuance timestamp.
    pub issued_at: DateTime<Utc>,
    pub subtotal_cents: i64,
    pub discount_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
    pub payment_method: PaymentMethod,
    /// Cash portion for mixed payments (also set for pure cash sales).
    pub paid_cash_cents: Option<i64>,
    /// Card portion for mixed payments (also set for pure card sales).
    pub paid_card_cents: Option<i64>,
}

impl Invoice {
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_cents(self.discount_cents)
    }

    #[inline]
    pub fn tax(&self) -> Money {
        Money::from_cents(self.tax_cents)
    }

    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Invoice Item
// =============================================================================

/// A line item on an invoice.
///
/// Uses the snapshot pattern to freeze product data at sale time: the name
/// and unit price are copies, deliberately decoupled from the live product
/// record so later price changes or deletions leave history untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct InvoiceItem {
    pub id: String,
    pub invoice_id: String,
    /// Reference to the product that was sold. Not a foreign key by
    /// design: the ledger outlives the catalog entry.
    pub product_id: String,
    /// Product name at time of sale (frozen).
    pub name_snapshot: String,
    /// Unit price in cents at time of sale (frozen).
    pub unit_price_cents: i64,
    /// Quantity sold.
    pub quantity: i64,
    /// Line total (unit price × quantity).
    pub line_total_cents: i64,
}

impl InvoiceItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }
}

// =============================================================================
// User
// =============================================================================

/// A user's role on the roster.
///
/// This is a staff roster, not an access-control system: no passwords,
/// sessions or permission checks exist anywhere.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Cashier,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => f.write_str("admin"),
            Role::Cashier => f.write_str("cashier"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "cashier" => Ok(Role::Cashier),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// A staff member.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: Role,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(stock: i64, alert: i64) -> Product {
        Product {
            id: "p1".into(),
            name: "Lavender Perfume".into(),
            price_cents: 15000,
            cost_cents: Some(9000),
            stock,
            category: "Fragrance".into(),
            min_stock_alert: alert,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_low_stock_threshold_is_inclusive() {
        assert!(product(5, 5).is_low_stock());
        assert!(product(3, 5).is_low_stock());
        assert!(!product(6, 5).is_low_stock());
    }

    #[test]
    fn test_can_sell_respects_stock_and_active() {
        let p = product(4, 1);
        assert!(p.can_sell(4));
        assert!(!p.can_sell(5));

        let mut inactive = product(4, 1);
        inactive.is_active = false;
        assert!(!inactive.can_sell(1));
    }

    #[test]
    fn test_cost_defaults_to_zero() {
        let mut p = product(1, 1);
        p.cost_cents = None;
        assert_eq!(p.cost(), Money::zero());
    }

    #[test]
    fn test_payment_method_round_trip() {
        for m in [PaymentMethod::Cash, PaymentMethod::Card, PaymentMethod::Mixed] {
            let parsed: PaymentMethod = m.to_string().parse().unwrap();
            assert_eq!(parsed, m);
        }
        assert!("wire".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_role_round_trip() {
        for r in [Role::Admin, Role::Cashier] {
            let parsed: Role = r.to_string().parse().unwrap();
            assert_eq!(parsed, r);
        }
    }
}
