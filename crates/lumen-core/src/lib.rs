//! # Lumen Core
//!
//! Pure business logic for Lumen POS: money arithmetic, basket rules,
//! checkout totals, reporting folds and receipt rendering. No I/O, no
//! database, no async.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        lumen-core                               │
//! │                                                                 │
//! │  money ──────► integer minor-unit Money, half-up rounding       │
//! │  types ──────► Product, Invoice, InvoiceItem, User              │
//! │  settings ───► StoreSettings, TaxConfig, PaperSize              │
//! │  basket ─────► stock-guarded in-memory basket                   │
//! │  checkout ───► totals computation + invoice assembly            │
//! │  report ─────► sales/profit/inventory aggregations              │
//! │  receipt ────► plain-text receipts + QR payload                 │
//! │  validation ─► input validators                                 │
//! │  error ──────► CoreError / ValidationError                      │
//! │                                                                 │
//! │  Consumed by: lumen-db (persistence), pos-cli (front end)       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The optional `sqlx` feature adds `FromRow`/`Type` derives to the
//! domain types so lumen-db can map rows directly; the crate stays
//! database-free without it.

pub mod basket;
pub mod checkout;
pub mod error;
pub mod money;
pub mod receipt;
pub mod report;
pub mod settings;
pub mod types;
pub mod validation;

// Re-export commonly used types at the crate root.
pub use basket::{Basket, BasketItem};
pub use checkout::{build_invoice, compute_totals, CheckoutDraft, Discount, InvoiceTotals, Tender};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use receipt::{qr_payload, render_text};
pub use report::{daily_breakdown, export_rows, low_stock, sales_summary, SalesSummary};
pub use settings::{PaperSize, StoreSettings, TaxConfig};
pub use types::{Invoice, InvoiceItem, PaymentMethod, Product, Role, User};

// =============================================================================
// Limits
// =============================================================================

/// Maximum number of distinct lines in a basket.
pub const MAX_BASKET_ITEMS: usize = 100;

/// Maximum quantity for a single basket line.
pub const MAX_ITEM_QUANTITY: i64 = 999;
