//! # Error Types
//!
//! Domain-specific error types for lumen-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         Error Types                             │
//! │                                                                 │
//! │  lumen-core errors (this file)                                  │
//! │  ├── CoreError        - Business rule violations                │
//! │  └── ValidationError  - Input validation failures               │
//! │                                                                 │
//! │  lumen-db errors (separate crate)                               │
//! │  └── DbError          - Storage operation failures              │
//! │                                                                 │
//! │  Flow: ValidationError → CoreError → DbError → CLI (anyhow)     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (names, quantities, IDs)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// The product has no stock at all; it cannot enter a basket.
    #[error("{name} is out of stock")]
    OutOfStock { name: String },

    /// The requested quantity exceeds what is currently in stock.
    ///
    /// ## When This Occurs
    /// - Adding a product to the basket past its stock count
    /// - Incrementing a basket line past its stock count
    /// - Re-validation at checkout commit finds the stock has shrunk
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Checkout attempted on an empty basket.
    #[error("Basket is empty")]
    EmptyBasket,

    /// Basket has exceeded maximum allowed distinct lines.
    #[error("Basket cannot have more than {max} items")]
    BasketTooLarge { max: usize },

    /// Payment split does not cover the invoice total.
    #[error("Invalid payment: {reason}")]
    InvalidPayment { reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when user input doesn't meet requirements, before any
/// business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID, unparsable amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
