//! # Lumen DB
//!
//! SQLite persistence for Lumen POS.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         lumen-db                                │
//! │                                                                 │
//! │  pool ───────► DbConfig + Database (WAL SqlitePool)             │
//! │  migrations ─► embedded SQL, run on startup                     │
//! │  repository ─► products / invoices / users / settings           │
//! │  error ──────► DbError (wraps sqlx + CoreError)                 │
//! │                                                                 │
//! │  Domain types come from lumen-core (sqlx feature enabled);      │
//! │  this crate only maps them to rows and owns the transactions.   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! let db = Database::new(DbConfig::new("./lumen.db")).await?;
//! let products = db.products().list().await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::invoice::InvoiceRepository;
pub use repository::product::{NewProduct, ProductRepository};
pub use repository::settings::SettingsRepository;
pub use repository::user::UserRepository;
