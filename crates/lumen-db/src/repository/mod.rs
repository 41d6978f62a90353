//! # Repositories
//!
//! One repository per aggregate, each owning its SQL:
//!
//! - [`product::ProductRepository`] - catalog CRUD, search, stock, soft delete
//! - [`invoice::InvoiceRepository`] - checkout transaction, ledger queries
//! - [`user::UserRepository`] - staff roster
//! - [`settings::SettingsRepository`] - the single settings blob

pub mod invoice;
pub mod product;
pub mod settings;
pub mod user;
