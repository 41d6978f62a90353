//! # Invoice Repository
//!
//! The append-only invoice ledger and the checkout transaction.
//!
//! ## Checkout Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  commit_checkout(draft)                         │
//! │                                                                 │
//! │  BEGIN                                                          │
//! │    for each line:                                               │
//! │      SELECT stock FROM products WHERE id AND is_active          │
//! │        ├── missing / inactive ──► ROLLBACK (ProductNotFound)    │
//! │        ├── stock < quantity ────► ROLLBACK (InsufficientStock)  │
//! │        └── ok ──► UPDATE stock = stock − quantity               │
//! │    INSERT invoice                                               │
//! │    INSERT invoice_items                                         │
//! │  COMMIT                                                         │
//! │                                                                 │
//! │  Stock is re-validated HERE, not trusted from the basket: the   │
//! │  basket checked against a snapshot that may be stale by the     │
//! │  time the sale is finalized.                                    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is deliberately no update or delete on this table; invoices
//! are immutable once committed.

use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use lumen_core::{CheckoutDraft, CoreError, Invoice, InvoiceItem};

const INVOICE_COLUMNS: &str = "id, invoice_number, issued_at, subtotal_cents, discount_cents, \
     tax_cents, total_cents, payment_method, paid_cash_cents, paid_card_cents";

const ITEM_COLUMNS: &str =
    "id, invoice_id, product_id, name_snapshot, unit_price_cents, quantity, line_total_cents";

/// Repository for invoice database operations.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    pool: SqlitePool,
}

impl InvoiceRepository {
    /// Creates a new InvoiceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InvoiceRepository { pool }
    }

    /// Commits a checkout atomically: re-validates stock, decrements it,
    /// and writes the invoice with its items. Either everything lands or
    /// nothing does.
    pub async fn commit_checkout(&self, draft: &CheckoutDraft) -> DbResult<Invoice> {
        debug!(
            invoice_number = %draft.invoice.invoice_number,
            lines = draft.items.len(),
            "Committing checkout"
        );

        let mut tx = self.pool.begin().await?;

        for item in &draft.items {
            let row = sqlx::query(
                "SELECT name, stock FROM products WHERE id = ?1 AND is_active = 1",
            )
            .bind(&item.product_id)
            .fetch_optional(&mut *tx)
            .await?;

            let row = match row {
                Some(row) => row,
                None => {
                    return Err(DbError::Core(CoreError::ProductNotFound(
                        item.product_id.clone(),
                    )))
                }
            };

            let name: String = row.get("name");
            let stock: i64 = row.get("stock");

            if stock < item.quantity {
                return Err(DbError::Core(CoreError::InsufficientStock {
                    name,
                    available: stock,
                    requested: item.quantity,
                }));
            }

            sqlx::query(
                "UPDATE products SET stock = stock - ?2, updated_at = ?3 WHERE id = ?1",
            )
            .bind(&item.product_id)
            .bind(item.quantity)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;
        }

        let inv = &draft.invoice;
        sqlx::query(
            "INSERT INTO invoices (
                id, invoice_number, issued_at, subtotal_cents, discount_cents,
                tax_cents, total_cents, payment_method, paid_cash_cents, paid_card_cents
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )
        .bind(&inv.id)
        .bind(&inv.invoice_number)
        .bind(inv.issued_at)
        .bind(inv.subtotal_cents)
        .bind(inv.discount_cents)
        .bind(inv.tax_cents)
        .bind(inv.total_cents)
        .bind(inv.payment_method)
        .bind(inv.paid_cash_cents)
        .bind(inv.paid_card_cents)
        .execute(&mut *tx)
        .await?;

        for item in &draft.items {
            sqlx::query(
                "INSERT INTO invoice_items (
                    id, invoice_id, product_id, name_snapshot,
                    unit_price_cents, quantity, line_total_cents
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )
            .bind(&item.id)
            .bind(&item.invoice_id)
            .bind(&item.product_id)
            .bind(&item.name_snapshot)
            .bind(item.unit_price_cents)
            .bind(item.quantity)
            .bind(item.line_total_cents)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(
            invoice_number = %inv.invoice_number,
            total_cents = inv.total_cents,
            "Checkout committed"
        );

        Ok(inv.clone())
    }

    /// Lists invoices, newest first.
    pub async fn list(&self, limit: u32) -> DbResult<Vec<Invoice>> {
        let sql = format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices ORDER BY issued_at DESC LIMIT ?1"
        );
        let invoices = sqlx::query_as::<_, Invoice>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(invoices)
    }

    /// Lists invoices issued within `[from, to)`, oldest first.
    pub async fn list_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DbResult<Vec<Invoice>> {
        let sql = format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices \
             WHERE issued_at >= ?1 AND issued_at < ?2 \
             ORDER BY issued_at"
        );
        let invoices = sqlx::query_as::<_, Invoice>(&sql)
            .bind(from)
            .bind(to)
            .fetch_all(&self.pool)
            .await?;

        Ok(invoices)
    }

    /// Gets an invoice by ID or by its human invoice number.
    pub async fn get(&self, reference: &str) -> DbResult<Option<Invoice>> {
        let sql = format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices WHERE id = ?1 OR invoice_number = ?1"
        );
        let invoice = sqlx::query_as::<_, Invoice>(&sql)
            .bind(reference)
            .fetch_optional(&self.pool)
            .await?;

        Ok(invoice)
    }

    /// Gets an invoice with its line items.
    pub async fn get_with_items(&self, reference: &str) -> DbResult<(Invoice, Vec<InvoiceItem>)> {
        let invoice = self
            .get(reference)
            .await?
            .ok_or_else(|| DbError::not_found("Invoice", reference))?;

        let sql = format!(
            "SELECT {ITEM_COLUMNS} FROM invoice_items WHERE invoice_id = ?1 ORDER BY rowid"
        );
        let items = sqlx::query_as::<_, InvoiceItem>(&sql)
            .bind(&invoice.id)
            .fetch_all(&self.pool)
            .await?;

        Ok((invoice, items))
    }

    /// Every line item in the ledger (for profit reporting).
    pub async fn all_items(&self) -> DbResult<Vec<InvoiceItem>> {
        let sql = format!("SELECT {ITEM_COLUMNS} FROM invoice_items");
        let items = sqlx::query_as::<_, InvoiceItem>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    /// Every invoice in the ledger, oldest first (for reporting/export).
    pub async fn all(&self) -> DbResult<Vec<Invoice>> {
        let sql = format!("SELECT {INVOICE_COLUMNS} FROM invoices ORDER BY issued_at");
        let invoices = sqlx::query_as::<_, Invoice>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(invoices)
    }

    /// Counts invoices (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoices")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::product::NewProduct;
    use lumen_core::{build_invoice, compute_totals, Basket, Discount, Product, TaxConfig, Tender};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_product(db: &Database, name: &str, price: i64, stock: i64) -> Product {
        db.products()
            .insert(NewProduct {
                name: name.to_string(),
                price_cents: price,
                cost_cents: Some(price / 2),
                stock,
                category: "Test".to_string(),
                min_stock_alert: 0,
            })
            .await
            .unwrap()
    }

    fn draft_for(basket: &Basket) -> CheckoutDraft {
        let totals = compute_totals(basket, Discount::None, &TaxConfig::exclusive(1500)).unwrap();
        build_invoice(basket, totals, Tender::Cash, Utc::now()).unwrap()
    }

    #[tokio::test]
    async fn test_checkout_decrements_stock_and_persists() {
        let db = test_db().await;
        let product = seed_product(&db, "Lavender Perfume", 15000, 10).await;

        let mut basket = Basket::new();
        basket.add(&product, 3).unwrap();
        let draft = draft_for(&basket);

        let invoice = db.invoices().commit_checkout(&draft).await.unwrap();

        let stored = db.products().get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(stored.stock, 7);

        let (fetched, items) = db
            .invoices()
            .get_with_items(&invoice.invoice_number)
            .await
            .unwrap();
        assert_eq!(fetched.id, invoice.id);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 3);
        assert_eq!(items[0].name_snapshot, "Lavender Perfume");
    }

    #[tokio::test]
    async fn test_checkout_rolls_back_when_stock_shrank() {
        let db = test_db().await;
        let product = seed_product(&db, "Lavender Perfume", 15000, 5).await;

        let mut basket = Basket::new();
        basket.add(&product, 5).unwrap();
        let draft = draft_for(&basket);

        // Stock shrinks between basket assembly and commit
        db.products().adjust_stock(&product.id, -3).await.unwrap();

        let err = db.invoices().commit_checkout(&draft).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Core(CoreError::InsufficientStock { available: 2, .. })
        ));

        // Nothing was written and stock is untouched
        assert_eq!(db.invoices().count().await.unwrap(), 0);
        let stored = db.products().get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(stored.stock, 2);
    }

    #[tokio::test]
    async fn test_checkout_rolls_back_on_deleted_product() {
        let db = test_db().await;
        let keep = seed_product(&db, "Keep", 1000, 10).await;
        let gone = seed_product(&db, "Gone", 2000, 10).await;

        let mut basket = Basket::new();
        basket.add(&keep, 1).unwrap();
        basket.add(&gone, 1).unwrap();
        let draft = draft_for(&basket);

        db.products().soft_delete(&gone.id).await.unwrap();

        let err = db.invoices().commit_checkout(&draft).await.unwrap_err();
        assert!(matches!(err, DbError::Core(CoreError::ProductNotFound(_))));

        // The first line's decrement was rolled back with the rest
        let stored = db.products().get_by_id(&keep.id).await.unwrap().unwrap();
        assert_eq!(stored.stock, 10);
        assert_eq!(db.invoices().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_soft_deleted_product_keeps_invoice_history() {
        let db = test_db().await;
        let product = seed_product(&db, "Lavender Perfume", 15000, 10).await;

        let mut basket = Basket::new();
        basket.add(&product, 1).unwrap();
        let invoice = db.invoices().commit_checkout(&draft_for(&basket)).await.unwrap();

        db.products().soft_delete(&product.id).await.unwrap();

        let (_, items) = db.invoices().get_with_items(&invoice.id).await.unwrap();
        assert_eq!(items[0].name_snapshot, "Lavender Perfume");
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let db = test_db().await;
        let product = seed_product(&db, "Lavender Perfume", 15000, 100).await;

        for _ in 0..3 {
            let mut basket = Basket::new();
            basket.add(&product, 1).unwrap();
            db.invoices().commit_checkout(&draft_for(&basket)).await.unwrap();
        }

        let invoices = db.invoices().list(10).await.unwrap();
        assert_eq!(invoices.len(), 3);
        assert!(invoices.windows(2).all(|w| w[0].issued_at >= w[1].issued_at));
    }
}
