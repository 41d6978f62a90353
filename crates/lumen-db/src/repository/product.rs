//! # Product Repository
//!
//! Database operations for the product catalog.
//!
//! ## Key Operations
//! - Listing and substring search (name or category)
//! - CRUD with soft delete
//! - Guarded stock adjustments
//!
//! ## Soft Delete
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  delete ──► UPDATE products SET is_active = 0                   │
//! │                                                                 │
//! │  Why not DELETE?                                                │
//! │  Invoice items snapshot the product but reports join back to    │
//! │  the catalog for cost; a vanished row would silently zero the   │
//! │  cost of goods for all its historical sales.                    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use lumen_core::Product;

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

/// Fields for creating a new product; everything else is generated.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price_cents: i64,
    pub cost_cents: Option<i64>,
    pub stock: i64,
    pub category: String,
    pub min_stock_alert: i64,
}

const SELECT_COLUMNS: &str = "id, name, price_cents, cost_cents, stock, category, \
     min_stock_alert, is_active, created_at, updated_at";

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists active products sorted by name.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM products WHERE is_active = 1 ORDER BY name"
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Lists every product including soft-deleted ones (for reports).
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM products ORDER BY name");
        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Searches active products by name or category substring.
    ///
    /// An empty query behaves like [`ProductRepository::list`] with the
    /// given limit.
    pub async fn search(&self, query: &str, limit: u32) -> DbResult<Vec<Product>> {
        let query = query.trim();

        debug!(query = %query, limit = %limit, "Searching products");

        if query.is_empty() {
            let sql = format!(
                "SELECT {SELECT_COLUMNS} FROM products WHERE is_active = 1 \
                 ORDER BY name LIMIT ?1"
            );
            let products = sqlx::query_as::<_, Product>(&sql)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?;
            return Ok(products);
        }

        let pattern = format!("%{}%", query.replace('%', "\\%").replace('_', "\\_"));
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM products \
             WHERE is_active = 1 AND (name LIKE ?1 ESCAPE '\\' OR category LIKE ?1 ESCAPE '\\') \
             ORDER BY name LIMIT ?2"
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(&pattern)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Search returned products");
        Ok(products)
    }

    /// Gets a product by its ID, active or not.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM products WHERE id = ?1");
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Inserts a new product and returns the stored record.
    pub async fn insert(&self, new: NewProduct) -> DbResult<Product> {
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            price_cents: new.price_cents,
            cost_cents: new.cost_cents,
            stock: new.stock,
            category: new.category,
            min_stock_alert: new.min_stock_alert,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            "INSERT INTO products (
                id, name, price_cents, cost_cents, stock, category,
                min_stock_alert, is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.price_cents)
        .bind(product.cost_cents)
        .bind(product.stock)
        .bind(&product.category)
        .bind(product.min_stock_alert)
        .bind(product.is_active)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(product)
    }

    /// Updates an existing product's editable fields.
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, "Updating product");

        let result = sqlx::query(
            "UPDATE products SET
                name = ?2,
                price_cents = ?3,
                cost_cents = ?4,
                stock = ?5,
                category = ?6,
                min_stock_alert = ?7,
                updated_at = ?8
            WHERE id = ?1",
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.price_cents)
        .bind(product.cost_cents)
        .bind(product.stock)
        .bind(&product.category)
        .bind(product.min_stock_alert)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", &product.id));
        }

        Ok(())
    }

    /// Adjusts stock by a delta (negative for corrections, positive for
    /// restocking). The guard clause refuses adjustments that would take
    /// stock below zero.
    pub async fn adjust_stock(&self, id: &str, delta: i64) -> DbResult<()> {
        debug!(id = %id, delta = %delta, "Adjusting stock");

        let result = sqlx::query(
            "UPDATE products
             SET stock = stock + ?2, updated_at = ?3
             WHERE id = ?1 AND stock + ?2 >= 0",
        )
        .bind(id)
        .bind(delta)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Soft-deletes a product by setting `is_active = 0`.
    ///
    /// Historical invoice items keep their snapshots; the product simply
    /// stops appearing in listings and can no longer be sold.
    pub async fn soft_delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Soft-deleting product");

        let result = sqlx::query(
            "UPDATE products SET is_active = 0, updated_at = ?2 WHERE id = ?1",
        )
        .bind(id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Active products at or below their alert threshold, lowest first.
    pub async fn low_stock(&self) -> DbResult<Vec<Product>> {
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM products \
             WHERE is_active = 1 AND stock <= min_stock_alert \
             ORDER BY stock"
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Counts active products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE is_active = 1")
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

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn sample(name: &str, stock: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price_cents: 15000,
            cost_cents: Some(9000),
            stock,
            category: "Fragrance".to_string(),
            min_stock_alert: 5,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = test_db().await;
        let repo = db.products();

        let inserted = repo.insert(sample("Lavender Perfume", 10)).await.unwrap();
        let fetched = repo.get_by_id(&inserted.id).await.unwrap().unwrap();

        assert_eq!(fetched.name, "Lavender Perfume");
        assert_eq!(fetched.price_cents, 15000);
        assert_eq!(fetched.stock, 10);
        assert!(fetched.is_active);
    }

    #[tokio::test]
    async fn test_search_matches_name_and_category() {
        let db = test_db().await;
        let repo = db.products();
        repo.insert(sample("Lavender Perfume", 10)).await.unwrap();
        repo.insert(sample("Rose Oil", 10)).await.unwrap();

        let by_name = repo.search("lavender", 20).await.unwrap();
        assert_eq!(by_name.len(), 1);

        let by_category = repo.search("Fragrance", 20).await.unwrap();
        assert_eq!(by_category.len(), 2);

        let none = repo.search("nonexistent", 20).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_soft_delete_hides_from_list() {
        let db = test_db().await;
        let repo = db.products();
        let product = repo.insert(sample("Lavender Perfume", 10)).await.unwrap();

        repo.soft_delete(&product.id).await.unwrap();

        assert!(repo.list().await.unwrap().is_empty());
        // still fetchable by id for history
        let fetched = repo.get_by_id(&product.id).await.unwrap().unwrap();
        assert!(!fetched.is_active);
    }

    #[tokio::test]
    async fn test_adjust_stock_refuses_negative_result() {
        let db = test_db().await;
        let repo = db.products();
        let product = repo.insert(sample("Lavender Perfume", 3)).await.unwrap();

        repo.adjust_stock(&product.id, -2).await.unwrap();
        assert_eq!(repo.get_by_id(&product.id).await.unwrap().unwrap().stock, 1);

        assert!(repo.adjust_stock(&product.id, -5).await.is_err());
        assert_eq!(repo.get_by_id(&product.id).await.unwrap().unwrap().stock, 1);
    }

    #[tokio::test]
    async fn test_low_stock_listing() {
        let db = test_db().await;
        let repo = db.products();
        repo.insert(sample("Plenty", 50)).await.unwrap();
        repo.insert(sample("Scarce", 2)).await.unwrap();

        let low = repo.low_stock().await.unwrap();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].name, "Scarce");
    }
}
