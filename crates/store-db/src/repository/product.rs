//! # Product Repository
//!
//! Database operations for products and their stock levels.
//!
//! ## Key Operations
//! - Selling with an atomic conditional decrement (`search`)
//! - Overwriting a stock level (`take_product`)
//! - Catalogue inserts and lookups by name
//!
//! ## Atomic Sell
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Stock Decrement Strategy                             │
//! │                                                                         │
//! │  ❌ WRONG: read, compare in app, write absolute value                   │
//! │     SELECT quantity FROM products WHERE name = ?    → 10               │
//! │     UPDATE products SET quantity = 7 WHERE name = ?                     │
//! │     Two requests read 10, both write → one sale lost, stock oversold    │
//! │                                                                         │
//! │  ✅ CORRECT: one conditional statement                                  │
//! │     UPDATE products SET quantity = quantity - ?1                        │
//! │     WHERE name = ?3 AND quantity >= ?1                                  │
//! │     RETURNING name, quantity, price_cents, original_price_cents         │
//! │                                                                         │
//! │  SQLite serializes writers, so the check and the decrement can't be    │
//! │  interleaved by another sale.                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::store::InventoryStore;
use store_core::validation::{
    check_stock, validate_price_cents, validate_product_name, validate_quantity,
    validate_stock_level,
};
use store_core::{CoreError, Product, ProductSell};

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// // Sell 3 units
/// let sold = repo.search("Cola 330ml", 3).await?;
/// println!("{} left", sold.quantity);
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets a product by its unique name.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT
                id,
                name,
                quantity,
                price_cents,
                original_price_cents,
                created_at,
                updated_at
            FROM products
            WHERE name = ?1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Inserted product
    /// * `Err(DbError::UniqueViolation)` - name already exists
    pub async fn insert(&self, product: &Product) -> DbResult<Product> {
        validate_product_name(&product.name)?;
        validate_stock_level(product.quantity)?;
        validate_price_cents(product.price_cents)?;
        validate_price_cents(product.original_price_cents)?;

        debug!(name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, quantity, price_cents, original_price_cents,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.quantity)
        .bind(product.price_cents)
        .bind(product.original_price_cents)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { .. } => DbError::duplicate("name", &product.name),
            other => other,
        })?;

        Ok(product.clone())
    }

    /// Counts total products (for diagnostics and the seed tool).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Sells `quantity` units of `product_name`.
    ///
    /// ## How It Works
    /// 1. One conditional UPDATE decrements the stock only if enough is on
    ///    hand, and returns the row as it is after the decrement
    /// 2. No row back? A read-only lookup tells "unknown product" apart
    ///    from "not enough stock"; nothing is written in that case
    ///
    /// ## Returns
    /// * `Ok(ProductSell)` - `quantity` is the stock remaining
    /// * `Err(DbError::NotFound)` - no product with that name
    /// * `Err(DbError::Domain(CoreError::InsufficientStock))` - stock too low
    pub async fn sell(&self, product_name: &str, quantity: i64) -> DbResult<ProductSell> {
        validate_quantity(quantity)?;

        debug!(product = %product_name, quantity = %quantity, "Selling product");

        let now = Utc::now();

        let sold = sqlx::query_as::<_, ProductSell>(
            r#"
            UPDATE products
            SET
                quantity = quantity - ?1,
                updated_at = ?2
            WHERE name = ?3 AND quantity >= ?1
            RETURNING name, price_cents, original_price_cents, quantity
            "#,
        )
        .bind(quantity)
        .bind(now)
        .bind(product_name)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(sold) = sold {
            info!(
                product = %sold.name,
                sold = quantity,
                remaining = sold.quantity,
                "Product sold"
            );
            return Ok(sold);
        }

        match self.get_by_name(product_name).await? {
            None => Err(DbError::not_found("Product", product_name)),
            Some(product) => {
                warn!(
                    product = %product.name,
                    available = product.quantity,
                    requested = quantity,
                    "Not enough stock"
                );
                check_stock(&product, quantity)?;
                // Stock was replenished between the UPDATE and the lookup;
                // report the shortfall seen by the UPDATE.
                Err(CoreError::InsufficientStock {
                    product: product.name,
                    available: product.quantity,
                    requested: quantity,
                }
                .into())
            }
        }
    }

    /// Overwrites the stock level of `product_name`.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn set_quantity(&self, product_name: &str, quantity: i64) -> DbResult<()> {
        validate_stock_level(quantity)?;

        debug!(product = %product_name, quantity = %quantity, "Setting stock level");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products
            SET
                quantity = ?1,
                updated_at = ?2
            WHERE name = ?3
            "#,
        )
        .bind(quantity)
        .bind(now)
        .bind(product_name)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", product_name));
        }

        Ok(())
    }
}

#[async_trait]
impl InventoryStore for ProductRepository {
    async fn search(&self, product_name: &str, quantity: i64) -> DbResult<ProductSell> {
        self.sell(product_name, quantity).await
    }

    async fn take_product(&self, product_name: &str, quantity: i64) -> DbResult<()> {
        self.set_quantity(product_name, quantity).await
    }
}

/// Helper to generate a new product ID.
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

/// Builds a new product record with fresh id and timestamps.
pub fn new_product(
    name: impl Into<String>,
    quantity: i64,
    price_cents: i64,
    original_price_cents: i64,
) -> Product {
    let now = Utc::now();

    Product {
        id: generate_product_id(),
        name: name.into(),
        quantity,
        price_cents,
        original_price_cents,
        created_at: now,
        updated_at: now,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use std::sync::Arc;

    async fn setup() -> (Database, ProductRepository) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();
        repo.insert(&new_product("Cola 330ml", 10, 250, 180))
            .await
            .unwrap();
        (db, repo)
    }

    #[tokio::test]
    async fn test_insert_and_get_by_name() {
        let (_db, repo) = setup().await;

        let product = repo.get_by_name("Cola 330ml").await.unwrap().unwrap();
        assert_eq!(product.quantity, 10);
        assert_eq!(product.price_cents, 250);
        assert_eq!(product.original_price_cents, 180);

        assert!(repo.get_by_name("Pepsi").await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_insert_rejects_out_of_range_price() {
        let (_db, repo) = setup().await;

        let err = repo
            .insert(&new_product("Gold bar", 1, i64::MAX, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Domain(CoreError::Validation(_))));
        assert!(repo.get_by_name("Gold bar").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_duplicate_name() {
        let (_db, repo) = setup().await;

        let err = repo
            .insert(&new_product("Cola 330ml", 1, 100, 50))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { ref field, .. } if field == "name"));
    }

    #[tokio::test]
    async fn test_search_decrements_stock() {
        let (_db, repo) = setup().await;

        let sold = repo.search("Cola 330ml", 3).await.unwrap();
        assert_eq!(sold.name, "Cola 330ml");
        assert_eq!(sold.quantity, 7);
        assert_eq!(sold.price_cents, 250);
        assert_eq!(sold.original_price_cents, 180);

        let stored = repo.get_by_name("Cola 330ml").await.unwrap().unwrap();
        assert_eq!(stored.quantity, 7);
    }

    #[tokio::test]
    async fn test_search_whole_stock() {
        let (_db, repo) = setup().await;

        let sold = repo.search("Cola 330ml", 10).await.unwrap();
        assert_eq!(sold.quantity, 0);
    }

    #[tokio::test]
    async fn test_search_insufficient_stock_leaves_stock_untouched() {
        let (_db, repo) = setup().await;

        let err = repo.search("Cola 330ml", 11).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::InsufficientStock {
                available: 10,
                requested: 11,
                ..
            })
        ));

        let stored = repo.get_by_name("Cola 330ml").await.unwrap().unwrap();
        assert_eq!(stored.quantity, 10);
    }

    #[tokio::test]
    async fn test_search_unknown_product() {
        let (_db, repo) = setup().await;

        let err = repo.search("unknown", 1).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_search_rejects_non_positive_quantity() {
        let (_db, repo) = setup().await;

        let err = repo.search("Cola 330ml", 0).await.unwrap_err();
        assert!(matches!(err, DbError::Domain(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn test_take_product_overwrites_quantity() {
        let (_db, repo) = setup().await;

        repo.take_product("Cola 330ml", 42).await.unwrap();
        let stored = repo.get_by_name("Cola 330ml").await.unwrap().unwrap();
        assert_eq!(stored.quantity, 42);

        repo.take_product("Cola 330ml", 0).await.unwrap();
        let stored = repo.get_by_name("Cola 330ml").await.unwrap().unwrap();
        assert_eq!(stored.quantity, 0);
    }

    #[tokio::test]
    async fn test_take_product_errors_propagate() {
        let (_db, repo) = setup().await;

        assert!(repo.take_product("unknown", 5).await.unwrap_err().is_not_found());
        assert!(matches!(
            repo.take_product("Cola 330ml", -1).await.unwrap_err(),
            DbError::Domain(CoreError::Validation(_))
        ));
    }

    /// Parallel sales can never sell more than was in stock.
    #[tokio::test]
    async fn test_concurrent_sales_do_not_oversell() {
        let (_db, repo) = setup().await;
        let repo = Arc::new(repo);

        let mut handles = Vec::new();
        for _ in 0..25 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.search("Cola 330ml", 1).await
            }));
        }

        let mut sold = 0;
        let mut rejected = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => sold += 1,
                Err(DbError::Domain(CoreError::InsufficientStock { .. })) => rejected += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(sold, 10);
        assert_eq!(rejected, 15);

        let stored = repo.get_by_name("Cola 330ml").await.unwrap().unwrap();
        assert_eq!(stored.quantity, 0);
    }
}
