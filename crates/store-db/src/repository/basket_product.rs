//! # Basket Product Repository
//!
//! CRUD operations for basket line items.
//!
//! ## Listing
//! ```text
//! GET /basketProducts?page=2&limit=10&search=b-1
//!       │
//!       ▼
//! SELECT ... WHERE basket_id LIKE '%b-1%' ESCAPE '\' OR product_id LIKE ...
//!            ORDER BY created_at DESC LIMIT 10 OFFSET 10   → page
//! SELECT COUNT(*) ... same WHERE                          → count
//! ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::store::BasketProductStore;
use store_core::validation::{validate_create_basket_product, validate_update_basket_product};
use store_core::{
    BasketProduct, BasketProductsResponse, CreateBasketProduct, GetListRequest, PrimaryKey,
    UpdateBasketProduct,
};

/// Repository for basket line items.
#[derive(Debug, Clone)]
pub struct BasketProductRepository {
    pool: SqlitePool,
}

impl BasketProductRepository {
    /// Creates a new BasketProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BasketProductRepository { pool }
    }

    /// Turns a free-text search into a substring LIKE pattern with `\` as the
    /// escape character, so `%` and `_` in the input match literally.
    /// Empty input matches everything.
    fn like_pattern(search: &str) -> String {
        let mut pattern = String::with_capacity(search.len() + 2);
        pattern.push('%');
        for c in search.trim().chars() {
            if matches!(c, '\\' | '%' | '_') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }
}

#[async_trait]
impl BasketProductStore for BasketProductRepository {
    /// Inserts a basket line with a generated UUID.
    ///
    /// ## Returns
    /// * `Ok(id)` - the new line's id
    /// * `Err(DbError::ForeignKeyViolation)` - `product_id` names no product
    async fn create(&self, payload: &CreateBasketProduct) -> DbResult<String> {
        validate_create_basket_product(payload)?;

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        debug!(
            id = %id,
            basket_id = %payload.basket_id,
            product_id = %payload.product_id,
            "Inserting basket product"
        );

        sqlx::query(
            r#"
            INSERT INTO basket_products (
                id, basket_id, product_id, quantity, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&id)
        .bind(payload.basket_id.trim())
        .bind(payload.product_id.trim())
        .bind(payload.quantity)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        info!(id = %id, "Basket product created");

        Ok(id)
    }

    async fn get_by_id(&self, key: &PrimaryKey) -> DbResult<BasketProduct> {
        debug!(id = %key.id, "Getting basket product");

        sqlx::query_as::<_, BasketProduct>(
            r#"
            SELECT
                id,
                basket_id,
                product_id,
                quantity,
                created_at,
                updated_at
            FROM basket_products
            WHERE id = ?1
            "#,
        )
        .bind(&key.id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("BasketProduct", &key.id))
    }

    /// Returns one page of matching lines, newest first.
    ///
    /// `count` is the number of matches ignoring pagination. A failing query
    /// is returned as an error, never as an empty page.
    async fn get_list(&self, request: &GetListRequest) -> DbResult<BasketProductsResponse> {
        let pattern = Self::like_pattern(&request.search);

        debug!(
            page = request.page,
            limit = request.limit,
            search = %request.search,
            "Listing basket products"
        );

        let basket_products = sqlx::query_as::<_, BasketProduct>(
            r#"
            SELECT
                id,
                basket_id,
                product_id,
                quantity,
                created_at,
                updated_at
            FROM basket_products
            WHERE basket_id LIKE ?1 ESCAPE '\' OR product_id LIKE ?1 ESCAPE '\'
            ORDER BY created_at DESC, id
            LIMIT ?2 OFFSET ?3
            "#,
        )
        .bind(&pattern)
        .bind(request.limit)
        .bind(request.offset())
        .fetch_all(&self.pool)
        .await?;

        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM basket_products
            WHERE basket_id LIKE ?1 ESCAPE '\' OR product_id LIKE ?1 ESCAPE '\'
            "#,
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;

        Ok(BasketProductsResponse {
            basket_products,
            count,
        })
    }

    /// Updates `product_id` and `quantity` of the line `payload.id`.
    ///
    /// ## Returns
    /// * `Ok(id)` - the updated line's id
    /// * `Err(DbError::NotFound)` - no line with that id
    async fn update(&self, payload: &UpdateBasketProduct) -> DbResult<String> {
        validate_update_basket_product(payload)?;

        debug!(id = %payload.id, "Updating basket product");

        let result = sqlx::query(
            r#"
            UPDATE basket_products
            SET
                product_id = ?1,
                quantity = ?2,
                updated_at = ?3
            WHERE id = ?4
            "#,
        )
        .bind(payload.product_id.trim())
        .bind(payload.quantity)
        .bind(Utc::now())
        .bind(&payload.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("BasketProduct", &payload.id));
        }

        Ok(payload.id.clone())
    }

    async fn delete(&self, key: &PrimaryKey) -> DbResult<()> {
        debug!(id = %key.id, "Deleting basket product");

        let result = sqlx::query("DELETE FROM basket_products WHERE id = ?1")
            .bind(&key.id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("BasketProduct", &key.id));
        }

        info!(id = %key.id, "Basket product deleted");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::product::new_product;
    use store_core::CoreError;

    struct Fixture {
        db: Database,
        repo: BasketProductRepository,
        cola_id: String,
        water_id: String,
    }

    async fn setup() -> Fixture {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let products = db.products();
        let cola = products
            .insert(&new_product("Cola 330ml", 10, 250, 180))
            .await
            .unwrap();
        let water = products
            .insert(&new_product("Water 500ml", 20, 100, 40))
            .await
            .unwrap();

        Fixture {
            repo: db.basket_products(),
            db,
            cola_id: cola.id,
            water_id: water.id,
        }
    }

    fn line(basket_id: &str, product_id: &str, quantity: i64) -> CreateBasketProduct {
        CreateBasketProduct {
            basket_id: basket_id.to_string(),
            product_id: product_id.to_string(),
            quantity,
        }
    }

    #[tokio::test]
    async fn test_create_then_get_returns_input() {
        let fx = setup().await;

        let id = fx.repo.create(&line("basket-1", &fx.cola_id, 2)).await.unwrap();
        let stored = fx.repo.get_by_id(&PrimaryKey::new(&id)).await.unwrap();

        assert_eq!(stored.id, id);
        assert_eq!(stored.basket_id, "basket-1");
        assert_eq!(stored.product_id, fx.cola_id);
        assert_eq!(stored.quantity, 2);
    }

    #[tokio::test]
    async fn test_create_unknown_product_is_foreign_key_violation() {
        let fx = setup().await;

        let err = fx
            .repo
            .create(&line("basket-1", "no-such-product", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_payload() {
        let fx = setup().await;

        let err = fx.repo.create(&line("", &fx.cola_id, 1)).await.unwrap_err();
        assert!(matches!(err, DbError::Domain(CoreError::Validation(_))));

        let err = fx.repo.create(&line("b", &fx.cola_id, 0)).await.unwrap_err();
        assert!(matches!(err, DbError::Domain(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_unknown_id() {
        let fx = setup().await;

        let err = fx.repo.get_by_id(&PrimaryKey::new("missing")).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_list_pagination_and_count() {
        let fx = setup().await;

        for i in 0..15 {
            fx.repo
                .create(&line(&format!("basket-{i}"), &fx.cola_id, 1))
                .await
                .unwrap();
        }

        let first = fx.repo.get_list(&GetListRequest::default()).await.unwrap();
        assert_eq!(first.basket_products.len(), 10);
        assert_eq!(first.count, 15);

        let second = fx
            .repo
            .get_list(&GetListRequest {
                page: 2,
                limit: 10,
                search: String::new(),
            })
            .await
            .unwrap();
        assert_eq!(second.basket_products.len(), 5);
        assert_eq!(second.count, 15);

        let ids: std::collections::HashSet<_> = first
            .basket_products
            .iter()
            .chain(second.basket_products.iter())
            .map(|b| b.id.clone())
            .collect();
        assert_eq!(ids.len(), 15);
    }

    #[tokio::test]
    async fn test_list_search_matches_basket_or_product() {
        let fx = setup().await;

        fx.repo.create(&line("kitchen", &fx.cola_id, 1)).await.unwrap();
        fx.repo.create(&line("kitchen", &fx.water_id, 3)).await.unwrap();
        fx.repo.create(&line("garage", &fx.water_id, 2)).await.unwrap();

        let by_basket = fx
            .repo
            .get_list(&GetListRequest {
                search: "kitch".to_string(),
                ..GetListRequest::default()
            })
            .await
            .unwrap();
        assert_eq!(by_basket.count, 2);
        assert!(by_basket.basket_products.iter().all(|b| b.basket_id == "kitchen"));

        let by_product = fx
            .repo
            .get_list(&GetListRequest {
                search: fx.water_id.clone(),
                ..GetListRequest::default()
            })
            .await
            .unwrap();
        assert_eq!(by_product.count, 2);

        let none = fx
            .repo
            .get_list(&GetListRequest {
                search: "nothing-matches".to_string(),
                ..GetListRequest::default()
            })
            .await
            .unwrap();
        assert_eq!(none.count, 0);
        assert!(none.basket_products.is_empty());
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(BasketProductRepository::like_pattern(""), "%%");
        assert_eq!(BasketProductRepository::like_pattern(" b-1 "), "%b-1%");
        assert_eq!(
            BasketProductRepository::like_pattern(r"50%_off\"),
            r"%50\%\_off\\%"
        );
    }

    #[tokio::test]
    async fn test_list_search_wildcards_are_literal() {
        let fx = setup().await;

        fx.repo.create(&line("kitchen", &fx.cola_id, 1)).await.unwrap();
        fx.repo.create(&line("garage", &fx.water_id, 2)).await.unwrap();
        fx.repo.create(&line("basketX1", &fx.cola_id, 1)).await.unwrap();

        for search in ["%", "_", "basket_1"] {
            let page = fx
                .repo
                .get_list(&GetListRequest {
                    search: search.to_string(),
                    ..GetListRequest::default()
                })
                .await
                .unwrap();
            assert_eq!(page.count, 0, "search {search:?}");
        }

        fx.repo.create(&line("basket_1", &fx.cola_id, 1)).await.unwrap();
        let page = fx
            .repo
            .get_list(&GetListRequest {
                search: "basket_1".to_string(),
                ..GetListRequest::default()
            })
            .await
            .unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(page.basket_products[0].basket_id, "basket_1");
    }

    #[tokio::test]
    async fn test_list_failure_is_propagated() {
        let fx = setup().await;
        fx.db.close().await;

        assert!(fx.repo.get_list(&GetListRequest::default()).await.is_err());
    }

    #[tokio::test]
    async fn test_update_applies_changes() {
        let fx = setup().await;
        let id = fx.repo.create(&line("basket-1", &fx.cola_id, 2)).await.unwrap();

        let updated_id = fx
            .repo
            .update(&UpdateBasketProduct {
                id: id.clone(),
                product_id: fx.water_id.clone(),
                quantity: 5,
            })
            .await
            .unwrap();
        assert_eq!(updated_id, id);

        let stored = fx.repo.get_by_id(&PrimaryKey::new(&id)).await.unwrap();
        assert_eq!(stored.product_id, fx.water_id);
        assert_eq!(stored.quantity, 5);
        assert_eq!(stored.basket_id, "basket-1");
        assert!(stored.updated_at >= stored.created_at);
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let fx = setup().await;

        let err = fx
            .repo
            .update(&UpdateBasketProduct {
                id: "missing".to_string(),
                product_id: fx.cola_id.clone(),
                quantity: 1,
            })
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete() {
        let fx = setup().await;
        let id = fx.repo.create(&line("basket-1", &fx.cola_id, 2)).await.unwrap();
        let key = PrimaryKey::new(&id);

        fx.repo.delete(&key).await.unwrap();
        assert!(fx.repo.get_by_id(&key).await.unwrap_err().is_not_found());
        assert!(fx.repo.delete(&key).await.unwrap_err().is_not_found());
    }
}
