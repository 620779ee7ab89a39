//! # Storage Traits
//!
//! The contract HTTP handlers consume. Repositories implement it against
//! SQLite; tests can substitute their own implementations.
//!
//! ```text
//! Handler ──► Arc<dyn BasketProductStore> ──► BasketProductRepository ──► SQLite
//! Handler ──► Arc<dyn InventoryStore>     ──► ProductRepository       ──► SQLite
//! ```

use async_trait::async_trait;
use store_core::{
    BasketProduct, BasketProductsResponse, CreateBasketProduct, GetListRequest, PrimaryKey,
    ProductSell, UpdateBasketProduct,
};

use crate::error::DbResult;

/// CRUD over basket lines.
#[async_trait]
pub trait BasketProductStore: Send + Sync {
    /// Inserts a new line and returns its generated id.
    async fn create(&self, payload: &CreateBasketProduct) -> DbResult<String>;

    /// Fetches a line; `DbError::NotFound` when the id is unknown.
    async fn get_by_id(&self, key: &PrimaryKey) -> DbResult<BasketProduct>;

    /// One page of lines matching `request.search`, plus the total match count.
    async fn get_list(&self, request: &GetListRequest) -> DbResult<BasketProductsResponse>;

    /// Applies the payload to the line `payload.id` and returns that id.
    async fn update(&self, payload: &UpdateBasketProduct) -> DbResult<String>;

    async fn delete(&self, key: &PrimaryKey) -> DbResult<()>;
}

/// Stock operations on products addressed by name.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Sells `quantity` units of `product_name` in one atomic step.
    ///
    /// ## Returns
    /// * `Ok(ProductSell)` - sold; `quantity` is the stock left
    /// * `Err(DbError::NotFound)` - no such product
    /// * `Err(DbError::Domain(CoreError::InsufficientStock))` - stock unchanged
    async fn search(&self, product_name: &str, quantity: i64) -> DbResult<ProductSell>;

    /// Overwrites the stock level of `product_name`.
    async fn take_product(&self, product_name: &str, quantity: i64) -> DbResult<()>;
}
