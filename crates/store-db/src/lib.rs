//! SQLite storage for the store API.
//!
//! [`Database`] owns the pool and hands out repositories. Handlers only see
//! them through [`BasketProductStore`] and [`InventoryStore`], which lets
//! tests swap in stubs.
//!
//! ```rust,ignore
//! use store_db::{Database, DbConfig, InventoryStore};
//!
//! let db = Database::new(DbConfig::new("store.db")).await?;
//! let sold = db.products().search("Cola 330ml", 2).await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use store::{BasketProductStore, InventoryStore};

pub use repository::basket_product::BasketProductRepository;
pub use repository::product::{new_product, ProductRepository};
