//! # HTTP Handlers
//!
//! Each handler binds its input, validates it, calls a storage trait and
//! wraps the result in the response envelope.
//!
//! ## Handler Categories
//! - `basket_product` - basket line CRUD
//! - `product` - selling and restocking
//! - `health` - liveness of the database

pub mod basket_product;
pub mod health;
pub mod product;
