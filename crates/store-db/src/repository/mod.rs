//! SQLite implementations of the storage traits. All SQL uses numbered
//! `?N` placeholders.

pub mod basket_product;
pub mod product;
