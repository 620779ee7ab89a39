//! # Domain Types
//!
//! Core domain types used throughout the Store API.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  BasketProduct  │   │  ProductSell    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  name           │       │
//! │  │  name (natural) │◄──│  product_id     │   │  price_cents    │       │
//! │  │  quantity       │   │  basket_id      │   │  quantity left  │       │
//! │  │  price_cents    │   │  quantity       │   │  (not stored)   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Request shapes: CreateBasketProduct, UpdateBasketProduct,             │
//! │                  GetListRequest, PrimaryKey                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Products carry a UUID `id` used by basket lines, while inventory
//! operations address them by their unique `name`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::{DEFAULT_LIMIT, DEFAULT_PAGE};

// =============================================================================
// Product
// =============================================================================

/// A product held in stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name; unique, and the key used by sell/restock operations.
    pub name: String,

    /// On-hand quantity. Never negative.
    pub quantity: i64,

    /// Selling price in cents.
    pub price_cents: i64,

    /// Purchase (cost) price in cents.
    pub original_price_cents: i64,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Product {
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    #[inline]
    pub fn original_price(&self) -> Money {
        Money::from_cents(self.original_price_cents)
    }

    /// Checks whether `quantity` units can be sold from current stock.
    pub fn can_sell(&self, quantity: i64) -> bool {
        quantity > 0 && self.quantity >= quantity
    }
}

// =============================================================================
// Product Sell
// =============================================================================

/// Outcome of a successful sale: a product snapshot with the stock that
/// remains after the sale. Built per call, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductSell {
    pub name: String,
    pub price_cents: i64,
    pub original_price_cents: i64,
    /// Quantity remaining in stock after the sale.
    pub quantity: i64,
}

impl ProductSell {
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    #[inline]
    pub fn original_price(&self) -> Money {
        Money::from_cents(self.original_price_cents)
    }
}

/// What the caller of a sale gets back: the sell snapshot plus the money
/// figures for the units sold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleReceipt {
    pub product: ProductSell,
    pub sold_quantity: i64,
    /// `price × sold_quantity`.
    pub total_cents: Money,
    /// `(price − original_price) × sold_quantity`; negative when sold at a loss.
    pub margin_cents: Money,
}

impl SaleReceipt {
    pub fn new(product: ProductSell, sold_quantity: i64) -> Self {
        let total_cents = product.price() * sold_quantity;
        let margin_cents = (product.price() - product.original_price()) * sold_quantity;

        SaleReceipt {
            product,
            sold_quantity,
            total_cents,
            margin_cents,
        }
    }
}

// =============================================================================
// Basket Product
// =============================================================================

/// A line item of a shopping basket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct BasketProduct {
    /// Unique identifier (UUID v4), generated on insert.
    pub id: String,
    pub basket_id: String,
    /// References `Product::id`.
    pub product_id: String,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a basket line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBasketProduct {
    pub basket_id: String,
    pub product_id: String,
    pub quantity: i64,
}

/// Payload for updating a basket line.
///
/// `id` is optional in the body; the HTTP layer always overwrites it with the
/// path parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBasketProduct {
    #[serde(default)]
    pub id: String,
    pub product_id: String,
    pub quantity: i64,
}

/// Primary key wrapper used by storage lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryKey {
    pub id: String,
}

impl PrimaryKey {
    pub fn new(id: impl Into<String>) -> Self {
        PrimaryKey { id: id.into() }
    }
}

// =============================================================================
// Listing
// =============================================================================

/// Pagination and search parameters for list queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetListRequest {
    /// 1-based page number.
    pub page: i64,
    pub limit: i64,
    pub search: String,
}

impl GetListRequest {
    /// Number of rows to skip for this page. Saturates instead of wrapping.
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).max(0).saturating_mul(self.limit)
    }
}

impl Default for GetListRequest {
    fn default() -> Self {
        GetListRequest {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            search: String::new(),
        }
    }
}

/// One page of basket lines plus the total number of matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketProductsResponse {
    pub basket_products: Vec<BasketProduct>,
    pub count: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================
