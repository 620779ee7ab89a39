//! Domain types and rules shared by `store-db` and `store-api`.
//!
//! Nothing here touches a database or the network. Handlers call
//! [`validation`] before any storage call; the database layer reuses the
//! same rules on insert.
//!
//! ```rust
//! use store_core::validation::parse_pagination;
//!
//! let req = parse_pagination(Some("3"), Some("25"), None).unwrap();
//! assert_eq!(req.offset(), 50);
//! ```

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

/// Page used by list endpoints when the client does not send one.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used by list endpoints when the client does not send one.
pub const DEFAULT_LIMIT: i64 = 10;

/// Upper bound on the page size a client may request.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Highest accepted price or original price, in cents ($10,000,000.00).
///
/// Keeps `price × MAX_ITEM_QUANTITY` and margins well inside i64.
pub const MAX_PRICE_CENTS: i64 = 1_000_000_000;

/// Maximum quantity of a single product in one basket line or one sale.
pub const MAX_ITEM_QUANTITY: i64 = 999;
