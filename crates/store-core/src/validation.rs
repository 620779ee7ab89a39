//! Input rules applied before anything reaches storage.
//!
//! Request shape is checked by the axum extractors and the schema's
//! constraints are the last line; everything in between lives here.
//!
//! ```rust
//! use store_core::validation::{parse_pagination, validate_quantity};
//!
//! let req = parse_pagination(None, Some("25"), Some(" basket ")).unwrap();
//! assert_eq!((req.page, req.limit, req.search.as_str()), (1, 25, "basket"));
//!
//! assert!(validate_quantity(5).is_ok());
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{CreateBasketProduct, GetListRequest, Product, UpdateBasketProduct};
use crate::{DEFAULT_LIMIT, DEFAULT_PAGE, MAX_ITEM_QUANTITY, MAX_PAGE_LIMIT, MAX_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest identifier accepted for basket and product references.
const MAX_ID_LEN: usize = 64;

/// Longest free-text search accepted by list endpoints.
const MAX_SEARCH_LEN: usize = 100;

/// Highest page whose row offset still fits in an i64 at the largest limit.
pub const MAX_PAGE: i64 = i64::MAX / MAX_PAGE_LIMIT;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an identifier field (basket id, product id).
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 64 characters
pub fn validate_id(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > MAX_ID_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_ID_LEN,
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be between 1 and 200 characters
///
/// ## Example
/// ```rust
/// use store_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Coca-Cola 330ml").is_ok());
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (matches everything)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > MAX_SEARCH_LEN {
        return Err(ValidationError::TooLong {
            field: "search".to_string(),
            max: MAX_SEARCH_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity being sold or placed in a basket.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates an absolute stock level. Zero is allowed (sold out).
pub fn validate_stock_level(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a price in cents: `0..=MAX_PRICE_CENTS`. Zero is allowed (free items).
///
/// ## Example
/// ```rust
/// use store_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(1099).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// assert!(validate_price_cents(i64::MAX).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

// =============================================================================
// Pagination
// =============================================================================

/// Parses raw `page` / `limit` / `search` query values into a list request.
///
/// ## Rules
/// - Missing `page` → 1, missing `limit` → 10
/// - Non-numeric values are rejected (the caller must not touch storage)
/// - `1 <= page <= MAX_PAGE`, `1 <= limit <= MAX_PAGE_LIMIT`
/// - `search` is trimmed, at most 100 characters
///
/// ```text
/// ?page=abc        → InvalidFormat { field: "page" }
/// ?limit=0         → OutOfRange   { field: "limit", 1..=100 }
/// (nothing)        → GetListRequest { page: 1, limit: 10, search: "" }
/// ```
pub fn parse_pagination(
    page: Option<&str>,
    limit: Option<&str>,
    search: Option<&str>,
) -> ValidationResult<GetListRequest> {
    let page = parse_integer("page", page, DEFAULT_PAGE)?;
    let limit = parse_integer("limit", limit, DEFAULT_LIMIT)?;

    if !(1..=MAX_PAGE).contains(&page) {
        return Err(ValidationError::OutOfRange {
            field: "page".to_string(),
            min: 1,
            max: MAX_PAGE,
        });
    }

    if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
        return Err(ValidationError::OutOfRange {
            field: "limit".to_string(),
            min: 1,
            max: MAX_PAGE_LIMIT,
        });
    }

    let search = validate_search_query(search.unwrap_or_default())?;

    Ok(GetListRequest {
        page,
        limit,
        search,
    })
}

fn parse_integer(field: &str, raw: Option<&str>, default: i64) -> ValidationResult<i64> {
    match raw {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map_err(|e| ValidationError::InvalidFormat {
                field: field.to_string(),
                reason: e.to_string(),
            }),
    }
}

// =============================================================================
// Payload Validators
// =============================================================================

/// Validates a basket line creation payload.
pub fn validate_create_basket_product(payload: &CreateBasketProduct) -> ValidationResult<()> {
    validate_id("basket_id", &payload.basket_id)?;
    validate_id("product_id", &payload.product_id)?;
    validate_quantity(payload.quantity)
}

/// Validates a basket line update payload (after the path id was applied).
pub fn validate_update_basket_product(payload: &UpdateBasketProduct) -> ValidationResult<()> {
    validate_id("id", &payload.id)?;
    validate_id("product_id", &payload.product_id)?;
    validate_quantity(payload.quantity)
}

// =============================================================================
// Stock Rules
// =============================================================================

/// Checks that `requested` units can be taken from `product`.
///
/// Used to explain why a conditional decrement matched no row.
pub fn check_stock(product: &Product, requested: i64) -> CoreResult<()> {
    if !product.can_sell(requested) {
        return Err(CoreError::InsufficientStock {
            product: product.name.clone(),
            available: product.quantity,
            requested,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
