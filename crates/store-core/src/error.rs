//! Domain errors.
//!
//! `store-db` wraps these in `DbError::Domain` and the HTTP layer maps
//! `InsufficientStock` to 409 and `Validation` to 400.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A sale asked for more units than are on hand. Stock is left as is.
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// A request field that breaks an input rule. `field` is the name the client
/// sent, so messages can be shown as-is.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Non-numeric paging values and the like.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

pub type CoreResult<T> = Result<T, CoreError>;
