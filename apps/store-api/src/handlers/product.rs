//! # Inventory Handlers
//!
//! Selling and restocking products addressed by name.
//!
//! ## Sell Flow
//! ```text
//! POST /product/sell { name, quantity }
//!       │
//!       ▼
//! inventory.search(name, quantity)       one conditional UPDATE
//!       │
//!       ├── sold        ──► 200 + SaleReceipt (remaining stock, total, margin)
//!       ├── no product  ──► 404
//!       └── short stock ──► 409, stock unchanged
//! ```

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::AppState;
use store_core::validation::{validate_product_name, validate_quantity, validate_stock_level};
use store_core::SaleReceipt;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellRequest {
    pub name: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetQuantityRequest {
    pub quantity: i64,
}

/// `POST /product/sell`
pub async fn sell(
    State(state): State<AppState>,
    payload: Result<Json<SellRequest>, JsonRejection>,
) -> Result<ApiResponse<SaleReceipt>, ApiError> {
    let Json(payload) =
        payload.map_err(|e| ApiError::from(e).context("error while reading body"))?;

    validate_product_name(&payload.name)
        .and_then(|_| validate_quantity(payload.quantity))
        .map_err(|e| ApiError::from(e).context("error while reading body"))?;

    let sold = state
        .inventory
        .search(&payload.name, payload.quantity)
        .await
        .map_err(|e| ApiError::from(e).context("error while selling product"))?;

    let receipt = SaleReceipt::new(sold, payload.quantity);

    info!(
        product = %receipt.product.name,
        sold = receipt.sold_quantity,
        total = %receipt.total_cents,
        "Sale completed"
    );

    Ok(ApiResponse::ok(receipt))
}

/// `PUT /product/{name}/quantity`
pub async fn set_quantity(
    State(state): State<AppState>,
    Path(name): Path<String>,
    payload: Result<Json<SetQuantityRequest>, JsonRejection>,
) -> Result<ApiResponse<&'static str>, ApiError> {
    let Json(payload) =
        payload.map_err(|e| ApiError::from(e).context("error while reading body"))?;

    validate_stock_level(payload.quantity)
        .map_err(|e| ApiError::from(e).context("error while reading body"))?;

    state
        .inventory
        .take_product(&name, payload.quantity)
        .await
        .map_err(|e| ApiError::from(e).context("error while updating product quantity"))?;

    Ok(ApiResponse::ok("product quantity updated!"))
}
