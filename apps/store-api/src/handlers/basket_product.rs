//! # Basket Product Handlers
//!
//! CRUD endpoints for basket line items.
//!
//! ## Create Flow
//! ```text
//! POST /basketProduct { basket_id, product_id, quantity }
//!       │
//!       ├── bad JSON / failed validation ──► 400
//!       ▼
//! store.create(payload) ──► id
//!       │
//!       ├── unknown product_id ──► 400
//!       ▼
//! store.get_by_id(id) ──► 201 + record
//!       │
//!       └── read fails ──► 500 (the row is already stored)
//! ```

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use tracing::{debug, error, info};

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::AppState;
use store_core::validation::{
    parse_pagination, validate_create_basket_product, validate_update_basket_product,
};
use store_core::{
    BasketProduct, BasketProductsResponse, CreateBasketProduct, PrimaryKey, UpdateBasketProduct,
};

/// Raw list query; numbers are parsed by `parse_pagination` so that a bad
/// value is reported as a validation error.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
}

/// `POST /basketProduct`
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateBasketProduct>, JsonRejection>,
) -> Result<ApiResponse<BasketProduct>, ApiError> {
    let Json(payload) =
        payload.map_err(|e| ApiError::from(e).context("error while reading body"))?;

    validate_create_basket_product(&payload)
        .map_err(|e| ApiError::from(e).context("error while reading body"))?;

    let id = state
        .basket_products
        .create(&payload)
        .await
        .map_err(|e| ApiError::from(e).context("error while creating basket product"))?;

    let created = state
        .basket_products
        .get_by_id(&PrimaryKey::new(&id))
        .await
        .map_err(|e| {
            error!(id = %id, error = %e, "Created basket product could not be read back");
            ApiError::internal("Basket product was created but could not be read back")
                .context("error while getting basket product")
        })?;

    info!(id = %created.id, basket_id = %created.basket_id, "Basket product created");

    Ok(ApiResponse::created(created))
}

/// `GET /basketProduct/{id}`
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<BasketProduct>, ApiError> {
    let basket_product = state
        .basket_products
        .get_by_id(&PrimaryKey::new(id))
        .await
        .map_err(|e| ApiError::from(e).context("error while getting basket product"))?;

    Ok(ApiResponse::ok(basket_product))
}

/// `GET /basketProducts?page&limit&search`
///
/// Bad pagination is rejected before storage is touched.
pub async fn get_list(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<ApiResponse<BasketProductsResponse>, ApiError> {
    let Query(params) =
        params.map_err(|e| ApiError::from(e).context("error while reading query"))?;

    let request = parse_pagination(
        params.page.as_deref(),
        params.limit.as_deref(),
        params.search.as_deref(),
    )
    .map_err(|e| ApiError::from(e).context("error while parsing pagination"))?;

    debug!(page = request.page, limit = request.limit, "Listing basket products");

    let page = state
        .basket_products
        .get_list(&request)
        .await
        .map_err(|e| ApiError::from(e).context("error while listing basket products"))?;

    Ok(ApiResponse::ok(page))
}

/// `PUT /basketProduct/{id}`
///
/// The path id always replaces whatever `id` the body carries.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateBasketProduct>, JsonRejection>,
) -> Result<ApiResponse<BasketProduct>, ApiError> {
    let Json(mut payload) =
        payload.map_err(|e| ApiError::from(e).context("error while reading body"))?;
    payload.id = id;

    validate_update_basket_product(&payload)
        .map_err(|e| ApiError::from(e).context("error while reading body"))?;

    let id = state
        .basket_products
        .update(&payload)
        .await
        .map_err(|e| ApiError::from(e).context("error while updating basket product"))?;

    let updated = state
        .basket_products
        .get_by_id(&PrimaryKey::new(id))
        .await
        .map_err(|e| ApiError::from(e).context("error while getting basket product"))?;

    Ok(ApiResponse::ok(updated))
}

/// `DELETE /basketProduct/{id}`
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<&'static str>, ApiError> {
    state
        .basket_products
        .delete(&PrimaryKey::new(id))
        .await
        .map_err(|e| ApiError::from(e).context("error while deleting basket product"))?;

    Ok(ApiResponse::ok("basket product deleted!"))
}
